// Navigation history - committed locations with back/forward

pub struct History {
    entries: Vec<&'static str>,
    index: usize,
}

impl History {
    pub fn new(start: &'static str) -> Self {
        Self {
            entries: vec![start],
            index: 0,
        }
    }

    pub fn current(&self) -> &'static str {
        self.entries[self.index]
    }

    pub fn push(&mut self, path: &'static str) {
        // Drop forward history when navigating somewhere new
        self.entries.truncate(self.index + 1);
        self.entries.push(path);
        self.index += 1;
    }

    /// Overwrite the current entry (redirects on back/forward)
    pub fn replace(&mut self, path: &'static str) {
        self.entries[self.index] = path;
    }

    /// Entry `go_back` would land on, without moving
    pub fn peek_back(&self) -> Option<&'static str> {
        self.index.checked_sub(1).map(|i| self.entries[i])
    }

    /// Entry `go_forward` would land on, without moving
    pub fn peek_forward(&self) -> Option<&'static str> {
        self.entries.get(self.index + 1).copied()
    }

    pub fn go_back(&mut self) -> Option<&'static str> {
        if self.index > 0 {
            self.index -= 1;
            Some(self.current())
        } else {
            None
        }
    }

    pub fn go_forward(&mut self) -> Option<&'static str> {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            Some(self.current())
        } else {
            None
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}
