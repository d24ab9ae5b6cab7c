/// Route definitions and the ordered route table

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Identifier of a route, unique within a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteName(&'static str);

impl RouteName {
    pub const HOME: RouteName = RouteName("home");
    pub const CROP: RouteName = RouteName("crop");
    pub const FILTERS: RouteName = RouteName("filters");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The screen rendered for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Crop,
    Filters,
}

/// Optional per-route flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Route is only reachable while an image is loaded
    pub requires_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: RouteName,
    pub view: View,
    pub meta: RouteMeta,
}

impl Route {
    pub const fn new(path: &'static str, name: RouteName, view: View) -> Self {
        Self {
            path,
            name,
            view,
            meta: RouteMeta {
                requires_image: false,
            },
        }
    }

    pub fn requires_image(mut self) -> Self {
        self.meta.requires_image = true;
        self
    }
}

/// Where a navigation wants to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget<'a> {
    Name(&'a str),
    Path(&'a str),
}

impl fmt::Display for NavigationTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Name(name) => write!(f, "{}", name),
            NavigationTarget::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Ordered list of routes with unique names and paths
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Validate and build a table. Names and paths must be unique and a
    /// `home` route must exist, since guards redirect there.
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        for route in &routes {
            if !names.insert(route.name) {
                return Err(Error::DuplicateRouteName(route.name.to_string()));
            }
            if !paths.insert(route.path) {
                return Err(Error::DuplicatePath(route.path.to_string()));
            }
        }

        if !names.contains(&RouteName::HOME) {
            return Err(Error::MissingHomeRoute);
        }

        Ok(Self { routes })
    }

    /// The editor's screens: home, crop and filters
    pub fn default_routes() -> Result<Self> {
        Self::new(vec![
            Route::new("/", RouteName::HOME, View::Home),
            Route::new("/crop", RouteName::CROP, View::Crop).requires_image(),
            Route::new("/filters", RouteName::FILTERS, View::Filters).requires_image(),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name.as_str() == name)
    }

    pub fn by_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn resolve(&self, target: NavigationTarget<'_>) -> Result<&Route> {
        let found = match target {
            NavigationTarget::Name(name) => self.by_name(name),
            NavigationTarget::Path(path) => self.by_path(path),
        };
        found.ok_or_else(|| Error::UnknownRoute(target.to_string()))
    }

    /// The redirect target of every guard
    pub fn home(&self) -> &Route {
        // Both constructors guarantee a home route
        &self.routes[self.home_index()]
    }

    fn home_index(&self) -> usize {
        self.routes
            .iter()
            .position(|route| route.name == RouteName::HOME)
            .unwrap_or(0)
    }
}
