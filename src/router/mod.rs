/// Screen routing
///
/// This module maps paths and names to screens and decides, before every
/// navigation, whether the target may be shown:
/// - Route definitions and the route table (routes.rs)
/// - Pre-navigation hooks (guard.rs)
/// - Back/forward history (history.rs)

pub mod guard;
pub mod history;
pub mod routes;

pub use guard::{requires_image_guard, Guard, NavigationDecision};
pub use routes::{NavigationTarget, Route, RouteName, RouteTable, View};

use crate::error::{Error, Result};
use crate::state::ImageState;
use history::History;

/// Redirects followed before a navigation is considered looping
const MAX_REDIRECTS: usize = 8;

/// Result of a committed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Name of the route that was asked for
    pub requested: RouteName,
    /// Route that ended up active
    pub route: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.route.name
    }
}

/// Route table, global pre-navigation hook and history
pub struct Router {
    table: RouteTable,
    guard: Guard,
    history: History,
}

impl Router {
    /// Start on the table's home route. Every navigation proceeds until a
    /// hook is installed with [`Router::before_each`].
    pub fn new(table: RouteTable) -> Self {
        let history = History::new(table.home().path);
        Self {
            table,
            guard: Box::new(|_, _| NavigationDecision::Proceed),
            history,
        }
    }

    /// Replace the global pre-navigation hook
    pub fn before_each<F>(&mut self, guard: F)
    where
        F: Fn(&Route, &ImageState) -> NavigationDecision + 'static,
    {
        self.guard = Box::new(guard);
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The active route
    pub fn current(&self) -> &Route {
        self.table
            .by_path(self.history.current())
            .unwrap_or_else(|| self.table.home())
    }

    /// Navigate to `target`, following guard redirects, and record the
    /// result in history. Navigating to the active route adds no entry.
    pub fn push(&mut self, target: NavigationTarget<'_>, image: &ImageState) -> Result<Navigation> {
        let requested = self.table.resolve(target)?.clone();
        let route = self.guarded(requested.clone(), image)?;

        if route.path != self.history.current() {
            self.history.push(route.path);
        }

        Ok(Navigation {
            requested: requested.name,
            route,
        })
    }

    /// Step back in history, re-checking the guard against the current image.
    /// History only moves once the guard has settled on a route.
    pub fn back(&mut self, image: &ImageState) -> Result<Option<Navigation>> {
        let Some(path) = self.history.peek_back() else {
            return Ok(None);
        };
        let nav = self.revisit(path, image)?;
        self.history.go_back();
        self.settle(path, &nav);
        Ok(Some(nav))
    }

    /// Step forward in history, re-checking the guard against the current image
    pub fn forward(&mut self, image: &ImageState) -> Result<Option<Navigation>> {
        let Some(path) = self.history.peek_forward() else {
            return Ok(None);
        };
        let nav = self.revisit(path, image)?;
        self.history.go_forward();
        self.settle(path, &nav);
        Ok(Some(nav))
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn revisit(&self, path: &'static str, image: &ImageState) -> Result<Navigation> {
        let requested = self.table.resolve(NavigationTarget::Path(path))?.clone();
        let route = self.guarded(requested.clone(), image)?;

        Ok(Navigation {
            requested: requested.name,
            route,
        })
    }

    /// Redirected history entries are overwritten with where they landed
    fn settle(&mut self, path: &'static str, nav: &Navigation) {
        if nav.route.path != path {
            self.history.replace(nav.route.path);
        }
    }

    fn guarded(&self, mut route: Route, image: &ImageState) -> Result<Route> {
        let requested = route.name;

        for _ in 0..MAX_REDIRECTS {
            match (self.guard)(&route, image) {
                NavigationDecision::Proceed => return Ok(route),
                NavigationDecision::Redirect(name) => {
                    log::info!("↪️  Redirecting {} to {}", route.path, name);
                    route = self
                        .table
                        .resolve(NavigationTarget::Name(name.as_str()))?
                        .clone();
                }
            }
        }

        log::warn!("🔁 Navigation to {} exceeded {} redirects", requested, MAX_REDIRECTS);
        Err(Error::RedirectLoop(requested.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ImageFile, ReleasePolicy};

    fn editor_router() -> Router {
        let mut router = Router::new(RouteTable::default_routes().unwrap());
        router.before_each(requires_image_guard);
        router
    }

    fn empty_image() -> ImageState {
        ImageState::new(ReleasePolicy::Retain)
    }

    #[test]
    fn test_starts_at_home() {
        let router = editor_router();
        assert_eq!(router.current().name, RouteName::HOME);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_image_routes_redirect_without_image() {
        let mut router = editor_router();
        let image = empty_image();

        for path in ["/crop", "/filters"] {
            let nav = router.push(NavigationTarget::Path(path), &image).unwrap();
            assert!(nav.redirected());
            assert_eq!(nav.route.path, "/");
            assert_eq!(router.current().path, "/");
        }
    }

    #[test]
    fn test_open_routes_ignore_image_state() {
        let mut router = editor_router();
        let mut image = empty_image();

        let nav = router.push(NavigationTarget::Name("home"), &image).unwrap();
        assert!(!nav.redirected());

        image.set_image_file(Some(ImageFile::fixture("a.png")));
        let nav = router.push(NavigationTarget::Path("/"), &image).unwrap();
        assert!(!nav.redirected());
        assert_eq!(nav.route.view, View::Home);
    }

    #[test]
    fn test_load_crop_clear_scenario() {
        let mut router = editor_router();
        let mut image = empty_image();

        let nav = router.push(NavigationTarget::Path("/crop"), &image).unwrap();
        assert_eq!(nav.route.path, "/");

        image.set_image_file(Some(ImageFile::fixture("fileA.png")));
        let nav = router.push(NavigationTarget::Path("/crop"), &image).unwrap();
        assert!(!nav.redirected());
        assert_eq!(nav.route.path, "/crop");
        assert_eq!(router.current().view, View::Crop);

        image.clear_image();
        let nav = router.push(NavigationTarget::Path("/filters"), &image).unwrap();
        assert!(nav.redirected());
        assert_eq!(nav.route.path, "/");
    }

    #[test]
    fn test_back_rechecks_guard() {
        let mut router = editor_router();
        let mut image = empty_image();
        image.set_image_file(Some(ImageFile::fixture("a.png")));

        router.push(NavigationTarget::Path("/crop"), &image).unwrap();
        router.push(NavigationTarget::Path("/filters"), &image).unwrap();

        image.clear_image();
        let nav = router.back(&image).unwrap().unwrap();
        assert!(nav.redirected());
        assert_eq!(router.current().path, "/");

        // The redirected entry was replaced, not kept as /crop
        image.set_image_file(Some(ImageFile::fixture("b.png")));
        let nav = router.forward(&image).unwrap().unwrap();
        assert_eq!(nav.route.path, "/filters");
        assert!(router.forward(&image).unwrap().is_none());
    }

    #[test]
    fn test_pushing_current_route_adds_no_entry() {
        let mut router = editor_router();
        let image = empty_image();

        router.push(NavigationTarget::Path("/crop"), &image).unwrap();
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let mut router = editor_router();
        let result = router.push(NavigationTarget::Path("/export"), &empty_image());
        assert!(matches!(result, Err(Error::UnknownRoute(_))));
        assert_eq!(router.current().path, "/");
    }

    #[test]
    fn test_custom_hook_replaces_default() {
        let mut router = editor_router();
        router.before_each(|_, _| NavigationDecision::Proceed);

        let nav = router
            .push(NavigationTarget::Name("filters"), &empty_image())
            .unwrap();
        assert_eq!(nav.route.path, "/filters");
    }

    #[test]
    fn test_without_hook_everything_proceeds() {
        let mut router = Router::new(RouteTable::default_routes().unwrap());
        let nav = router
            .push(NavigationTarget::Path("/crop"), &empty_image())
            .unwrap();
        assert!(!nav.redirected());
    }

    #[test]
    fn test_failed_back_keeps_history_in_place() {
        let mut router = editor_router();
        let mut image = empty_image();
        image.set_image_file(Some(ImageFile::fixture("a.png")));
        router.push(NavigationTarget::Path("/crop"), &image).unwrap();

        router.before_each(|to, _| {
            if to.name == RouteName::HOME {
                NavigationDecision::Redirect(RouteName::CROP)
            } else {
                NavigationDecision::Redirect(RouteName::HOME)
            }
        });

        assert!(matches!(router.back(&image), Err(Error::RedirectLoop(_))));
        assert_eq!(router.current().path, "/crop");
        assert!(router.can_go_back());
    }

    #[test]
    fn test_failed_forward_keeps_history_in_place() {
        let mut router = editor_router();
        let mut image = empty_image();
        image.set_image_file(Some(ImageFile::fixture("a.png")));
        router.push(NavigationTarget::Path("/crop"), &image).unwrap();
        router.back(&image).unwrap();

        // Home is left alone, crop and filters bounce between each other
        router.before_each(|to, _| match to.name {
            RouteName::CROP => NavigationDecision::Redirect(RouteName::FILTERS),
            RouteName::FILTERS => NavigationDecision::Redirect(RouteName::CROP),
            _ => NavigationDecision::Proceed,
        });

        assert!(matches!(router.forward(&image), Err(Error::RedirectLoop(_))));
        assert_eq!(router.current().path, "/");
        assert!(router.can_go_forward());
    }

    #[test]
    fn test_redirect_loop_is_detected() {
        let mut router = editor_router();
        router.before_each(|to, _| {
            if to.name == RouteName::HOME {
                NavigationDecision::Redirect(RouteName::CROP)
            } else {
                NavigationDecision::Redirect(RouteName::HOME)
            }
        });

        let result = router.push(NavigationTarget::Path("/filters"), &empty_image());
        assert!(matches!(result, Err(Error::RedirectLoop(name)) if name == "filters"));
    }
}
