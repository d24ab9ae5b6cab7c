/// Pre-navigation hooks

use super::routes::{Route, RouteName};
use crate::state::ImageState;

/// Outcome of a pre-navigation hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(RouteName),
}

/// A hook run before every navigation is committed
pub type Guard = Box<dyn Fn(&Route, &ImageState) -> NavigationDecision>;

/// Send image-only routes back home while no image is loaded
pub fn requires_image_guard(to: &Route, image: &ImageState) -> NavigationDecision {
    if to.meta.requires_image && image.image_url().is_empty() {
        NavigationDecision::Redirect(RouteName::HOME)
    } else {
        NavigationDecision::Proceed
    }
}
