/// User interface module
///
/// Screens are chosen by the router; this module only renders them.
/// - Navigation bar and the home/crop/filters screens (pages.rs)

pub mod pages;
