//! CLI subcommands.

use shopeasy_storefront::navigation::Navigator;

pub mod cart;
pub mod home;
pub mod profile;

/// Heading line for the current screen, with a back affordance when the
/// screen was pushed over another one.
fn screen_heading(navigator: &Navigator) -> String {
    let title = navigator.current().title();
    if navigator.can_go_back() {
        format!("← Back  {title}")
    } else {
        title.to_string()
    }
}
