//! Screen stack for the three storefront destinations.

use core::fmt;

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Browse screen with the reveal animation.
    Home,
    Cart,
    Profile,
}

impl Route {
    /// Destinations offered by the home screen header, in display order.
    pub const HEADER_ACTIONS: [Self; 2] = [Self::Cart, Self::Profile];

    /// Screen heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "ShopEasy",
            Self::Cart => "Shopping Cart",
            Self::Profile => "Profile",
        }
    }

    /// Short label for header buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Cart => "Cart",
            Self::Profile => "Profile",
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::Cart => "🛒",
            Self::Profile => "👤",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Home => "home",
            Self::Cart => "cart",
            Self::Profile => "profile",
        })
    }
}

/// Stack of visited screens, rooted at [`Route::Home`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    /// Push `route`. Navigating to the current screen does nothing.
    pub fn navigate_to(&mut self, route: Route) {
        if self.current() != route {
            tracing::debug!(from = %self.current(), to = %route, "Navigate");
            self.stack.push(route);
        }
    }

    /// Whether there is a screen to go back to.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Pop back to the previous screen. Returns `false` at the root.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        let left = self.stack.pop();
        tracing::debug!(from = ?left, to = %self.current(), "Go back");
        true
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
