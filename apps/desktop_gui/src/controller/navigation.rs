//! Screen routes and the push-only back stack.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Profile,
    EditProfile,
}

impl Route {
    /// Destinations reachable from the bottom navigation bar.
    pub const BOTTOM_NAV: [Route; 2] = [Route::Home, Route::Profile];

    pub fn as_str(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Profile => "profile",
            Route::EditProfile => "editProfile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Profile => "Profile",
            Route::EditProfile => "Edit Profile",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Home => "🏠",
            Route::Profile => "👤",
            Route::EditProfile => "✏",
        }
    }
}

#[derive(Debug, Clone)]
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
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = self.current().as_str(), to = route.as_str(), "navigate");
        self.stack.push(route);
    }

    /// Pops the current route and returns the one revealed, or `None` at the root.
    pub fn back(&mut self) -> Option<Route> {
        if !self.can_go_back() {
            return None;
        }
        self.stack.pop();
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }
}
