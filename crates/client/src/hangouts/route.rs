//! View routes selected by the current hangout's state.

use std::fmt;

use webcom_shared::{Hangout, HangoutState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Hangouts,
    Configure,
    Hangout(HangoutState),
}

impl Route {
    /// Route for the selected hangout, or the list when nothing is selected.
    pub fn for_hangout(hangout: Option<&Hangout>) -> Self {
        match hangout {
            Some(h) => Route::Hangout(h.state),
            None => Route::Hangouts,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Hangouts => "/hangouts".to_string(),
            Route::Configure => "/configure".to_string(),
            Route::Hangout(state) => format!("/{}", state.as_str()),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/hangouts" => Some(Route::Hangouts),
            "/configure" => Some(Route::Configure),
            _ => path.strip_prefix('/')?.parse().ok().map(Route::Hangout),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_selected_hangout_state() {
        assert_eq!(Route::for_hangout(None).path(), "/hangouts");
        let blocked = Hangout::new("bob", "", HangoutState::Blocked);
        assert_eq!(Route::for_hangout(Some(&blocked)).path(), "/BLOCKED");
    }

    #[test]
    fn paths_parse_back() {
        for state in HangoutState::ALL {
            let route = Route::Hangout(state);
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::parse("/configure"), Some(Route::Configure));
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("INVITE"), None);
    }
}
