//! Element ids and classes shared by the poem page and the favorite toggle.

pub const TOGGLE_BUTTON_ID: &str = "toggle-poem-button";
pub const POEM_TITLE_ID: &str = "poem-title";
pub const POEM_AUTHOR_ID: &str = "poem-author";
pub const POEM_LINES_ID: &str = "poem-lines";

/// Button data attribute holding the poem identifier.
pub const DATA_ID: &str = "data-id";
/// Button data attribute holding the current favorite state, "true" or "false".
pub const DATA_FAVORITE: &str = "data-favorite";

pub const FAVORITE_CLASS: &str = "btn-primary";
pub const NOT_FAVORITE_CLASS: &str = "btn-secondary";

/// Class carried by the toggle button for the given favorite state.
pub fn button_class(favorite: bool) -> &'static str {
    if favorite {
        FAVORITE_CLASS
    } else {
        NOT_FAVORITE_CLASS
    }
}
