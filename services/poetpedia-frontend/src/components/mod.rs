pub mod favorite_toggle;

pub use favorite_toggle::{
    toggle_button_appearance, Error, FavoriteToggle, ToggleOutcome, ToggleSelectors,
};
