//! Search panel state
//!
//! The panel moves through `Mode`s: idle, showing results, the replace form,
//! the delete confirmation, and the two completion views. Transitions are
//! made by `reduce`, which also decides when a backend request goes out.

mod action;
mod panel_state;
mod reducer;

pub use action::Action;
pub use panel_state::{DELETE_ERROR, InFlight, Mode, PanelState, REPLACE_ERROR, SEARCH_ERROR};
pub use reducer::{Effect, Transition, reduce};
