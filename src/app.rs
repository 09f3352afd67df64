//! Terminal front end
//!
//! `App` owns the text inputs and the dispatcher and feeds key presses and
//! worker responses through the panel reducer.

mod app_events;
mod app_render;
mod app_state;

pub use app_state::App;
