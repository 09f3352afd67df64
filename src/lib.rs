pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod panel;
pub mod scroll;
pub mod shuffle;
pub mod widgets;
