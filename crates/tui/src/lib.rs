//! Interactive terminal front end for the `svcpick` service picker.
//!
//! The module exposes the [`Picker`] builder, which wires a
//! [`QueryService`](svcpick_core::QueryService) into an [`App`] and runs the
//! terminal event loop until the user confirms or cancels a selection.

mod actions;
mod app;
mod builder;
mod config;
pub mod input;
mod render;
mod runtime;
pub mod style;

pub use app::App;
pub use builder::Picker;
pub use config::UiLabels;
pub use input::QueryInput;
pub use style::{Theme, default_theme};
