//! Dynamic form engine
//!
//! Binds a store of named values to runtime-assembled field controllers,
//! validates them with pluggable rules and reports failures per field or in
//! one aggregated message. Drawing is left to a [`surface::SurfaceRenderer`];
//! modal choosers and alerts to a [`presenter::ModalPresenter`].

pub mod controller;
pub mod error;
pub mod form;
pub mod headless;
pub mod model;
pub mod prelude;
pub mod presenter;
pub mod surface;
pub mod validation;

pub use error::{FormError, FormResult};
