//! Value model shared by every field of a form

mod image;
mod store;
mod value;

pub use image::*;
pub use store::*;
pub use value::*;
