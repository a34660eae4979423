//! Mesh export formats.

pub mod obj;

pub use obj::{export_layers_obj, export_obj};
