//! In-memory scene graph produced by decoding and consumed by encoding.
//!
//! Everything is owned as a tree rooted at [`composition::File`]; cross references between
//! layers, compositions and image assets are plain ids.

pub mod composition;
pub mod effect;
pub mod layer;
pub mod marker;
pub mod mask;
pub mod property;
pub mod shape;
pub mod style;
pub mod text;
pub mod transform;
