#![forbid(unsafe_code)]
//! Codec for the PAG layered animation format.
//!
//! [`decode`] turns a file into an owned [`File`] tree; [`encode`] writes one back, letting a
//! [`CompatibilityGate`] leave out tags an older player could not read. Tags this build does
//! not know are skipped on read, so newer files still load.

#[macro_use]
mod macros;

pub mod codec;
pub mod foundation;
pub mod model;
pub mod tags;

pub use codec::compat::{CompatibilityGate, EncodeOptions, GateConfig, GateMode};
pub use codec::tag_code::TagCode;
pub use foundation::core::{BlendMode, Color, Frame, Id, Opacity, PathData, Point, Point3D, Ratio};
pub use foundation::error::{PagError, PagResult};
pub use model::composition::{Composition, File, ImageAsset};
pub use model::layer::{Layer, LayerContent, LayerTransform, LayerType};
pub use model::property::{Keyframe, KeyframeInterpolation, Property};
pub use tags::file::{decode, encode, encode_with_options};
