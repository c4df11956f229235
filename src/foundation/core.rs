pub use kurbo::{BezPath, PathEl};

/// Identifier of a layer, composition or image asset, unique within its table.
pub type Id = u32;

/// Time measured in composition frames. Layer start times may be negative.
pub type Frame = i64;

/// Opacity in `0..=255`.
pub type Opacity = u8;

/// Fully opaque.
pub const OPAQUE: Opacity = 255;

/// Vector path payload carried by masks, shape paths and text paths.
///
/// The codec treats it as opaque geometry: it is stored and restored, never interpreted.
pub type PathData = BezPath;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Straight (non-premultiplied) RGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// A rational number, used for layer time stretch.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Ratio {
    pub numerator: i32,
    pub denominator: u32,
}

impl Ratio {
    pub const ONE: Ratio = Ratio {
        numerator: 1,
        denominator: 1,
    };

    pub fn value(self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ONE
    }
}

// Any ratio with a zero numerator is zero, whatever its denominator.
impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator
            && (self.numerator == 0 || self.denominator == other.denominator)
    }
}

wire_enum! {
    /// Layer and shape blending modes.
    pub enum BlendMode {
        Normal = 0,
        Multiply = 1,
        Screen = 2,
        Overlay = 3,
        Darken = 4,
        Lighten = 5,
        ColorDodge = 6,
        ColorBurn = 7,
        HardLight = 8,
        SoftLight = 9,
        Difference = 10,
        Exclusion = 11,
        Hue = 12,
        Saturation = 13,
        Color = 14,
        Luminosity = 15,
        Add = 16,
    }
    default = Normal;
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
