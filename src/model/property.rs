use crate::foundation::core::{Frame, Point, Point3D};

wire_enum! {
    /// How a keyframe moves from its start value to its end value.
    pub enum KeyframeInterpolation {
        None = 0,
        Linear = 1,
        Bezier = 2,
        Hold = 3,
    }
    default = Hold;
}

/// One segment of an animated property, spanning `start_time..end_time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub start_value: T,
    pub end_value: T,
    pub start_time: Frame,
    pub end_time: Frame,
    #[serde(default)]
    pub interpolation: KeyframeInterpolation,
    /// Bezier easing handles, one per value dimension. Only meaningful for `Bezier` keyframes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bezier_out: Vec<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bezier_in: Vec<Point>,
    /// Spatial tangents of point-valued keyframes; zero means none.
    #[serde(default)]
    pub spatial_out: Point3D,
    #[serde(default)]
    pub spatial_in: Point3D,
}

impl<T: Clone> Keyframe<T> {
    /// A linear segment without easing handles or tangents.
    pub fn linear(start_value: T, end_value: T, start_time: Frame, end_time: Frame) -> Self {
        Self {
            start_value,
            end_value,
            start_time,
            end_time,
            interpolation: KeyframeInterpolation::Linear,
            bezier_out: Vec::new(),
            bezier_in: Vec::new(),
            spatial_out: Point3D::ZERO,
            spatial_in: Point3D::ZERO,
        }
    }

    /// A segment that holds `start_value` until `end_time`.
    pub fn hold(start_value: T, end_value: T, start_time: Frame, end_time: Frame) -> Self {
        Self {
            interpolation: KeyframeInterpolation::Hold,
            ..Self::linear(start_value, end_value, start_time, end_time)
        }
    }

    pub fn has_spatial(&self) -> bool {
        self.spatial_out != Point3D::ZERO || self.spatial_in != Point3D::ZERO
    }
}

/// A value that is either constant or animated over time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property<T> {
    Value(T),
    Animated(Vec<Keyframe<T>>),
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Property::Value(T::default())
    }
}

impl<T> Property<T> {
    pub fn is_animatable(&self) -> bool {
        matches!(self, Property::Animated(_))
    }

    /// The constant value, if the property is not animated.
    pub fn constant(&self) -> Option<&T> {
        match self {
            Property::Value(v) => Some(v),
            Property::Animated(_) => None,
        }
    }

    /// Value at the first frame of the property's timeline.
    pub fn value_at_start(&self) -> Option<&T> {
        match self {
            Property::Value(v) => Some(v),
            Property::Animated(keyframes) => keyframes.first().map(|k| &k.start_value),
        }
    }

    /// Convert every value, keeping timing and easing.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Property<U> {
        match self {
            Property::Value(v) => Property::Value(f(v)),
            Property::Animated(keyframes) => Property::Animated(
                keyframes
                    .iter()
                    .map(|k| Keyframe {
                        start_value: f(&k.start_value),
                        end_value: f(&k.end_value),
                        start_time: k.start_time,
                        end_time: k.end_time,
                        interpolation: k.interpolation,
                        bezier_out: k.bezier_out.clone(),
                        bezier_in: k.bezier_in.clone(),
                        spatial_out: k.spatial_out,
                        spatial_in: k.spatial_in,
                    })
                    .collect(),
            ),
        }
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        match self {
            Property::Value(_) => &[],
            Property::Animated(keyframes) => keyframes,
        }
    }
}

impl<T: PartialEq> Property<T> {
    /// True when the property is static and equal to `value`.
    pub fn is_constant(&self, value: &T) -> bool {
        self.constant() == Some(value)
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Property::Value(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/property.rs"]
mod tests;
