use crate::foundation::core::{OPAQUE, Opacity, Point, Point3D};
use crate::model::property::Property;

/// A property carries information when it is animated or differs from `zero`.
fn carries<T: PartialEq>(property: Option<&Property<T>>, zero: &T) -> bool {
    property.is_some_and(|p| p.is_animatable() || !p.is_constant(zero))
}

fn static_axis(property: Option<&Property<f32>>) -> Option<f32> {
    match property {
        None => Some(0.0),
        Some(p) => p.constant().copied(),
    }
}

/// Layer transform in the composition plane.
///
/// Position is held either as one combined `position` or as separate `x_position` and
/// `y_position` properties, never both. Use [`Transform2D::canonical`] to normalize a
/// hand-built value into that shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform2D {
    pub anchor_point: Property<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Property<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_position: Option<Property<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_position: Option<Property<f32>>,
    pub scale: Property<Point>,
    /// Degrees, clockwise.
    pub rotation: Property<f32>,
    pub opacity: Property<Opacity>,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            anchor_point: Property::Value(Point::ZERO),
            position: Some(Property::Value(Point::ZERO)),
            x_position: None,
            y_position: None,
            scale: Property::Value(Point::new(1.0, 1.0)),
            rotation: Property::Value(0.0),
            opacity: Property::Value(OPAQUE),
        }
    }
}

impl Transform2D {
    /// Settle the position shape after decoding.
    ///
    /// A meaningful combined position wins; so does an all-default one. Only when the combined
    /// position is empty and at least one axis carries data are the separate axes kept.
    pub fn repair_position(&mut self) {
        let has_position = carries(self.position.as_ref(), &Point::ZERO);
        let has_x = carries(self.x_position.as_ref(), &0.0);
        let has_y = carries(self.y_position.as_ref(), &0.0);
        if has_position || (!has_x && !has_y) {
            self.position.get_or_insert(Property::Value(Point::ZERO));
            self.x_position = None;
            self.y_position = None;
        } else {
            self.position = None;
            self.x_position.get_or_insert(Property::Value(0.0));
            self.y_position.get_or_insert(Property::Value(0.0));
        }
    }

    /// The shape an encoder writes: combined unless an axis is animated on its own.
    pub fn canonical(&self) -> Self {
        let mut out = self.clone();
        out.repair_position();
        if out.position.is_none() {
            let x = static_axis(out.x_position.as_ref());
            let y = static_axis(out.y_position.as_ref());
            if let (Some(x), Some(y)) = (x, y) {
                out.position = Some(Property::Value(Point::new(x, y)));
                out.x_position = None;
                out.y_position = None;
            }
        }
        out
    }
}

/// Layer transform in 3D space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform3D {
    pub anchor_point: Property<Point3D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Property<Point3D>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_position: Option<Property<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_position: Option<Property<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_position: Option<Property<f32>>,
    pub scale: Property<Point3D>,
    pub orientation: Property<Point3D>,
    pub x_rotation: Property<f32>,
    pub y_rotation: Property<f32>,
    pub z_rotation: Property<f32>,
    pub opacity: Property<Opacity>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            anchor_point: Property::Value(Point3D::ZERO),
            position: Some(Property::Value(Point3D::ZERO)),
            x_position: None,
            y_position: None,
            z_position: None,
            scale: Property::Value(Point3D::new(1.0, 1.0, 1.0)),
            orientation: Property::Value(Point3D::ZERO),
            x_rotation: Property::Value(0.0),
            y_rotation: Property::Value(0.0),
            z_rotation: Property::Value(0.0),
            opacity: Property::Value(OPAQUE),
        }
    }
}

impl Transform3D {
    /// Same rule as [`Transform2D::repair_position`], over three axes.
    pub fn repair_position(&mut self) {
        let has_position = carries(self.position.as_ref(), &Point3D::ZERO);
        let has_axis = carries(self.x_position.as_ref(), &0.0)
            || carries(self.y_position.as_ref(), &0.0)
            || carries(self.z_position.as_ref(), &0.0);
        if has_position || !has_axis {
            self.position.get_or_insert(Property::Value(Point3D::ZERO));
            self.x_position = None;
            self.y_position = None;
            self.z_position = None;
        } else {
            self.position = None;
            self.x_position.get_or_insert(Property::Value(0.0));
            self.y_position.get_or_insert(Property::Value(0.0));
            self.z_position.get_or_insert(Property::Value(0.0));
        }
    }

    pub fn canonical(&self) -> Self {
        let mut out = self.clone();
        out.repair_position();
        if out.position.is_none() {
            let axes = (
                static_axis(out.x_position.as_ref()),
                static_axis(out.y_position.as_ref()),
                static_axis(out.z_position.as_ref()),
            );
            if let (Some(x), Some(y), Some(z)) = axes {
                out.position = Some(Property::Value(Point3D::new(x, y, z)));
                out.x_position = None;
                out.y_position = None;
                out.z_position = None;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/transform.rs"]
mod tests;
