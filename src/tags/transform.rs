use crate::codec::attributes::{AttributeKind as K, BlockReader, BlockWriter};
use crate::codec::stream::{DecodeStream, EncodeStream};
use crate::codec::tag_code::TagCode;
use crate::foundation::core::{OPAQUE, Point, Point3D};
use crate::foundation::error::PagResult;
use crate::model::property::Property;
use crate::model::transform::{Transform2D, Transform3D};
use crate::tags::write_block;

const TRANSFORM_2D: &[K] = &[
    K::SpatialProperty,
    K::SpatialProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::MultiDimensionProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

const TRANSFORM_3D: &[K] = &[
    K::SpatialProperty,
    K::SpatialProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::MultiDimensionProperty,
    K::SpatialProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
    K::SimpleProperty,
];

pub(crate) fn read_transform_2d(stream: &mut DecodeStream<'_>) -> PagResult<Transform2D> {
    let mut r = BlockReader::new(stream, TRANSFORM_2D)?;
    let mut transform = Transform2D {
        anchor_point: r.property(Point::ZERO)?,
        position: Some(r.property(Point::ZERO)?),
        x_position: Some(r.property(0.0)?),
        y_position: Some(r.property(0.0)?),
        scale: r.property(Point::new(1.0, 1.0))?,
        rotation: r.property(0.0)?,
        opacity: r.property(OPAQUE)?,
    };
    transform.repair_position();
    Ok(transform)
}

pub(crate) fn write_transform_2d(stream: &mut EncodeStream, transform: &Transform2D) {
    let t = transform.canonical();
    let zero_point = Property::Value(Point::ZERO);
    let zero = Property::Value(0.0);
    let mut w = BlockWriter::new();
    w.property(K::SpatialProperty, &t.anchor_point, &Point::ZERO);
    w.property(
        K::SpatialProperty,
        t.position.as_ref().unwrap_or(&zero_point),
        &Point::ZERO,
    );
    w.property(K::SimpleProperty, t.x_position.as_ref().unwrap_or(&zero), &0.0);
    w.property(K::SimpleProperty, t.y_position.as_ref().unwrap_or(&zero), &0.0);
    w.property(K::MultiDimensionProperty, &t.scale, &Point::new(1.0, 1.0));
    w.property(K::SimpleProperty, &t.rotation, &0.0);
    w.property(K::SimpleProperty, &t.opacity, &OPAQUE);
    write_block(stream, TagCode::Transform2D, w);
}

pub(crate) fn read_transform_3d(stream: &mut DecodeStream<'_>) -> PagResult<Transform3D> {
    let mut r = BlockReader::new(stream, TRANSFORM_3D)?;
    let mut transform = Transform3D {
        anchor_point: r.property(Point3D::ZERO)?,
        position: Some(r.property(Point3D::ZERO)?),
        x_position: Some(r.property(0.0)?),
        y_position: Some(r.property(0.0)?),
        z_position: Some(r.property(0.0)?),
        scale: r.property(Point3D::new(1.0, 1.0, 1.0))?,
        orientation: r.property(Point3D::ZERO)?,
        x_rotation: r.property(0.0)?,
        y_rotation: r.property(0.0)?,
        z_rotation: r.property(0.0)?,
        opacity: r.property(OPAQUE)?,
    };
    transform.repair_position();
    Ok(transform)
}

pub(crate) fn write_transform_3d(stream: &mut EncodeStream, transform: &Transform3D) {
    let t = transform.canonical();
    let zero_point = Property::Value(Point3D::ZERO);
    let zero = Property::Value(0.0);
    let mut w = BlockWriter::new();
    w.property(K::SpatialProperty, &t.anchor_point, &Point3D::ZERO);
    w.property(
        K::SpatialProperty,
        t.position.as_ref().unwrap_or(&zero_point),
        &Point3D::ZERO,
    );
    w.property(K::SimpleProperty, t.x_position.as_ref().unwrap_or(&zero), &0.0);
    w.property(K::SimpleProperty, t.y_position.as_ref().unwrap_or(&zero), &0.0);
    w.property(K::SimpleProperty, t.z_position.as_ref().unwrap_or(&zero), &0.0);
    w.property(
        K::MultiDimensionProperty,
        &t.scale,
        &Point3D::new(1.0, 1.0, 1.0),
    );
    w.property(K::SpatialProperty, &t.orientation, &Point3D::ZERO);
    w.property(K::SimpleProperty, &t.x_rotation, &0.0);
    w.property(K::SimpleProperty, &t.y_rotation, &0.0);
    w.property(K::SimpleProperty, &t.z_rotation, &0.0);
    w.property(K::SimpleProperty, &t.opacity, &OPAQUE);
    write_block(stream, TagCode::Transform3D, w);
}

#[cfg(test)]
#[path = "../../tests/unit/tags/transform.rs"]
mod tests;
