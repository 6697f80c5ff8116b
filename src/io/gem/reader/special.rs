//! Parametric records: PV panels and trees

use super::segment::GemSegment;
use super::tokens::LineCursor;
use crate::entities::{GemMetadata, Shade, SpecialShadeKind};
use crate::error::{GemError, Result};
use crate::types::{AxisRotation, Face3D, Vector3};
use nom::bytes::complete::tag;
use nom::character::complete::{space0, space1, u32 as parse_u32};
use nom::combinator::all_consuming;
use nom::sequence::{delimited, preceded};
use nom::IResult;

/// Tree sizes in the file are divided by these factors (width, depth, height)
pub const TREE_SCALE: [f64; 3] = [3.0, 3.0, 8.0];

/// `2D Tree <n>`
fn tree_kind(input: &str) -> IResult<&str, u32> {
    all_consuming(delimited(
        space0,
        preceded(tag("2D Tree"), preceded(space1, parse_u32)),
        space0,
    ))(input)
}

fn expect_values(cursor: &mut LineCursor<'_>, count: usize, what: &str) -> Result<Vec<f64>> {
    let values = cursor.next_floats()?;
    if values.len() != count {
        return Err(cursor.error(format!(
            "{} record needs {} values, found {}",
            what,
            count,
            values.len()
        )));
    }
    Ok(values)
}

/// Tilt about X by `yz`, then turn about Z by `xy` (degrees), both about `origin`
fn orient(points: &[Vector3], origin: Vector3, xy: f64, yz: f64) -> Vec<Vector3> {
    let tilted = AxisRotation::about_x(yz.to_radians(), origin).apply_all(points);
    AxisRotation::about_z(xy.to_radians(), origin).apply_all(&tilted)
}

/// `x y z width height xy yz`: a rectangle from its lower-left corner.
///
/// The `xy` angle is a compass bearing, applied clockwise.
pub fn read_pv(segment: &GemSegment) -> Result<Shade> {
    let mut cursor = LineCursor::new(&segment.body, &segment.raw);
    let v = expect_values(&mut cursor, 7, "PV")?;
    let origin = Vector3::new(v[0], v[1], v[2]);
    let (width, height, xy, yz) = (v[3], v[4], v[5], v[6]);

    let rectangle = [
        origin,
        origin + Vector3::UNIT_X * width,
        origin + Vector3::UNIT_X * width + Vector3::UNIT_Y * height,
        origin + Vector3::UNIT_Y * height,
    ];
    let boundary = orient(&rectangle, origin, -xy, yz);

    Ok(Shade::new(segment.identifier.clone(), Face3D::new(boundary))
        .with_display_name(segment.display_name.clone())
        .with_metadata(
            GemMetadata::new()
                .with_group_id(segment.identifier.clone())
                .with_gem_type(SpecialShadeKind::Pv),
        ))
}

/// `2D Tree <n>` then `x y z sx sy sz xy yz`: two crossing billboards.
///
/// Only the second billboard (facing +Y before rotation) is written back;
/// the first is tagged import-only.
pub fn read_tree(segment: &GemSegment) -> Result<Vec<Shade>> {
    let mut cursor = LineCursor::new(&segment.body, &segment.raw);
    let kind_line = cursor.next_line()?;
    let tree_type = tree_kind(kind_line)
        .map(|(_, n)| n)
        .map_err(|_| GemError::UnsupportedTreeType {
            tree_type: kind_line.to_string(),
            segment: segment.raw.clone(),
        })?;

    let v = expect_values(&mut cursor, 8, "Tree")?;
    let base = Vector3::new(v[0], v[1], v[2]);
    let width_x = v[3] * TREE_SCALE[0];
    let width_y = v[4] * TREE_SCALE[1];
    let height = v[5] * TREE_SCALE[2];
    let (xy, yz) = (v[6], v[7]);

    let (hx, hy) = (width_x / 2.0, width_y / 2.0);
    let side = [
        Vector3::new(base.x, base.y - hy, base.z),
        Vector3::new(base.x, base.y + hy, base.z),
        Vector3::new(base.x, base.y + hy, base.z + height),
        Vector3::new(base.x, base.y - hy, base.z + height),
    ];
    let front = [
        Vector3::new(base.x - hx, base.y, base.z),
        Vector3::new(base.x - hx, base.y, base.z + height),
        Vector3::new(base.x + hx, base.y, base.z + height),
        Vector3::new(base.x + hx, base.y, base.z),
    ];

    let metadata = GemMetadata::new()
        .with_group_id(segment.identifier.clone())
        .with_gem_type(SpecialShadeKind::Tree)
        .with_tree_type(tree_type);
    let mut side_metadata = metadata.clone();
    side_metadata.import_only = true;

    let billboard = |index: usize, points: &[Vector3], metadata: GemMetadata| {
        Shade::new(
            format!("{}_{}", segment.identifier, index),
            Face3D::new(orient(points, base, xy, yz)),
        )
        .with_display_name(segment.display_name.clone())
        .with_metadata(metadata)
        .detached(true)
    };

    Ok(vec![
        billboard(0, &side, side_metadata),
        billboard(1, &front, metadata),
    ])
}
