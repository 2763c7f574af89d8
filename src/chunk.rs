//! Spatial chunking: evaluating a scene one grid cell at a time.
//!
//! Brushes are assigned to every cell their bounds touch, each cell's brush
//! list is evaluated on its own, and the cell's output is clipped to the
//! cell box. Output on a shared cell boundary is kept by exactly one of the
//! two adjacent cells. Cells should be sized so that brushes which interact
//! (overlap, or an intersect brush and everything it masks) share a cell;
//! brushes split across cells without their partners are evaluated as if
//! the partners were absent.

use rustc_hash::FxHashMap;

use crate::{brush::Brush, evaluate, plane::Plane, polygon::Polygon};

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

type Cell = (i64, i64, i64);

/// Evaluates `brushes` per grid cell of edge length `cell_size` and returns
/// the combined surface. Equivalent to [`evaluate::process`] when every
/// interacting group of brushes fits in a cell, with output clipped into
/// per-cell fragments.
pub fn process_chunked(brushes: &[Brush], cell_size: f64) -> Vec<Polygon> {
    if brushes.is_empty() || !(cell_size > 0.0) || !cell_size.is_finite() {
        return evaluate::process(brushes);
    }

    let mut cells: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
    let mut unplaceable: Vec<usize> = Vec::new();

    for (index, brush) in brushes.iter().enumerate() {
        let aabb = brush.aabb();
        if !aabb.is_valid() {
            // A brush with no faces has no bounds; it still affects the
            // chain everywhere, so it joins every cell.
            unplaceable.push(index);
            continue;
        }
        let min = cell_of(aabb.min, cell_size);
        let max = cell_of(aabb.max, cell_size);
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                for z in min.2..=max.2 {
                    cells.entry((x, y, z)).or_default().push(index);
                }
            }
        }
    }

    for members in cells.values_mut() {
        members.extend(unplaceable.iter().copied());
        members.sort_unstable();
    }

    let mut output = Vec::new();
    for (cell, members) in cells {
        let chunk: Vec<Brush> = members.iter().map(|&i| brushes[i].clone()).collect();
        let polygons = evaluate::process(&chunk);
        clip_to_cell(polygons, cell, cell_size, &mut output);
    }
    output
}

fn cell_of(point: DVec3, cell_size: f64) -> Cell {
    (
        (point.x / cell_size).floor() as i64,
        (point.y / cell_size).floor() as i64,
        (point.z / cell_size).floor() as i64,
    )
}

/// Clips polygons to a cell box. Pieces coplanar with a cell face are kept
/// only on the max-side planes, so two adjacent cells never both emit the
/// same boundary piece.
fn clip_to_cell(polygons: Vec<Polygon>, cell: Cell, cell_size: f64, output: &mut Vec<Polygon>) {
    let min = DVec3::new(cell.0 as f64, cell.1 as f64, cell.2 as f64) * cell_size;
    let max = min + DVec3::splat(cell_size);

    let planes = [
        (Plane::new(DVec3::X, max.x), true),
        (Plane::new(DVec3::Y, max.y), true),
        (Plane::new(DVec3::Z, max.z), true),
        (Plane::new(-DVec3::X, -min.x), false),
        (Plane::new(-DVec3::Y, -min.y), false),
        (Plane::new(-DVec3::Z, -min.z), false),
    ];

    let mut survivors = polygons;
    for (plane, keep_coplanar) in planes {
        let mut next = Vec::with_capacity(survivors.len());
        for polygon in &survivors {
            let split = plane.split_polygon(polygon);
            if let Some(back) = split.back {
                next.push(back);
            }
            if keep_coplanar {
                next.extend(split.coplanar_front);
                next.extend(split.coplanar_back);
            }
        }
        survivors = next;
    }

    output.extend(survivors.into_iter().filter(|p| !p.is_degenerate()));
}
