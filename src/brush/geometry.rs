use std::cmp::Ordering;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::{
    plane::Plane,
    polygon::{Polygon, Vertex},
};

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

/// Acceptance tolerance for "corner lies inside or on every plane". Larger
/// than [`Plane::EPSILON`] so that corners shared by several faces are kept.
pub const INSIDE_EPSILON: f64 = 1e-4;

/// Triples of planes with a smaller determinant than this do not meet in a
/// usable point.
pub const DETERMINANT_EPSILON: f64 = 1e-10;

/// Squared distance under which two corners of a face are merged.
const MERGE_DISTANCE_SQUARED: f64 = 1e-8;

/// Builds the boundary faces of the convex solid bounded by `planes`.
///
/// Corners are enumerated as three-plane intersections, kept when they lie
/// inside or on every plane, bucketed per generating plane, wound into rings
/// and emitted as polygons. Planes that end up with fewer than three distinct
/// corners, and faces below the area cutoff, contribute nothing.
pub fn faces_from_planes(planes: &[Plane], material: usize) -> Vec<Polygon> {
    let mut buckets: FxHashMap<Plane, Vec<DVec3>> = FxHashMap::default();

    for (p1, p2, p3) in planes.iter().tuple_combinations() {
        let Some(point) = threeway_intersection(p1, p2, p3) else {
            continue;
        };
        if planes
            .iter()
            .any(|plane| plane.signed_distance(point) > INSIDE_EPSILON)
        {
            continue;
        }
        for plane in [p1, p2, p3] {
            let corners = buckets.entry(*plane).or_default();
            if !corners
                .iter()
                .any(|&corner| (corner - point).length_squared() < MERGE_DISTANCE_SQUARED)
            {
                corners.push(point);
            }
        }
    }

    let mut faces = Vec::new();
    for (plane, corners) in buckets {
        if let Some(face) = wind_face(plane, corners, material) {
            faces.push(face);
        }
    }
    faces
}

/// Finds the intersection point of three planes, if they meet in one.
pub fn threeway_intersection(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<DVec3> {
    let n1 = p1.normal;
    let n2 = p2.normal;
    let n3 = p3.normal;

    let det = n1.dot(n2.cross(n3));
    if det.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let point = (n2.cross(n3) * p1.distance_from_origin
        + n3.cross(n1) * p2.distance_from_origin
        + n1.cross(n2) * p3.distance_from_origin)
        / det;

    point.is_finite().then_some(point)
}

/// Sorts a face's corners into a counter-clockwise ring around the plane
/// normal and builds the polygon.
fn wind_face(plane: Plane, mut corners: Vec<DVec3>, material: usize) -> Option<Polygon> {
    if corners.len() < 3 {
        return None;
    }

    let centroid = corners.iter().fold(DVec3::ZERO, |acc, &p| acc + p) / corners.len() as f64;
    let normal = plane.normal;

    let up = if normal.y.abs() >= 0.9 { DVec3::X } else { DVec3::Y };
    let tangent = normal.cross(up).normalize();
    let bitangent = normal.cross(tangent);

    corners.sort_by(|a, b| {
        let da = *a - centroid;
        let db = *b - centroid;
        let angle_a = da.dot(bitangent).atan2(da.dot(tangent));
        let angle_b = db.dot(bitangent).atan2(db.dot(tangent));
        angle_a.partial_cmp(&angle_b).unwrap_or(Ordering::Equal)
    });

    // The sort should already wind counter-clockwise around the normal;
    // verify with the first triangle and reverse if not.
    let winding = (corners[1] - corners[0])
        .cross(corners[2] - corners[0])
        .dot(normal);
    if winding < 0.0 {
        corners.reverse();
    }

    let vertices = corners
        .into_iter()
        .map(|corner| Vertex::new(corner, normal))
        .collect();
    let face = Polygon::from_plane(plane, vertices, material);
    (!face.is_degenerate()).then_some(face)
}
