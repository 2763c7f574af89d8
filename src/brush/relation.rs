use crate::{brush::Brush, plane::Plane, polygon::Polygon};

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

/// Where a polygon sits relative to a brush.
///
/// # Variants
/// * `Inside` - Strictly interior to the brush
/// * `Aligned` - On a boundary face, normal agreeing with that face
/// * `ReverseAligned` - On a boundary face, normal opposing that face
/// * `Outside` - Strictly exterior to the brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonCategory {
    Inside = 0,
    Aligned = 1,
    ReverseAligned = 2,
    Outside = 3,
}

/// Whether two brushes share interior volume.
///
/// Brushes that merely touch along a face, edge or corner do not overlap:
/// the test treats a plane with every opposing corner in front of or on it
/// as separating.
pub fn brushes_overlap(a: &Brush, b: &Brush) -> bool {
    !has_separating_plane(&a.planes, b) && !has_separating_plane(&b.planes, a)
}

fn has_separating_plane(planes: &[Plane], other: &Brush) -> bool {
    planes.iter().any(|plane| {
        other
            .corner_points()
            .all(|corner| plane.signed_distance(corner) >= -Plane::EPSILON)
    })
}

/// Classifies a point against a brush's plane set.
///
/// `polygon_normal` is the normal of the polygon the point was taken from;
/// it decides between `Aligned` and `ReverseAligned` when the point lies on
/// a face.
pub fn categorize_point(point: DVec3, planes: &[Plane], polygon_normal: DVec3) -> PolygonCategory {
    let mut boundary: Option<&Plane> = None;
    for plane in planes {
        let d = plane.signed_distance(point);
        if d > Plane::EPSILON {
            return PolygonCategory::Outside;
        }
        if d >= -Plane::EPSILON && boundary.is_none() {
            boundary = Some(plane);
        }
    }
    match boundary {
        Some(face) => {
            if polygon_normal.dot(face.normal) > 0.0 {
                PolygonCategory::Aligned
            } else {
                PolygonCategory::ReverseAligned
            }
        }
        None => PolygonCategory::Inside,
    }
}

/// Classifies a polygon against a brush's plane set by its centroid.
///
/// The centroid is used rather than any single vertex: a vertex can land
/// exactly on another brush's edge or corner and classify ambiguously. The
/// polygon must already have been split so it spans none of `planes`.
pub fn categorize_polygon(polygon: &Polygon, planes: &[Plane]) -> PolygonCategory {
    categorize_point(polygon.centroid(), planes, polygon.plane.normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::primitives::{cuboid, CuboidDimensions};
    use crate::brush::BooleanOp;
    use crate::polygon::Vertex;

    #[cfg(feature = "bevy")]
    use bevy::math::DVec3;

    #[cfg(not(feature = "bevy"))]
    use glam::DVec3;

    fn cube_at(center: DVec3, size: f64) -> Brush {
        let planes = cuboid(
            center,
            &CuboidDimensions {
                width: size,
                height: size,
                depth: size,
            },
        );
        Brush::from_planes(planes, BooleanOp::Union, 0, 0).unwrap()
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = cube_at(DVec3::ZERO, 1.0);
        let b = cube_at(DVec3::new(3.0, 0.0, 0.0), 1.0);
        assert!(!brushes_overlap(&a, &b));
        assert!(!brushes_overlap(&b, &a));
    }

    #[test]
    fn test_overlap_intersecting() {
        let a = cube_at(DVec3::ZERO, 1.0);
        let b = cube_at(DVec3::new(0.5, 0.5, 0.0), 1.0);
        assert!(brushes_overlap(&a, &b));
        assert!(brushes_overlap(&b, &a));
    }

    #[test]
    fn test_overlap_touching_is_false() {
        let a = cube_at(DVec3::ZERO, 1.0);
        let face_touch = cube_at(DVec3::new(1.0, 0.0, 0.0), 1.0);
        let edge_touch = cube_at(DVec3::new(1.0, 1.0, 0.0), 1.0);
        let corner_touch = cube_at(DVec3::new(1.0, 1.0, 1.0), 1.0);
        assert!(!brushes_overlap(&a, &face_touch));
        assert!(!brushes_overlap(&a, &edge_touch));
        assert!(!brushes_overlap(&a, &corner_touch));
    }

    #[test]
    fn test_overlap_coincident_is_true() {
        let a = cube_at(DVec3::ZERO, 1.0);
        let b = cube_at(DVec3::ZERO, 1.0);
        assert!(brushes_overlap(&a, &b));
    }

    #[test]
    fn test_overlap_contained_is_true() {
        let outer = cube_at(DVec3::ZERO, 2.0);
        let inner = cube_at(DVec3::ZERO, 0.5);
        assert!(brushes_overlap(&outer, &inner));
        assert!(brushes_overlap(&inner, &outer));
    }

    #[test]
    fn test_categorize_point() {
        let cube = cube_at(DVec3::ZERO, 1.0);

        assert_eq!(
            categorize_point(DVec3::ZERO, &cube.planes, DVec3::Y),
            PolygonCategory::Inside
        );
        assert_eq!(
            categorize_point(DVec3::new(2.0, 0.0, 0.0), &cube.planes, DVec3::Y),
            PolygonCategory::Outside
        );
        assert_eq!(
            categorize_point(DVec3::new(0.0, 0.5, 0.0), &cube.planes, DVec3::Y),
            PolygonCategory::Aligned
        );
        assert_eq!(
            categorize_point(DVec3::new(0.0, 0.5, 0.0), &cube.planes, -DVec3::Y),
            PolygonCategory::ReverseAligned
        );
    }

    #[test]
    fn test_categorize_polygon_uses_centroid() {
        let cube = cube_at(DVec3::ZERO, 1.0);

        // A polygon whose corners touch the cube's faces but whose centroid
        // is strictly interior.
        let polygon = Polygon::new(
            vec![
                Vertex::new(DVec3::new(-0.5, 0.0, 0.0), DVec3::Z),
                Vertex::new(DVec3::new(0.0, -0.5, 0.0), DVec3::Z),
                Vertex::new(DVec3::new(0.5, 0.0, 0.0), DVec3::Z),
                Vertex::new(DVec3::new(0.0, 0.5, 0.0), DVec3::Z),
            ],
            0,
        )
        .unwrap();
        assert_eq!(
            categorize_polygon(&polygon, &cube.planes),
            PolygonCategory::Inside
        );
    }

    #[test]
    fn test_categorize_polygon_on_face() {
        let cube = cube_at(DVec3::ZERO, 1.0);
        let polygon = Polygon::new(
            vec![
                Vertex::new(DVec3::new(-0.2, 0.5, -0.2), -DVec3::Y),
                Vertex::new(DVec3::new(0.2, 0.5, -0.2), -DVec3::Y),
                Vertex::new(DVec3::new(0.2, 0.5, 0.2), -DVec3::Y),
            ],
            0,
        )
        .unwrap();
        // The polygon's winding faces away from the cube's +Y face.
        assert_eq!(
            categorize_polygon(&polygon, &cube.planes),
            PolygonCategory::ReverseAligned
        );

        let mut flipped = polygon.clone();
        flipped.flip();
        assert_eq!(
            categorize_polygon(&flipped, &cube.planes),
            PolygonCategory::Aligned
        );
    }
}
