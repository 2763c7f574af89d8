use crate::plane::Plane;

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

/// Extents of a cuboid or wedge.
///
/// # Fields
/// * `width` - Extent along the x-axis
/// * `height` - Extent along the y-axis
/// * `depth` - Extent along the z-axis
#[derive(Debug, Clone, Copy)]
pub struct CuboidDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CylinderDimensions {
    pub radius: f64,
    pub height: f64,
}

/// Extents of an arch: a half-ring in the xy-plane extruded along z.
#[derive(Debug, Clone, Copy)]
pub struct ArchDimensions {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub depth: f64,
}

/// Six planes of an axis-aligned cuboid centered at `origin`.
pub fn cuboid(origin: DVec3, dimensions: &CuboidDimensions) -> Vec<Plane> {
    let half_width = dimensions.width / 2.0;
    let half_height = dimensions.height / 2.0;
    let half_depth = dimensions.depth / 2.0;

    vec![
        Plane::new(DVec3::Z, origin.z + half_depth),
        Plane::new(-DVec3::Z, -(origin.z - half_depth)),
        Plane::new(DVec3::Y, origin.y + half_height),
        Plane::new(-DVec3::Y, -(origin.y - half_height)),
        Plane::new(DVec3::X, origin.x + half_width),
        Plane::new(-DVec3::X, -(origin.x - half_width)),
    ]
}

/// Five planes of a wedge: a cuboid whose top face is replaced by a slope
/// running from the top-back edge down to the bottom-front edge.
pub fn wedge(origin: DVec3, dimensions: &CuboidDimensions) -> Vec<Plane> {
    let half_width = dimensions.width / 2.0;
    let half_height = dimensions.height / 2.0;
    let half_depth = dimensions.depth / 2.0;

    let slope_normal = DVec3::new(0.0, dimensions.depth, dimensions.height).normalize();
    let top_back = origin + DVec3::new(0.0, half_height, -half_depth);

    vec![
        Plane::new(-DVec3::Z, -(origin.z - half_depth)),
        Plane::new(-DVec3::Y, -(origin.y - half_height)),
        Plane::new(DVec3::X, origin.x + half_width),
        Plane::new(-DVec3::X, -(origin.x - half_width)),
        Plane::new(slope_normal, slope_normal.dot(top_back)),
    ]
}

/// Planes of a y-axis cylinder: two caps plus `slices` side planes tangent
/// to the radius. `slices` is clamped to at least 3.
pub fn cylinder(origin: DVec3, dimensions: &CylinderDimensions, slices: u32) -> Vec<Plane> {
    let slices = slices.max(3);
    let half_height = dimensions.height / 2.0;

    let mut planes = Vec::with_capacity(slices as usize + 2);
    planes.push(Plane::new(DVec3::Y, origin.y + half_height));
    planes.push(Plane::new(-DVec3::Y, -(origin.y - half_height)));

    let angle_step = 2.0 * std::f64::consts::PI / slices as f64;
    for i in 0..slices {
        let angle = angle_step * i as f64;
        let normal = DVec3::new(angle.cos(), 0.0, angle.sin());
        let distance = normal.dot(origin) + dimensions.radius;
        planes.push(Plane::new(normal, distance));
    }

    planes
}

/// Planes circumscribing a sphere on a latitude-by-longitude subdivision:
/// one tangent plane per grid direction plus the two polar planes. `stacks`
/// is clamped to at least 2 and `slices` to at least 3.
pub fn sphere(origin: DVec3, radius: f64, stacks: u32, slices: u32) -> Vec<Plane> {
    let stacks = stacks.max(2);
    let slices = slices.max(3);

    let mut planes = Vec::with_capacity(((stacks - 1) * slices) as usize + 2);
    planes.push(Plane::new(DVec3::Y, origin.y + radius));
    planes.push(Plane::new(-DVec3::Y, -origin.y + radius));

    for stack in 1..stacks {
        let phi = std::f64::consts::PI * stack as f64 / stacks as f64;
        for slice in 0..slices {
            let theta = 2.0 * std::f64::consts::PI * slice as f64 / slices as f64;
            let normal = DVec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            planes.push(Plane::new(normal, normal.dot(origin) + radius));
        }
    }

    planes
}

/// Plane sets for an arch spanning the half-circle above the x-axis.
///
/// An arch is not convex, so it cannot be a single brush; each returned
/// plane set is one convex prism segment of the half-ring. `segments` is
/// clamped to at least 2 (a single segment has a degenerate cross-section).
pub fn arch(origin: DVec3, dimensions: &ArchDimensions, segments: u32) -> Vec<Vec<Plane>> {
    let segments = segments.max(2);
    let half_depth = dimensions.depth / 2.0;
    let step = std::f64::consts::PI / segments as f64;

    let ring_point = |radius: f64, angle: f64| DVec3::new(angle.cos(), angle.sin(), 0.0) * radius;

    let mut brushes = Vec::with_capacity(segments as usize);
    for segment in 0..segments {
        let start = step * segment as f64;
        let end = start + step;

        // Cross-section corners, counter-clockwise in the xy-plane.
        let quad = [
            ring_point(dimensions.inner_radius, start),
            ring_point(dimensions.outer_radius, start),
            ring_point(dimensions.outer_radius, end),
            ring_point(dimensions.inner_radius, end),
        ];

        let mut planes = Vec::with_capacity(6);
        planes.push(Plane::new(DVec3::Z, origin.z + half_depth));
        planes.push(Plane::new(-DVec3::Z, -(origin.z - half_depth)));

        for i in 0..4 {
            let p = quad[i];
            let q = quad[(i + 1) % 4];
            let edge = q - p;
            // Outward normal of a counter-clockwise edge.
            let normal = DVec3::new(edge.y, -edge.x, 0.0).normalize();
            planes.push(Plane::new(normal, normal.dot(origin + p)));
        }

        brushes.push(planes);
    }

    brushes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{geometry::faces_from_planes, BooleanOp, Brush};
    use approx::assert_relative_eq;

    #[cfg(feature = "bevy")]
    use bevy::math::DVec3;

    #[cfg(not(feature = "bevy"))]
    use glam::DVec3;

    fn assert_unit_normals(planes: &[Plane]) {
        for plane in planes {
            assert_relative_eq!(plane.normal.length(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cuboid_planes() {
        let planes = cuboid(
            DVec3::new(1.0, 2.0, 3.0),
            &CuboidDimensions {
                width: 2.0,
                height: 4.0,
                depth: 6.0,
            },
        );
        assert_eq!(planes.len(), 6);
        assert_unit_normals(&planes);

        let brush = Brush::from_planes(planes, BooleanOp::Union, 0, 0).unwrap();
        assert_eq!(brush.faces.len(), 6);
        let total: f64 = brush.faces.iter().map(|f| f.area()).sum();
        assert_relative_eq!(total, 2.0 * (2.0 * 4.0 + 2.0 * 6.0 + 4.0 * 6.0), epsilon = 1e-6);
    }

    #[test]
    fn test_cylinder_planes() {
        let planes = cylinder(
            DVec3::ZERO,
            &CylinderDimensions {
                radius: 1.0,
                height: 2.0,
            },
            8,
        );
        assert_eq!(planes.len(), 10);
        assert_unit_normals(&planes);
        let faces = faces_from_planes(&planes, 0);
        assert_eq!(faces.len(), 10);
    }

    #[test]
    fn test_cylinder_slices_clamped() {
        let planes = cylinder(
            DVec3::ZERO,
            &CylinderDimensions {
                radius: 1.0,
                height: 1.0,
            },
            1,
        );
        assert_eq!(planes.len(), 5);
    }

    #[test]
    fn test_sphere_planes() {
        let planes = sphere(DVec3::ZERO, 1.0, 3, 6);
        assert_eq!(planes.len(), (3 - 1) * 6 + 2);
        assert_unit_normals(&planes);

        // Every plane is tangent to the sphere.
        for plane in &planes {
            assert_relative_eq!(plane.signed_distance(DVec3::ZERO), -1.0, epsilon = 1e-9);
        }
        let faces = faces_from_planes(&planes, 0);
        assert_eq!(faces.len(), planes.len());
    }

    #[test]
    fn test_arch_segments() {
        let brushes = arch(
            DVec3::ZERO,
            &ArchDimensions {
                inner_radius: 1.0,
                outer_radius: 2.0,
                depth: 1.0,
            },
            4,
        );
        assert_eq!(brushes.len(), 4);
        for planes in &brushes {
            assert_eq!(planes.len(), 6);
            assert_unit_normals(planes);
            let faces = faces_from_planes(planes, 0);
            assert_eq!(faces.len(), 6);
        }
    }

    #[test]
    fn test_wedge_volume_is_half_cuboid() {
        let dims = CuboidDimensions {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        };
        let faces = faces_from_planes(&wedge(DVec3::ZERO, &dims), 0);
        // Bottom and back faces are full unit quads.
        let bottoms: Vec<_> = faces
            .iter()
            .filter(|f| f.plane.normal.dot(-DVec3::Y) > 0.99)
            .collect();
        assert_eq!(bottoms.len(), 1);
        assert_relative_eq!(bottoms[0].area(), 1.0, epsilon = 1e-9);
    }
}
