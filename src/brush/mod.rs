pub mod geometry;
pub mod primitives;
pub mod relation;

use thiserror::Error;

use crate::{broadphase::Aabb, plane::Plane, polygon::Polygon};

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

#[derive(Debug, Error)]
pub enum BrushError {
    #[error("a brush requires at least four planes, got {0}")]
    NotEnoughPlanes(usize),
    #[error("plane {0} has a non-finite normal or distance")]
    NonFinitePlane(usize),
}

/// A boolean operation a brush applies to the solid built by the brushes
/// before it in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// A brush
///
/// A convex solid defined as the intersection of oriented half-spaces, with
/// its boundary faces realised as polygons. Brushes are combined by chain
/// order through [`crate::evaluate::process`].
///
/// # Fields
/// * `planes` - The half-space planes bounding the solid, normals outward
/// * `faces` - One polygon per plane that contributes a boundary face
/// * `operation` - The boolean operation to perform
/// * `order` - Position in the evaluation chain
/// * `material` - The material index applied to the faces
#[derive(Debug, Clone)]
pub struct Brush {
    pub planes: Vec<Plane>,
    pub faces: Vec<Polygon>,
    pub operation: BooleanOp,
    pub order: i32,
    pub material: usize,
}

impl Brush {
    /// Builds a brush from its half-space planes, enumerating the face
    /// polygons. A plane set that bounds no volume yields a brush with no
    /// faces; such a brush still takes part in chain evaluation.
    pub fn from_planes(
        planes: Vec<Plane>,
        operation: BooleanOp,
        order: i32,
        material: usize,
    ) -> Result<Self, BrushError> {
        if planes.len() < 4 {
            return Err(BrushError::NotEnoughPlanes(planes.len()));
        }
        for (idx, plane) in planes.iter().enumerate() {
            if !plane.normal.is_finite() || !plane.distance_from_origin.is_finite() {
                return Err(BrushError::NonFinitePlane(idx));
            }
        }

        let faces = geometry::faces_from_planes(&planes, material);
        Ok(Self {
            planes,
            faces,
            operation,
            order,
            material,
        })
    }

    /// Builds a brush from already-constructed faces, e.g. faces transformed
    /// into world space by the caller. The planes must be the faces'
    /// supporting planes in the same space.
    pub fn from_parts(
        planes: Vec<Plane>,
        faces: Vec<Polygon>,
        operation: BooleanOp,
        order: i32,
        material: usize,
    ) -> Self {
        Self {
            planes,
            faces,
            operation,
            order,
            material,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from(self.faces.as_slice())
    }

    /// Positions of the brush's corners, visiting shared corners once per
    /// incident face.
    pub(crate) fn corner_points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.faces
            .iter()
            .flat_map(|face| face.vertices.iter().map(|vertex| vertex.pos))
    }
}
