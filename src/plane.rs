use std::{
    hash::{Hash, Hasher},
    ops::BitOr,
};

use crate::polygon::Polygon;

#[cfg(feature = "bevy")]
use bevy::math::{DVec2, DVec3};

#[cfg(not(feature = "bevy"))]
use glam::{DVec2, DVec3};

/// Which side of a plane a point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSide {
    Front,
    Back,
    OnPlane,
}

/// Aggregate classification of a polygon against a plane.
///
/// A polygon can lie on the plane, sit entirely in front of it, entirely
/// behind it, or span it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonSide {
    OnPlane = 0,
    Front = 1,
    Back = 2,
    Spanning = 3,
}

impl BitOr for PolygonSide {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self as u8) | (rhs as u8) {
            0 => PolygonSide::OnPlane,
            1 => PolygonSide::Front,
            2 => PolygonSide::Back,
            3 => PolygonSide::Spanning,
            _ => unreachable!(),
        }
    }
}

impl From<PointSide> for PolygonSide {
    fn from(side: PointSide) -> Self {
        match side {
            PointSide::OnPlane => PolygonSide::OnPlane,
            PointSide::Front => PolygonSide::Front,
            PointSide::Back => PolygonSide::Back,
        }
    }
}

/// The result of splitting a polygon with a plane.
///
/// The input is convex, so at most one polygon comes out on each side. A
/// polygon coplanar with the splitting plane lands in `coplanar_front` or
/// `coplanar_back` depending on whether its normal agrees with the plane's.
#[derive(Debug, Default)]
pub struct SplitPolygons {
    pub front: Option<Polygon>,
    pub back: Option<Polygon>,
    pub coplanar_front: Option<Polygon>,
    pub coplanar_back: Option<Polygon>,
}

impl SplitPolygons {
    /// All surviving pieces, in no particular order.
    pub fn into_pieces(self) -> impl Iterator<Item = Polygon> {
        [self.front, self.back, self.coplanar_front, self.coplanar_back]
            .into_iter()
            .flatten()
    }
}

/// An oriented plane in 3D space.
///
/// The plane is the set of points `p` with `normal · p = distance_from_origin`;
/// the *front* half-space is where `normal · p - distance_from_origin > 0`.
///
/// # Fields
/// * `normal` - The unit normal vector of the plane
/// * `distance_from_origin` - The distance from the origin along the normal
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Reflect))]
pub struct Plane {
    pub normal: DVec3,
    pub distance_from_origin: f64,
}

impl Hash for Plane {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.quantized_normal().hash(state);
        self.quantized_distance().hash(state);
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.quantized_normal() == other.quantized_normal()
            && self.quantized_distance() == other.quantized_distance()
    }
}

impl Eq for Plane {}

impl Plane {
    /// Distance tolerance for all point-vs-plane comparisons, in world units.
    /// Tuned for world scales in the range 1e-2 to 1e3.
    pub const EPSILON: f64 = 1e-5;

    const QUANTIZATION_FACTOR: f64 = 1_000_000.0;

    fn quantize(value: f64) -> i64 {
        (value * Self::QUANTIZATION_FACTOR).round() as i64
    }

    fn quantized_normal(&self) -> (i64, i64, i64) {
        (
            Self::quantize(self.normal.x),
            Self::quantize(self.normal.y),
            Self::quantize(self.normal.z),
        )
    }

    fn quantized_distance(&self) -> i64 {
        Self::quantize(self.distance_from_origin)
    }

    pub fn new(normal: DVec3, distance_from_origin: f64) -> Self {
        Self {
            normal: normal.normalize(),
            distance_from_origin,
        }
    }

    /// Creates a plane from three points, winding counter-clockwise when
    /// viewed from the front. Returns `None` for colinear or coincident
    /// inputs, which define no plane.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            normal,
            distance_from_origin: normal.dot(a),
        })
    }

    /// Signed distance from the plane to `point`; positive in front.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance_from_origin
    }

    pub fn classify_point(&self, point: DVec3) -> PointSide {
        let d = self.signed_distance(point);
        if d > Self::EPSILON {
            PointSide::Front
        } else if d < -Self::EPSILON {
            PointSide::Back
        } else {
            PointSide::OnPlane
        }
    }

    pub fn classify_polygon(&self, polygon: &Polygon) -> PolygonSide {
        let mut side = PolygonSide::OnPlane;
        for vertex in &polygon.vertices {
            side = side | PolygonSide::from(self.classify_point(vertex.pos));
        }
        side
    }

    /// Flips the plane by reversing the normal and distance.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.distance_from_origin = -self.distance_from_origin;
    }

    pub fn flipped(&self) -> Self {
        let mut plane = *self;
        plane.flip();
        plane
    }

    /// Splits a polygon into front, back and coplanar pieces.
    ///
    /// Pieces cut from a spanning polygon inherit the polygon's supporting
    /// plane and material; any piece left with fewer than three vertices is
    /// dropped.
    pub fn split_polygon(&self, polygon: &Polygon) -> SplitPolygons {
        let mut result = SplitPolygons::default();

        let mut polygon_side = PolygonSide::OnPlane;
        let mut sides = Vec::with_capacity(polygon.vertices.len());
        let mut distances = Vec::with_capacity(polygon.vertices.len());

        for vertex in &polygon.vertices {
            let side = self.classify_point(vertex.pos);
            polygon_side = polygon_side | PolygonSide::from(side);
            sides.push(side);
            distances.push(self.signed_distance(vertex.pos));
        }

        match polygon_side {
            PolygonSide::OnPlane => {
                if self.normal.dot(polygon.plane.normal) > 0.0 {
                    result.coplanar_front = Some(polygon.clone());
                } else {
                    result.coplanar_back = Some(polygon.clone());
                }
            }
            PolygonSide::Front => result.front = Some(polygon.clone()),
            PolygonSide::Back => result.back = Some(polygon.clone()),
            PolygonSide::Spanning => {
                let mut front = Vec::new();
                let mut back = Vec::new();

                for i in 0..polygon.vertices.len() {
                    let j = (i + 1) % polygon.vertices.len();
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if sides[i] != PointSide::Back {
                        front.push(vi.clone());
                    }
                    if sides[i] != PointSide::Front {
                        back.push(vi.clone());
                    }
                    let crossing = matches!(
                        (sides[i], sides[j]),
                        (PointSide::Front, PointSide::Back) | (PointSide::Back, PointSide::Front)
                    );
                    if crossing {
                        let t = (distances[i] / (distances[i] - distances[j])).clamp(0.0, 1.0);
                        let v = vi.lerp(vj, t);
                        front.push(v.clone());
                        back.push(v);
                    }
                }

                if front.len() >= 3 {
                    result.front =
                        Some(Polygon::from_plane(polygon.plane, front, polygon.material));
                }
                if back.len() >= 3 {
                    result.back = Some(Polygon::from_plane(polygon.plane, back, polygon.material));
                }
            }
        }

        result
    }

    /// Projects a point onto the plane's tangent axes.
    pub fn project_uv(&self, point: DVec3) -> DVec2 {
        let (u_axis, v_axis) = Self::uv_axes(&self.normal);
        let projected = point - self.normal * self.distance_from_origin;
        DVec2::new(projected.dot(u_axis), projected.dot(v_axis))
    }

    /// Computes tangent axes for the plane, anchored to the world axis most
    /// orthogonal to the normal.
    fn uv_axes(normal: &DVec3) -> (DVec3, DVec3) {
        let up = if normal.x.abs() < 0.9 {
            DVec3::X
        } else {
            DVec3::Y
        };
        let u_axis = up.cross(*normal).normalize();
        let v_axis = normal.cross(u_axis);
        (u_axis, v_axis)
    }
}
