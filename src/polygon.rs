use crate::plane::Plane;

#[cfg(feature = "bevy")]
use bevy::math::{DVec2, DVec3};

#[cfg(not(feature = "bevy"))]
use glam::{DVec2, DVec3};

/// A vertex of a polygon.
///
/// # Fields
/// * `pos` - The position of the vertex
/// * `normal` - The unit normal of the surface at the vertex
/// * `uv` - Texture coordinates; zeroed unless assigned by the caller
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: DVec3,
    pub normal: DVec3,
    pub uv: DVec2,
}

impl Vertex {
    pub fn new(pos: DVec3, normal: DVec3) -> Self {
        Self {
            pos,
            normal,
            uv: DVec2::ZERO,
        }
    }

    pub fn with_uv(pos: DVec3, normal: DVec3, uv: DVec2) -> Self {
        Self { pos, normal, uv }
    }

    /// Flips the vertex by reversing its normal.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linearly interpolates between two vertices, re-normalising the normal.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            pos: self.pos.lerp(other.pos, t),
            normal: self.normal.lerp(other.normal, t).normalize_or_zero(),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// A convex polygon in 3D space.
///
/// The vertices form a ring on the supporting plane, wound counter-clockwise
/// when viewed from the plane's front side.
///
/// # Fields
/// * `vertices` - The vertices of the polygon
/// * `material` - The material index of the polygon
/// * `plane` - The supporting plane of the polygon
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub material: usize,
    pub plane: Plane,
}

impl Polygon {
    /// Polygons with less area than this are degenerate and dropped.
    pub const AREA_EPSILON: f64 = 1e-6;

    /// Creates a polygon, deriving the supporting plane from the first three
    /// vertices. Returns `None` when fewer than three vertices are given or
    /// the leading vertices are colinear.
    pub fn new(vertices: Vec<Vertex>, material: usize) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos)?;
        Some(Self {
            vertices,
            material,
            plane,
        })
    }

    /// Creates a polygon on a known supporting plane.
    pub fn from_plane(plane: Plane, vertices: Vec<Vertex>, material: usize) -> Self {
        Self {
            vertices,
            material,
            plane,
        }
    }

    /// Flips the polygon by reversing the order of its vertices, flipping
    /// their normals and flipping the supporting plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
        self.plane.flip();
    }

    pub fn centroid(&self) -> DVec3 {
        let sum = self
            .vertices
            .iter()
            .fold(DVec3::ZERO, |acc, v| acc + v.pos);
        sum / self.vertices.len() as f64
    }

    /// Area of the polygon, computed as a fan from the first vertex.
    pub fn area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let origin = self.vertices[0].pos;
        let mut sum = DVec3::ZERO;
        for pair in self.vertices[1..].windows(2) {
            sum += (pair[0].pos - origin).cross(pair[1].pos - origin);
        }
        0.5 * sum.length()
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.area() < Self::AREA_EPSILON
    }

    /// Fan-triangulation indices, local to this polygon.
    pub fn indices(&self) -> Vec<u32> {
        let mut indices = Vec::new();
        let vertex_count = self.vertices.len() as u32;

        for i in 1..vertex_count.saturating_sub(1) {
            indices.push(0);
            indices.push(i);
            indices.push(i + 1);
        }

        indices
    }

    pub fn positions_32(&self) -> Vec<[f32; 3]> {
        self.vertices
            .iter()
            .map(|vertex| vertex.pos)
            .map(|pos| [pos.x as f32, pos.y as f32, pos.z as f32])
            .collect()
    }

    pub fn normals_32(&self) -> Vec<[f32; 3]> {
        self.vertices
            .iter()
            .map(|vertex| vertex.normal)
            .map(|normal| [normal.x as f32, normal.y as f32, normal.z as f32])
            .collect()
    }

    /// Texture coordinates projected from the supporting plane and scaled.
    pub fn uvs_32(&self, scale: f64) -> Vec<[f32; 2]> {
        self.vertices
            .iter()
            .map(|vertex| self.plane.project_uv(vertex.pos) * scale)
            .map(|uv| [uv.x as f32, uv.y as f32])
            .collect()
    }
}
