use crate::polygon::Polygon;
use std::ops::{Add, Sub};

#[cfg(feature = "bevy")]
use bevy::math::DVec3;

#[cfg(not(feature = "bevy"))]
use glam::DVec3;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Reflect))]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl From<&[Polygon]> for Aabb {
    fn from(polygons: &[Polygon]) -> Self {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);

        for polygon in polygons {
            for vertex in &polygon.vertices {
                min = min.min(vertex.pos);
                max = max.max(vertex.pos);
            }
        }

        Aabb { min, max }
    }
}

impl Add<Aabb> for Aabb {
    type Output = Aabb;

    fn add(self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Sub<Aabb> for Aabb {
    type Output = Aabb;

    fn sub(self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> DVec3 {
        (self.max - self.min) * 0.5
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.z >= self.min.z
            && point.x <= self.max.x
            && point.y <= self.max.y
            && point.z <= self.max.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn surface_area(&self) -> f64 {
        let extents = self.extents();
        2.0 * (extents.x * extents.y + extents.x * extents.z + extents.y * extents.z)
    }
}
