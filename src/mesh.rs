use crate::polygon::Polygon;

/// Triangle indices, sized by vertex count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    pub fn len(&self) -> usize {
        match self {
            Indices::U16(indices) => indices.len(),
            Indices::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat triangle-mesh buffers ready for upload to a renderer.
///
/// # Fields
/// * `positions` - Vertex positions
/// * `normals` - Vertex normals
/// * `uvs` - Texture coordinates projected from each polygon's plane
/// * `indices` - Fan-triangulation indices into the vertex buffers
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Indices,
}

impl MeshData {
    /// Fan-triangulates the polygons into one mesh. Vertices are not
    /// welded: each polygon contributes its own ring, so face normals stay
    /// hard. 16-bit indices are used when every index fits.
    pub fn from_polygons(polygons: &[Polygon], uv_scale: f64) -> Self {
        let vertex_count: usize = polygons
            .iter()
            .filter(|polygon| polygon.vertices.len() >= 3)
            .map(|polygon| polygon.vertices.len())
            .sum();

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        let mut indices: Vec<u32> = Vec::new();

        for polygon in polygons {
            if polygon.vertices.len() < 3 {
                continue;
            }
            let base = positions.len() as u32;
            positions.extend(polygon.positions_32());
            normals.extend(polygon.normals_32());
            uvs.extend(polygon.uvs_32(uv_scale));
            indices.extend(polygon.indices().into_iter().map(|i| base + i));
        }

        let indices = if vertex_count <= u16::MAX as usize + 1 {
            Indices::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            Indices::U32(indices)
        };

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::primitives::{cuboid, CuboidDimensions};
    use crate::brush::{BooleanOp, Brush};
    use crate::plane::Plane;
    use crate::polygon::Vertex;

    #[cfg(feature = "bevy")]
    use bevy::math::DVec3;

    #[cfg(not(feature = "bevy"))]
    use glam::DVec3;

    fn unit_cube_faces() -> Vec<Polygon> {
        let planes = cuboid(
            DVec3::ZERO,
            &CuboidDimensions {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
        );
        Brush::from_planes(planes, BooleanOp::Union, 0, 0)
            .unwrap()
            .faces
    }

    #[test]
    fn test_cube_mesh() {
        let mesh = MeshData::from_polygons(&unit_cube_faces(), 1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(matches!(mesh.indices, Indices::U16(_)));
        assert_eq!(mesh.uvs.len(), 24);
    }

    #[test]
    fn test_uv_scale() {
        let faces = unit_cube_faces();
        let unscaled = MeshData::from_polygons(&faces, 1.0);
        let scaled = MeshData::from_polygons(&faces, 2.0);
        for (a, b) in unscaled.uvs.iter().zip(&scaled.uvs) {
            assert!((a[0] * 2.0 - b[0]).abs() < 1e-6);
            assert!((a[1] * 2.0 - b[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_index_width_switch() {
        let plane = Plane::new(DVec3::Z, 0.0);
        let triangle_at = |x: f64| {
            Polygon::from_plane(
                plane,
                vec![
                    Vertex::new(DVec3::new(x, 0.0, 0.0), DVec3::Z),
                    Vertex::new(DVec3::new(x + 1.0, 0.0, 0.0), DVec3::Z),
                    Vertex::new(DVec3::new(x, 1.0, 0.0), DVec3::Z),
                ],
                0,
            )
        };

        // 21845 triangles fit 16-bit indices exactly; one more does not.
        let snug: Vec<Polygon> = (0..21845).map(|i| triangle_at(i as f64)).collect();
        let mesh = MeshData::from_polygons(&snug, 1.0);
        assert_eq!(mesh.vertex_count(), 65535);
        assert!(matches!(mesh.indices, Indices::U16(_)));

        let overflowing: Vec<Polygon> = (0..21846).map(|i| triangle_at(i as f64)).collect();
        let mesh = MeshData::from_polygons(&overflowing, 1.0);
        assert_eq!(mesh.vertex_count(), 65538);
        assert!(matches!(mesh.indices, Indices::U32(_)));
    }
}
