//! Real-time constructive solid geometry on convex polyhedral brushes.
//!
//! A [`brush::Brush`] is a convex solid cut out by half-space planes and
//! tagged with a boolean operation. [`evaluate::process`] combines an
//! ordered chain of brushes into the polygonal surface of the resulting
//! solid, ready for fan-triangulation via [`mesh::MeshData`].
//!
//! ```
//! use kerf::prelude::*;
//!
//! let room = Brush::from_planes(
//!     cuboid(DVec3::ZERO, &CuboidDimensions { width: 8.0, height: 4.0, depth: 8.0 }),
//!     BooleanOp::Union,
//!     0,
//!     0,
//! )
//! .unwrap();
//! let doorway = Brush::from_planes(
//!     cuboid(DVec3::new(4.0, -0.5, 0.0), &CuboidDimensions { width: 0.6, height: 2.0, depth: 1.0 }),
//!     BooleanOp::Subtract,
//!     1,
//!     0,
//! )
//! .unwrap();
//!
//! let surface = process(&[room, doorway]);
//! let mesh = MeshData::from_polygons(&surface, 1.0);
//! assert!(mesh.triangle_count() > 0);
//! ```

pub mod broadphase;
pub mod brush;
pub mod chunk;
pub mod evaluate;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod routing;

pub mod prelude {
    pub use crate::broadphase::Aabb;
    pub use crate::brush::{
        primitives::{
            arch, cuboid, cylinder, sphere, wedge, ArchDimensions, CuboidDimensions,
            CylinderDimensions,
        },
        relation::PolygonCategory,
        BooleanOp, Brush, BrushError,
    };
    pub use crate::chunk::process_chunked;
    pub use crate::evaluate::process;
    pub use crate::mesh::{Indices, MeshData};
    pub use crate::plane::{Plane, PointSide, PolygonSide, SplitPolygons};
    pub use crate::polygon::{Polygon, Vertex};
    pub use crate::routing::RoutingTable;

    #[cfg(feature = "bevy")]
    pub use bevy::math::{DVec2, DVec3};

    #[cfg(not(feature = "bevy"))]
    pub use glam::{DVec2, DVec3};
}
