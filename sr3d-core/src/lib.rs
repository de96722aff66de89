//! SR3D Core Library - software rendering pipeline
//!
//! Holds triangle meshes, rotates and translates them every frame, culls
//! back faces, projects to pixel space and hands flat-shaded triangles to a
//! [`DrawSurface`] in painter's order.

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use config::{Color, FrameStyle, RenderConfig};
pub use error::{ConfigError, GeometryError, LoadError, ObjError};
pub use geometry::{Mesh, RenderState, Triangle};
pub use obj::{load_obj, load_obj_file, parse_obj};
pub use projection::Camera;
pub use render::{render_frame, DrawSurface, FrameStats};
pub use scene::Scene;
pub use transform::{RigidTransform, RotationState, VertexKind};
