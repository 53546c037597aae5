//! Scene description: the triangles drawn each frame.
//!
//! Scenes are immutable model-space data. A YAML scene file looks like:
//!
//! ```yaml
//! triangles:
//!   - a: [0, 0]
//!     b: [16, 13]
//!     c: [0, 16]
//!     color: "#FF0000"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{ModelPoint, Triangle};

/// Ordered list of triangles; later triangles draw over earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    triangles: Vec<Triangle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    triangles: Vec<TriangleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriangleEntry {
    a: [f32; 2],
    b: [f32; 2],
    c: [f32; 2],
    color: String,
}

impl TriangleEntry {
    fn into_triangle(self) -> Result<Triangle> {
        let point = |[x, y]: [f32; 2]| ModelPoint::new(x, y);
        Ok(Triangle::new(
            point(self.a),
            point(self.b),
            point(self.c),
            Rgba::from_hex(&self.color)?,
        ))
    }
}

impl Scene {
    /// Create a scene from triangles.
    #[must_use]
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// The built-in two-triangle scene: a red and a green triangle whose
    /// hypotenuses cross.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            Triangle::new(
                ModelPoint::new(0.0, 0.0),
                ModelPoint::new(16.0, 13.0),
                ModelPoint::new(0.0, 16.0),
                Rgba::RED,
            ),
            Triangle::new(
                ModelPoint::new(17.0, 0.0),
                ModelPoint::new(1.0, 13.0),
                ModelPoint::new(17.0, 16.0),
                Rgba::GREEN,
            ),
        ])
    }

    /// Triangles in draw order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Append a triangle on top of the scene.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Parse a scene from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] (with line number) for malformed YAML
    /// and [`Error::InvalidColor`] for an unparseable color.
    pub fn parse(yaml: &str) -> Result<Self> {
        let file: SceneFile = serde_yaml_ng::from_str(yaml).map_err(|e| Error::from_yaml(&e))?;
        let triangles = file
            .triangles
            .into_iter()
            .map(TriangleEntry::into_triangle)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(triangles))
    }

    /// Load a scene from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
