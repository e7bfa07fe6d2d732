use serde::{Deserialize, Serialize};

/// How a material shades its surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum MaterialKind {
    /// View-space normals mapped to colors.
    Normal,
    /// Physically based with an optional reflective environment cube.
    Standard { env_map: bool },
    /// Unlit flat color, `0xRRGGBB`.
    Basic { color: u32 },
    /// Lit by a matcap texture looked up with the view-space normal.
    Matcap,
}

/// A material shared by handle among all nodes that reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub fn normal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Normal,
            metalness: 0.0,
            roughness: 1.0,
        }
    }

    pub fn standard(name: impl Into<String>, metalness: f32, roughness: f32) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Standard { env_map: true },
            metalness,
            roughness,
        }
    }

    pub fn basic(name: impl Into<String>, color: u32) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Basic { color },
            metalness: 0.0,
            roughness: 1.0,
        }
    }

    /// Linear RGB in `[0, 1]` for basic materials, white otherwise.
    pub fn base_color(&self) -> [f32; 3] {
        match self.kind {
            MaterialKind::Basic { color } => [
                ((color >> 16) & 0xff) as f32 / 255.0,
                ((color >> 8) & 0xff) as f32 / 255.0,
                (color & 0xff) as f32 / 255.0,
            ],
            _ => [1.0; 3],
        }
    }
}
