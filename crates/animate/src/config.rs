use honeybear_common::MeshKind;
use serde::{Deserialize, Serialize};

/// Whether a kind rotates, and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationPolicy {
    pub enabled: bool,
    pub speed: f32,
}

impl RotationPolicy {
    pub const fn new(enabled: bool, speed: f32) -> Self {
        Self { enabled, speed }
    }
}

/// Policies for the kinds that animate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub cube: RotationPolicy,
    pub donut: RotationPolicy,
    pub text: RotationPolicy,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            cube: RotationPolicy::new(true, 1.0),
            donut: RotationPolicy::new(true, 0.5),
            text: RotationPolicy::new(true, 0.5),
        }
    }
}

impl RotationConfig {
    /// `None` for kinds that never rotate.
    pub fn policy(&self, kind: MeshKind) -> Option<RotationPolicy> {
        match kind {
            MeshKind::Cube => Some(self.cube),
            MeshKind::Donut => Some(self.donut),
            MeshKind::Text => Some(self.text),
            MeshKind::Sphere | MeshKind::AxisArrow => None,
        }
    }

    pub fn policy_mut(&mut self, kind: MeshKind) -> Option<&mut RotationPolicy> {
        match kind {
            MeshKind::Cube => Some(&mut self.cube),
            MeshKind::Donut => Some(&mut self.donut),
            MeshKind::Text => Some(&mut self.text),
            MeshKind::Sphere | MeshKind::AxisArrow => None,
        }
    }
}

/// Surface parameters copied onto the text material every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParameters {
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for MaterialParameters {
    fn default() -> Self {
        Self {
            metalness: 1.0,
            roughness: 0.0,
        }
    }
}

/// Everything the control panel can tune.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub rotation: RotationConfig,
    pub material: MaterialParameters,
    /// Shade the text with the matcap instead of the reflective material.
    pub text_matcap: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo() {
        let config = SceneConfig::default();
        assert_eq!(config.rotation.cube, RotationPolicy::new(true, 1.0));
        assert_eq!(config.rotation.donut, RotationPolicy::new(true, 0.5));
        assert_eq!(config.rotation.text, RotationPolicy::new(true, 0.5));
        assert_eq!(config.material, MaterialParameters { metalness: 1.0, roughness: 0.0 });
        assert!(!config.text_matcap);
    }

    #[test]
    fn only_three_kinds_have_policies() {
        let config = RotationConfig::default();
        assert!(config.policy(MeshKind::Sphere).is_none());
        assert!(config.policy(MeshKind::AxisArrow).is_none());
        for kind in [MeshKind::Cube, MeshKind::Donut, MeshKind::Text] {
            assert!(config.policy(kind).is_some());
        }
    }

    #[test]
    fn policy_mut_writes_through() {
        let mut config = RotationConfig::default();
        config.policy_mut(MeshKind::Donut).unwrap().speed = 4.0;
        assert_eq!(config.donut.speed, 4.0);
        assert!(config.policy_mut(MeshKind::Sphere).is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "rotation:\n  cube:\n    enabled: false\n    speed: 2.0\nmaterial:\n  roughness: 0.3\n";
        let config: SceneConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rotation.cube, RotationPolicy::new(false, 2.0));
        assert_eq!(config.rotation.donut, RotationPolicy::new(true, 0.5));
        assert_eq!(config.material.metalness, 1.0);
        assert_eq!(config.material.roughness, 0.3);
    }
}
