//! Declarative 3D scene: lights, camera and model groups.
//!
//! The renderer itself is external. This module describes what to draw and
//! defines [`SceneRuntime`], the seam through which the viewer pushes
//! per-frame changes (group position, mesh opacity, colours).

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::constants::NO_CHANGE_PARTS;
use crate::core::model_switcher::ModelSize;

pub const MACBOOK_16_URL: &str = "/models/macbook-16-transformed.glb";
pub const MACBOOK_14_URL: &str = "/models/macbook-14-transformed.glb";
pub const MACBOOK_URL: &str = "/models/macbook-transformed.glb";

/// Model groups the page knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupId {
    /// 16" model in the product viewer.
    Large,
    /// 14" model in the product viewer.
    Small,
    /// Model in the features section.
    Feature,
}

impl GroupId {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupId::Large => "large",
            GroupId::Small => "small",
            GroupId::Feature => "feature",
        }
    }
}

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color(pub u32);

impl Color {
    pub const SILVER: Color = Color(0xadb5bd);
    pub const SPACE_BLACK: Color = Color(0x2e2c2e);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid colour `{0}`, expected #rrggbb")]
pub struct ColorParseError(String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .map(Color)
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lights placed directly in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Spot {
        angle: f32,
        intensity: f32,
        decay: f32,
        position: Vec3,
    },
}

/// An emissive rectangular panel baked into the environment map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lightformer {
    pub intensity: f32,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentMap {
    pub resolution: u32,
    pub lightformers: Vec<Lightformer>,
}

/// The studio rig shared by every viewer: a lit environment plus three spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioLights {
    pub environment: EnvironmentMap,
    pub spots: Vec<Light>,
}

impl Default for StudioLights {
    fn default() -> Self {
        let panel = |position: Vec3| Lightformer {
            intensity: 10.0,
            position,
            scale: 10.0,
            rotation_y: PI / 2.0,
        };
        let spot = |intensity: f32, decay: f32, position: Vec3| Light::Spot {
            angle: 0.15,
            intensity,
            decay,
            position,
        };
        Self {
            environment: EnvironmentMap {
                resolution: 256,
                lightformers: vec![
                    panel(Vec3::new(-10.0, 5.0, -5.0)),
                    panel(Vec3::new(10.0, 0.0, 1.0)),
                ],
            },
            spots: vec![
                spot(PI * 0.2, 0.0, Vec3::new(-2.0, 10.0, 5.0)),
                spot(PI * 0.2, 0.0, Vec3::new(0.0, -25.0, 10.0)),
                spot(PI, 0.1, Vec3::new(0.0, 15.0, 5.0)),
            ],
        }
    }
}

/// Spring used when a dragged model snaps back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
}

/// Drag-to-rotate behaviour wrapped around a model group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationControls {
    pub snap: bool,
    pub speed: f32,
    pub zoom: f32,
    /// Vertical rotation limits in radians.
    pub polar: [f32; 2],
    /// Horizontal rotation limits; `None` means unbounded.
    pub azimuth: Option<[f32; 2]>,
    pub spring: Spring,
}

impl Default for PresentationControls {
    fn default() -> Self {
        Self {
            snap: true,
            speed: 1.0,
            zoom: 1.0,
            polar: [-PI, PI],
            azimuth: None,
            spring: Spring {
                mass: 1.0,
                tension: 0.0,
                friction: 26.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub group: GroupId,
    pub url: &'static str,
    pub scale: f32,
    pub position: Vec3,
    pub controls: Option<PresentationControls>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            fov: 50.0,
        }
    }
}

/// Everything the renderer needs to build a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub camera: Camera,
    pub studio: StudioLights,
    pub lights: Vec<Light>,
    pub models: Vec<ModelSpec>,
}

impl SceneDescription {
    pub fn new(models: Vec<ModelSpec>) -> Self {
        Self {
            camera: Camera::default(),
            studio: StudioLights::default(),
            lights: Vec::new(),
            models,
        }
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Product viewer: both sizes side by side, each draggable.
pub fn product_scene(is_mobile: bool) -> SceneDescription {
    let model = |group, url, size: ModelSize| ModelSpec {
        group,
        url,
        scale: size.scale(is_mobile) as f32,
        position: Vec3::ZERO,
        controls: Some(PresentationControls::default()),
    };
    SceneDescription::new(vec![
        model(GroupId::Large, MACBOOK_16_URL, ModelSize::Inch16),
        model(GroupId::Small, MACBOOK_14_URL, ModelSize::Inch14),
    ])
}

/// Feature tour: one model, turned by the scroll timeline.
pub fn feature_scene(is_mobile: bool) -> SceneDescription {
    SceneDescription::new(vec![ModelSpec {
        group: GroupId::Feature,
        url: MACBOOK_URL,
        scale: if is_mobile { 0.05 } else { 0.08 },
        position: Vec3::new(0.0, -1.0, 0.0),
        controls: None,
    }])
    .with_light(Light::Ambient { intensity: 0.5 })
}

/// A model group whose geometry has finished loading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedGroup {
    pub meshes: Vec<String>,
}

/// Write access to a mounted scene.
pub trait SceneRuntime {
    fn set_group_x(&self, group: GroupId, x: f32);
    fn set_group_rotation_y(&self, group: GroupId, radians: f32);
    fn set_mesh_opacity(&self, group: GroupId, mesh: &str, opacity: f32);
    fn set_mesh_color(&self, group: GroupId, mesh: &str, color: Color);
    fn set_screen_video(&self, group: GroupId, url: &str);
}

/// Meshes that take the chosen finish; screen, keyboard and logo keep theirs.
pub fn recolorable_meshes(meshes: &[String]) -> impl Iterator<Item = &str> {
    meshes
        .iter()
        .map(String::as_str)
        .filter(|name| !NO_CHANGE_PARTS.contains(name))
}

/// Apply `color` to every recolorable mesh of `group`.
pub fn apply_finish(runtime: &impl SceneRuntime, group: GroupId, loaded: &LoadedGroup, color: Color) {
    for mesh in recolorable_meshes(&loaded.meshes) {
        runtime.set_mesh_color(group, mesh, color);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        X(GroupId, f32),
        RotationY(GroupId, f32),
        Opacity(GroupId, String, f32),
        Color(GroupId, String, Color),
        Video(GroupId, String),
    }

    /// Records every call for assertions.
    #[derive(Default)]
    pub struct RecordingRuntime {
        pub calls: RefCell<Vec<Call>>,
    }

    impl SceneRuntime for RecordingRuntime {
        fn set_group_x(&self, group: GroupId, x: f32) {
            self.calls.borrow_mut().push(Call::X(group, x));
        }

        fn set_group_rotation_y(&self, group: GroupId, radians: f32) {
            self.calls.borrow_mut().push(Call::RotationY(group, radians));
        }

        fn set_mesh_opacity(&self, group: GroupId, mesh: &str, opacity: f32) {
            self.calls
                .borrow_mut()
                .push(Call::Opacity(group, mesh.to_string(), opacity));
        }

        fn set_mesh_color(&self, group: GroupId, mesh: &str, color: Color) {
            self.calls
                .borrow_mut()
                .push(Call::Color(group, mesh.to_string(), color));
        }

        fn set_screen_video(&self, group: GroupId, url: &str) {
            self.calls
                .borrow_mut()
                .push(Call::Video(group, url.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingRuntime};
    use super::*;

    #[test]
    fn test_studio_lights_rig() {
        let studio = StudioLights::default();
        assert_eq!(studio.environment.resolution, 256);
        assert_eq!(studio.environment.lightformers.len(), 2);
        assert!(studio.environment.lightformers.iter().all(|l| l.intensity == 10.0));
        assert_eq!(studio.spots.len(), 3);
        assert!(matches!(
            studio.spots[2],
            Light::Spot { intensity, decay, .. } if intensity == PI && decay == 0.1
        ));
    }

    #[test]
    fn test_color_round_trip_through_text() {
        assert_eq!(Color::SILVER.to_string(), "#adb5bd");
        assert_eq!("#2e2c2e".parse::<Color>(), Ok(Color::SPACE_BLACK));
        assert!("2e2c2e".parse::<Color>().is_err());
        assert!("#2e2c".parse::<Color>().is_err());
    }

    #[test]
    fn test_scene_serializes_for_runtime() {
        let scene = SceneDescription::new(vec![ModelSpec {
            group: GroupId::Large,
            url: "/models/macbook-16.glb",
            scale: 0.08,
            position: Vec3::ZERO,
            controls: Some(PresentationControls::default()),
        }])
        .with_light(Light::Ambient { intensity: 0.5 });

        let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(json["models"][0]["group"], "large");
        assert_eq!(json["lights"][0]["kind"], "ambient");
        assert_eq!(json["models"][0]["controls"]["azimuth"], serde_json::Value::Null);
    }

    #[test]
    fn test_product_scene_scales() {
        let desktop = product_scene(false);
        assert_eq!(desktop.models.len(), 2);
        assert_eq!(desktop.models[0].group, GroupId::Large);
        assert_eq!(desktop.models[0].scale, 0.08);
        assert_eq!(desktop.models[1].scale, 0.06);
        assert!(desktop.models.iter().all(|m| m.controls.is_some()));

        let mobile = product_scene(true);
        assert_eq!(mobile.models[0].scale, 0.05);
        assert_eq!(mobile.models[1].scale, 0.03);
    }

    #[test]
    fn test_feature_scene() {
        let scene = feature_scene(false);
        assert_eq!(scene.models[0].position, Vec3::new(0.0, -1.0, 0.0));
        assert!(scene.models[0].controls.is_none());
        assert_eq!(scene.lights, vec![Light::Ambient { intensity: 0.5 }]);
        assert_eq!(feature_scene(true).models[0].scale, 0.05);
    }

    #[test]
    fn test_finish_skips_fixed_parts() {
        let loaded = LoadedGroup {
            meshes: vec!["Object_6".into(), "Object_200".into(), "Object_84".into()],
        };
        let runtime = RecordingRuntime::default();
        apply_finish(&runtime, GroupId::Small, &loaded, Color::SPACE_BLACK);
        assert_eq!(
            *runtime.calls.borrow(),
            vec![Call::Color(GroupId::Small, "Object_200".into(), Color::SPACE_BLACK)]
        );
    }
}
