//! Binding to the JavaScript 3D runtime (`js/scene_runtime.js`).
//!
//! The runtime owns the WebGL renderer, model loading and the
//! drag-to-rotate controls. Rust hands it a serialized
//! [`SceneDescription`] and afterwards drives it through [`SceneRuntime`].

#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "hydrate")]
use crate::core::scene::SceneDescription;
use crate::core::scene::{Color, GroupId, LoadedGroup, ModelSpec, SceneRuntime};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("could not encode scene: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("3D runtime error: {0}")]
    Runtime(String),
    #[error("3D runtime is not available")]
    Unavailable,
}

#[cfg(feature = "hydrate")]
impl From<JsValue> for SceneError {
    fn from(value: JsValue) -> Self {
        SceneError::Runtime(
            value
                .as_string()
                .or_else(|| {
                    js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                        .ok()
                        .and_then(|m| m.as_string())
                })
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen(module = "/js/scene_runtime.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = mountScene)]
    fn mount_scene(canvas: &web_sys::HtmlCanvasElement, description: &str) -> Result<u32, JsValue>;

    #[wasm_bindgen(catch, js_name = loadModel)]
    fn load_model(handle: u32, spec: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = setGroupX)]
    fn js_set_group_x(handle: u32, group: &str, x: f32);

    #[wasm_bindgen(js_name = setGroupRotationY)]
    fn js_set_group_rotation_y(handle: u32, group: &str, radians: f32);

    #[wasm_bindgen(js_name = setMeshOpacity)]
    fn js_set_mesh_opacity(handle: u32, group: &str, mesh: &str, opacity: f32);

    #[wasm_bindgen(js_name = setMeshColor)]
    fn js_set_mesh_color(handle: u32, group: &str, mesh: &str, color: &str);

    #[wasm_bindgen(js_name = setScreenVideo)]
    fn js_set_screen_video(handle: u32, group: &str, url: &str);

    #[wasm_bindgen(js_name = disposeScene)]
    fn dispose_scene(handle: u32);
}

/// A scene mounted on a canvas. Copyable handle; the scene itself lives in JS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsSceneRuntime {
    handle: u32,
}

impl JsSceneRuntime {
    /// Build the scene described by `description` on `canvas`.
    #[cfg(feature = "hydrate")]
    pub fn mount(
        canvas: &web_sys::HtmlCanvasElement,
        description: &SceneDescription,
    ) -> Result<Self, SceneError> {
        let json = description.to_json()?;
        let handle = mount_scene(canvas, &json)?;
        Ok(Self { handle })
    }

    /// Fetch and attach a model. Resolves to the names of its meshes.
    #[cfg(feature = "hydrate")]
    pub async fn load(&self, spec: &ModelSpec) -> Result<LoadedGroup, SceneError> {
        let json = serde_json::to_string(spec)?;
        let promise = load_model(self.handle, &json)?;
        let meshes = wasm_bindgen_futures::JsFuture::from(promise).await?;
        let meshes = js_sys::Array::from(&meshes)
            .iter()
            .filter_map(|name| name.as_string())
            .collect();
        Ok(LoadedGroup { meshes })
    }

    #[cfg(not(feature = "hydrate"))]
    pub async fn load(&self, spec: &ModelSpec) -> Result<LoadedGroup, SceneError> {
        let _ = spec;
        Err(SceneError::Unavailable)
    }

    pub fn dispose(self) {
        #[cfg(feature = "hydrate")]
        dispose_scene(self.handle);
    }
}

/// Markup-only builds keep the handle type but never reach the runtime.
#[cfg(not(feature = "hydrate"))]
impl SceneRuntime for JsSceneRuntime {
    fn set_group_x(&self, _: GroupId, _: f32) {}
    fn set_group_rotation_y(&self, _: GroupId, _: f32) {}
    fn set_mesh_opacity(&self, _: GroupId, _: &str, _: f32) {}
    fn set_mesh_color(&self, _: GroupId, _: &str, _: Color) {}
    fn set_screen_video(&self, _: GroupId, _: &str) {}
}

#[cfg(feature = "hydrate")]
impl SceneRuntime for JsSceneRuntime {
    fn set_group_x(&self, group: GroupId, x: f32) {
        js_set_group_x(self.handle, group.as_str(), x);
    }

    fn set_group_rotation_y(&self, group: GroupId, radians: f32) {
        js_set_group_rotation_y(self.handle, group.as_str(), radians);
    }

    fn set_mesh_opacity(&self, group: GroupId, mesh: &str, opacity: f32) {
        js_set_mesh_opacity(self.handle, group.as_str(), mesh, opacity);
    }

    fn set_mesh_color(&self, group: GroupId, mesh: &str, color: Color) {
        js_set_mesh_color(self.handle, group.as_str(), mesh, &color.to_string());
    }

    fn set_screen_video(&self, group: GroupId, url: &str) {
        js_set_screen_video(self.handle, group.as_str(), url);
    }
}
