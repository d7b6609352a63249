//! Canvas hosting one 3D scene.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::core::scene::{GroupId, LoadedGroup, SceneDescription};
use crate::ui::common::spinner::ModelLoading;
use crate::ui::scene_runtime::JsSceneRuntime;

/// Mounts `scene` on a canvas once the canvas is attached, then loads each
/// model group. A "Loading" placeholder covers the canvas until every group
/// has arrived; a group that fails to load leaves it in place.
///
/// Loads still in flight when the component unmounts are discarded.
#[component]
pub fn SceneCanvas(
    /// DOM id of the canvas element
    #[prop(optional, into)]
    id: Option<String>,
    /// Scene to build
    scene: SceneDescription,
    /// Called once per group whose geometry arrived
    on_loaded: Callback<(JsSceneRuntime, GroupId, LoadedGroup)>,
    /// Called right after the scene is mounted, before any group loads
    #[prop(optional)]
    on_mounted: Option<Callback<JsSceneRuntime>>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let runtime = StoredValue::new(None::<JsSceneRuntime>);
    let pending = RwSignal::new(scene.models.len());
    let alive = Arc::new(AtomicBool::new(true));

    #[cfg(feature = "hydrate")]
    {
        use leptos::logging::warn;
        use leptos::task::spawn_local;

        let alive = Arc::clone(&alive);
        let scene = StoredValue::new(scene);
        Effect::new(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if runtime.with_value(Option::is_some) {
                return;
            }

            let rt = match scene.with_value(|scene| JsSceneRuntime::mount(&canvas, scene)) {
                Ok(rt) => rt,
                Err(err) => {
                    warn!("3D scene not mounted: {err}");
                    return;
                }
            };
            runtime.set_value(Some(rt));
            if let Some(on_mounted) = on_mounted {
                on_mounted.run(rt);
            }

            for model in scene.with_value(|scene| scene.models.clone()) {
                let alive = Arc::clone(&alive);
                spawn_local(async move {
                    let result = rt.load(&model).await;
                    if !alive.load(Ordering::Acquire) {
                        return;
                    }
                    match result {
                        Ok(loaded) => {
                            pending.try_update(|n| *n = n.saturating_sub(1));
                            on_loaded.run((rt, model.group, loaded));
                        }
                        Err(err) => warn!("model {} failed to load: {err}", model.url),
                    }
                });
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (scene, on_loaded, on_mounted);

    let alive_for_cleanup = Arc::clone(&alive);
    on_cleanup(move || {
        alive_for_cleanup.store(false, Ordering::Release);
        if let Some(rt) = runtime.try_update_value(Option::take).flatten() {
            rt.dispose();
        }
    });

    view! {
        <div class="scene-canvas">
            <canvas id=id node_ref=canvas_ref></canvas>
            <Show when=move || { pending.get() > 0 }>
                <ModelLoading />
            </Show>
        </div>
    }
}
