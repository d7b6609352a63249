//! The laptop turned by the features tour.

use leptos::prelude::*;

use crate::core::constants::FEATURE_SEQUENCE;
use crate::core::scene::{GroupId, LoadedGroup, SceneRuntime, feature_scene};
use crate::core::scroll::Channel;
use crate::ui::scene_runtime::JsSceneRuntime;
use crate::ui::scroll::{register_model_sink, request_refresh, unregister_model_sink};
use crate::ui::three::canvas::SceneCanvas;

/// Scene of the features section. Once the model has loaded, `runtime` holds
/// the scene so call steps can swap the screen video, and scroll writes to
/// the feature group rotate it.
#[component]
pub fn FeatureScene(
    #[prop(into)] is_mobile: Signal<bool>,
    runtime: RwSignal<Option<JsSceneRuntime>>,
) -> impl IntoView {
    let on_mounted = Callback::new(move |_: JsSceneRuntime| runtime.set(None));

    let on_loaded = Callback::new(move |(rt, group, _): (JsSceneRuntime, GroupId, LoadedGroup)| {
        if group != GroupId::Feature {
            return;
        }
        if let Some(first) = FEATURE_SEQUENCE.first() {
            rt.set_screen_video(GroupId::Feature, first.video_path);
        }
        register_model_sink(GroupId::Feature, move |channel, value| {
            if channel == Channel::RotationY {
                rt.set_group_rotation_y(GroupId::Feature, value as f32);
            }
        });
        runtime.set(Some(rt));
        // push the current rotation to the freshly loaded model
        request_refresh();
    });

    on_cleanup(|| unregister_model_sink(GroupId::Feature));

    view! {
        {move || {
            let mobile = is_mobile.get();
            view! {
                <SceneCanvas
                    scene=feature_scene(mobile)
                    on_loaded=on_loaded
                    on_mounted=on_mounted
                />
            }
        }}
    }
}
