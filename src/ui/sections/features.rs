use leptos::prelude::*;

use crate::core::constants::FEATURES;
use crate::core::scene::{GroupId, SceneRuntime};
use crate::core::section_timelines::{feature_video_for, features_timeline};
use crate::ui::media_query::use_is_mobile;
use crate::ui::scene_runtime::JsSceneRuntime;
use crate::ui::scroll::use_scroll_timeline_with_calls;
use crate::ui::three::FeatureScene;

#[component]
pub fn Features() -> impl IntoView {
    let is_mobile = use_is_mobile();
    let runtime = RwSignal::new(None::<JsSceneRuntime>);

    use_scroll_timeline_with_calls(
        move || features_timeline(is_mobile.get()),
        move |event| {
            let Some(video) = feature_video_for(event) else {
                return;
            };
            if let Some(rt) = runtime.try_get_untracked().flatten() {
                rt.set_screen_video(GroupId::Feature, video);
            }
        },
    );

    view! {
        <section id="features">
            <h2>"See it all in a new light."</h2>
            <div id="f-canvas">
                <FeatureScene is_mobile=is_mobile runtime=runtime />
            </div>
            <div class="absolute inset-0">
                {FEATURES
                    .iter()
                    .enumerate()
                    .map(|(index, feature)| view! {
                        <div class=format!("box box{} {}", index + 1, feature.styles)>
                            <img src=feature.icon alt=feature.highlight />
                            <p>
                                <span class="text-white">{feature.highlight}</span>
                                " "
                                {feature.text}
                            </p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
