//! 3D scene of the product viewer.

use leptos::prelude::*;

use crate::core::scene::{GroupId, LoadedGroup, apply_finish, product_scene};
use crate::core::{Finish, ModelSwitcher, ModelVariant};
use crate::ui::frame::run_frames;
use crate::ui::scene_runtime::JsSceneRuntime;
use crate::ui::three::canvas::SceneCanvas;

const VIEWER_GROUPS: [GroupId; 2] = [GroupId::Large, GroupId::Small];

/// Both laptop sizes in one scene. The one matching `scale` is shown; a
/// change of size slides the other out while cross-fading the two.
#[component]
pub fn ProductScene(
    /// Scale of the selected size; decides which model is shown
    #[prop(into)]
    scale: Signal<f64>,
    #[prop(into)] finish: Signal<Finish>,
    /// Mobile viewports use smaller models, so the scene is rebuilt on change
    #[prop(into)]
    is_mobile: Signal<bool>,
) -> impl IntoView {
    let switcher = StoredValue::new_local(ModelSwitcher::new());
    let runtime = RwSignal::new(None::<JsSceneRuntime>);
    let animating = StoredValue::new(false);
    let variant = Memo::new(move |_| ModelVariant::from_scale(scale.get()));

    let animate = move || {
        if animating.get_value() {
            return;
        }
        let Some(rt) = runtime.get_untracked() else {
            return;
        };
        animating.set_value(true);
        run_frames(move |dt| {
            let running = switcher
                .try_update_value(|switcher| {
                    switcher.advance(dt, &rt);
                    !switcher.is_idle()
                })
                .unwrap_or(false);
            if !running {
                animating.try_update_value(|flag| *flag = false);
            }
            running
        });
    };

    Effect::new(move |_| {
        let variant = variant.get();
        switcher.update_value(|switcher| switcher.switch_to(variant));
        animate();
    });

    // Recolour whatever is loaded when the finish changes
    Effect::new(move |_| {
        let color = finish.get().color();
        let Some(rt) = runtime.get() else {
            return;
        };
        switcher.with_value(|switcher| {
            for group in VIEWER_GROUPS {
                if let Some(loaded) = switcher.loaded(group) {
                    apply_finish(&rt, group, loaded, color);
                }
            }
        });
    });

    // A fresh scene starts with nothing mounted
    let on_mounted = Callback::new(move |rt: JsSceneRuntime| {
        switcher.update_value(|switcher| {
            for group in VIEWER_GROUPS {
                switcher.unmount(group);
            }
        });
        runtime.set(Some(rt));
    });

    let on_loaded = Callback::new(
        move |(rt, group, loaded): (JsSceneRuntime, GroupId, LoadedGroup)| {
            apply_finish(&rt, group, &loaded, finish.get_untracked().color());
            switcher.update_value(|switcher| switcher.mount(group, loaded, &rt));
        },
    );

    view! {
        {move || {
            let mobile = is_mobile.get();
            view! {
                <SceneCanvas
                    id="product-canvas"
                    scene=product_scene(mobile)
                    on_loaded=on_loaded
                    on_mounted=on_mounted
                />
            }
        }}
    }
}
