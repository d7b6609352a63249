use leptos::prelude::*;

use crate::core::{Finish, ModelSize};
use crate::ui::media_query::use_is_mobile;
use crate::ui::store::use_viewer_store;
use crate::ui::three::ProductScene;

fn swatch_class(finish: Finish) -> &'static str {
    match finish {
        Finish::Silver => "bg-neutral-300",
        Finish::SpaceBlack => "bg-neutral-900",
    }
}

#[component]
pub fn ProductViewer() -> impl IntoView {
    let store = use_viewer_store();
    let is_mobile = use_is_mobile();
    let scale = Signal::derive(move || store.scale(is_mobile.get()));

    view! {
        <section id="product-viewer">
            <h2>"Take a closer look."</h2>
            <div class="controls">
                <p class="info">{move || store.caption()}</p>
                <div class="flex-center gap-5 mt-5">
                    <div class="color-control">
                        {Finish::ALL
                            .into_iter()
                            .map(|finish| view! {
                                <button
                                    class=swatch_class(finish)
                                    class:active=move || store.finish.get() == finish
                                    aria-label=finish.label()
                                    on:click=move |_| store.finish.set(finish)
                                ></button>
                            })
                            .collect_view()}
                    </div>
                    <div class="size-control">
                        {ModelSize::ALL
                            .into_iter()
                            .map(|size| view! {
                                <button
                                    class:active=move || store.size.get() == size
                                    on:click=move |_| store.size.set(size)
                                >
                                    {size.label()}
                                </button>
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
            <ProductScene scale=scale finish=store.finish is_mobile=is_mobile />
        </section>
    }
}
