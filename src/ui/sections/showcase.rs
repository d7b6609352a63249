use leptos::prelude::*;

use crate::core::section_timelines::showcase_timeline;
use crate::ui::media_query::use_is_mobile;
use crate::ui::scroll::use_scroll_timeline;

#[component]
pub fn Showcase() -> impl IntoView {
    let is_tablet = use_is_mobile();
    use_scroll_timeline(move || showcase_timeline(is_tablet.get()));

    view! {
        <section id="showcase">
            <div class="media">
                <video loop=true muted=true autoplay=true playsinline=true>
                    <source src="/videos/game.mp4" />
                </video>
                <div class="mask">
                    <img src="/mask-logo.svg" alt="mask" />
                </div>
            </div>
            <div class="content">
                <div class="wrapper">
                    <div class="lg:max-w-md">
                        <h2>"Rocket Chip"</h2>
                        <div class="space-y-5 mt-7 pe-10">
                            <p>
                                "Introducing "
                                <span class="text-white">
                                    "M4, the next generation of Apple silicon"
                                </span>
                                ". M4 powers"
                            </p>
                            <p>
                                "It drives Apple Intelligence on iPad, so you can write, create, and accomplish more with ease. All in a design that's unbelievably thin, light, and powerful."
                            </p>
                            <p>
                                "A brand-new display engine delivers breathtaking precision, color accuracy, and brightness. And a next-gen GPU with hardware-accelerated ray tracing brings console-level graphics to your fingertips."
                            </p>
                            <p class="text-primary">"Learn more about Apple Intelligence"</p>
                        </div>
                    </div>
                    <div class="max-w-3xs space-y-14">
                        <div class="space-y-2">
                            <p>"Up to"</p>
                            <h3>"4x faster"</h3>
                            <p>"pro rendering performance than M2"</p>
                        </div>
                        <div class="space-y-2">
                            <p>"Up to"</p>
                            <h3>"1.5x faster"</h3>
                            <p>"CPU performance than M2"</p>
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
