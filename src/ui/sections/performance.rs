//! Performance section: scattered game screenshots that fly into place.

use leptos::logging::warn;
use leptos::prelude::*;

use crate::core::constants::{PERFORMANCE_IMAGES, PERFORMANCE_IMG_POSITIONS};
use crate::core::layout::PerformanceLayout;
use crate::core::section_timelines::{performance_text_timeline, performance_timeline};
use crate::ui::media_query::use_is_mobile;
use crate::ui::scroll::use_scroll_timeline;

/// Validated layout, or `None` when images and positions disagree. The
/// section then renders its images unpositioned and never animates them.
fn load_layout() -> Option<PerformanceLayout> {
    PerformanceLayout::new(PERFORMANCE_IMAGES, PERFORMANCE_IMG_POSITIONS)
        .inspect_err(|err| warn!("performance layout rejected: {err}"))
        .ok()
}

#[component]
pub fn Performance() -> impl IntoView {
    let is_mobile = use_is_mobile();
    let layout = load_layout();

    // Images that never animate sit at their configured spot
    let rest_style = |id: &str| {
        layout.as_ref().and_then(|layout| {
            layout
                .images()
                .iter()
                .find(|placed| placed.image.id == id && !placed.position.animate)
                .map(|placed| placed.position.inline_style())
        })
    };
    let images = PERFORMANCE_IMAGES
        .iter()
        .enumerate()
        .map(|(index, image)| {
            view! {
                <img
                    src=image.src
                    class=image.id
                    alt=image.alt_text(index).into_owned()
                    style=rest_style(image.id)
                />
            }
        })
        .collect_view();

    use_scroll_timeline(move || {
        let mobile = is_mobile.get();
        layout
            .as_ref()
            .and_then(|layout| performance_timeline(layout, mobile))
    });
    use_scroll_timeline(|| Some(performance_text_timeline()));

    view! {
        <section id="performance">
            <h2>"Next-level graphics performance. Game on."</h2>
            <div class="wrapper">{images}</div>
            <div class="content">
                <p>
                    "Run graphics-intensive workflows with a responsiveness that keeps up with your imagination. The M4 family of chips features a GPU with a second-generation hardware-accelerated ray tracing engine that renders images faster, so "
                    <span class="text-white">
                        "gaming feels more immersive and realistic than ever."
                    </span>
                    " And Dynamic Caching optimizes fast on-chip memory to dramatically increase average GPU utilization, driving a huge performance boost for the most demanding pro apps and games."
                </p>
            </div>
        </section>
    }
}
