use leptos::prelude::*;

/// Reserved for the highlights grid; renders an empty section for now.
#[component]
pub fn Highlights() -> impl IntoView {
    view! { <section id="highlights"></section> }
}
