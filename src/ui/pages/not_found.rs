//! Not found page component
//!
//! Shown for any path other than the landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found">
            <Icon name=icons::LOGO alt="Apple logo" class="not-found-logo" />
            <h1>"404"</h1>
            <h2>"Page Not Found"</h2>
            <p>"The page you're looking for doesn't exist or has been moved."</p>
            <A href="/" attr:class="not-found-home">
                "Back to MacBook Pro"
            </A>
        </main>
    }
}
