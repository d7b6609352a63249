use leptos::prelude::*;

/// Loading spinner component
#[component]
pub fn Spinner(
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
) -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class="spinner" role="status" aria-live="polite">
                <div class="spinner-ring"></div>
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="spinner-label">{label.clone()}</div>
            })}
        </div>
    }
}

/// Placeholder over a 3D canvas while its models load
#[component]
pub fn ModelLoading() -> impl IntoView {
    view! {
        <div class="model-loading">
            <Spinner label="Loading".to_string() />
        </div>
    }
}
