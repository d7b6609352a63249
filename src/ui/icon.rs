use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name, served as `/{name}.svg`
    name: &'static str,
    /// CSS classes
    #[prop(default = "")]
    class: &'static str,
    /// Alt text; defaults to the name
    #[prop(optional)]
    alt: Option<&'static str>,
) -> impl IntoView {
    let icon_path = format!("/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=alt.unwrap_or(name)
            draggable="false"
        />
    }
}

/// Icons shipped in `public/`
pub mod icons {
    pub const LOGO: &str = "logo";
    pub const SEARCH: &str = "search";
    pub const CART: &str = "cart";
}
