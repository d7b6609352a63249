//! Landing page component
//!
//! The product page: eight sections in fixed order inside `<main>`.

use leptos::prelude::*;
use leptos_meta::{Link, Meta, Title};

use crate::ui::sections::{
    Features, Footer, Hero, Highlights, Navbar, Performance, ProductViewer, Showcase,
};

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <PageMeta />

        <main>
            <Navbar />
            <Hero />
            <ProductViewer />
            <Showcase />
            <Performance />
            <Features />
            <Highlights />
            <Footer />
        </main>
    }
}

/// Title, icon and description of the page
#[component]
fn PageMeta() -> impl IntoView {
    view! {
        <Title text="Apple Macbook Pro" />
        <Meta name="description" content="MacBook Pro with the M4 family of chips." />
        <Link rel="icon" type_="image/svg+xml" href="/logo.svg" />
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use crate::core::sections::{SECTION_ORDER, Section};
    use crate::ui::store::provide_viewer_store;

    fn render_landing() -> String {
        let owner = Owner::new();
        owner.with(|| {
            leptos_meta::provide_meta_context();
            provide_viewer_store();
            view! { <LandingPage /> }.to_html()
        })
    }

    /// Where the root element of `section` starts in `html`.
    fn position(html: &str, section: Section) -> usize {
        let needle = match section.dom_id() {
            Some(id) => format!("<{} id=\"{id}\"", section.tag()),
            None => format!("<{}", section.tag()),
        };
        html.find(&needle)
            .unwrap_or_else(|| panic!("{section:?} not rendered"))
    }

    #[test]
    fn test_sections_render_in_order() {
        let html = render_landing();
        let positions: Vec<usize> = SECTION_ORDER.iter().map(|&s| position(&html, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(html.contains("<main>"));
    }

    #[test]
    fn test_static_content() {
        let html = render_landing();
        assert!(html.contains("Take a closer look."));
        assert!(html.contains("MacBookPro 16"));
        assert!(html.contains("Rocket Chip"));
        assert!(html.contains("Next-level graphics performance. Game on."));
        assert!(html.contains("gaming feels more immersive and realistic than ever."));
        assert!(html.contains("See it all in a new light."));
        assert!(html.contains("Copyright © 2024 Apple Inc. All rights reserved."));
        assert!(html.contains("Privacy Policy"));
    }

    #[test]
    fn test_performance_images_carry_their_id() {
        let html = render_landing();
        assert!(html.contains("class=\"p1\""));
        assert!(html.contains("alt=\"Performance Image #7\""));
        assert!(html.contains("/performance5.jpg"));
    }

    #[test]
    fn test_performance_renders_one_image_per_entry() {
        use crate::core::constants::PERFORMANCE_IMAGES;

        let html = render_landing();
        let start = html
            .find("<div class=\"wrapper\">")
            .expect("performance wrapper rendered");
        let wrapper = &html[start..];
        let wrapper = &wrapper[..wrapper.find("</div>").expect("wrapper closed")];

        let tags: Vec<&str> = wrapper
            .split("<img")
            .skip(1)
            .map(|rest| &rest[..rest.find('>').unwrap_or(rest.len())])
            .collect();
        assert_eq!(tags.len(), PERFORMANCE_IMAGES.len());
        for (index, (tag, image)) in tags.iter().zip(PERFORMANCE_IMAGES).enumerate() {
            assert!(tag.contains(&format!("src=\"{}\"", image.src)), "{tag}");
            assert!(
                tag.contains(&format!("alt=\"Performance Image #{}\"", index + 1)),
                "{tag}"
            );
        }
    }

    #[test]
    fn test_highlights_is_empty() {
        let html = render_landing();
        assert!(html.contains("<section id=\"highlights\"></section>"));
    }

    #[test]
    fn test_models_show_loading_until_hydrated() {
        let html = render_landing();
        assert!(html.contains("model-loading"));
        assert!(html.contains("id=\"f-canvas\""));
    }
}
