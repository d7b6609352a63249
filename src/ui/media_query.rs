//! Reactive CSS media queries.
//!
//! Server renders always see the desktop layout; the browser corrects the
//! value right after hydration and follows changes from then on.

use leptos::prelude::*;

/// Viewports treated as mobile/tablet: no pinned or image timelines.
pub const MOBILE_QUERY: &str = "(max-width: 1024px)";

/// Track whether `query` currently matches.
pub fn use_media_query(query: &'static str) -> Signal<bool> {
    let matches = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        Effect::new(move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(Some(media_query)) = window.match_media(query) else {
                leptos::logging::debug_warn!("media query `{query}` is not supported");
                return;
            };
            matches.set(media_query.matches());

            let handler = Closure::<dyn Fn(web_sys::MediaQueryListEvent)>::new(
                move |e: web_sys::MediaQueryListEvent| {
                    let _ = matches.try_set(e.matches());
                },
            );
            let _ = media_query
                .add_event_listener_with_callback("change", handler.as_ref().unchecked_ref());

            // Keep the closure alive
            handler.forget();
        });
    }

    matches.into()
}

/// Shorthand for [`use_media_query`] with [`MOBILE_QUERY`].
pub fn use_is_mobile() -> Signal<bool> {
    use_media_query(MOBILE_QUERY)
}
