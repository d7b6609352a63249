use leptos::prelude::*;

/// The intro clip plays faster than recorded
const HERO_PLAYBACK_RATE: f64 = 2.0;

#[component]
pub fn Hero() -> impl IntoView {
    let video_ref = NodeRef::<leptos::html::Video>::new();

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        if let Some(video) = video_ref.get() {
            video.set_playback_rate(HERO_PLAYBACK_RATE);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = HERO_PLAYBACK_RATE;

    view! {
        <section id="hero">
            <div>
                <h1>"MacBook Pro"</h1>
                <img src="/title.png" alt="MacBook Title" />
            </div>
            <video
                node_ref=video_ref
                src="/videos/hero.mp4"
                autoplay=true
                muted=true
                playsinline=true
            ></video>
            <button>"Buy"</button>
            <p>"From $1599 or $133/mo for 12 months"</p>
        </section>
    }
}
