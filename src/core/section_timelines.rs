//! Scroll timelines of the page sections.
//!
//! Each builder returns `None` when the section renders statically for the
//! given viewport.

use std::f64::consts::TAU;

use crate::core::constants::FEATURE_SEQUENCE;
use crate::core::css::{Ease, PartialTransform};
use crate::core::layout::PerformanceLayout;
use crate::core::scene::GroupId;
use crate::core::scroll::{
    CallEvent, CallId, Direction, Edge, Landmark, Position, ScrollTrigger, Scrub, Target, Timeline, TweenDefaults, Vars,
};

const TOP_BOTTOM: Landmark = Landmark::new(Edge::Top, Edge::Bottom);
const TOP_TOP: Landmark = Landmark::new(Edge::Top, Edge::Top);
const TOP_CENTER: Landmark = Landmark::new(Edge::Top, Edge::Center);
const CENTER_CENTER: Landmark = Landmark::new(Edge::Center, Edge::Center);
const BOTTOM_TOP: Landmark = Landmark::new(Edge::Bottom, Edge::Top);

pub const PERFORMANCE_SECTION: &str = "#performance";
pub const PERFORMANCE_TEXT: &str = "#performance .content p";
pub const SHOWCASE_SECTION: &str = "#showcase";
pub const FEATURES_CANVAS: &str = "#f-canvas";

/// Selector of a performance image; images carry their id as class.
pub fn performance_image_selector(id: &str) -> String {
    format!("{PERFORMANCE_SECTION} .{id}")
}

/// Images fly from their resting spot to their configured position while the
/// section scrolls into view. Nothing is registered on small viewports or
/// when no image animates.
pub fn performance_timeline(layout: &PerformanceLayout, is_mobile: bool) -> Option<Timeline> {
    if is_mobile || layout.animated().next().is_none() {
        return None;
    }

    let trigger = ScrollTrigger::new(PERFORMANCE_SECTION)
        .start(TOP_BOTTOM)
        .end(CENTER_CENTER)
        .scrub(Scrub::Smoothed(1.0))
        .invalidate_on_refresh();

    let timeline = Timeline::new()
        .defaults(TweenDefaults {
            duration: 2.0,
            ease: Ease::Power1InOut,
        })
        .scroll_trigger(trigger);

    Some(layout.animated().fold(timeline, |timeline, placed| {
        let mut vars = placed
            .position
            .offsets()
            .into_iter()
            .fold(Vars::new(), |vars, (offset, value)| vars.offset(offset, value));
        if let Some(transform) = &placed.transform {
            vars = vars.transform(*transform);
        }
        timeline.to(
            Target::selector(performance_image_selector(placed.image.id)),
            vars,
            Position::At(0.0),
        )
    }))
}

/// Fade-up of the performance copy. Runs on every viewport size.
pub fn performance_text_timeline() -> Timeline {
    let trigger = ScrollTrigger::new(PERFORMANCE_TEXT)
        .start(TOP_BOTTOM)
        .end(TOP_CENTER)
        .scrub(Scrub::Immediate)
        .invalidate_on_refresh();

    Timeline::new().scroll_trigger(trigger).from_to(
        Target::selector(PERFORMANCE_TEXT),
        Vars::new().opacity(0.0).y(10.0),
        Vars::new().opacity(1.0).y(0.0).ease(Ease::Power1Out),
        Position::Append,
    )
}

/// Pinned showcase: the logo mask grows, then the copy fades in.
pub fn showcase_timeline(is_tablet: bool) -> Option<Timeline> {
    if is_tablet {
        return None;
    }

    let trigger = ScrollTrigger::new(SHOWCASE_SECTION)
        .start(TOP_TOP)
        .end(BOTTOM_TOP)
        .scrub(Scrub::Immediate)
        .pin();

    Some(
        Timeline::new()
            .scroll_trigger(trigger)
            .to(
                Target::selector(format!("{SHOWCASE_SECTION} .mask img")),
                Vars::new().transform(PartialTransform::scale(1.1)),
                Position::Append,
            )
            .to(
                Target::selector(format!("{SHOWCASE_SECTION} .content")),
                Vars::new().opacity(1.0).y(0.0).ease(Ease::Power1In),
                Position::Append,
            ),
    )
}

/// Call id of the step that shows `FEATURE_SEQUENCE[index]`.
pub fn feature_call(index: usize) -> CallId {
    CallId(index as u32)
}

/// Inverse of [`feature_call`].
pub fn feature_index(call: CallId) -> Option<usize> {
    let index = call.0 as usize;
    (index < FEATURE_SEQUENCE.len()).then_some(index)
}

/// Video the feature model should show after `event`. Scrolling back past a
/// step restores the previous step's video.
pub fn feature_video_for(event: CallEvent) -> Option<&'static str> {
    let index = feature_index(event.id)?;
    let shown = match event.direction {
        Direction::Forward => index,
        Direction::Backward => index.checked_sub(1)?,
    };
    FEATURE_SEQUENCE.get(shown).map(|entry| entry.video_path)
}

/// Pinned feature tour: one full turn of the model, then each feature's
/// video is put on screen and its card revealed.
pub fn features_timeline(is_mobile: bool) -> Option<Timeline> {
    if is_mobile {
        return None;
    }

    let trigger = ScrollTrigger::new(FEATURES_CANVAS)
        .start(TOP_TOP)
        .end(BOTTOM_TOP)
        .scrub(Scrub::Smoothed(1.0))
        .pin();

    let timeline = Timeline::new().scroll_trigger(trigger).to(
        Target::Model(GroupId::Feature),
        Vars::new().rotation_y(TAU).ease(Ease::Power1InOut),
        Position::Append,
    );

    Some(
        FEATURE_SEQUENCE
            .iter()
            .enumerate()
            .fold(timeline, |timeline, (index, entry)| {
                timeline.call(feature_call(index), Position::Append).to(
                    Target::selector(entry.box_class),
                    Vars::new().opacity(1.0).y(0.0).delay(entry.delay),
                    Position::Append,
                )
            }),
    )
}
