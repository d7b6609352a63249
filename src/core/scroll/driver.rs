//! Scroll driver: owns every registered scroll timeline and turns scroll
//! offsets and frame ticks into channel writes.
//!
//! The driver never touches the DOM. It reads the page through [`Page`] during
//! [`ScrollDriver::refresh`] and hands back [`FrameOutput`]s for the caller to
//! apply.

use std::collections::BTreeMap;

use crate::core::scroll::timeline::{CallEvent, PageState, ResolvedTimeline, Target, Timeline, Write};
use crate::core::scroll::trigger::{ElementBox, TriggerBounds, pin_offset, progress};

/// Page access needed to measure triggers.
pub trait Page: PageState {
    fn viewport_height(&self) -> f64;
    /// Document-space box of the first element matching `selector`.
    fn element_box(&self, selector: &str) -> Option<ElementBox>;
    /// Drop any values previously written to `target` so fresh starting
    /// values can be read.
    fn revert(&mut self, target: &Target);
    /// Reserve scroll distance after a pinned element.
    fn set_pin_spacing(&mut self, selector: &str, spacing: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(u64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("timeline has no scroll trigger")]
    MissingTrigger,
}

/// Pinned element displacement for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PinWrite {
    pub selector: String,
    pub offset: f64,
}

/// Everything that changed since the previous frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    pub writes: Vec<Write>,
    pub calls: Vec<(TimelineId, CallEvent)>,
    pub pins: Vec<PinWrite>,
}

impl FrameOutput {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.calls.is_empty() && self.pins.is_empty()
    }
}

#[derive(Debug)]
struct Entry {
    timeline: Timeline,
    resolved: Option<ResolvedTimeline>,
    bounds: Option<TriggerBounds>,
    progress: f64,
    time: f64,
    pin: f64,
}

impl Entry {
    fn target_progress(&self, scroll: f64) -> Option<f64> {
        self.bounds.map(|bounds| progress(scroll, bounds))
    }

    fn is_pinned(&self) -> bool {
        self.timeline.trigger().is_some_and(|t| t.pin)
    }

    fn trigger_selector(&self) -> &str {
        self.timeline
            .trigger()
            .map(|t| t.trigger.as_str())
            .unwrap_or_default()
    }
}

/// Registry of scroll-bound timelines.
#[derive(Debug, Default)]
pub struct ScrollDriver {
    entries: BTreeMap<TimelineId, Entry>,
    next_id: u64,
    scroll: f64,
}

impl ScrollDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timeline. It stays inert until the next [`refresh`](Self::refresh).
    pub fn register(&mut self, timeline: Timeline) -> Result<TimelineId, TimelineError> {
        if timeline.trigger().is_none() {
            return Err(TimelineError::MissingTrigger);
        }
        let id = TimelineId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                timeline,
                resolved: None,
                bounds: None,
                progress: 0.0,
                time: 0.0,
                pin: 0.0,
            },
        );
        Ok(id)
    }

    /// Remove a timeline and revert everything it wrote: each tween target
    /// and, for a pinned trigger, the pinned element and its spacing.
    pub fn unregister(&mut self, id: TimelineId, page: &mut impl Page) -> Option<Timeline> {
        let entry = self.entries.remove(&id)?;
        for target in entry.timeline.targets() {
            page.revert(target);
        }
        if let Some(trigger) = entry.timeline.trigger().filter(|t| t.pin) {
            page.set_pin_spacing(&trigger.trigger, 0.0);
            page.revert(&Target::Selector(trigger.trigger.clone()));
        }
        Some(entry.timeline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TimelineId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.entries.get(&id).map(|e| &e.timeline)
    }

    pub fn progress(&self, id: TimelineId) -> Option<f64> {
        self.entries.get(&id).map(|e| e.progress)
    }

    pub fn bounds(&self, id: TimelineId) -> Option<TriggerBounds> {
        self.entries.get(&id).and_then(|e| e.bounds)
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn set_scroll(&mut self, offset: f64) {
        self.scroll = offset.max(0.0);
    }

    /// Re-measure every trigger and re-read starting values, then emit the
    /// frame for the current scroll offset without smoothing.
    ///
    /// Pinned triggers are measured first, top to bottom, because their
    /// spacing shifts everything below them.
    pub fn refresh(&mut self, page: &mut impl Page) -> FrameOutput {
        for entry in self.entries.values_mut() {
            let reread = entry.resolved.is_none()
                || entry
                    .timeline
                    .trigger()
                    .is_some_and(|t| t.invalidate_on_refresh);
            if reread {
                for track in entry.resolved.iter().flat_map(|r| r.tracks()) {
                    page.revert(&track.target);
                }
            }
            if entry.is_pinned() {
                let selector = Target::Selector(entry.trigger_selector().to_string());
                page.revert(&selector);
                page.set_pin_spacing(entry.trigger_selector(), 0.0);
                entry.pin = 0.0;
            }
        }

        let viewport = page.viewport_height();
        let mut pinned: Vec<(f64, TimelineId)> = Vec::new();
        let mut order: Vec<TimelineId> = Vec::new();
        for (id, entry) in &self.entries {
            if entry.is_pinned() {
                let top = page
                    .element_box(entry.trigger_selector())
                    .map_or(f64::INFINITY, |element| element.top);
                pinned.push((top, *id));
            } else {
                order.push(*id);
            }
        }
        pinned.sort_by(|a, b| a.0.total_cmp(&b.0));
        let order: Vec<TimelineId> = pinned
            .into_iter()
            .map(|(_, id)| id)
            .chain(order)
            .collect();

        for id in &order {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            let Some(trigger) = entry.timeline.trigger() else {
                continue;
            };
            entry.bounds = page
                .element_box(&trigger.trigger)
                .map(|element| TriggerBounds::measure(element, viewport, trigger.start, trigger.end));
            if trigger.pin {
                let spacing = entry.bounds.map_or(0.0, |b| b.distance());
                page.set_pin_spacing(&trigger.trigger, spacing);
            }
        }

        for entry in self.entries.values_mut() {
            let reread = entry.resolved.is_none()
                || entry
                    .timeline
                    .trigger()
                    .is_some_and(|t| t.invalidate_on_refresh);
            if reread {
                entry.resolved = Some(entry.timeline.resolve(&*page));
            }
        }

        self.emit(None, true)
    }

    /// Advance smoothing by `dt` seconds and emit what changed.
    pub fn tick(&mut self, dt: f64) -> FrameOutput {
        self.emit(Some(dt), false)
    }

    /// True when every timeline has caught up with the scroll position.
    pub fn is_settled(&self) -> bool {
        self.entries.values().all(|entry| {
            entry
                .target_progress(self.scroll)
                .is_none_or(|target| target == entry.progress)
        })
    }

    fn emit(&mut self, dt: Option<f64>, force: bool) -> FrameOutput {
        let mut out = FrameOutput::default();
        let scroll = self.scroll;
        for (id, entry) in self.entries.iter_mut() {
            let (Some(bounds), Some(resolved), Some(trigger)) =
                (entry.bounds, entry.resolved.as_ref(), entry.timeline.trigger())
            else {
                continue;
            };

            if trigger.pin {
                let offset = pin_offset(scroll, bounds);
                if force || offset != entry.pin {
                    entry.pin = offset;
                    out.pins.push(PinWrite {
                        selector: trigger.trigger.clone(),
                        offset,
                    });
                }
            }

            let target = progress(scroll, bounds);
            let next = match dt {
                Some(dt) => trigger.scrub.step(entry.progress, target, dt),
                None => target,
            };
            if !force && next == entry.progress {
                continue;
            }

            let time = next * entry.timeline.duration();
            out.writes.extend(resolved.sample(time));
            out.calls.extend(
                entry
                    .timeline
                    .calls_crossed(entry.time, time)
                    .into_iter()
                    .map(|call| (*id, call)),
            );
            entry.progress = next;
            entry.time = time;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::css::{Ease, ResolveContext};
    use crate::core::scroll::timeline::{
        CallId, Channel, Direction, Position, Snapshot, TweenDefaults, Vars,
    };
    use crate::core::scroll::trigger::{Edge, Landmark, ScrollTrigger, Scrub};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakePage {
        boxes: HashMap<String, ElementBox>,
        spacing: HashMap<String, f64>,
        reverted: Vec<Target>,
    }

    impl PageState for FakePage {
        fn snapshot(&self, _: &Target) -> Snapshot {
            Snapshot::default().with(Channel::Opacity, 0.0)
        }

        fn resolve_context(&self, _: &Target) -> ResolveContext {
            ResolveContext::default()
        }
    }

    impl Page for FakePage {
        fn viewport_height(&self) -> f64 {
            1000.0
        }

        fn element_box(&self, selector: &str) -> Option<ElementBox> {
            self.boxes.get(selector).copied()
        }

        fn revert(&mut self, target: &Target) {
            self.reverted.push(target.clone());
        }

        fn set_pin_spacing(&mut self, selector: &str, spacing: f64) {
            self.spacing.insert(selector.to_string(), spacing);
        }
    }

    fn page() -> FakePage {
        let mut page = FakePage::default();
        page.boxes.insert(
            "#section".into(),
            ElementBox {
                top: 1000.0,
                height: 1000.0,
            },
        );
        page
    }

    fn fade(scrub: Scrub) -> Timeline {
        Timeline::new()
            .defaults(TweenDefaults {
                duration: 1.0,
                ease: Ease::None,
            })
            .scroll_trigger(
                ScrollTrigger::new("#section")
                    .start(Landmark::new(Edge::Top, Edge::Top))
                    .end(Landmark::new(Edge::Bottom, Edge::Top))
                    .scrub(scrub),
            )
            .to(Target::selector(".fade"), Vars::new().opacity(1.0), Position::Append)
    }

    fn opacity(out: &FrameOutput) -> Option<f64> {
        out.writes
            .iter()
            .find(|w| w.channel == Channel::Opacity)
            .map(|w| w.value)
    }

    #[test]
    fn test_register_requires_trigger() {
        let mut driver = ScrollDriver::new();
        assert_eq!(
            driver.register(Timeline::new()),
            Err(TimelineError::MissingTrigger)
        );
        assert!(driver.is_empty());
    }

    #[test]
    fn test_immediate_scrub_tracks_scroll() {
        let mut driver = ScrollDriver::new();
        let id = driver.register(fade(Scrub::Immediate)).unwrap();
        let mut page = page();

        let out = driver.refresh(&mut page);
        assert_eq!(opacity(&out), Some(0.0));
        assert_eq!(
            driver.bounds(id),
            Some(TriggerBounds {
                start: 1000.0,
                end: 2000.0
            })
        );

        driver.set_scroll(1500.0);
        let out = driver.tick(0.016);
        assert_eq!(opacity(&out), Some(0.5));
        assert!(driver.is_settled());

        // no change, no writes
        assert!(driver.tick(0.016).is_empty());
    }

    #[test]
    fn test_smoothed_scrub_lags_then_settles() {
        let mut driver = ScrollDriver::new();
        driver.register(fade(Scrub::Smoothed(1.0))).unwrap();
        let mut page = page();
        driver.refresh(&mut page);

        driver.set_scroll(2000.0);
        let first = opacity(&driver.tick(1.0 / 60.0)).unwrap();
        assert!(first > 0.0 && first < 1.0);
        assert!(!driver.is_settled());

        for _ in 0..1200 {
            driver.tick(1.0 / 60.0);
        }
        assert!(driver.is_settled());
    }

    #[test]
    fn test_missing_trigger_element_is_inert() {
        let mut driver = ScrollDriver::new();
        driver.register(fade(Scrub::Immediate)).unwrap();
        let mut page = FakePage::default();
        assert!(driver.refresh(&mut page).is_empty());
        driver.set_scroll(1500.0);
        assert!(driver.tick(0.016).is_empty());
        assert!(driver.is_settled());
    }

    #[test]
    fn test_pin_spacing_and_offset() {
        let timeline = Timeline::new().scroll_trigger(
            ScrollTrigger::new("#section")
                .start(Landmark::new(Edge::Top, Edge::Top))
                .end(Landmark::new(Edge::Bottom, Edge::Top))
                .pin(),
        );
        let mut driver = ScrollDriver::new();
        driver.register(timeline).unwrap();
        let mut page = page();

        driver.refresh(&mut page);
        assert_eq!(page.spacing.get("#section"), Some(&1000.0));

        driver.set_scroll(1250.0);
        let out = driver.tick(0.016);
        assert_eq!(
            out.pins,
            vec![PinWrite {
                selector: "#section".into(),
                offset: 250.0
            }]
        );
    }

    #[test]
    fn test_calls_fire_on_crossing() {
        let timeline = fade(Scrub::Immediate).call(CallId(7), Position::At(0.5));
        let mut driver = ScrollDriver::new();
        let id = driver.register(timeline).unwrap();
        let mut page = page();
        driver.refresh(&mut page);

        driver.set_scroll(1600.0);
        let out = driver.tick(0.016);
        assert_eq!(out.calls.len(), 1);
        assert_eq!(out.calls[0].0, id);
        assert_eq!(out.calls[0].1.direction, Direction::Forward);

        driver.set_scroll(1000.0);
        let out = driver.tick(0.016);
        assert_eq!(out.calls[0].1.direction, Direction::Backward);
    }

    #[test]
    fn test_refresh_reverts_written_targets_when_invalidating() {
        let timeline = fade(Scrub::Immediate);
        let trigger = timeline.trigger().cloned().unwrap().invalidate_on_refresh();
        let timeline = timeline.scroll_trigger(trigger);

        let mut driver = ScrollDriver::new();
        driver.register(timeline).unwrap();
        let mut page = page();
        driver.refresh(&mut page);
        assert!(page.reverted.is_empty());

        driver.refresh(&mut page);
        assert_eq!(page.reverted, vec![Target::selector(".fade")]);
    }

    #[test]
    fn test_unregister_reverts_targets_and_pin() {
        let timeline = fade(Scrub::Immediate)
            .to(Target::selector(".rise"), Vars::new().y(-20.0), Position::At(0.0));
        let trigger = timeline.trigger().cloned().unwrap().pin();
        let timeline = timeline.scroll_trigger(trigger);

        let mut driver = ScrollDriver::new();
        let mut page = page();
        let id = driver.register(timeline).unwrap();
        assert!(driver.contains(id));
        driver.refresh(&mut page);
        assert_eq!(page.spacing.get("#section"), Some(&1000.0));
        page.reverted.clear();

        assert!(driver.unregister(id, &mut page).is_some());
        assert!(!driver.contains(id));
        assert_eq!(
            page.reverted,
            vec![
                Target::selector(".fade"),
                Target::selector(".rise"),
                Target::selector("#section"),
            ]
        );
        assert_eq!(page.spacing.get("#section"), Some(&0.0));
        assert!(driver.unregister(id, &mut page).is_none());
    }

    /// Boxes below a pinned element move down by its spacing.
    #[derive(Default)]
    struct FlowPage {
        tops: HashMap<String, f64>,
        spacing: HashMap<String, f64>,
    }

    impl PageState for FlowPage {
        fn snapshot(&self, _: &Target) -> Snapshot {
            Snapshot::default()
        }

        fn resolve_context(&self, _: &Target) -> ResolveContext {
            ResolveContext::default()
        }
    }

    impl Page for FlowPage {
        fn viewport_height(&self) -> f64 {
            1000.0
        }

        fn element_box(&self, selector: &str) -> Option<ElementBox> {
            let top = *self.tops.get(selector)?;
            let shift: f64 = self
                .spacing
                .iter()
                .filter(|(above, _)| self.tops.get(above.as_str()).is_some_and(|t| *t < top))
                .map(|(_, spacing)| spacing)
                .sum();
            Some(ElementBox {
                top: top + shift,
                height: 1000.0,
            })
        }

        fn revert(&mut self, _: &Target) {}

        fn set_pin_spacing(&mut self, selector: &str, spacing: f64) {
            self.spacing.insert(selector.to_string(), spacing);
        }
    }

    #[test]
    fn test_pins_measured_in_document_order() {
        let pinned = |selector: &str| {
            Timeline::new().scroll_trigger(
                ScrollTrigger::new(selector)
                    .start(Landmark::new(Edge::Top, Edge::Top))
                    .end(Landmark::new(Edge::Bottom, Edge::Top))
                    .pin(),
            )
        };
        let mut page = FlowPage::default();
        page.tops.insert("#upper".into(), 1000.0);
        page.tops.insert("#lower".into(), 5000.0);

        // the lower section registers first, as after a breakpoint round trip
        let mut driver = ScrollDriver::new();
        let lower = driver.register(pinned("#lower")).unwrap();
        let upper = driver.register(pinned("#upper")).unwrap();
        driver.refresh(&mut page);

        assert_eq!(
            driver.bounds(upper),
            Some(TriggerBounds {
                start: 1000.0,
                end: 2000.0
            })
        );
        assert_eq!(
            driver.bounds(lower),
            Some(TriggerBounds {
                start: 6000.0,
                end: 7000.0
            })
        );
    }
}
