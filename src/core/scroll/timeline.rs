//! Timelines: ordered tween steps and callbacks laid out on a time axis.
//!
//! A [`Timeline`] is a declaration. Before it can be sampled it is resolved
//! against the page ([`Timeline::resolve`]): starting values are read from the
//! elements and percentages become pixels. Resolution is repeated whenever
//! the layout is invalidated.

use std::collections::BTreeMap;

use crate::core::css::{CssValue, Ease, Offset, PartialTransform, ResolveContext, lerp};
use crate::core::scene::GroupId;
use crate::core::scroll::trigger::ScrollTrigger;

/// What a tween writes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Every element matching a CSS selector.
    Selector(String),
    /// A model group in the 3D scene.
    Model(GroupId),
}

impl Target {
    pub fn selector(selector: impl Into<String>) -> Self {
        Target::Selector(selector.into())
    }

    pub fn as_selector(&self) -> Option<&str> {
        match self {
            Target::Selector(s) => Some(s),
            Target::Model(_) => None,
        }
    }
}

/// A single animatable scalar of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Offset(Offset),
    Opacity,
    X,
    Y,
    Scale,
    Rotate,
    RotationY,
}

impl Channel {
    /// Value assumed when the page does not report one.
    pub fn neutral(&self) -> f64 {
        match self {
            Channel::Opacity | Channel::Scale => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_transform(&self) -> bool {
        matches!(self, Channel::X | Channel::Y | Channel::Scale | Channel::Rotate)
    }
}

/// Target values of a tween, plus per-step timing overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vars {
    pub offsets: Vec<(Offset, CssValue)>,
    pub opacity: Option<f64>,
    pub transform: PartialTransform,
    pub rotation_y: Option<f64>,
    pub duration: Option<f64>,
    pub ease: Option<Ease>,
    pub delay: f64,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: Offset, value: CssValue) -> Self {
        self.offsets.retain(|(o, _)| *o != offset);
        self.offsets.push((offset, value));
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.transform.y = Some(y);
        self
    }

    pub fn transform(mut self, transform: PartialTransform) -> Self {
        self.transform = self.transform.merge(&transform);
        self
    }

    pub fn rotation_y(mut self, radians: f64) -> Self {
        self.rotation_y = Some(radians);
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// The value set for an offset, if any.
    pub fn offset_value(&self, offset: Offset) -> Option<CssValue> {
        self.offsets
            .iter()
            .find(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
    }

    /// Flatten into resolved channel values.
    pub fn channels(&self, ctx: ResolveContext) -> Vec<(Channel, f64)> {
        let mut out: Vec<(Channel, f64)> = self
            .offsets
            .iter()
            .map(|(offset, value)| (Channel::Offset(*offset), ctx.resolve(*offset, *value)))
            .collect();
        out.extend(self.opacity.map(|v| (Channel::Opacity, v)));
        out.extend(self.transform.x.map(|v| (Channel::X, v)));
        out.extend(self.transform.y.map(|v| (Channel::Y, v)));
        out.extend(self.transform.scale.map(|v| (Channel::Scale, v)));
        out.extend(self.transform.rotate.map(|v| (Channel::Rotate, v)));
        out.extend(self.rotation_y.map(|v| (Channel::RotationY, v)));
        out
    }
}

/// Timing applied to steps that do not override it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenDefaults {
    pub duration: f64,
    pub ease: Ease,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::Power1Out,
        }
    }
}

/// Where a step is placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// After the current end of the timeline.
    Append,
    /// At an absolute time.
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TweenStep {
    pub target: Target,
    pub from: Option<Vars>,
    pub to: Vars,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl TweenStep {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Identifies a callback registered on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallStep {
    pub id: CallId,
    pub at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEvent {
    pub id: CallId,
    pub direction: Direction,
}

/// A declared sequence of tweens and callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    trigger: Option<ScrollTrigger>,
    defaults: TweenDefaults,
    tweens: Vec<TweenStep>,
    calls: Vec<CallStep>,
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(mut self, defaults: TweenDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn scroll_trigger(mut self, trigger: ScrollTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Tween `target` from its current values to `vars`.
    pub fn to(self, target: Target, vars: Vars, position: Position) -> Self {
        self.push(target, None, vars, position)
    }

    /// Tween `target` from `from` to `to`; `from` is applied before the step starts.
    pub fn from_to(self, target: Target, from: Vars, to: Vars, position: Position) -> Self {
        self.push(target, Some(from), to, position)
    }

    pub fn call(mut self, id: CallId, position: Position) -> Self {
        let at = self.place(position);
        self.calls.push(CallStep { id, at });
        self.end = self.end.max(at);
        self
    }

    fn place(&self, position: Position) -> f64 {
        match position {
            Position::Append => self.end,
            Position::At(t) => t.max(0.0),
        }
    }

    fn push(mut self, target: Target, from: Option<Vars>, to: Vars, position: Position) -> Self {
        let start = self.place(position) + to.delay;
        let step = TweenStep {
            target,
            duration: to.duration.unwrap_or(self.defaults.duration).max(0.0),
            ease: to.ease.unwrap_or(self.defaults.ease),
            from,
            to,
            start,
        };
        self.end = self.end.max(step.end());
        self.tweens.push(step);
        self
    }

    pub fn trigger(&self) -> Option<&ScrollTrigger> {
        self.trigger.as_ref()
    }

    pub fn tweens(&self) -> &[TweenStep] {
        &self.tweens
    }

    /// Every distinct tween target, in first-use order.
    pub fn targets(&self) -> Vec<&Target> {
        let mut targets: Vec<&Target> = Vec::new();
        for step in &self.tweens {
            if !targets.contains(&&step.target) {
                targets.push(&step.target);
            }
        }
        targets
    }

    pub fn calls(&self) -> &[CallStep] {
        &self.calls
    }

    /// Total length of the timeline in seconds.
    pub fn duration(&self) -> f64 {
        self.end
    }

    /// Callbacks crossed when moving the playhead from `from` to `to`.
    ///
    /// A callback at `at` is crossed when `at` lies in `(min, max]` of the two times.
    pub fn calls_crossed(&self, from: f64, to: f64) -> Vec<CallEvent> {
        if from == to {
            return Vec::new();
        }
        let (direction, lo, hi) = if to > from {
            (Direction::Forward, from, to)
        } else {
            (Direction::Backward, to, from)
        };
        let mut crossed: Vec<&CallStep> = self
            .calls
            .iter()
            .filter(|c| c.at > lo && c.at <= hi)
            .collect();
        crossed.sort_by(|a, b| a.at.total_cmp(&b.at));
        if direction == Direction::Backward {
            crossed.reverse();
        }
        crossed
            .into_iter()
            .map(|c| CallEvent { id: c.id, direction })
            .collect()
    }

    /// Read starting values from the page and fix every segment's endpoints.
    pub fn resolve(&self, page: &impl PageState) -> ResolvedTimeline {
        let mut steps: Vec<&TweenStep> = self.tweens.iter().collect();
        steps.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut tracks: BTreeMap<(Target, Channel), Track> = BTreeMap::new();
        for step in steps {
            let ctx = page.resolve_context(&step.target);
            let explicit_from: BTreeMap<Channel, f64> = step
                .from
                .as_ref()
                .map(|from| from.channels(ctx).into_iter().collect())
                .unwrap_or_default();
            for (channel, to) in step.to.channels(ctx) {
                let key = (step.target.clone(), channel);
                let track = tracks.entry(key).or_insert_with(|| Track {
                    target: step.target.clone(),
                    channel,
                    initial: page.snapshot(&step.target).get(channel),
                    segments: Vec::new(),
                });
                let from = explicit_from.get(&channel).copied().unwrap_or_else(|| {
                    track.segments.last().map_or(track.initial, |s: &Segment| s.to)
                });
                track.segments.push(Segment {
                    start: step.start,
                    duration: step.duration,
                    ease: step.ease,
                    from,
                    to,
                });
            }
        }

        ResolvedTimeline {
            tracks: tracks.into_values().collect(),
        }
    }
}

/// Read access to the page used when resolving a timeline.
pub trait PageState {
    /// Current values of a target's channels.
    fn snapshot(&self, target: &Target) -> Snapshot;
    /// Sizes that percentages on this target refer to.
    fn resolve_context(&self, target: &Target) -> ResolveContext;
}

/// Channel values read from the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    values: BTreeMap<Channel, f64>,
}

impl Snapshot {
    pub fn with(mut self, channel: Channel, value: f64) -> Self {
        self.values.insert(channel, value);
        self
    }

    pub fn get(&self, channel: Channel) -> f64 {
        self.values
            .get(&channel)
            .copied()
            .unwrap_or_else(|| channel.neutral())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub from: f64,
    pub to: f64,
}

impl Segment {
    pub fn value_at(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return if time >= self.start { self.to } else { self.from };
        }
        let t = ((time - self.start) / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.ease.apply(t))
    }
}

/// All segments that write one channel of one target, in start order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub target: Target,
    pub channel: Channel,
    pub initial: f64,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn value_at(&self, time: f64) -> f64 {
        match self.segments.iter().rev().find(|s| s.start <= time) {
            Some(segment) => segment.value_at(time),
            None => self.segments.first().map_or(self.initial, |s| s.from),
        }
    }
}

/// A single channel value to write to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub target: Target,
    pub channel: Channel,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedTimeline {
    tracks: Vec<Track>,
}

impl ResolvedTimeline {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Channel values at `time`.
    pub fn sample(&self, time: f64) -> Vec<Write> {
        self.tracks
            .iter()
            .map(|track| Write {
                target: track.target.clone(),
                channel: track.channel,
                value: track.value_at(time),
            })
            .collect()
    }
}
