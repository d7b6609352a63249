//! Scroll trigger geometry.
//!
//! A trigger turns a page scroll offset into timeline progress. Its region is
//! described by two landmarks ("when the element's top meets the viewport's
//! bottom", ...), measured against the trigger element's box in document
//! coordinates.

use std::fmt;
use std::str::FromStr;

/// Edge of a box along the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    pub fn fraction(&self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }
}

impl FromStr for Edge {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            other => Err(TriggerParseError::UnknownEdge(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriggerParseError {
    #[error("unknown edge `{0}`")]
    UnknownEdge(String),
    #[error("landmark must be `<element edge> <viewport edge>`, got `{0}`")]
    Malformed(String),
}

/// The moment an element edge lines up with a viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    pub element: Edge,
    pub viewport: Edge,
}

impl Landmark {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this landmark is reached.
    pub fn scroll_offset(&self, element: ElementBox, viewport_height: f64) -> f64 {
        element.top + self.element.fraction() * element.height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for Landmark {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => {
                Ok(Landmark::new(element.parse()?, viewport.parse()?))
            }
            _ => Err(TriggerParseError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// An element's vertical extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

/// Scroll offsets where a trigger's region starts and ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriggerBounds {
    pub start: f64,
    pub end: f64,
}

impl TriggerBounds {
    pub fn measure(element: ElementBox, viewport_height: f64, start: Landmark, end: Landmark) -> Self {
        Self {
            start: start.scroll_offset(element, viewport_height),
            end: end.scroll_offset(element, viewport_height),
        }
    }

    pub fn distance(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Timeline progress for a scroll offset, in `[0, 1]`.
///
/// A zero-length region behaves as a step at `start`.
pub fn progress(scroll_offset: f64, bounds: TriggerBounds) -> f64 {
    let distance = bounds.end - bounds.start;
    if distance <= 0.0 {
        return if scroll_offset >= bounds.start { 1.0 } else { 0.0 };
    }
    ((scroll_offset - bounds.start) / distance).clamp(0.0, 1.0)
}

/// How far a pinned element must be pushed down to stay in place.
pub fn pin_offset(scroll_offset: f64, bounds: TriggerBounds) -> f64 {
    (scroll_offset - bounds.start).clamp(0.0, bounds.distance())
}

/// How progress follows the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scrub {
    /// Progress tracks scroll exactly.
    #[default]
    Immediate,
    /// Progress eases toward scroll, catching up in roughly this many seconds.
    Smoothed(f64),
}

impl Scrub {
    /// Advance `current` toward `target` over `dt` seconds.
    pub fn step(&self, current: f64, target: f64, dt: f64) -> f64 {
        match *self {
            Scrub::Immediate => target,
            Scrub::Smoothed(lag) if lag <= 0.0 => target,
            Scrub::Smoothed(lag) => {
                let alpha = 1.0 - (-dt * SMOOTHING_RATE / lag).exp();
                let next = current + (target - current) * alpha;
                if (target - next).abs() < SETTLE_EPSILON {
                    target
                } else {
                    next
                }
            }
        }
    }
}

const SMOOTHING_RATE: f64 = 4.0;
const SETTLE_EPSILON: f64 = 1e-4;

/// Binds a timeline to a scroll region.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    /// CSS selector of the element whose box defines the region.
    pub trigger: String,
    pub start: Landmark,
    pub end: Landmark,
    pub scrub: Scrub,
    pub pin: bool,
    pub invalidate_on_refresh: bool,
}

impl ScrollTrigger {
    /// A trigger spanning "top bottom" to "bottom top", scrubbed directly.
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            start: Landmark::new(Edge::Top, Edge::Bottom),
            end: Landmark::new(Edge::Bottom, Edge::Top),
            scrub: Scrub::Immediate,
            pin: false,
            invalidate_on_refresh: false,
        }
    }

    pub fn start(mut self, start: Landmark) -> Self {
        self.start = start;
        self
    }

    pub fn end(mut self, end: Landmark) -> Self {
        self.end = end;
        self
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn pin(mut self) -> Self {
        self.pin = true;
        self
    }

    pub fn invalidate_on_refresh(mut self) -> Self {
        self.invalidate_on_refresh = true;
        self
    }
}
