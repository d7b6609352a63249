//! Scroll-scrubbed animation: trigger geometry, timelines and the driver
//! that binds them to the page scroll offset.

pub mod driver;
pub mod timeline;
pub mod trigger;

pub use driver::{FrameOutput, Page, PinWrite, ScrollDriver, TimelineError, TimelineId};
pub use timeline::{
    CallEvent, CallId, Channel, Direction, PageState, Position, ResolvedTimeline, Snapshot, Target,
    Timeline, TweenDefaults, TweenStep, Vars, Write,
};
pub use trigger::{
    Edge, ElementBox, Landmark, ScrollTrigger, Scrub, TriggerBounds, pin_offset, progress,
};
