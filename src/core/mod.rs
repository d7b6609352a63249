//! Core page logic: content data, layout validation, scroll timelines and
//! the 3D viewer state. Nothing in here touches the DOM.

#[cfg(feature = "ssr")]
pub mod config;
pub mod constants;
pub mod css;
pub mod layout;
pub mod model_switcher;
pub mod plugin;
pub mod scene;
pub mod scroll;
pub mod section_timelines;
pub mod sections;
pub mod tween;

pub use layout::{LayoutError, PerformanceLayout};
pub use model_switcher::{Finish, ModelSize, ModelSwitcher, ModelVariant};
pub use scene::{Color, GroupId, SceneRuntime};
pub use scroll::{ScrollDriver, Timeline, TimelineError};
