pub mod common;
pub mod frame;
pub mod icon;
pub mod media_query;
pub mod pages;
pub mod scene_runtime;
pub mod scroll;
pub mod sections;
pub mod store;
pub mod three;

pub use icon::{Icon, icons};
pub use media_query::{use_is_mobile, use_media_query};
pub use pages::{LandingPage, NotFoundPage};
pub use scroll::{install_listeners, use_scroll_timeline, use_scroll_timeline_with_calls};
pub use store::{ViewerStore, provide_viewer_store, use_viewer_store};
