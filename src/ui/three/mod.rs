//! 3D viewers built on the JavaScript scene runtime.

pub mod canvas;
pub mod feature_model;
pub mod model_switcher;

pub use canvas::SceneCanvas;
pub use feature_model::FeatureScene;
pub use model_switcher::ProductScene;
