//! Product viewer state shared between the controls and the 3D scene.

use leptos::prelude::*;

use crate::core::{Finish, ModelSize};

/// Selected finish and size of the product viewer
#[derive(Clone, Copy)]
pub struct ViewerStore {
    pub finish: RwSignal<Finish>,
    pub size: RwSignal<ModelSize>,
}

impl ViewerStore {
    /// Model scale for the current size on the given viewport
    pub fn scale(&self, is_mobile: bool) -> f64 {
        self.size.get().scale(is_mobile)
    }

    /// Caption under the viewer heading, e.g. `MacBookPro 16" in Space Black`
    pub fn caption(&self) -> String {
        format!(
            "MacBookPro {} in {}",
            self.size.get().label(),
            self.finish.get().label()
        )
    }
}

/// Provide the viewer store to the component tree
pub fn provide_viewer_store() -> ViewerStore {
    let store = ViewerStore {
        finish: RwSignal::new(Finish::default()),
        size: RwSignal::new(ModelSize::default()),
    };
    provide_context(store);
    store
}

/// Use the viewer store from anywhere below the provider
pub fn use_viewer_store() -> ViewerStore {
    use_context::<ViewerStore>().expect("ViewerStore should be provided")
}
