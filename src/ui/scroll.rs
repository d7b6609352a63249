//! Browser side of the scroll driver.
//!
//! One [`ScrollDriver`] per page lives in a thread-local. Components register
//! timelines through [`use_scroll_timeline`]; a single scroll listener and a
//! single resize listener (installed once by [`install_listeners`]) keep it
//! fed, and frames are requested only while some timeline is still catching
//! up with the scroll position.

use leptos::prelude::*;

use crate::core::scene::GroupId;
use crate::core::scroll::{CallEvent, Channel, Timeline};

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::collections::HashMap;
#[cfg(feature = "hydrate")]
use std::rc::Rc;
#[cfg(feature = "hydrate")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

#[cfg(feature = "hydrate")]
use crate::core::css::{CssValue, Offset, PartialTransform, ResolveContext, Transform};
#[cfg(feature = "hydrate")]
use crate::core::scroll::{
    ElementBox, FrameOutput, Page, PageState, ScrollDriver, Snapshot, Target, TimelineId,
};
#[cfg(feature = "hydrate")]
use crate::ui::frame::run_frames;

#[cfg(feature = "hydrate")]
type CallHandler = Box<dyn Fn(CallEvent)>;
#[cfg(feature = "hydrate")]
type ModelSink = Box<dyn Fn(Channel, f64)>;

/// Inline properties the driver may have written.
#[cfg(feature = "hydrate")]
const WRITTEN_PROPERTIES: [&str; 7] = [
    "left",
    "right",
    "top",
    "bottom",
    "opacity",
    "transform",
    "translate",
];

#[cfg(feature = "hydrate")]
thread_local! {
    static DRIVER: RefCell<ScrollDriver> = RefCell::new(ScrollDriver::new());
    static CALL_HANDLERS: RefCell<HashMap<TimelineId, CallHandler>> = RefCell::new(HashMap::new());
    static MODEL_SINKS: RefCell<HashMap<GroupId, ModelSink>> = RefCell::new(HashMap::new());
    // Transform of each animated selector as last read or written
    static TRANSFORMS: RefCell<HashMap<String, Transform>> = RefCell::new(HashMap::new());
    static FRAME_PENDING: Cell<bool> = const { Cell::new(false) };
    static REFRESH_PENDING: Cell<bool> = const { Cell::new(false) };
    static LISTENERS: RefCell<Vec<WindowListenerHandle>> = const { RefCell::new(Vec::new()) };
}

#[cfg(feature = "hydrate")]
struct DomPage {
    window: web_sys::Window,
    document: web_sys::Document,
}

#[cfg(feature = "hydrate")]
impl DomPage {
    fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn first(&self, selector: &str) -> Option<web_sys::HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into().ok())
    }

    fn elements(&self, selector: &str) -> Vec<web_sys::HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            leptos::logging::debug_warn!("invalid selector `{selector}`");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into().ok())
            .collect()
    }

    fn set_all(&self, selector: &str, property: &str, value: &str) {
        for element in self.elements(selector) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn apply(&self, frame: FrameOutput) {
        let mut transforms: HashMap<&str, PartialTransform> = HashMap::new();
        for write in &frame.writes {
            let selector = match &write.target {
                Target::Model(group) => {
                    MODEL_SINKS.with(|sinks| {
                        if let Some(sink) = sinks.borrow().get(group) {
                            sink(write.channel, write.value);
                        }
                    });
                    continue;
                }
                Target::Selector(selector) => selector.as_str(),
            };
            match write.channel {
                Channel::Offset(offset) => {
                    self.set_all(selector, offset.css_name(), &format!("{}px", write.value))
                }
                Channel::Opacity => self.set_all(selector, "opacity", &write.value.to_string()),
                Channel::X => transforms.entry(selector).or_default().x = Some(write.value),
                Channel::Y => transforms.entry(selector).or_default().y = Some(write.value),
                Channel::Scale => transforms.entry(selector).or_default().scale = Some(write.value),
                Channel::Rotate => {
                    transforms.entry(selector).or_default().rotate = Some(write.value)
                }
                // elements have no depth axis
                Channel::RotationY => {}
            }
        }

        for (selector, partial) in transforms {
            let transform = TRANSFORMS.with(|cache| {
                let mut cache = cache.borrow_mut();
                let entry = cache.entry(selector.to_string()).or_default();
                *entry = entry.with(&partial);
                *entry
            });
            self.set_all(selector, "transform", &transform.to_string());
        }

        for pin in &frame.pins {
            if let Some(element) = self.first(&pin.selector) {
                let _ = element
                    .style()
                    .set_property("translate", &format!("0 {}px", pin.offset));
            }
        }

        for (id, event) in frame.calls {
            CALL_HANDLERS.with(|handlers| {
                if let Some(handler) = handlers.borrow().get(&id) {
                    handler(event);
                }
            });
        }
    }
}

#[cfg(feature = "hydrate")]
impl PageState for DomPage {
    fn snapshot(&self, target: &Target) -> Snapshot {
        // model groups always start from their rest pose
        let Some(selector) = target.as_selector() else {
            return Snapshot::default();
        };
        let Some(element) = self.first(selector) else {
            return Snapshot::default();
        };
        let Ok(Some(style)) = self.window.get_computed_style(&element) else {
            return Snapshot::default();
        };
        let computed = |property: &str| {
            style
                .get_property_value(property)
                .ok()
                .and_then(|raw| CssValue::parse_computed(&raw))
        };

        let mut snapshot = Snapshot::default();
        for offset in [Offset::Left, Offset::Right, Offset::Top, Offset::Bottom] {
            if let Some(value) = computed(offset.css_name()) {
                snapshot = snapshot.with(Channel::Offset(offset), value.resolve(0.0));
            }
        }
        if let Some(opacity) = computed("opacity") {
            snapshot = snapshot.with(Channel::Opacity, opacity.resolve(1.0));
        }

        let transform = style
            .get_property_value("transform")
            .map(|raw| Transform::from_computed(&raw))
            .unwrap_or_default();
        TRANSFORMS.with(|cache| cache.borrow_mut().insert(selector.to_string(), transform));
        snapshot
            .with(Channel::X, transform.x)
            .with(Channel::Y, transform.y)
            .with(Channel::Scale, transform.scale)
            .with(Channel::Rotate, transform.rotate)
    }

    fn resolve_context(&self, target: &Target) -> ResolveContext {
        let container = target
            .as_selector()
            .and_then(|selector| self.first(selector))
            .and_then(|element| element.offset_parent());
        match container {
            Some(container) => ResolveContext {
                container_width: f64::from(container.client_width()),
                container_height: f64::from(container.client_height()),
            },
            None => ResolveContext {
                container_width: self.viewport_width(),
                container_height: self.viewport_height(),
            },
        }
    }
}

#[cfg(feature = "hydrate")]
impl Page for DomPage {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn element_box(&self, selector: &str) -> Option<ElementBox> {
        let element = self.document.query_selector(selector).ok().flatten()?;
        let rect = element.get_bounding_client_rect();
        Some(ElementBox {
            top: rect.top() + self.scroll_y(),
            height: rect.height(),
        })
    }

    fn revert(&mut self, target: &Target) {
        let Some(selector) = target.as_selector() else {
            return;
        };
        for element in self.elements(selector) {
            let style = element.style();
            for property in WRITTEN_PROPERTIES {
                let _ = style.remove_property(property);
            }
        }
        TRANSFORMS.with(|cache| cache.borrow_mut().remove(selector));
    }

    fn set_pin_spacing(&mut self, selector: &str, spacing: f64) {
        let Some(element) = self.first(selector) else {
            return;
        };
        let style = element.style();
        // margin keeps the measured height of the pinned box unchanged
        if spacing > 0.0 {
            let _ = style.set_property("margin-bottom", &format!("{spacing}px"));
        } else {
            let _ = style.remove_property("margin-bottom");
        }
    }
}

/// Step the driver once per frame until it settles.
#[cfg(feature = "hydrate")]
fn schedule_frames() {
    if FRAME_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    run_frames(|dt| {
        let Some(mut page) = DomPage::new() else {
            FRAME_PENDING.with(|pending| pending.set(false));
            return false;
        };
        let refresh = REFRESH_PENDING.with(|pending| pending.replace(false));
        let (frame, settled) = DRIVER.with(|driver| {
            let mut driver = driver.borrow_mut();
            driver.set_scroll(page.scroll_y());
            let frame = if refresh {
                driver.refresh(&mut page)
            } else {
                driver.tick(dt)
            };
            (frame, driver.is_settled())
        });
        page.apply(frame);

        let again = !settled || REFRESH_PENDING.with(Cell::get);
        if !again {
            FRAME_PENDING.with(|pending| pending.set(false));
        }
        again
    });
}

/// Re-measure every trigger on the next frame. Requests made during the same
/// frame collapse into one refresh.
pub fn request_refresh() {
    #[cfg(feature = "hydrate")]
    {
        REFRESH_PENDING.with(|pending| pending.set(true));
        schedule_frames();
    }
}

/// Install the page-wide scroll and resize listeners.
pub fn install_listeners() {
    #[cfg(feature = "hydrate")]
    {
        let scroll = window_event_listener(leptos::ev::scroll, move |_| schedule_frames());
        let resize = window_event_listener(leptos::ev::resize, move |_| request_refresh());
        LISTENERS.with(|listeners| listeners.borrow_mut().extend([scroll, resize]));
        leptos::logging::log!("scroll triggers installed");
    }
}

#[cfg(feature = "hydrate")]
fn register(timeline: Timeline, on_call: CallHandler) -> Option<TimelineId> {
    match DRIVER.with(|driver| driver.borrow_mut().register(timeline)) {
        Ok(id) => {
            CALL_HANDLERS.with(|handlers| handlers.borrow_mut().insert(id, on_call));
            request_refresh();
            Some(id)
        }
        Err(err) => {
            leptos::logging::warn!("scroll timeline not registered: {err}");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
fn unregister(id: TimelineId) {
    CALL_HANDLERS.with(|handlers| handlers.borrow_mut().remove(&id));
    let Some(mut page) = DomPage::new() else {
        return;
    };
    // sections fall back to their stylesheet layout once the timeline is gone
    let removed = DRIVER.with(|driver| driver.borrow_mut().unregister(id, &mut page));
    if removed.is_some() {
        request_refresh();
    }
}

/// Bind a timeline to the page for the lifetime of the calling component.
///
/// `build` runs inside an effect: when the signals it reads change, the old
/// timeline is dropped and the new one (if any) registered.
pub fn use_scroll_timeline(build: impl Fn() -> Option<Timeline> + 'static) {
    use_scroll_timeline_with_calls(build, |_| {});
}

/// Like [`use_scroll_timeline`], with a handler for the timeline's call steps.
pub fn use_scroll_timeline_with_calls(
    build: impl Fn() -> Option<Timeline> + 'static,
    on_call: impl Fn(CallEvent) + 'static,
) {
    #[cfg(feature = "hydrate")]
    {
        let on_call = Rc::new(on_call);
        let current: Arc<Mutex<Option<TimelineId>>> = Arc::new(Mutex::new(None));

        let current_for_effect = Arc::clone(&current);
        Effect::new(move |_| {
            let timeline = build();
            let Ok(mut current) = current_for_effect.lock() else {
                return;
            };
            if let Some(id) = current.take() {
                unregister(id);
            }
            *current = timeline.and_then(|timeline| {
                let on_call = Rc::clone(&on_call);
                register(timeline, Box::new(move |event| on_call(event)))
            });
        });

        on_cleanup(move || {
            if let Some(id) = current.lock().ok().and_then(|mut current| current.take()) {
                unregister(id);
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (build, on_call);
    }
}

/// Route timeline writes aimed at a model group to `sink`.
pub fn register_model_sink(group: GroupId, sink: impl Fn(Channel, f64) + 'static) {
    #[cfg(feature = "hydrate")]
    MODEL_SINKS.with(|sinks| sinks.borrow_mut().insert(group, Box::new(sink)));
    #[cfg(not(feature = "hydrate"))]
    let _ = (group, sink);
}

pub fn unregister_model_sink(group: GroupId) {
    #[cfg(feature = "hydrate")]
    MODEL_SINKS.with(|sinks| sinks.borrow_mut().remove(&group));
    #[cfg(not(feature = "hydrate"))]
    let _ = group;
}
