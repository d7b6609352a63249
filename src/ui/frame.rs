//! `requestAnimationFrame` loop shared by the scroll driver and the viewer.

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Frame length assumed for the first frame of a loop.
pub const FIRST_FRAME_SECS: f64 = 1.0 / 60.0;

/// Longest step handed to `step`, so a backgrounded tab does not jump.
pub const MAX_FRAME_SECS: f64 = 0.1;

/// Seconds between two frame timestamps (in milliseconds).
pub fn frame_delta(previous_ms: Option<f64>, now_ms: f64) -> f64 {
    previous_ms.map_or(FIRST_FRAME_SECS, |prev| {
        ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_SECS)
    })
}

/// Call `step` once per animation frame with the elapsed seconds until it
/// returns `false`.
#[cfg(feature = "hydrate")]
pub fn run_frames(step: impl FnMut(f64) -> bool + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let mut step = step;
    let mut last: Option<f64> = None;
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |now: f64| {
        let dt = frame_delta(last, now);
        last = Some(now);
        if step(dt) {
            let scheduled = match (web_sys::window(), holder_for_cb.borrow().as_ref()) {
                (Some(window), Some(cb)) => window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .is_ok(),
                _ => false,
            };
            if scheduled {
                return;
            }
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    }
}

/// Server builds never animate.
#[cfg(not(feature = "hydrate"))]
pub fn run_frames(step: impl FnMut(f64) -> bool + 'static) {
    let _ = step;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(None, 1234.0), FIRST_FRAME_SECS);
        assert_eq!(frame_delta(Some(1000.0), 1050.0), 0.05);
        assert_eq!(frame_delta(Some(1000.0), 9000.0), MAX_FRAME_SECS);
        assert_eq!(frame_delta(Some(1000.0), 900.0), 0.0);
    }
}
