//! One-time registration of the scroll-trigger capability.
//!
//! The page installs its global scroll/resize listeners exactly once per
//! process, no matter how many times the root component mounts.

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

static REGISTER: Once = Once::new();
static INSTALLS: AtomicUsize = AtomicUsize::new(0);

/// Run `install` if the capability has not been registered yet.
///
/// Returns `true` when this call performed the registration.
pub fn register_scroll_trigger(install: impl FnOnce()) -> bool {
    let mut ran = false;
    REGISTER.call_once(|| {
        install();
        INSTALLS.fetch_add(1, Ordering::SeqCst);
        ran = true;
    });
    ran
}

pub fn is_registered() -> bool {
    REGISTER.is_completed()
}

/// How many times an installer actually ran. Never more than one.
pub fn registration_count() -> usize {
    INSTALLS.load(Ordering::SeqCst)
}
