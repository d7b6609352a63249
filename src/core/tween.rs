//! Wall-clock tweens, stepped once per animation frame.
//!
//! Unlike scroll timelines these play on their own once started. Starting a
//! tween on a key that is already animating replaces it, picking up from the
//! value the old tween had reached.

use std::collections::BTreeMap;

use crate::core::css::{Ease, lerp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub ease: Ease,
    elapsed: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            ease,
            elapsed: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        if self.duration == 0.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.ease.apply(self.elapsed / self.duration))
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A set of independent tweens keyed by what they animate.
#[derive(Debug, Clone)]
pub struct TweenSet<K> {
    tweens: BTreeMap<K, Tween>,
    values: BTreeMap<K, f64>,
}

impl<K> Default for TweenSet<K> {
    fn default() -> Self {
        Self {
            tweens: BTreeMap::new(),
            values: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> TweenSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written for `key`, if it was ever animated or set.
    pub fn value(&self, key: K) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Set a value without animating, cancelling any running tween on it.
    pub fn set(&mut self, key: K, value: f64) {
        self.tweens.remove(&key);
        self.values.insert(key, value);
    }

    /// Animate `key` toward `to`, starting from its current value
    /// (or `fallback` if it has none).
    pub fn animate(&mut self, key: K, fallback: f64, to: f64, duration: f64, ease: Ease) {
        let from = self.value(key).unwrap_or(fallback);
        self.values.insert(key, from);
        self.tweens.insert(key, Tween::new(from, to, duration, ease));
    }

    /// Step every running tween and return the new values. Finished tweens
    /// report their final value once and are dropped.
    pub fn advance(&mut self, dt: f64) -> Vec<(K, f64)> {
        let mut out = Vec::with_capacity(self.tweens.len());
        for (key, tween) in self.tweens.iter_mut() {
            let value = tween.advance(dt);
            self.values.insert(*key, value);
            out.push((*key, value));
        }
        self.tweens.retain(|_, tween| !tween.is_finished());
        out
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn is_animating(&self, key: K) -> bool {
        self.tweens.contains_key(&key)
    }
}
