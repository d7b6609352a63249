//! Cross-fade between the two laptop models of the product viewer.
//!
//! The caller picks a size; the switcher slides and fades both model groups
//! so that only the chosen one is visible. Position and opacity of each group
//! are tweened independently.

use std::collections::BTreeMap;

use crate::core::css::Ease;
use crate::core::scene::{Color, GroupId, LoadedGroup, SceneRuntime};
use crate::core::tween::TweenSet;

/// Seconds each slide/fade takes.
pub const ANIMATION_DURATION: f64 = 1.0;

/// Horizontal distance a hidden model is parked at.
pub const OFFSET_DISTANCE: f64 = 5.0;

/// Scales at which the large model is shown (desktop, mobile).
const LARGE_SCALES: [f64; 2] = [0.08, 0.05];
const SCALE_EPSILON: f64 = 1e-6;

/// Laptop sizes offered by the product viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSize {
    Inch14,
    #[default]
    Inch16,
}

impl ModelSize {
    pub const ALL: [ModelSize; 2] = [ModelSize::Inch14, ModelSize::Inch16];

    pub fn scale(&self, is_mobile: bool) -> f64 {
        match (self, is_mobile) {
            (ModelSize::Inch14, false) => 0.06,
            (ModelSize::Inch14, true) => 0.03,
            (ModelSize::Inch16, false) => 0.08,
            (ModelSize::Inch16, true) => 0.05,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelSize::Inch14 => "14\"",
            ModelSize::Inch16 => "16\"",
        }
    }
}

/// Colour options offered by the product viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Finish {
    Silver,
    #[default]
    SpaceBlack,
}

impl Finish {
    pub const ALL: [Finish; 2] = [Finish::Silver, Finish::SpaceBlack];

    pub fn color(&self) -> Color {
        match self {
            Finish::Silver => Color::SILVER,
            Finish::SpaceBlack => Color::SPACE_BLACK,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Finish::Silver => "Silver",
            Finish::SpaceBlack => "Space Black",
        }
    }
}

/// Which model the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    Compact,
    Large,
}

impl ModelVariant {
    /// Derive the variant from a model scale.
    pub fn from_scale(scale: f64) -> Self {
        if LARGE_SCALES
            .iter()
            .any(|large| (scale - large).abs() < SCALE_EPSILON)
        {
            ModelVariant::Large
        } else {
            ModelVariant::Compact
        }
    }

    /// Resting x position and opacity of `group` while this variant is shown.
    pub fn rest_state(&self, group: GroupId) -> GroupState {
        match (self, group) {
            (ModelVariant::Large, GroupId::Small) => GroupState::hidden(-OFFSET_DISTANCE),
            (ModelVariant::Compact, GroupId::Large) => GroupState::hidden(OFFSET_DISTANCE),
            _ => GroupState::SHOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupState {
    pub x: f64,
    pub opacity: f64,
}

impl GroupState {
    pub const SHOWN: GroupState = GroupState { x: 0.0, opacity: 1.0 };

    const fn hidden(x: f64) -> Self {
        Self { x, opacity: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Property {
    X,
    Opacity,
}

const GROUPS: [GroupId; 2] = [GroupId::Large, GroupId::Small];

/// Animation state for the two viewer groups.
#[derive(Debug, Default)]
pub struct ModelSwitcher {
    variant: Option<ModelVariant>,
    mounted: BTreeMap<GroupId, LoadedGroup>,
    tweens: TweenSet<(GroupId, Property)>,
}

impl ModelSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(&self) -> Option<ModelVariant> {
        self.variant
    }

    pub fn is_mounted(&self, group: GroupId) -> bool {
        self.mounted.contains_key(&group)
    }

    pub fn loaded(&self, group: GroupId) -> Option<&LoadedGroup> {
        self.mounted.get(&group)
    }

    /// Start sliding/fading toward `variant`. Groups that have not mounted are skipped.
    pub fn switch_to(&mut self, variant: ModelVariant) {
        self.variant = Some(variant);
        for group in GROUPS {
            if !self.is_mounted(group) {
                continue;
            }
            let rest = variant.rest_state(group);
            self.tweens.animate(
                (group, Property::X),
                GroupState::SHOWN.x,
                rest.x,
                ANIMATION_DURATION,
                Ease::Power1Out,
            );
            self.tweens.animate(
                (group, Property::Opacity),
                GroupState::SHOWN.opacity,
                rest.opacity,
                ANIMATION_DURATION,
                Ease::Power1Out,
            );
        }
    }

    /// Register a group whose model finished loading and place it at the
    /// resting state of the current variant.
    pub fn mount(&mut self, group: GroupId, loaded: LoadedGroup, runtime: &impl SceneRuntime) {
        let rest = self
            .variant
            .map_or(GroupState::SHOWN, |variant| variant.rest_state(group));
        self.tweens.set((group, Property::X), rest.x);
        self.tweens.set((group, Property::Opacity), rest.opacity);
        runtime.set_group_x(group, rest.x as f32);
        for mesh in &loaded.meshes {
            runtime.set_mesh_opacity(group, mesh, rest.opacity as f32);
        }
        self.mounted.insert(group, loaded);
    }

    pub fn unmount(&mut self, group: GroupId) {
        self.mounted.remove(&group);
    }

    /// Advance running tweens by `dt` seconds and push the values to the scene.
    pub fn advance(&mut self, dt: f64, runtime: &impl SceneRuntime) {
        for ((group, property), value) in self.tweens.advance(dt) {
            let Some(loaded) = self.mounted.get(&group) else {
                continue;
            };
            match property {
                Property::X => runtime.set_group_x(group, value as f32),
                Property::Opacity => {
                    for mesh in &loaded.meshes {
                        runtime.set_mesh_opacity(group, mesh, value as f32);
                    }
                }
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::testing::{Call, RecordingRuntime};

    fn group(meshes: &[&str]) -> LoadedGroup {
        LoadedGroup {
            meshes: meshes.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn last_x(runtime: &RecordingRuntime, target: GroupId) -> Option<f32> {
        runtime.calls.borrow().iter().rev().find_map(|call| match call {
            Call::X(g, x) if *g == target => Some(*x),
            _ => None,
        })
    }

    fn last_opacities(runtime: &RecordingRuntime, target: GroupId) -> Vec<f32> {
        let calls = runtime.calls.borrow();
        let mut out: Vec<(String, f32)> = Vec::new();
        for call in calls.iter() {
            if let Call::Opacity(g, mesh, o) = call {
                if *g == target {
                    out.retain(|(m, _)| m != mesh);
                    out.push((mesh.clone(), *o));
                }
            }
        }
        out.into_iter().map(|(_, o)| o).collect()
    }

    #[test]
    fn test_variant_from_scale() {
        assert_eq!(ModelVariant::from_scale(0.08), ModelVariant::Large);
        assert_eq!(ModelVariant::from_scale(0.05), ModelVariant::Large);
        assert_eq!(ModelVariant::from_scale(0.06), ModelVariant::Compact);
        assert_eq!(ModelVariant::from_scale(0.03), ModelVariant::Compact);
        for size in [ModelSize::Inch14, ModelSize::Inch16] {
            for mobile in [false, true] {
                let expected = if size == ModelSize::Inch16 {
                    ModelVariant::Large
                } else {
                    ModelVariant::Compact
                };
                assert_eq!(ModelVariant::from_scale(size.scale(mobile)), expected);
            }
        }
    }

    #[test]
    fn test_finishes() {
        assert_eq!(Finish::default().color().to_string(), "#2e2c2e");
        assert_eq!(Finish::Silver.color().to_string(), "#adb5bd");
        assert_eq!(Finish::SpaceBlack.label(), "Space Black");
    }

    #[test]
    fn test_rest_states() {
        assert_eq!(ModelVariant::Large.rest_state(GroupId::Small).x, -OFFSET_DISTANCE);
        assert_eq!(ModelVariant::Large.rest_state(GroupId::Large), GroupState::SHOWN);
        assert_eq!(ModelVariant::Compact.rest_state(GroupId::Large).x, OFFSET_DISTANCE);
        assert_eq!(ModelVariant::Compact.rest_state(GroupId::Large).opacity, 0.0);
        assert_eq!(ModelVariant::Compact.rest_state(GroupId::Small), GroupState::SHOWN);
    }

    #[test]
    fn test_switch_to_large_slides_and_fades_both_groups() {
        let runtime = RecordingRuntime::default();
        let mut switcher = ModelSwitcher::new();
        switcher.mount(GroupId::Large, group(&["a", "b"]), &runtime);
        switcher.mount(GroupId::Small, group(&["c"]), &runtime);

        switcher.switch_to(ModelVariant::Large);
        switcher.advance(0.5, &runtime);
        assert!(!switcher.is_idle());
        let mid = last_x(&runtime, GroupId::Small).unwrap();
        assert!(mid < 0.0 && mid > -OFFSET_DISTANCE as f32);

        switcher.advance(0.5, &runtime);
        assert!(switcher.is_idle());
        assert_eq!(last_x(&runtime, GroupId::Small), Some(-5.0));
        assert_eq!(last_x(&runtime, GroupId::Large), Some(0.0));
        assert_eq!(last_opacities(&runtime, GroupId::Small), vec![0.0]);
        assert_eq!(last_opacities(&runtime, GroupId::Large), vec![1.0, 1.0]);
    }

    #[test]
    fn test_switch_to_compact() {
        let runtime = RecordingRuntime::default();
        let mut switcher = ModelSwitcher::new();
        switcher.mount(GroupId::Large, group(&["a"]), &runtime);
        switcher.mount(GroupId::Small, group(&["c"]), &runtime);

        switcher.switch_to(ModelVariant::Compact);
        switcher.advance(ANIMATION_DURATION, &runtime);
        assert_eq!(last_x(&runtime, GroupId::Large), Some(5.0));
        assert_eq!(last_x(&runtime, GroupId::Small), Some(0.0));
        assert_eq!(last_opacities(&runtime, GroupId::Large), vec![0.0]);
        assert_eq!(last_opacities(&runtime, GroupId::Small), vec![1.0]);
    }

    #[test]
    fn test_unmounted_group_is_a_no_op() {
        let runtime = RecordingRuntime::default();
        let mut switcher = ModelSwitcher::new();
        switcher.switch_to(ModelVariant::Large);
        switcher.advance(1.0, &runtime);
        assert!(runtime.calls.borrow().is_empty());
        assert!(switcher.is_idle());
    }

    #[test]
    fn test_late_mount_snaps_to_current_variant() {
        let runtime = RecordingRuntime::default();
        let mut switcher = ModelSwitcher::new();
        switcher.switch_to(ModelVariant::Large);
        switcher.mount(GroupId::Small, group(&["c"]), &runtime);
        assert_eq!(
            *runtime.calls.borrow(),
            vec![
                Call::X(GroupId::Small, -5.0),
                Call::Opacity(GroupId::Small, "c".into(), 0.0)
            ]
        );
    }

    #[test]
    fn test_reversing_mid_flight_starts_from_current_value() {
        let runtime = RecordingRuntime::default();
        let mut switcher = ModelSwitcher::new();
        switcher.mount(GroupId::Small, group(&["c"]), &runtime);
        switcher.switch_to(ModelVariant::Large);
        switcher.advance(0.5, &runtime);
        let mid = last_x(&runtime, GroupId::Small).unwrap();

        switcher.switch_to(ModelVariant::Compact);
        switcher.advance(0.01, &runtime);
        let after = last_x(&runtime, GroupId::Small).unwrap();
        assert!(after > mid && after < 0.0);
    }
}
