//! Headless collaborators: симуляция без engine
//!
//! Наивные stand-ins для engine side:
//! - navigator: прямая линия к destination (NavAgent)
//! - animator: clip clock, пишет AnimationSignal (AnimationDriver, HitSurfaces)
//! - hits: sphere check hitbox → hurtbox (HitLanded)
//!
//! Это не pathfinding и не animation system: ровно столько, чтобы FSM
//! можно было прогнать end to end в тестах и в headless demo.

use bevy::prelude::*;

use crate::combat::apply_damage;
use crate::SimulationSet;

pub mod animator;
pub mod hits;
pub mod navigator;

pub use animator::{Clip, ClipTimings, HeadlessAnimator};
pub use hits::detect_headless_hits;
pub use navigator::HeadlessNavigator;

/// Маркер: entity обслуживается headless коллабораторами
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(HeadlessNavigator, HeadlessAnimator)]
pub struct Headless;

/// Headless Plugin (вместо engine glue)
///
/// - Signals: run_headless_animation (до FSM)
/// - Motion: drive_headless_navigation (после FSM)
/// - Combat: detect_headless_hits (до apply_damage)
pub struct HeadlessPlugin;

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                animator::run_headless_animation.in_set(SimulationSet::Signals),
                navigator::drive_headless_navigation.in_set(SimulationSet::Motion),
                hits::detect_headless_hits
                    .in_set(SimulationSet::Combat)
                    .before(apply_damage),
            ),
        );
    }
}
