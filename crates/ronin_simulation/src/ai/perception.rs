//! Perception: stateless geometric queries
//!
//! Visibility cone + attack range, recomputed on every query.
//! Все сравнения строгие (`<`): цель ровно на границе не видна / не достижима.
//! Forward = `Transform::forward()` (−Z в Bevy).

use bevy::prelude::*;

use crate::ai::AIConfig;

/// Результат одного восприятия цели (ephemeral)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerceptionResult {
    pub can_see: bool,
    pub can_attack: bool,
}

impl PerceptionResult {
    pub fn sense(pose: &Transform, target: Vec3, config: &AIConfig) -> Self {
        Self {
            can_see: can_see_target(
                pose,
                target,
                config.visibility_radius,
                config.visibility_half_angle,
            ),
            can_attack: can_attack_target(pose.translation, target, config.attack_radius),
        }
    }
}

/// Видит ли агент цель: distance < radius И angle(forward, to_target) < half_angle
///
/// `visibility_half_angle` в градусах. Цель в той же точке что и агент
/// считается прямо по курсу (угол 0).
pub fn can_see_target(
    pose: &Transform,
    target: Vec3,
    visibility_radius: f32,
    visibility_half_angle: f32,
) -> bool {
    assert!(
        pose.translation.is_finite() && pose.rotation.is_finite() && target.is_finite(),
        "perception: non-finite pose {:?} or target {:?}",
        pose,
        target
    );
    assert!(
        visibility_radius.is_finite() && visibility_half_angle.is_finite(),
        "perception: non-finite visibility limits ({}, {})",
        visibility_radius,
        visibility_half_angle
    );

    let direction = target - pose.translation;
    let distance = direction.length();

    distance < visibility_radius && angle_to(pose, direction) < visibility_half_angle
}

/// Может ли агент атаковать цель: distance < attack_radius
pub fn can_attack_target(agent: Vec3, target: Vec3, attack_radius: f32) -> bool {
    assert!(
        agent.is_finite() && target.is_finite() && attack_radius.is_finite(),
        "perception: non-finite attack query ({:?}, {:?}, {})",
        agent,
        target,
        attack_radius
    );

    agent.distance(target) < attack_radius
}

/// Угол между forward агента и направлением на цель, градусы
fn angle_to(pose: &Transform, direction: Vec3) -> f32 {
    if direction.length_squared() <= f32::EPSILON {
        return 0.0;
    }

    // atan2 вместо acos: точный результат на 90°, без approx-шума
    let forward: Vec3 = *pose.forward();
    let sin = forward.cross(direction).length();
    let cos = forward.dot(direction);
    sin.atan2(cos).to_degrees()
}
