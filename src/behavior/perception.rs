//! Sight-cone perception
//!
//! Pure geometric target detection: a target is seen iff it is strictly
//! inside both the sight range and the sight half-angle. Exactly on either
//! boundary counts as NOT visible.

use crate::core::types::Vec3;

/// Is the target inside this entity's cone of vision?
///
/// `sight_angle` is the half-angle of the field of view, in degrees. An
/// entity with no usable facing (zero-length forward) sees nothing; a target
/// standing exactly on the entity is always seen.
pub fn target_in_sight(
    self_position: Vec3,
    self_forward: Vec3,
    target_position: Vec3,
    sight_range: f32,
    sight_angle: f32,
) -> bool {
    let delta = target_position - self_position;
    let distance = delta.length();

    if distance >= sight_range {
        return false;
    }

    if self_forward.length() <= 0.0001 {
        return false;
    }

    if distance <= 0.0001 {
        return true;
    }

    self_forward.angle_to(&delta) < sight_angle
}
