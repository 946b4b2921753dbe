//! Flee transitions
//!
//! Fleeing is never self-initiated: it is forced by the registry's broadcast
//! when a neighbor dies. The flee vector points directly away from the
//! danger origin; the flee cry fires once, on entry.

use crate::behavior::enemy::Enemy;
use crate::behavior::events::{BehaviorEventKind, EventLog};
use crate::behavior::state::BehaviorState;
use crate::core::config::SimConfig;
use crate::core::types::{Tick, Vec3};

/// Destination directly away from a danger origin
///
/// An enemy standing exactly on the origin has no away direction; it bolts
/// along +X rather than freezing in place.
pub fn flee_destination(position: Vec3, danger: Vec3, distance: f32) -> Vec3 {
    let mut away = (position - danger).normalize();
    if away.length() <= 0.0001 {
        away = Vec3::new(1.0, 0.0, 0.0);
    }
    position + away * distance
}

/// Force a live enemy into the fleeing state
///
/// Overrides whatever the enemy was doing; re-broadcast onto an already
/// fleeing enemy re-aims its flight but does not repeat the cry. Dead
/// enemies are left alone.
pub fn enter_flee(
    enemy: &mut Enemy,
    danger: Vec3,
    config: &SimConfig,
    events: &mut EventLog,
    tick: Tick,
) {
    if !enemy.is_live() {
        return;
    }

    let already_fleeing = enemy.state == BehaviorState::Fleeing;
    enemy.state = BehaviorState::Fleeing;
    enemy.flee_destination = Some(flee_destination(
        enemy.last_position,
        danger,
        config.flee_distance,
    ));
    enemy.wander_destination = None;

    if !already_fleeing {
        events.push(
            BehaviorEventKind::FleeCry { enemy: enemy.id },
            format!("{:?} panics", enemy.id),
            tick,
        );
    }
}
