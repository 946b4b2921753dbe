//! Per-tick behavior update
//!
//! Runs one enemy's state machine for one tick: perception, transitions,
//! and the motion/combat intents handed back to the host executors. Does
//! not touch the registry; population effects go through the session.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use serde::{Deserialize, Serialize};

use crate::behavior::attack::{approach_destination, try_ranged_attack, ShotIntent};
use crate::behavior::config::Gait;
use crate::behavior::enemy::Enemy;
use crate::behavior::events::{BehaviorEventKind, EventLog};
use crate::behavior::perception::target_in_sight;
use crate::behavior::state::BehaviorState;
use crate::behavior::wander::sample_wander_destination;
use crate::core::config::SimConfig;
use crate::core::types::{EnemyId, Seconds, Tick, Vec3};
use crate::simulation::services::{MotionState, NavQuery};

/// Desired movement for the host's movement executor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionIntent {
    pub enemy: EnemyId,
    pub destination: Vec3,
    pub speed: f32,
    pub gait: Gait,
}

/// Everything one enemy asks of the host after one tick
#[derive(Debug, Clone, Default)]
pub struct UpdateResult {
    pub motion: Option<MotionIntent>,
    pub shot: Option<ShotIntent>,
}

/// Has the movement executor finished the current leg?
fn destination_reached(motion: &MotionState, config: &SimConfig) -> bool {
    !motion.path_pending && motion.distance_remaining <= config.stopping_distance
}

/// Advance one enemy by one tick
#[allow(clippy::too_many_arguments)]
pub fn update_enemy(
    enemy: &mut Enemy,
    target: Option<Vec3>,
    motion: &MotionState,
    nav: &dyn NavQuery,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    clock: Seconds,
    tick: Tick,
    events: &mut EventLog,
) -> UpdateResult {
    let mut result = UpdateResult::default();

    if !enemy.is_live() {
        return result;
    }

    enemy.last_position = motion.position;

    // Idle voice runs in every live state
    if enemy.config.idle_voice && clock >= enemy.next_voice_at {
        events.push(
            BehaviorEventKind::IdleCall { enemy: enemy.id },
            format!("{:?} burbles", enemy.id),
            tick,
        );
        let interval = rng.gen_range(config.voice_interval_min..=config.voice_interval_max);
        enemy.next_voice_at = clock + Seconds::from(interval);
    }

    match enemy.state {
        BehaviorState::Dead => {}

        BehaviorState::Fleeing => {
            result.motion = update_fleeing(enemy, motion, config);
        }

        BehaviorState::Wandering | BehaviorState::Approaching => {
            let seen = target.filter(|t| {
                target_in_sight(
                    motion.position,
                    motion.forward,
                    *t,
                    enemy.config.sight_range,
                    enemy.config.sight_angle,
                )
            });

            match seen {
                Some(target_position) => {
                    enemy.state = BehaviorState::Approaching;
                    enemy.last_known_target = Some(target_position);
                    enemy.wander_destination = None;

                    let destination = approach_destination(
                        motion.position,
                        target_position,
                        enemy.config.ranged.as_ref(),
                    );
                    result.motion = Some(MotionIntent {
                        enemy: enemy.id,
                        destination,
                        speed: enemy.config.approach_speed,
                        gait: enemy.config.gait,
                    });

                    result.shot = try_ranged_attack(enemy, target_position, clock);
                    if result.shot.is_some() {
                        events.push(
                            BehaviorEventKind::ShotFired { enemy: enemy.id },
                            format!("{:?} spits a projectile", enemy.id),
                            tick,
                        );
                    }
                }
                None => {
                    if enemy.state == BehaviorState::Approaching {
                        enemy.state = BehaviorState::Wandering;
                        enemy.last_known_target = None;
                    }
                    result.motion = update_wandering(enemy, motion, nav, config, rng);
                }
            }
        }
    }

    // Hop gait: the arc in flight owns the body until it lands
    if let Gait::Hop { duration, .. } = enemy.config.gait {
        if result.motion.is_some() {
            if clock < enemy.hop_until {
                result.motion = None;
            } else {
                enemy.hop_until = clock + Seconds::from(duration);
            }
        }
    }

    result
}

/// Wander leg: renew the destination when the previous one is done
fn update_wandering(
    enemy: &mut Enemy,
    motion: &MotionState,
    nav: &dyn NavQuery,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> Option<MotionIntent> {
    let needs_new_leg =
        enemy.wander_destination.is_none() || destination_reached(motion, config);

    if needs_new_leg {
        match sample_wander_destination(motion.position, nav, config, rng) {
            Some(point) => enemy.wander_destination = Some(point),
            None => {
                // Recoverable: skip this tick's request, try again next tick
                tracing::debug!(id = ?enemy.id, "no reachable wander point this tick");
            }
        }
    }

    enemy.wander_destination.map(|destination| MotionIntent {
        enemy: enemy.id,
        destination,
        speed: enemy.config.wander_speed,
        gait: enemy.config.gait,
    })
}

/// Flee leg: run until the flee point is reached, then calm down
fn update_fleeing(enemy: &mut Enemy, motion: &MotionState, config: &SimConfig) -> Option<MotionIntent> {
    let Some(destination) = enemy.flee_destination else {
        // No flight target recorded; nothing left to run from
        enemy.state = BehaviorState::Wandering;
        return None;
    };

    if motion.position.distance(&destination) <= config.flee_arrival_distance {
        enemy.state = BehaviorState::Wandering;
        enemy.flee_destination = None;
        enemy.last_known_target = None;
        return None;
    }

    Some(MotionIntent {
        enemy: enemy.id,
        destination,
        speed: enemy.config.flee_speed,
        gait: enemy.config.gait,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::config::EnemyConfig;
    use crate::behavior::flee::enter_flee;
    use rand::SeedableRng;

    struct OpenPlane;

    impl NavQuery for OpenPlane {
        fn sample_reachable(&self, near: Vec3, _max_snap: f32) -> Option<Vec3> {
            Some(Vec3::new(near.x, 0.0, near.z))
        }
    }

    struct Void;

    impl NavQuery for Void {
        fn sample_reachable(&self, _near: Vec3, _max_snap: f32) -> Option<Vec3> {
            None
        }
    }

    fn reading_at(position: Vec3) -> MotionState {
        MotionState {
            position,
            forward: Vec3::new(0.0, 0.0, 1.0),
            distance_remaining: 5.0,
            path_pending: false,
        }
    }

    fn arrived_at(position: Vec3) -> MotionState {
        MotionState {
            position,
            forward: Vec3::new(0.0, 0.0, 1.0),
            distance_remaining: 0.0,
            path_pending: false,
        }
    }

    struct Fixture {
        enemy: Enemy,
        config: SimConfig,
        rng: ChaCha8Rng,
        events: EventLog,
        clock: Seconds,
        tick: Tick,
    }

    impl Fixture {
        fn new(enemy_config: EnemyConfig) -> Self {
            Self {
                enemy: Enemy::new(enemy_config, Vec3::ZERO).unwrap(),
                config: SimConfig::default(),
                rng: ChaCha8Rng::seed_from_u64(42),
                events: EventLog::new(),
                clock: 0.0,
                tick: 0,
            }
        }

        fn step(
            &mut self,
            target: Option<Vec3>,
            motion: &MotionState,
            nav: &dyn NavQuery,
        ) -> UpdateResult {
            self.tick += 1;
            self.clock += 0.1;
            update_enemy(
                &mut self.enemy,
                target,
                motion,
                nav,
                &self.config,
                &mut self.rng,
                self.clock,
                self.tick,
                &mut self.events,
            )
        }
    }

    #[test]
    fn test_wanderer_requests_leg_at_wander_speed() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let result = fx.step(None, &arrived_at(Vec3::ZERO), &OpenPlane);

        let motion = result.motion.expect("should request a wander leg");
        assert_eq!(motion.speed, fx.enemy.config.wander_speed);
        assert_eq!(fx.enemy.state, BehaviorState::Wandering);
    }

    #[test]
    fn test_wander_leg_kept_until_reached() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let first = fx.step(None, &arrived_at(Vec3::ZERO), &OpenPlane);
        let first_dest = first.motion.unwrap().destination;

        // Mid-leg: same destination, no re-sample
        let second = fx.step(None, &reading_at(Vec3::new(0.5, 0.0, 0.5)), &OpenPlane);
        assert_eq!(second.motion.unwrap().destination, first_dest);

        // Leg finished: a fresh destination comes out
        let third = fx.step(None, &arrived_at(first_dest), &OpenPlane);
        assert_ne!(third.motion.unwrap().destination, first_dest);
    }

    #[test]
    fn test_unreachable_world_skips_motion_but_stays_wandering() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let result = fx.step(None, &arrived_at(Vec3::ZERO), &Void);

        assert!(result.motion.is_none());
        assert_eq!(fx.enemy.state, BehaviorState::Wandering);

        // World opens up next tick: wandering resumes
        let result = fx.step(None, &arrived_at(Vec3::ZERO), &OpenPlane);
        assert!(result.motion.is_some());
    }

    #[test]
    fn test_sighting_flips_to_approaching_within_one_tick() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let target = Vec3::new(0.0, 0.0, 10.0);

        let result = fx.step(Some(target), &reading_at(Vec3::ZERO), &OpenPlane);

        assert_eq!(fx.enemy.state, BehaviorState::Approaching);
        assert_eq!(fx.enemy.last_known_target, Some(target));
        let motion = result.motion.unwrap();
        assert_eq!(motion.destination, target);
        assert_eq!(motion.speed, fx.enemy.config.approach_speed);
    }

    #[test]
    fn test_losing_sight_flips_back_within_one_tick() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let target = Vec3::new(0.0, 0.0, 10.0);

        fx.step(Some(target), &reading_at(Vec3::ZERO), &OpenPlane);
        assert_eq!(fx.enemy.state, BehaviorState::Approaching);

        // Target slips behind: out of the cone
        let behind = Vec3::new(0.0, 0.0, -10.0);
        fx.step(Some(behind), &reading_at(Vec3::ZERO), &OpenPlane);

        assert_eq!(fx.enemy.state, BehaviorState::Wandering);
        assert!(fx.enemy.last_known_target.is_none());
    }

    #[test]
    fn test_no_target_means_wandering() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        fx.step(Some(Vec3::new(0.0, 0.0, 10.0)), &reading_at(Vec3::ZERO), &OpenPlane);

        // Target reference gone entirely (e.g. player despawned)
        fx.step(None, &reading_at(Vec3::ZERO), &OpenPlane);
        assert_eq!(fx.enemy.state, BehaviorState::Wandering);
    }

    #[test]
    fn test_ranged_approach_keeps_standoff_and_shoots() {
        let mut fx = Fixture::new(EnemyConfig::ranged_slime());
        // Hop gait would withhold the follow-up intents we want to inspect
        fx.enemy.config.gait = Gait::Stride;
        let target = Vec3::new(0.0, 0.0, 8.0);

        let result = fx.step(Some(target), &reading_at(Vec3::ZERO), &OpenPlane);

        let motion = result.motion.unwrap();
        let standoff = fx.enemy.config.ranged.unwrap().standoff_distance;
        assert!((motion.destination.distance(&target) - standoff).abs() < 1e-4);
        assert!(result.shot.is_some(), "in range and off cooldown");

        // Immediately after: cooldown holds fire
        let result = fx.step(Some(target), &reading_at(Vec3::ZERO), &OpenPlane);
        assert!(result.shot.is_none());
    }

    #[test]
    fn test_hop_gait_withholds_intent_mid_hop() {
        let mut fx = Fixture::new(EnemyConfig::ranged_slime());

        let first = fx.step(None, &arrived_at(Vec3::ZERO), &OpenPlane);
        assert!(first.motion.is_some(), "first tick launches a hop");

        // Hop duration is 0.5s, fixture steps 0.1s: the next four ticks are
        // airborne and must not re-steer
        for _ in 0..4 {
            let airborne = fx.step(None, &reading_at(Vec3::new(0.2, 0.3, 0.2)), &OpenPlane);
            assert!(airborne.motion.is_none());
        }

        // Landed: intents flow again
        let later = fx.step(None, &reading_at(Vec3::new(0.4, 0.0, 0.4)), &OpenPlane);
        assert!(later.motion.is_some());
    }

    #[test]
    fn test_fleeing_runs_then_calms_down() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let position = Vec3::new(5.0, 0.0, 0.0);
        fx.enemy.last_position = position;

        let config = fx.config.clone();
        enter_flee(&mut fx.enemy, Vec3::ZERO, &config, &mut fx.events, 0);
        let flee_dest = fx.enemy.flee_destination.unwrap();

        let result = fx.step(None, &reading_at(position), &OpenPlane);
        let motion = result.motion.unwrap();
        assert_eq!(motion.destination, flee_dest);
        assert_eq!(motion.speed, fx.enemy.config.flee_speed);

        // Arrive at the flee point: back to wandering on the next tick
        let result = fx.step(None, &arrived_at(flee_dest), &OpenPlane);
        assert_eq!(fx.enemy.state, BehaviorState::Wandering);
        assert!(result.motion.is_none());
        assert!(fx.enemy.flee_destination.is_none());
    }

    #[test]
    fn test_fleeing_ignores_visible_target() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        let config = fx.config.clone();
        enter_flee(&mut fx.enemy, Vec3::new(-1.0, 0.0, 0.0), &config, &mut fx.events, 0);

        // A target square in the sight cone does not interrupt the flight
        let target = Vec3::new(0.0, 0.0, 5.0);
        fx.step(Some(target), &reading_at(Vec3::ZERO), &OpenPlane);

        assert_eq!(fx.enemy.state, BehaviorState::Fleeing);
    }

    #[test]
    fn test_idle_voice_fires_on_interval() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        fx.enemy.next_voice_at = 0.3;

        fx.step(None, &reading_at(Vec3::ZERO), &OpenPlane); // clock 0.1
        fx.step(None, &reading_at(Vec3::ZERO), &OpenPlane); // clock 0.2
        assert!(fx.events.is_empty());

        fx.step(None, &reading_at(Vec3::ZERO), &OpenPlane); // clock 0.3
        let calls: Vec<_> = fx
            .events
            .iter()
            .filter(|e| matches!(e.kind, BehaviorEventKind::IdleCall { .. }))
            .collect();
        assert_eq!(calls.len(), 1);

        // Re-armed well into the future (at least voice_interval_min away)
        assert!(fx.enemy.next_voice_at >= 0.3 + Seconds::from(fx.config.voice_interval_min));
    }

    #[test]
    fn test_ranged_slime_has_no_idle_voice() {
        let mut fx = Fixture::new(EnemyConfig::ranged_slime());
        fx.enemy.next_voice_at = 0.0;

        for _ in 0..20 {
            fx.step(None, &reading_at(Vec3::ZERO), &OpenPlane);
        }

        assert!(fx
            .events
            .iter()
            .all(|e| !matches!(e.kind, BehaviorEventKind::IdleCall { .. })));
    }

    #[test]
    fn test_dead_enemy_produces_nothing() {
        let mut fx = Fixture::new(EnemyConfig::basic_slime());
        fx.enemy.take_damage(100);

        let result = fx.step(Some(Vec3::new(0.0, 0.0, 5.0)), &reading_at(Vec3::ZERO), &OpenPlane);

        assert!(result.motion.is_none());
        assert!(result.shot.is_none());
        assert!(fx.events.is_empty());
    }
}
