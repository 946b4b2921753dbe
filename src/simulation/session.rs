//! Simulation session
//!
//! Owns everything with session lifetime: the registry, projectiles in
//! flight, the seeded rng, and the monotonic clock. The host drives it with
//! `tick` and `apply_damage`; everything else flows out through the tick
//! output. No ambient globals anywhere.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::behavior::enemy::Enemy;
use crate::behavior::events::{BehaviorEvent, BehaviorEventKind, EventLog};
use crate::behavior::registry::EnemyRegistry;
use crate::behavior::update::{update_enemy, MotionIntent};
use crate::behavior::EnemyConfig;
use crate::combat::projectile::{advance_projectile, Projectile, ProjectileFate};
use crate::core::config::SimConfig;
use crate::core::error::{Result, WarrenError};
use crate::core::types::{EnemyId, Seconds, Tick, Vec3};
use crate::simulation::services::{MotionProvider, NavQuery};

/// Everything one tick hands back to the host executors
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    /// Motion intents, one per enemy that wants to move this tick
    pub motions: Vec<MotionIntent>,
    /// Effect requests and lifecycle notices since the last tick
    pub events: Vec<BehaviorEvent>,
}

/// One game session's worth of enemy simulation
pub struct Session {
    pub config: SimConfig,
    pub registry: EnemyRegistry,
    pub projectiles: Vec<Projectile>,
    pub tick: Tick,
    pub clock: Seconds,
    rng: ChaCha8Rng,
    events: EventLog,
}

impl Session {
    /// Create a session with a validated config and a deterministic seed
    pub fn new(config: SimConfig, seed: u64) -> Result<Self> {
        if let Err(reason) = config.validate() {
            return Err(WarrenError::InvalidSimConfig(reason));
        }

        Ok(Self {
            config,
            registry: EnemyRegistry::new(),
            projectiles: Vec::new(),
            tick: 0,
            clock: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: EventLog::new(),
        })
    }

    /// Spawn an enemy into the registry
    ///
    /// An invalid config is fatal to this entity only: the error is
    /// reported once and nothing is registered.
    pub fn spawn_enemy(&mut self, config: EnemyConfig, position: Vec3) -> Result<EnemyId> {
        let mut enemy = Enemy::new(config, position)?;

        // First idle call lands a full interval after spawn
        let interval = self
            .rng
            .gen_range(self.config.voice_interval_min..=self.config.voice_interval_max);
        enemy.next_voice_at = self.clock + Seconds::from(interval);

        let id = self.registry.register(enemy);
        self.events.push(
            BehaviorEventKind::EnemySpawned { enemy: id },
            format!("{:?} enters the warren", id),
            self.tick,
        );
        tracing::info!(?id, count = self.registry.count(), "enemy spawned");
        Ok(id)
    }

    /// Advance the whole session by one tick
    ///
    /// `target` is the position of the sight-worthy entity (the player), if
    /// any. Enemies whose motion reading is missing are skipped this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        target: Option<Vec3>,
        motion: &dyn MotionProvider,
        nav: &dyn NavQuery,
    ) -> TickOutput {
        self.tick += 1;
        self.clock += Seconds::from(dt);

        let mut output = TickOutput::default();

        // Snapshot the id set; order is arbitrary and not load-bearing
        for id in self.registry.ids() {
            let Some(reading) = motion.motion_state(id) else {
                continue;
            };
            let Some(enemy) = self.registry.get_mut(id) else {
                continue;
            };

            let result = update_enemy(
                enemy,
                target,
                &reading,
                nav,
                &self.config,
                &mut self.rng,
                self.clock,
                self.tick,
                &mut self.events,
            );

            if let Some(intent) = result.motion {
                output.motions.push(intent);
            }

            if let Some(shot) = result.shot {
                // A shot intent only comes out of a configured ranged block
                if let Some(ranged) = enemy.config.ranged {
                    self.projectiles
                        .push(Projectile::launch(&shot, &ranged, self.clock));
                }
            }
        }

        self.advance_projectiles(dt, target);

        output.events = self.events.drain();
        output
    }

    /// Deliver damage from the host's combat executor
    ///
    /// Unknown ids are a no-op (the enemy already died). A kill deregisters
    /// the enemy, emits the death effects, and broadcasts flee to neighbors;
    /// those neighbors move differently from the next tick onward.
    pub fn apply_damage(&mut self, id: EnemyId, amount: i32) {
        let Some(enemy) = self.registry.get_mut(id) else {
            return;
        };

        if !enemy.take_damage(amount) {
            return;
        }

        let position = enemy.last_position;
        tracing::info!(?id, "enemy slain");
        self.events.push(
            BehaviorEventKind::EnemySlain { enemy: id },
            format!("{:?} is defeated", id),
            self.tick,
        );
        self.events.push(
            BehaviorEventKind::DeathBurst {
                enemy: id,
                position,
            },
            "death particles".into(),
            self.tick,
        );

        self.registry.deregister(id);
        self.registry.broadcast_flee_near(
            position,
            self.config.flee_radius,
            Some(id),
            &self.config,
            &mut self.events,
            self.tick,
        );
    }

    /// Live enemy count for the HUD
    pub fn enemy_count(&self) -> usize {
        self.registry.count()
    }

    /// Win condition for the host's scene-transition collaborator
    pub fn is_cleared(&self) -> bool {
        self.registry.is_empty()
    }

    fn advance_projectiles(&mut self, dt: f32, target: Option<Vec3>) {
        let hit_radius = self.config.projectile_hit_radius;
        let clock = self.clock;
        let mut hits = Vec::new();

        self.projectiles.retain_mut(|projectile| {
            match advance_projectile(projectile, dt, target, hit_radius, clock) {
                ProjectileFate::InFlight => true,
                ProjectileFate::Expired => false,
                ProjectileFate::Hit { damage, position } => {
                    hits.push((damage, position));
                    false
                }
            }
        });

        for (damage, position) in hits {
            self.events.push(
                BehaviorEventKind::TargetHit { damage, position },
                format!("projectile hit for {}", damage),
                self.tick,
            );
        }
    }
}
