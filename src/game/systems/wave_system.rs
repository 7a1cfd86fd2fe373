//! Level and wave director.
//!
//! Owns the enemies of the current level. Spawns the first wave on level
//! start; each later wave spawns once the previous one is wiped out and its
//! delay has run down. The level is complete when every wave has spawned and
//! nobody is left alive.

use std::time::Instant;

use crate::game::config::{LevelDescriptor, builtin_levels};
use crate::game::enemy::{Enemy, EnemyContext, Neighbors};
use crate::game::frontend::{SceneSink, WorldIo};
use crate::game::rng::GameRng;

/// Progress of the current level, as shown by the HUD and menus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelStats {
    /// 1-based level number
    pub level: usize,
    pub name: String,
    pub killed: u32,
    pub total: u32,
    /// Wall-clock seconds since the level started
    pub elapsed_secs: f32,
    /// Enemies currently alive
    pub alive: usize,
}

pub struct LevelDirector {
    levels: Vec<LevelDescriptor>,
    current: usize,
    /// Index of the next wave to spawn
    next_wave: usize,
    enemies: Vec<Enemy>,
    total_enemies: u32,
    killed: u32,
    wave_timer: f32,
    all_waves_spawned: bool,
    level_complete: bool,
    started_at: Instant,
}

impl LevelDirector {
    /// An empty table falls back to the built-in campaign.
    pub fn new(levels: Vec<LevelDescriptor>) -> Self {
        let levels = if levels.is_empty() {
            log::warn!("empty level table, using built-in levels");
            builtin_levels()
        } else {
            levels
        };
        Self {
            levels,
            current: 0,
            next_wave: 0,
            enemies: Vec::new(),
            total_enemies: 0,
            killed: 0,
            wave_timer: 0.0,
            all_waves_spawned: false,
            level_complete: false,
            started_at: Instant::now(),
        }
    }

    /// Reset counters, drop the previous level's enemies and spawn wave 0.
    /// `index` is clamped to the last level.
    pub fn start_level<S: SceneSink + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut GameRng,
        scene: &mut S,
    ) {
        self.clear_enemies(scene);
        self.current = index.min(self.levels.len() - 1);
        self.next_wave = 0;
        self.killed = 0;
        self.wave_timer = 0.0;
        self.all_waves_spawned = false;
        self.level_complete = false;
        self.started_at = Instant::now();
        self.total_enemies = self.levels[self.current].total_enemies();

        log::info!(
            "level {} '{}' started: {} waves, {} enemies",
            self.level_number(),
            self.levels[self.current].name,
            self.levels[self.current].waves.len(),
            self.total_enemies
        );

        self.spawn_wave(rng, scene);
    }

    /// Update every enemy, dispose finished corpses, then advance waves.
    pub fn update(&mut self, dt: f32, ctx: &mut EnemyContext<'_>, io: &mut dyn WorldIo) {
        for i in 0..self.enemies.len() {
            let (before, rest) = self.enemies.split_at_mut(i);
            if let Some((enemy, after)) = rest.split_first_mut() {
                let others = Neighbors {
                    before: &*before,
                    after: &*after,
                };
                enemy.update(dt, ctx, io, others);
            }
        }

        self.enemies.retain_mut(|e| {
            if e.is_removable() {
                e.dispose(io);
                false
            } else {
                true
            }
        });

        if self.alive_count() == 0 && !self.level_complete {
            if self.all_waves_spawned {
                self.level_complete = true;
                log::info!("level {} cleared", self.level_number());
            } else {
                self.wave_timer -= dt;
                if self.wave_timer <= 0.0 {
                    self.spawn_wave(ctx.rng, io);
                }
            }
        }
    }

    fn spawn_wave<S: SceneSink + ?Sized>(&mut self, rng: &mut GameRng, scene: &mut S) {
        let level = &self.levels[self.current];
        let Some(wave) = level.waves.get(self.next_wave) else {
            self.all_waves_spawned = true;
            return;
        };

        for group in &wave.enemies {
            for _ in 0..group.count {
                let position = wave.spawn_zone.sample(rng);
                let mut enemy = Enemy::new(group.kind, position, rng);
                enemy.attach_visual(scene);
                self.enemies.push(enemy);
            }
        }

        log::info!(
            "wave {}/{} spawned: {} enemies",
            self.next_wave + 1,
            level.waves.len(),
            wave.enemy_count()
        );

        self.next_wave += 1;
        match level.waves.get(self.next_wave) {
            Some(next) => self.wave_timer = next.delay,
            None => self.all_waves_spawned = true,
        }
    }

    pub fn on_enemy_killed(&mut self) {
        self.killed += 1;
        log::debug!("enemy killed ({}/{})", self.killed, self.total_enemies);
    }

    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn is_last_level(&self) -> bool {
        self.current + 1 >= self.levels.len()
    }

    pub fn total_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn level_number(&self) -> usize {
        self.current + 1
    }

    pub fn current_level(&self) -> &LevelDescriptor {
        &self.levels[self.current]
    }

    pub fn all_waves_spawned(&self) -> bool {
        self.all_waves_spawned
    }

    pub fn killed(&self) -> u32 {
        self.killed
    }

    pub fn total_enemies(&self) -> u32 {
        self.total_enemies
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn stats(&self) -> LevelStats {
        LevelStats {
            level: self.level_number(),
            name: self.current_level().name.clone(),
            killed: self.killed,
            total: self.total_enemies,
            elapsed_secs: self.started_at.elapsed().as_secs_f32(),
            alive: self.alive_count(),
        }
    }

    pub fn sync_visuals<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        for enemy in &mut self.enemies {
            enemy.sync_visual(scene);
        }
    }

    fn clear_enemies<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        for mut enemy in self.enemies.drain(..) {
            enemy.dispose(scene);
        }
    }

    /// Drop everything (quit to menu).
    pub fn clear_all<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        self.clear_enemies(scene);
        self.next_wave = 0;
        self.killed = 0;
        self.total_enemies = 0;
        self.wave_timer = 0.0;
        self.all_waves_spawned = false;
        self.level_complete = false;
    }
}
