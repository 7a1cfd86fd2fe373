//! Game State
//!
//! The mode controller. Owns every gameplay system and the host frontend,
//! runs the simulation in a fixed order while playing, and switches between
//! menu, playing, paused, level-complete, game-over and victory.
//!
//! Tick order while playing:
//!
//! 1. input sample, pause check, manual reload
//! 2. weapon, player, player fire
//! 3. bullets, then bullet-vs-enemy and bullet-vs-player hits
//! 4. director (enemy AI, wave spawns)
//! 5. level-complete check
//! 6. camera, particles, HUD, visual sync

use crate::input::InputFrame;

use super::arena::Arena;
use super::arena_player::Player;
use super::config::{GameConfig, LevelDescriptor};
use super::enemy::EnemyContext;
use super::frontend::{AudioCue, Frontend, HudSnapshot, LevelSummary, VictorySummary};
use super::rng::GameRng;
use super::systems::{
    BulletOwner, BulletPool, CollisionSystem, LevelDirector, LevelStats, ParticleSystem,
    Scheduler, TimerId,
};
use super::weapon::Weapon;

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    Victory,
}

/// Central controller holding all game systems together.
pub struct GameController<F: Frontend> {
    pub config: GameConfig,
    mode: GameMode,
    frontend: F,
    rng: GameRng,

    // === Level ===
    arena: Arena,
    director: LevelDirector,

    // === Entities ===
    player: Player,
    weapon: Weapon,
    bullets: BulletPool,

    // === Effects ===
    particles: ParticleSystem,
    scheduler: Scheduler,

    // === Run ===
    /// Kills across every level of the current run
    total_killed: u32,
}

impl<F: Frontend> GameController<F> {
    /// Build the controller in menu mode. The bullet pool and its visuals are
    /// allocated here, once.
    pub fn new(config: GameConfig, levels: Vec<LevelDescriptor>, mut frontend: F, rng: GameRng) -> Self {
        let mut bullets = BulletPool::new(config.bullet_capacity, config.bullet_lifetime);
        bullets.attach_visuals(&mut frontend);

        frontend.set_hud_visible(false);
        frontend.show_menu();

        Self {
            player: Player::new(&config),
            weapon: Weapon::new(&config.weapon),
            config,
            mode: GameMode::Menu,
            frontend,
            rng,
            arena: Arena::new(),
            director: LevelDirector::new(levels),
            bullets,
            particles: ParticleSystem::new(),
            scheduler: Scheduler::new(),
            total_killed: 0,
        }
    }

    // === Frame ===

    /// Run one display frame. Only `Playing` advances the simulation; every
    /// mode renders. A non-finite delta counts as zero.
    pub fn frame(&mut self, raw_dt: f32) {
        let dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };
        if self.mode == GameMode::Playing {
            self.tick(dt);
        }
        self.frontend.render();
    }

    fn tick(&mut self, dt: f32) {
        let input = InputFrame::sample(&mut self.frontend);
        if input.pause {
            self.pause();
            return;
        }

        self.scheduler.tick(dt);

        if input.reload && self.weapon.start_reload() {
            self.frontend.play(AudioCue::Reload);
        }

        self.weapon.update(dt);
        self.player
            .update(dt, &input, &mut self.frontend, self.arena.colliders());

        if input.shooting && self.weapon.can_fire() && self.weapon.fire() {
            let origin = self.player.gun_tip(&self.frontend);
            let direction = self.player.aim_direction(&self.frontend);
            self.bullets.fire(
                origin,
                direction,
                self.weapon.bullet_speed,
                self.weapon.damage,
                BulletOwner::Player,
            );
            self.frontend.play(AudioCue::Shoot);
            self.player.shots_fired += 1;
            self.scheduler.arm(TimerId::MuzzleFlash);
        }

        self.bullets.update(dt, self.arena.colliders());

        if self.resolve_hits() {
            return;
        }

        let mut ctx = EnemyContext {
            player_position: self.player.position,
            colliders: self.arena.colliders(),
            bullets: &mut self.bullets,
            rng: &mut self.rng,
            enemy_bullet_speed: self.config.enemy_bullet_speed,
        };
        self.director.update(dt, &mut ctx, &mut self.frontend);

        if self.director.is_level_complete() {
            self.level_complete();
            return;
        }

        self.frontend.update_camera(self.player.position, dt);
        self.particles.update(dt, &mut self.frontend);
        self.push_hud();
        self.sync_visuals();
    }

    /// Returns `true` if the player died and the run is over.
    fn resolve_hits(&mut self) -> bool {
        let padding = self.config.hit_padding;

        let hits = CollisionSystem::resolve_player_bullets(
            &mut self.bullets,
            self.director.enemies_mut(),
            padding,
        );
        for hit in hits {
            self.frontend.play(AudioCue::Hit);
            self.scheduler.arm(TimerId::CrosshairHit);
            self.player.shots_hit += 1;

            if hit.killed {
                self.frontend.play(AudioCue::EnemyDeath);
                self.director.on_enemy_killed();
                self.total_killed += 1;
                self.particles
                    .spawn_burst(hit.position, &mut self.rng, &mut self.frontend);
            }
        }

        let incoming =
            CollisionSystem::resolve_enemy_bullets(&mut self.bullets, &mut self.player, padding);
        for _ in 0..incoming.hits {
            self.frontend.play(AudioCue::PlayerHit);
        }
        if incoming.hits > 0 {
            self.scheduler.arm(TimerId::DamageFlash);
        }

        if incoming.player_died {
            self.game_over();
            return true;
        }
        false
    }

    fn push_hud(&mut self) {
        let snapshot = HudSnapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            ammo: self.weapon.ammo(),
            mag_size: self.weapon.mag_size,
            reloading: self.weapon.is_reloading(),
            stats: self.director.stats(),
            crosshair_hit: self.scheduler.is_active(TimerId::CrosshairHit),
            damage_flash: self.scheduler.is_active(TimerId::DamageFlash),
            muzzle_flash: self.scheduler.is_active(TimerId::MuzzleFlash),
        };
        self.frontend.update_hud(&snapshot);
    }

    fn sync_visuals(&mut self) {
        self.player.sync_visual(&mut self.frontend);
        self.director.sync_visuals(&mut self.frontend);
        self.bullets.sync_visuals(&mut self.frontend);
    }

    // === Level loading ===

    /// Fresh player, weapon and bullets for level `index`. The run-wide kill
    /// tally is kept.
    fn load_level(&mut self, index: usize) {
        self.bullets.reset();
        self.bullets.sync_visuals(&mut self.frontend);
        self.particles.clear(&mut self.frontend);
        self.scheduler.clear();

        self.director
            .start_level(index, &mut self.rng, &mut self.frontend);
        let level = self.director.current_level();
        self.arena.build(level, &mut self.frontend);
        self.frontend.set_scene_colors(&level.colors);
        let spawn = level.spawn_position();

        self.player.detach_visual(&mut self.frontend);
        self.player = Player::new(&self.config);
        self.player.reset(spawn);
        self.player.attach_visual(&mut self.frontend);

        self.weapon = Weapon::new(&self.config.weapon);

        self.frontend.set_yaw(self.config.start_yaw);
        self.frontend.set_pitch(self.config.start_pitch);
        self.frontend.update_camera(spawn, self.config.max_frame_dt);

        self.push_hud();
        self.sync_visuals();
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::info!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Enter play: pointer captured, menus hidden, HUD shown.
    fn enter_play(&mut self) {
        self.set_mode(GameMode::Playing);
        self.frontend.hide_all();
        self.frontend.set_hud_visible(true);
        self.frontend.set_pointer_locked(true);
    }

    // === Transitions (menu buttons) ===

    /// Start a new run from the main menu.
    pub fn start(&mut self) -> bool {
        if self.mode != GameMode::Menu {
            return false;
        }
        self.total_killed = 0;
        self.load_level(0);
        self.enter_play();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.mode != GameMode::Playing {
            return false;
        }
        self.set_mode(GameMode::Paused);
        self.frontend.show_pause();
        self.frontend.set_pointer_locked(false);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.mode != GameMode::Paused {
            return false;
        }
        self.set_mode(GameMode::Playing);
        self.frontend.hide_pause();
        self.frontend.set_pointer_locked(true);
        true
    }

    pub fn next_level(&mut self) -> bool {
        if self.mode != GameMode::LevelComplete {
            return false;
        }
        let next = self.director.current_index() + 1;
        self.load_level(next);
        self.enter_play();
        true
    }

    /// Replay the level that was just lost.
    pub fn retry(&mut self) -> bool {
        if self.mode != GameMode::GameOver {
            return false;
        }
        let current = self.director.current_index();
        self.load_level(current);
        self.enter_play();
        true
    }

    /// Tear everything down and return to the main menu.
    pub fn quit(&mut self) -> bool {
        if self.mode == GameMode::Menu {
            return false;
        }
        self.set_mode(GameMode::Menu);
        self.frontend.set_pointer_locked(false);

        self.director.clear_all(&mut self.frontend);
        self.arena.clear(&mut self.frontend);
        self.bullets.reset();
        self.bullets.sync_visuals(&mut self.frontend);
        self.player.detach_visual(&mut self.frontend);
        self.particles.clear(&mut self.frontend);
        self.scheduler.clear();

        self.frontend.set_hud_visible(false);
        self.frontend.hide_all();
        self.frontend.show_menu();
        true
    }

    fn level_complete(&mut self) {
        self.frontend.set_pointer_locked(false);
        self.frontend.play(AudioCue::LevelComplete);

        if self.director.is_last_level() {
            self.set_mode(GameMode::Victory);
            let summary = VictorySummary {
                total_levels: self.director.total_levels(),
                total_killed: self.total_killed,
            };
            log::info!(
                "victory: {} levels, {} kills",
                summary.total_levels,
                summary.total_killed
            );
            self.frontend.show_victory(&summary);
        } else {
            self.set_mode(GameMode::LevelComplete);
            let summary = LevelSummary {
                stats: self.director.stats(),
                shots_fired: self.player.shots_fired,
                shots_hit: self.player.shots_hit,
            };
            log::info!(
                "level {} complete: {}/{} killed, accuracy {}%",
                summary.stats.level,
                summary.stats.killed,
                summary.stats.total,
                summary.accuracy()
            );
            self.frontend.show_level_complete(&summary);
        }
    }

    fn game_over(&mut self) {
        self.set_mode(GameMode::GameOver);
        self.frontend.set_pointer_locked(false);
        self.frontend.play(AudioCue::GameOver);
        let stats = self.director.stats();
        log::info!(
            "game over on level {} ({}/{} killed)",
            stats.level,
            stats.killed,
            stats.total
        );
        self.frontend.show_game_over(&stats);
    }

    // === Accessors ===

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut BulletPool {
        &mut self.bullets
    }

    pub fn director(&self) -> &LevelDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut LevelDirector {
        &mut self.director
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn stats(&self) -> LevelStats {
        self.director.stats()
    }

    pub fn total_killed(&self) -> u32 {
        self.total_killed
    }
}
