//! Headless frontend
//!
//! A complete [`Frontend`](super::Frontend) with no window, GPU or sound
//! device. It keeps a table of live visuals, records every audio cue and
//! menu screen, and can replay a script of input frames. The simulation
//! binary and the integration tests drive the controller through it.

use std::collections::{HashMap, VecDeque};

use glam::{Vec2, Vec3};

use super::config::LevelColors;
use super::frontend::{
    Anchor, AudioCue, AudioSink, HudSink, HudSnapshot, LevelSummary, MenuSink, SceneSink,
    VictorySummary, VisualHandle, VisualKind, VisualPose,
};
use super::systems::wave_system::LevelStats;
use crate::camera::{CameraRig, OrbitCamera};
use crate::input::{InputFrame, InputSource, InputState};

/// A screen shown through [`MenuSink`], in the order it was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuScreen {
    Menu,
    Pause,
    PauseHidden,
    LevelComplete(LevelSummary),
    GameOver(LevelStats),
    Victory(VictorySummary),
    AllHidden,
}

/// Host-side record of one visual.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    pub kind: VisualKind,
    pub pose: VisualPose,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    pub input: InputState,
    pub camera: OrbitCamera,
    /// When set, models report a gun-tip anchor at this offset from their
    /// position instead of leaving callers to fall back.
    pub gun_tip_offset: Option<Vec3>,
    script: VecDeque<InputFrame>,
    cues: Vec<AudioCue>,
    visuals: HashMap<VisualHandle, HeadlessVisual>,
    next_handle: u32,
    spawned: usize,
    disposed: usize,
    renders: usize,
    scene_colors: Option<LevelColors>,
    hud: Option<HudSnapshot>,
    hud_visible: bool,
    screens: Vec<MenuScreen>,
}

impl HeadlessFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Input script
    // ------------------------------------------------------------------

    pub fn push_script(&mut self, frame: InputFrame) {
        self.script.push_back(frame);
    }

    pub fn script_len(&self) -> usize {
        self.script.len()
    }

    /// Load the next scripted frame into the input state. Held channels
    /// (movement, shooting, sprint) replace the current ones; look delta and
    /// button presses are added. Returns `false` when the script is empty.
    pub fn apply_next_script(&mut self) -> bool {
        let Some(frame) = self.script.pop_front() else {
            return false;
        };
        self.input.stick = frame.movement;
        self.input.shooting = frame.shooting;
        self.input.keys.sprint = frame.sprinting;
        self.input
            .aim
            .accumulate_delta(frame.aim_delta.x, frame.aim_delta.y);
        if frame.reload {
            self.input.press_reload();
        }
        if frame.pause {
            self.input.press_pause();
        }
        true
    }

    // ------------------------------------------------------------------
    // Recorded output
    // ------------------------------------------------------------------

    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }

    pub fn cue_count(&self, cue: AudioCue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn clear_cues(&mut self) {
        self.cues.clear();
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<&HeadlessVisual> {
        self.visuals.get(&handle)
    }

    pub fn live_visuals(&self) -> usize {
        self.visuals.len()
    }

    /// Live visuals matching `predicate`.
    pub fn count_visuals(&self, predicate: impl Fn(&HeadlessVisual) -> bool) -> usize {
        self.visuals.values().filter(|v| predicate(v)).count()
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn scene_colors(&self) -> Option<&LevelColors> {
        self.scene_colors.as_ref()
    }

    pub fn last_hud(&self) -> Option<&HudSnapshot> {
        self.hud.as_ref()
    }

    pub fn hud_visible(&self) -> bool {
        self.hud_visible
    }

    pub fn screens(&self) -> &[MenuScreen] {
        &self.screens
    }

    pub fn last_screen(&self) -> Option<&MenuScreen> {
        self.screens.last()
    }

    pub fn pointer_locked(&self) -> bool {
        self.input.aim.is_pointer_locked()
    }
}

impl InputSource for HeadlessFrontend {
    fn movement(&self) -> Vec2 {
        self.input.movement()
    }

    fn aim_delta(&mut self) -> Vec2 {
        self.input.aim_delta()
    }

    fn is_shooting(&self) -> bool {
        self.input.is_shooting()
    }

    fn is_sprinting(&self) -> bool {
        self.input.is_sprinting()
    }

    fn consume_reload(&mut self) -> bool {
        self.input.consume_reload()
    }

    fn consume_pause(&mut self) -> bool {
        self.input.consume_pause()
    }

    fn set_pointer_locked(&mut self, locked: bool) {
        self.input.set_pointer_locked(locked);
    }
}

impl CameraRig for HeadlessFrontend {
    fn yaw(&self) -> f32 {
        self.camera.yaw()
    }

    fn pitch(&self) -> f32 {
        self.camera.pitch()
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.camera.set_yaw(yaw);
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.camera.set_pitch(pitch);
    }

    fn forward(&self) -> Vec3 {
        self.camera.forward()
    }

    fn right(&self) -> Vec3 {
        self.camera.right()
    }

    fn update_camera(&mut self, target: Vec3, dt: f32) {
        self.camera.update_camera(target, dt);
    }
}

impl AudioSink for HeadlessFrontend {
    fn play(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
}

impl SceneSink for HeadlessFrontend {
    fn spawn(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle {
        let handle = VisualHandle::new(self.next_handle);
        self.next_handle += 1;
        self.spawned += 1;
        self.visuals.insert(
            handle,
            HeadlessVisual {
                kind,
                pose: VisualPose::at(position),
                visible: true,
            },
        );
        handle
    }

    fn place(&mut self, handle: VisualHandle, pose: VisualPose) {
        if let Some(v) = self.visuals.get_mut(&handle) {
            v.pose = pose;
        }
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        if let Some(v) = self.visuals.get_mut(&handle) {
            v.visible = visible;
        }
    }

    fn dispose(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_some() {
            self.disposed += 1;
        }
    }

    fn set_scene_colors(&mut self, colors: &LevelColors) {
        self.scene_colors = Some(*colors);
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn anchor_position(&self, handle: VisualHandle, anchor: Anchor) -> Option<Vec3> {
        match anchor {
            Anchor::GunTip => {
                let offset = self.gun_tip_offset?;
                self.visuals.get(&handle).map(|v| v.pose.position + offset)
            }
        }
    }
}

impl HudSink for HeadlessFrontend {
    fn update_hud(&mut self, snapshot: &HudSnapshot) {
        self.hud = Some(snapshot.clone());
    }
}

impl MenuSink for HeadlessFrontend {
    fn show_menu(&mut self) {
        self.screens.push(MenuScreen::Menu);
    }

    fn show_pause(&mut self) {
        self.screens.push(MenuScreen::Pause);
    }

    fn hide_pause(&mut self) {
        self.screens.push(MenuScreen::PauseHidden);
    }

    fn show_level_complete(&mut self, summary: &LevelSummary) {
        self.screens.push(MenuScreen::LevelComplete(summary.clone()));
    }

    fn show_game_over(&mut self, stats: &LevelStats) {
        self.screens.push(MenuScreen::GameOver(stats.clone()));
    }

    fn show_victory(&mut self, summary: &VictorySummary) {
        self.screens.push(MenuScreen::Victory(*summary));
    }

    fn hide_all(&mut self) {
        self.screens.push(MenuScreen::AllHidden);
    }

    fn set_hud_visible(&mut self, visible: bool) {
        self.hud_visible = visible;
    }
}
