//! Game host
//!
//! Owns a session plus everything around it: pending input, audio playback,
//! best records and user settings. The platform calls [`Game::frame`] once per
//! display refresh and paints the returned [`Frame`].

use crate::Viewport;
use crate::audio::{AudioSink, Cue};
use crate::highscores::{BestRecords, BestStore, NewBests, load_or_default};
use crate::input::{PointerMotion, TickInput};
use crate::renderer::{self, Frame, Hud};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, SessionPhase, SessionResult, tick};
use crate::tuning::Tuning;

pub struct Game<A: AudioSink, S: BestStore> {
    state: GameState,
    input: TickInput,
    settings: Settings,
    bests: BestRecords,
    /// Outcome of the most recent finished run
    last_result: Option<SessionResult>,
    new_bests: NewBests,
    audio: A,
    store: S,
}

impl<A: AudioSink, S: BestStore> Game<A, S> {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        viewport: Viewport,
        mut audio: A,
        store: S,
        settings: Settings,
    ) -> Self {
        audio.set_mix(settings.mix());
        let bests = load_or_default(&store);
        Self {
            state: GameState::new(seed, tuning, viewport),
            input: TickInput::default(),
            settings,
            bests,
            last_result: None,
            new_bests: NewBests::default(),
            audio,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn bests(&self) -> &BestRecords {
        &self.bests
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    /// Records broken by the most recent run
    pub fn new_bests(&self) -> NewBests {
        self.new_bests
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.set_mix(settings.mix());
        self.settings = settings;
    }

    /// Flip mute and apply it; the caller decides whether to persist
    pub fn toggle_mute(&mut self) -> &Settings {
        let settings = Settings {
            muted: !self.settings.muted,
            ..self.settings.clone()
        };
        log::info!("Muted: {}", settings.muted);
        self.set_settings(settings);
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Title screen music; loops until a session starts
    pub fn show_title(&mut self) {
        if self.state.phase == SessionPhase::NotStarted {
            self.audio.play(Cue::IntroLoop);
        }
    }

    pub fn start(&mut self, now: f64) -> bool {
        let started = self.state.start(now);
        if started {
            self.input.clear_motions();
        }
        self.dispatch_events();
        started
    }

    /// Throw the finished (or any) session away and begin a fresh one
    pub fn restart(&mut self, seed: u64, now: f64) -> bool {
        let tuning = self.state.tuning.clone();
        let viewport = self.state.viewport;
        self.state = GameState::new(seed, tuning, viewport);
        self.input.clear_motions();
        self.new_bests = NewBests::default();
        self.start(now)
    }

    pub fn pause(&mut self, now: f64) -> bool {
        let paused = self.state.pause(now);
        self.dispatch_events();
        paused
    }

    pub fn resume(&mut self, now: f64) -> bool {
        let resumed = self.state.resume(now);
        self.dispatch_events();
        resumed
    }

    pub fn toggle_pause(&mut self, now: f64) -> bool {
        let toggled = self.state.toggle_pause(now);
        self.dispatch_events();
        toggled
    }

    /// Window lost focus; pauses when the user asked for it
    pub fn focus_lost(&mut self, now: f64) -> bool {
        if !self.settings.pause_on_blur {
            return false;
        }
        let paused = self.pause(now);
        if paused {
            log::info!("Auto-paused (focus lost)");
        }
        paused
    }

    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("Viewport {}x{}", viewport.width, viewport.height);
        self.state.resize(viewport);
    }

    /// Queue a pointer report for the next tick
    pub fn pointer_moved(&mut self, motion: PointerMotion) {
        self.input.push(motion);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if self.input.autopilot != on {
            log::info!("Autopilot: {}", on);
        }
        self.input.autopilot = on;
    }

    /// Advance to `now`, play resulting cues, and build the frame to paint
    pub fn frame(&mut self, now: f64) -> Frame {
        tick(&mut self.state, &self.input, now);
        self.input.clear_motions();
        self.dispatch_events();

        let mut frame = renderer::render(&self.state, &self.settings.render_options());
        renderer::overlay(
            &mut frame,
            self.state.phase,
            self.last_result.as_ref(),
            &self.bests,
        );
        frame
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(cue) => self.audio.play(cue),
                GameEvent::StopMusic => self.audio.stop_music(),
                GameEvent::LivesChanged(lives) => log::debug!("Lives: {}", lives),
                GameEvent::WaveReached(wave) => log::debug!("Wave {} reached", wave),
                GameEvent::Paused | GameEvent::Resumed => {}
                GameEvent::GameOver(result) => self.record_result(result),
            }
        }
    }

    fn record_result(&mut self, result: SessionResult) {
        self.last_result = Some(result);
        self.new_bests = self.bests.submit(&result);
        if !self.new_bests.any() {
            return;
        }
        log::info!(
            "New best{}{}",
            if self.new_bests.time { " time" } else { "" },
            if self.new_bests.score { " score" } else { "" }
        );
        // Best effort: a failed save still leaves the in-memory records updated
        if let Err(err) = self.store.save(&self.bests) {
            log::warn!("Could not save best records: {}", err);
        }
    }
}
