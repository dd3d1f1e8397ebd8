//! Audio cues
//!
//! The simulation only names cues; playback belongs to an [`AudioSink`]
//! supplied by the host. Sinks are fire-and-forget: they never report
//! failure and the game never waits on them.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Session started
    Start,
    /// Player took damage
    Hit,
    /// Heart collected
    Heal,
    /// $AIR token collected
    Score,
    /// Shield picked up
    ShieldOn,
    /// Shield absorbed a hit
    ShieldBreak,
    /// Title screen music (loops until stopped)
    IntroLoop,
    /// Lives ran out
    GameOverStinger,
}

impl Cue {
    pub fn is_music(self) -> bool {
        matches!(self, Cue::IntroLoop)
    }
}

/// Volume mix applied by sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub master: f32,
    pub sfx: f32,
    pub music: f32,
    pub muted: bool,
}

impl Default for Mix {
    fn default() -> Self {
        Self {
            master: 0.8,
            sfx: 1.0,
            music: 0.7,
            muted: false,
        }
    }
}

impl Mix {
    /// Effective gain for a cue
    pub fn gain(&self, cue: Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() { self.music } else { self.sfx };
        (self.master * channel).clamp(0.0, 1.0)
    }
}

/// Playback backend
pub trait AudioSink {
    /// Start a cue. Must not block or fail loudly.
    fn play(&mut self, cue: Cue);
    /// Stop any looping music
    fn stop_music(&mut self);
    /// Apply a new volume mix
    fn set_mix(&mut self, mix: Mix);
}

/// Headless sink: logs cues and remembers them (handy in tests and demos)
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Cue>,
    pub music_playing: bool,
    pub mix: Mix,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        if self.mix.gain(cue) <= 0.0 {
            return;
        }
        log::debug!("cue {:?}", cue);
        if cue.is_music() {
            self.music_playing = true;
        }
        self.played.push(cue);
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }

    fn set_mix(&mut self, mix: Mix) {
        self.mix = mix;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_everything() {
        let mix = Mix {
            muted: true,
            ..Mix::default()
        };
        assert_eq!(mix.gain(Cue::Hit), 0.0);
        assert_eq!(mix.gain(Cue::IntroLoop), 0.0);
    }

    #[test]
    fn test_music_uses_music_channel() {
        let mix = Mix {
            master: 0.5,
            sfx: 1.0,
            music: 0.0,
            muted: false,
        };
        assert_eq!(mix.gain(Cue::IntroLoop), 0.0);
        assert_eq!(mix.gain(Cue::Score), 0.5);
    }

    #[test]
    fn test_recording_sink_tracks_music() {
        let mut sink = RecordingAudio::default();
        sink.play(Cue::IntroLoop);
        assert!(sink.music_playing);
        sink.stop_music();
        assert!(!sink.music_playing);
        assert_eq!(sink.played, vec![Cue::IntroLoop]);
    }
}
