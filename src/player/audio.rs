use std::time::Duration;
use thiserror::Error;

use super::track::Track;

/// Notifications coming back from an audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Playback position moved
    Progress { elapsed: Duration, duration: Duration },
    /// The loaded track played to the end
    Ended,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("no track loaded")]
    NoSource,
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Something that can play the selected track.
///
/// Loading a new source stops whatever was playing.
pub trait AudioOutput {
    fn load(&mut self, track: &Track);

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);
}

/// Clock-only output. Nothing is decoded; the position advances while
/// "playing" and an `Ended` event fires at the track's nominal length.
#[derive(Debug, Default)]
pub struct SimulatedOutput {
    duration: Option<Duration>,
    elapsed: Duration,
    playing: bool,
}

impl SimulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move the clock forward and report what happened
    pub fn advance(&mut self, dt: Duration) -> Vec<PlaybackEvent> {
        let Some(duration) = self.duration else {
            return Vec::new();
        };
        if !self.playing {
            return Vec::new();
        }

        self.elapsed = (self.elapsed + dt).min(duration);
        let mut events = vec![PlaybackEvent::Progress {
            elapsed: self.elapsed,
            duration,
        }];

        if self.elapsed >= duration {
            self.playing = false;
            events.push(PlaybackEvent::Ended);
        }

        events
    }
}

impl AudioOutput for SimulatedOutput {
    fn load(&mut self, track: &Track) {
        self.duration = Some(Duration::from_secs(u64::from(track.duration_secs)));
        self.elapsed = Duration::ZERO;
        self.playing = false;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match self.duration {
            None => Err(PlaybackError::NoSource),
            Some(d) if d.is_zero() => Err(PlaybackError::Rejected("empty track".to_string())),
            Some(_) => {
                self.playing = true;
                Ok(())
            }
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
