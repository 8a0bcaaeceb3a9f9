use anyhow::{Result, bail};
use rand::{Rng, seq::SliceRandom};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    audio::{AudioOutput, PlaybackEvent},
    catalog::starter_tracks,
    config::PlayerConfig,
    generator::{GeneratedTrack, GenerationError, GenerationRequest},
    track::{Track, cover_url_for},
};

/// Track selection, playback and composing for the music panel.
///
/// Audio is delegated to an [`AudioOutput`]; composing is split into
/// [`begin_generation`](Self::begin_generation), which hands out at most one
/// request at a time, and [`complete_generation`](Self::complete_generation),
/// which takes the generator's answer.
pub struct PlaylistController<A, R> {
    tracks: Vec<Track>,
    selected: usize,
    is_playing: bool,
    is_generating: bool,
    progress: f64,
    elapsed: Duration,
    composed: u64,
    audio: A,
    rng: R,
    config: PlayerConfig,
}

impl<A: AudioOutput, R: Rng> PlaylistController<A, R> {
    /// Controller over the built-in starter playlist
    pub fn new(audio: A, rng: R, config: PlayerConfig) -> Result<Self> {
        Self::with_tracks(starter_tracks(), audio, rng, config)
    }

    pub fn with_tracks(tracks: Vec<Track>, audio: A, rng: R, config: PlayerConfig) -> Result<Self> {
        if tracks.is_empty() {
            bail!("playlist needs at least one track");
        }
        if let Err(msg) = config.validate() {
            bail!("invalid player config: {msg}");
        }

        let mut controller = Self {
            tracks,
            selected: 0,
            is_playing: false,
            is_generating: false,
            progress: 0.0,
            elapsed: Duration::ZERO,
            composed: 0,
            audio,
            rng,
            config,
        };
        controller.load_selected();
        Ok(controller)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.selected]
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Position in the current track as a percentage in [0, 100]
    pub fn progress_percent(&self) -> f64 {
        self.progress
    }

    /// Last reported position in the current track
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn select_next(&mut self) {
        let next = (self.selected + 1) % self.tracks.len();
        self.select(next);
    }

    pub fn select_previous(&mut self) {
        let len = self.tracks.len();
        let previous = (self.selected + len - 1) % len;
        self.select(previous);
    }

    /// Pause when playing, otherwise ask the output to start
    pub fn toggle_playback(&mut self) {
        if self.is_playing {
            self.audio.pause();
            self.is_playing = false;
            debug!(track = %self.current_track().title, "paused");
        } else {
            self.start_playback();
        }
    }

    /// Claim the single generation slot. Returns the request to send, or
    /// `None` when one is already in flight.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if self.is_generating {
            debug!("compose already in flight, ignoring request");
            return None;
        }

        self.is_generating = true;
        info!("composing a new track");
        Some(GenerationRequest::compose())
    }

    /// Take the generator's answer for the in-flight request.
    ///
    /// On success the new track is put at the front of the playlist,
    /// selected and started. On failure the playlist is left as it was.
    pub fn complete_generation(
        &mut self,
        response: Result<String, GenerationError>,
    ) -> Result<&Track, GenerationError> {
        if !self.is_generating {
            debug!("dropping compose result with no request in flight");
            return Err(GenerationError::Invalid(
                "no compose request in flight".to_string(),
            ));
        }
        self.is_generating = false;

        let generated = match response.and_then(|text| GeneratedTrack::parse(&text)) {
            Ok(generated) => generated,
            Err(err) => {
                warn!(error = %err, "compose failed");
                return Err(err);
            }
        };

        let track = self.build_track(generated);
        info!(title = %track.title, artist = %track.artist, "composed track");

        self.tracks.insert(0, track);
        self.selected = 0;
        self.load_selected();
        self.start_playback();

        Ok(&self.tracks[0])
    }

    /// React to a notification from the audio output
    pub fn handle_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Progress { elapsed, duration } => {
                if duration.is_zero() {
                    return;
                }
                self.elapsed = elapsed;
                self.progress =
                    (elapsed.as_secs_f64() / duration.as_secs_f64() * 100.0).clamp(0.0, 100.0);
            }
            PlaybackEvent::Ended => {
                debug!(track = %self.current_track().title, "track ended");
                self.select_next();
            }
        }
    }

    fn select(&mut self, index: usize) {
        let was_playing = self.is_playing;
        self.selected = index;
        self.load_selected();
        info!(index, title = %self.current_track().title, "track selected");

        if was_playing {
            self.start_playback();
        }
    }

    fn load_selected(&mut self) {
        self.progress = 0.0;
        self.elapsed = Duration::ZERO;
        self.is_playing = false;
        self.audio.load(&self.tracks[self.selected]);
    }

    // The flag only turns on once the output accepted the play command.
    fn start_playback(&mut self) {
        match self.audio.play() {
            Ok(()) => self.is_playing = true,
            Err(err) => {
                self.is_playing = false;
                warn!(error = %err, track = %self.current_track().title, "playback error");
            }
        }
    }

    fn build_track(&mut self, generated: GeneratedTrack) -> Track {
        self.composed += 1;

        let duration_secs = self
            .rng
            .gen_range(self.config.min_duration_secs..self.config.max_duration_secs);
        let audio_url = self
            .config
            .audio_pool
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        let accent_color = generated.accent_color(&self.config.fallback_color);
        let description = Some(generated.description).filter(|d| !d.trim().is_empty());

        Track {
            id: format!("composed-{}", self.composed),
            cover_url: cover_url_for(&generated.title),
            title: generated.title,
            artist: generated.artist,
            description,
            duration_secs,
            accent_color,
            audio_url,
        }
    }
}
