//! Music panel: playlist, playback delegation and track composing.

pub mod audio;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod generator;
pub mod playlist;
pub mod track;

pub use audio::{AudioOutput, PlaybackError, PlaybackEvent, SimulatedOutput};
pub use composer::LocalComposer;
pub use config::PlayerConfig;
pub use generator::{GeneratedTrack, GenerationError, GenerationRequest, TextGenerator};
pub use playlist::PlaylistController;
pub use track::Track;
