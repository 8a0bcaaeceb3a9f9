//! Built-in tracks and sample audio.

use super::track::Track;

/// Sample audio files new tracks are assigned from
pub const AUDIO_POOL: [&str; 6] = [
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-4.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-8.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-10.mp3",
];

/// Accent colour used when a generated track comes back without one
pub const FALLBACK_COLOR: &str = "#22d3ee";

/// Prompt sent with every compose request
pub const COMPOSE_PROMPT: &str = "Suggest a name, artist, and a short 1-sentence sci-fi/vaporwave \
description for a new electronic music track. Be creative and cool.";

/// Playlist the player starts with
pub fn starter_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "1".to_string(),
            title: "Cybernetic Pulse".to_string(),
            artist: "AI Synth-Core".to_string(),
            description: Some(
                "A driving rhythmic pulse captured from the core of a Tokyo server farm."
                    .to_string(),
            ),
            duration_secs: 184,
            cover_url: "https://images.unsplash.com/photo-1614613535308-eb5fbd3d2c17?q=80&w=400&h=400&auto=format&fit=crop".to_string(),
            accent_color: "#22d3ee".to_string(),
            audio_url: AUDIO_POOL[0].to_string(),
        },
        Track {
            id: "2".to_string(),
            title: "Neon Rainfall".to_string(),
            artist: "Lofi Generator".to_string(),
            description: Some(
                "Subtle raindrops hitting a metal roof in a 2099 simulation.".to_string(),
            ),
            duration_secs: 215,
            cover_url: "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=80&w=400&h=400&auto=format&fit=crop".to_string(),
            accent_color: "#ec4899".to_string(),
            audio_url: AUDIO_POOL[1].to_string(),
        },
        Track {
            id: "3".to_string(),
            title: "Binary Sunset".to_string(),
            artist: "Neural Orchestra".to_string(),
            description: Some(
                "The feeling of watching the sun dip below the horizon of a digital ocean."
                    .to_string(),
            ),
            duration_secs: 198,
            cover_url: "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=400&h=400&auto=format&fit=crop".to_string(),
            accent_color: "#a855f7".to_string(),
            audio_url: AUDIO_POOL[2].to_string(),
        },
    ]
}
