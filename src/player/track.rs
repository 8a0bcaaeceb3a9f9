use serde::{Deserialize, Serialize};

/// One entry of the playlist. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_secs: u32,
    pub cover_url: String,
    pub accent_color: String,
    pub audio_url: String,
}

impl Track {
    /// `m:ss` rendering of the nominal length
    pub fn duration_label(&self) -> String {
        format_clock(self.duration_secs)
    }
}

/// Cover art URL derived from the title, whitespace removed
pub fn cover_url_for(title: &str) -> String {
    let seed: String = title.chars().filter(|c| !c.is_whitespace()).collect();
    format!("https://picsum.photos/seed/{seed}/400/400")
}

pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_url_strips_whitespace() {
        assert_eq!(
            cover_url_for("Neon  Rain\tfall"),
            "https://picsum.photos/seed/NeonRainfall/400/400"
        );
        assert_eq!(cover_url_for("Neon Rainfall"), cover_url_for("NeonRainfall"));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(184), "3:04");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_description_is_optional_in_json() {
        let json = r##"{
            "id": "9", "title": "T", "artist": "A", "duration_secs": 200,
            "cover_url": "c", "accent_color": "#fff", "audio_url": "a"
        }"##;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.description, None);
        assert_eq!(track.duration_label(), "3:20");
    }
}
