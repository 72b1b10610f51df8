use std::path::Path;

/// Extensions the wizard offers in its file prompts.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "wav", "ogg", "aac"];

/// Audio format derived from a file's extension.
///
/// Format-specific behavior in the transfer procedure is driven by
/// capability checks on this enum rather than by string-suffix tests
/// scattered at the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Flac,
    M4a,
    Wav,
    Ogg,
    Aac,
    Unknown,
}

impl AudioFormat {
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::Unknown;
        };

        match ext.to_lowercase().as_str() {
            "mp3" => Self::Mp3,
            "flac" => Self::Flac,
            "m4a" => Self::M4a,
            "wav" => Self::Wav,
            "ogg" => Self::Ogg,
            "aac" => Self::Aac,
            _ => Self::Unknown,
        }
    }

    /// Whether the format exposes an extended-frame container (embedded
    /// pictures and comments beyond plain key/value tags). Only MP3 does.
    pub fn has_frame_container(self) -> bool {
        matches!(self, Self::Mp3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_path() {
        assert_eq!(AudioFormat::from_path(Path::new("a.mp3")), AudioFormat::Mp3);
        assert_eq!(
            AudioFormat::from_path(Path::new("/x/y/track.FLAC")),
            AudioFormat::Flac
        );
        assert_eq!(AudioFormat::from_path(Path::new("b.m4a")), AudioFormat::M4a);
        assert_eq!(AudioFormat::from_path(Path::new("c.wav")), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_path(Path::new("d.ogg")), AudioFormat::Ogg);
        assert_eq!(AudioFormat::from_path(Path::new("e.aac")), AudioFormat::Aac);
        assert_eq!(
            AudioFormat::from_path(Path::new("f.txt")),
            AudioFormat::Unknown
        );
        assert_eq!(
            AudioFormat::from_path(Path::new("noext")),
            AudioFormat::Unknown
        );
    }

    #[test]
    fn test_frame_container_capability() {
        assert!(AudioFormat::Mp3.has_frame_container());
        assert!(!AudioFormat::Flac.has_frame_container());
        assert!(!AudioFormat::Wav.has_frame_container());
        assert!(!AudioFormat::Unknown.has_frame_container());
    }
}
