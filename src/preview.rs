//! Read-only preview extraction for the wizard's destination screen.

use crate::format::AudioFormat;
use crate::tags::{frames::Mp3Frames, GenericTags};
use std::path::Path;

/// Display data for one audio file: a title and, when present, embedded
/// album art.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    pub artwork: Option<Artwork>,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Artwork {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Extract a display title and the first embedded picture from `path`.
///
/// Advisory only: never mutates the file, and an unopenable file yields an
/// empty preview instead of an error.
///
/// Title resolution: MP3 extended-frame title, then generic title, then the
/// file's base name. Artwork: the MP3 frame container's first picture, or
/// the first picture the format's generic tag exposes.
pub fn preview(path: &Path) -> Preview {
    let Ok(generic) = GenericTags::open(path) else {
        tracing::debug!("Preview unavailable for {}", path.display());
        return Preview::default();
    };

    let format = AudioFormat::from_path(path);

    let (frame_title, artwork) = if format.has_frame_container() {
        let frames = Mp3Frames::open_or_empty(path);
        let title = frames.title().map(str::to_string);
        let artwork = frames.first_picture().map(|p| Artwork {
            data: p.data.clone(),
            mime_type: p.mime_type.clone(),
        });
        (title, artwork)
    } else {
        let artwork = generic.first_picture().map(|p| Artwork {
            data: p.data().to_vec(),
            mime_type: p
                .mime_type()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        });
        (None, artwork)
    };

    let title = frame_title
        .or_else(|| generic.title().map(str::to_string))
        .or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    Preview { artwork, title }
}
