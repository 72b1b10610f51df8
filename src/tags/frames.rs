//! MP3 extended-frame container, backed by the `id3` crate.
//!
//! Covers the frames the generic tag layer does not: embedded pictures
//! (APIC) and comments (COMM).

use crate::error::TransferError;
use id3::frame::{Comment, Picture};
use id3::{Tag, TagLike, Version};
use std::path::{Path, PathBuf};

/// The language code written on synthesized comments: "undetermined".
const COMMENT_LANG: &str = "XXX";

/// An MP3 file's ID3 frame container.
pub struct Mp3Frames {
    path: PathBuf,
    tag: Tag,
}

impl Mp3Frames {
    /// Open the frame container of `path`. A missing or corrupt container
    /// yields a fresh empty one instead of an error.
    pub fn open_or_empty(path: &Path) -> Self {
        let tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());
        Self {
            path: path.to_path_buf(),
            tag,
        }
    }

    /// All embedded pictures, in frame order.
    pub fn pictures(&self) -> Vec<Picture> {
        self.tag.pictures().cloned().collect()
    }

    pub fn first_picture(&self) -> Option<&Picture> {
        self.tag.pictures().next()
    }

    pub fn clear_pictures(&mut self) {
        let _ = self.tag.remove("APIC");
    }

    pub fn add_picture(&mut self, picture: Picture) {
        self.tag.add_frame(picture);
    }

    pub fn title(&self) -> Option<&str> {
        self.tag.title()
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.tag.comments()
    }

    /// Drop all existing comment frames and insert exactly one replacement
    /// with an undetermined language code and empty description.
    pub fn replace_comment(&mut self, text: &str) {
        let _ = self.tag.remove("COMM");
        self.tag.add_frame(Comment {
            lang: COMMENT_LANG.to_string(),
            description: String::new(),
            text: text.to_string(),
        });
    }

    /// Persist the frame container back to the file as ID3v2.4.
    pub fn save(&self) -> Result<(), TransferError> {
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(|e| TransferError::write_failed(&self.path, e))
    }
}
