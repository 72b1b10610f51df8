//! Tag reader/writer adapter.
//!
//! [`GenericTags`] wraps lofty's format-polymorphic key/value tag layer and
//! covers every supported format. [`frames::Mp3Frames`] wraps the MP3
//! extended-frame container (embedded pictures, comments), which the generic
//! layer does not model.

pub mod frames;

use crate::error::TransferError;
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::Picture;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, ItemValue, Tag, TagExt, TagItem};
use std::path::{Path, PathBuf};

/// An in-memory view of a file's generic tag set.
///
/// Mutations apply to the handle only until [`GenericTags::save`] persists
/// them. Pictures carried by the underlying tag are left alone by the
/// item-level operations, so saving never disturbs a file's native
/// embedded pictures.
pub struct GenericTags {
    path: PathBuf,
    tag: Tag,
}

impl GenericTags {
    /// Open the primary tag of `path`, or an empty tag of the format's
    /// primary tag type when the file carries none.
    ///
    /// Fails with [`TransferError::UnsupportedFormat`] when the file is
    /// missing, its header is corrupt, or lofty does not recognize it.
    pub fn open(path: &Path) -> Result<Self, TransferError> {
        let tagged_file = Probe::open(path)
            .map_err(|_| TransferError::UnsupportedFormat(path.to_path_buf()))?
            .read()
            .map_err(|_| TransferError::UnsupportedFormat(path.to_path_buf()))?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .cloned()
            .unwrap_or_else(|| Tag::new(tagged_file.file_type().primary_tag_type()));

        Ok(Self {
            path: path.to_path_buf(),
            tag,
        })
    }

    /// Remove every key/value item, leaving pictures untouched.
    pub fn clear_items(&mut self) {
        self.tag.retain(|_| false);
    }

    /// Iterate all key/value items, including repeated keys.
    pub fn items(&self) -> impl Iterator<Item = &TagItem> {
        self.tag.items()
    }

    /// Append an item verbatim, preserving multi-valued keys.
    pub fn push_item(&mut self, item: TagItem) {
        self.tag.push(item);
    }

    /// Set a single-valued text item, replacing any existing value.
    pub fn set(&mut self, key: ItemKey, value: impl Into<String>) {
        self.tag
            .insert(TagItem::new(key, ItemValue::Text(value.into())));
    }

    pub fn title(&self) -> Option<&str> {
        self.tag.get_string(&ItemKey::TrackTitle)
    }

    pub fn comment(&self) -> Option<&str> {
        self.tag.get_string(&ItemKey::Comment)
    }

    /// First native embedded picture, if the format exposes any through the
    /// generic tag. Preview-only; the transfer procedure never copies these.
    pub fn first_picture(&self) -> Option<&Picture> {
        self.tag.pictures().first()
    }

    /// Persist the in-memory tag state back to the file.
    pub fn save(&self) -> Result<(), TransferError> {
        self.tag
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(|e| TransferError::write_failed(&self.path, e))
    }
}
