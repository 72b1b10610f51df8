//! The metadata transfer procedure.
//!
//! Copies the generic tag set, MP3 embedded pictures, and a synthesized
//! update comment from a source file onto a destination file, then moves the
//! destination onto the source path so the original path holds the updated
//! content.

use crate::error::TransferError;
use crate::format::AudioFormat;
use crate::tags::{frames::Mp3Frames, GenericTags};
use std::fs;
use std::io;
use std::path::Path;

/// Transfer metadata from `source` onto `dest`, then replace `source` with
/// the updated `dest` file.
///
/// `notes` and `applied_at` feed the synthesized comment written to MP3
/// destinations; `applied_at` is expected pre-formatted
/// (`YYYY-MM-DD HH:MM:SS`).
///
/// On success the source path holds the destination's audio with the
/// source's tags, and the destination path no longer exists. On error
/// before the final replace, the source file's content is untouched.
pub fn transfer(
    source: &Path,
    dest: &Path,
    notes: &str,
    applied_at: &str,
) -> Result<(), TransferError> {
    tracing::info!(
        "Transferring metadata from {} to {}",
        source.display(),
        dest.display()
    );

    let src_tags = GenericTags::open(source)?;
    let mut dst_tags = GenericTags::open(dest)?;

    // Copy the whole generic tag set, keeping repeated keys verbatim.
    dst_tags.clear_items();
    for item in src_tags.items() {
        dst_tags.push_item(item.clone());
    }

    // Persist the generic layer before the frame-container work so pictures
    // and the comment written below are the final frames on disk.
    dst_tags.save()?;

    let src_format = AudioFormat::from_path(source);
    let dst_format = AudioFormat::from_path(dest);

    if src_format.has_frame_container() && dst_format.has_frame_container() {
        transfer_pictures(source, dest)?;
    }

    if dst_format.has_frame_container() {
        let text = synthesize_comment(notes, applied_at, dst_tags.comment());
        // Best effort: the update note is a non-essential enhancement, so a
        // corrupt frame container must not fail the whole transfer.
        let _ = write_update_comment(dest, &text);
    }

    replace_file(dest, source).map_err(|e| TransferError::write_failed(source, e))?;

    tracing::info!("Transfer complete, {} replaced", source.display());
    Ok(())
}

/// Copy all embedded pictures from the source's frame container onto the
/// destination's, replacing whatever pictures the destination had.
fn transfer_pictures(source: &Path, dest: &Path) -> Result<(), TransferError> {
    let src_frames = Mp3Frames::open_or_empty(source);
    let mut dst_frames = Mp3Frames::open_or_empty(dest);

    dst_frames.clear_pictures();
    for picture in src_frames.pictures() {
        dst_frames.add_picture(picture);
    }

    dst_frames.save()
}

/// Build the text for the synthesized update comment.
///
/// With notes or a timestamp present, the comment records both; otherwise it
/// falls back to the destination handle's current generic comment (the value
/// just copied from the source), or the empty string.
pub(crate) fn synthesize_comment(notes: &str, applied_at: &str, existing: Option<&str>) -> String {
    if notes.is_empty() && applied_at.is_empty() {
        return existing.unwrap_or_default().to_string();
    }

    let mut text = String::new();
    if !applied_at.is_empty() {
        text.push_str(&format!("Updated: {}", applied_at));
    }
    if !notes.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&format!("Notes: {}", notes));
    }
    text
}

/// Replace every comment frame on `dest` with a single one holding `text`.
///
/// This is the swallowed boundary of the transfer's best-effort comment
/// step; callers inside [`transfer`] discard the result.
pub(crate) fn write_update_comment(dest: &Path, text: &str) -> Result<(), TransferError> {
    let mut frames = Mp3Frames::open_or_empty(dest);
    frames.replace_comment(text);
    frames.save()
}

/// Move `from` onto `to`, renaming when possible and falling back to
/// copy-then-delete across filesystems. `from` ceases to exist.
pub(crate) fn replace_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::tag::ItemKey;
    use std::path::PathBuf;

    /// Smallest WAV that lofty will parse: RIFF header, PCM fmt chunk, and a
    /// data chunk filled with `marker` so tests can tell payloads apart.
    fn write_minimal_wav(path: &Path, marker: u8) {
        const DATA_LEN: u32 = 64;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + DATA_LEN).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&DATA_LEN.to_le_bytes());
        bytes.extend_from_slice(&vec![marker; DATA_LEN as usize]);
        std::fs::write(path, bytes).unwrap();
    }

    fn wav_pair(dir: &Path) -> (PathBuf, PathBuf) {
        let src = dir.join("original.wav");
        let dst = dir.join("update.wav");
        write_minimal_wav(&src, 0xAA);
        write_minimal_wav(&dst, 0xBB);
        (src, dst)
    }

    #[test]
    fn test_comment_with_notes_and_timestamp() {
        assert_eq!(
            synthesize_comment("fix glitch", "2024-01-01 10:00:00", None),
            "Updated: 2024-01-01 10:00:00\nNotes: fix glitch"
        );
    }

    #[test]
    fn test_comment_with_timestamp_only() {
        assert_eq!(
            synthesize_comment("", "2024-01-01 10:00:00", Some("old")),
            "Updated: 2024-01-01 10:00:00"
        );
    }

    #[test]
    fn test_comment_with_notes_only() {
        assert_eq!(synthesize_comment("remaster", "", None), "Notes: remaster");
    }

    #[test]
    fn test_comment_falls_back_to_existing() {
        assert_eq!(synthesize_comment("", "", Some("kept")), "kept");
        assert_eq!(synthesize_comment("", "", None), "");
    }

    #[test]
    fn test_picture_transfer_replaces_destination_list() {
        use id3::frame::{Picture, PictureType};

        fn picture(picture_type: PictureType, description: &str, data: &[u8]) -> Picture {
            Picture {
                mime_type: "image/jpeg".to_string(),
                picture_type,
                description: description.to_string(),
                data: data.to_vec(),
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("original.mp3");
        let dst = dir.path().join("update.mp3");
        std::fs::write(&src, b"").unwrap();
        std::fs::write(&dst, b"").unwrap();

        let mut src_frames = Mp3Frames::open_or_empty(&src);
        src_frames.add_picture(picture(PictureType::CoverFront, "front", b"p1"));
        src_frames.add_picture(picture(PictureType::CoverBack, "back", b"p2"));
        src_frames.save().unwrap();

        let mut dst_frames = Mp3Frames::open_or_empty(&dst);
        dst_frames.add_picture(picture(PictureType::Other, "old", b"q1"));
        dst_frames.save().unwrap();

        transfer_pictures(&src, &dst).unwrap();

        // Prior pictures fully replaced, source order preserved.
        let pics = Mp3Frames::open_or_empty(&dst).pictures();
        assert_eq!(pics.len(), 2);
        assert_eq!(pics[0].data, b"p1");
        assert_eq!(pics[1].data, b"p2");
    }

    #[test]
    fn test_write_update_comment_in_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        std::fs::write(&path, b"").unwrap();

        write_update_comment(&path, "Updated: now").unwrap();

        let frames = Mp3Frames::open_or_empty(&path);
        let comments: Vec<_> = frames.comments().collect();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "Updated: now");
    }

    #[test]
    fn test_replace_file_postcondition() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("update.bin");
        let to = dir.path().join("original.bin");
        std::fs::write(&from, b"new content").unwrap();
        std::fs::write(&to, b"old content").unwrap();

        replace_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"new content");
    }

    #[test]
    fn test_unsupported_format_leaves_files_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("notes.xyz");
        let dst = dir.path().join("other.xyz");
        std::fs::write(&src, b"plain text, not audio").unwrap();
        std::fs::write(&dst, b"also not audio").unwrap();

        let err = transfer(&src, &dst, "", "2024-01-01 10:00:00").unwrap_err();
        assert!(matches!(err, TransferError::UnsupportedFormat(_)));

        assert_eq!(std::fs::read(&src).unwrap(), b"plain text, not audio");
        assert_eq!(std::fs::read(&dst).unwrap(), b"also not audio");
    }

    #[test]
    fn test_tag_set_copied_and_source_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let (src, dst) = wav_pair(dir.path());

        let mut tags = GenericTags::open(&src).unwrap();
        tags.set(ItemKey::TrackTitle, "Song");
        tags.set(ItemKey::TrackArtist, "Band");
        tags.save().unwrap();

        transfer(&src, &dst, "", "2024-01-01 10:00:00").unwrap();

        // The destination ceased to exist as a distinct file.
        assert!(!dst.exists());

        // The source path now carries the source's tags...
        let result = GenericTags::open(&src).unwrap();
        assert_eq!(result.title(), Some("Song"));

        // ...over the destination's audio payload.
        let bytes = std::fs::read(&src).unwrap();
        assert!(bytes.windows(64).any(|w| w.iter().all(|&b| b == 0xBB)));
        assert!(!bytes.windows(64).any(|w| w.iter().all(|&b| b == 0xAA)));
    }

    #[test]
    fn test_destination_tags_fully_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let (src, dst) = wav_pair(dir.path());

        let mut src_tags = GenericTags::open(&src).unwrap();
        src_tags.set(ItemKey::TrackTitle, "Keep me");
        src_tags.save().unwrap();

        let mut dst_tags = GenericTags::open(&dst).unwrap();
        dst_tags.set(ItemKey::TrackTitle, "Drop me");
        dst_tags.set(ItemKey::AlbumTitle, "Drop me too");
        dst_tags.save().unwrap();

        transfer(&src, &dst, "", "").unwrap();

        let result = GenericTags::open(&src).unwrap();
        assert_eq!(result.title(), Some("Keep me"));
        let albums: Vec<_> = result
            .items()
            .filter(|i| i.key() == &ItemKey::AlbumTitle)
            .collect();
        assert!(albums.is_empty());
    }

    #[test]
    fn test_copy_to_self_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (src, dst) = wav_pair(dir.path());

        let mut tags = GenericTags::open(&src).unwrap();
        tags.set(ItemKey::TrackTitle, "Stable");
        tags.save().unwrap();

        transfer(&src, &dst, "first pass", "2024-01-01 10:00:00").unwrap();
        transfer(&src, &src, "", "2024-01-02 11:00:00").unwrap();

        let result = GenericTags::open(&src).unwrap();
        assert_eq!(result.title(), Some("Stable"));
    }
}
