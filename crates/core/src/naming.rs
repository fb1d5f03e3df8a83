//! Object naming for artifacts written to durable storage.
//!
//! Names are time-derived (`{prefix}_{unix_secs}_{uuid}.{ext}`). The
//! seconds component keeps objects sortable by creation time; the UUID v7
//! suffix keeps two requests finishing in the same second from
//! overwriting each other.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix and extension for synthesized speech.
pub const AUDIO_OBJECT: (&str, &str) = ("audio", "mp3");
/// Prefix and extension for the final lip-synced video.
pub const FINAL_VIDEO_OBJECT: (&str, &str) = ("final_video", "mp4");

/// Build a unique object name for the current instant.
pub fn unique_object_name((prefix, ext): (&str, &str)) -> String {
    object_name_at(prefix, ext, Utc::now(), Uuid::now_v7())
}

/// Deterministic form of [`unique_object_name`].
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use vidsync_core::naming::object_name_at;
///
/// let at = chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// let id = uuid::Uuid::nil();
/// assert_eq!(
///     object_name_at("audio", "mp3", at, id),
///     "audio_1700000000_00000000000000000000000000000000.mp3"
/// );
/// ```
pub fn object_name_at(prefix: &str, ext: &str, at: DateTime<Utc>, id: Uuid) -> String {
    format!("{prefix}_{}_{}.{ext}", at.timestamp(), id.simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_in_same_second_do_not_collide() {
        let a = unique_object_name(AUDIO_OBJECT);
        let b = unique_object_name(AUDIO_OBJECT);
        assert_ne!(a, b);
    }

    #[test]
    fn final_video_name_shape() {
        let name = unique_object_name(FINAL_VIDEO_OBJECT);
        assert!(name.starts_with("final_video_"));
        assert!(name.ends_with(".mp4"));
    }
}
