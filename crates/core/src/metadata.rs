//! Track metadata resolution.
//!
//! Submission hands the raw URL to a [`MetadataResolver`] and stores what
//! it returns verbatim. The resolver is an external collaborator: it may
//! fail or stall independently of ledger state, so callers time-box it.
//!
//! [`YouTubeUrlResolver`] is the built-in implementation. It works offline
//! from the URL alone and never contacts YouTube.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

/// Metadata describing a submitted piece of media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMetadata {
    /// Provider-side identifier (the YouTube video id).
    pub extracted_id: String,
    pub title: String,
    pub small_thumbnail_url: String,
    pub large_thumbnail_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The URL does not point at media this resolver understands.
    #[error("Unsupported media URL: {0}")]
    Unsupported(String),

    /// The provider could not be reached or answered with garbage.
    #[error("Metadata provider failure: {0}")]
    Provider(String),
}

/// Resolves a submitted URL into storable track metadata.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<ResolvedMetadata, ResolveError>;
}

/// Length of every YouTube video id.
pub const YOUTUBE_ID_LEN: usize = 11;

/// Matches `watch?v=`, `youtu.be/`, `embed/`, `shorts/` and `live/` URLs on
/// the `www`, `m` and `music` hosts.
static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:(?:www|m|music)\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/]|$)",
    )
    .expect("valid regex")
});

/// Extract the video id from a YouTube URL.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_URL_RE
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Offline resolver for YouTube links.
///
/// Thumbnails use the fixed public `i.ytimg.com` layout; the title is a
/// placeholder derived from the video id.
#[derive(Debug, Clone, Default)]
pub struct YouTubeUrlResolver;

#[async_trait]
impl MetadataResolver for YouTubeUrlResolver {
    async fn resolve(&self, url: &str) -> Result<ResolvedMetadata, ResolveError> {
        let id = extract_youtube_id(url).ok_or_else(|| ResolveError::Unsupported(url.to_string()))?;
        Ok(ResolvedMetadata {
            extracted_id: id.to_string(),
            title: format!("YouTube video {id}"),
            small_thumbnail_url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
            large_thumbnail_url: format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_when_v_is_not_first_param() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_short_link() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_embed_shorts_and_music() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://music.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_foreign_and_malformed_urls() {
        assert_eq!(extract_youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/short"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQtoolong"), None);
        assert_eq!(extract_youtube_id("not a url"), None);
        assert_eq!(extract_youtube_id(""), None);
    }

    #[tokio::test]
    async fn resolver_builds_thumbnail_urls() {
        let meta = YouTubeUrlResolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(meta.extracted_id, "dQw4w9WgXcQ");
        assert_eq!(meta.extracted_id.len(), YOUTUBE_ID_LEN);
        assert_eq!(
            meta.small_thumbnail_url,
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/mqdefault.jpg"
        );
        assert_eq!(
            meta.large_thumbnail_url,
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[tokio::test]
    async fn resolver_rejects_unsupported_url() {
        let err = YouTubeUrlResolver
            .resolve("https://example.com/song.mp3")
            .await
            .unwrap_err();
        assert_matches!(err, ResolveError::Unsupported(_));
    }
}
