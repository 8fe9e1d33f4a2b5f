//! Link and image URL filtering.
//!
//! Exported pages link to plenty of things that have no Markdown counterpart:
//! in-page anchors, REST endpoints, relative asset folders, macro
//! placeholders. Those links and images are dropped silently.

use serde::Deserialize;

/// Prefixes that make a URL unusable, merged from every export variant seen.
pub const DEFAULT_BLOCKED_PREFIXES: &[&str] =
    &[".", "/", "(", "[", "attachments", "image", "rest/"];

/// Path segment marking a scaled-down copy of an attachment image.
pub const DEFAULT_THUMBNAIL_MARKER: &str = "/thumbnail/";

/// Block-list for link targets and image sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrlFilter {
    /// A URL whose trimmed form starts with one of these is rejected.
    pub blocked_prefixes: Vec<String>,
    /// Image sources containing this substring are rejected.
    pub thumbnail_marker: String,
}

impl Default for UrlFilter {
    fn default() -> Self {
        Self {
            blocked_prefixes: DEFAULT_BLOCKED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            thumbnail_marker: DEFAULT_THUMBNAIL_MARKER.to_string(),
        }
    }
}

impl UrlFilter {
    /// Filter with a custom prefix list and the default thumbnail marker.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocked_prefixes: prefixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether a link target may be rendered.
    pub fn allows(&self, url: Option<&str>) -> bool {
        let Some(url) = url.map(str::trim) else {
            return false;
        };
        if url.is_empty() || url == "#" {
            return false;
        }
        !self
            .blocked_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && url.starts_with(prefix.as_str()))
    }

    /// Whether an image source may be rendered.
    pub fn allows_image(&self, src: Option<&str>) -> bool {
        self.allows(src) && !self.is_thumbnail(src.unwrap_or_default())
    }

    fn is_thumbnail(&self, src: &str) -> bool {
        !self.thumbnail_marker.is_empty() && src.contains(self.thumbnail_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_fragment() {
        let filter = UrlFilter::default();
        assert!(!filter.allows(None));
        assert!(!filter.allows(Some("")));
        assert!(!filter.allows(Some("   ")));
        assert!(!filter.allows(Some("#")));
        assert!(!filter.allows(Some(" # ")));
    }

    #[test]
    fn test_rejects_blocked_prefixes() {
        let filter = UrlFilter::default();
        for url in [
            "./local.html",
            "/wiki/spaces",
            "(placeholder)",
            "[macro]",
            "attachments/1/file.png",
            "images/icons/bullet_blue.gif",
            "rest/api/content",
        ] {
            assert!(!filter.allows(Some(url)), "{url} should be rejected");
        }
    }

    #[test]
    fn test_accepts_pages_and_external_links() {
        let filter = UrlFilter::default();
        assert!(filter.allows(Some("Install_Guide_12345.html")));
        assert!(filter.allows(Some("https://example.com/docs")));
        assert!(filter.allows(Some("#section-2")));
    }

    #[test]
    fn test_thumbnails() {
        let filter = UrlFilter::default();
        assert!(filter.allows_image(Some("https://wiki.example.com/download/diagram.png")));
        assert!(!filter.allows_image(Some(
            "https://wiki.example.com/download/thumbnail/42/diagram.png"
        )));
        // Thumbnail paths are still fine as link targets.
        assert!(filter.allows(Some("https://wiki.example.com/download/thumbnail/42/d.png")));
    }

    #[test]
    fn test_custom_prefixes() {
        let filter = UrlFilter::with_prefixes(["mailto:"]);
        assert!(!filter.allows(Some("mailto:team@example.com")));
        assert!(filter.allows(Some("/absolute/path")));
    }
}
