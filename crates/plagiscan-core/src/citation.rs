//! Grounding metadata attached to a reply by the web-search tool.
//!
//! Sources are never linked to spans by identifier. A web span's `source` URL
//! is looked up here at display time by exact string match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One grounding chunk. Only web chunks are understood; others deserialize
/// with `web: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

impl GroundingSource {
    pub fn web(uri: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            web: Some(WebSource {
                uri: Some(uri.into()),
                title: title.map(str::to_string),
            }),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.web.as_ref()?.uri.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.web.as_ref()?.title.as_deref()
    }

    /// Title if present, else the URI. `None` when there is no URI to link to.
    pub fn label(&self) -> Option<&str> {
        let uri = self.uri()?;
        Some(self.title().filter(|t| !t.is_empty()).unwrap_or(uri))
    }
}

/// Page title of the first source whose URI equals `uri` exactly.
pub fn title_for<'a>(sources: &'a [GroundingSource], uri: &str) -> Option<&'a str> {
    sources
        .iter()
        .find(|s| s.uri() == Some(uri))
        .and_then(GroundingSource::title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_lookup_is_exact() {
        let sources = vec![
            GroundingSource::web("https://example.com/a", Some("Page A")),
            GroundingSource::web("https://example.com/b", None),
        ];
        assert_eq!(title_for(&sources, "https://example.com/a"), Some("Page A"));
        assert_eq!(title_for(&sources, "https://example.com/a/"), None);
        assert_eq!(title_for(&sources, "https://example.com/b"), None);
    }

    #[test]
    fn label_falls_back_to_uri() {
        let titled = GroundingSource::web("https://x.example", Some("X"));
        let bare = GroundingSource::web("https://y.example", None);
        let empty = GroundingSource::default();
        assert_eq!(titled.label(), Some("X"));
        assert_eq!(bare.label(), Some("https://y.example"));
        assert_eq!(empty.label(), None);
    }

    #[test]
    fn chunk_without_web_parses() {
        let json = r#"[{"web": {"uri": "https://a.example", "title": "A"}}, {"retrievedContext": {}}]"#;
        let parsed: Vec<GroundingSource> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].uri(), Some("https://a.example"));
        assert!(parsed[1].web.is_none());
    }
}
