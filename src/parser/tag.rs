//! Exclusion markers and Go struct tag parsing.

use crate::error::FoggoError;

/// Tag key recognised when no marker is configured: `foggo:"-"`.
pub const DEFAULT_TAG_KEY: &str = "foggo";

/// How a field opts out of option generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionMarker {
    /// Struct tag whose value for `key` is `-`, e.g. `` `foggo:"-"` ``
    Tag {
        /// Tag key to look up
        key: String,
    },
    /// A doc comment above the field, or a trailing comment on it, containing `directive`
    Comment {
        /// Text searched for inside the comment
        directive: String,
    },
}

impl Default for ExclusionMarker {
    fn default() -> Self {
        ExclusionMarker::Tag {
            key: DEFAULT_TAG_KEY.to_string(),
        }
    }
}

impl ExclusionMarker {
    /// Marker matching `key:"-"` in the field's struct tag
    pub fn tag(key: impl Into<String>) -> Self {
        ExclusionMarker::Tag { key: key.into() }
    }

    /// Marker matching comments that contain `directive`
    pub fn comment(directive: impl Into<String>) -> Self {
        ExclusionMarker::Comment {
            directive: directive.into(),
        }
    }

    /// Reject markers that would match everything or nothing
    ///
    /// # Errors
    ///
    /// Returns `FoggoError::Config` for a blank tag key or comment directive.
    pub fn validate(&self) -> Result<(), FoggoError> {
        match self {
            ExclusionMarker::Tag { key } if key.trim().is_empty() => {
                Err(FoggoError::Config("exclusion tag key must not be empty".into()))
            }
            ExclusionMarker::Comment { directive } if directive.trim().is_empty() => Err(
                FoggoError::Config("exclusion comment directive must not be empty".into()),
            ),
            _ => Ok(()),
        }
    }

    /// Whether a field carrying `tag` (already unquoted) and `comments` is excluded
    ///
    /// A blank key or directive never excludes anything.
    pub fn excludes(&self, tag: Option<&str>, comments: &[&str]) -> bool {
        if self.validate().is_err() {
            return false;
        }
        match self {
            ExclusionMarker::Tag { key } => tag
                .and_then(|t| lookup_tag(t, key))
                .is_some_and(|value| value == "-"),
            ExclusionMarker::Comment { directive } => {
                comments.iter().any(|c| c.contains(directive.as_str()))
            }
        }
    }
}

/// Strip the quotes from a tag literal as written in source.
///
/// Raw literals (`` `...` ``) are taken as-is; interpreted literals (`"..."`)
/// have their escapes resolved.
pub fn unquote_tag(literal: &str) -> String {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return raw.to_string();
    }
    unquote(literal).unwrap_or_default()
}

/// Look up `key` in a struct tag, following the `key:"value"` convention.
///
/// Parsing stops at the first malformed pair, the same way Go's
/// `reflect.StructTag.Lookup` does.
pub fn lookup_tag(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag.as_bytes();
    loop {
        while let Some((&b' ', tail)) = rest.split_first() {
            rest = tail;
        }
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .iter()
            .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
            .unwrap_or(rest.len());
        if name_len == 0
            || rest.get(name_len) != Some(&b':')
            || rest.get(name_len + 1) != Some(&b'"')
        {
            return None;
        }
        let (name, tail) = rest.split_at(name_len);
        // tail starts with `:"`
        let quoted = tail.get(1..)?;

        let mut i = 1;
        while i < quoted.len() && quoted.get(i) != Some(&b'"') {
            if quoted.get(i) == Some(&b'\\') {
                i += 1;
            }
            i += 1;
        }
        if i >= quoted.len() {
            return None;
        }
        let (value, tail) = quoted.split_at(i + 1);
        rest = tail;

        if name == key.as_bytes() {
            return std::str::from_utf8(value).ok().and_then(unquote);
        }
    }
}

fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            other => out.push(other),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tag_finds_key_among_others() {
        let tag = r#"json:"name,omitempty" foggo:"-" yaml:"name""#;
        assert_eq!(lookup_tag(tag, "foggo").as_deref(), Some("-"));
        assert_eq!(lookup_tag(tag, "json").as_deref(), Some("name,omitempty"));
        assert_eq!(lookup_tag(tag, "yaml").as_deref(), Some("name"));
        assert_eq!(lookup_tag(tag, "xml"), None);
    }

    #[test]
    fn test_lookup_tag_stops_at_malformed_pair() {
        assert_eq!(lookup_tag(r#"json name foggo:"-""#, "foggo"), None);
        assert_eq!(lookup_tag(r#"foggo:"-"#, "foggo"), None);
        assert_eq!(lookup_tag("", "foggo"), None);
    }

    #[test]
    fn test_lookup_tag_resolves_escapes() {
        assert_eq!(
            lookup_tag(r#"doc:"say \"hi\"""#, "doc").as_deref(),
            Some("say \"hi\"")
        );
    }

    #[test]
    fn test_unquote_tag_literals() {
        assert_eq!(unquote_tag(r#"`foggo:"-"`"#), r#"foggo:"-""#);
        assert_eq!(unquote_tag(r#""foggo:\"-\"""#), r#"foggo:"-""#);
    }

    #[test]
    fn test_marker_tag_requires_dash_value() {
        let marker = ExclusionMarker::default();
        assert!(marker.excludes(Some(r#"foggo:"-""#), &[]));
        assert!(!marker.excludes(Some(r#"foggo:"keep""#), &[]));
        assert!(!marker.excludes(None, &["// foggo:\"-\""]));
    }

    #[test]
    fn test_blank_markers_are_rejected_and_never_match() {
        for marker in [
            ExclusionMarker::comment(""),
            ExclusionMarker::comment("  "),
            ExclusionMarker::tag(""),
        ] {
            assert!(matches!(marker.validate(), Err(FoggoError::Config(_))));
            assert!(!marker.excludes(Some(r#"foggo:"-""#), &["// Address to listen on"]));
        }
        assert!(ExclusionMarker::default().validate().is_ok());
    }

    #[test]
    fn test_marker_comment_matches_directive() {
        let marker = ExclusionMarker::comment("foggo:ignore");
        assert!(marker.excludes(None, &["//foggo:ignore"]));
        assert!(marker.excludes(Some(r#"json:"a""#), &["// internal", "// foggo:ignore"]));
        assert!(!marker.excludes(Some(r#"foggo:"-""#), &["// regular docs"]));
    }
}
