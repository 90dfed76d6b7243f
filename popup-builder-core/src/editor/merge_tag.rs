//! Merge tags: `{{name}}` placeholders filled in per visitor

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A merge tag offered in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeTag {
    pub label: &'static str,
    pub tag: &'static str,
}

pub const MERGE_TAGS: [MergeTag; 3] = [
    MergeTag {
        label: "First name",
        tag: "{{first_name}}",
    },
    MergeTag {
        label: "Last name",
        tag: "{{last_name}}",
    },
    MergeTag {
        label: "Organisation Name",
        tag: "{{organisation_name}}",
    },
];

static TAG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").ok());

/// Insert `tag` into `text` at a character offset, or at the end.
///
/// Offsets past the end are clamped.
#[must_use]
pub fn insert_at(text: &str, tag: &str, cursor: Option<usize>) -> String {
    let split = match cursor {
        Some(pos) => text
            .char_indices()
            .nth(pos)
            .map_or(text.len(), |(byte, _)| byte),
        None => text.len(),
    };
    let mut out = String::with_capacity(text.len() + tag.len());
    out.push_str(&text[..split]);
    out.push_str(tag);
    out.push_str(&text[split..]);
    out
}

/// Append `tag`, separated by a space when `text` is non-empty.
#[must_use]
pub fn append(text: &str, tag: &str) -> String {
    if text.is_empty() {
        tag.to_string()
    } else {
        format!("{text} {tag}")
    }
}

/// Replace known tags with values; unknown tags are left as written.
#[must_use]
pub fn substitute(text: &str, values: &HashMap<&str, &str>) -> String {
    let Some(pattern) = TAG_PATTERN.as_ref() else {
        return text.to_string();
    };
    pattern
        .replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => (*value).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of the tags used in `text`, in order of appearance.
#[must_use]
pub fn tags_in(text: &str) -> Vec<String> {
    TAG_PATTERN.as_ref().map_or_else(Vec::new, |pattern| {
        pattern
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_cursor() {
        assert_eq!(
            insert_at("Hello", "{{first_name}}", Some(3)),
            "Hel{{first_name}}lo"
        );
    }

    #[test]
    fn inserts_at_end_without_cursor_or_past_end() {
        assert_eq!(insert_at("Hi", "{{x}}", None), "Hi{{x}}");
        assert_eq!(insert_at("Hi", "{{x}}", Some(40)), "Hi{{x}}");
    }

    #[test]
    fn cursor_counts_characters() {
        assert_eq!(insert_at("⚡ab", "|", Some(1)), "⚡|ab");
    }

    #[test]
    fn append_separates_with_space() {
        assert_eq!(append("", "{{last_name}}"), "{{last_name}}");
        assert_eq!(append("Hey", "{{last_name}}"), "Hey {{last_name}}");
    }

    #[test]
    fn substitute_leaves_unknown_tags() {
        let values = HashMap::from([("first_name", "Ada")]);
        assert_eq!(
            substitute("Hi {{first_name}} from {{ organisation_name }}", &values),
            "Hi Ada from {{ organisation_name }}"
        );
        assert_eq!(
            tags_in("{{first_name}} {{last_name}}"),
            vec!["first_name", "last_name"]
        );
    }
}
