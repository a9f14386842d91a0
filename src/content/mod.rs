//! Content normalization and display hints for generated artifacts.
//!
//! The generation service sometimes emits file content pre-formatted for
//! chat display - wrapped in a fenced code block with an optional language
//! tag - instead of raw file content. [`strip_code_fence`] removes exactly
//! that wrapping and nothing else; it is applied uniformly to every value
//! before the artifact set is stored.
//!
//! [`display_hint`] derives a syntax-highlighting hint from a path's file
//! extension. Rendering itself happens outside this crate; the hint is the
//! contract with whatever presents the selected file.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A leading fence line: three backticks, an optional language tag, then a
/// line break.
static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[^\n]*\r?\n").expect("valid leading fence regex"));

/// A trailing fence line: a line break, three backticks, optional trailing
/// whitespace at end of input.
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n```\s*$").expect("valid trailing fence regex"));

/// Strip a fenced code-block wrapper from `content`, if present.
///
/// The wrapper is removed only when both a leading fence line and a matching
/// trailing fence line exist; content with a partial fence (or none at all)
/// is returned unchanged. Windows line endings are tolerated on both fence
/// lines.
///
/// # Examples
///
/// ```rust
/// use genx_cli::content::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```java\nclass A{}\n```"), "class A{}");
/// assert_eq!(strip_code_fence("plain text"), "plain text");
/// ```
pub fn strip_code_fence(content: &str) -> Cow<'_, str> {
    let Some(leading) = LEADING_FENCE.find(content) else {
        return Cow::Borrowed(content);
    };
    let rest = &content[leading.end()..];
    let Some(trailing) = TRAILING_FENCE.find(rest) else {
        return Cow::Borrowed(content);
    };
    Cow::Owned(rest[..trailing.start()].to_string())
}

/// Derive a syntax-highlighting hint from an artifact path's extension.
///
/// Unknown or missing extensions fall back to `"text"`. XML and HTML map to
/// `"markup"`, matching the convention of common highlighters.
pub fn display_hint(path: &str) -> &'static str {
    let base = path.rsplit('/').next().unwrap_or(path);
    let ext = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return "text",
    };
    match ext.as_str() {
        "java" => "java",
        "xml" | "html" | "htm" => "markup",
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" => "python",
        "json" => "json",
        "css" => "css",
        "md" => "markdown",
        "yml" | "yaml" => "yaml",
        _ => "text",
    }
}
