use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;

/// Separator between namespace segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Anything outside the regex word class (letters, marks, digits, connector
/// punctuation) or the separator. Same class the declaration gate matches.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w.]").expect("non-word pattern is a valid regex"));

/// Combine a root identifier and a relative folder path into a dotted namespace.
///
/// Path separators become dots, any character that is neither a word character
/// nor a dot becomes `_`, empty segments vanish (which collapses `..` runs and
/// trims dots at both ends) and segments that do not open with a letter or `_`,
/// digits mostly, get a leading `_`.
///
/// # Examples
/// ```
/// use nsfill_core::naming::synthesize;
///
/// assert_eq!(synthesize("MyApp", "Services/Http"), "MyApp.Services.Http");
/// assert_eq!(synthesize("9Foo", "bar"), "_9Foo.bar");
/// assert_eq!(synthesize("My-App", ""), "My_App");
/// ```
pub fn synthesize(root: &str, relative: &str) -> String {
    let joined = match (root.is_empty(), relative.is_empty()) {
        (_, true) => Cow::Borrowed(root),
        (true, false) => Cow::Borrowed(relative),
        (false, false) => Cow::Owned(format!("{root}/{relative}")),
    };

    let dotted = joined.replace(['/', '\\'], ".");
    let sanitized = NON_WORD.replace_all(&dotted, "_");

    sanitized
        .split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(escape_segment)
        .collect::<Vec<_>>()
        .join(".")
}

/// Same as [`synthesize`] with the relative part taken from a filesystem path.
pub fn synthesize_path(root: &str, relative: &Path) -> String {
    synthesize(root, &relative.to_string_lossy())
}

/// Segments must open with a letter or `_`. Digits are the usual offenders;
/// a leading combining mark or connector gets the same treatment.
fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.starts_with(|c: char| c == '_' || c.is_alphabetic()) {
        Cow::Owned(format!("_{segment}"))
    } else {
        Cow::Borrowed(segment)
    }
}
