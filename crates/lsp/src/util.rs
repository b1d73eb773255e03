use std::path::PathBuf;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    uri.to_file_path().ok()
}

/// Lightweight container for document state
pub struct Document {
    pub content: String,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, version: i32) -> Self {
        Self { content, version }
    }

    /// The document after a `didChange` batch, or `None` when `version` is older
    /// than what is already held.
    pub fn apply(&self, version: i32, changes: Vec<TextDocumentContentChangeEvent>) -> Option<Self> {
        if version < self.version {
            return None;
        }
        Some(Self::new(apply_changes(&self.content, changes), version))
    }
}

/// Byte offset of an LSP position (UTF-16 columns) inside `text`.
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut line = 0;
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while line < position.line as usize {
        match chars.next() {
            Some('\n') => {
                offset += 1;
                line += 1;
            }
            Some('\r') => {
                offset += 1;
                if chars.next_if_eq(&'\n').is_some() {
                    offset += 1;
                }
                line += 1;
            }
            Some(c) => offset += c.len_utf8(),
            None => return offset,
        }
    }

    let mut utf16_count = 0;
    while utf16_count < position.character as usize {
        match chars.next() {
            Some('\n' | '\r') | None => break,
            Some(c) => {
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            }
        }
    }
    offset
}

pub fn utf16_col_to_byte_col(line_content: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line_content.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

/// Applies a `didChange` batch in order. Ranged edits are spliced in, a change
/// without a range replaces the whole text.
pub fn apply_changes(content: &str, changes: Vec<TextDocumentContentChangeEvent>) -> String {
    let mut content = content.to_string();
    for change in changes {
        match change.range {
            Some(range) => {
                let start = offset_at(&content, range.start);
                let end = offset_at(&content, range.end).max(start);
                content.replace_range(start..end, &change.text);
            }
            None => content = change.text,
        }
    }
    content
}

/// Line `index` without its terminator. `\r\n`, `\n` and a lone `\r` all end a
/// line, matching [`offset_at`].
fn nth_line(content: &str, index: usize) -> Option<&str> {
    let mut rest = content;
    for _ in 0..index {
        let brk = rest.find(['\n', '\r'])?;
        let width = if rest[brk..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[brk + width..];
    }
    let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Text of the cursor's line up to the cursor.
pub fn line_prefix(content: &str, position: Position) -> Option<String> {
    let line = nth_line(content, position.line as usize)?;
    let end = utf16_col_to_byte_col(line, position.character as usize);
    Some(line[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    #[test]
    fn test_line_prefix_cuts_at_cursor() {
        let content = "using System;\n\nnamespace MyApp.Services\n{\n}\n";
        let prefix = line_prefix(content, Position::new(2, 12)).unwrap();
        assert_eq!(prefix, "namespace My");
    }

    #[test]
    fn test_line_prefix_counts_utf16() {
        // '𝕏' is two UTF-16 units and four bytes
        let content = "// 𝕏\nnamespace 𝕏a";
        assert_eq!(line_prefix(content, Position::new(0, 5)).unwrap(), "// 𝕏");
        assert_eq!(
            line_prefix(content, Position::new(1, 12)).unwrap(),
            "namespace 𝕏"
        );
    }

    #[test]
    fn test_line_prefix_past_end() {
        let content = "namespace A\r\nclass B {}";
        assert_eq!(line_prefix(content, Position::new(0, 99)).unwrap(), "namespace A");
        assert_eq!(line_prefix(content, Position::new(5, 0)), None);
    }

    #[test]
    fn test_line_prefix_with_lone_carriage_returns() {
        let content = "using System;\rnamespace Acme\r{\r}";
        assert_eq!(line_prefix(content, Position::new(1, 11)).unwrap(), "namespace A");
        assert_eq!(line_prefix(content, Position::new(3, 1)).unwrap(), "}");
        assert_eq!(line_prefix(content, Position::new(4, 0)), None);
    }

    fn edit(range: Option<(u32, u32, u32, u32)>, text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: range.map(|(sl, sc, el, ec)| {
                Range::new(Position::new(sl, sc), Position::new(el, ec))
            }),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_apply_changes_batch_in_order() {
        let content = "namespace \n{\n}\n";
        let changes = vec![
            edit(Some((0, 10, 0, 10)), "Acme"),
            // positions refer to the text after the previous edit
            edit(Some((0, 14, 0, 14)), ".App"),
            edit(Some((1, 1, 1, 1)), " "),
        ];
        assert_eq!(apply_changes(content, changes), "namespace Acme.App\n{ \n}\n");
    }

    #[test]
    fn test_apply_changes_utf16_range() {
        // each '𝕏' is two UTF-16 units, so `Old` starts at column 14
        let content = "// 𝕏 marker\nnamespace 𝕏𝕏Old";
        let changes = vec![edit(Some((1, 14, 1, 17)), "New")];
        assert_eq!(apply_changes(content, changes), "// 𝕏 marker\nnamespace 𝕏𝕏New");
    }

    #[test]
    fn test_apply_changes_crlf_document() {
        let content = "using System;\r\nnamespace Old\r\n{\r\n}";
        let changes = vec![edit(Some((1, 10, 1, 13)), "Acme")];
        assert_eq!(
            apply_changes(content, changes),
            "using System;\r\nnamespace Acme\r\n{\r\n}"
        );
    }

    #[test]
    fn test_apply_changes_full_replacement() {
        let changes = vec![
            edit(Some((0, 0, 0, 3)), "zzz"),
            edit(None, "namespace Fresh"),
            edit(Some((0, 15, 0, 15)), ".Core"),
        ];
        assert_eq!(apply_changes("old text", changes), "namespace Fresh.Core");
    }

    #[test]
    fn test_document_apply_drops_stale_versions() {
        let doc = Document::new("namespace A".to_string(), 3);

        assert!(doc.apply(2, vec![edit(None, "stale")]).is_none());

        let updated = doc.apply(4, vec![edit(Some((0, 11, 0, 11)), "cme")]).unwrap();
        assert_eq!(updated.content, "namespace Acme");
        assert_eq!(updated.version, 4);
    }

    #[test]
    fn test_apply_changes_reversed_range_inserts() {
        let changes = vec![edit(Some((0, 4, 0, 2)), "X")];
        assert_eq!(apply_changes("abcdef", changes), "abcdXef");
    }

    #[test]
    fn test_offset_at() {
        let content = "ab\r\ncd\nef";
        assert_eq!(offset_at(content, Position::new(0, 1)), 1);
        assert_eq!(offset_at(content, Position::new(1, 0)), 4);
        assert_eq!(offset_at(content, Position::new(2, 1)), 8);
        assert_eq!(offset_at(content, Position::new(9, 0)), content.len());
    }
}
