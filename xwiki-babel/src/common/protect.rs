//! Protected spans
//!
//! Once a pass has produced the final form of a code block, an inline code span or a
//! generated comment, nothing downstream may rewrite it: code routinely contains `//`, `**`,
//! `--` and `|`, all of which are live syntax for later passes. The pass hands the finished
//! text to the [`Stash`] and leaves an opaque token in the document instead.
//!
//! Tokens are built only from Unicode private-use characters, so no pass pattern can match
//! inside them. Block tokens use a different opening character so the paragraph scanner can
//! recognise a line carrying a stashed `<pre>` block.

const INLINE_OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const BLOCK_OPEN: char = '\u{E002}';
const DIGIT_BASE: u32 = 0xE010;

/// Store of protected spans for one pipeline run.
#[derive(Debug, Default, Clone)]
pub struct Stash {
    spans: Vec<String>,
}

impl Stash {
    /// Protect inline content (inline code, comments).
    pub fn protect_inline(&mut self, content: impl Into<String>) -> String {
        self.protect(INLINE_OPEN, content.into())
    }

    /// Protect a block-level element (code blocks).
    pub fn protect_block(&mut self, content: impl Into<String>) -> String {
        self.protect(BLOCK_OPEN, content.into())
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn protect(&mut self, open: char, content: String) -> String {
        let index = self.spans.len();
        self.spans.push(content);

        let mut token = String::new();
        token.push(open);
        for digit in format!("{index:x}").chars() {
            let value = digit.to_digit(16).unwrap_or(0);
            token.extend(char::from_u32(DIGIT_BASE + value));
        }
        token.push(CLOSE);
        token
    }

    /// Substitute every token in `text` with its original content.
    ///
    /// Malformed or unknown tokens are left as they are.
    pub fn restore(&self, text: &str) -> String {
        self.restore_below(text, self.spans.len())
    }

    // Spans only ever contain tokens created before them, so recursing with the span's own
    // index as the bound always terminates.
    fn restore_below(&self, text: &str, bound: usize) -> String {
        if self.spans.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find([INLINE_OPEN, BLOCK_OPEN]) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + INLINE_OPEN.len_utf8()..];
            match decode_index(after_open) {
                Some((index, consumed)) if index < bound => {
                    out.push_str(&self.restore_below(&self.spans[index], index));
                    rest = &after_open[consumed..];
                }
                _ => {
                    out.push_str(&rest[start..start + INLINE_OPEN.len_utf8()]);
                    rest = after_open;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Whether `line` holds a block token anywhere.
    pub fn contains_block_token(line: &str) -> bool {
        line.match_indices(BLOCK_OPEN)
            .any(|(at, open)| decode_index(&line[at + open.len()..]).is_some())
    }
}

/// Decode the digits and closing char that follow an opening char.
/// Returns the index and the number of bytes consumed, closing char included.
fn decode_index(text: &str) -> Option<(usize, usize)> {
    let mut index: usize = 0;
    let mut digits = 0;
    for (offset, c) in text.char_indices() {
        if c == CLOSE {
            return (digits > 0).then_some((index, offset + CLOSE.len_utf8()));
        }
        let value = (c as u32).checked_sub(DIGIT_BASE).filter(|v| *v < 16)?;
        index = index.checked_mul(16)?.checked_add(value as usize)?;
        digits += 1;
    }
    None
}
