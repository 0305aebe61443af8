//! Bracket-aware splitting of raw template calls.
//!
//! A template call such as `{{sortname|[[Jane|J.]]|Doe|dab=painter}}` is split on
//! `|` only where the pipe is not inside a wikilink (`[[..]]`), a nested template
//! (`{{..}}`) or a parameter brace (`{..}`). The same depth rule decides whether an
//! `=` makes an argument named.
//!
//! Unbalanced openers never fail the split: once the input is exhausted, any
//! opener that was never closed is re-read as plain text.

use std::borrow::Cow;
use std::collections::HashSet;

/// Char-aware cursor over a template body that tracks bracket nesting.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    /// Byte offsets of openers that have no matching closer.
    literal_openers: &'a HashSet<usize>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, literal_openers: &'a HashSet<usize>) -> Self {
        Scanner {
            text,
            pos: 0,
            depth: 0,
            literal_openers,
        }
    }

    fn peek(&self, n: usize) -> &str {
        // n is character count, not byte count
        let remaining = &self.text[self.pos..];
        let end_offset: usize = remaining.chars().take(n).map(|c| c.len_utf8()).sum();
        &remaining[..end_offset]
    }

    fn consume(&mut self, n: usize) -> &str {
        let remaining = &self.text[self.pos..];
        let byte_len: usize = remaining.chars().take(n).map(|c| c.len_utf8()).sum();
        let result = &self.text[self.pos..self.pos + byte_len];
        self.pos += byte_len;
        result
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn is_literal(&self, offset: usize) -> bool {
        self.literal_openers.contains(&offset)
    }

    /// Advance to the next character that sits at depth 0, returning its byte
    /// offset. Bracket tokens adjust the depth and are never returned.
    fn next_top_level(&mut self) -> Option<(usize, char)> {
        while !self.at_end() {
            let offset = self.pos;
            let pair = self.peek(2);
            if pair == "[[" || pair == "{{" {
                self.consume(2);
                if !self.is_literal(offset) {
                    self.depth += 1;
                }
                continue;
            }
            if pair == "]]" || pair == "}}" {
                self.consume(2);
                self.depth = self.depth.saturating_sub(1);
                continue;
            }
            let c = self.consume_char()?;
            match c {
                '{' if !self.is_literal(offset) => self.depth += 1,
                '}' => self.depth = self.depth.saturating_sub(1),
                _ if self.depth == 0 => return Some((offset, c)),
                _ => {}
            }
        }
        None
    }
}

/// Find the byte offsets of openers that are never closed.
///
/// Mirrors the depth counter in [`Scanner`]: every opener pushes, every closer
/// pops the most recent opener (closers with nothing open are ignored).
fn unclosed_openers(text: &str) -> HashSet<usize> {
    let mut stack: Vec<usize> = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with("[[") || rest.starts_with("{{") {
            stack.push(pos);
            pos += 2;
        } else if rest.starts_with("]]") || rest.starts_with("}}") {
            stack.pop();
            pos += 2;
        } else {
            let c = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            if rest.starts_with('{') {
                stack.push(pos);
            } else if rest.starts_with('}') {
                stack.pop();
            }
            pos += c;
        }
    }
    stack.into_iter().collect()
}

/// Split `text` on every depth-0 occurrence of `sep`.
///
/// For balanced input the result has exactly one more segment than there are
/// top-level separators. Empty segments are kept.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let literal = unclosed_openers(text);
    let mut scanner = Scanner::new(text, &literal);
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some((offset, c)) = scanner.next_top_level() {
        if c == sep {
            parts.push(&text[start..offset]);
            start = offset + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte offset of the first depth-0 occurrence of `target`.
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    let literal = unclosed_openers(text);
    let mut scanner = Scanner::new(text, &literal);
    while let Some((offset, c)) = scanner.next_top_level() {
        if c == target {
            return Some(offset);
        }
    }
    None
}

/// Split a raw argument string into its top-level `|`-separated segments.
pub fn tokenize(raw: &str) -> Vec<&str> {
    split_top_level(raw, '|')
}

/// Remove the outer `{{` / `}}` of a template call, if present.
pub fn strip_braces(raw: &str) -> &str {
    let mut body = raw.trim();
    if let Some(rest) = body.strip_prefix("{{") {
        body = rest;
        if let Some(rest) = body.strip_suffix("}}") {
            body = rest;
        }
    }
    body
}

/// A template call split into its name and raw argument segments.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCall<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Split a whole call (`{{name|a|b}}` or `name|a|b`) into name and arguments.
pub fn split_call(raw: &str) -> TemplateCall<'_> {
    let mut segments = tokenize(strip_braces(raw)).into_iter();
    let name = segments.next().unwrap_or_default().trim();
    TemplateCall {
        name,
        args: segments.collect(),
    }
}

/// Rewrite magic-word colon syntax to pipe syntax: `{{lc:ABC}}` → `lc|ABC`.
///
/// Only a colon inside the first segment is rewritten, so colons in later
/// arguments survive. The returned text has its outer braces removed.
pub fn colon_to_pipe(raw: &str) -> Cow<'_, str> {
    let body = strip_braces(raw);
    let first_end = find_top_level(body, '|').unwrap_or(body.len());
    match body[..first_end].find(':') {
        Some(colon) => Cow::Owned(format!("{}|{}", &body[..colon], &body[colon + 1..])),
        None => Cow::Borrowed(body),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
