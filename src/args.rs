//! Binding of raw argument segments onto a per-template parameter schema.
//!
//! Positional segments fill the schema names in order; whatever is left over
//! goes to the `list` slot and to numbered slots (`"2"`, `"3"`, …). Named
//! `key=value` segments are stored under their key. Binding never fails:
//! a missing argument is simply an absent key.

use std::collections::BTreeMap;

use crate::helpers::to_number;
use crate::scan::{find_top_level, split_call, strip_braces};

/// Reserved slot holding the overflow positional arguments.
pub const LIST_KEY: &str = "list";

/// One logical argument slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue<'a> {
    Scalar(&'a str),
    List(&'a [String]),
}

/// Structured arguments of one template call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    template: String,
    named: BTreeMap<String, String>,
    list: Vec<String>,
}

impl Arguments {
    /// Template name as written in the call (trimmed, original case).
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Slot lookup. `"list"` always resolves to the overflow list.
    pub fn get(&self, key: &str) -> Option<ArgValue<'_>> {
        if key == LIST_KEY {
            return Some(ArgValue::List(&self.list));
        }
        self.named.get(key).map(|v| ArgValue::Scalar(v.as_str()))
    }

    /// Scalar value if the key was bound, even to an empty string.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Scalar value if the key was bound to something non-empty.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.value(key).filter(|v| !v.is_empty())
    }

    /// Scalar value, or `""` when absent.
    pub fn text(&self, key: &str) -> &str {
        self.value(key).unwrap_or("")
    }

    /// Numeric coercion of a slot; an absent slot is NaN.
    pub fn number(&self, key: &str) -> f64 {
        self.value(key).map(to_number).unwrap_or(f64::NAN)
    }

    /// Overflow positional arguments, in order.
    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn contains(&self, key: &str) -> bool {
        self.named.contains_key(key)
    }

    /// All scalar slots, sorted by key.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Bind raw argument segments (name already removed) onto `schema`.
pub fn bind(tokens: &[&str], schema: &[&str]) -> Arguments {
    let mut args = Arguments::default();
    let mut explicit: Vec<(&str, &str)> = Vec::new();
    let mut position = 0usize;

    for token in tokens {
        match find_top_level(token, '=') {
            Some(eq) => explicit.push((token[..eq].trim(), token[eq + 1..].trim())),
            None => {
                let value = token.trim().to_string();
                match schema.get(position) {
                    Some(name) => {
                        args.named.insert((*name).to_string(), value);
                    }
                    None => {
                        args.named.insert((position + 1).to_string(), value.clone());
                        args.list.push(value);
                    }
                }
                position += 1;
            }
        }
    }

    for (key, value) in explicit {
        // `|2=x` also fills the second schema name unless a positional got there first
        if let Some(name) = key
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| schema.get(i))
        {
            if !args.named.contains_key(*name) {
                args.named.insert((*name).to_string(), value.to_string());
            }
        }
        args.named.insert(key.to_string(), value.to_string());
    }

    args
}

/// Parse a whole template call and bind its arguments onto `schema`.
///
/// Accepts `{{name|…}}` or bare `name|…`. Genuinely empty trailing segments
/// (`{{hlist|a|b|}}`) are dropped before binding.
pub fn parse(raw: &str, schema: &[&str]) -> Arguments {
    let call = split_call(raw);
    let mut tokens = call.args;
    while tokens.last().is_some_and(|t| t.trim().is_empty()) {
        tokens.pop();
    }

    let mut args = bind(&tokens, schema);
    args.template = call.name.to_string();
    tracing::trace!(
        template = %args.template,
        named = args.named.len(),
        list = args.list.len(),
        "bound template arguments"
    );
    args
}

/// Text between the outer braces, untouched by binding.
pub fn body(raw: &str) -> &str {
    strip_braces(raw)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod binder_tests {
    use super::*;

    #[test]
    fn schema_binds_positionals_in_order() {
        let args = bind(&["Jane", "Doe"], &["first", "last"]);
        assert_eq!(args.value("first"), Some("Jane"));
        assert_eq!(args.value("last"), Some("Doe"));
        assert!(args.list().is_empty());
    }

    #[test]
    fn empty_schema_sends_everything_to_list() {
        let args = bind(&["x", "y", "z"], &[]);
        assert_eq!(args.list(), ["x", "y", "z"]);
        assert_eq!(args.value("1"), Some("x"));
        assert_eq!(args.value("3"), Some("z"));
        assert_eq!(args.named().filter(|(k, _)| k.parse::<usize>().is_err()).count(), 0);
    }

    #[test]
    fn overflow_continues_numbering() {
        let args = bind(&["a", "b", "c"], &["first"]);
        assert_eq!(args.value("first"), Some("a"));
        assert_eq!(args.list(), ["b", "c"]);
        assert_eq!(args.value("2"), Some("b"));
        assert_eq!(args.value("3"), Some("c"));
        assert_eq!(args.value("1"), None);
    }

    #[test]
    fn named_arguments_never_enter_list() {
        let args = bind(&["a", "sep=,", "b"], &[]);
        assert_eq!(args.list(), ["a", "b"]);
        assert_eq!(args.value("sep"), Some(","));
    }

    #[test]
    fn named_split_on_first_equals_only() {
        let args = bind(&["url=http://x?a=b"], &[]);
        assert_eq!(args.value("url"), Some("http://x?a=b"));
    }

    #[test]
    fn equals_inside_link_stays_positional() {
        let args = bind(&["[[a=b]]"], &["text"]);
        assert_eq!(args.value("text"), Some("[[a=b]]"));
    }

    #[test]
    fn keys_and_values_are_trimmed() {
        let args = bind(&[" last = Doe ", "  Jane "], &["first"]);
        assert_eq!(args.value("last"), Some("Doe"));
        assert_eq!(args.value("first"), Some("Jane"));
    }

    #[test]
    fn explicit_number_fills_schema_slot() {
        let args = bind(&["2=Doe", "1=Jane"], &["first", "last"]);
        assert_eq!(args.value("first"), Some("Jane"));
        assert_eq!(args.value("last"), Some("Doe"));
        assert_eq!(args.value("1"), Some("Jane"));
    }

    #[test]
    fn explicit_number_does_not_override_positional_binding() {
        let args = bind(&["Jane", "1=Other"], &["first"]);
        assert_eq!(args.value("first"), Some("Jane"));
        assert_eq!(args.value("1"), Some("Other"));
    }

    #[test]
    fn missing_arguments_are_absent() {
        let args = bind(&[], &["first", "last"]);
        assert_eq!(args.value("first"), None);
        assert_eq!(args.text("first"), "");
        assert!(args.number("first").is_nan());
    }

    #[test]
    fn arg_treats_empty_as_missing() {
        let args = bind(&["", "x"], &["a", "b"]);
        assert_eq!(args.value("a"), Some(""));
        assert_eq!(args.arg("a"), None);
        assert_eq!(args.arg("b"), Some("x"));
    }

    #[test]
    fn list_slot_is_a_list() {
        let args = bind(&["x"], &[]);
        assert_eq!(args.get("list"), Some(ArgValue::List(&["x".to_string()])));
        assert_eq!(args.get("1"), Some(ArgValue::Scalar("x")));
        assert_eq!(args.get("missing"), None);
    }

    #[test]
    fn parse_keeps_template_name() {
        let args = parse("{{Won}}", &["text"]);
        assert_eq!(args.template(), "Won");
        assert_eq!(args.value("text"), None);
    }

    #[test]
    fn parse_drops_trailing_empty_segments() {
        let args = parse("{{hlist|a||b| }}", &[]);
        assert_eq!(args.list(), ["a", "", "b"]);
    }

    #[test]
    fn parse_with_nested_link() {
        let args = parse("{{sortname|[[Jane|J.]]|Doe}}", &["first", "last"]);
        assert_eq!(args.value("first"), Some("[[Jane|J.]]"));
        assert_eq!(args.value("last"), Some("Doe"));
    }
}
