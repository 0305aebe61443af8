//! Template renderer dispatch table.
//!
//! Every renderer takes the raw template call and returns display text. The
//! table is built once and never mutated; aliases are separate entries. A name
//! missing from the table is reported as `None` and left to the caller.

use std::collections::HashMap;

use lazy_static::lazy_static;
use unicode_normalization::UnicodeNormalization;

use crate::scan::{split_top_level, strip_braces};

mod astro;
mod dates;
mod layout;
mod links;
mod lists;
mod numbers;
mod sports;
mod text;
mod transit;

/// A renderer turns one raw template call into display text.
pub type Renderer = fn(&str) -> String;

type Table = HashMap<&'static str, Renderer>;

lazy_static! {
    static ref RENDERERS: Table = {
        let mut table = Table::new();
        astro::register(&mut table);
        dates::register(&mut table);
        layout::register(&mut table);
        links::register(&mut table);
        lists::register(&mut table);
        numbers::register(&mut table);
        sports::register(&mut table);
        text::register(&mut table);
        transit::register(&mut table);
        table
    };
}

/// Normalize a template name for lookup: NFC, trimmed, lowercase,
/// underscores as spaces, runs of whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    let name: String = name.nfc().collect();
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Renderer registered under `name`, if any.
pub fn lookup(name: &str) -> Option<Renderer> {
    RENDERERS.get(normalize_name(name).as_str()).copied()
}

pub fn is_known(name: &str) -> bool {
    lookup(name).is_some()
}

/// All registered names (aliases included), sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = RENDERERS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Render `raw` with the renderer registered under `name`.
///
/// Returns `None` for an unknown template; renderers themselves never fail.
pub fn render(name: &str, raw: &str) -> Option<String> {
    match lookup(name) {
        Some(renderer) => Some(renderer(raw)),
        None => {
            tracing::debug!(template = %name, "no renderer for template");
            None
        }
    }
}

/// Normalized name written in the first segment of a call.
pub fn template_name(raw: &str) -> String {
    let body = strip_braces(raw);
    let first = split_top_level(body, '|').into_iter().next().unwrap_or_default();
    normalize_name(first)
}

/// Registered name a whole call dispatches to.
///
/// Falls back to magic-word colon syntax (`{{lc:ABC}}`, `{{plural:2|page}}`)
/// when the first segment itself is not registered but the text before its
/// first colon is.
pub fn resolve_name(raw: &str) -> Option<String> {
    let name = template_name(raw);
    if RENDERERS.contains_key(name.as_str()) {
        return Some(name);
    }
    let (prefix, _) = name.split_once(':')?;
    let prefix = normalize_name(prefix);
    if RENDERERS.contains_key(prefix.as_str()) {
        tracing::debug!(template = %prefix, "resolved magic-word colon syntax");
        Some(prefix)
    } else {
        None
    }
}

/// Render a whole call, working out the template name from the call itself.
pub fn render_call(raw: &str) -> Option<String> {
    match resolve_name(raw) {
        Some(name) => render(&name, raw),
        None => {
            tracing::debug!(call = %raw, "unrecognized template call");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
