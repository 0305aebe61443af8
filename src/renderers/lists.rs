//! List templates. These read the overflow `list` slot, so an empty call
//! renders as an empty string (or `0` for `min`/`max`).

use lazy_static::lazy_static;
use regex::Regex;

use super::Table;
use crate::args::{body, parse};
use crate::helpers::{number_to_string, to_number};

lazy_static! {
    // newline-star item marker used by {{plainlist}}
    static ref PLAIN_ITEM: Regex = Regex::new(r"\n ?\* ?").unwrap();
}

pub(super) fn register(table: &mut Table) {
    table.insert("hlist", hlist);
    table.insert("pagelist", comma_separated);
    table.insert("catlist", comma_separated);
    table.insert("comma separated entries", comma_separated);
    table.insert("br separated entries", br_separated);
    table.insert("anchored list", anchored_list);
    for name in ["bulleted list", "blist", "bulleted", "bullet list"] {
        table.insert(name, bulleted_list);
    }
    table.insert("plainlist", plainlist);
    table.insert("flatlist", plainlist);
    table.insert("splitspan", splitspan);
    table.insert("small", small);
    table.insert("min", min);
    table.insert("max", max);
}

fn hlist(raw: &str) -> String {
    parse(raw, &[]).list().join(" · ")
}

// https://en.wikipedia.org/wiki/Template:Catlist renders links that carry no text
fn comma_separated(raw: &str) -> String {
    parse(raw, &[]).list().join(", ")
}

/// https://en.wikipedia.org/wiki/Template:Br_separated_entries
fn br_separated(raw: &str) -> String {
    parse(raw, &[]).list().join("\n\n")
}

/// https://en.wikipedia.org/wiki/Template:Bare_anchored_list
fn anchored_list(raw: &str) -> String {
    parse(raw, &[])
        .list()
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bulleted_list(raw: &str) -> String {
    parse(raw, &[])
        .list()
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// https://en.wikipedia.org/wiki/Template:Plainlist
///
/// Items are newline-star lines inside one argument, not pipe-separated.
fn plainlist(raw: &str) -> String {
    let content = body(raw).split_once('|').map(|(_, rest)| rest).unwrap_or("");
    PLAIN_ITEM
        .split(content)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn splitspan(raw: &str) -> String {
    let obj = parse(raw, &[]);
    let list = obj.list();
    format!(
        "{}\n{}",
        list.first().map(String::as_str).unwrap_or(""),
        list.get(1).map(String::as_str).unwrap_or("")
    )
}

fn small(raw: &str) -> String {
    parse(raw, &[]).list().first().cloned().unwrap_or_default()
}

fn extremum(raw: &str, better: fn(f64, f64) -> bool) -> String {
    let obj = parse(raw, &[]);
    let list = obj.list();
    let first = list.first().map(|s| to_number(s)).unwrap_or(0.0);
    let mut best = if first.is_nan() { 0.0 } else { first };
    for n in list.iter().map(|s| to_number(s)) {
        if !n.is_nan() && better(n, best) {
            best = n;
        }
    }
    number_to_string(best)
}

fn min(raw: &str) -> String {
    extremum(raw, |n, best| n < best)
}

fn max(raw: &str) -> String {
    extremum(raw, |n, best| n > best)
}
