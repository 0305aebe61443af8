//! String manipulation templates and case-changing magic words.

use super::Table;
use crate::args::parse;
use crate::helpers::{lowercase_first, pad, parse_int, substr, titlecase, to_number, PadSide};
use crate::scan::colon_to_pipe;

/// Upper bound on `{{loop}}` repetitions.
const MAX_LOOP: usize = 10_000;

pub(super) fn register(table: &mut Table) {
    table.insert("first word", first_word);
    table.insert("last word", last_word);
    table.insert("trunc", trunc);
    table.insert("str mid", str_mid);
    table.insert("str len", str_len);
    table.insert("digits", digits);
    table.insert("replace", replace);
    table.insert("title case", title_case);
    table.insert("lc", lc);
    table.insert("uc", uc);
    table.insert("lcfirst", lcfirst);
    table.insert("ucfirst", ucfirst);
    table.insert("padleft", padleft);
    table.insert("padright", padright);
    table.insert("loop", repeat);
    table.insert("braces", braces);
    table.insert("tag", tag);
    table.insert("term", term);
    table.insert("linum", linum);
    table.insert("bracket", bracket);
    table.insert("in title", in_title);
    table.insert("look from", look_from);
}

/// https://en.wikipedia.org/wiki/Template:First_word
fn first_word(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    let text = obj.text("text");
    let sep = obj.arg("sep").unwrap_or(" ");
    text.split(sep).next().unwrap_or("").to_string()
}

fn last_word(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    obj.text("text").split(' ').last().unwrap_or("").to_string()
}

fn trunc(raw: &str) -> String {
    let obj = parse(raw, &["str", "len"]);
    let len = obj.value("len").map(to_number);
    substr(obj.text("str"), 0.0, len)
}

// start is 1-based; a missing length runs to the end
fn str_mid(raw: &str) -> String {
    let obj = parse(raw, &["str", "start", "end"]);
    let start = obj.value("start").map(parse_int).unwrap_or(1.0) - 1.0;
    let len = obj.value("end").map(parse_int);
    substr(obj.text("str"), start, len)
}

fn str_len(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    obj.text("text").trim().chars().count().to_string()
}

fn digits(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    obj.text("text").chars().filter(char::is_ascii_digit).collect()
}

// only the first occurrence is replaced
fn replace(raw: &str) -> String {
    let obj = parse(raw, &["text", "from", "to"]);
    match (obj.arg("from"), obj.arg("to")) {
        (Some(from), Some(to)) => obj.text("text").replacen(from, to, 1),
        _ => obj.text("text").to_string(),
    }
}

fn title_case(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    obj.text("text")
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if (i > 0 && word == "the") || word == "of" {
                word.to_string()
            } else {
                titlecase(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// https://www.mediawiki.org/wiki/Help:Magic_words#Formatting
fn lc(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["text"]);
    obj.text("text").to_lowercase()
}

fn uc(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["text"]);
    obj.text("text").to_uppercase()
}

fn lcfirst(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["text"]);
    lowercase_first(obj.text("text"))
}

fn ucfirst(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["text"]);
    titlecase(obj.text("text"))
}

fn padded(raw: &str, side: PadSide) -> String {
    let obj = parse(&colon_to_pipe(raw), &["text", "num", "str"]);
    let target = obj.value("num").map(to_number).unwrap_or(f64::NAN);
    pad(obj.text("text"), target, obj.arg("str").unwrap_or("0"), side)
}

fn padleft(raw: &str) -> String {
    padded(raw, PadSide::Start)
}

fn padright(raw: &str) -> String {
    padded(raw, PadSide::End)
}

fn repeat(raw: &str) -> String {
    let obj = parse(raw, &["times", "text"]);
    let times = obj.number("times");
    let times = if times.is_nan() || times <= 0.0 {
        0
    } else {
        (times.ceil() as usize).min(MAX_LOOP)
    };
    obj.text("text").repeat(times)
}

/// https://en.wikipedia.org/wiki/Template:Braces
fn braces(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    let mut out = format!("{{{{{}", obj.text("text"));
    for attr in obj.list() {
        out.push('|');
        out.push_str(attr);
    }
    out.push_str("}}");
    out
}

/// https://en.wikipedia.org/wiki/Template:Tag
///
/// `span`, `div` and `p` collapse to their content; other pair tags are
/// written out. The `empty`, `close` and `single` forms render nothing.
fn tag(raw: &str) -> String {
    let obj = parse(raw, &["tag", "open"]);
    let name = obj.text("tag");
    let content = obj.text("content");
    match obj.arg("open") {
        None | Some("pair") => {}
        Some(_) => return String::new(),
    }
    if matches!(name, "span" | "div" | "p") {
        return content.to_string();
    }
    match obj.arg("attribs") {
        Some(attribs) => format!("<{} {}>{}</{}>", name, attribs, content, name),
        None => format!("<{}>{}</{}>", name, content, name),
    }
}

/// https://en.wikipedia.org/wiki/Template:Term
fn term(raw: &str) -> String {
    let obj = parse(raw, &["term"]);
    format!("{}:", obj.text("term"))
}

fn linum(raw: &str) -> String {
    let obj = parse(raw, &["num", "text"]);
    format!("{}. {}", obj.text("num"), obj.text("text"))
}

fn bracket(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    match obj.arg("text") {
        Some(text) => format!("[{}]", text),
        None => "[".to_string(),
    }
}

/// https://en.wikipedia.org/wiki/Template:In_title
fn in_title(raw: &str) -> String {
    search_hint(raw, "All pages with titles containing")
}

fn look_from(raw: &str) -> String {
    search_hint(raw, "All pages with titles beginning with")
}

fn search_hint(raw: &str, lead: &str) -> String {
    let obj = parse(raw, &["title", "text"]);
    if let Some(text) = obj.arg("text") {
        return text.to_string();
    }
    match obj.arg("title") {
        Some(title) => format!("{} {}", lead, title),
        None => String::new(),
    }
}
