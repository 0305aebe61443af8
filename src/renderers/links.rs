//! People, pages and things that render as a wikilink.

use super::Table;
use crate::args::parse;
use crate::helpers::{number_to_string, ordinal_text, titlecase};

pub(super) fn register(table: &mut Table) {
    table.insert("sortname", sortname);
    table.insert("abbrlink", abbrlink);
    table.insert("own", own);
    table.insert("no spam", no_spam);
    for name in [
        "tl", "tlx", "tlc", "tls", "tlf", "tlp", "tlu", "tlsp", "tlxb", "tnull",
    ] {
        table.insert(name, tl);
    }
    for name in [
        "won", "nom", "lost", "tie", "pending", "yes", "no", "partial",
    ] {
        table.insert(name, won);
    }
    table.insert("lbs", lbs);
    table.insert("lbc", lbc);
    table.insert("lbb", lbb);
    table.insert("uspolabbr", uspolabbr);
    table.insert("ushr", ushr);
    table.insert("ship", ship);
    table.insert("sclass", sclass);
}

/// https://en.wikipedia.org/wiki/Template:Sortname
fn sortname(raw: &str) -> String {
    let obj = parse(raw, &["first", "last", "target", "sort"]);
    let mut name = format!("{} {}", obj.text("first"), obj.text("last"))
        .trim()
        .to_string();
    let mut target = obj.arg("target").map(str::to_string);

    if obj.arg("nolink").is_some() {
        return target.unwrap_or(name);
    }
    if let Some(dab) = obj.arg("dab") {
        name = format!("{} ({})", name, dab);
        target = target.map(|t| format!("{} ({})", t, dab));
    }
    match target {
        Some(target) => format!("[[{}|{}]]", target, name),
        None => format!("[[{}]]", name),
    }
}

/// https://en.wikipedia.org/wiki/Template:Abbrlink
fn abbrlink(raw: &str) -> String {
    let obj = parse(raw, &["abbr", "page"]);
    match obj.arg("page") {
        Some(page) => format!("[[{}|{}]]", page, obj.text("abbr")),
        None => format!("[[{}]]", obj.text("abbr")),
    }
}

/// https://en.wikipedia.org/wiki/Template:Own
fn own(raw: &str) -> String {
    let obj = parse(raw, &["author"]);
    match obj.arg("author") {
        Some(author) => format!("Own work by {}", author),
        None => "Own work".to_string(),
    }
}

fn no_spam(raw: &str) -> String {
    let obj = parse(raw, &["account", "domain"]);
    format!("{}@{}", obj.text("account"), obj.text("domain"))
}

/// https://en.wikipedia.org/wiki/Template:Tl
fn tl(raw: &str) -> String {
    let obj = parse(raw, &["first", "second"]);
    obj.arg("second")
        .or_else(|| obj.arg("first"))
        .unwrap_or("")
        .to_string()
}

// award-table cells; with no text the template name itself is the label
fn won(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    match obj.arg("place").or_else(|| obj.arg("text")) {
        Some(label) => label.to_string(),
        None => titlecase(obj.template()),
    }
}

/// https://en.wikipedia.org/wiki/Template:Lbs
fn lbs(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    let text = obj.text("text");
    format!("[[{} Lifeboat Station|{}]]", text, text)
}

fn lbc(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    let text = obj.text("text");
    format!("[[{}-class lifeboat|{}-class]]", text, text)
}

fn lbb(raw: &str) -> String {
    let obj = parse(raw, &["text"]);
    let text = obj.text("text");
    format!("[[{}-class lifeboat|{}]]", text, text)
}

fn uspolabbr(raw: &str) -> String {
    let obj = parse(raw, &["party", "state", "house", "link"]);
    let (Some(party), Some(state)) = (obj.arg("party"), obj.arg("state")) else {
        return String::new();
    };
    // non-breaking hyphen
    let mut out = format!("{}\u{2011}{}", party, state);
    if let Some(house) = obj.arg("house") {
        out.push(' ');
        out.push_str(&ordinal_text(house));
    }
    out
}

/// https://en.wikipedia.org/wiki/Template:Ushr
fn ushr(raw: &str) -> String {
    let obj = parse(raw, &["state", "num", "type"]);
    let state = obj.text("state");

    if obj.text("num") != "AL" {
        let ordinal = ordinal_text(&number_to_string(obj.number("num")));
        return format!("{}'s {} congressional district", state, ordinal);
    }

    let link = format!("{}'s at-large congressional district", state);
    match obj.arg("type").map(str::to_lowercase).as_deref() {
        Some("e") => format!("[[{}|At-large]]", link),
        Some("u") => format!("[[{}|{}]]", link, state),
        Some("b") | Some("x") => format!("[[{}|{} At-large]]", link, state),
        _ => format!("[[{}]]", link),
    }
}

fn ship(raw: &str) -> String {
    let obj = parse(raw, &["prefix", "name", "id"]);
    let title = format!("{} {}", obj.text("prefix").to_uppercase(), obj.text("name"));
    format!("[[{}]]", title.trim())
}

// placeholder rendering, kept exactly as the link shape it has always had
fn sclass(raw: &str) -> String {
    let obj = parse(raw, &["cl", "type", "fmt"]);
    let class = obj.text("cl");
    let kind = obj.text("type");
    format!("[[{}-class {} |''{}''-class]] [[{}]]", class, kind, class, kind)
}
