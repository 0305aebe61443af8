//! Years, decades, centuries and reigns.

use super::Table;
use crate::args::parse;
use crate::helpers::{number_to_string, parse_int};
use crate::scan::colon_to_pipe;

pub(super) fn register(table: &mut Table) {
    table.insert("reign", reign);
    table.insert("circa", circa);
    table.insert("decade link", decade_link);
    table.insert("decade", decade);
    table.insert("century", century);
    table.insert("oldstyledate", old_style_date);
    table.insert("#dateformat", date_format);
}

fn reign(raw: &str) -> String {
    let obj = parse(raw, &["start", "end"]);
    format!("(r. {} – {})", obj.text("start"), obj.text("end"))
}

fn circa(raw: &str) -> String {
    let obj = parse(raw, &["year"]);
    match obj.arg("year") {
        Some(year) => format!("c. {}", year),
        None => "c. ".to_string(),
    }
}

/// https://en.wikipedia.org/wiki/Template:Decade_link
fn decade_link(raw: &str) -> String {
    let obj = parse(raw, &["year"]);
    let year = obj.text("year");
    format!("{}|{}s", year, year)
}

/// https://en.wikipedia.org/wiki/Template:Decade
fn decade(raw: &str) -> String {
    let obj = parse(raw, &["year"]);
    let year = (obj.number("year") / 10.0).floor() * 10.0;
    format!("{}s", number_to_string(year))
}

/// https://en.wikipedia.org/wiki/Template:Century
///
/// Plain `floor(year / 100) + 1`, so 2000 lands in the 21st.
fn century(raw: &str) -> String {
    let obj = parse(raw, &["year"]);
    let year = obj.value("year").map(parse_int).unwrap_or(f64::NAN);
    number_to_string((year / 100.0).floor() + 1.0)
}

/// https://en.wikipedia.org/wiki/Template:OldStyleDate
fn old_style_date(raw: &str) -> String {
    let obj = parse(raw, &["date", "year"]);
    match obj.arg("year") {
        Some(year) => format!("{} {}", obj.text("date"), year),
        None => obj.text("date").to_string(),
    }
}

/// https://www.mediawiki.org/wiki/Help:Magic_words#Formatting
fn date_format(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["date", "format"]);
    obj.text("date").to_string()
}
