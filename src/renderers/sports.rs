//! Season links for North American sports leagues.

use super::Table;
use crate::args::parse;
use crate::helpers::number_to_string;

pub(super) fn register(table: &mut Table) {
    table.insert("baseball year", baseball_year);
    table.insert("mlb year", mlb_year);
    table.insert("nlds year", nlds_year);
    table.insert("alds year", alds_year);
    table.insert("nfl year", nfl_year);
    table.insert("nfl playoff year", nfl_playoff_year);
    table.insert("nba year", nba_year);
    table.insert("mhl year", nhl_year);
}

fn season_link(raw: &str, page: &str) -> String {
    let obj = parse(raw, &["year"]);
    let year = obj.text("year");
    format!("[[{} {}|{}]]", year, page, year)
}

fn baseball_year(raw: &str) -> String {
    season_link(raw, "in baseball")
}

fn mlb_year(raw: &str) -> String {
    season_link(raw, "Major League Baseball season")
}

fn nlds_year(raw: &str) -> String {
    season_link(raw, "National League Division Series")
}

fn alds_year(raw: &str) -> String {
    season_link(raw, "American League Division Series")
}

fn nfl_year(raw: &str) -> String {
    let obj = parse(raw, &["year", "other"]);
    let year = obj.text("year");
    match (obj.arg("year"), obj.arg("other")) {
        (Some(year), Some(other)) => format!(
            "[[{} NFL season|{}]]–[[{} NFL season|{}]]",
            year, year, other, other
        ),
        _ => format!("[[{} NFL season|{}]]", year, year),
    }
}

/// Start and end year of a season spanning the new year, as text.
fn season_span(raw: &str) -> (String, String) {
    let obj = parse(raw, &["year"]);
    let year = obj.number("year");
    (number_to_string(year), number_to_string(year + 1.0))
}

fn nfl_playoff_year(raw: &str) -> String {
    let (year, after) = season_span(raw);
    format!("[[{}–{} NFL playoffs|{}]]", year, after, year)
}

fn nba_year(raw: &str) -> String {
    let (year, after) = season_span(raw);
    format!("[[{}–{} NBA season|{}–{}]]", year, after, year, after)
}

fn nhl_year(raw: &str) -> String {
    let (year, after) = season_span(raw);
    format!("[[{}–{} NHL season|{}–{}]]", year, after, year, after)
}
