//! Angles, coordinates and right ascension.
//!
//! `deg2hms`, `hms2deg`, `decdeg` and `radic` only format their input; none of
//! them performs the unit conversion the template name suggests.

use super::Table;
use crate::args::parse;

pub(super) fn register(table: &mut Table) {
    table.insert("ra", ra);
    table.insert("deg2hms", deg2hms);
    table.insert("hms2deg", hms2deg);
    table.insert("decdeg", decdeg);
    table.insert("dec", dec);
    table.insert("radic", radic);
}

fn hours_minutes_seconds(raw: &str) -> String {
    let obj = parse(raw, &["hours", "minutes", "seconds"]);
    [
        obj.arg("hours").unwrap_or("0"),
        obj.arg("minutes").unwrap_or("0"),
        obj.arg("seconds").unwrap_or("0"),
    ]
    .join(":")
}

/// https://en.wikipedia.org/wiki/Template:RA
fn ra(raw: &str) -> String {
    hours_minutes_seconds(raw)
}

/// https://en.wikipedia.org/wiki/Template:Deg2HMS
fn deg2hms(raw: &str) -> String {
    let obj = parse(raw, &["degrees"]);
    format!("{}°", obj.text("degrees"))
}

fn hms2deg(raw: &str) -> String {
    hours_minutes_seconds(raw)
}

fn decdeg(raw: &str) -> String {
    let obj = parse(raw, &["deg", "min", "sec", "hem", "rnd"]);
    let degrees = obj.arg("deg").or_else(|| obj.arg("degrees")).unwrap_or("");
    format!("{}°", degrees)
}

/// https://en.wikipedia.org/wiki/Template:DEC
fn dec(raw: &str) -> String {
    let obj = parse(raw, &["degrees", "minutes", "seconds"]);
    let mut out = format!("{}°", obj.arg("degrees").unwrap_or("0"));
    if let Some(minutes) = obj.arg("minutes") {
        out.push_str(minutes);
        out.push('′');
    }
    if let Some(seconds) = obj.arg("seconds") {
        out.push_str(seconds);
        out.push('″');
    }
    out
}

/// https://en.wikipedia.org/wiki/Template:Radic
fn radic(raw: &str) -> String {
    let obj = parse(raw, &["after", "before"]);
    format!("{}√{}", obj.text("before"), obj.text("after"))
}

#[cfg(test)]
mod astro_tests {
    use super::*;

    #[test]
    fn ra_defaults_missing_parts() {
        assert_eq!(ra("{{RA|12|30}}"), "12:30:0");
        assert_eq!(ra("{{RA}}"), "0:0:0");
    }

    #[test]
    fn dec_marks() {
        assert_eq!(dec("{{DEC|-12|30|15}}"), "-12°30′15″");
        assert_eq!(dec("{{DEC|45}}"), "45°");
    }

    #[test]
    fn passthrough_conversions() {
        assert_eq!(deg2hms("{{deg2hms|180}}"), "180°");
        assert_eq!(hms2deg("{{hms2deg|1|2|3}}"), "1:2:3");
        assert_eq!(decdeg("{{decdeg|deg=40|min=26}}"), "40°");
        assert_eq!(decdeg("{{decdeg|degrees=12}}"), "12°");
        assert_eq!(radic("{{radic|2|3}}"), "3√2");
    }
}
