//! Numbers, fractions, units and percentages.

use lazy_static::lazy_static;
use regex::Regex;

use super::Table;
use crate::args::parse;
use crate::helpers::{format_grouped, number_to_string, percentage, to_number};
use crate::scan::colon_to_pipe;

lazy_static! {
    static ref ENDS_IN_CONSONANT_Y: Regex = Regex::new(r".y$").unwrap();
}

pub(super) fn register(table: &mut Table) {
    table.insert("formatnum", formatnum);
    table.insert("frac", frac);
    table.insert("convert", convert);
    table.insert("plural", plural);
    table.insert("val", val);
    table.insert("percentage", percentage_template);
    table.insert("percent-done", percent_done);
    table.insert("percent done", percent_done);
}

/// https://www.mediawiki.org/wiki/Help:Magic_words#Formatting
fn formatnum(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["number"]);
    let digits = obj.text("number").replace(',', "");
    format_grouped(to_number(&digits))
}

/// https://en.wikipedia.org/wiki/Template:Frac
///
/// `{{frac|2}}` is a unit fraction: ½.
fn frac(raw: &str) -> String {
    let obj = parse(raw, &["a", "b", "c"]);
    let a = obj.text("a");
    if let Some(c) = obj.arg("c") {
        return format!("{} {}/{}", a, obj.text("b"), c);
    }
    if let Some(b) = obj.arg("b") {
        return format!("{}/{}", a, b);
    }
    format!("1/{}", a)
}

/// https://en.wikipedia.org/wiki/Template:Convert#Ranges_of_values
///
/// No conversion is done; the value is echoed with its unit.
fn convert(raw: &str) -> String {
    let obj = parse(raw, &["num", "two", "three", "four"]);
    let num = obj.text("num");
    let two = obj.text("two");
    if matches!(two, "-" | "to" | "and") {
        return match obj.arg("four") {
            Some(four) => format!("{} {} {} {}", num, two, obj.text("three"), four),
            None => format!("{} {} {}", num, two, obj.text("three")),
        };
    }
    format!("{} {}", num, two)
}

/// https://en.wikipedia.org/wiki/Template:Plural
fn plural(raw: &str) -> String {
    let obj = parse(&colon_to_pipe(raw), &["num", "word"]);
    let num = obj.number("num");
    let mut word = obj.text("word").to_string();
    if word.is_empty() {
        return number_to_string(num);
    }
    if num != 1.0 {
        if ENDS_IN_CONSONANT_Y.is_match(&word) {
            word.pop();
            word.push_str("ies");
        } else {
            word.push('s');
        }
    }
    format!("{} {}", number_to_string(num), word)
}

/// https://en.wikipedia.org/wiki/Template:Val
fn val(raw: &str) -> String {
    let obj = parse(raw, &["number", "uncertainty"]);
    let mut out = match obj.arg("number") {
        Some(number) => {
            let n = to_number(number);
            if n != 0.0 && !n.is_nan() {
                format_grouped(n)
            } else {
                number.to_string()
            }
        }
        None => String::new(),
    };
    if let Some(prefix) = obj.arg("p") {
        out = format!("{}{}", prefix, out);
    }
    // `s` lands in front of `p` too
    if let Some(sign) = obj.arg("s") {
        out = format!("{}{}", sign, out);
    }
    if let Some(unit) = obj.arg("u").or_else(|| obj.arg("ul")).or_else(|| obj.arg("upl")) {
        out.push(' ');
        out.push_str(unit);
    }
    out
}

/// `{{percentage | numerator | denominator | decimals}}`
fn percentage_template(raw: &str) -> String {
    let obj = parse(raw, &["numerator", "denominator", "decimals"]);
    match percentage(obj.value("numerator"), obj.value("denominator"), obj.value("decimals")) {
        Some(num) => format!("{}%", num),
        None => String::new(),
    }
}

/// `{{Percent-done|done=N|total=N|digits=N}}`
fn percent_done(raw: &str) -> String {
    let obj = parse(raw, &["done", "total", "digits"]);
    match percentage(obj.value("done"), obj.value("total"), obj.value("digits")) {
        Some(num) => format!("{} ({}%) done", obj.text("done"), num),
        None => String::new(),
    }
}
