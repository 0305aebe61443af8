//! Presentation-only wrappers: the text survives, the styling does not.

use super::Table;
use crate::args::parse;

pub(super) fn register(table: &mut Table) {
    table.insert("block indent", block_indent);
    table.insert("center block", center_block);
    table.insert("align", align);
    table.insert("font", font);
    table.insert("float", float);
    table.insert("lower", lower);
    table.insert("resize", resize);
    table.insert("medical cases chart/row", keep_raw);
}

fn block_indent(raw: &str) -> String {
    let obj = parse(raw, &[]);
    match obj.arg("1") {
        Some(text) => format!("\n{}\n", text),
        None => String::new(),
    }
}

fn center_block(raw: &str) -> String {
    parse(raw, &["text"]).text("text").to_string()
}

fn align(raw: &str) -> String {
    parse(raw, &["dir", "text"]).text("text").to_string()
}

fn font(raw: &str) -> String {
    parse(raw, &["text"]).text("text").to_string()
}

fn float(raw: &str) -> String {
    let obj = parse(raw, &["dir", "text"]);
    obj.arg("text").unwrap_or_else(|| obj.text("dir")).to_string()
}

fn lower(raw: &str) -> String {
    let obj = parse(raw, &["n", "text"]);
    obj.arg("text").unwrap_or_else(|| obj.text("n")).to_string()
}

fn resize(raw: &str) -> String {
    let obj = parse(raw, &["n", "text"]);
    obj.arg("text").unwrap_or_else(|| obj.text("n")).to_string()
}

// deprecated; left in the output untouched
fn keep_raw(raw: &str) -> String {
    raw.to_string()
}
