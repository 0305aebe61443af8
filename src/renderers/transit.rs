//! Links to stations, stops and wharves.

use super::Table;
use crate::args::parse;

pub(super) fn register(table: &mut Table) {
    table.insert("metro", metro);
    table.insert("station", station);
    table.insert("bssrws", bssrws);
    table.insert("stnlnk", stnlnk);
    table.insert("station link", station_link);
    table.insert("line link", station_link);
    table.insert("subway", subway);
    table.insert("lrt station", lrt_station);
    table.insert("mrt station", mrt_station);
    table.insert("rht", rht);
    table.insert("ferry", ferry);
    table.insert("tram", tram);
    table.insert("tstop", tstop);
}

/// `[[{name} {kind}|{name}]]`, or `[[{name} {kind} ({dab})|{name}]]`.
fn stop_link(name: &str, kind: &str, dab: Option<&str>) -> String {
    match dab {
        Some(dab) => format!("[[{} {} ({})|{}]]", name, kind, dab, name),
        None => format!("[[{} {}|{}]]", name, kind, name),
    }
}

fn metro(raw: &str) -> String {
    let obj = parse(raw, &["name", "dab"]);
    stop_link(obj.text("name"), "station", obj.arg("dab"))
}

// the second positional is the line, which is not rendered
fn station(raw: &str) -> String {
    let obj = parse(raw, &["name", "x", "dab"]);
    stop_link(obj.text("name"), "station", obj.arg("dab"))
}

fn bssrws(raw: &str) -> String {
    let obj = parse(raw, &["one", "two"]);
    let name = match obj.arg("two") {
        Some(two) => format!("{} {}", obj.text("one"), two),
        None => obj.text("one").to_string(),
    };
    stop_link(&name, "railway station", None)
}

fn stnlnk(raw: &str) -> String {
    let obj = parse(raw, &["name", "dab"]);
    stop_link(obj.text("name"), "railway station", obj.arg("dab"))
}

/// https://en.wikipedia.org/wiki/Template:Station_link
///
/// Only the station (or failing that, the system) name is shown.
fn station_link(raw: &str) -> String {
    let obj = parse(raw, &["system", "station"]);
    obj.arg("station")
        .or_else(|| obj.arg("system"))
        .unwrap_or("")
        .to_string()
}

fn subway(raw: &str) -> String {
    let obj = parse(raw, &["name"]);
    stop_link(obj.text("name"), "subway station", None)
}

fn lrt_station(raw: &str) -> String {
    let obj = parse(raw, &["name"]);
    stop_link(obj.text("name"), "LRT station", None)
}

fn mrt_station(raw: &str) -> String {
    let obj = parse(raw, &["name"]);
    stop_link(obj.text("name"), "MRT station", None)
}

fn rht(raw: &str) -> String {
    let obj = parse(raw, &["name"]);
    stop_link(obj.text("name"), "railway halt", None)
}

fn ferry(raw: &str) -> String {
    let obj = parse(raw, &["name"]);
    stop_link(obj.text("name"), "ferry wharf", None)
}

fn tram(raw: &str) -> String {
    let obj = parse(raw, &["name", "dab"]);
    stop_link(obj.text("name"), "tram stop", obj.arg("dab"))
}

// the dab goes before "stop" here, unparenthesized
fn tstop(raw: &str) -> String {
    let obj = parse(raw, &["name", "dab"]);
    let name = obj.text("name");
    match obj.arg("dab") {
        Some(dab) => format!("[[{} {} stop|{}]]", name, dab, name),
        None => format!("[[{} stop|{}]]", name, name),
    }
}
