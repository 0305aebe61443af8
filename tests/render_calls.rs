//! End-to-end rendering of whole template calls through the public API.

use rstest::rstest;
use wikitmpl::{render, render_call};

#[rstest]
// dates
#[case("{{decade|1987}}", "1980s")]
#[case("{{Decade|year=1987}}", "1980s")]
#[case("{{century|1987}}", "20")]
#[case("{{reign|1509|1547}}", "(r. 1509 – 1547)")]
#[case("{{OldStyleDate|1 March|1700}}", "1 March 1700")]
#[case("{{#dateformat:2009-12-25|mdy}}", "2009-12-25")]
// numbers
#[case("{{formatnum:1234567}}", "1,234,567")]
#[case("{{frac|1|2|3}}", "1 2/3")]
#[case("{{convert|5|to|10|km}}", "5 to 10 km")]
#[case("{{plural:3|city}}", "3 cities")]
#[case("{{percentage|50|200}}", "25%")]
#[case("{{val|1234.5|u=m}}", "1,234.5 m")]
// lists
#[case("{{hlist|a|b|c}}", "a · b · c")]
#[case("{{hlist|[[x|X]]|y}}", "[[x|X]] · y")]
#[case("{{blist|a|b}}", "• a\n\n• b")]
#[case("{{max|5|2|9}}", "9")]
// text
#[case("{{lc:HeLLo}}", "hello")]
#[case("{{padleft:7|3}}", "007")]
#[case("{{title case|the lord of the rings}}", "The Lord of the Rings")]
#[case("{{str mid|abcdef|2|3}}", "bcd")]
#[case("{{braces|cite web|url}}", "{{cite web|url}}")]
// links
#[case("{{sortname|first=Jane|last=Doe}}", "[[Jane Doe]]")]
#[case(
    "{{sortname|first=Jane|last=Doe|target=Jane Doe (politician)}}",
    "[[Jane Doe (politician)|Jane Doe]]"
)]
#[case("{{ship|hms|Victory}}", "[[HMS Victory]]")]
#[case("{{ushr|Ohio|3}}", "Ohio's 3rd congressional district")]
// sports and transit
#[case("{{nba year|1995}}", "[[1995–1996 NBA season|1995–1996]]")]
#[case("{{nfl year|1999}}", "[[1999 NFL season|1999]]")]
#[case("{{metro|Bank|London}}", "[[Bank station (London)|Bank]]")]
#[case("{{tram|Eccles}}", "[[Eccles tram stop|Eccles]]")]
fn renders(#[case] call: &str, #[case] expected: &str) {
    assert_eq!(render_call(call).as_deref(), Some(expected));
}

#[rstest]
#[case("{{infobox person|name=X}}")]
#[case("{{cite web|url=http://example.org}}")]
#[case("{{nope:x}}")]
#[case("")]
#[case("{{")]
fn unknown_calls_are_none(#[case] call: &str) {
    assert_eq!(render_call(call), None);
}

#[rstest]
#[case("Bulleted_List")]
#[case("  bulleted   list ")]
#[case("BLIST")]
fn names_are_normalized(#[case] name: &str) {
    assert_eq!(render(name, "{{x|a}}").as_deref(), Some("• a"));
}

#[rstest]
#[case("{{hlist|a|b|}}", "a · b")]
#[case("{{hlist|a|b| }}", "a · b")]
#[case("{{hlist|a||b}}", "a ·  · b")]
fn trailing_empty_segments_are_dropped(#[case] call: &str, #[case] expected: &str) {
    assert_eq!(render_call(call).as_deref(), Some(expected));
}

#[test]
fn unbalanced_brackets_do_not_swallow_arguments() {
    assert_eq!(render_call("{{hlist|[[a|b}}").as_deref(), Some("[[a · b"));
}

#[test]
fn nested_templates_stay_whole() {
    assert_eq!(
        render_call("{{hlist|{{lc:A|B}}|c}}").as_deref(),
        Some("{{lc:A|B}} · c")
    );
}
