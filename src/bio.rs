//! Alive/dead inference from biographical document fields.
//!
//! The check order is fixed: a death year, then a death place, then the
//! category classifier, then the infobox-template classifier, and finally a
//! birth-year cutoff. The first definite answer wins. A year of 0 counts as
//! no year at all.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use chrono::Datelike;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::parallel::spinner;

/// Nobody is assumed to live past this age.
pub const MAX_AGE: i32 = 105;

lazy_static! {
    /// Anyone born before this year is assumed dead. Read once per process.
    pub static ref MIN_BIRTH_YEAR: i32 = chrono::Local::now().year() - MAX_AGE;
}

/// Tri-state verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BioVerdict {
    Alive,
    Dead,
    Unknown,
}

impl BioVerdict {
    /// `Some(true)` is dead, `Some(false)` alive, `None` unknown.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => BioVerdict::Dead,
            Some(false) => BioVerdict::Alive,
            None => BioVerdict::Unknown,
        }
    }

    pub fn to_flag(self) -> Option<bool> {
        match self {
            BioVerdict::Dead => Some(true),
            BioVerdict::Alive => Some(false),
            BioVerdict::Unknown => None,
        }
    }

    pub fn is_definite(self) -> bool {
        self != BioVerdict::Unknown
    }
}

/// The parts of a date the inferencer looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParts {
    pub year: Option<i32>,
}

impl DateParts {
    pub fn year(year: i32) -> Self {
        DateParts { year: Some(year) }
    }
}

/// Accessors a biography document exposes.
pub trait PersonDocument {
    fn birth_date(&self) -> Option<DateParts>;
    fn death_date(&self) -> Option<DateParts>;
    fn death_place(&self) -> Option<&str>;
}

/// A category or infobox-template predicate.
pub trait Classifier<D: ?Sized> {
    fn classify(&self, doc: &D) -> BioVerdict;
}

impl<D: ?Sized, F> Classifier<D> for F
where
    F: Fn(&D) -> BioVerdict,
{
    fn classify(&self, doc: &D) -> BioVerdict {
        self(doc)
    }
}

/// Classifier that never reaches a verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClassifier;

impl<D: ?Sized> Classifier<D> for NoClassifier {
    fn classify(&self, _doc: &D) -> BioVerdict {
        BioVerdict::Unknown
    }
}

/// Ordered heuristic chain over a [`PersonDocument`].
#[derive(Debug, Clone)]
pub struct Inferencer<C, T> {
    by_category: C,
    by_template: T,
    min_birth_year: i32,
}

impl Inferencer<NoClassifier, NoClassifier> {
    /// Inferencer that only looks at the document's own fields.
    pub fn fields_only() -> Self {
        Inferencer::new(NoClassifier, NoClassifier)
    }
}

impl<C, T> Inferencer<C, T> {
    pub fn new(by_category: C, by_template: T) -> Self {
        Inferencer {
            by_category,
            by_template,
            min_birth_year: *MIN_BIRTH_YEAR,
        }
    }

    /// Replace the birth-year cutoff.
    pub fn with_min_year(mut self, min_birth_year: i32) -> Self {
        self.min_birth_year = min_birth_year;
        self
    }

    pub fn min_birth_year(&self) -> i32 {
        self.min_birth_year
    }

    pub fn infer<D>(&self, doc: &D) -> BioVerdict
    where
        D: PersonDocument + ?Sized,
        C: Classifier<D>,
        T: Classifier<D>,
    {
        if doc.death_date().and_then(|d| d.year).filter(|y| *y != 0).is_some() {
            return BioVerdict::Dead;
        }
        if doc.death_place().is_some_and(|p| !p.trim().is_empty()) {
            return BioVerdict::Dead;
        }

        let from_category = self.by_category.classify(doc);
        if from_category.is_definite() {
            return from_category;
        }
        let from_template = self.by_template.classify(doc);
        if from_template.is_definite() {
            return from_template;
        }

        match doc.birth_date().and_then(|d| d.year).filter(|y| *y != 0) {
            Some(year) if year < self.min_birth_year => BioVerdict::Dead,
            _ => BioVerdict::Unknown,
        }
    }

    /// [`infer`](Self::infer) as a flag: `Some(true)` dead, `None` unknown.
    pub fn is_dead<D>(&self, doc: &D) -> Option<bool>
    where
        D: PersonDocument + ?Sized,
        C: Classifier<D>,
        T: Classifier<D>,
    {
        self.infer(doc).to_flag()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSONL records
// ─────────────────────────────────────────────────────────────────────────────

/// One person as read from a JSONL line. `category` and `template` carry the
/// verdicts of upstream classifiers (`true` = dead).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub death_place: Option<String>,
    #[serde(default)]
    pub category: Option<bool>,
    #[serde(default)]
    pub template: Option<bool>,
}

impl PersonDocument for PersonRecord {
    fn birth_date(&self) -> Option<DateParts> {
        self.birth_year.map(DateParts::year)
    }

    fn death_date(&self) -> Option<DateParts> {
        self.death_year.map(DateParts::year)
    }

    fn death_place(&self) -> Option<&str> {
        self.death_place.as_deref()
    }
}

pub fn record_category(record: &PersonRecord) -> BioVerdict {
    BioVerdict::from_flag(record.category)
}

pub fn record_template(record: &PersonRecord) -> BioVerdict {
    BioVerdict::from_flag(record.template)
}

/// Output line of the `bio` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictLine {
    pub name: String,
    pub verdict: BioVerdict,
}

#[derive(Debug, Default, Clone)]
pub struct BioStats {
    pub records: usize,
    pub alive: usize,
    pub dead: usize,
    pub unknown: usize,
    pub malformed: usize,
    pub elapsed: Duration,
}

/// Classify every JSONL record in `reader`, writing one verdict line each.
///
/// Lines that do not parse as a [`PersonRecord`] are logged and counted.
pub fn run_bio<W: Write>(reader: impl BufRead, writer: &mut W, quiet: bool) -> std::io::Result<BioStats> {
    let start_time = Instant::now();
    let mut stats = BioStats::default();
    let pb = spinner(quiet);
    let inferencer = Inferencer::new(record_category, record_template);

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: PersonRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "skipping malformed person record");
                stats.malformed += 1;
                continue;
            }
        };

        let verdict = inferencer.infer(&record);
        match verdict {
            BioVerdict::Alive => stats.alive += 1,
            BioVerdict::Dead => stats.dead += 1,
            BioVerdict::Unknown => stats.unknown += 1,
        }
        stats.records += 1;

        let out = VerdictLine {
            name: record.name,
            verdict,
        };
        writeln!(writer, "{}", serde_json::to_string(&out)?)?;

        if !quiet && stats.records % 1000 == 0 {
            pb.set_message(format!(
                "Records: {} | Dead: {} | Alive: {} | Unknown: {}",
                stats.records, stats.dead, stats.alive, stats.unknown
            ));
        }
    }

    pb.finish_and_clear();
    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inferencer_tests {
    use super::*;

    const CUTOFF: i32 = 1919;

    fn person() -> PersonRecord {
        PersonRecord {
            name: "Test".to_string(),
            ..Default::default()
        }
    }

    fn says_alive(_: &PersonRecord) -> BioVerdict {
        BioVerdict::Alive
    }

    fn says_dead(_: &PersonRecord) -> BioVerdict {
        BioVerdict::Dead
    }

    fn records() -> Inferencer<fn(&PersonRecord) -> BioVerdict, fn(&PersonRecord) -> BioVerdict> {
        Inferencer::new(
            record_category as fn(&PersonRecord) -> BioVerdict,
            record_template as fn(&PersonRecord) -> BioVerdict,
        )
        .with_min_year(CUTOFF)
    }

    // ─────────────────────────────────────────────────────────────
    // Flags
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn flags_round_trip() {
        for verdict in [BioVerdict::Alive, BioVerdict::Dead, BioVerdict::Unknown] {
            assert_eq!(BioVerdict::from_flag(verdict.to_flag()), verdict);
        }
        assert_eq!(BioVerdict::Dead.to_flag(), Some(true));
    }

    // ─────────────────────────────────────────────────────────────
    // Chain order
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn death_year_wins_over_classifiers() {
        let doc = PersonRecord {
            death_year: Some(1990),
            ..person()
        };
        let inferencer = Inferencer::new(says_alive, says_alive).with_min_year(CUTOFF);
        assert_eq!(inferencer.infer(&doc), BioVerdict::Dead);
    }

    #[test]
    fn death_place_means_dead() {
        let doc = PersonRecord {
            death_place: Some("Paris".to_string()),
            ..person()
        };
        let inferencer = Inferencer::new(says_alive, says_alive).with_min_year(CUTOFF);
        assert_eq!(inferencer.infer(&doc), BioVerdict::Dead);
    }

    #[test]
    fn blank_death_place_is_absent() {
        let doc = PersonRecord {
            death_place: Some("  ".to_string()),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Unknown);
    }

    #[test]
    fn category_before_template() {
        let doc = PersonRecord {
            category: Some(false),
            template: Some(true),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Alive);
    }

    #[test]
    fn template_when_category_is_silent() {
        let doc = PersonRecord {
            template: Some(true),
            birth_year: Some(2000),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Dead);
    }

    #[test]
    fn classifier_beats_birth_year() {
        let doc = PersonRecord {
            birth_year: Some(1850),
            ..person()
        };
        let inferencer = Inferencer::new(NoClassifier, says_alive).with_min_year(CUTOFF);
        assert_eq!(inferencer.infer(&doc), BioVerdict::Alive);
    }

    // ─────────────────────────────────────────────────────────────
    // Birth-year cutoff
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn old_birth_year_means_dead() {
        let doc = PersonRecord {
            birth_year: Some(1850),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Dead);
    }

    #[test]
    fn recent_birth_year_is_unknown() {
        let doc = PersonRecord {
            birth_year: Some(2000),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Unknown);
        assert_eq!(records().is_dead(&doc), None);
    }

    #[test]
    fn cutoff_is_exclusive() {
        let doc = PersonRecord {
            birth_year: Some(CUTOFF),
            ..person()
        };
        assert_eq!(records().infer(&doc), BioVerdict::Unknown);
    }

    #[test]
    fn year_zero_is_absent() {
        let no_death = PersonRecord {
            death_year: Some(0),
            ..person()
        };
        assert_eq!(records().infer(&no_death), BioVerdict::Unknown);
        let no_birth = PersonRecord {
            birth_year: Some(0),
            ..person()
        };
        assert_eq!(records().infer(&no_birth), BioVerdict::Unknown);
    }

    #[test]
    fn default_cutoff_tracks_the_clock() {
        let now = chrono::Local::now().year();
        assert_eq!(*MIN_BIRTH_YEAR, now - MAX_AGE);
        assert_eq!(Inferencer::fields_only().min_birth_year(), now - MAX_AGE);
    }

    #[test]
    fn nothing_known() {
        assert_eq!(Inferencer::fields_only().infer(&person()), BioVerdict::Unknown);
    }

    #[test]
    fn dead_classifier_alone() {
        let inferencer = Inferencer::new(says_dead, NoClassifier);
        assert_eq!(inferencer.is_dead(&person()), Some(true));
    }

    // ─────────────────────────────────────────────────────────────
    // JSONL
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn record_from_json() {
        let line = r#"{"name":"Ada Lovelace","birth_year":1815,"death_year":1852}"#;
        let record: PersonRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.death_date(), Some(DateParts::year(1852)));
        assert_eq!(record.category, None);
    }

    #[test]
    fn run_over_jsonl() {
        let input = concat!(
            r#"{"name":"A","death_year":1990}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"name":"B","category":false}"#,
            "\n",
            r#"{"name":"C","birth_year":2001}"#,
            "\n",
        );
        let mut out = Vec::new();
        let stats = run_bio(std::io::Cursor::new(input), &mut out, true).unwrap();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.malformed, 1);
        assert_eq!((stats.dead, stats.alive, stats.unknown), (1, 1, 1));
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], r#"{"name":"A","verdict":"dead"}"#);
        assert_eq!(lines[1], r#"{"name":"B","verdict":"alive"}"#);
        assert_eq!(lines[2], r#"{"name":"C","verdict":"unknown"}"#);
    }

    #[test]
    fn verdict_line_json() {
        let line = VerdictLine {
            name: "Ada".to_string(),
            verdict: BioVerdict::Dead,
        };
        assert_eq!(
            serde_json::to_string(&line).unwrap(),
            r#"{"name":"Ada","verdict":"dead"}"#
        );
    }
}
