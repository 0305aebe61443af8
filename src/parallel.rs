//! Rendering whole files of template calls, one call per line.
//!
//! Two strategies produce the same bytes:
//! - Sequential (baseline)
//! - Batch-parallel (std::thread on batches of lines)

use std::io::{BufRead, Write};
use std::panic;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::config::UnknownPolicy;
use crate::renderers::{render_call, resolve_name, template_name};

/// Configuration for batch-parallel rendering
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
    /// Lines per batch
    pub batch_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self {
            num_threads: cpus,
            batch_size: 1000,
        }
    }
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedLine {
    pub input: String,
    pub template: String,
    pub output: String,
    pub known: bool,
}

#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub lines: usize,
    pub rendered: usize,
    pub unknown: usize,
    pub elapsed: Duration,
}

impl Stats {
    fn record(&mut self, line: &RenderedLine) {
        self.lines += 1;
        if line.known {
            self.rendered += 1;
        } else {
            self.unknown += 1;
        }
    }

    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.lines as f64 / secs
        } else {
            0.0
        }
    }
}

/// Render one raw call, falling back to `policy` for unknown templates.
pub fn render_line(raw: &str, policy: UnknownPolicy) -> RenderedLine {
    let raw = raw.trim();
    match (resolve_name(raw), render_call(raw)) {
        (Some(template), Some(output)) => RenderedLine {
            input: raw.to_string(),
            template,
            output,
            known: true,
        },
        _ => RenderedLine {
            input: raw.to_string(),
            template: template_name(raw),
            output: policy.apply(raw),
            known: false,
        },
    }
}

pub(crate) fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb
}

fn write_line<W: Write>(writer: &mut W, line: &RenderedLine) -> std::io::Result<()> {
    let json = serde_json::to_string(line)?;
    writeln!(writer, "{}", json)
}

/// Non-blank input lines, stopping after `limit`.
fn calls(reader: impl BufRead, limit: Option<usize>) -> impl Iterator<Item = std::io::Result<String>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .take(limit.unwrap_or(usize::MAX))
}

/// How one raw line becomes a record.
type LineRenderer = fn(&str, UnknownPolicy) -> RenderedLine;

fn render_failed(first_id: usize, last_id: usize) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("renderer panicked on input lines {}..={}", first_id + 1, last_id + 1),
    )
}

/// Strategy 1: one line at a time on the calling thread
pub fn run_sequential<W: Write>(
    reader: impl BufRead,
    writer: &mut W,
    policy: UnknownPolicy,
    limit: Option<usize>,
    quiet: bool,
) -> std::io::Result<Stats> {
    sequential_with(reader, writer, render_line, policy, limit, quiet)
}

fn sequential_with<W: Write>(
    reader: impl BufRead,
    writer: &mut W,
    render: LineRenderer,
    policy: UnknownPolicy,
    limit: Option<usize>,
    quiet: bool,
) -> std::io::Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();
    let pb = spinner(quiet);

    for (line_id, call) in calls(reader, limit).enumerate() {
        let call = call?;
        let line = panic::catch_unwind(|| render(&call, policy))
            .map_err(|_| render_failed(line_id, line_id))?;
        write_line(writer, &line)?;
        stats.record(&line);

        if !quiet && stats.lines % 1000 == 0 {
            let rate = stats.lines as f64 / start_time.elapsed().as_secs_f64();
            pb.set_message(format!(
                "Lines: {} | Rendered: {} | Unknown: {} | Rate: {:.0} lines/s",
                stats.lines, stats.rendered, stats.unknown, rate
            ));
        }
    }

    pb.finish_and_clear();
    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Strategy 2: collect lines into batches and render each batch on threads
pub fn process_batch_parallel<W: Write>(
    reader: impl BufRead,
    writer: &mut W,
    config: &ParallelConfig,
    policy: UnknownPolicy,
    limit: Option<usize>,
    quiet: bool,
) -> std::io::Result<Stats> {
    batch_parallel_with(reader, writer, config, render_line, policy, limit, quiet)
}

fn batch_parallel_with<W: Write>(
    reader: impl BufRead,
    writer: &mut W,
    config: &ParallelConfig,
    render: LineRenderer,
    policy: UnknownPolicy,
    limit: Option<usize>,
    quiet: bool,
) -> std::io::Result<Stats> {
    let start_time = Instant::now();
    let mut stats = Stats::default();
    let pb = spinner(quiet);
    let batch_size = config.batch_size.max(1);
    let mut batch: Vec<String> = Vec::with_capacity(batch_size);
    let mut line_id: usize = 0;

    let mut flush = |batch: &mut Vec<String>, line_id: usize, stats: &mut Stats| {
        let base_id = line_id - batch.len();
        let results = batch_threaded_with(batch, base_id, config.num_threads, render, policy);
        batch.clear();
        for (_, line) in results? {
            write_line(writer, &line)?;
            stats.record(&line);
        }
        if !quiet {
            pb.set_message(format!(
                "Lines: {} | Rendered: {} | Unknown: {}",
                stats.lines, stats.rendered, stats.unknown
            ));
        }
        Ok::<(), std::io::Error>(())
    };

    for call in calls(reader, limit) {
        batch.push(call?);
        line_id += 1;
        if batch.len() >= batch_size {
            flush(&mut batch, line_id, &mut stats)?;
        }
    }
    if !batch.is_empty() {
        flush(&mut batch, line_id, &mut stats)?;
    }

    pb.finish_and_clear();
    writer.flush()?;
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

/// Render a batch across `num_threads` threads. Results come back sorted by
/// line id (`base_id` + position in the batch).
///
/// A renderer panic on any thread fails the whole batch rather than dropping
/// that thread's lines.
pub fn render_batch_threaded(
    batch: &[String],
    base_id: usize,
    num_threads: usize,
    policy: UnknownPolicy,
) -> std::io::Result<Vec<(usize, RenderedLine)>> {
    batch_threaded_with(batch, base_id, num_threads, render_line, policy)
}

fn batch_threaded_with(
    batch: &[String],
    base_id: usize,
    num_threads: usize,
    render: LineRenderer,
    policy: UnknownPolicy,
) -> std::io::Result<Vec<(usize, RenderedLine)>> {
    if batch.is_empty() {
        return Ok(vec![]);
    }

    let num_threads = num_threads.min(batch.len()).max(1);
    let chunk_size = (batch.len() + num_threads - 1) / num_threads;

    let chunks: Vec<Vec<(usize, String)>> = batch
        .iter()
        .enumerate()
        .map(|(i, raw)| (base_id + i, raw.clone()))
        .collect::<Vec<_>>()
        .chunks(chunk_size)
        .map(|c| c.to_vec())
        .collect();

    // (first id, last id, handle)
    let handles: Vec<(usize, usize, JoinHandle<Vec<(usize, RenderedLine)>>)> = chunks
        .into_iter()
        .map(|chunk| {
            let first = chunk.first().map(|(id, _)| *id).unwrap_or(base_id);
            let last = chunk.last().map(|(id, _)| *id).unwrap_or(base_id);
            let handle = thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|(id, raw)| (id, render(&raw, policy)))
                    .collect()
            });
            (first, last, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(batch.len());
    let mut failed = None;
    for (first, last, handle) in handles {
        match handle.join() {
            Ok(chunk_results) => results.extend(chunk_results),
            Err(_) => {
                tracing::error!(first = first + 1, last = last + 1, "render thread panicked");
                failed.get_or_insert((first, last));
            }
        }
    }
    if let Some((first, last)) = failed {
        return Err(render_failed(first, last));
    }
    results.sort_by_key(|(id, _)| *id);
    Ok(results)
}
