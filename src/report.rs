//! Plain-text forms of experiment results: CSV tables with a header row and
//! one row per object count, and a human-readable summary.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};
use crate::harness::{ExperimentReport, SeriesPoint, Strategy};
use crate::loc::{self, LocRow};

/// The file name of the LOC comparison table.
pub const LOC_CSV: &str = "loc_results.csv";

fn two_series_csv<F>(report: &ExperimentReport, unit: &str, value: F)
    -> String
where
    F: Fn(&SeriesPoint) -> String
{
    let prototype = report.series(Strategy::Prototype);
    let construct = report.series(Strategy::FullConstruct);
    let mut csv = format!("N,{}_{unit},{}_{unit}\n",
        Strategy::Prototype.label(), Strategy::FullConstruct.label());

    for (p, c) in prototype.iter().zip(&construct) {
        let _ = writeln!(csv, "{},{},{}", p.n, value(p), value(c));
    }

    csv
}

/// Renders the timing series as `N,Prototype_ms,Constructor_ms` table.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use prototype_bench::{ExperimentReport, Measurement, Sample};
/// use prototype_bench::report::timing_csv;
///
/// let measurement = |millis| Measurement {
///     elapsed: Duration::from_millis(millis),
///     ..Measurement::default()
/// };
/// let report = ExperimentReport {
///     name: "example".to_owned(),
///     payload_size: 1,
///     samples: vec![Sample {
///         n: 50,
///         prototype: measurement(2),
///         construct: measurement(30)
///     }]
/// };
///
/// assert_eq!("N,Prototype_ms,Constructor_ms\n50,2.000,30.000\n",
///     timing_csv(&report));
/// ```
pub fn timing_csv(report: &ExperimentReport) -> String {
    two_series_csv(report, "ms", |point| format!("{:.3}", point.millis))
}

/// Renders the memory series as `N,Prototype_KB,Constructor_KB` table.
pub fn memory_csv(report: &ExperimentReport) -> String {
    two_series_csv(report, "KB", |point| format!("{:.1}", point.kib))
}

/// Renders one summary line per object count.
pub fn render_table(report: &ExperimentReport) -> String {
    let mut table = String::new();

    for sample in &report.samples {
        let _ = writeln!(table,
            "N={} | Prototype: {:.3} ms, {:.1} KB | Constructor: {:.3} ms, \
                {:.1} KB",
            sample.n, sample.prototype.millis(), sample.prototype.kib(),
            sample.construct.millis(), sample.construct.kib());
    }

    table
}

fn write_file(path: &Path, contents: &str) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }

    fs::write(path, contents).map_err(|e| ReportError::io(path, e))
}

/// Writes `<name>_time.csv` and `<name>_memory.csv` into `dir`, creating it
/// if necessary, and returns both paths.
///
/// # Errors
///
/// [ReportError::Io] if a file cannot be written.
pub fn write_report(dir: &Path, report: &ExperimentReport)
        -> ReportResult<(PathBuf, PathBuf)> {
    let time_path = dir.join(format!("{}_time.csv", report.name));
    let memory_path = dir.join(format!("{}_memory.csv", report.name));

    write_file(&time_path, &timing_csv(report))?;
    write_file(&memory_path, &memory_csv(report))?;

    Ok((time_path, memory_path))
}

/// Renders the LOC comparison as `N,Prototype_LOC,Constructor_LOC` table.
pub fn loc_csv(rows: &[LocRow]) -> String {
    let mut csv = String::from("N,Prototype_LOC,Constructor_LOC\n");

    for row in rows {
        let _ = writeln!(csv, "{},{},{}", row.n, row.prototype,
            row.constructor);
    }

    csv
}

/// Writes the LOC comparison table to `path`, creating parent directories.
///
/// # Errors
///
/// [ReportError::Io] if the file cannot be written.
pub fn write_loc_csv(path: &Path, rows: &[LocRow]) -> ReportResult<()> {
    write_file(path, &loc_csv(rows))
}

fn parse_field(path: &Path, line: usize, raw: &str, field: &str)
        -> ReportResult<usize> {
    field.trim().parse().map_err(|_| ReportError::Parse {
        path: path.to_owned(),
        line,
        content: raw.to_owned()
    })
}

/// Reads a LOC comparison table. The header row is skipped, as are blank
/// rows and rows with fewer than three fields.
///
/// # Errors
///
/// * [ReportError::Io] if the file cannot be read.
/// * [ReportError::Parse] if a field is not a non-negative integer.
pub fn read_loc_csv(path: &Path) -> ReportResult<Vec<LocRow>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ReportError::io(path, e))?;
    let mut rows = Vec::new();

    for (index, raw) in contents.lines().enumerate().skip(1) {
        let fields = raw.trim().split(',').collect::<Vec<_>>();

        if fields.len() < 3 {
            continue;
        }

        let line = index + 1;
        rows.push(LocRow {
            n: parse_field(path, line, raw, fields[0])?,
            prototype: parse_field(path, line, raw, fields[1])?,
            constructor: parse_field(path, line, raw, fields[2])?
        });
    }

    Ok(rows)
}

/// Loads the LOC comparison for presentation. The table at `csv_path` is
/// preferred. If it does not exist, the table is rebuilt from the samples in
/// `samples_dir`. When neither source yields data, a diagnostic is logged
/// and `None` is returned instead of an error.
pub fn load_loc_results(csv_path: &Path, samples_dir: &Path)
        -> Option<Vec<LocRow>> {
    if csv_path.exists() {
        return match read_loc_csv(csv_path) {
            Ok(rows) if rows.is_empty() => {
                tracing::warn!(path = %csv_path.display(),
                    "CSV contains no data");
                None
            },
            Ok(rows) => Some(rows),
            Err(e) => {
                tracing::warn!(error = %e, "could not read LOC results");
                None
            }
        };
    }

    if !samples_dir.is_dir() {
        tracing::warn!(csv = %csv_path.display(),
            samples = %samples_dir.display(),
            "neither LOC results nor generated samples were found, run the \
                `loc` command first");
        return None;
    }

    match loc::scan_samples(samples_dir) {
        Ok(rows) if rows.is_empty() => {
            tracing::warn!(samples = %samples_dir.display(),
                "no generated samples found");
            None
        },
        Ok(rows) => Some(rows),
        Err(e) => {
            tracing::warn!(error = %e, "could not scan generated samples");
            None
        }
    }
}

/// Renders one summary line per LOC row.
pub fn render_loc_table(rows: &[LocRow]) -> String {
    let mut table = String::new();

    for row in rows {
        let _ = writeln!(table, "N={} -> Prototype LOC={}, Constructor LOC={}",
            row.n, row.prototype, row.constructor);
    }

    table
}
