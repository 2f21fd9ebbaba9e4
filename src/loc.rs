//! Compares how many lines of code it takes to obtain N customized cars with
//! and without a prototype registry. Usage programs are generated for each N
//! and their effective lines are counted.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};

/// The number of setter lines the constructor sample writes per car, standing
/// in for the fields a prototype would already carry.
pub const EXTRA_SETTERS: usize = 12;

const PROTOTYPE_PREFIX: &str = "prototype_usage_";
const CONSTRUCTOR_PREFIX: &str = "constructor_usage_";
const SAMPLE_EXTENSION: &str = ".rs";

/// The effective lines of code of both samples for one object count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocRow {
    pub n: usize,
    pub prototype: usize,
    pub constructor: usize
}

/// Generates a program that obtains `n` cars by cloning a registered
/// prototype and customizing the color of each.
pub fn prototype_sample(n: usize) -> String {
    let mut src = String::new();
    src.push_str("use prototype_bench::{Car, PrototypeRegistry};\n\n");
    src.push_str("fn main() {\n");
    src.push_str("    // create base and registry\n");
    src.push_str("    let base = Car::new(\"Make\", \"Model\", \"Color\", 2025, \
        [\"F\"]);\n");
    src.push_str("    let mut registry = PrototypeRegistry::new();\n");
    src.push_str("    registry.register(\"key\", base);\n\n");

    for i in 0..n {
        let _ = writeln!(src,
            "    let mut c{i} = registry.get_clone(\"key\").unwrap();");
        let _ = writeln!(src,
            "    c{i}.set_color(format!(\"{{}}#{{}}\", c{i}.color(), {i}));");
    }

    src.push_str("}\n");
    src
}

/// Generates a program that obtains `n` cars by copy construction, followed
/// by [EXTRA_SETTERS] setter calls per car.
pub fn constructor_sample(n: usize) -> String {
    let mut src = String::new();
    src.push_str("use prototype_bench::Car;\n\n");
    src.push_str("fn main() {\n");
    src.push_str("    // create base\n");
    src.push_str("    let base = Car::new(\"Make\", \"Model\", \"Color\", 2025, \
        [\"F\"]);\n\n");

    for i in 0..n {
        let _ = writeln!(src, "    let mut c{i} = Car::copy_construct(&base);");

        for f in 0..EXTRA_SETTERS {
            let _ = writeln!(src,
                "    c{i}.set_color(format!(\"{{}}#f{f}\", c{i}.color()));");
        }
    }

    src.push_str("}\n");
    src
}

/// Counts the lines of `source` which are not blank, not `//` comments and
/// not part of a `/* ... */` block. A line opening a block comment counts as
/// part of the block.
///
/// # Example
///
/// ```
/// use prototype_bench::loc::count_effective_lines;
///
/// let source = "fn main() {\n\
///     // comment\n\
///     \n\
///     /* block\n\
///        still block */\n\
///     let x = 1;\n\
/// }\n";
///
/// assert_eq!(3, count_effective_lines(source));
/// ```
pub fn count_effective_lines(source: &str) -> usize {
    let mut in_block = false;
    let mut count = 0;

    for line in source.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if !in_block && line.starts_with("/*") {
            in_block = !(line.ends_with("*/") && line != "/*");
            continue;
        }

        if in_block {
            if line.ends_with("*/") {
                in_block = false;
            }

            continue;
        }

        if line.starts_with("//") {
            continue;
        }

        count += 1;
    }

    count
}

fn sample_path(dir: &Path, prefix: &str, n: usize) -> PathBuf {
    dir.join(format!("{prefix}{n}{SAMPLE_EXTENSION}"))
}

fn write_and_count(path: &Path, source: &str) -> ReportResult<usize> {
    fs::write(path, source).map_err(|e| ReportError::io(path, e))?;
    let written = fs::read_to_string(path)
        .map_err(|e| ReportError::io(path, e))?;
    Ok(count_effective_lines(&written))
}

/// Writes both samples for every object count into `dir`, creating it if
/// necessary, and counts their effective lines.
///
/// # Errors
///
/// [ReportError::Io] if the directory or a sample cannot be written.
pub fn generate_samples(dir: &Path, sizes: &[usize])
        -> ReportResult<Vec<LocRow>> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
    let mut rows = Vec::with_capacity(sizes.len());

    for &n in sizes {
        let prototype = write_and_count(
            &sample_path(dir, PROTOTYPE_PREFIX, n), &prototype_sample(n))?;
        let constructor = write_and_count(
            &sample_path(dir, CONSTRUCTOR_PREFIX, n), &constructor_sample(n))?;

        tracing::info!(n, prototype, constructor, "counted sample lines");
        rows.push(LocRow {
            n,
            prototype,
            constructor
        });
    }

    Ok(rows)
}

fn parse_sample_name(name: &str) -> Option<(bool, usize)> {
    let stem = name.strip_suffix(SAMPLE_EXTENSION)?;

    if let Some(n) = stem.strip_prefix(PROTOTYPE_PREFIX) {
        n.parse().ok().map(|n| (true, n))
    }
    else if let Some(n) = stem.strip_prefix(CONSTRUCTOR_PREFIX) {
        n.parse().ok().map(|n| (false, n))
    }
    else {
        None
    }
}

/// Rebuilds the LOC table from samples previously written to `dir`. Rows are
/// sorted by object count. If only one of the two samples exists for some
/// count, the other one counts as 0 lines.
///
/// # Errors
///
/// [ReportError::Io] if the directory or a sample cannot be read.
pub fn scan_samples(dir: &Path) -> ReportResult<Vec<LocRow>> {
    let entries = fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))?;
    let mut rows = BTreeMap::new();

    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        let name = entry.file_name();
        let Some((is_prototype, n)) = name.to_str()
            .and_then(parse_sample_name) else {
            continue;
        };
        let path = entry.path();
        let source = fs::read_to_string(&path)
            .map_err(|e| ReportError::io(&path, e))?;
        let lines = count_effective_lines(&source);
        let row = rows.entry(n).or_insert(LocRow {
            n,
            prototype: 0,
            constructor: 0
        });

        if is_prototype {
            row.prototype = lines;
        }
        else {
            row.constructor = lines;
        }
    }

    Ok(rows.into_values().collect())
}
