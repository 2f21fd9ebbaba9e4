//! SVG charts of experiment results: time and memory over the object count
//! for both strategies, and a bar chart of the LOC comparison.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::{ReportError, ReportResult};
use crate::harness::{ExperimentReport, SeriesPoint, Strategy};
use crate::loc::LocRow;

/// The file name of the LOC bar chart.
pub const LOC_CHART: &str = "loc_chart.svg";

const SIZE: (u32, u32) = (960, 540);
const FONT: &str = "sans-serif";
const POINT_SIZE: u32 = 3;

type DrawResult<T> = Result<T, DrawingAreaErrorKind<io::Error>>;

fn strategy_color(strategy: Strategy) -> RGBColor {
    match strategy {
        Strategy::Prototype => RGBColor(46, 139, 87),
        Strategy::FullConstruct => RGBColor(178, 34, 34)
    }
}

fn upper_bound(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    }
    else {
        1.0
    }
}

fn open_area(path: &Path) -> ReportResult<DrawingArea<SVGBackend, Shift>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }

    Ok(SVGBackend::new(path, SIZE).into_drawing_area())
}

fn draw_lines<F>(root: &DrawingArea<SVGBackend, Shift>, title: &str,
    y_desc: &str, report: &ExperimentReport, value: F) -> DrawResult<()>
where
    F: Fn(&SeriesPoint) -> f64
{
    let series = Strategy::ALL.map(|strategy|
        (strategy, report.series(strategy)));
    let points = || series.iter().flat_map(|(_, points)| points.iter());
    let max_n = points().map(|point| point.n).max().unwrap_or(0);
    let max_value = points().map(&value).fold(0.0, f64::max);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0..max_n + 1, 0.0..upper_bound(max_value))?;

    chart.configure_mesh()
        .x_desc("N (objects)")
        .y_desc(y_desc)
        .draw()?;

    for (strategy, points) in &series {
        let color = strategy_color(*strategy);

        chart.draw_series(LineSeries::new(
                points.iter().map(|point| (point.n, value(point))),
                color.stroke_width(2))
            .point_size(POINT_SIZE))?
            .label(strategy.label())
            .legend(move |(x, y)|
                PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
}

fn draw_series_chart<F>(path: &Path, title: &str, y_desc: &str,
    report: &ExperimentReport, value: F) -> ReportResult<()>
where
    F: Fn(&SeriesPoint) -> f64
{
    let root = open_area(path)?;
    draw_lines(&root, title, y_desc, report, value)
        .map_err(|e| ReportError::chart(path, e))
}

/// Draws the elapsed time of both strategies over N as line chart.
///
/// # Errors
///
/// * [ReportError::Io] if the parent directory cannot be created.
/// * [ReportError::Chart] if the chart cannot be drawn or written.
pub fn draw_time_chart(path: &Path, report: &ExperimentReport)
        -> ReportResult<()> {
    let title = format!("Time vs N ({})", report.name);
    draw_series_chart(path, &title, "Time (ms)", report, |point| point.millis)
}

/// Draws the memory delta of both strategies over N as line chart.
///
/// # Errors
///
/// * [ReportError::Io] if the parent directory cannot be created.
/// * [ReportError::Chart] if the chart cannot be drawn or written.
pub fn draw_memory_chart(path: &Path, report: &ExperimentReport)
        -> ReportResult<()> {
    let title = format!("Memory vs N ({})", report.name);
    draw_series_chart(path, &title, "Memory (KB)", report, |point| point.kib)
}

/// Draws `<name>_time_vs_n.svg` and `<name>_memory_vs_n.svg` into `dir`,
/// creating it if necessary, and returns both paths.
///
/// # Errors
///
/// See [draw_time_chart] and [draw_memory_chart].
pub fn write_charts(dir: &Path, report: &ExperimentReport)
        -> ReportResult<(PathBuf, PathBuf)> {
    let time_path = dir.join(format!("{}_time_vs_n.svg", report.name));
    let memory_path = dir.join(format!("{}_memory_vs_n.svg", report.name));

    draw_time_chart(&time_path, report)?;
    draw_memory_chart(&memory_path, report)?;

    Ok((time_path, memory_path))
}

fn draw_bars(root: &DrawingArea<SVGBackend, Shift>, rows: &[LocRow])
        -> DrawResult<()> {
    let groups = rows.len().max(1);
    let max_loc = rows.iter()
        .map(|row| row.prototype.max(row.constructor))
        .max()
        .unwrap_or(0);
    let centers = (0..groups).map(|i| i as f64 + 0.5).collect::<Vec<_>>();
    let label = |x: &f64| rows.get(x.floor() as usize)
        .map(|row| format!("N={}", row.n))
        .unwrap_or_default();

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption("Lines of code: Prototype vs Constructor", (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0.0..groups as f64).with_key_points(centers),
            0..max_loc + max_loc / 10 + 1)?;

    chart.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&label)
        .y_desc("Effective LOC")
        .draw()?;

    for (offset, strategy) in [(0.1, Strategy::Prototype),
            (0.5, Strategy::FullConstruct)] {
        let color = strategy_color(strategy);
        let bars = rows.iter().enumerate().map(|(i, row)| {
            let x = i as f64 + offset;
            let loc = match strategy {
                Strategy::Prototype => row.prototype,
                Strategy::FullConstruct => row.constructor
            };

            Rectangle::new([(x, 0), (x + 0.4, loc)], color.filled())
        });

        chart.draw_series(bars)?
            .label(strategy.label())
            .legend(move |(x, y)|
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
}

/// Draws the LOC comparison as grouped bar chart with one group per object
/// count.
///
/// # Errors
///
/// * [ReportError::Io] if the parent directory cannot be created.
/// * [ReportError::Chart] if the chart cannot be drawn or written.
pub fn draw_loc_chart(path: &Path, rows: &[LocRow]) -> ReportResult<()> {
    let root = open_area(path)?;
    draw_bars(&root, rows).map_err(|e| ReportError::chart(path, e))
}
