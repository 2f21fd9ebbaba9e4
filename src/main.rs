use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use prototype_bench::{
    DhatProbe,
    ExperimentConfig,
    chart,
    loc,
    report,
    run_experiment
};

#[global_allocator]
static ALLOCATOR: dhat::Alloc = dhat::Alloc;

/// Compares cloning registered prototypes with full construction.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
enum Command {

    /// Measure time and memory of both strategies over several object counts.
    Run {
        #[arg(long, value_enum, default_value_t = Preset::Heavy)]
        preset: Preset,

        /// Comma-separated, strictly ascending object counts.
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,

        /// Payload bytes generated by every full construction.
        #[arg(long)]
        payload_size: Option<usize>,

        /// Object count of the discarded warm-up run.
        #[arg(long)]
        warmup: Option<usize>,

        /// Pause before each memory reading, in milliseconds.
        #[arg(long, default_value_t = 0)]
        settle_ms: u64,

        /// Also save the full dhat heap profile of the experiment to this
        /// file.
        #[arg(long)]
        heap_profile: Option<PathBuf>,

        #[arg(long, default_value = "charts")]
        out_dir: PathBuf
    },

    /// Generate usage samples and compare their lines of code.
    Loc {
        #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 5])]
        sizes: Vec<usize>,

        #[arg(long, default_value = "generated")]
        samples_dir: PathBuf,

        #[arg(long, default_value = "charts")]
        out_dir: PathBuf
    },

    /// Summarize a previously written LOC comparison.
    Report {
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,

        #[arg(long, default_value = "generated")]
        samples_dir: PathBuf
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Baseline,
    Heavy,
    Secondary
}

impl Preset {
    fn config(self) -> ExperimentConfig {
        match self {
            Preset::Baseline => ExperimentConfig::baseline(),
            Preset::Heavy => ExperimentConfig::heavy(),
            Preset::Secondary => ExperimentConfig::secondary()
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn measure(config: &ExperimentConfig, heap_profile: Option<PathBuf>)
        -> anyhow::Result<prototype_bench::ExperimentReport> {
    let builder = dhat::Profiler::builder();
    let _profiler = match heap_profile {
        Some(path) => builder.file_name(path).build(),
        None => builder.testing().build()
    };

    Ok(run_experiment(config, DhatProbe)?)
}

fn run(preset: Preset, sizes: Option<Vec<usize>>, payload_size: Option<usize>,
        warmup: Option<usize>, settle_ms: u64, heap_profile: Option<PathBuf>,
        out_dir: PathBuf) -> anyhow::Result<()> {
    let mut config = preset.config();

    if let Some(sizes) = sizes {
        config.sizes = sizes;
    }

    if let Some(payload_size) = payload_size {
        config.payload_size = payload_size;
    }

    if let Some(warmup) = warmup {
        config.warmup = warmup;
    }

    config.settle_delay = Duration::from_millis(settle_ms);

    let result = measure(&config, heap_profile)
        .with_context(|| format!("experiment '{}' failed", config.name))?;
    print!("{}", report::render_table(&result));

    let (time_path, memory_path) = report::write_report(&out_dir, &result)?;
    tracing::info!(time = %time_path.display(),
        memory = %memory_path.display(), "results saved");

    let (time_chart, memory_chart) = chart::write_charts(&out_dir, &result)?;
    tracing::info!(time = %time_chart.display(),
        memory = %memory_chart.display(), "charts saved");
    Ok(())
}

fn count_loc(sizes: &[usize], samples_dir: PathBuf, out_dir: PathBuf)
        -> anyhow::Result<()> {
    let rows = loc::generate_samples(&samples_dir, sizes)?;
    print!("{}", report::render_loc_table(&rows));

    let csv_path = out_dir.join(report::LOC_CSV);
    report::write_loc_csv(&csv_path, &rows)?;
    tracing::info!(path = %csv_path.display(), "LOC results saved");

    let chart_path = out_dir.join(chart::LOC_CHART);
    chart::draw_loc_chart(&chart_path, &rows)?;
    tracing::info!(path = %chart_path.display(), "LOC chart saved");
    Ok(())
}

fn summarize(out_dir: PathBuf, samples_dir: PathBuf) -> anyhow::Result<()> {
    let csv_path = out_dir.join(report::LOC_CSV);

    if let Some(rows) = report::load_loc_results(&csv_path, &samples_dir) {
        print!("{}", report::render_loc_table(&rows));

        let chart_path = out_dir.join(chart::LOC_CHART);
        chart::draw_loc_chart(&chart_path, &rows)?;
        tracing::info!(path = %chart_path.display(), "LOC chart saved");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();

    match Cli::parse().command {
        Command::Run {
            preset,
            sizes,
            payload_size,
            warmup,
            settle_ms,
            heap_profile,
            out_dir
        } => run(preset, sizes, payload_size, warmup, settle_ms, heap_profile,
            out_dir),
        Command::Loc {
            sizes,
            samples_dir,
            out_dir
        } => count_loc(&sizes, samples_dir, out_dir),
        Command::Report {
            out_dir,
            samples_dir
        } => summarize(out_dir, samples_dir)
    }
}
