use ca_bench_viz::chart::PngRenderer;
use ca_bench_viz::config::{ExitPolicy, RenderConfig};
use ca_bench_viz::dataset::BenchmarkFile;
use ca_bench_viz::format::NumberFormat;
use ca_bench_viz::pipeline::{self, BatchSummary, FileOutcome, SimpleOptions};
use ca_bench_viz::report;
use ca_bench_viz::Scale;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug)]
enum Command {
    /// Chart multi-series sweep files: duration and efficiency, linear and log.
    Sets {
        /// Benchmark JSON files or directories containing them.
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Do not announce written charts on stdout.
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Directory for the charts; defaults to each input file's directory.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Also print summary statistics for each file.
        #[arg(long, default_value_t = false)]
        stats: bool,

        /// Grouped decimal tick labels instead of scientific notation.
        #[arg(long, default_value_t = false)]
        full_numbers: bool,

        /// Sweep parameter to plot against, overriding the file's `sweep_type`.
        #[arg(long, value_name = "PARAM")]
        sweep: Option<String>,
    },

    /// Chart average duration against one parameter of a single file.
    Simple {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Parameter for the x-axis (e.g. width_height, iterations).
        #[arg(long, value_name = "PARAM")]
        x_axis: Option<String>,

        /// Where to write the chart.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Directory for the chart when --output is not given.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Scale::Linear)]
        scale: Scale,

        #[arg(long, default_value_t = false)]
        headless: bool,

        #[arg(long, default_value_t = false)]
        stats: bool,

        #[arg(long, default_value_t = false)]
        full_numbers: bool,
    },

    /// Print summary statistics without drawing anything.
    Summary {
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ca-bench-viz")]
#[command(about = "Charts and summary statistics for cellular-automaton benchmark results")]
struct Args {
    /// Log progress at debug level (RUST_LOG overrides).
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Exit with a failure status if any input file could not be processed.
    #[arg(long, default_value_t = false, global = true)]
    strict: bool,

    #[command(subcommand)]
    cmd: Command,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prints a finished file's report and charts, or its error line.
///
/// Error lines go to stderr, so stdout carries only report lines and
/// `Generated:` announcements.
fn emit(outcome: &FileOutcome, headless: bool) {
    match &outcome.result {
        Ok(artifacts) => {
            for line in &artifacts.report {
                println!("{line}");
            }
            if !headless {
                for chart in &artifacts.charts {
                    println!("Generated: {}", chart.display());
                }
            }
        }
        Err(err) => eprintln!("{}", pipeline::failure_message(&outcome.path, err)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    let policy = if args.strict {
        ExitPolicy::Strict
    } else {
        ExitPolicy::Lenient
    };

    let summary: BatchSummary = match args.cmd {
        Command::Sets {
            files,
            headless,
            output_dir,
            stats,
            full_numbers,
            sweep,
        } => {
            let config = RenderConfig {
                output_dir,
                headless,
                stats,
                number_format: NumberFormat::from_full_numbers(full_numbers),
                sweep,
                ..RenderConfig::default()
            };
            let mut renderer = PngRenderer::new(config.size);
            let paths = pipeline::expand_inputs(&files);
            pipeline::run_batch(
                &paths,
                |path| pipeline::process_sweep_file(path, &config, &mut renderer),
                |outcome| emit(outcome, config.headless),
            )
        }
        Command::Simple {
            file,
            x_axis,
            output,
            output_dir,
            scale,
            headless,
            stats,
            full_numbers,
        } => {
            let config = RenderConfig {
                output_dir,
                headless,
                stats,
                number_format: NumberFormat::from_full_numbers(full_numbers),
                ..RenderConfig::default()
            };
            let options = SimpleOptions {
                x_axis,
                output,
                scale,
            };
            let mut renderer = PngRenderer::new(config.size);
            pipeline::run_batch(
                &[file],
                |path| pipeline::process_simple_file(path, &options, &config, &mut renderer),
                |outcome| emit(outcome, config.headless),
            )
        }
        Command::Summary { files } => {
            let paths = pipeline::expand_inputs(&files);
            pipeline::run_batch(
                &paths,
                |path| {
                    let file = BenchmarkFile::load(path)?;
                    Ok(pipeline::Artifacts {
                        charts: Vec::new(),
                        report: report::summary_lines(&file)?,
                    })
                },
                |outcome| emit(outcome, true),
            )
        }
    };

    if summary.is_failure(policy) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
