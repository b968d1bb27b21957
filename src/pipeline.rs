//! Per-file processing and batch outcomes.
//!
//! Each input file is loaded, reduced and rendered on its own. A failure in
//! one file becomes a failed [`FileOutcome`]; the batch keeps going and the
//! caller decides what the failures mean for the exit status.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::chart::{ChartRenderer, ChartSpec};
use crate::config::{ExitPolicy, RenderConfig};
use crate::dataset::BenchmarkFile;
use crate::error::{Result, VizError};
use crate::metric::{Metric, WIDTH_HEIGHT};
use crate::report;
use crate::series::SeriesSet;
use crate::sweep::AxisMode;
use crate::Scale;

/// What a successfully processed file produced.
#[derive(Clone, Debug, Default)]
pub struct Artifacts {
    pub charts: Vec<PathBuf>,
    /// Summary lines, empty unless stats were requested.
    pub report: Vec<String>,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Artifacts>,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Whether the process should report failure under `policy`.
    pub fn is_failure(&self, policy: ExitPolicy) -> bool {
        match policy {
            ExitPolicy::Lenient => false,
            ExitPolicy::Strict => self.failures().next().is_some(),
        }
    }
}

/// The console line for a failed file.
pub fn failure_message(path: &Path, err: &VizError) -> String {
    format!("Error processing {}: {}", path.display(), err)
}

/// Runs `process` for every path in order, one file at a time.
///
/// `on_done` sees each outcome as soon as its file finishes, before the next
/// file starts.
pub fn run_batch<F, G>(paths: &[PathBuf], mut process: F, mut on_done: G) -> BatchSummary
where
    F: FnMut(&Path) -> Result<Artifacts>,
    G: FnMut(&FileOutcome),
{
    let mut summary = BatchSummary::default();
    for path in paths {
        debug!(path = %path.display(), "processing");
        let outcome = FileOutcome {
            path: path.clone(),
            result: process(path),
        };
        if let Err(err) = &outcome.result {
            warn!(path = %path.display(), error = %err, "file failed");
        }
        on_done(&outcome);
        summary.outcomes.push(outcome);
    }
    summary
}

/// Replaces directories with the `*.json` files beneath them, sorted by path.
pub fn expand_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }

        let found: Vec<PathBuf> = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        if found.is_empty() {
            warn!(dir = %path.display(), "no .json files found");
        }
        out.extend(found);
    }
    out
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| VizError::DataFormat(format!("{} has no file name", path.display())))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| VizError::io("create directory", dir, e))
}

/// Four charts per file: {duration, efficiency} × {linear, log}.
///
/// Every chart is computed before anything is written, so a data error leaves
/// no partial output behind.
pub fn process_sweep_file(
    path: &Path,
    config: &RenderConfig,
    renderer: &mut dyn ChartRenderer,
) -> Result<Artifacts> {
    let file = BenchmarkFile::load(path)?;
    let axis = config
        .sweep
        .clone()
        .or_else(|| file.sweep_axis.clone())
        .ok_or_else(|| VizError::DataFormat("missing `sweep_type` key".to_string()))?;
    let set = SeriesSet::collect(&file, &axis, AxisMode::Area)?;

    let stem = file_stem(path)?;
    let out_dir = config.output_dir_for(path);

    let mut planned = Vec::with_capacity(Metric::ALL.len() * Scale::ALL.len());
    for metric in Metric::ALL {
        for scale in Scale::ALL {
            let spec = ChartSpec::build(&set, metric, scale, config.number_format)?;
            spec.bounds()?;
            let name = format!("{stem}_{}_{}.png", metric.as_str(), scale.as_str());
            planned.push((out_dir.join(name), spec));
        }
    }

    let report = if config.stats {
        report::summary_lines(&file)?
    } else {
        Vec::new()
    };

    ensure_dir(&out_dir)?;
    let mut charts = Vec::with_capacity(planned.len());
    for (chart_path, spec) in &planned {
        renderer.render(spec, chart_path)?;
        charts.push(chart_path.clone());
    }

    Ok(Artifacts { charts, report })
}

/// Options for plotting a single duration chart from one file.
#[derive(Clone, Debug, Default)]
pub struct SimpleOptions {
    /// Parameter for the x-axis; defaults to the file's sweep axis, then `width_height`.
    pub x_axis: Option<String>,
    /// Explicit image path; defaults to `{stem}_{axis}.png` in the output directory.
    pub output: Option<PathBuf>,
    pub scale: Scale,
}

/// One duration chart for one file, plotted against the raw parameter values.
pub fn process_simple_file(
    path: &Path,
    options: &SimpleOptions,
    config: &RenderConfig,
    renderer: &mut dyn ChartRenderer,
) -> Result<Artifacts> {
    let file = BenchmarkFile::load(path)?;
    let axis = options
        .x_axis
        .clone()
        .or_else(|| file.sweep_axis.clone())
        .unwrap_or_else(|| WIDTH_HEIGHT.to_string());
    let set = SeriesSet::collect(&file, &axis, AxisMode::Raw)?;
    let spec = ChartSpec::build(&set, Metric::Duration, options.scale, config.number_format)?;
    spec.bounds()?;

    let report = if config.stats {
        report::summary_lines(&file)?
    } else {
        Vec::new()
    };

    let chart_path = match &options.output {
        Some(output) => output.clone(),
        None => config
            .output_dir_for(path)
            .join(format!("{}_{}.png", file_stem(path)?, set.axis)),
    };
    if let Some(parent) = chart_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    renderer.render(&spec, &chart_path)?;

    Ok(Artifacts {
        charts: vec![chart_path],
        report,
    })
}
