use std::path::{Path, PathBuf};

use crate::format::NumberFormat;

/// Resolved settings for one invocation.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Where charts are written; `None` puts them next to each input file.
    pub output_dir: Option<PathBuf>,
    /// Skip announcing each written chart on stdout.
    pub headless: bool,
    /// Also build the text summary for each file.
    pub stats: bool,
    pub number_format: NumberFormat,
    /// Overrides the sweep parameter a file declares.
    pub sweep: Option<String>,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            headless: false,
            stats: false,
            number_format: NumberFormat::default(),
            sweep: None,
            size: (1200, 720),
        }
    }
}

impl RenderConfig {
    /// Directory that receives the charts for `input`.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Whether per-file failures change the process exit status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Always exit successfully once the batch has run.
    #[default]
    Lenient,
    /// Exit with failure if any file failed.
    Strict,
}
