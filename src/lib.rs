use clap::ValueEnum;

pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod metric;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod series;
pub mod stats;
pub mod sweep;

pub use error::{Result, VizError};

/// Axis scale of a chart.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum Scale {
    /// Linear axes, x starting at zero for non-negative data.
    #[default]
    Linear,
    /// Logarithmic x and y axes.
    Log,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::Linear, Scale::Log];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }
}
