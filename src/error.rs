use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable simulation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid resolution must be at least 1, got {n}")]
    InvalidResolution { n: usize },

    #[error("timestep must be finite and positive, got {dt}")]
    InvalidTimestep { dt: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("relaxation needs at least one sweep")]
    NoIterations,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Failures of the window driver or the image export.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("snapshot {}: {message}", path.display())]
    Snapshot { path: PathBuf, message: String },
}

#[derive(Error, Debug)]
pub enum FluidError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
