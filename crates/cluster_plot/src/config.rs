use crate::{
    constants::{
        DEFAULT_CENTROID_MARKER_SIZE, DEFAULT_CENTROIDS_FILE, DEFAULT_FONT_SIZE, DEFAULT_HEIGHT,
        DEFAULT_POINT_MARKER_SIZE, DEFAULT_POINTS_FILE, DEFAULT_WIDTH,
        ENV_OUTPUT_PATH, MIN_IMAGE_SIZE,
    },
    error::{PlotError, Result},
};
use serde::{Deserialize, Serialize};
use std::{env, path::Path, path::PathBuf};

/// Settings for one plot run. Every field has a default, so an empty TOML
/// file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub points: PathBuf,
    pub centroids: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            points: PathBuf::from(DEFAULT_POINTS_FILE),
            centroids: PathBuf::from(DEFAULT_CENTROIDS_FILE),
        }
    }
}

/// Without a path the plot is shown in a window
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
}

/// Where a run sends its figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Window,
    Png(PathBuf),
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Window => write!(f, "plot window"),
            OutputTarget::Png(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Image size and marker sizes, all in px
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub width: u32,
    pub height: u32,
    pub point_marker_size: f64,
    pub centroid_marker_size: f64,
    pub font_size: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            point_marker_size: DEFAULT_POINT_MARKER_SIZE,
            centroid_marker_size: DEFAULT_CENTROID_MARKER_SIZE,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Config {
    /// Reads and validates a TOML configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            PlotError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `CLUSTER_PLOT_OUTPUT` if it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(output) = env::var(ENV_OUTPUT_PATH)
            && !output.trim().is_empty()
        {
            self.output.path = Some(PathBuf::from(output));
        }
    }

    pub fn output_target(&self) -> OutputTarget {
        match &self.output.path {
            Some(path) => OutputTarget::Png(path.clone()),
            None => OutputTarget::Window,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let style = &self.style;
        if style.width < MIN_IMAGE_SIZE || style.height < MIN_IMAGE_SIZE {
            return Err(PlotError::Config(format!(
                "image must be at least {MIN_IMAGE_SIZE}x{MIN_IMAGE_SIZE} px, got {}x{}",
                style.width, style.height
            )));
        }

        for (name, value) in [
            ("point_marker_size", style.point_marker_size),
            ("centroid_marker_size", style.centroid_marker_size),
            ("font_size", style.font_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlotError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if let Some(path) = &self.output.path
            && path.as_os_str().is_empty()
        {
            return Err(PlotError::Config("output path is empty".to_string()));
        }

        Ok(())
    }
}
