use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

// Window parameters
pub const WINDOW_TITLE: &str = "Stable Fluids";
pub const TIMING_WINDOW: u64 = 100; // Frames between two timing reports
pub const SNAPSHOT_PATH: &str = "snapshot.png";

// Grid and physical parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interior resolution; buffers hold (n + 2)² cells.
    pub n: usize,
    pub dt: f32,
    /// Diffusion rate of the density channels.
    pub diff: f32,
    /// Viscosity, i.e. the diffusion rate of the velocity field.
    pub visc: f32,
    /// Fixed number of relaxation sweeps per linear solve.
    pub iterations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n: 128,
            dt: 0.1,
            diff: 0.0,
            visc: 0.0,
            iterations: 20,
        }
    }
}

impl SimulationConfig {
    pub fn new(n: usize, dt: f32, diff: f32, visc: f32) -> Self {
        Self {
            n,
            dt,
            diff,
            visc,
            ..Self::default()
        }
    }

    // Total buffer length, boundary ring included
    pub fn size(&self) -> usize {
        (self.n + 2) * (self.n + 2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n == 0 {
            return Err(ConfigError::InvalidResolution { n: self.n });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep { dt: self.dt });
        }
        for (name, value) in [("diff", self.diff), ("visc", self.visc)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        Ok(())
    }
}

// Display parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub scale: usize, // Size of a cell in pixels
    pub target_fps: usize,
    pub density_gain: f32, // Density mapped to full channel intensity is 1 / gain
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            target_fps: 60,
            density_gain: 1.0,
        }
    }
}

// Emitter parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub count: usize,
    pub strength: f32, // Dye injected per second
    pub force: f32,    // Magnitude of the injected force
    pub margin: usize, // Minimum distance from the walls, in cells
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            count: 3,
            strength: 100.0,
            force: 5.0,
            margin: 8,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
    pub emitters: EmitterConfig,
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.simulation.validate()?;
        Ok(config)
    }
}

/// Reads and validates a config file.
pub fn load_strict(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml(&contents)
}

/// Like [`load_strict`], but falls back to defaults when the file is missing or invalid.
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        log::info!("no config at {}, using defaults", path.display());
        return Config::default();
    }
    match load_strict(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.simulation.n, 128);
        assert_eq!(cfg.simulation.dt, 0.1);
        assert_eq!(cfg.simulation.iterations, 20);
        assert_eq!(cfg.display.scale, 4);
        assert_eq!(cfg.emitters.count, 3);
        assert!(cfg.simulation.validate().is_ok());
    }

    #[test]
    fn test_size_includes_boundary_ring() {
        assert_eq!(SimulationConfig::new(4, 0.1, 0.0, 0.0).size(), 36);
        assert_eq!(SimulationConfig::new(1, 0.1, 0.0, 0.0).size(), 9);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "simulation:\n  n: 64\n  visc: 0.0001\nemitters:\n  seed: 7\n";
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.simulation.n, 64);
        assert_eq!(cfg.simulation.visc, 0.0001);
        assert_eq!(cfg.simulation.dt, 0.1); // default
        assert_eq!(cfg.emitters.seed, Some(7));
        assert_eq!(cfg.display.target_fps, 60); // default
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let err = Config::from_yaml("simulation:\n  n: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidResolution { n: 0 }));
    }

    #[test]
    fn test_rejects_bad_rates() {
        let mut cfg = SimulationConfig::default();
        cfg.dt = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidTimestep { .. })));

        let mut cfg = SimulationConfig::default();
        cfg.visc = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRate { name: "visc", .. })
        ));

        let mut cfg = SimulationConfig::default();
        cfg.diff = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRate { name: "diff", .. })
        ));

        let mut cfg = SimulationConfig::default();
        cfg.iterations = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NoIterations)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("simulation: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let cfg = load(Path::new("does-not-exist.yaml"));
        assert_eq!(cfg, Config::default());
        assert!(matches!(
            load_strict(Path::new("does-not-exist.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
