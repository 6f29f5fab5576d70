use crate::sim::error::{ConfigError, SimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The simulation-parameters document consumed by the external engine.
///
/// Field names follow the engine's schema, so serializing this struct yields
/// a document the engine accepts as-is. One document is written per phase
/// directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// System name; phase runs derive their output file names from it.
    pub sysname: String,
    /// Cubic box edge lengths in nanometers.
    #[serde(rename = "box")]
    pub box_lengths: [f64; 3],
    /// Temperature in Kelvin.
    pub temp: f64,
    /// Ionic strength in molar.
    pub ionic: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Whether to energy-minimize before integrating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize_steps: Option<u64>,
    /// Frame write frequency in integration steps.
    pub wfreq: u64,
    /// Total integration steps.
    pub steps: u64,
    /// Compute platform the engine should select (e.g. "CPU").
    pub platform: String,
    /// Restart mode; the engine currently understands "checkpoint".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    /// Checkpoint file consumed and refreshed when restarting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frestart: Option<String>,
    pub verbose: bool,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Serializes the document into `dir/file_name` and returns the path.
    pub fn write(&self, dir: &Path, file_name: &str) -> Result<PathBuf, SimError> {
        let body = toml::to_string_pretty(self).map_err(|source| SimError::Serialize {
            document: "config",
            source,
        })?;
        let path = dir.join(file_name);
        fs::write(&path, body)?;
        Ok(path)
    }
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    sysname: Option<String>,
    box_lengths: Option<[f64; 3]>,
    temp: Option<f64>,
    ionic: Option<f64>,
    ph: Option<f64>,
    minimize_steps: Option<u64>,
    wfreq: Option<u64>,
    steps: Option<u64>,
    platform: Option<String>,
    restart_file: Option<String>,
    verbose: bool,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sysname(mut self, name: impl Into<String>) -> Self {
        self.sysname = Some(name.into());
        self
    }
    pub fn box_lengths(mut self, lengths: [f64; 3]) -> Self {
        self.box_lengths = Some(lengths);
        self
    }
    pub fn temp(mut self, kelvin: f64) -> Self {
        self.temp = Some(kelvin);
        self
    }
    pub fn ionic(mut self, molar: f64) -> Self {
        self.ionic = Some(molar);
        self
    }
    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }
    /// Enables the pre-integration minimization stage.
    pub fn minimize(mut self, steps: u64) -> Self {
        self.minimize_steps = Some(steps);
        self
    }
    pub fn wfreq(mut self, steps: u64) -> Self {
        self.wfreq = Some(steps);
        self
    }
    pub fn steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
    /// Enables checkpoint restarts against `file`.
    pub fn checkpoint_restart(mut self, file: impl Into<String>) -> Self {
        self.restart_file = Some(file.into());
        self
    }
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            sysname: self
                .sysname
                .ok_or(ConfigError::MissingParameter("sysname"))?,
            box_lengths: self
                .box_lengths
                .ok_or(ConfigError::MissingParameter("box_lengths"))?,
            temp: self.temp.ok_or(ConfigError::MissingParameter("temp"))?,
            ionic: self.ionic.ok_or(ConfigError::MissingParameter("ionic"))?,
            ph: self.ph.ok_or(ConfigError::MissingParameter("ph"))?,
            minimize: self.minimize_steps.map(|_| true),
            minimize_steps: self.minimize_steps,
            wfreq: self.wfreq.ok_or(ConfigError::MissingParameter("wfreq"))?,
            steps: self.steps.ok_or(ConfigError::MissingParameter("steps"))?,
            platform: self.platform.unwrap_or_else(|| "CPU".to_string()),
            restart: self.restart_file.as_ref().map(|_| "checkpoint".to_string()),
            frestart: self.restart_file,
            verbose: self.verbose,
        })
    }
}
