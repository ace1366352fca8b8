use std::path::PathBuf;

use serde::Deserialize;

/// Top-level geonc run configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GeoncConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Header values to write as scalar variables.
    #[serde(default)]
    pub header: Option<HeaderToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub schema: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            schema: None,
            output: None,
            mode: default_mode(),
        }
    }
}

fn default_mode() -> String {
    "replace".to_string()
}

/// Header record fields. An empty variable name skips that value.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaderToml {
    #[serde(default)]
    pub version: u32,
    #[serde(default = "default_dim")]
    pub dim: u32,
    pub n_elems: u64,
    pub poly_order: Vec<u32>,
    #[serde(default)]
    pub grid_type: u32,
    #[serde(default)]
    pub time_cycle: u64,
    #[serde(default)]
    pub time_stamp: u64,
    #[serde(default)]
    pub has_mult_vars: bool,
    #[serde(default = "default_data_size")]
    pub data_size: u64,
    #[serde(default = "default_time_cycle_var")]
    pub time_cycle_var: String,
    #[serde(default = "default_time_stamp_var")]
    pub time_stamp_var: String,
    #[serde(default = "default_n_elems_var")]
    pub n_elems_var: String,
}

fn default_dim() -> u32 {
    2
}
fn default_data_size() -> u64 {
    geonc_header::DEFAULT_DATA_SIZE
}
fn default_time_cycle_var() -> String {
    "timeCycle".to_string()
}
fn default_time_stamp_var() -> String {
    "timeStamp".to_string()
}
fn default_n_elems_var() -> String {
    "nElems".to_string()
}
