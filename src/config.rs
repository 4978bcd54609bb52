//! Dashboard configuration: optional TOML file (roster, subjects, defaults)
//! plus a couple of env knobs. Anything missing or malformed falls back to the
//! built-in catalog so the server always has data to serve.

use serde::Deserialize;
use tracing::{error, info};

use crate::catalog;
use crate::settings::{DEFAULT_ATTENDANCE_THRESHOLD, DEFAULT_INDIVIDUAL_GOAL};

pub const DEFAULT_SCHOOL_YEAR: i32 = 2025;

/// One class in the configured roster.
#[derive(Clone, Debug, Deserialize)]
pub struct ClassCfg {
  pub name: String,
  pub students: Vec<String>,
}

/// Schema accepted in the TOML file pointed at by DASHBOARD_CONFIG_PATH.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardConfigFile {
  #[serde(default)] pub school_year: Option<i32>,
  #[serde(default)] pub subjects: Vec<String>,
  #[serde(default)] pub classes: Vec<ClassCfg>,
  #[serde(default)] pub attendance_threshold: Option<f64>,
  #[serde(default)] pub individual_goal: Option<f64>,
  #[serde(default)] pub simulate_latency: Option<bool>,
}

/// Hard defaults for the threshold scope chain's last rung.
#[derive(Clone, Debug)]
pub struct ThresholdDefaults {
  pub attendance_threshold: f64,
  pub individual_goal: f64,
}

/// Fully resolved configuration handed to the rest of the app.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
  pub school_year: i32,
  pub subjects: Vec<String>,
  pub classes: Vec<ClassCfg>,
  pub defaults: ThresholdDefaults,
  pub simulate_latency: bool,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      school_year: DEFAULT_SCHOOL_YEAR,
      subjects: catalog::SUBJECTS.iter().map(|s| s.to_string()).collect(),
      classes: catalog::DEFAULT_ROSTER
        .iter()
        .map(|c| ClassCfg {
          name: c.name.to_string(),
          students: c.students.iter().map(|s| s.to_string()).collect(),
        })
        .collect(),
      defaults: ThresholdDefaults {
        attendance_threshold: DEFAULT_ATTENDANCE_THRESHOLD,
        individual_goal: DEFAULT_INDIVIDUAL_GOAL,
      },
      simulate_latency: false,
    }
  }
}

impl DashboardConfig {
  /// Merge the optional TOML file over the built-in defaults, then apply env
  /// knobs (SIMULATE_LATENCY).
  pub fn from_env() -> Self {
    let mut cfg = Self::default();
    if let Some(file) = load_dashboard_config_from_env() {
      if let Some(y) = file.school_year {
        cfg.school_year = y;
      }
      if !file.subjects.is_empty() {
        cfg.subjects = file.subjects;
      }
      if !file.classes.is_empty() {
        cfg.classes = file.classes;
      }
      if let Some(v) = file.attendance_threshold {
        cfg.defaults.attendance_threshold = v;
      }
      if let Some(v) = file.individual_goal {
        cfg.defaults.individual_goal = v;
      }
      if let Some(v) = file.simulate_latency {
        cfg.simulate_latency = v;
      }
    }
    if let Ok(v) = std::env::var("SIMULATE_LATENCY") {
      cfg.simulate_latency = matches!(v.trim(), "1" | "true" | "yes");
    }
    cfg
  }
}

/// Attempt to load the TOML file from DASHBOARD_CONFIG_PATH. On any parsing or
/// IO error, returns None.
pub fn load_dashboard_config_from_env() -> Option<DashboardConfigFile> {
  let path = std::env::var("DASHBOARD_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<DashboardConfigFile>(&s) {
      Ok(cfg) => {
        info!(target: "dashboard", %path, "Loaded dashboard config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "dashboard", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "dashboard", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_config_carries_the_builtin_catalog() {
    let cfg = DashboardConfig::default();
    assert_eq!(cfg.school_year, DEFAULT_SCHOOL_YEAR);
    assert_eq!(cfg.subjects.len(), catalog::SUBJECTS.len());
    assert_eq!(cfg.classes.len(), catalog::DEFAULT_ROSTER.len());
    assert_eq!(cfg.defaults.attendance_threshold, DEFAULT_ATTENDANCE_THRESHOLD);
    assert_eq!(cfg.defaults.individual_goal, DEFAULT_INDIVIDUAL_GOAL);
  }

  #[test]
  fn file_schema_accepts_partial_toml() {
    let file: DashboardConfigFile = toml::from_str(
      r#"
      school_year = 2026
      attendance_threshold = 85.0

      [[classes]]
      name = "5A"
      students = ["Test Leerling"]
      "#,
    )
    .expect("parse");
    assert_eq!(file.school_year, Some(2026));
    assert_eq!(file.attendance_threshold, Some(85.0));
    assert_eq!(file.classes.len(), 1);
    assert!(file.subjects.is_empty());
  }
}
