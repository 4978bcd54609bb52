//! Settings store schema and threshold/goal resolution.
//!
//! The dashboard persists its configuration as a handful of string values in a
//! client-local key-value store (mirrored here behind the settings endpoints).
//! Structured values are JSON blobs; anything malformed is logged and skipped
//! in favor of the next scope in the chain, never surfaced to the caller.
//!
//! Resolution precedence for a given student:
//!   student profile override -> class value -> global value -> hard default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::ThresholdDefaults;

pub const DEFAULT_ATTENDANCE_THRESHOLD: f64 = 80.0;
/// Single authoritative default for the individual goal.
pub const DEFAULT_INDIVIDUAL_GOAL: f64 = 60.0;

pub const KEY_GLOBAL_ATTENDANCE_THRESHOLD: &str = "globalAttendanceThreshold";
pub const KEY_GLOBAL_INDIVIDUAL_GOAL: &str = "globalIndividualGoal";
pub const KEY_CLASS_THRESHOLDS: &str = "classThresholds";
pub const KEY_STUDENT_PROFILES: &str = "studentProfiles";
pub const KEY_GLOBAL_PARAMETERS: &str = "globalParameters";

pub const RECOGNIZED_KEYS: &[&str] = &[
  KEY_GLOBAL_ATTENDANCE_THRESHOLD,
  KEY_GLOBAL_INDIVIDUAL_GOAL,
  KEY_CLASS_THRESHOLDS,
  KEY_STUDENT_PROFILES,
  KEY_GLOBAL_PARAMETERS,
];

/// Per-class thresholds; `use_global` opts the class out of its own values.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassThreshold {
  pub class_name: String,
  #[serde(default)]
  pub attendance_threshold: Option<f64>,
  #[serde(default)]
  pub individual_goal: Option<f64>,
  #[serde(default)]
  pub use_global: bool,
}

/// Per-student overrides kept under `studentProfiles` (name -> profile).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
  #[serde(default)]
  pub attendance_threshold: Option<f64>,
  #[serde(default)]
  pub individual_goal: Option<f64>,
  #[serde(default)]
  pub performance: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalParameters {
  #[serde(default)]
  pub attendance_threshold: Option<f64>,
  #[serde(default)]
  pub individual_goal: Option<f64>,
}

/// Which scope a resolved value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdScope {
  Student,
  Class,
  Global,
  Default,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedThresholds {
  pub attendance_threshold: f64,
  pub individual_goal: f64,
  pub attendance_scope: ThresholdScope,
  pub goal_scope: ThresholdScope,
}

/// Resolve both thresholds for one student through the scope chain.
pub fn resolve_thresholds(
  store: &HashMap<String, String>,
  student: &str,
  class_name: &str,
  defaults: &ThresholdDefaults,
) -> ResolvedThresholds {
  let profile = parse_json::<HashMap<String, StudentProfile>>(store, KEY_STUDENT_PROFILES)
    .and_then(|m| m.get(student).cloned());
  let class = parse_json::<Vec<ClassThreshold>>(store, KEY_CLASS_THRESHOLDS)
    .and_then(|v| v.into_iter().find(|c| c.class_name == class_name))
    .filter(|c| !c.use_global);
  let global = parse_json::<GlobalParameters>(store, KEY_GLOBAL_PARAMETERS).unwrap_or_default();

  let (attendance_threshold, attendance_scope) = chain(
    profile.as_ref().and_then(|p| p.attendance_threshold),
    class.as_ref().and_then(|c| c.attendance_threshold),
    global
      .attendance_threshold
      .or_else(|| parse_number(store, KEY_GLOBAL_ATTENDANCE_THRESHOLD)),
    defaults.attendance_threshold,
  );
  let (individual_goal, goal_scope) = chain(
    profile.as_ref().and_then(|p| p.individual_goal),
    class.as_ref().and_then(|c| c.individual_goal),
    global
      .individual_goal
      .or_else(|| parse_number(store, KEY_GLOBAL_INDIVIDUAL_GOAL)),
    defaults.individual_goal,
  );

  ResolvedThresholds { attendance_threshold, individual_goal, attendance_scope, goal_scope }
}

fn chain(
  student: Option<f64>,
  class: Option<f64>,
  global: Option<f64>,
  default: f64,
) -> (f64, ThresholdScope) {
  if let Some(v) = student {
    (v, ThresholdScope::Student)
  } else if let Some(v) = class {
    (v, ThresholdScope::Class)
  } else if let Some(v) = global {
    (v, ThresholdScope::Global)
  } else {
    (default, ThresholdScope::Default)
  }
}

/// Parse a JSON settings blob; log and skip when malformed.
fn parse_json<T: serde::de::DeserializeOwned>(
  store: &HashMap<String, String>,
  key: &str,
) -> Option<T> {
  let raw = store.get(key)?;
  match serde_json::from_str::<T>(raw) {
    Ok(v) => Some(v),
    Err(e) => {
      error!(target: "dashboard", %key, error = %e, "Malformed settings JSON; falling through to next scope");
      None
    }
  }
}

fn parse_number(store: &HashMap<String, String>, key: &str) -> Option<f64> {
  let raw = store.get(key)?;
  match raw.trim().parse::<f64>() {
    Ok(v) => Some(v),
    Err(e) => {
      error!(target: "dashboard", %key, error = %e, "Non-numeric settings value; falling through to next scope");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn defaults() -> ThresholdDefaults {
    ThresholdDefaults {
      attendance_threshold: DEFAULT_ATTENDANCE_THRESHOLD,
      individual_goal: DEFAULT_INDIVIDUAL_GOAL,
    }
  }

  fn store(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn student_override_wins_over_class_and_global() {
    let s = store(&[
      (KEY_STUDENT_PROFILES, r#"{"Lotte Peeters":{"attendanceThreshold":90,"individualGoal":70}}"#),
      (KEY_CLASS_THRESHOLDS, r#"[{"className":"3A","attendanceThreshold":85,"individualGoal":65}]"#),
      (KEY_GLOBAL_PARAMETERS, r#"{"attendanceThreshold":75,"individualGoal":55}"#),
    ]);
    let r = resolve_thresholds(&s, "Lotte Peeters", "3A", &defaults());
    assert_eq!(r.attendance_threshold, 90.0);
    assert_eq!(r.individual_goal, 70.0);
    assert_eq!(r.attendance_scope, ThresholdScope::Student);
    assert_eq!(r.goal_scope, ThresholdScope::Student);
  }

  #[test]
  fn class_value_used_when_no_student_override() {
    let s = store(&[
      (KEY_CLASS_THRESHOLDS, r#"[{"className":"3A","attendanceThreshold":85,"individualGoal":65}]"#),
      (KEY_GLOBAL_PARAMETERS, r#"{"attendanceThreshold":75}"#),
    ]);
    let r = resolve_thresholds(&s, "Noah Janssens", "3A", &defaults());
    assert_eq!(r.attendance_threshold, 85.0);
    assert_eq!(r.attendance_scope, ThresholdScope::Class);
  }

  #[test]
  fn use_global_skips_class_values() {
    let s = store(&[
      (KEY_CLASS_THRESHOLDS, r#"[{"className":"3A","attendanceThreshold":85,"useGlobal":true}]"#),
      (KEY_GLOBAL_ATTENDANCE_THRESHOLD, "77"),
    ]);
    let r = resolve_thresholds(&s, "Noah Janssens", "3A", &defaults());
    assert_eq!(r.attendance_threshold, 77.0);
    assert_eq!(r.attendance_scope, ThresholdScope::Global);
  }

  #[test]
  fn hard_defaults_apply_when_store_is_empty() {
    let r = resolve_thresholds(&HashMap::new(), "Emma Maes", "3A", &defaults());
    assert_eq!(r.attendance_threshold, DEFAULT_ATTENDANCE_THRESHOLD);
    assert_eq!(r.individual_goal, DEFAULT_INDIVIDUAL_GOAL);
    assert_eq!(r.attendance_scope, ThresholdScope::Default);
    assert_eq!(r.goal_scope, ThresholdScope::Default);
  }

  #[test]
  fn malformed_json_falls_through() {
    let s = store(&[
      (KEY_STUDENT_PROFILES, "{not json"),
      (KEY_CLASS_THRESHOLDS, r#"[{"className":"3A","individualGoal":65}]"#),
    ]);
    let r = resolve_thresholds(&s, "Emma Maes", "3A", &defaults());
    assert_eq!(r.individual_goal, 65.0);
    assert_eq!(r.goal_scope, ThresholdScope::Class);
  }

  #[test]
  fn scalar_global_keys_are_recognized() {
    let s = store(&[
      (KEY_GLOBAL_ATTENDANCE_THRESHOLD, "82.5"),
      (KEY_GLOBAL_INDIVIDUAL_GOAL, "not-a-number"),
    ]);
    let r = resolve_thresholds(&s, "Emma Maes", "3A", &defaults());
    assert_eq!(r.attendance_threshold, 82.5);
    // Unparseable scalar falls back to the hard default.
    assert_eq!(r.individual_goal, DEFAULT_INDIVIDUAL_GOAL);
  }
}
