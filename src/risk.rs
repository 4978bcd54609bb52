//! Risk flags and the human-readable reason shown on the student card.
//!
//! The recorded at-risk flag is set once at corpus build time (failed main
//! subject or weak semester-3 average); this module combines it with the
//! resolved thresholds into the flags the dashboard renders.

use serde::Serialize;

/// Subjects below this final-semester percentage count as low performance.
pub const LOW_PERFORMANCE_CUTOFF: f64 = 60.0;
/// At most this many low-performance subjects are named in the reason text.
const MAX_NAMED_SUBJECTS: usize = 3;

pub struct RiskInput<'a> {
  /// Flag recorded on the actor at corpus-generation time.
  pub recorded_at_risk: bool,
  /// Aggregate competency achievement percentage (0-100).
  pub competency_pct: f64,
  pub attendance_pct: f64,
  /// Resolved through the settings scope chain.
  pub individual_goal: f64,
  pub attendance_threshold: f64,
  /// Main subjects failed (< 50) in the final semester.
  pub failed_main_subjects: &'a [String],
  /// Subjects under the low-performance cutoff in the final semester.
  pub low_subjects: &'a [String],
  /// Final-semester average across all subjects.
  pub overall_average: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
  pub is_at_risk: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub at_risk_reason: Option<String>,
  pub is_attendance_at_risk: bool,
}

/// Compute the risk flags. Never fails; missing data arrives as 0/false/empty.
pub fn assess(input: &RiskInput<'_>) -> RiskAssessment {
  let is_at_risk = input.recorded_at_risk && input.competency_pct < input.individual_goal;
  // Strictly below: attendance equal to the threshold is still fine.
  let is_attendance_at_risk = input.attendance_pct < input.attendance_threshold;
  let at_risk_reason = is_at_risk.then(|| reason_for(input));
  RiskAssessment { is_at_risk, at_risk_reason, is_attendance_at_risk }
}

fn reason_for(input: &RiskInput<'_>) -> String {
  if !input.failed_main_subjects.is_empty() {
    return format!("Insufficient for {}", input.failed_main_subjects.join(", "));
  }
  if !input.low_subjects.is_empty() {
    let named: Vec<&str> =
      input.low_subjects.iter().take(MAX_NAMED_SUBJECTS).map(String::as_str).collect();
    let rest = input.low_subjects.len().saturating_sub(MAX_NAMED_SUBJECTS);
    if rest > 0 {
      return format!(
        "Low performance in {} and {} more subject{}",
        named.join(", "),
        rest,
        if rest == 1 { "" } else { "s" }
      );
    }
    return format!("Low performance in {}", named.join(", "));
  }
  if input.overall_average < LOW_PERFORMANCE_CUTOFF {
    return format!("Overall average below 60% ({:.0}%)", input.overall_average);
  }
  "Performance below the individual goal".to_string()
}
