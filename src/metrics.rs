//! Aggregate metrics: whole-student summary numbers folded from the statement
//! corpus, feeding the overview card and the stacked per-semester bars.

use serde::Serialize;

use crate::domain::Statement;

/// Tolerance band for the "above personal average" flag: the current
/// percentage may sit up to this many points under the personal average.
const PERSONAL_AVERAGE_MARGIN: f64 = 5.0;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRollup {
  pub semester: u8,
  pub achieved: u32,
  pub total: u32,
  /// Mean raw score over the semester's statements (0 when none).
  pub average_raw: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
  pub competencies_achieved: u32,
  pub competencies_total: u32,
  pub percentage: f64,
  pub semesters: Vec<SemesterRollup>,
  pub personal_average: f64,
  pub above_personal_average: bool,
}

/// achieved / total as a percentage; zero totals yield 0, never NaN.
pub fn percentage(achieved: u32, total: u32) -> f64 {
  if total == 0 {
    return 0.0;
  }
  achieved as f64 / total as f64 * 100.0
}

/// Fold a student's statements into the summary the overview renders.
pub fn summarize(statements: &[&Statement]) -> StudentSummary {
  let mut achieved = 0u32;
  let mut total = 0u32;
  for s in statements {
    achieved += s.result.competencies_achieved;
    total += s.result.competencies_total;
  }
  let pct = percentage(achieved, total);

  let mut semesters = Vec::with_capacity(3);
  for sem in 1..=3u8 {
    let in_sem: Vec<_> = statements.iter().filter(|s| s.object.semester == sem).collect();
    let (mut a, mut t, mut raw_sum) = (0u32, 0u32, 0.0f64);
    for s in &in_sem {
      a += s.result.competencies_achieved;
      t += s.result.competencies_total;
      raw_sum += s.result.raw;
    }
    let average_raw = if in_sem.is_empty() { 0.0 } else { raw_sum / in_sem.len() as f64 };
    semesters.push(SemesterRollup { semester: sem, achieved: a, total: t, average_raw });
  }

  let with_data: Vec<f64> =
    semesters.iter().filter(|r| r.total > 0).map(|r| r.average_raw).collect();
  let personal_average = if with_data.is_empty() {
    0.0
  } else {
    with_data.iter().sum::<f64>() / with_data.len() as f64
  };
  let above_personal_average =
    !with_data.is_empty() && pct >= personal_average - PERSONAL_AVERAGE_MARGIN;

  StudentSummary {
    competencies_achieved: achieved,
    competencies_total: total,
    percentage: pct,
    semesters,
    personal_average,
    above_personal_average,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Actor, Statement, StatementObject, StatementResult};
  use chrono::Utc;

  fn stmt(subject: &str, semester: u8, raw: f64, achieved: u32, total: u32) -> Statement {
    Statement {
      id: format!("{subject}-{semester}"),
      actor: Actor {
        name: "Lotte Peeters".into(),
        mbox: "mailto:lotte.peeters@school.example".into(),
        class_name: "3A".into(),
        profile_image: "/avatars/lotte.peeters.png".into(),
        at_risk: false,
      },
      verb: "completed".into(),
      object: StatementObject { subject: subject.into(), semester },
      result: StatementResult {
        raw,
        scaled: raw / 100.0,
        min: 0.0,
        max: 100.0,
        completion: true,
        success: raw >= 50.0,
        competencies_achieved: achieved,
        competencies_total: total,
        activity_count: 5,
      },
      timestamp: Utc::now(),
    }
  }

  #[test]
  fn percentage_guards_divide_by_zero() {
    assert_eq!(percentage(0, 0), 0.0);
    assert_eq!(percentage(10, 20), 50.0);
  }

  #[test]
  fn wiskunde_seventeen_of_twentyone() {
    let p = percentage(17, 21);
    assert!((p - 80.95238).abs() < 1e-4);
    assert_eq!(p.round(), 81.0);
  }

  #[test]
  fn totals_fold_over_all_statements() {
    let stmts =
      vec![stmt("Wiskunde", 1, 70.0, 12, 20), stmt("Frans", 1, 60.0, 10, 20), stmt("Wiskunde", 2, 80.0, 16, 20)];
    let refs: Vec<&Statement> = stmts.iter().collect();
    let s = summarize(&refs);
    assert_eq!(s.competencies_achieved, 38);
    assert_eq!(s.competencies_total, 60);
    assert!((s.percentage - 63.333).abs() < 0.01);
  }

  #[test]
  fn semester_rollups_are_restricted_per_semester() {
    let stmts =
      vec![stmt("Wiskunde", 1, 70.0, 12, 20), stmt("Frans", 1, 50.0, 10, 20), stmt("Wiskunde", 2, 80.0, 16, 20)];
    let refs: Vec<&Statement> = stmts.iter().collect();
    let s = summarize(&refs);
    assert_eq!(s.semesters.len(), 3);
    assert_eq!(s.semesters[0].achieved, 22);
    assert_eq!(s.semesters[0].total, 40);
    assert_eq!(s.semesters[0].average_raw, 60.0);
    assert_eq!(s.semesters[1].achieved, 16);
    assert_eq!(s.semesters[2].total, 0);
    assert_eq!(s.semesters[2].average_raw, 0.0);
  }

  #[test]
  fn above_personal_average_allows_five_point_margin() {
    // Personal average (60 + 80) / 2 = 70; percentage 66 is within 5 points.
    let stmts = vec![stmt("Wiskunde", 1, 60.0, 13, 20), stmt("Wiskunde", 2, 80.0, 13, 20)];
    let refs: Vec<&Statement> = stmts.iter().collect();
    let s = summarize(&refs);
    assert!((s.personal_average - 70.0).abs() < 1e-9);
    assert!((s.percentage - 65.0).abs() < 1e-9);
    assert!(s.above_personal_average);
  }

  #[test]
  fn below_margin_clears_the_flag() {
    // Personal average 90; percentage 50 is far below.
    let stmts = vec![stmt("Wiskunde", 1, 90.0, 10, 20)];
    let refs: Vec<&Statement> = stmts.iter().collect();
    let s = summarize(&refs);
    assert!(!s.above_personal_average);
  }

  #[test]
  fn empty_corpus_summary_is_all_zero() {
    let s = summarize(&[]);
    assert_eq!(s.competencies_total, 0);
    assert_eq!(s.percentage, 0.0);
    assert!(!s.above_personal_average);
  }
}
