//! Statement corpus: one xAPI-shaped statement per (student, subject, semester)
//! for the whole roster, built once at startup and read-only afterwards.
//!
//! Construction is explicit (no import-time globals): `Corpus::build` runs in
//! `AppState::new` and the result is shared by reference through the state.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::activities::semester_window;
use crate::catalog::{self, slug};
use crate::config::DashboardConfig;
use crate::domain::{Actor, Statement, StatementObject, StatementResult};
use crate::seeded::SeededGen;

/// Fixed competency denominator per subject statement, so percentages are
/// comparable across subjects.
pub const COMPETENCY_TOTAL_PER_SUBJECT: u32 = 20;
/// Risk flags look at the closing semester.
pub const FINAL_SEMESTER: u8 = 3;

const PASS_MARK: f64 = 50.0;
const WEAK_AVERAGE: f64 = 60.0;

/// Roster entry with the per-student values derived at build time.
pub struct RosterStudent {
  pub name: String,
  pub class_name: String,
  /// Stable per student: drawn once from the seeded generator.
  pub attendance_pct: f64,
  pub at_risk: bool,
}

pub struct Corpus {
  statements: Vec<Statement>,
  students: Vec<RosterStudent>,
}

impl Corpus {
  /// Build the full corpus for the configured roster and subject list.
  #[instrument(level = "info", skip_all)]
  pub fn build(cfg: &DashboardConfig) -> Self {
    let mut statements = Vec::new();
    let mut students = Vec::new();

    for class in &cfg.classes {
      let mut class_at_risk = 0usize;
      for name in &class.students {
        // First pass: draw every (subject, semester) score for this student.
        let mut drawn: Vec<(String, u8, f64, u32, u32)> = Vec::new();
        for subject in &cfg.subjects {
          for sem in 1..=3u8 {
            let key = format!("{name}|{subject}|S{sem}");
            let mut g = SeededGen::from_key(&key);
            let raw = g.next_in_range(30.0, 98.0).round();
            let base = raw / 100.0 * COMPETENCY_TOTAL_PER_SUBJECT as f64;
            let jitter = g.next_int(5) as i64 - 2;
            let achieved = (base.round() as i64 + jitter)
              .clamp(0, COMPETENCY_TOTAL_PER_SUBJECT as i64) as u32;
            let activity_count = 3 + g.next_int(5);
            drawn.push((subject.clone(), sem, raw, achieved, activity_count));
          }
        }

        let at_risk = recorded_at_risk(&drawn);
        if at_risk {
          class_at_risk += 1;
        }
        let attendance_pct =
          SeededGen::from_key(&format!("attendance|{name}")).next_in_range(70.0, 100.0).round();

        let handle = slug(name);
        let actor = Actor {
          name: name.clone(),
          mbox: format!("mailto:{handle}@school.example"),
          class_name: class.name.clone(),
          profile_image: format!("/avatars/{handle}.png"),
          at_risk,
        };

        for (subject, sem, raw, achieved, activity_count) in drawn {
          statements.push(Statement {
            id: Uuid::new_v4().to_string(),
            actor: actor.clone(),
            verb: "completed".to_string(),
            object: StatementObject { subject: subject.clone(), semester: sem },
            result: StatementResult {
              raw,
              scaled: raw / 100.0,
              min: 0.0,
              max: 100.0,
              completion: true,
              success: raw >= PASS_MARK,
              competencies_achieved: achieved,
              competencies_total: COMPETENCY_TOTAL_PER_SUBJECT,
              activity_count,
            },
            timestamp: statement_timestamp(name, &subject, sem, cfg.school_year),
          });
        }

        students.push(RosterStudent {
          name: name.clone(),
          class_name: class.name.clone(),
          attendance_pct,
          at_risk,
        });
      }
      info!(
        target: "dashboard",
        class = %class.name,
        students = class.students.len(),
        at_risk = class_at_risk,
        "Corpus class built"
      );
    }

    info!(target: "dashboard", statements = statements.len(), students = students.len(), "Statement corpus ready");
    Self { statements, students }
  }

  pub fn statements_for(&self, student: &str) -> Vec<&Statement> {
    self.statements.iter().filter(|s| s.actor.name == student).collect()
  }

  /// Owned copy of a student's statements, for responses that outlive the
  /// shared state borrow.
  pub fn statements_owned(&self, student: &str) -> Vec<Statement> {
    self.statements_for(student).into_iter().cloned().collect()
  }

  pub fn student(&self, name: &str) -> Option<&RosterStudent> {
    self.students.iter().find(|s| s.name == name)
  }

  pub fn students(&self) -> &[RosterStudent] {
    &self.students
  }

  pub fn score_of(&self, student: &str, subject: &str, semester: u8) -> Option<f64> {
    self
      .statements
      .iter()
      .find(|s| {
        s.actor.name == student && s.object.subject == subject && s.object.semester == semester
      })
      .map(|s| s.result.raw)
  }

  /// Raw scores of every student in a class for one (subject, semester).
  pub fn scores_for_class(&self, class_name: &str, subject: &str, semester: u8) -> Vec<f64> {
    self
      .statements
      .iter()
      .filter(|s| {
        s.actor.class_name == class_name
          && s.object.subject == subject
          && s.object.semester == semester
      })
      .map(|s| s.result.raw)
      .collect()
  }

  /// Main subjects failed (< 50) in the final semester.
  pub fn failed_main_subjects(&self, student: &str) -> Vec<String> {
    self
      .final_semester(student)
      .filter(|s| catalog::is_main_subject(&s.object.subject) && s.result.raw < PASS_MARK)
      .map(|s| s.object.subject.clone())
      .collect()
  }

  /// Subjects under 60% in the final semester.
  pub fn low_subjects(&self, student: &str) -> Vec<String> {
    self
      .final_semester(student)
      .filter(|s| s.result.raw < WEAK_AVERAGE)
      .map(|s| s.object.subject.clone())
      .collect()
  }

  /// Mean raw score across all subjects in the final semester.
  pub fn overall_average(&self, student: &str) -> f64 {
    let raws: Vec<f64> = self.final_semester(student).map(|s| s.result.raw).collect();
    if raws.is_empty() {
      return 0.0;
    }
    raws.iter().sum::<f64>() / raws.len() as f64
  }

  fn final_semester<'a>(&'a self, student: &'a str) -> impl Iterator<Item = &'a Statement> {
    self
      .statements
      .iter()
      .filter(move |s| s.actor.name == student && s.object.semester == FINAL_SEMESTER)
  }
}

/// At risk when a main subject is failed in the final semester, or the
/// final-semester average across all subjects is weak.
fn recorded_at_risk(drawn: &[(String, u8, f64, u32, u32)]) -> bool {
  let finals: Vec<_> = drawn.iter().filter(|(_, sem, ..)| *sem == FINAL_SEMESTER).collect();
  if finals.is_empty() {
    return false;
  }
  let failed_main = finals
    .iter()
    .any(|(subject, _, raw, ..)| catalog::is_main_subject(subject) && *raw < PASS_MARK);
  let avg = finals.iter().map(|(_, _, raw, ..)| *raw).sum::<f64>() / finals.len() as f64;
  failed_main || avg < WEAK_AVERAGE
}

/// Deterministic timestamp inside the semester's month window.
fn statement_timestamp(student: &str, subject: &str, semester: u8, year: i32) -> DateTime<Utc> {
  let mut g = SeededGen::from_key(&format!("ts|{student}|{subject}|S{semester}"));
  let (start, _) = semester_window(semester);
  let month = start + g.next_int(4);
  let day = 1 + g.next_int(28);
  let date = chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
  let ndt = date.and_hms_opt(12, 0, 0).unwrap_or_default();
  DateTime::from_naive_utc_and_offset(ndt, Utc)
}
