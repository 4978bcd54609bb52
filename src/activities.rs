//! Synthetic activity generator: fabricates the graded/ungraded events
//! (tests, assignments, semester exams) behind each competency card.
//!
//! Everything is drawn from one `SeededGen` keyed on the request, so the same
//! (key, student, semester) always yields the same activity list.

use chrono::NaiveDate;
use tracing::instrument;

use crate::catalog::{self, ASSIGNMENT_TITLES, EXAM_NOTE, TEST_TITLES};
use crate::domain::{Activity, ActivityKind, RelativePerformance, ScoreSnapshot};
use crate::seeded::SeededGen;

const COMPLETION_RATE: f64 = 0.9;
const EVALUATION_RATE: f64 = 0.9;
const SCORE_FLOOR: f64 = 0.40;
const SCORE_CEIL: f64 = 0.95;
const CLASS_AVERAGE_RATIO: f64 = 0.65;
const CLASS_SPREAD_RATIO: f64 = 0.30;

/// First and last month (1-based) of each semester's window in the school year.
const SEMESTER_MONTHS: [(u32, u32); 3] = [(1, 4), (5, 8), (9, 12)];

pub struct ActivityParams<'a> {
  /// Competency or subject id; doubles as the generator key.
  pub key: &'a str,
  pub subject: &'a str,
  pub student: Option<&'a str>,
  /// Inferred from an `S<1-3>` marker in the key when absent, else drawn.
  pub semester: Option<u8>,
  pub school_year: i32,
}

/// Generate the ordered activity list for one request. Never fails: unknown
/// subjects fall back to the generic title pools.
#[instrument(level = "debug", skip_all, fields(key = p.key, subject = p.subject))]
pub fn generate_activities(p: &ActivityParams<'_>) -> Vec<Activity> {
  let mut seed_key = p.key.to_string();
  if let Some(student) = p.student {
    seed_key.push('|');
    seed_key.push_str(student);
  }
  if let Some(sem) = p.semester {
    seed_key.push_str(&format!("|S{sem}"));
  }
  let mut g = SeededGen::from_key(&seed_key);

  let semester = p
    .semester
    .or_else(|| semester_from_key(p.key))
    .unwrap_or_else(|| 1 + g.next_int(3) as u8);
  let semester = semester.clamp(1, 3);

  let main = catalog::is_main_subject(p.subject);
  // Base 3-6 regular activities; main subjects give one slot up to the exam.
  let mut regular = 3 + g.next_int(4) as usize;
  if main {
    regular -= 1;
  }

  let mut out = Vec::with_capacity(regular + 1);
  for i in 0..regular {
    let kind = if g.next_bool(0.5) { ActivityKind::Test } else { ActivityKind::Assignment };
    let titles = match kind {
      ActivityKind::Test => TEST_TITLES,
      _ => ASSIGNMENT_TITLES,
    };
    let title = format!("{} {}", titles[g.next_int(titles.len() as u32) as usize], p.subject);
    let id = format!("{}-a{}", p.key, i + 1);
    out.push(build_activity(&mut g, id, kind, title, semester, p.school_year, false));
  }

  if main {
    let id = format!("exam-{}-s{}", catalog::slug(p.subject), semester);
    let title = format!("Examen {} semester {}", p.subject, semester);
    out.push(build_activity(&mut g, id, ActivityKind::Exam, title, semester, p.school_year, true));
  }

  out
}

fn build_activity(
  g: &mut SeededGen,
  id: String,
  kind: ActivityKind,
  title: String,
  semester: u8,
  school_year: i32,
  is_exam: bool,
) -> Activity {
  let max_score = kind.max_score();
  // Exams are always on the calendar; regular work is occasionally skipped.
  let completed = is_exam || g.next_bool(COMPLETION_RATE);
  let evaluated = completed && g.next_bool(EVALUATION_RATE);
  let score = if evaluated {
    round1(g.next_in_range(SCORE_FLOOR * max_score, SCORE_CEIL * max_score))
  } else {
    0.0
  };

  let snapshot = class_snapshot(g, max_score);
  let relative_performance = relative_to(score, snapshot.average);
  let date = if is_exam {
    exam_date(g, semester, school_year)
  } else {
    regular_date(g, semester, school_year)
  };

  Activity {
    id,
    kind,
    title,
    score,
    max_score,
    completed,
    evaluated,
    date,
    semester,
    note: if is_exam { Some(EXAM_NOTE.to_string()) } else { None },
    relative_performance,
    class_distribution: snapshot,
  }
}

/// Class snapshot: average pinned at 65% of the maximum, spread ±30%.
fn class_snapshot(g: &mut SeededGen, max_score: f64) -> ScoreSnapshot {
  let average = CLASS_AVERAGE_RATIO * max_score;
  let spread = CLASS_SPREAD_RATIO * max_score;
  let low = 10 + g.next_int(25);
  let high = 10 + g.next_int(25);
  ScoreSnapshot {
    min: round1((average - spread).max(0.0)),
    max: round1((average + spread).min(max_score)),
    average: round1(average),
    student_count: 18 + g.next_int(10),
    low_performers: low,
    medium_performers: 100 - low - high,
    high_performers: high,
  }
}

fn relative_to(score: f64, average: f64) -> RelativePerformance {
  if score < 0.9 * average {
    RelativePerformance::BelowAverage
  } else if score > 1.1 * average {
    RelativePerformance::AboveAverage
  } else {
    RelativePerformance::Average
  }
}

fn regular_date(g: &mut SeededGen, semester: u8, year: i32) -> NaiveDate {
  let (start, _) = semester_window(semester);
  let month = start + g.next_int(4);
  let day = 1 + g.next_int(28);
  NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Exams land in the closing month of the semester window.
fn exam_date(g: &mut SeededGen, semester: u8, year: i32) -> NaiveDate {
  let (_, end) = semester_window(semester);
  let day = 15 + g.next_int(14);
  NaiveDate::from_ymd_opt(year, end, day).unwrap_or_default()
}

pub fn semester_window(semester: u8) -> (u32, u32) {
  SEMESTER_MONTHS[(semester.clamp(1, 3) - 1) as usize]
}

/// Parse an `S<1-3>` marker out of a generator key, e.g. "wiskunde-c4|S2".
pub fn semester_from_key(key: &str) -> Option<u8> {
  let bytes = key.as_bytes();
  bytes.windows(2).find_map(|w| match w {
    [b'S', d @ b'1'..=b'3'] => Some(d - b'0'),
    _ => None,
  })
}

fn round1(v: f64) -> f64 {
  (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params<'a>(subject: &'a str, semester: Option<u8>) -> ActivityParams<'a> {
    ActivityParams {
      key: "comp-test-1",
      subject,
      student: Some("Lotte Peeters"),
      semester,
      school_year: 2025,
    }
  }

  #[test]
  fn count_stays_between_three_and_seven() {
    for subject in ["Wiskunde", "Geschiedenis", "Onbekend Vak"] {
      for sem in 1..=3u8 {
        let acts = generate_activities(&params(subject, Some(sem)));
        assert!(
          (3..=7).contains(&acts.len()),
          "{subject} S{sem}: got {}",
          acts.len()
        );
      }
    }
  }

  #[test]
  fn main_subjects_get_exactly_one_exam() {
    for sem in 1..=3u8 {
      let acts = generate_activities(&params("Wiskunde", Some(sem)));
      let exams = acts.iter().filter(|a| a.kind == ActivityKind::Exam).count();
      assert_eq!(exams, 1);
    }
  }

  #[test]
  fn other_subjects_get_no_exam() {
    let acts = generate_activities(&params("Geschiedenis", Some(2)));
    assert!(acts.iter().all(|a| a.kind != ActivityKind::Exam));
  }

  #[test]
  fn evaluated_implies_completed() {
    for subject in ["Wiskunde", "Aardrijkskunde"] {
      for sem in 1..=3u8 {
        for a in generate_activities(&params(subject, Some(sem))) {
          assert!(!a.evaluated || a.completed, "{} violates evaluated=>completed", a.id);
        }
      }
    }
  }

  #[test]
  fn evaluated_scores_sit_in_band() {
    for a in generate_activities(&params("Frans", Some(1))) {
      if a.evaluated {
        assert!(a.score >= 0.40 * a.max_score - 0.05);
        assert!(a.score <= 0.95 * a.max_score + 0.05);
      } else {
        assert_eq!(a.score, 0.0);
      }
    }
  }

  #[test]
  fn dates_fall_inside_semester_window() {
    use chrono::Datelike;
    for sem in 1..=3u8 {
      let (start, end) = semester_window(sem);
      for a in generate_activities(&params("Engels", Some(sem))) {
        assert!((start..=end).contains(&a.date.month()), "{} on {}", a.id, a.date);
        assert_eq!(a.date.year(), 2025);
      }
    }
  }

  #[test]
  fn generation_is_deterministic() {
    let a = generate_activities(&params("Nederlands", Some(3)));
    let b = generate_activities(&params("Nederlands", Some(3)));
    assert_eq!(
      serde_json::to_value(&a).expect("serialize"),
      serde_json::to_value(&b).expect("serialize")
    );
  }

  #[test]
  fn semester_marker_is_parsed_from_key() {
    assert_eq!(semester_from_key("wiskunde-c4|S2"), Some(2));
    assert_eq!(semester_from_key("S3-exam"), Some(3));
    assert_eq!(semester_from_key("no-marker"), None);
  }
}
