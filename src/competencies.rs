//! Synthetic competency generator: builds the 10-20 competency records shown
//! on a subject card, including the cross-subject ("global") competencies and
//! the per-competency activity drill-down.

use tracing::instrument;

use crate::activities::{generate_activities, ActivityParams};
use crate::catalog::{self, GLOBAL_COMPETENCIES};
use crate::domain::{AchievementStatus, Competency, StatusDistribution};
use crate::seeded::SeededGen;

const MIN_COMPETENCIES: u32 = 10;
const MAX_COMPETENCIES: u32 = 20;
/// Chance of including an applicable global competency beyond the first three.
const EXTRA_GLOBAL_RATE: f64 = 0.3;

pub struct CompetencyParams<'a> {
  pub subject: &'a str,
  pub student: Option<&'a str>,
  pub semester: Option<u8>,
  pub school_year: i32,
}

/// Generate the competency list for one subject. Deterministic per
/// (subject, student, semester); never fails.
#[instrument(level = "debug", skip_all, fields(subject = p.subject))]
pub fn generate_competencies(p: &CompetencyParams<'_>) -> Vec<Competency> {
  let mut seed_key = format!("competencies|{}", p.subject);
  if let Some(student) = p.student {
    seed_key.push('|');
    seed_key.push_str(student);
  }
  if let Some(sem) = p.semester {
    seed_key.push_str(&format!("|S{sem}"));
  }
  let mut g = SeededGen::from_key(&seed_key);

  let total = MIN_COMPETENCIES + g.next_int(MAX_COMPETENCIES - MIN_COMPETENCIES + 1);
  let mut out: Vec<Competency> = Vec::with_capacity(total as usize);

  // Applicable globals first: the leading three always, the rest sometimes.
  let applicable: Vec<_> = GLOBAL_COMPETENCIES.iter().filter(|gc| gc.applies_to(p.subject)).collect();
  for (i, gc) in applicable.iter().enumerate() {
    if out.len() as u32 >= total {
      break;
    }
    if i >= 3 && !g.next_bool(EXTRA_GLOBAL_RATE) {
      continue;
    }
    out.push(build_competency(
      &mut g,
      p,
      gc.global_id.to_string(),
      gc.title.to_string(),
      Some(gc.global_id.to_string()),
      gc.subjects.iter().map(|s| s.to_string()).collect(),
    ));
  }

  // Fill the remaining slots round-robin from the subject title table.
  let titles = catalog::competency_titles(p.subject);
  let subject_slug = catalog::slug(p.subject);
  let mut idx = 0usize;
  while (out.len() as u32) < total {
    let title = titles[idx % titles.len()];
    let id = format!("{}-c{}", subject_slug, idx + 1);
    out.push(build_competency(&mut g, p, id, title.to_string(), None, Vec::new()));
    idx += 1;
  }

  out
}

fn build_competency(
  g: &mut SeededGen,
  p: &CompetencyParams<'_>,
  id: String,
  title: String,
  global_id: Option<String>,
  subjects: Vec<String>,
) -> Competency {
  let status = draw_status(g);
  let class_distribution = draw_distribution(g);
  let activities = generate_activities(&ActivityParams {
    key: &id,
    subject: p.subject,
    student: p.student,
    semester: p.semester,
    school_year: p.school_year,
  });
  Competency {
    id,
    title,
    status,
    class_distribution,
    activities,
    note: None,
    global_id,
    subjects,
  }
}

/// 20% not achieved, 20% partially, 60% achieved.
fn draw_status(g: &mut SeededGen) -> AchievementStatus {
  let r = g.next();
  if r < 0.2 {
    AchievementStatus::NotAchieved
  } else if r < 0.4 {
    AchievementStatus::PartiallyAchieved
  } else {
    AchievementStatus::Achieved
  }
}

/// achieved in [20,80), partially at most half the complement, the rest not
/// achieved. Always sums to 100.
fn draw_distribution(g: &mut SeededGen) -> StatusDistribution {
  let achieved = 20 + g.next_int(60);
  let partially = g.next_int((100 - achieved) / 2 + 1);
  StatusDistribution {
    achieved,
    partially_achieved: partially,
    not_achieved: 100 - achieved - partially,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(subject: &str) -> CompetencyParams<'_> {
    CompetencyParams {
      subject,
      student: Some("Nora De Smet"),
      semester: Some(2),
      school_year: 2025,
    }
  }

  #[test]
  fn count_stays_between_ten_and_twenty() {
    for subject in ["Wiskunde", "Frans", "Vreemd Vak"] {
      let comps = generate_competencies(&params(subject));
      assert!((10..=20).contains(&comps.len()), "{subject}: {}", comps.len());
    }
  }

  #[test]
  fn leading_globals_are_always_included() {
    let comps = generate_competencies(&params("Nederlands"));
    let globals: Vec<_> = comps.iter().filter(|c| c.global_id.is_some()).collect();
    assert!(globals.len() >= 3);
    // The first three entries are the unconditional globals.
    for c in comps.iter().take(3) {
      assert!(c.global_id.is_some(), "{} should be global", c.id);
    }
  }

  #[test]
  fn global_competencies_carry_their_subject_list() {
    let comps = generate_competencies(&params("Engels"));
    for c in comps.iter().filter(|c| c.global_id.is_some()) {
      assert!(c.subjects.iter().any(|s| s == "Engels"));
    }
  }

  #[test]
  fn status_distribution_sums_to_hundred() {
    for subject in ["Wiskunde", "Geschiedenis"] {
      for c in generate_competencies(&params(subject)) {
        let d = &c.class_distribution;
        assert_eq!(d.not_achieved + d.partially_achieved + d.achieved, 100, "{}", c.id);
        assert!((20..80).contains(&d.achieved), "{}: achieved={}", c.id, d.achieved);
      }
    }
  }

  #[test]
  fn every_competency_owns_activities() {
    for c in generate_competencies(&params("Aardrijkskunde")) {
      assert!((3..=7).contains(&c.activities.len()), "{}", c.id);
    }
  }

  #[test]
  fn generation_is_deterministic() {
    let a = generate_competencies(&params("Wiskunde"));
    let b = generate_competencies(&params("Wiskunde"));
    assert_eq!(
      serde_json::to_value(&a).expect("serialize"),
      serde_json::to_value(&b).expect("serialize")
    );
  }

  #[test]
  fn unknown_subject_uses_generic_titles() {
    let comps = generate_competencies(&params("Vreemd Vak"));
    let non_global: Vec<_> = comps.iter().filter(|c| c.global_id.is_none()).collect();
    assert!(!non_global.is_empty());
    for c in non_global {
      assert!(catalog::GENERIC_COMPETENCY_TITLES.contains(&c.title.as_str()));
    }
  }
}
