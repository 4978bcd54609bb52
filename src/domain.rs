//! Domain models used by the backend: activities, competencies, and xAPI-shaped
//! statements. All types are serde-ready with the camelCase wire casing the
//! dashboard client expects.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What kind of gradable event is this?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  Test,
  Assignment,
  Exam,
}

impl ActivityKind {
  /// Fixed maximum score per kind.
  pub fn max_score(self) -> f64 {
    match self {
      ActivityKind::Assignment => 10.0,
      ActivityKind::Test => 20.0,
      ActivityKind::Exam => 100.0,
    }
  }
}

/// Student score relative to the class average for the same activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelativePerformance {
  BelowAverage,
  AboveAverage,
  Average,
}

/// Snapshot of how the class scored on one activity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
  pub min: f64,
  pub max: f64,
  pub average: f64,
  pub student_count: u32,
  /// Percentage split of the class; the three sum to 100.
  pub low_performers: u32,
  pub medium_performers: u32,
  pub high_performers: u32,
}

/// A single gradable event within a competency (or a semester exam).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
  pub id: String,
  pub kind: ActivityKind,
  pub title: String,
  /// 0..max_score; stays 0 until evaluated.
  pub score: f64,
  pub max_score: f64,
  pub completed: bool,
  /// Only meaningful when completed: `evaluated` implies `completed`.
  pub evaluated: bool,
  pub date: NaiveDate,
  pub semester: u8,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
  pub relative_performance: RelativePerformance,
  pub class_distribution: ScoreSnapshot,
}

/// Achievement status of one competency for one student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementStatus {
  NotAchieved,
  PartiallyAchieved,
  Achieved,
}

/// Class-wide achievement split for a competency; percentages sum to 100.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
  pub not_achieved: u32,
  pub partially_achieved: u32,
  pub achieved: u32,
}

/// A tracked outcome within a subject. Competencies carrying a `global_id` are
/// shared across every subject listed in `subjects`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competency {
  pub id: String,
  pub title: String,
  pub status: AchievementStatus,
  pub class_distribution: StatusDistribution,
  pub activities: Vec<Activity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub global_id: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub subjects: Vec<String>,
}

/// Who a statement is about.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
  pub name: String,
  pub mbox: String,
  pub class_name: String,
  pub profile_image: String,
  pub at_risk: bool,
}

/// What a statement is about: one subject in one semester.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementObject {
  pub subject: String,
  pub semester: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResult {
  /// Raw score on a 0-100 scale.
  pub raw: f64,
  /// raw / 100.
  pub scaled: f64,
  pub min: f64,
  pub max: f64,
  pub completion: bool,
  /// raw >= 50.
  pub success: bool,
  pub competencies_achieved: u32,
  pub competencies_total: u32,
  pub activity_count: u32,
}

/// One (student, subject, semester) performance fact, xAPI-shaped.
/// Exactly one exists per triple in the corpus.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
  pub id: String,
  pub actor: Actor,
  /// Fixed "completed" label; kept as a field so the wire shape stays xAPI-like.
  pub verb: String,
  pub object: StatementObject,
  pub result: StatementResult,
  pub timestamp: DateTime<Utc>,
}
