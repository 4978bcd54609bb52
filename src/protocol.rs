//! Public protocol structs for the HTTP endpoints (serde ready).
//! The core domain types are already wire-shaped (camelCase), so this module
//! only holds queries and the composite response bodies.

use serde::{Deserialize, Serialize};

use crate::metrics::StudentSummary;
use crate::risk::RiskAssessment;
use crate::settings::ResolvedThresholds;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub semester: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CompetenciesQuery {
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub semester: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    #[serde(rename = "classId")]
    pub class_id: String,
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub semester: u8,
    /// When present, the student's own corpus score selects the bucket.
    #[serde(rename = "studentId")]
    pub student_id: Option<String>,
}

/// Everything the student overview card needs in one response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOut {
    pub student: String,
    pub class_name: String,
    pub attendance_pct: f64,
    pub summary: StudentSummary,
    pub thresholds: ResolvedThresholds,
    pub risk: RiskAssessment,
}

#[derive(Serialize)]
pub struct SettingOut {
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettingPutIn {
    pub key: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct OkOut {
    pub ok: bool,
}
