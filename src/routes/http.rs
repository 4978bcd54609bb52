//! HTTP endpoint handlers. Thin wrappers that forward to the generators and
//! resolvers; each is instrumented and logs basic result info.
//!
//! Data-access handlers run behind the simulated-latency shim so the UI sees
//! the same cosmetic delay the original frontend faked for its mock network.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::activities::{generate_activities, ActivityParams};
use crate::competencies::{generate_competencies, CompetencyParams};
use crate::distribution::bin_scores;
use crate::metrics;
use crate::protocol::*;
use crate::risk::{self, RiskInput};
use crate::settings::resolve_thresholds;
use crate::state::AppState;
use crate::util::{simulate_latency, trunc_for_log};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(subject = %q.subject_id, student = %q.student_id))]
pub async fn http_get_activities(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ActivitiesQuery>,
) -> impl IntoResponse {
  simulate_latency(&state.config).await;
  let acts = generate_activities(&ActivityParams {
    key: &q.subject_id,
    subject: &q.subject_id,
    student: Some(&q.student_id),
    semester: q.semester,
    school_year: state.config.school_year,
  });
  info!(target: "generator", subject = %q.subject_id, count = acts.len(), "HTTP activities served");
  Json(acts)
}

#[instrument(level = "info", skip(state), fields(subject = %q.subject_id, student = %q.student_id))]
pub async fn http_get_competencies(
  State(state): State<Arc<AppState>>,
  Query(q): Query<CompetenciesQuery>,
) -> impl IntoResponse {
  simulate_latency(&state.config).await;
  let comps = generate_competencies(&CompetencyParams {
    subject: &q.subject_id,
    student: Some(&q.student_id),
    semester: q.semester,
    school_year: state.config.school_year,
  });
  info!(target: "generator", subject = %q.subject_id, count = comps.len(), "HTTP competencies served");
  Json(comps)
}

#[instrument(level = "info", skip(state), fields(class = %q.class_id, subject = %q.subject_id, semester = q.semester))]
pub async fn http_get_distribution(
  State(state): State<Arc<AppState>>,
  Query(q): Query<DistributionQuery>,
) -> impl IntoResponse {
  simulate_latency(&state.config).await;
  let scores = state.corpus.scores_for_class(&q.class_id, &q.subject_id, q.semester);
  let query_score = q
    .student_id
    .as_deref()
    .and_then(|s| state.corpus.score_of(s, &q.subject_id, q.semester))
    .unwrap_or(0.0);
  let binned = bin_scores(&scores, query_score);
  info!(
    target: "generator",
    class = %q.class_id,
    population = scores.len(),
    bucket = binned.student_bucket,
    "HTTP distribution served"
  );
  Json(binned)
}

#[instrument(level = "info", skip(state), fields(%name))]
pub async fn http_get_statements(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
) -> impl IntoResponse {
  simulate_latency(&state.config).await;
  // Owned copy: the response outlives the state borrow.
  let stmts = state.corpus.statements_owned(&name);
  info!(target: "dashboard", %name, count = stmts.len(), "HTTP statements served");
  Json(stmts)
}

#[instrument(level = "info", skip(state), fields(%name))]
pub async fn http_get_summary(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
) -> impl IntoResponse {
  simulate_latency(&state.config).await;

  let stmts = state.corpus.statements_for(&name);
  let summary = metrics::summarize(&stmts);

  // Unknown students resolve against empty data: zeros and defaults, no error.
  let roster = state.corpus.student(&name);
  let class_name = roster.map(|s| s.class_name.clone()).unwrap_or_default();
  let attendance_pct = roster.map(|s| s.attendance_pct).unwrap_or(0.0);
  let recorded_at_risk = roster.map(|s| s.at_risk).unwrap_or(false);

  let snapshot = state.settings_snapshot().await;
  let thresholds = resolve_thresholds(&snapshot, &name, &class_name, &state.config.defaults);

  let failed_main = state.corpus.failed_main_subjects(&name);
  let low = state.corpus.low_subjects(&name);
  let risk = risk::assess(&RiskInput {
    recorded_at_risk,
    competency_pct: summary.percentage,
    attendance_pct,
    individual_goal: thresholds.individual_goal,
    attendance_threshold: thresholds.attendance_threshold,
    failed_main_subjects: &failed_main,
    low_subjects: &low,
    overall_average: state.corpus.overall_average(&name),
  });

  info!(
    target: "dashboard",
    %name,
    pct = summary.percentage.round(),
    at_risk = risk.is_at_risk,
    attendance_at_risk = risk.is_attendance_at_risk,
    "HTTP summary served"
  );
  Json(SummaryOut {
    student: name,
    class_name,
    attendance_pct,
    summary,
    thresholds,
    risk,
  })
}

#[instrument(level = "info", skip(state), fields(%key))]
pub async fn http_get_setting(
  State(state): State<Arc<AppState>>,
  Path(key): Path<String>,
) -> impl IntoResponse {
  let value = state.setting(&key).await;
  Json(SettingOut { key, value })
}

#[instrument(level = "info", skip(state, body), fields(key = %body.key, value_len = body.value.len()))]
pub async fn http_put_setting(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SettingPutIn>,
) -> impl IntoResponse {
  info!(
    target: "dashboard",
    key = %body.key,
    value = %trunc_for_log(&body.value, 120),
    "Settings value stored"
  );
  state.put_setting(&body.key, body.value).await;
  Json(OkOut { ok: true })
}
