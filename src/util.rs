//! Small utility helpers used across modules.

use std::time::Duration;

use rand::Rng;

use crate::config::DashboardConfig;

/// Cosmetic network-delay simulation carried over from the original frontend:
/// resolves after a short jittered sleep, never fails, never cancels. Off by
/// default; enabled via config or the SIMULATE_LATENCY env var.
pub async fn simulate_latency(cfg: &DashboardConfig) {
  if !cfg.simulate_latency {
    return;
  }
  let ms = rand::thread_rng().gen_range(80..250);
  tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Log-safe truncation for large strings, cutting on a char boundary.
/// Avoids spamming logs with huge settings payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
