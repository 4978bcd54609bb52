//! Seeded value generator: the single source of randomness for all synthetic
//! data. Same key, same sequence, always — the dashboard relies on a request
//! for the same (student, subject, semester) reproducing identical data.
//!
//! The recurrence is a small linear congruential step,
//! `seed = (seed * 9301 + 49297) mod 233280`, seeded by folding the key's
//! character codes through a left-shift/subtract 32-bit hash. Saved dashboards
//! from the original frontend depend on this exact recurrence; do not swap in
//! another PRNG.

const MULTIPLIER: i64 = 9301;
const INCREMENT: i64 = 49297;
const MODULUS: i64 = 233280;

#[derive(Clone, Debug)]
pub struct SeededGen {
  state: i64,
}

impl SeededGen {
  /// Derive the initial seed from a string key.
  pub fn from_key(key: &str) -> Self {
    let mut h: i32 = 0;
    for ch in key.chars() {
      // h = h * 31 + code, kept in 32 bits.
      h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(ch as i32);
    }
    Self { state: (h as i64).rem_euclid(MODULUS) }
  }

  /// Next value in [0, 1).
  pub fn next(&mut self) -> f64 {
    self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
    self.state as f64 / MODULUS as f64
  }

  /// Next integer in [0, max_exclusive).
  pub fn next_int(&mut self, max_exclusive: u32) -> u32 {
    (self.next() * max_exclusive as f64) as u32
  }

  /// Next value in [min, max).
  pub fn next_in_range(&mut self, min: f64, max: f64) -> f64 {
    min + self.next() * (max - min)
  }

  /// Bernoulli draw with probability `p`.
  pub fn next_bool(&mut self, p: f64) -> bool {
    self.next() < p
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_key_same_sequence() {
    let mut a = SeededGen::from_key("Lotte Peeters|Wiskunde|S1");
    let mut b = SeededGen::from_key("Lotte Peeters|Wiskunde|S1");
    for _ in 0..64 {
      assert_eq!(a.next(), b.next());
    }
  }

  #[test]
  fn different_keys_diverge() {
    let mut a = SeededGen::from_key("Wiskunde|S1");
    let mut b = SeededGen::from_key("Wiskunde|S2");
    let same = (0..16).filter(|_| a.next() == b.next()).count();
    assert!(same < 16);
  }

  #[test]
  fn values_stay_in_unit_interval() {
    let mut g = SeededGen::from_key("range-check");
    for _ in 0..1000 {
      let v = g.next();
      assert!((0.0..1.0).contains(&v));
    }
  }

  #[test]
  fn lcg_recurrence_is_exact() {
    // Seed 1: first step must be (1 * 9301 + 49297) % 233280 = 58598.
    let mut g = SeededGen { state: 1 };
    assert_eq!(g.next(), 58598.0 / 233280.0);
  }

  #[test]
  fn next_int_bounds() {
    let mut g = SeededGen::from_key("ints");
    for _ in 0..500 {
      assert!(g.next_int(7) < 7);
    }
  }

  #[test]
  fn next_in_range_bounds() {
    let mut g = SeededGen::from_key("ranges");
    for _ in 0..500 {
      let v = g.next_in_range(40.0, 95.0);
      assert!((40.0..95.0).contains(&v));
    }
  }
}
