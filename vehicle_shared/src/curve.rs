//! Keyed float curves.
//!
//! Used for the engine torque curve and the speed-dependent steering curve.
//! Evaluation is piecewise linear and clamps outside the key range.

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One curve key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise linear curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Builds a curve from `(time, value)` pairs.
    pub fn from_keys(keys: &[(f32, f32)]) -> Self {
        let mut curve = Self::default();
        for &(time, value) in keys {
            curve.add_key(time, value);
        }
        curve
    }

    /// Removes all keys.
    pub fn reset(&mut self) {
        self.keys.clear();
    }

    /// Inserts a key, keeping keys sorted by time. A key at an existing time
    /// replaces the old value.
    pub fn add_key(&mut self, time: f32, value: f32) {
        match self.keys.binary_search_by(|k| k.time.total_cmp(&time)) {
            Ok(i) => self.keys[i].value = value,
            Err(i) => self.keys.insert(i, CurveKey { time, value }),
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluates the curve at `time`. An empty curve evaluates to zero and
    /// a NaN `time` evaluates to the first key.
    pub fn eval(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        let upper = self.keys.partition_point(|k| k.time <= time);
        let a = &self.keys[upper - 1];
        let b = &self.keys[upper];
        let t = (time - a.time) / (b.time - a.time);
        a.value + (b.value - a.value) * t
    }

    /// Largest key value, or zero for an empty curve.
    pub fn max_value(&self) -> f32 {
        self.keys
            .iter()
            .map(|k| k.value)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    /// Checks that key times are finite and strictly increasing.
    /// Curves deserialized from config never pass through `add_key`.
    pub fn validate(&self, name: &str) -> anyhow::Result<()> {
        if self.keys.is_empty() {
            bail!("curve `{}` has no keys", name);
        }
        if self.keys.iter().any(|k| !k.time.is_finite() || !k.value.is_finite()) {
            bail!("curve `{}` has non-finite keys", name);
        }
        for pair in self.keys.windows(2) {
            if pair[1].time <= pair[0].time {
                bail!(
                    "curve `{}` keys out of order at time {}",
                    name,
                    pair[1].time
                );
            }
        }
        Ok(())
    }
}
