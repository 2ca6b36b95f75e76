// analysis_feed - A terminal viewer for multi-agent analysis streams
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Derived state for optimization results: weight normalization, custom
//! weight validation and correlation colouring buckets.

/// Allowed drift from 100% when validating custom weights.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("Add at least one holding")]
    Empty,
    #[error("Weight for {0} cannot be negative")]
    Negative(String),
    #[error("Weights must sum to 100% (currently {0:.2}%)")]
    BadSum(f64),
}

/// Percent weights summing to 100, largest first. Non-positive and
/// non-finite entries are dropped.
#[must_use]
pub fn normalize_weights(weights: &[(String, f64)]) -> Vec<(String, f64)> {
    let kept: Vec<(String, f64)> = weights
        .iter()
        .filter(|(_, w)| w.is_finite() && *w > 0.0)
        .cloned()
        .collect();
    let sum: f64 = kept.iter().map(|(_, w)| w).sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    let mut normalized: Vec<(String, f64)> =
        kept.into_iter().map(|(ticker, w)| (ticker, w / sum * 100.0)).collect();
    normalized.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    normalized
}

/// Custom weights (in percent) must be non-negative and sum to 100.
pub fn validate_custom_weights(weights: &[(String, f64)]) -> Result<(), WeightError> {
    if weights.is_empty() {
        return Err(WeightError::Empty);
    }
    if let Some((ticker, _)) = weights.iter().find(|(_, w)| *w < 0.0) {
        return Err(WeightError::Negative(ticker.clone()));
    }
    let sum: f64 = weights.iter().map(|(_, w)| w).sum();
    if !sum.is_finite() || (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(WeightError::BadSum(sum));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationTone {
    StrongNegative,
    WeakNegative,
    Neutral,
    WeakPositive,
    StrongPositive,
}

#[must_use]
pub fn correlation_tone(coefficient: f64) -> CorrelationTone {
    let c = if coefficient.is_finite() { coefficient.clamp(-1.0, 1.0) } else { 0.0 };
    if c >= 0.6 {
        CorrelationTone::StrongPositive
    } else if c >= 0.2 {
        CorrelationTone::WeakPositive
    } else if c > -0.2 {
        CorrelationTone::Neutral
    } else if c > -0.6 {
        CorrelationTone::WeakNegative
    } else {
        CorrelationTone::StrongNegative
    }
}
