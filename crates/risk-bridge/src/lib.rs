//! Boundary of the point-risk scoring service.
//!
//! The service is an external collaborator: it trains a classifier over
//! historical point records and answers batched queries. This crate fixes
//! the request/response shapes and the score arithmetic around the
//! classifier seam. It has no relation to the ledger contracts.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const MAX_SCORE: f64 = 100.0;

/// Proxy answer when the scorer is unreachable.
pub const FALLBACK_POINT_SCORE: f64 = 15.0;
pub const FALLBACK_MAX_SCORE: f64 = 30.0;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("no points provided")]
    NoPoints,
    #[error("hour {0} out of range 0..=23")]
    InvalidHour(u8),
    #[error("classifier failed: {0}")]
    Classifier(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    #[serde(default)]
    pub points: Vec<RiskPoint>,
}

/// A point with its hour settled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPoint {
    pub lat: f64,
    pub lng: f64,
    pub hour: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Safe,
    Low,
    Medium,
    High,
}

impl RiskClass {
    pub fn weight(self) -> f64 {
        match self {
            RiskClass::Safe => 0.0,
            RiskClass::Low => 30.0,
            RiskClass::Medium => 60.0,
            RiskClass::High => 100.0,
        }
    }

    /// Training labels are 0..=3.
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(RiskClass::Safe),
            1 => Some(RiskClass::Low),
            2 => Some(RiskClass::Medium),
            3 => Some(RiskClass::High),
            _ => None,
        }
    }
}

/// The classifier seam. Returns class probabilities for one point; classes
/// missing from the answer count as probability 0.
pub trait RiskClassifier {
    fn class_probabilities(&self, point: &ResolvedPoint) -> Result<Vec<(RiskClass, f64)>, RiskError>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub average_risk: f64,
    pub max_risk: f64,
    pub points_analyzed: usize,
    pub risk_scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl RiskReport {
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let n = scores.len();
        let (sum, max) = scores
            .iter()
            .fold((0.0, 0.0f64), |(s, m), x| (s + x, m.max(*x)));
        let average = if n == 0 { 0.0 } else { sum / n as f64 };
        Self {
            average_risk: round2(average),
            max_risk: round2(max),
            points_analyzed: n,
            risk_scores: scores.into_iter().map(round2).collect(),
            fallback: false,
        }
    }

    /// Degraded answer for `points` points.
    pub fn fallback(points: usize) -> Self {
        Self {
            average_risk: FALLBACK_POINT_SCORE,
            max_risk: FALLBACK_MAX_SCORE,
            points_analyzed: points,
            risk_scores: vec![FALLBACK_POINT_SCORE; points],
            fallback: true,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Weighted score of one probability vector, clamped to [0, 100]. A NaN or
/// infinite probability is a classifier failure.
pub fn weighted_score(probabilities: &[(RiskClass, f64)]) -> Result<f64, RiskError> {
    if let Some((class, p)) = probabilities.iter().find(|(_, p)| !p.is_finite()) {
        return Err(RiskError::Classifier(format!(
            "non-finite probability {p} for class {class:?}"
        )));
    }
    Ok(probabilities
        .iter()
        .map(|(class, p)| class.weight() * p)
        .sum::<f64>()
        .clamp(0.0, MAX_SCORE))
}

pub fn current_hour() -> u8 {
    // chrono guarantees 0..=23
    Local::now().hour() as u8
}

impl RiskRequest {
    /// Settle missing hours to `default_hour`.
    pub fn resolve(&self, default_hour: u8) -> Result<Vec<ResolvedPoint>, RiskError> {
        if self.points.is_empty() {
            return Err(RiskError::NoPoints);
        }
        self.points
            .iter()
            .map(|p| {
                let hour = p.hour.unwrap_or(default_hour);
                if hour > 23 {
                    return Err(RiskError::InvalidHour(hour));
                }
                Ok(ResolvedPoint {
                    lat: p.lat,
                    lng: p.lng,
                    hour,
                })
            })
            .collect()
    }
}

/// Score a batch with an explicit default hour.
pub fn assess_at<C: RiskClassifier + ?Sized>(
    classifier: &C,
    request: &RiskRequest,
    default_hour: u8,
) -> Result<RiskReport, RiskError> {
    let points = request.resolve(default_hour)?;
    let scores = points
        .iter()
        .map(|p| {
            classifier
                .class_probabilities(p)
                .and_then(|probs| weighted_score(&probs))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RiskReport::from_scores(scores))
}

/// Score a batch; missing hours default to the current local hour.
pub fn assess<C: RiskClassifier + ?Sized>(
    classifier: &C,
    request: &RiskRequest,
) -> Result<RiskReport, RiskError> {
    assess_at(classifier, request, current_hour())
}

/// What the backend proxy answers: the real report, or the fallback when
/// the classifier fails. An empty batch is still an error.
pub fn assess_or_fallback<C: RiskClassifier + ?Sized>(
    classifier: &C,
    request: &RiskRequest,
) -> Result<RiskReport, RiskError> {
    match assess(classifier, request) {
        Err(RiskError::Classifier(reason)) => {
            warn!(%reason, "risk classifier unavailable, serving fallback");
            Ok(RiskReport::fallback(request.points.len()))
        }
        other => other,
    }
}
