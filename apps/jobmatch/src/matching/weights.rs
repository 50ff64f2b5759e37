use serde::{Deserialize, Serialize};

use crate::matching::error::MatchError;

/// Relative importance of each scoring dimension.
///
/// Only the dimensions that apply to a given profile are used, and their
/// weights are renormalized to sum to 1.0 (no location preference → the
/// location weight drops out).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub location: f64,
    /// Title-vs-desired-role dimension. Off unless configured.
    pub role: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.7,
            experience: 0.2,
            location: 0.1,
            role: 0.0,
        }
    }
}

/// Weights after dropping inapplicable dimensions and renormalizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWeights {
    pub skill: f64,
    pub experience: f64,
    pub location: Option<f64>,
    pub role: Option<f64>,
}

impl ScoringWeights {
    /// Startup check: every weight finite and non-negative, some weight positive.
    pub fn validate(&self) -> Result<(), MatchError> {
        let all = [
            ("skill", self.skill),
            ("experience", self.experience),
            ("location", self.location),
            ("role", self.role),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::Configuration(format!(
                    "{name} weight must be a finite non-negative number, got {value}"
                )));
            }
        }
        if all.iter().map(|(_, v)| v).sum::<f64>() <= 0.0 {
            return Err(MatchError::Configuration(
                "scoring weights must sum to a positive value".to_string(),
            ));
        }
        Ok(())
    }

    pub fn active(&self, location_active: bool, role_active: bool) -> Result<ActiveWeights, MatchError> {
        self.validate()?;

        let location = location_active.then_some(self.location);
        let role = (role_active && self.role > 0.0).then_some(self.role);
        let total = self.skill + self.experience + location.unwrap_or(0.0) + role.unwrap_or(0.0);

        if !(total > 0.0) || !total.is_finite() {
            return Err(MatchError::Configuration(format!(
                "active scoring weights sum to {total}; cannot renormalize"
            )));
        }

        Ok(ActiveWeights {
            skill: self.skill / total,
            experience: self.experience / total,
            location: location.map(|w| w / total),
            role: role.map(|w| w / total),
        })
    }
}

/// Everything tunable about a scoring / ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub weights: ScoringWeights,
    /// Experience credit lost per year outside the job's range.
    pub experience_decay_per_year: f64,
    /// Results must score strictly above this.
    pub min_score: f64,
    /// How many top results feed the skills-gap aggregation.
    pub gap_top_k: usize,
    /// Maximum number of skills-to-learn returned.
    pub gap_limit: usize,
    pub similar_min_score: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            experience_decay_per_year: 0.2,
            min_score: 0.0,
            gap_top_k: 5,
            gap_limit: 10,
            similar_min_score: 0.3,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), MatchError> {
        self.weights.validate()?;
        if !self.experience_decay_per_year.is_finite() || self.experience_decay_per_year < 0.0 {
            return Err(MatchError::Configuration(format!(
                "experience decay must be a finite non-negative number, got {}",
                self.experience_decay_per_year
            )));
        }
        for (name, value) in [
            ("min_score", self.min_score),
            ("similar_min_score", self.similar_min_score),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(MatchError::Configuration(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.skill + w.experience + w.location + w.role - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_dimensions_active_keeps_defaults() {
        let active = ScoringWeights::default().active(true, false).unwrap();
        assert!((active.skill - 0.7).abs() < 1e-9);
        assert!((active.experience - 0.2).abs() < 1e-9);
        assert!((active.location.unwrap() - 0.1).abs() < 1e-9);
        assert_eq!(active.role, None);
    }

    #[test]
    fn test_inactive_location_renormalizes() {
        let active = ScoringWeights::default().active(false, false).unwrap();
        assert_eq!(active.location, None);
        assert!((active.skill + active.experience - 1.0).abs() < 1e-9);
        assert!((active.skill - 0.7 / 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_zero_role_weight_stays_inactive() {
        let active = ScoringWeights::default().active(false, true).unwrap();
        assert_eq!(active.role, None);
    }

    #[test]
    fn test_role_weight_participates_when_configured() {
        let weights = ScoringWeights {
            skill: 0.6,
            experience: 0.2,
            location: 0.1,
            role: 0.1,
        };
        let active = weights.active(false, true).unwrap();
        assert!((active.role.unwrap() - 0.1 / 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_only_inactive_weight_positive_is_configuration_error() {
        let weights = ScoringWeights {
            skill: 0.0,
            experience: 0.0,
            location: 1.0,
            role: 0.0,
        };
        assert!(weights.validate().is_ok());
        let err = weights.active(false, false).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
    }

    #[test]
    fn test_negative_or_nan_weight_rejected() {
        let negative = ScoringWeights {
            skill: -0.1,
            ..ScoringWeights::default()
        };
        assert!(negative.validate().is_err());

        let nan = ScoringWeights {
            experience: f64::NAN,
            ..ScoringWeights::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let zero = ScoringWeights {
            skill: 0.0,
            experience: 0.0,
            location: 0.0,
            role: 0.0,
        };
        assert!(matches!(zero.validate(), Err(MatchError::Configuration(_))));
    }

    #[test]
    fn test_settings_validation() {
        assert!(EngineSettings::default().validate().is_ok());
        let bad = EngineSettings {
            min_score: 1.0,
            ..EngineSettings::default()
        };
        assert!(bad.validate().is_err());
        let bad_decay = EngineSettings {
            experience_decay_per_year: -1.0,
            ..EngineSettings::default()
        };
        assert!(bad_decay.validate().is_err());
    }
}
