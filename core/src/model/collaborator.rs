use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Collaborator {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,

    // Per-person overrides. There is no company-wide default rate:
    // a collaborator without a positive daily_rate simply accrues nothing.
    pub daily_rate: Option<f64>,
    pub overnight_rate: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl Collaborator {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role: None,
            daily_rate: None,
            overnight_rate: None,
            created_at: Utc::now(),
        }
    }

    /// Resolve the rates actually applied for this person.
    /// Unset or non-positive overrides collapse to zero, which the
    /// calculator treats as "not eligible".
    pub fn effective_rates(&self) -> EffectiveRates {
        EffectiveRates {
            daily_rate: positive_or_zero(self.daily_rate),
            overnight_rate: positive_or_zero(self.overnight_rate),
        }
    }
}

fn positive_or_zero(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r > 0.0 => r,
        _ => 0.0,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRates {
    pub daily_rate: f64,
    pub overnight_rate: f64,
}

impl EffectiveRates {
    /// A meal is worth a third of the daily rate.
    pub fn meal_value(&self) -> f64 {
        self.daily_rate / 3.0
    }

    pub fn is_eligible(&self) -> bool {
        self.daily_rate > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_rates_fall_back_to_zero() {
        let mut collab = Collaborator::new("Ana".to_string());
        assert_eq!(
            collab.effective_rates(),
            EffectiveRates { daily_rate: 0.0, overnight_rate: 0.0 }
        );
        assert!(!collab.effective_rates().is_eligible());

        // Negative overrides are treated the same as unset ones.
        collab.daily_rate = Some(-10.0);
        collab.overnight_rate = Some(0.0);
        assert!(!collab.effective_rates().is_eligible());

        collab.daily_rate = Some(150.0);
        collab.overnight_rate = Some(50.0);
        let rates = collab.effective_rates();
        assert!(rates.is_eligible());
        assert_eq!(rates.meal_value(), 50.0);
    }
}
