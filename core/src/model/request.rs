use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::stay::StayInterval;

/// What a stay interval earned: meal and overnight counts plus the money
/// they translate to at the rates in force when it was computed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PerDiemAccrual {
    pub breakfasts: u32,
    pub lunches: u32,
    pub dinners: u32,
    pub overnights: u32,
    pub meals_value: f64,
    pub overnight_value: f64,
    pub total_value: f64,
}

impl PerDiemAccrual {
    pub fn meal_count(&self) -> u32 {
        self.breakfasts + self.lunches + self.dinners
    }

    pub fn is_zero(&self) -> bool {
        self.meal_count() == 0 && self.overnights == 0 && self.total_value == 0.0
    }
}

/// A persisted per-diem request. The accrual is a snapshot: it is
/// recomputed from the current rates on every edit and frozen into the
/// record at save time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PerDiemRequest {
    pub id: Uuid,
    pub requester: String,
    pub collaborator_id: Uuid,
    pub stay: StayInterval,
    pub destination: String,
    pub note: Option<String>,
    pub cost_center: Option<String>,
    pub accrual: PerDiemAccrual,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PerDiemRequest {
    pub fn new(
        requester: String,
        collaborator_id: Uuid,
        stay: StayInterval,
        destination: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            requester,
            collaborator_id,
            stay,
            destination,
            note: None,
            cost_center: None,
            accrual: PerDiemAccrual::default(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
