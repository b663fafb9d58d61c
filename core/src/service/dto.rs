use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::request::PerDiemRequest;

/// Display-ready projection of a request: collaborator resolved to a name,
/// the stay flattened to one period string, money formatted to two
/// decimals. Tables and the TUI consume this, never the raw entity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestDto {
    pub id: Uuid,
    pub requester: String,
    pub collaborator: String,
    pub period: String,
    pub destination: String,
    pub note: Option<String>,
    pub cost_center: Option<String>,

    pub breakfasts: u32,
    pub lunches: u32,
    pub dinners: u32,
    pub overnights: u32,
    pub meals_value: String,
    pub overnight_value: String,
    pub total_value: String,

    pub created_at: DateTime<Utc>,
}

impl RequestDto {
    pub fn from_entity(request: PerDiemRequest, collaborator: String) -> Self {
        let period = format!(
            "{} {} to {} {}",
            request.stay.start_date.format("%Y-%m-%d"),
            request.stay.start_time.format("%H:%M"),
            request.stay.end_date.format("%Y-%m-%d"),
            request.stay.end_time.format("%H:%M"),
        );

        Self {
            id: request.id,
            requester: request.requester,
            collaborator,
            period,
            destination: request.destination,
            note: request.note,
            cost_center: request.cost_center,
            breakfasts: request.accrual.breakfasts,
            lunches: request.accrual.lunches,
            dinners: request.accrual.dinners,
            overnights: request.accrual.overnights,
            meals_value: format_money(request.accrual.meals_value),
            overnight_value: format_money(request.accrual.overnight_value),
            total_value: format_money(request.accrual.total_value),
            created_at: request.created_at,
        }
    }
}

pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stay::StayInterval;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_from_entity_formats_period_and_money() {
        let stay = StayInterval::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        );
        let mut request = PerDiemRequest::new(
            "Carlos".to_string(),
            Uuid::new_v4(),
            stay,
            "Salvador".to_string(),
        );
        request.accrual.overnights = 2;
        request.accrual.meals_value = 450.0;
        request.accrual.overnight_value = 100.0;
        request.accrual.total_value = 550.0;

        let dto = RequestDto::from_entity(request, "Ana".to_string());
        assert_eq!(dto.collaborator, "Ana");
        assert_eq!(dto.period, "2024-02-01 08:00 to 2024-02-03 18:00");
        assert_eq!(dto.meals_value, "450.00");
        assert_eq!(dto.total_value, "550.00");
    }
}
