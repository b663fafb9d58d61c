use chrono::{NaiveTime, Timelike};

use crate::model::collaborator::EffectiveRates;
use crate::model::request::PerDiemAccrual;
use crate::model::stay::StayInterval;

// Meal windows, in wall-clock hours. A day-segment earns a meal when any
// part of it overlaps the window, so the three checks are independent
// rather than a partition of the day: one segment can earn zero, one,
// two or all three meals.
const BREAKFAST_EARLIEST_END: u32 = 3;
const BREAKFAST_LAST_START: u32 = 12;
const LUNCH_EARLIEST_END: u32 = 12;
const LUNCH_LAST_START: u32 = 18;
const DINNER_EARLIEST_END: u32 = 18;
const DINNER_LAST_START: u32 = 22;

/// Convert a stay into meal/overnight counts and their money value.
///
/// Pure and total: degenerate input (inverted or empty interval, no
/// positive daily rate) yields the all-zero accrual instead of an error.
///
/// The interval is walked day by day because entitlement depends on which
/// wall-clock windows each day-segment touches, not on elapsed hours. A
/// 26h trip split across two days earns different meals than one 26h
/// block would under a naive division.
pub fn calculate(stay: &StayInterval, rates: &EffectiveRates) -> PerDiemAccrual {
    if !rates.is_eligible() {
        return PerDiemAccrual::default();
    }

    let end = stay.end();
    if stay.start() >= end {
        return PerDiemAccrual::default();
    }

    let mut breakfasts = 0u32;
    let mut lunches = 0u32;
    let mut dinners = 0u32;
    let mut overnights = 0u32;

    let midnight = NaiveTime::MIN;
    let mut day = stay.start_date;
    loop {
        let seg_start_time = if day == stay.start_date {
            stay.start_time
        } else {
            midnight
        };
        // A stay ending exactly at midnight never reaches this day.
        if day.and_time(seg_start_time) >= end {
            break;
        }

        let start_hour = seg_start_time.hour();
        // Segments that run through midnight reach hour 24.
        let end_hour = if day == stay.end_date {
            stay.end_time.hour()
        } else {
            24
        };

        if start_hour < BREAKFAST_LAST_START && end_hour >= BREAKFAST_EARLIEST_END {
            breakfasts += 1;
        }
        if start_hour < LUNCH_LAST_START && end_hour >= LUNCH_EARLIEST_END {
            lunches += 1;
        }
        if start_hour < DINNER_LAST_START && end_hour >= DINNER_EARLIEST_END {
            dinners += 1;
        }

        let next = match day.succ_opt() {
            Some(d) => d,
            None => break,
        };
        // One overnight per midnight crossed while the stay is still going.
        if next.and_time(midnight) < end {
            overnights += 1;
        }
        day = next;
    }

    let meals_value = (breakfasts + lunches + dinners) as f64 * rates.meal_value();
    let overnight_value = overnights as f64 * rates.overnight_rate;

    PerDiemAccrual {
        breakfasts,
        lunches,
        dinners,
        overnights,
        meals_value,
        overnight_value,
        total_value: meals_value + overnight_value,
    }
}
