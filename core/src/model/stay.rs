use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A lodging stay as entered on the request form: two calendar dates and
/// two clock times, local/naive. Parsing from user input happens at the
/// CLI boundary; once constructed the interval is just data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StayInterval {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

impl StayInterval {
    pub fn new(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Self {
        Self { start_date, start_time, end_date, end_time }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }
}
