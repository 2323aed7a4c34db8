//! Delivery date extraction for `<month>월 <day>일` phrases.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use regex::{Captures, Regex};

use super::patterns::{DAY_ONLY, DAY_TIME, MONTH_DAY, MONTH_DAY_TIME};
use super::{ExtractionMatch, FieldExtractor};

/// A resolved delivery date with an optional hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryDate {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

#[derive(Clone, Copy)]
enum DateShape {
    MonthDayTime,
    MonthDay,
    DayTime,
    Day,
}

/// Date field extractor.
///
/// Phrases carry no year, so they are resolved against a reference date:
/// the next occurrence on or after it.
pub struct DateExtractor {
    reference: NaiveDate,
}

impl DateExtractor {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    fn patterns() -> [(&'static Regex, DateShape); 4] {
        [
            (&*MONTH_DAY_TIME, DateShape::MonthDayTime),
            (&*MONTH_DAY, DateShape::MonthDay),
            (&*DAY_TIME, DateShape::DayTime),
            (&*DAY_ONLY, DateShape::Day),
        ]
    }

    fn resolve(&self, caps: &Captures<'_>, shape: DateShape) -> Option<DeliveryDate> {
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let period = |i: usize| caps.get(i).map(|m| m.as_str());

        let (month, day, time) = match shape {
            DateShape::MonthDayTime => (num(1)?, num(2)?, hour_of_day(period(3), num(4)?)),
            DateShape::MonthDay => (num(1)?, num(2)?, None),
            DateShape::DayTime => (self.reference.month(), num(1)?, hour_of_day(period(2), num(3)?)),
            DateShape::Day => (self.reference.month(), num(1)?, None),
        };

        let date = resolve_month_day(self.reference, month, day)?;
        Some(DeliveryDate { date, time })
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<DeliveryDate>;

    /// First pattern (in priority order) that matches anywhere wins.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (pattern, shape) in Self::patterns() {
            for caps in pattern.captures_iter(text) {
                // Skip the boundary character in front of the first number
                let start = caps.get(1).unwrap().start();
                let end = caps.get(0).unwrap().end();
                if results.iter().any(|r| r.overlaps(start, end)) {
                    continue;
                }

                if let Some(value) = self.resolve(&caps, shape) {
                    results.push(
                        ExtractionMatch::new(value, &text[start..end]).with_position(start, end),
                    );
                }
            }
        }

        results
    }
}

/// Build the next occurrence of `month`/`day` on or after `reference`.
///
/// Day and month overflow carry forward (`2월 30일` becomes March 2nd or
/// 1st); there is no month-length validation. A date earlier than the
/// reference moves to the following year.
pub fn resolve_month_day(reference: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let date = lenient_date(reference.year(), month, day)?;
    if date < reference {
        lenient_date(reference.year() + 1, month, day)
    } else {
        Some(date)
    }
}

fn lenient_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let months = month as i32 - 1;
    let first = NaiveDate::from_ymd_opt(
        year + months.div_euclid(12),
        months.rem_euclid(12) as u32 + 1,
        1,
    )?;
    first.checked_add_signed(Duration::days(day as i64 - 1))
}

fn hour_of_day(period: Option<&str>, hour: u32) -> Option<NaiveTime> {
    let hour = match period {
        Some("오후" | "저녁" | "밤") if hour < 12 => hour + 12,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}
