//! Pregnancy due date by Naegele's rule.
//!
//! ```text
//! due        = LMP + 280 days + (cycle_length - 28)
//! conception = LMP +  14 days + (cycle_length - 28)
//! ```

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use crate::domain::{CalculatorKind, CalculatorResult, Detail};
use crate::error::CalcError;

pub const GESTATION_DAYS: i64 = 280;
pub const OVULATION_DAY: i64 = 14;
pub const STANDARD_CYCLE_DAYS: u32 = 28;
const CYCLE_RANGE: (u32, u32) = (20, 45);
/// How far past the due date a reference date is still meaningful.
const MAX_GESTATION_DAYS: i64 = 44 * 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub fn for_weeks(weeks: i64) -> Self {
        if weeks < 14 {
            Trimester::First
        } else if weeks < 28 {
            Trimester::Second
        } else {
            Trimester::Third
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trimester::First => "First trimester",
            Trimester::Second => "Second trimester",
            Trimester::Third => "Third trimester",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateInput {
    /// First day of the last menstrual period.
    pub lmp: NaiveDate,
    pub cycle_length: u32,
    /// Date the gestational age is reported for (usually today).
    pub on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateResult {
    pub due_date: NaiveDate,
    pub conception: NaiveDate,
    pub weeks: i64,
    pub days: i64,
    pub trimester: Trimester,
    /// Negative once the due date has passed.
    pub days_remaining: i64,
}

pub fn compute(input: &DueDateInput) -> Result<DueDateResult, CalcError> {
    if !(CYCLE_RANGE.0..=CYCLE_RANGE.1).contains(&input.cycle_length) {
        return Err(CalcError::invalid(
            "cycle_length",
            format!(
                "{} days is outside the accepted range {}..={}",
                input.cycle_length, CYCLE_RANGE.0, CYCLE_RANGE.1
            ),
        ));
    }

    let elapsed = (input.on - input.lmp).num_days();
    if elapsed < 0 {
        return Err(CalcError::invalid("on", "reference date precedes the last period"));
    }
    if elapsed > MAX_GESTATION_DAYS {
        return Err(CalcError::invalid("lmp", "last period is too long ago for an ongoing pregnancy"));
    }

    let adjust = i64::from(input.cycle_length) - i64::from(STANDARD_CYCLE_DAYS);
    let shifted = |days: i64| {
        input
            .lmp
            .checked_add_signed(TimeDelta::days(days))
            .ok_or_else(|| CalcError::invalid("lmp", "date is outside the supported calendar range"))
    };
    let due_date = shifted(GESTATION_DAYS + adjust)?;
    let conception = shifted(OVULATION_DAY + adjust)?;

    // Gestational age counts from the LMP, corrected for cycle length.
    let gestational = (elapsed - adjust).max(0);
    let weeks = gestational / 7;

    Ok(DueDateResult {
        due_date,
        conception,
        weeks,
        days: gestational % 7,
        trimester: Trimester::for_weeks(weeks),
        days_remaining: (due_date - input.on).num_days(),
    })
}

impl From<&DueDateResult> for CalculatorResult {
    fn from(r: &DueDateResult) -> Self {
        CalculatorResult {
            calculator: CalculatorKind::DueDate,
            value: r.weeks as f64,
            unit: "weeks".to_string(),
            category: Some(r.trimester.label().to_string()),
            details: vec![
                Detail::new("Due date", r.due_date.format("%Y-%m-%d").to_string()),
                Detail::new("Estimated conception", r.conception.format("%Y-%m-%d").to_string()),
                Detail::new("Gestational age", format!("{}w {}d", r.weeks, r.days)),
                Detail::new("Days remaining", r.days_remaining.to_string()),
            ],
        }
    }
}
