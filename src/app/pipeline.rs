//! Shared evaluation logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the dispatch from a request
//! to the right formula; front ends only build requests and present results.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::calc::units::{length_to_cm, weight_to_kg};
use crate::calc::{bmi, bmr, body_fat, calories, due_date, heart_rate, ideal_weight, sleep, water, whr};
use crate::domain::{CalculatorKind, CalculatorResult};
use crate::error::CalcError;
use crate::io::ingest::IngestedRows;

/// One calculator invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcRequest {
    Bmi(bmi::BmiInput),
    Bmr(bmr::BmrInput),
    Calories(calories::CalorieInput),
    Sleep(sleep::SleepInput),
    BodyFat(body_fat::BodyFatInput),
    IdealWeight(ideal_weight::IdealWeightInput),
    Water(water::WaterInput),
    HeartRate(heart_rate::HeartRateInput),
    DueDate(due_date::DueDateInput),
    WaistToHip(whr::WhrInput),
}

impl CalcRequest {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalcRequest::Bmi(_) => CalculatorKind::Bmi,
            CalcRequest::Bmr(_) => CalculatorKind::Bmr,
            CalcRequest::Calories(_) => CalculatorKind::Calories,
            CalcRequest::Sleep(_) => CalculatorKind::Sleep,
            CalcRequest::BodyFat(_) => CalculatorKind::BodyFat,
            CalcRequest::IdealWeight(_) => CalculatorKind::IdealWeight,
            CalcRequest::Water(_) => CalculatorKind::Water,
            CalcRequest::HeartRate(_) => CalculatorKind::HeartRate,
            CalcRequest::DueDate(_) => CalculatorKind::DueDate,
            CalcRequest::WaistToHip(_) => CalculatorKind::WaistToHip,
        }
    }
}

/// Run the requested formula and convert its output to the uniform record.
pub fn evaluate(request: &CalcRequest) -> Result<CalculatorResult, CalcError> {
    let result = match request {
        CalcRequest::Bmi(input) => CalculatorResult::from(&bmi::compute(input)?),
        CalcRequest::Bmr(input) => CalculatorResult::from(&bmr::compute(input)?),
        CalcRequest::Calories(input) => CalculatorResult::from(&calories::compute(input)?),
        CalcRequest::Sleep(input) => CalculatorResult::from(&sleep::compute(input)?),
        CalcRequest::BodyFat(input) => CalculatorResult::from(&body_fat::compute(input)?),
        CalcRequest::IdealWeight(input) => CalculatorResult::from(&ideal_weight::compute(input)?),
        CalcRequest::Water(input) => CalculatorResult::from(&water::compute(input)?),
        CalcRequest::HeartRate(input) => CalculatorResult::from(&heart_rate::compute(input)?),
        CalcRequest::DueDate(input) => CalculatorResult::from(&due_date::compute(input)?),
        CalcRequest::WaistToHip(input) => CalculatorResult::from(&whr::compute(input)?),
    };
    debug!(
        calculator = ?result.calculator,
        value = result.value,
        category = result.category.as_deref().unwrap_or("-"),
        "computed"
    );
    Ok(result)
}

/// Per-row outcome of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub line: usize,
    pub id: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub result: Result<bmi::BmiResult, String>,
}

/// Evaluate every ingested row (in parallel) and merge in the rows that failed to parse.
///
/// Output is ordered by input line.
pub fn run_batch(ingested: &IngestedRows) -> Vec<BatchOutcome> {
    let mut outcomes: Vec<BatchOutcome> = ingested
        .rows
        .par_iter()
        .map(|row| BatchOutcome {
            line: row.line,
            id: row.id.clone(),
            height_cm: Some(length_to_cm(row.input.height, row.input.units)),
            weight_kg: Some(weight_to_kg(row.input.weight, row.input.units)),
            result: bmi::compute(&row.input).map_err(|e| e.to_string()),
        })
        .collect();

    outcomes.extend(ingested.row_errors.iter().map(|e| BatchOutcome {
        line: e.line,
        id: e.id.clone().unwrap_or_default(),
        height_cm: None,
        weight_kg: None,
        result: Err(e.message.clone()),
    }));
    outcomes.sort_by_key(|o| o.line);

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        warn!(failed, "batch rows could not be evaluated");
    }
    info!(rows = outcomes.len(), ok = outcomes.len() - failed, "batch evaluated");

    outcomes
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::UnitSystem;
    use crate::io::ingest::read_bmi_rows;

    #[test]
    fn evaluate_dispatches_by_kind() {
        let request = CalcRequest::Bmi(bmi::BmiInput {
            height: 180.0,
            weight: 70.0,
            units: UnitSystem::Metric,
        });
        let out = evaluate(&request).unwrap();
        assert_eq!(out.calculator, request.kind());
        assert_eq!(out.value, 21.6);

        let wake = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        let out = evaluate(&CalcRequest::Sleep(sleep::SleepInput::wake_at(wake))).unwrap();
        assert_eq!(out.calculator, CalculatorKind::Sleep);
    }

    #[test]
    fn evaluate_propagates_invalid_input() {
        let err = evaluate(&CalcRequest::WaistToHip(whr::WhrInput {
            sex: crate::domain::Sex::Male,
            waist: f64::NAN,
            hip: 100.0,
            units: UnitSystem::Metric,
        }))
        .unwrap_err();
        assert_eq!(err.field(), "waist");
    }

    #[test]
    fn batch_keeps_input_order_and_row_errors() {
        let csv = "id,height,weight\na,180,70\nb,abc,70\nc,160,90\nd,20,70\n";
        let ingested = read_bmi_rows(csv.as_bytes(), UnitSystem::Metric).unwrap();
        let outcomes = run_batch(&ingested);

        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(outcomes[0].result.as_ref().unwrap().bmi, 21.6);
        assert!(outcomes[1].result.is_err());
        assert_eq!(outcomes[2].result.as_ref().unwrap().category, bmi::BmiCategory::Obese);
        assert!(outcomes[3].result.as_ref().unwrap_err().contains("height"));
    }
}
