//! Daily calorie needs: total daily energy expenditure (TDEE) and goal targets.
//!
//! ```text
//! tdee = bmr * activity_multiplier
//! target = tdee + goal_delta
//! ```

use serde::Serialize;

use crate::calc::bmr::{BmrInput, raw_bmr, validated_body};
use crate::domain::{ActivityLevel, CalculatorKind, CalculatorResult, Detail, Sex};
use crate::error::CalcError;

/// Lowest daily intake generally considered safe without supervision.
pub fn minimum_safe_kcal(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 1500.0,
        Sex::Female => 1200.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Goal {
    ExtremeLoss,
    Loss,
    MildLoss,
    Maintain,
    MildGain,
    Gain,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::ExtremeLoss,
        Goal::Loss,
        Goal::MildLoss,
        Goal::Maintain,
        Goal::MildGain,
        Goal::Gain,
    ];

    /// kcal/day added to maintenance.
    pub fn delta_kcal(self) -> f64 {
        match self {
            Goal::ExtremeLoss => -1000.0,
            Goal::Loss => -500.0,
            Goal::MildLoss => -250.0,
            Goal::Maintain => 0.0,
            Goal::MildGain => 250.0,
            Goal::Gain => 500.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Goal::ExtremeLoss => "Extreme weight loss (1 kg/week)",
            Goal::Loss => "Weight loss (0.5 kg/week)",
            Goal::MildLoss => "Mild weight loss (0.25 kg/week)",
            Goal::Maintain => "Maintain weight",
            Goal::MildGain => "Mild weight gain (0.25 kg/week)",
            Goal::Gain => "Weight gain (0.5 kg/week)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieInput {
    pub body: BmrInput,
    pub activity: ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTarget {
    pub goal: Goal,
    pub kcal_per_day: f64,
    pub below_minimum: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalorieResult {
    pub bmr: f64,
    pub tdee: f64,
    pub activity: ActivityLevel,
    pub targets: Vec<GoalTarget>,
}

impl CalorieResult {
    pub fn target(&self, goal: Goal) -> Option<&GoalTarget> {
        self.targets.iter().find(|t| t.goal == goal)
    }
}

pub fn compute(input: &CalorieInput) -> Result<CalorieResult, CalcError> {
    let body = validated_body(&input.body)?;
    let bmr = raw_bmr(input.body.formula, input.body.sex, &body);
    let tdee = (bmr * input.activity.multiplier()).round();
    let floor = minimum_safe_kcal(input.body.sex);

    let targets = Goal::ALL
        .iter()
        .map(|&goal| {
            let kcal = tdee + goal.delta_kcal();
            GoalTarget {
                goal,
                kcal_per_day: kcal,
                below_minimum: kcal < floor,
            }
        })
        .collect();

    Ok(CalorieResult {
        bmr: bmr.round(),
        tdee,
        activity: input.activity,
        targets,
    })
}

impl From<&CalorieResult> for CalculatorResult {
    fn from(r: &CalorieResult) -> Self {
        let mut details = vec![Detail::new("BMR", format!("{:.0} kcal/day", r.bmr))];
        for t in &r.targets {
            let flag = if t.below_minimum { " (below safe minimum)" } else { "" };
            details.push(Detail::new(t.goal.label(), format!("{:.0} kcal/day{flag}", t.kcal_per_day)));
        }
        CalculatorResult {
            calculator: CalculatorKind::Calories,
            value: r.tdee,
            unit: "kcal/day".to_string(),
            category: Some(r.activity.display_name().to_string()),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BmrFormula, UnitSystem};

    fn body(sex: Sex, age: f64, height: f64, weight: f64) -> BmrInput {
        BmrInput {
            sex,
            age,
            height,
            weight,
            units: UnitSystem::Metric,
            formula: BmrFormula::MifflinStJeor,
        }
    }

    #[test]
    fn tdee_scales_bmr_by_activity() {
        let r = compute(&CalorieInput {
            body: body(Sex::Male, 30.0, 180.0, 80.0),
            activity: ActivityLevel::Moderate,
        })
        .unwrap();
        assert_eq!(r.bmr, 1780.0);
        assert_eq!(r.tdee, 2759.0);
        assert_eq!(r.target(Goal::Loss).unwrap().kcal_per_day, 2259.0);
        assert_eq!(r.target(Goal::Gain).unwrap().kcal_per_day, 3259.0);
    }

    #[test]
    fn low_targets_are_flagged() {
        let r = compute(&CalorieInput {
            body: body(Sex::Female, 25.0, 165.0, 60.0),
            activity: ActivityLevel::Sedentary,
        })
        .unwrap();
        assert_eq!(r.tdee, 1614.0);
        assert!(r.target(Goal::ExtremeLoss).unwrap().below_minimum);
        assert!(r.target(Goal::Loss).unwrap().below_minimum);
        assert!(!r.target(Goal::MildLoss).unwrap().below_minimum);
    }

    #[test]
    fn targets_cover_every_goal_in_order() {
        let r = compute(&CalorieInput {
            body: body(Sex::Male, 45.0, 175.0, 90.0),
            activity: ActivityLevel::Light,
        })
        .unwrap();
        let goals: Vec<Goal> = r.targets.iter().map(|t| t.goal).collect();
        assert_eq!(goals, Goal::ALL.to_vec());
    }
}
