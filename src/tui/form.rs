//! Editable input forms for the TUI, one per calculator.
//!
//! A form is a list of fields; text fields take typed characters, choice
//! fields cycle with left/right. `Form::request` turns the current values
//! into a calculator request, reporting the first field that fails to parse.

use chrono::{NaiveDate, TimeDelta};

use crate::app::pipeline::CalcRequest;
use crate::calc::{bmi, bmr, body_fat, calories, due_date, heart_rate, ideal_weight, sleep, water, whr};
use crate::domain::{ActivityLevel, BmrFormula, CalculatorKind, MaxHrFormula, Sex, UnitSystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    WakeAt,
    BedAt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Sex(Sex),
    Units(UnitSystem),
    Activity(ActivityLevel),
    BmrFormula(BmrFormula),
    MaxHr(MaxHrFormula),
    Toggle(bool),
    Anchor(AnchorMode),
}

impl FieldValue {
    fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Sex(Sex::Male) => "Male".to_string(),
            FieldValue::Sex(Sex::Female) => "Female".to_string(),
            FieldValue::Units(u) => format!("{} ({}/{})", units_name(*u), u.length_label(), u.weight_label()),
            FieldValue::Activity(a) => a.display_name().to_string(),
            FieldValue::BmrFormula(f) => f.display_name().to_string(),
            FieldValue::MaxHr(MaxHrFormula::Classic) => "220 - age".to_string(),
            FieldValue::MaxHr(MaxHrFormula::Tanaka) => "Tanaka".to_string(),
            FieldValue::Toggle(on) => if *on { "yes" } else { "no" }.to_string(),
            FieldValue::Anchor(AnchorMode::WakeAt) => "I want to wake up at".to_string(),
            FieldValue::Anchor(AnchorMode::BedAt) => "I am going to bed at".to_string(),
        }
    }

    /// Step a choice field. Text fields are unchanged.
    pub fn cycle(&mut self, forward: bool) {
        match self {
            FieldValue::Text(_) => {}
            FieldValue::Sex(s) => *s = if *s == Sex::Male { Sex::Female } else { Sex::Male },
            FieldValue::Units(u) => {
                *u = match u {
                    UnitSystem::Metric => UnitSystem::Imperial,
                    UnitSystem::Imperial => UnitSystem::Metric,
                }
            }
            FieldValue::Activity(a) => *a = if forward { a.next() } else { a.prev() },
            FieldValue::BmrFormula(f) => {
                *f = match f {
                    BmrFormula::MifflinStJeor => BmrFormula::HarrisBenedict,
                    BmrFormula::HarrisBenedict => BmrFormula::MifflinStJeor,
                }
            }
            FieldValue::MaxHr(f) => {
                *f = match f {
                    MaxHrFormula::Classic => MaxHrFormula::Tanaka,
                    MaxHrFormula::Tanaka => MaxHrFormula::Classic,
                }
            }
            FieldValue::Toggle(on) => *on = !*on,
            FieldValue::Anchor(m) => {
                *m = match m {
                    AnchorMode::WakeAt => AnchorMode::BedAt,
                    AnchorMode::BedAt => AnchorMode::WakeAt,
                }
            }
        }
    }
}

fn units_name(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Metric => "Metric",
        UnitSystem::Imperial => "Imperial",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub value: FieldValue,
}

impl Field {
    fn new(key: &'static str, label: &'static str, value: FieldValue) -> Self {
        Self { key, label, value }
    }

    /// Accept a typed character if it fits a text field.
    pub fn push_char(&mut self, c: char) -> bool {
        match &mut self.value {
            FieldValue::Text(s) if c.is_ascii_digit() || matches!(c, '.' | ':' | '-') => {
                s.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: CalculatorKind,
    pub fields: Vec<Field>,
}

impl Form {
    /// Form with example values filled in, so every calculator shows a result straight away.
    pub fn new(kind: CalculatorKind, units: UnitSystem, today: NaiveDate) -> Self {
        let (height, weight, waist, hip, neck) = match units {
            UnitSystem::Metric => ("175", "70", "85", "100", "38"),
            UnitSystem::Imperial => ("69", "154", "33.5", "39.5", "15"),
        };
        let u = FieldValue::Units(units);
        let body = || {
            vec![
                Field::new("sex", "Sex", FieldValue::Sex(Sex::Male)),
                Field::new("age", "Age (years)", FieldValue::text("30")),
                Field::new("height", "Height", FieldValue::text(height)),
                Field::new("weight", "Weight", FieldValue::text(weight)),
            ]
        };

        let fields = match kind {
            CalculatorKind::Bmi => vec![
                Field::new("height", "Height", FieldValue::text(height)),
                Field::new("weight", "Weight", FieldValue::text(weight)),
                Field::new("units", "Units", u),
            ],
            CalculatorKind::Bmr => {
                let mut f = body();
                f.push(Field::new("formula", "Formula", FieldValue::BmrFormula(BmrFormula::default())));
                f.push(Field::new("units", "Units", u));
                f
            }
            CalculatorKind::Calories => {
                let mut f = body();
                f.push(Field::new("activity", "Activity", FieldValue::Activity(ActivityLevel::Moderate)));
                f.push(Field::new("formula", "Formula", FieldValue::BmrFormula(BmrFormula::default())));
                f.push(Field::new("units", "Units", u));
                f
            }
            CalculatorKind::Sleep => vec![
                Field::new("mode", "Mode", FieldValue::Anchor(AnchorMode::WakeAt)),
                Field::new("time", "Time (HH:MM)", FieldValue::text("07:00")),
                Field::new(
                    "fall_asleep",
                    "Minutes to fall asleep",
                    FieldValue::text(sleep::DEFAULT_FALL_ASLEEP_MINUTES.to_string()),
                ),
            ],
            CalculatorKind::BodyFat => vec![
                Field::new("sex", "Sex", FieldValue::Sex(Sex::Male)),
                Field::new("height", "Height", FieldValue::text(height)),
                Field::new("neck", "Neck", FieldValue::text(neck)),
                Field::new("waist", "Waist", FieldValue::text(waist)),
                Field::new("hip", "Hip (women)", FieldValue::text(hip)),
                Field::new("weight", "Weight (optional)", FieldValue::text(weight)),
                Field::new("units", "Units", u),
            ],
            CalculatorKind::IdealWeight => vec![
                Field::new("sex", "Sex", FieldValue::Sex(Sex::Male)),
                Field::new("height", "Height", FieldValue::text(height)),
                Field::new("units", "Units", u),
            ],
            CalculatorKind::Water => vec![
                Field::new("weight", "Weight", FieldValue::text(weight)),
                Field::new("exercise", "Exercise (min/day)", FieldValue::text("30")),
                Field::new("hot", "Hot climate", FieldValue::Toggle(false)),
                Field::new("units", "Units", u),
            ],
            CalculatorKind::HeartRate => vec![
                Field::new("age", "Age (years)", FieldValue::text("30")),
                Field::new("resting", "Resting HR (optional)", FieldValue::text("")),
                Field::new("formula", "Max HR formula", FieldValue::MaxHr(MaxHrFormula::default())),
            ],
            CalculatorKind::DueDate => {
                let lmp = today - TimeDelta::days(70);
                vec![
                    Field::new("lmp", "Last period (YYYY-MM-DD)", FieldValue::text(lmp.format("%Y-%m-%d").to_string())),
                    Field::new(
                        "cycle",
                        "Cycle length (days)",
                        FieldValue::text(due_date::STANDARD_CYCLE_DAYS.to_string()),
                    ),
                ]
            }
            CalculatorKind::WaistToHip => vec![
                Field::new("sex", "Sex", FieldValue::Sex(Sex::Male)),
                Field::new("waist", "Waist", FieldValue::text(waist)),
                Field::new("hip", "Hip", FieldValue::text(hip)),
                Field::new("units", "Units", u),
            ],
        };

        Self { kind, fields }
    }

    fn get(&self, key: &str) -> Result<&Field, String> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| format!("missing field '{key}'"))
    }

    fn text(&self, key: &str) -> Result<(&'static str, &str), String> {
        let field = self.get(key)?;
        match &field.value {
            FieldValue::Text(s) => Ok((field.label, s.trim())),
            _ => Err(format!("{}: not a text field", field.label)),
        }
    }

    fn number(&self, key: &str) -> Result<f64, String> {
        let (label, s) = self.text(key)?;
        s.parse::<f64>().map_err(|_| format!("{label}: enter a number"))
    }

    fn optional_number(&self, key: &str) -> Result<Option<f64>, String> {
        let (_, s) = self.text(key)?;
        if s.is_empty() { Ok(None) } else { self.number(key).map(Some) }
    }

    fn whole(&self, key: &str) -> Result<u32, String> {
        let (label, s) = self.text(key)?;
        s.parse::<u32>().map_err(|_| format!("{label}: enter a whole number"))
    }

    fn choice<T>(&self, key: &str, pick: impl Fn(&FieldValue) -> Option<T>) -> Result<T, String> {
        let field = self.get(key)?;
        pick(&field.value).ok_or_else(|| format!("{}: unexpected value", field.label))
    }

    fn sex(&self) -> Result<Sex, String> {
        self.choice("sex", |v| match v {
            FieldValue::Sex(s) => Some(*s),
            _ => None,
        })
    }

    fn units(&self) -> Result<UnitSystem, String> {
        self.choice("units", |v| match v {
            FieldValue::Units(u) => Some(*u),
            _ => None,
        })
    }

    fn bmr_input(&self) -> Result<bmr::BmrInput, String> {
        Ok(bmr::BmrInput {
            sex: self.sex()?,
            age: self.number("age")?,
            height: self.number("height")?,
            weight: self.number("weight")?,
            units: self.units()?,
            formula: self.choice("formula", |v| match v {
                FieldValue::BmrFormula(f) => Some(*f),
                _ => None,
            })?,
        })
    }

    /// Build the calculator request from the current field values.
    ///
    /// `today` is the reference date for the due-date calculator.
    pub fn request(&self, today: NaiveDate) -> Result<CalcRequest, String> {
        let request = match self.kind {
            CalculatorKind::Bmi => CalcRequest::Bmi(bmi::BmiInput {
                height: self.number("height")?,
                weight: self.number("weight")?,
                units: self.units()?,
            }),
            CalculatorKind::Bmr => CalcRequest::Bmr(self.bmr_input()?),
            CalculatorKind::Calories => CalcRequest::Calories(calories::CalorieInput {
                body: self.bmr_input()?,
                activity: self.choice("activity", |v| match v {
                    FieldValue::Activity(a) => Some(*a),
                    _ => None,
                })?,
            }),
            CalculatorKind::Sleep => {
                let (label, raw) = self.text("time")?;
                let time = crate::cli::parse_time(raw).map_err(|_| format!("{label}: enter HH:MM"))?;
                let anchor = match self.choice("mode", |v| match v {
                    FieldValue::Anchor(m) => Some(*m),
                    _ => None,
                })? {
                    AnchorMode::WakeAt => sleep::SleepAnchor::WakeAt(time),
                    AnchorMode::BedAt => sleep::SleepAnchor::BedAt(time),
                };
                CalcRequest::Sleep(sleep::SleepInput {
                    anchor,
                    fall_asleep_minutes: self.whole("fall_asleep")?,
                })
            }
            CalculatorKind::BodyFat => {
                let sex = self.sex()?;
                let hip = match sex {
                    Sex::Female => self.optional_number("hip")?,
                    Sex::Male => None,
                };
                CalcRequest::BodyFat(body_fat::BodyFatInput {
                    sex,
                    height: self.number("height")?,
                    neck: self.number("neck")?,
                    waist: self.number("waist")?,
                    hip,
                    weight: self.optional_number("weight")?,
                    units: self.units()?,
                })
            }
            CalculatorKind::IdealWeight => CalcRequest::IdealWeight(ideal_weight::IdealWeightInput {
                sex: self.sex()?,
                height: self.number("height")?,
                units: self.units()?,
            }),
            CalculatorKind::Water => CalcRequest::Water(water::WaterInput {
                weight: self.number("weight")?,
                exercise_minutes: self.optional_number("exercise")?.unwrap_or(0.0),
                hot_climate: self.choice("hot", |v| match v {
                    FieldValue::Toggle(on) => Some(*on),
                    _ => None,
                })?,
                units: self.units()?,
            }),
            CalculatorKind::HeartRate => CalcRequest::HeartRate(heart_rate::HeartRateInput {
                age: self.number("age")?,
                resting: self.optional_number("resting")?,
                formula: self.choice("formula", |v| match v {
                    FieldValue::MaxHr(f) => Some(*f),
                    _ => None,
                })?,
            }),
            CalculatorKind::DueDate => {
                let (label, raw) = self.text("lmp")?;
                let lmp = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| format!("{label}: enter a date"))?;
                CalcRequest::DueDate(due_date::DueDateInput {
                    lmp,
                    cycle_length: self.whole("cycle")?,
                    on: today,
                })
            }
            CalculatorKind::WaistToHip => CalcRequest::WaistToHip(whr::WhrInput {
                sex: self.sex()?,
                waist: self.number("waist")?,
                hip: self.number("hip")?,
                units: self.units()?,
            }),
        };
        Ok(request)
    }

    /// Sex selected in the form, for calculators whose gauge depends on it.
    pub fn selected_sex(&self) -> Option<Sex> {
        self.sex().ok()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::app::pipeline::evaluate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn every_default_form_evaluates() {
        for units in [UnitSystem::Metric, UnitSystem::Imperial] {
            for kind in CalculatorKind::ALL {
                let form = Form::new(kind, units, today());
                let request = form.request(today()).unwrap();
                assert_eq!(request.kind(), kind);
                assert!(evaluate(&request).is_ok(), "{kind:?} {units:?}");
            }
        }
    }

    #[test]
    fn bad_number_names_the_field() {
        let mut form = Form::new(CalculatorKind::Bmi, UnitSystem::Metric, today());
        form.fields[0].value = FieldValue::text("1.2.3");
        assert_eq!(form.request(today()).unwrap_err(), "Height: enter a number");
    }

    #[test]
    fn typing_only_accepts_numeric_characters() {
        let mut field = Field::new("height", "Height", FieldValue::text(""));
        assert!(field.push_char('1'));
        assert!(field.push_char('.'));
        assert!(!field.push_char('x'));
        field.backspace();
        assert_eq!(field.value, FieldValue::text("1"));
    }

    #[test]
    fn choice_fields_cycle() {
        let mut v = FieldValue::Activity(ActivityLevel::Sedentary);
        v.cycle(false);
        assert_eq!(v, FieldValue::Activity(ActivityLevel::VeryActive));
        let mut s = FieldValue::Sex(Sex::Male);
        s.cycle(true);
        assert_eq!(s, FieldValue::Sex(Sex::Female));
    }

    #[test]
    fn sleep_bed_mode_builds_bed_anchor() {
        let mut form = Form::new(CalculatorKind::Sleep, UnitSystem::Metric, today());
        form.fields[0].value.cycle(true);
        form.fields[1].value = FieldValue::text("23:00");
        match form.request(today()).unwrap() {
            CalcRequest::Sleep(input) => {
                assert_eq!(input.anchor, sleep::SleepAnchor::BedAt(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }
}
