//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and loads settings
//! - installs logging
//! - turns subcommand flags into calculator requests
//! - prints reports, gauges or JSON
//! - runs batch files and theme lookups

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use crate::calc::{bmi, bmr, body_fat, calories, due_date, heart_rate, ideal_weight, sleep, water, whr};
use crate::cli::{BatchArgs, Cli, Command, ThemeArgs, UnitArgs};
use crate::config::Settings;
use crate::domain::{CalculatorResult, Sex, UnitSystem};
use crate::error::AppError;
use crate::theme::{ThemeMatch, ThemeResolver};

use pipeline::CalcRequest;

pub mod pipeline;

/// Gauge width in terminal columns.
const GAUGE_WIDTH: usize = 40;

/// Entry point for the `vitals` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    // `vitals` with no subcommand opens the TUI, which owns the terminal.
    let command = match cli.command.as_ref() {
        None | Some(Command::Tui) => return crate::tui::run(&settings),
        Some(command) => command,
    };

    crate::logging::init(settings.log_filter.as_deref(), cli.verbose)?;
    debug!(units = ?settings.units, theme_file = ?settings.theme_file, "settings loaded");

    let out = Output {
        json: cli.json,
        gauge: cli.show_gauge(),
    };

    match command {
        Command::Theme(args) => handle_theme(args, &settings, out),
        Command::List => handle_list(out),
        Command::Batch(args) => handle_batch(args, &settings, out),
        other => {
            let (request, gauge) = request_from_command(other, &settings)?;
            let result = pipeline::evaluate(&request)?;
            out.print_result(&result, gauge)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
    gauge: bool,
}

/// Which category gauge, if any, to draw under a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GaugeKind {
    Bmi,
    BodyFat(Sex),
    WaistToHip(Sex),
}

impl Output {
    fn print_result(self, result: &CalculatorResult, gauge: Option<GaugeKind>) -> Result<(), AppError> {
        if self.json {
            return print_json(result);
        }

        print!("{}", crate::report::format_result(result));
        if let (true, Some(kind)) = (self.gauge, gauge) {
            let bands = match kind {
                GaugeKind::Bmi => crate::plot::bmi_bands(),
                GaugeKind::BodyFat(sex) => crate::plot::body_fat_bands(sex),
                GaugeKind::WaistToHip(sex) => crate::plot::whr_bands(sex),
            };
            println!();
            print!("{}", crate::plot::render_gauge(&bands, result.value, GAUGE_WIDTH));
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

fn units_or(args: &UnitArgs, settings: &Settings) -> UnitSystem {
    args.units.unwrap_or(settings.units)
}

/// Build the calculator request for a calculator subcommand.
fn request_from_command(
    command: &Command,
    settings: &Settings,
) -> Result<(CalcRequest, Option<GaugeKind>), AppError> {
    let pair = match command {
        Command::Bmi(a) => (
            CalcRequest::Bmi(bmi::BmiInput {
                height: a.height,
                weight: a.weight,
                units: units_or(&a.units, settings),
            }),
            Some(GaugeKind::Bmi),
        ),
        Command::Bmr(a) => (CalcRequest::Bmr(bmr_input(a, settings)), None),
        Command::Calories(a) => (
            CalcRequest::Calories(calories::CalorieInput {
                body: bmr_input(&a.body, settings),
                activity: a.activity,
            }),
            None,
        ),
        Command::Sleep(a) => {
            let anchor = match (a.wake, a.bedtime) {
                (Some(wake), _) => sleep::SleepAnchor::WakeAt(wake),
                (None, Some(bed)) => sleep::SleepAnchor::BedAt(bed),
                (None, None) => return Err(AppError::new(2, "sleep needs --wake or --bedtime")),
            };
            (
                CalcRequest::Sleep(sleep::SleepInput {
                    anchor,
                    fall_asleep_minutes: a.fall_asleep,
                }),
                None,
            )
        }
        Command::BodyFat(a) => (
            CalcRequest::BodyFat(body_fat::BodyFatInput {
                sex: a.sex,
                height: a.height,
                neck: a.neck,
                waist: a.waist,
                hip: a.hip,
                weight: a.weight,
                units: units_or(&a.units, settings),
            }),
            Some(GaugeKind::BodyFat(a.sex)),
        ),
        Command::IdealWeight(a) => (
            CalcRequest::IdealWeight(ideal_weight::IdealWeightInput {
                sex: a.sex,
                height: a.height,
                units: units_or(&a.units, settings),
            }),
            None,
        ),
        Command::Water(a) => (
            CalcRequest::Water(water::WaterInput {
                weight: a.weight,
                exercise_minutes: a.exercise_minutes,
                hot_climate: a.hot_climate,
                units: units_or(&a.units, settings),
            }),
            None,
        ),
        Command::HeartRate(a) => (
            CalcRequest::HeartRate(heart_rate::HeartRateInput {
                age: a.age,
                resting: a.resting,
                formula: a.formula,
            }),
            None,
        ),
        Command::DueDate(a) => (
            CalcRequest::DueDate(due_date::DueDateInput {
                lmp: a.lmp,
                cycle_length: a.cycle,
                on: a.on.unwrap_or_else(|| chrono::Local::now().date_naive()),
            }),
            None,
        ),
        Command::Whr(a) => (
            CalcRequest::WaistToHip(whr::WhrInput {
                sex: a.sex,
                waist: a.waist,
                hip: a.hip,
                units: units_or(&a.units, settings),
            }),
            Some(GaugeKind::WaistToHip(a.sex)),
        ),
        Command::Theme(_) | Command::List | Command::Batch(_) | Command::Tui => {
            return Err(AppError::new(2, "not a calculator command"));
        }
    };
    Ok(pair)
}

fn bmr_input(a: &crate::cli::BmrArgs, settings: &Settings) -> bmr::BmrInput {
    bmr::BmrInput {
        sex: a.sex,
        age: a.age,
        height: a.height,
        weight: a.weight,
        units: units_or(&a.units, settings),
        formula: a.formula,
    }
}

/// Theme table in effect: `--table`, then `VITALS_THEME_FILE`, then the built-in one.
pub fn active_theme_table(table: Option<&Path>, settings: &Settings) -> Result<ThemeResolver, AppError> {
    match table.or(settings.theme_file.as_deref()) {
        Some(path) => {
            let resolver = crate::io::read_theme_file(path)?;
            info!(path = %path.display(), routes = resolver.len(), "theme table loaded");
            Ok(resolver)
        }
        None => Ok(crate::theme::builtin::shared().clone()),
    }
}

#[derive(Debug, Serialize)]
struct ThemeLookup<'a> {
    path: &'a str,
    rule: &'static str,
    key: Option<&'a str>,
    theme: &'a crate::theme::ThemeConfig,
}

fn handle_theme(args: &ThemeArgs, settings: &Settings, out: Output) -> Result<(), AppError> {
    let resolver = active_theme_table(args.table.as_deref(), settings)?;

    if let Some(path) = &args.dump {
        crate::io::write_theme_file(path, &resolver)?;
        info!(path = %path.display(), routes = resolver.len(), "theme table written");
        return Ok(());
    }

    // A bare slug such as `bmi-calculator` names that calculator's route.
    let path = match crate::site::SITE.by_slug(&args.path) {
        Some(entry) if !args.path.starts_with('/') => entry.path,
        _ => args.path.as_str(),
    };
    let (rule, theme) = resolver.resolve_match(path);
    debug!(path, ?rule, "theme resolved");

    if out.json {
        let (rule_name, key) = match rule {
            ThemeMatch::Exact(k) => ("exact", Some(k)),
            ThemeMatch::Prefix(k) => ("prefix", Some(k)),
            ThemeMatch::Default => ("default", None),
        };
        return print_json(&ThemeLookup {
            path,
            rule: rule_name,
            key,
            theme,
        });
    }

    print!("{}", crate::report::format_theme(path, rule, theme));
    Ok(())
}

#[derive(Debug, Serialize)]
struct CatalogueEntry<'a> {
    calculator: crate::domain::CalculatorKind,
    title: &'a str,
    path: &'a str,
    url: String,
    summary: &'a str,
}

fn handle_list(out: Output) -> Result<(), AppError> {
    let site = crate::site::SITE;
    if out.json {
        let entries: Vec<CatalogueEntry<'_>> = site
            .calculators
            .iter()
            .map(|e| CatalogueEntry {
                calculator: e.kind,
                title: e.title,
                path: e.path,
                url: site.url(e),
                summary: e.summary,
            })
            .collect();
        return print_json(&entries);
    }
    print!("{}", crate::report::format_catalogue(&site));
    Ok(())
}

#[derive(Debug, Serialize)]
struct BatchRecord<'a> {
    line: usize,
    id: &'a str,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    bmi: Option<f64>,
    category: Option<&'static str>,
    error: Option<&'a str>,
}

fn handle_batch(args: &BatchArgs, settings: &Settings, out: Output) -> Result<(), AppError> {
    let ingested = crate::io::load_bmi_rows(&args.input, units_or(&args.units, settings))?;
    info!(
        path = %args.input.display(),
        rows_read = ingested.rows_read,
        parse_errors = ingested.row_errors.len(),
        "batch input read"
    );
    let outcomes = pipeline::run_batch(&ingested);

    if let Some(path) = &args.output {
        crate::io::write_batch_csv_file(path, &outcomes)?;
        info!(path = %path.display(), rows = outcomes.len(), "batch results written");
    }

    if out.json {
        let records: Vec<BatchRecord<'_>> = outcomes
            .iter()
            .map(|o| BatchRecord {
                line: o.line,
                id: &o.id,
                height_cm: o.height_cm,
                weight_kg: o.weight_kg,
                bmi: o.result.as_ref().ok().map(|r| r.bmi),
                category: o.result.as_ref().ok().map(|r| r.category.label()),
                error: o.result.as_ref().err().map(String::as_str),
            })
            .collect();
        return print_json(&records);
    }

    print!("{}", crate::report::format_batch(&outcomes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalculatorKind;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["vitals"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command.unwrap()
    }

    #[test]
    fn bmi_command_uses_settings_units_unless_overridden() {
        let settings = Settings {
            units: UnitSystem::Imperial,
            ..Settings::default()
        };

        let cmd = parse(&["bmi", "--height", "70", "--weight", "154"]);
        let (request, gauge) = request_from_command(&cmd, &settings).unwrap();
        assert_eq!(gauge, Some(GaugeKind::Bmi));
        match request {
            CalcRequest::Bmi(input) => assert_eq!(input.units, UnitSystem::Imperial),
            other => panic!("unexpected request: {other:?}"),
        }

        let cmd = parse(&["bmi", "--height", "180", "--weight", "70", "--units", "metric"]);
        let (request, _) = request_from_command(&cmd, &settings).unwrap();
        let result = pipeline::evaluate(&request).unwrap();
        assert_eq!(result.calculator, CalculatorKind::Bmi);
        assert!((result.value - 21.6).abs() < 1e-9);
    }

    #[test]
    fn sleep_command_builds_wake_anchor() {
        let cmd = parse(&["sleep", "--wake", "07:00"]);
        let (request, gauge) = request_from_command(&cmd, &Settings::default()).unwrap();
        assert_eq!(gauge, None);
        assert_eq!(request.kind(), CalculatorKind::Sleep);
    }

    #[test]
    fn due_date_honours_explicit_reference_date() {
        let cmd = parse(&["due-date", "--lmp", "2024-01-01", "--on", "2024-03-01"]);
        let (request, _) = request_from_command(&cmd, &Settings::default()).unwrap();
        match request {
            CalcRequest::DueDate(input) => {
                assert_eq!(input.on, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
                assert_eq!(input.cycle_length, 28);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn non_calculator_commands_are_rejected() {
        let err = request_from_command(&Command::List, &Settings::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn theme_table_falls_back_to_builtin() {
        let resolver = active_theme_table(None, &Settings::default()).unwrap();
        assert_eq!(resolver.len(), crate::theme::builtin::shared().len());
    }

    #[test]
    fn theme_table_flag_beats_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("themes.json");
        let table = ThemeResolver::new(crate::theme::builtin::default_theme()).with_route(
            "/x",
            crate::theme::ThemeConfig::new("bg-white", "from-red-500 to-rose-500", "shadow-red-500/25"),
        );
        crate::io::write_theme_file(&path, &table).unwrap();

        let settings = Settings {
            theme_file: Some(dir.path().join("missing.json")),
            ..Settings::default()
        };
        let resolver = active_theme_table(Some(&path), &settings).unwrap();
        assert_eq!(resolver.len(), 1);
        assert!(matches!(resolver.resolve_match("/x/y").0, ThemeMatch::Prefix("/x")));
    }
}
