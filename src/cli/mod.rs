//! Command-line parsing for the calculator suite.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! formulas and from command dispatch (`app`).

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::domain::{ActivityLevel, BmrFormula, MaxHrFormula, Sex, UnitSystem};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about = "Health and wellness calculators")]
pub struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Draw the category gauge under text results (default).
    #[arg(long, global = true, overrides_with = "no_gauge")]
    pub gauge: bool,

    /// Hide the category gauge under text results.
    #[arg(long, global = true, overrides_with = "gauge")]
    pub no_gauge: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn show_gauge(&self) -> bool {
        !self.no_gauge
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Body-mass index.
    Bmi(BmiArgs),
    /// Basal metabolic rate.
    Bmr(BmrArgs),
    /// Daily calorie needs and goal targets.
    Calories(CaloriesArgs),
    /// Bedtimes or wake-up times aligned to 90-minute sleep cycles.
    Sleep(SleepArgs),
    /// Body-fat percentage (U.S. Navy method).
    BodyFat(BodyFatArgs),
    /// Ideal body weight estimates.
    IdealWeight(IdealWeightArgs),
    /// Daily water intake.
    Water(WaterArgs),
    /// Maximum heart rate and training zones.
    HeartRate(HeartRateArgs),
    /// Pregnancy due date and gestational age.
    DueDate(DueDateArgs),
    /// Waist-to-hip ratio.
    Whr(WhrArgs),
    /// Resolve the theme for a route path.
    Theme(ThemeArgs),
    /// List the calculators.
    List,
    /// Evaluate BMI for every row of a CSV file.
    Batch(BatchArgs),
    /// Launch the interactive TUI.
    Tui,
}

/// Unit-system override shared by the body-measurement commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct UnitArgs {
    /// Units for lengths and weights (default from VITALS_UNITS, else metric).
    #[arg(short = 'u', long, value_enum)]
    pub units: Option<UnitSystem>,
}

#[derive(Debug, Clone, Args)]
pub struct BmiArgs {
    /// Height (cm, or inches with --units imperial).
    #[arg(long)]
    pub height: f64,
    /// Weight (kg, or lb with --units imperial).
    #[arg(long)]
    pub weight: f64,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BmrArgs {
    #[arg(long, value_enum)]
    pub sex: Sex,
    /// Age in years.
    #[arg(long)]
    pub age: f64,
    #[arg(long)]
    pub height: f64,
    #[arg(long)]
    pub weight: f64,
    #[arg(long, value_enum, default_value_t = BmrFormula::MifflinStJeor)]
    pub formula: BmrFormula,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CaloriesArgs {
    #[command(flatten)]
    pub body: BmrArgs,
    #[arg(short, long, value_enum, default_value_t = ActivityLevel::Moderate)]
    pub activity: ActivityLevel,
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("anchor").required(true).args(["wake", "bedtime"])))]
pub struct SleepArgs {
    /// Wake-up time (HH:MM); prints bedtimes.
    #[arg(long, value_parser = parse_time)]
    pub wake: Option<NaiveTime>,
    /// Bedtime (HH:MM); prints wake-up times.
    #[arg(long, value_parser = parse_time)]
    pub bedtime: Option<NaiveTime>,
    /// Minutes it takes to fall asleep.
    #[arg(long, default_value_t = crate::calc::sleep::DEFAULT_FALL_ASLEEP_MINUTES)]
    pub fall_asleep: u32,
}

#[derive(Debug, Clone, Args)]
pub struct BodyFatArgs {
    #[arg(long, value_enum)]
    pub sex: Sex,
    #[arg(long)]
    pub height: f64,
    /// Neck circumference.
    #[arg(long)]
    pub neck: f64,
    /// Waist circumference (at the navel).
    #[arg(long)]
    pub waist: f64,
    /// Hip circumference (required for women).
    #[arg(long)]
    pub hip: Option<f64>,
    /// Body weight, for the fat/lean mass split.
    #[arg(long)]
    pub weight: Option<f64>,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct IdealWeightArgs {
    #[arg(long, value_enum)]
    pub sex: Sex,
    #[arg(long)]
    pub height: f64,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct WaterArgs {
    #[arg(long)]
    pub weight: f64,
    /// Minutes of exercise per day.
    #[arg(long, default_value_t = 0.0)]
    pub exercise_minutes: f64,
    /// Add extra intake for a hot climate.
    #[arg(long)]
    pub hot_climate: bool,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct HeartRateArgs {
    #[arg(long)]
    pub age: f64,
    /// Resting heart rate (bpm); switches to the Karvonen method.
    #[arg(long)]
    pub resting: Option<f64>,
    #[arg(long, value_enum, default_value_t = MaxHrFormula::Classic)]
    pub formula: MaxHrFormula,
}

#[derive(Debug, Clone, Args)]
pub struct DueDateArgs {
    /// First day of the last menstrual period (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub lmp: NaiveDate,
    /// Average cycle length in days.
    #[arg(long, default_value_t = crate::calc::due_date::STANDARD_CYCLE_DAYS)]
    pub cycle: u32,
    /// Report gestational age on this date instead of today (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct WhrArgs {
    #[arg(long, value_enum)]
    pub sex: Sex,
    #[arg(long)]
    pub waist: f64,
    #[arg(long)]
    pub hip: f64,
    #[command(flatten)]
    pub units: UnitArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ThemeArgs {
    /// Route path to resolve (e.g. /bmi-calculator) or a calculator slug.
    #[arg(default_value = "/")]
    pub path: String,
    /// Theme table JSON to use instead of the configured one.
    #[arg(long, value_name = "JSON")]
    pub table: Option<PathBuf>,
    /// Write the active theme table to this file and exit.
    #[arg(long, value_name = "JSON")]
    pub dump: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Input CSV with `id,height,weight[,units]` columns.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub input: PathBuf,
    /// Write per-row results to this CSV file.
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub units: UnitArgs,
}

/// Parse `HH:MM`, `HH:MM:SS` or 12-hour `H:MMam` / `H:MM pm`.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    let compact = s.replace(' ', "").to_ascii_uppercase();
    for (input, fmt) in [(s, "%H:%M"), (s, "%H:%M:%S"), (compact.as_str(), "%I:%M%p")] {
        if let Ok(t) = NaiveTime::parse_from_str(input, fmt) {
            return Ok(t);
        }
    }
    Err(format!("Invalid time '{s}'. Expected HH:MM (24h) or H:MMam/pm."))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD."))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_times_in_several_forms() {
        let seven = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        assert_eq!(parse_time("07:00"), Ok(seven));
        assert_eq!(parse_time("7:00am"), Ok(seven));
        assert_eq!(parse_time("11:30 PM"), Ok(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn sleep_requires_an_anchor() {
        assert!(Cli::try_parse_from(["vitals", "sleep"]).is_err());
        let cli = Cli::try_parse_from(["vitals", "sleep", "--wake", "06:30"]).unwrap();
        match cli.command {
            Some(Command::Sleep(args)) => assert_eq!(args.wake, NaiveTime::from_hms_opt(6, 30, 0)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vitals", "bmi", "--height", "180", "--weight", "70", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn gauge_flags_override_each_other() {
        let cli = Cli::try_parse_from(["vitals", "--no-gauge", "--gauge", "list"]).unwrap();
        assert!(cli.show_gauge());
        let cli = Cli::try_parse_from(["vitals", "--gauge", "--no-gauge", "list"]).unwrap();
        assert!(!cli.show_gauge());
    }

    #[test]
    fn bmr_formula_names() {
        let cli = Cli::try_parse_from([
            "vitals", "bmr", "--sex", "female", "--age", "30", "--height", "165", "--weight", "60", "--formula",
            "harris",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Bmr(args)) => assert_eq!(args.formula, BmrFormula::HarrisBenedict),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
