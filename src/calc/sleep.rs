//! Sleep-cycle timing.
//!
//! Sleep is modelled as whole 90-minute cycles preceded by a fixed
//! falling-asleep offset. Given a wake-up time we suggest bedtimes; given a
//! bedtime we suggest wake-up times. Times wrap around midnight.

use chrono::{NaiveTime, TimeDelta};
use serde::Serialize;

use crate::domain::{CalculatorKind, CalculatorResult, Detail};
use crate::error::CalcError;

pub const CYCLE_MINUTES: i64 = 90;
pub const DEFAULT_FALL_ASLEEP_MINUTES: u32 = 15;
pub const MAX_FALL_ASLEEP_MINUTES: u32 = 120;

/// Cycle counts offered, longest sleep first.
pub const SUGGESTED_CYCLES: [u32; 4] = [6, 5, 4, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SleepQuality {
    Ideal,
    Recommended,
    Minimum,
    Short,
}

impl SleepQuality {
    pub fn for_cycles(cycles: u32) -> Self {
        match cycles {
            n if n >= 6 => SleepQuality::Ideal,
            5 => SleepQuality::Recommended,
            4 => SleepQuality::Minimum,
            _ => SleepQuality::Short,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SleepQuality::Ideal => "Ideal",
            SleepQuality::Recommended => "Recommended",
            SleepQuality::Minimum => "Minimum",
            SleepQuality::Short => "Short",
        }
    }
}

/// What the user knows: when they must get up, or when they go to bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepAnchor {
    WakeAt(NaiveTime),
    BedAt(NaiveTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepInput {
    pub anchor: SleepAnchor,
    pub fall_asleep_minutes: u32,
}

impl SleepInput {
    pub fn wake_at(time: NaiveTime) -> Self {
        Self {
            anchor: SleepAnchor::WakeAt(time),
            fall_asleep_minutes: DEFAULT_FALL_ASLEEP_MINUTES,
        }
    }

    pub fn bed_at(time: NaiveTime) -> Self {
        Self {
            anchor: SleepAnchor::BedAt(time),
            fall_asleep_minutes: DEFAULT_FALL_ASLEEP_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepSuggestion {
    pub cycles: u32,
    /// Suggested bedtime or wake-up time depending on the anchor.
    pub time: NaiveTime,
    pub asleep_minutes: i64,
    pub quality: SleepQuality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepResult {
    pub anchor: SleepAnchor,
    /// Ordered by clock time from the anchor's perspective:
    /// bedtimes earliest first, wake times earliest first.
    pub suggestions: Vec<SleepSuggestion>,
}

pub fn compute(input: &SleepInput) -> Result<SleepResult, CalcError> {
    if input.fall_asleep_minutes > MAX_FALL_ASLEEP_MINUTES {
        return Err(CalcError::invalid(
            "fall_asleep_minutes",
            format!("{} exceeds {MAX_FALL_ASLEEP_MINUTES}", input.fall_asleep_minutes),
        ));
    }
    let offset = i64::from(input.fall_asleep_minutes);

    let suggestions = match input.anchor {
        SleepAnchor::WakeAt(wake) => SUGGESTED_CYCLES
            .iter()
            .map(|&n| suggestion(n, shift(wake, -(offset + asleep(n)))))
            .collect(),
        SleepAnchor::BedAt(bed) => SUGGESTED_CYCLES
            .iter()
            .rev()
            .map(|&n| suggestion(n, shift(bed, offset + asleep(n))))
            .collect(),
    };

    Ok(SleepResult {
        anchor: input.anchor,
        suggestions,
    })
}

/// Bedtimes for a fixed wake-up time with the default offset.
pub fn bedtimes(wake: NaiveTime) -> Vec<SleepSuggestion> {
    compute(&SleepInput::wake_at(wake))
        .map(|r| r.suggestions)
        .unwrap_or_default()
}

/// Wake-up times for a fixed bedtime with the default offset.
pub fn wake_times(bedtime: NaiveTime) -> Vec<SleepSuggestion> {
    compute(&SleepInput::bed_at(bedtime))
        .map(|r| r.suggestions)
        .unwrap_or_default()
}

fn asleep(cycles: u32) -> i64 {
    i64::from(cycles) * CYCLE_MINUTES
}

fn shift(time: NaiveTime, minutes: i64) -> NaiveTime {
    let (shifted, _days) = time.overflowing_add_signed(TimeDelta::minutes(minutes));
    shifted
}

fn suggestion(cycles: u32, time: NaiveTime) -> SleepSuggestion {
    SleepSuggestion {
        cycles,
        time,
        asleep_minutes: asleep(cycles),
        quality: SleepQuality::for_cycles(cycles),
    }
}

impl From<&SleepResult> for CalculatorResult {
    fn from(r: &SleepResult) -> Self {
        let verb = match r.anchor {
            SleepAnchor::WakeAt(_) => "Go to bed at",
            SleepAnchor::BedAt(_) => "Wake up at",
        };
        let recommended = r
            .suggestions
            .iter()
            .find(|s| s.quality == SleepQuality::Recommended)
            .or_else(|| r.suggestions.first());

        let details = r
            .suggestions
            .iter()
            .map(|s| {
                Detail::new(
                    format!("{} cycles ({:.1} h)", s.cycles, s.asleep_minutes as f64 / 60.0),
                    format!("{} ({})", s.time.format("%H:%M"), s.quality.label()),
                )
            })
            .collect();

        CalculatorResult {
            calculator: CalculatorKind::Sleep,
            value: recommended.map(|s| s.asleep_minutes as f64 / 60.0).unwrap_or(0.0),
            unit: "h".to_string(),
            category: recommended.map(|s| format!("{verb} {}", s.time.format("%H:%M"))),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn bedtimes_for_seven_am() {
        let times: Vec<NaiveTime> = bedtimes(t(7, 0)).iter().map(|s| s.time).collect();
        assert_eq!(times, vec![t(21, 45), t(23, 15), t(0, 45), t(2, 15)]);
    }

    #[test]
    fn bedtimes_step_in_cycle_lengths_from_offset_wake() {
        let wake = t(6, 30);
        let plan = bedtimes(wake);
        for s in &plan {
            let back = shift(s.time, DEFAULT_FALL_ASLEEP_MINUTES as i64 + s.asleep_minutes);
            assert_eq!(back, wake);
        }
        for pair in plan.windows(2) {
            assert_eq!(pair[0].cycles - pair[1].cycles, 1);
            assert_eq!(shift(pair[0].time, CYCLE_MINUTES), pair[1].time);
        }
    }

    #[test]
    fn wake_times_after_bedtime() {
        let plan = wake_times(t(23, 0));
        let times: Vec<NaiveTime> = plan.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![t(3, 45), t(5, 15), t(6, 45), t(8, 15)]);
        assert_eq!(plan[0].quality, SleepQuality::Short);
        assert_eq!(plan[3].quality, SleepQuality::Ideal);
    }

    #[test]
    fn custom_offset_is_honoured() {
        let r = compute(&SleepInput {
            anchor: SleepAnchor::WakeAt(t(7, 0)),
            fall_asleep_minutes: 0,
        })
        .unwrap();
        assert_eq!(r.suggestions[0].time, t(22, 0));
    }

    #[test]
    fn absurd_offset_is_invalid() {
        let err = compute(&SleepInput {
            anchor: SleepAnchor::BedAt(t(23, 0)),
            fall_asleep_minutes: 600,
        })
        .unwrap_err();
        assert_eq!(err.field(), "fall_asleep_minutes");
    }

    #[test]
    fn summary_points_at_recommended_option() {
        let r = compute(&SleepInput::wake_at(t(7, 0))).unwrap();
        let out = CalculatorResult::from(&r);
        assert_eq!(out.value, 7.5);
        assert_eq!(out.category.as_deref(), Some("Go to bed at 23:15"));
        assert_eq!(out.details.len(), 4);
    }
}
