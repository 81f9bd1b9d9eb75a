//! Hormone curve synthesizer.
//!
//! Produces illustrative per-day estrogen, progesterone and LH levels for one
//! cycle. The curves are simple parametric waves, one formula set per
//! [`HealthCondition`], then scaled per [`ExerciseLevel`]. The coefficients
//! below are the contract; they are not a physiological model.

use crate::landmarks::{FertileWindow, LUTEAL_PHASE_DAYS};
use crate::{CycleInput, ExerciseLevel, HealthCondition, Hormone};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Base trigonometric function of a waveform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Sin,
    Cos,
}

/// `shape((day - phase) / cycle_length * 2pi) * amplitude + baseline`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waveform {
    pub shape: Shape,
    pub phase: f64,
    pub amplitude: f64,
    pub baseline: f64,
}

impl Waveform {
    const fn new(shape: Shape, phase: f64, amplitude: f64, baseline: f64) -> Self {
        Self {
            shape,
            phase,
            amplitude,
            baseline,
        }
    }

    /// Level on a 1-based cycle day
    pub fn sample(&self, day: u32, cycle_length: u32) -> f64 {
        let angle = (f64::from(day) - self.phase) / f64::from(cycle_length) * TAU;
        let wave = match self.shape {
            Shape::Sin => angle.sin(),
            Shape::Cos => angle.cos(),
        };
        wave * self.amplitude + self.baseline
    }
}

/// One waveform per hormone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformSet {
    pub estrogen: Waveform,
    pub progesterone: Waveform,
    pub lh: Waveform,
}

/// Multipliers applied after the base waves are generated
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaling {
    pub estrogen: f64,
    pub progesterone: f64,
    pub lh: f64,
}

impl HealthCondition {
    /// Waveform formulas for this condition
    pub fn waveforms(&self) -> WaveformSet {
        use Shape::{Cos, Sin};
        match self {
            HealthCondition::Normal => WaveformSet {
                estrogen: Waveform::new(Cos, 14.0, 0.7, 0.5),
                progesterone: Waveform::new(Sin, 14.0, 0.7, 0.5),
                lh: Waveform::new(Cos, 12.0, 0.5, 0.5),
            },
            HealthCondition::Pcos => WaveformSet {
                estrogen: Waveform::new(Sin, 14.0, 0.6, 0.4),
                progesterone: Waveform::new(Cos, 16.0, 0.6, 0.4),
                lh: Waveform::new(Sin, 18.0, 0.5, 0.6),
            },
            HealthCondition::ThyroidIssues => WaveformSet {
                estrogen: Waveform::new(Cos, 14.0, 0.8, 0.6),
                progesterone: Waveform::new(Sin, 15.0, 0.8, 0.5),
                lh: Waveform::new(Cos, 12.0, 0.6, 0.4),
            },
        }
    }
}

impl ExerciseLevel {
    /// Per-hormone multipliers for this level
    pub fn scaling(&self) -> Scaling {
        match self {
            ExerciseLevel::VeryActive => Scaling {
                estrogen: 0.8,
                progesterone: 0.9,
                lh: 0.7,
            },
            ExerciseLevel::Normal => Scaling {
                estrogen: 1.0,
                progesterone: 1.0,
                lh: 1.0,
            },
            ExerciseLevel::Sedentary => Scaling {
                estrogen: 1.2,
                progesterone: 1.1,
                lh: 1.1,
            },
        }
    }
}

/// Hormone levels for a single cycle day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct HormoneSample {
    /// 1-based cycle day
    pub day: u32,
    pub estrogen: f64,
    pub progesterone: f64,
    pub lh: f64,
}

impl HormoneSample {
    pub fn level(&self, hormone: Hormone) -> f64 {
        match hormone {
            Hormone::Estrogen => self.estrogen,
            Hormone::Progesterone => self.progesterone,
            Hormone::Lh => self.lh,
        }
    }
}

/// Inclusive range of 1-based cycle days; may extend past the cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRange {
    pub start: i64,
    pub end: i64,
}

impl DayRange {
    pub fn contains(&self, day: i64) -> bool {
        self.start <= day && day <= self.end
    }
}

/// A renderable hormone series with overlay annotations
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HormoneSeries {
    pub health_condition: HealthCondition,
    pub exercise_level: ExerciseLevel,
    /// One entry per day `1..=cycle_length`, in order
    pub samples: Vec<HormoneSample>,
    /// Zero-based days from start to ovulation; negative for very short cycles
    pub ovulation_day_offset: i64,
    /// Fertile windows as day ranges, not clamped to the cycle
    pub fertile_ranges: Vec<DayRange>,
}

impl HormoneSeries {
    /// Ovulation on the 1-based day axis used by overlays
    pub fn ovulation_day(&self) -> i64 {
        self.ovulation_day_offset + 1
    }

    pub fn sample(&self, day: u32) -> Option<&HormoneSample> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.samples.get(index)
    }

    pub fn is_fertile_day(&self, day: i64) -> bool {
        self.fertile_ranges.iter().any(|range| range.contains(day))
    }

    /// Highest sample for a hormone, earliest day on ties
    pub fn peak(&self, hormone: Hormone) -> Option<&HormoneSample> {
        self.samples.iter().fold(None, |best, sample| match best {
            Some(b) if b.level(hormone) >= sample.level(hormone) => Some(b),
            _ => Some(sample),
        })
    }

    /// Legend text, e.g. "Estrogen (PCOS, Very Active)"
    pub fn legend(&self, hormone: Hormone) -> String {
        format!(
            "{} ({}, {})",
            hormone, self.health_condition, self.exercise_level
        )
    }
}

/// Synthesize the hormone series for one cycle
///
/// `fertile_windows` are only used for overlay annotations and are converted
/// to 1-based day indices relative to the cycle start without clamping.
pub fn synthesize(
    input: &CycleInput,
    fertile_windows: &[FertileWindow],
    health_condition: HealthCondition,
    exercise_level: ExerciseLevel,
) -> HormoneSeries {
    let cycle_length = input.cycle_length();
    let waves = health_condition.waveforms();
    let scale = exercise_level.scaling();

    let samples: Vec<HormoneSample> = (1..=cycle_length)
        .map(|day| HormoneSample {
            day,
            estrogen: waves.estrogen.sample(day, cycle_length) * scale.estrogen,
            progesterone: waves.progesterone.sample(day, cycle_length) * scale.progesterone,
            lh: waves.lh.sample(day, cycle_length) * scale.lh,
        })
        .collect();

    let start = input.start_date();
    let fertile_ranges = fertile_windows
        .iter()
        .map(|window| DayRange {
            start: (window.start - start).num_days() + 1,
            end: (window.end - start).num_days() + 1,
        })
        .collect();

    tracing::debug!(
        "Synthesized {} hormone samples ({}, {})",
        samples.len(),
        health_condition,
        exercise_level
    );

    HormoneSeries {
        health_condition,
        exercise_level,
        samples,
        ovulation_day_offset: i64::from(cycle_length) - LUTEAL_PHASE_DAYS,
        fertile_ranges,
    }
}
