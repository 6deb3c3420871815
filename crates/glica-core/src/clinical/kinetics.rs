//! Insulin activity projection for the 24-hour chart.
//!
//! This is display math, not pharmacokinetics: each dose becomes one
//! smooth quadratic Bézier arc over the baseline, tall enough to compare
//! doses visually. Peak height is normalized against the largest dose in
//! the set being plotted, so the same absolute dose can render at
//! different heights across reports — do not reuse these curves for any
//! quantitative purpose.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::patient::InsulinType;
use crate::models::report::RecommendedInsulin;

/// Chart height in visual units.
pub const CHART_HEIGHT: f64 = 100.0;
/// Baseline (zero activity) y coordinate, measured from the chart top.
pub const BASELINE_Y: f64 = 75.0;

/// Fixed onset/peak/duration profile for one insulin type, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionProfile {
    pub onset: f64,
    pub peak: f64,
    pub duration: f64,
}

impl InsulinType {
    pub fn action_profile(self) -> ActionProfile {
        match self {
            InsulinType::Nph => ActionProfile {
                onset: 2.0,
                peak: 6.0,
                duration: 16.0,
            },
            InsulinType::Regular => ActionProfile {
                onset: 0.5,
                peak: 2.5,
                duration: 5.0,
            },
        }
    }
}

/// One plottable quadratic Bézier segment: baseline at `start`, dips to
/// the control point, back to baseline at `end`. X is hours, y is visual
/// units from the chart top (smaller y = higher activity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurveSegment {
    pub insulin: InsulinType,
    pub start: (f64, f64),
    pub control: (f64, f64),
    pub end: (f64, f64),
    /// True for the copy shifted 24 h left when a dose spills past midnight.
    pub wrapped: bool,
}

/// Extract the first "HH:MM" group from a schedule string.
/// "Noite (22:00)" → 22.0; returns `None` when no such group exists.
pub fn schedule_time_hours(schedule: &str) -> Option<f64> {
    let bytes = schedule.as_bytes();
    for i in 0..bytes.len().saturating_sub(4) {
        let w = &bytes[i..i + 5];
        if w[0].is_ascii_digit()
            && w[1].is_ascii_digit()
            && w[2] == b':'
            && w[3].is_ascii_digit()
            && w[4].is_ascii_digit()
        {
            let hours = f64::from((w[0] - b'0') * 10 + (w[1] - b'0'));
            let minutes = f64::from((w[3] - b'0') * 10 + (w[4] - b'0'));
            return Some(hours + minutes / 60.0);
        }
    }
    None
}

/// Project recommended doses onto chart curves.
///
/// Zero-dose entries and schedules without a parseable time are dropped.
/// A dose whose action crosses midnight emits a second segment starting at
/// `time − 24` so the tail shows at the start of the visual range.
pub fn project(recommended: &[RecommendedInsulin]) -> Vec<CurveSegment> {
    let actions: Vec<(InsulinType, f64, f64)> = recommended
        .iter()
        .filter_map(|r| {
            let time = schedule_time_hours(&r.schedule)?;
            (r.dose > 0.0 && time >= 0.0).then_some((r.insulin, r.dose, time))
        })
        .collect();

    let max_dose = actions
        .iter()
        .map(|(_, dose, _)| *dose)
        .fold(1.0_f64, f64::max);

    let mut segments = Vec::new();
    for (insulin, dose, time) in actions {
        let profile = insulin.action_profile();
        let peak_height =
            CHART_HEIGHT * 0.6 * ((dose + 1.0).ln() / (max_dose + 1.0).ln());
        let peak_y = BASELINE_Y - peak_height;

        let curve_at = |start: f64, wrapped: bool| CurveSegment {
            insulin,
            start: (start, BASELINE_Y),
            control: (start + profile.peak, peak_y),
            end: (start + profile.duration, BASELINE_Y),
            wrapped,
        };

        segments.push(curve_at(time, false));
        if time + profile.duration > 24.0 {
            segments.push(curve_at(time - 24.0, true));
        }
    }

    segments
}
