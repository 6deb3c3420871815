use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::follow_up::FollowUpData;
use super::report::Conduct;

/// The report produced for one follow-up cycle. Structurally parallel to
/// the initial report, but scoped to the adjustment being made.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentReportData {
    /// "DENTRO DA META" / "FORA DA META" — reused as context by the next cycle.
    pub goal_classification: String,
    pub situation_analysis: String,
    pub adjusted_conduct: Conduct,
    pub monitoring_plan: String,
    pub next_goals: String,
}

/// A timestamped follow-up bundle. Adjustments accumulate append-only
/// under a history entry; none is ever edited or replaced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Adjustment {
    pub adjusted_at: jiff::Timestamp,
    pub adjustment_report: AdjustmentReportData,
    pub follow_up_data: FollowUpData,
}
