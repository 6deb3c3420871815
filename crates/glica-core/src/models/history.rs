use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::adjustment::Adjustment;
use super::patient::PatientData;
use super::report::{Conduct, ReportData};

/// One saved evaluation plus its follow-up trail.
///
/// Created once on explicit save; after that the only mutations are atomic
/// appends to `adjustments` and whole-entry deletion. `id` is assigned by
/// the document store on insert.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryEntry {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,
    pub patient: PatientData,
    pub report: ReportData,
    pub saved_at: jiff::Timestamp,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl HistoryEntry {
    /// The conduct currently in effect: the last adjustment's, or the
    /// initial report's when no adjustment was made yet.
    pub fn latest_conduct(&self) -> &Conduct {
        self.adjustments
            .last()
            .map(|a| &a.adjustment_report.adjusted_conduct)
            .unwrap_or(&self.report.final_conduct)
    }
}
