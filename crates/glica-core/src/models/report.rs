use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::patient::InsulinType;

/// Goal classification carried by the fixed "insulin not indicated" report.
///
/// New triage results are tagged ([`crate::clinical::indication::Triage`]);
/// this constant exists only so entries deserialized from the store can be
/// recognized in one place instead of by scattered string comparisons.
pub const ALERT_GOAL_CLASSIFICATION: &str = "Insulinoterapia Não Indicada no Momento";

/// One recommended insulin application, structured for the kinetics chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecommendedInsulin {
    pub insulin: InsulinType,
    /// Dose in units, non-negative.
    pub dose: f64,
    /// Application time, possibly annotated with a meal name.
    /// Ex: "Manhã (07:00)", "Almoço (12:30)", "Noite (22:00)".
    pub schedule: String,
}

/// Dose-calculation rationale strings produced by the reasoning service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Calculations {
    pub target_hba1c: String,
    pub nph_initial_dose: String,
    pub nph_adjustment: String,
    pub regular_initial_dose: String,
}

/// A therapeutic conduct block. Shared between the initial report
/// (`final_conduct`) and follow-up adjustments (`adjusted_conduct`).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Conduct {
    pub recommended_insulins: Vec<RecommendedInsulin>,
    pub nph_dose_text: String,
    pub regular_dose_plan_text: String,
    pub ado_management: String,
}

/// The full initial clinical report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportData {
    pub clinical_summary: String,
    pub goal_classification: String,
    pub calculations: Calculations,
    pub final_conduct: Conduct,
    pub identified_risks: Vec<String>,
    pub complementary_conducts: Vec<String>,
    pub follow_up_plan: String,
    pub guideline_reference: String,
}

impl ReportData {
    /// Whether this report is the fixed "insulin not indicated" alert.
    /// Only meaningful for reports loaded from history; fresh triage
    /// results carry an explicit tag instead.
    pub fn is_alert(&self) -> bool {
        self.goal_classification == ALERT_GOAL_CLASSIFICATION
    }
}
