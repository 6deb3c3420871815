use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Plain-language patient guidance generated alongside a conduct block.
/// Section texts use `\n` paragraph breaks, `* `/`- ` list markers and
/// `*bold*` emphasis — the export crate turns these into HTML.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientHandoutData {
    pub storage_instructions: String,
    pub application_instructions: String,
    pub hypoglycemia_management: String,
    pub hyperglycemia_management: String,
    pub general_recommendations: String,
}
