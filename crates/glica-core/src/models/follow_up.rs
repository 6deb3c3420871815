use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::patient::HypoglycemiaFrequency;
use crate::error::CoreError;

/// A discrete hyperglycemia reading reported at reassessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HyperglycemiaEvent {
    pub id: u32,
    /// Time of day, "HH:MM".
    pub time: String,
    /// Capillary glucose, mg/dL.
    pub value: f64,
}

/// Reassessment input collected before generating an adjustment plan.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowUpData {
    pub current_fasting_glucose: f64,
    pub current_hba1c: f64,
    pub current_pre_prandial_glucose: f64,
    pub current_post_prandial_glucose: f64,
    /// Updated weight in kg — dose recalculations use this, not the intake weight.
    pub current_weight: f64,
    /// Ids of meals with persistent post-prandial hyperglycemia.
    pub high_glucose_meals: Vec<u32>,
    pub hyperglycemia_events: Vec<HyperglycemiaEvent>,
    /// `None` means hypoglycemia was not assessed this cycle.
    pub new_hypoglycemia_episodes: Option<HypoglycemiaFrequency>,
    pub hypoglycemia_timings: Vec<String>,
    pub patient_notes: String,
}

impl FollowUpData {
    /// Reassessment validation: the updated weight is mandatory, and at
    /// least one of fasting glucose / HbA1c must have been measured.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.current_weight <= 0.0 {
            return Err(CoreError::MissingField("current_weight".to_string()));
        }
        if self.current_fasting_glucose <= 0.0 && self.current_hba1c <= 0.0 {
            return Err(CoreError::MissingField(
                "current_fasting_glucose or current_hba1c".to_string(),
            ));
        }
        Ok(())
    }
}
