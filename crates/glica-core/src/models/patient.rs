use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Label used in prompts and printable documents (pt-BR, the product language).
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "masculino",
            Sex::Female => "feminino",
        }
    }
}

/// How often the patient reports hypoglycemia episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HypoglycemiaFrequency {
    None,
    Rare,
    Frequent,
}

impl HypoglycemiaFrequency {
    pub fn label(self) -> &'static str {
        match self {
            HypoglycemiaFrequency::None => "nenhum",
            HypoglycemiaFrequency::Rare => "raro",
            HypoglycemiaFrequency::Frequent => "frequente",
        }
    }
}

/// A named meal time. Ids are stable and arbitrary — assigned by the form
/// layer, never derived from a clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Meal {
    pub id: u32,
    pub name: String,
    /// Time of day, "HH:MM" (24-hour).
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InsulinType {
    #[serde(rename = "NPH")]
    Nph,
    Regular,
}

impl InsulinType {
    pub fn label(self) -> &'static str {
        match self {
            InsulinType::Nph => "NPH",
            InsulinType::Regular => "Regular",
        }
    }
}

/// One row of the patient's current insulin regimen.
/// `insulin == None` means the patient uses no insulin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsulinDose {
    pub id: u32,
    pub insulin: Option<InsulinType>,
    pub dose: f64,
    pub schedule: String,
}

/// The full intake profile collected before the initial evaluation.
///
/// `bmi` and `egfr` are derived by the calculators in [`crate::clinical`]
/// and carried here so reports and prompts see exactly what the form showed.
/// Both are 0 when their inputs were invalid or skipped (fast mode).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientData {
    pub name: String,
    pub dob: Option<Date>,
    pub age: i16,
    pub sex: Sex,
    /// Weight in kg.
    pub weight: f64,
    /// Height in meters.
    pub height: f64,
    pub bmi: f64,
    pub is_frail: bool,
    pub comorbidities: Vec<String>,
    pub medications: Vec<String>,
    /// Serum creatinine, mg/dL.
    pub creatinine: f64,
    /// Estimated glomerular filtration rate, mL/min (CKD-EPI 2021).
    pub egfr: f64,
    /// Albuminuria, mg/g.
    pub albuminuria: f64,
    /// Glycated hemoglobin, %.
    pub hba1c: f64,
    /// Fasting glucose, mg/dL.
    pub fasting_glucose: f64,
    pub pre_prandial_glucose: f64,
    pub post_prandial_glucose: f64,
    /// Meals after which the post-prandial value was measured.
    /// Must reference ids in `meals`.
    pub post_prandial_meal_ids: Vec<u32>,
    pub hypoglycemia_episodes: HypoglycemiaFrequency,
    pub clinical_symptoms: Vec<String>,
    pub clinical_situation: Vec<String>,
    pub current_insulins: Vec<InsulinDose>,
    pub meals: Vec<Meal>,
}

impl PatientData {
    /// Intake validation: HbA1c and fasting glucose are mandatory, and
    /// post-prandial meal references must resolve. Blocks submission —
    /// nothing downstream runs on an invalid profile.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.hba1c <= 0.0 {
            return Err(CoreError::MissingField("hba1c".to_string()));
        }
        if self.fasting_glucose <= 0.0 {
            return Err(CoreError::MissingField("fasting_glucose".to_string()));
        }
        for id in &self.post_prandial_meal_ids {
            if !self.meals.iter().any(|m| m.id == *id) {
                return Err(CoreError::UnknownMealId(*id));
            }
        }
        Ok(())
    }

    /// Meals ordered by time of day. Times are "HH:MM", so lexicographic
    /// order is chronological order.
    pub fn sorted_meals(&self) -> Vec<Meal> {
        let mut meals = self.meals.clone();
        meals.sort_by(|a, b| a.time.cmp(&b.time));
        meals
    }

    pub fn meal_name(&self, id: u32) -> Option<&str> {
        self.meals
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
    }

    /// True when at least one regimen row carries an actual insulin.
    pub fn uses_insulin(&self) -> bool {
        self.current_insulins.iter().any(|i| i.insulin.is_some())
    }
}
