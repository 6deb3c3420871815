use jiff::civil::date;
use uuid::Uuid;

use glica_core::error::CoreError;
use glica_core::models::adjustment::{Adjustment, AdjustmentReportData};
use glica_core::models::follow_up::FollowUpData;
use glica_core::models::history::HistoryEntry;
use glica_core::models::patient::{
    HypoglycemiaFrequency, InsulinDose, InsulinType, Meal, PatientData, Sex,
};
use glica_core::models::report::{Calculations, Conduct, ReportData};

fn meal(id: u32, name: &str, time: &str) -> Meal {
    Meal {
        id,
        name: name.to_string(),
        time: time.to_string(),
    }
}

fn patient() -> PatientData {
    PatientData {
        name: "Maria".to_string(),
        dob: Some(date(1964, 3, 2)),
        age: 60,
        sex: Sex::Female,
        weight: 70.0,
        height: 1.6,
        bmi: 70.0 / (1.6 * 1.6),
        is_frail: false,
        comorbidities: vec!["HAS".to_string()],
        medications: vec!["Metformina".to_string()],
        creatinine: 0.8,
        egfr: 84.3,
        albuminuria: 10.0,
        hba1c: 9.8,
        fasting_glucose: 220.0,
        pre_prandial_glucose: 0.0,
        post_prandial_glucose: 250.0,
        post_prandial_meal_ids: vec![2],
        hypoglycemia_episodes: HypoglycemiaFrequency::Rare,
        clinical_symptoms: vec!["Poliúria".to_string()],
        clinical_situation: Vec::new(),
        current_insulins: vec![InsulinDose {
            id: 1,
            insulin: None,
            dose: 0.0,
            schedule: String::new(),
        }],
        meals: vec![
            meal(2, "Almoço", "12:00"),
            meal(1, "Café da Manhã", "07:00"),
            meal(3, "Jantar", "19:00"),
        ],
    }
}

fn conduct(nph_text: &str) -> Conduct {
    Conduct {
        recommended_insulins: Vec::new(),
        nph_dose_text: nph_text.to_string(),
        regular_dose_plan_text: "Não indicada.".to_string(),
        ado_management: "Manter Metformina.".to_string(),
    }
}

fn report() -> ReportData {
    ReportData {
        clinical_summary: "resumo".to_string(),
        goal_classification: "FORA DA META".to_string(),
        calculations: Calculations {
            target_hba1c: "< 7.0%".to_string(),
            nph_initial_dose: "14U".to_string(),
            nph_adjustment: "+2U".to_string(),
            regular_initial_dose: "N/A".to_string(),
        },
        final_conduct: conduct("14U ao deitar"),
        identified_risks: Vec::new(),
        complementary_conducts: Vec::new(),
        follow_up_plan: "Reavaliar em 7 dias.".to_string(),
        guideline_reference: "SBD 2024".to_string(),
    }
}

fn follow_up() -> FollowUpData {
    FollowUpData {
        current_fasting_glucose: 150.0,
        current_hba1c: 8.2,
        current_pre_prandial_glucose: 0.0,
        current_post_prandial_glucose: 0.0,
        current_weight: 68.0,
        high_glucose_meals: Vec::new(),
        hyperglycemia_events: Vec::new(),
        new_hypoglycemia_episodes: None,
        hypoglycemia_timings: Vec::new(),
        patient_notes: String::new(),
    }
}

fn adjustment(nph_text: &str) -> Adjustment {
    Adjustment {
        adjusted_at: jiff::Timestamp::UNIX_EPOCH,
        adjustment_report: AdjustmentReportData {
            goal_classification: "FORA DA META".to_string(),
            situation_analysis: "análise".to_string(),
            adjusted_conduct: conduct(nph_text),
            monitoring_plan: "monitorar jejum".to_string(),
            next_goals: "GJ 80-130".to_string(),
        },
        follow_up_data: follow_up(),
    }
}

#[test]
fn intake_validation_requires_hba1c_and_fasting_glucose() {
    assert!(patient().validate().is_ok());

    let mut p = patient();
    p.hba1c = 0.0;
    assert!(matches!(p.validate(), Err(CoreError::MissingField(f)) if f == "hba1c"));

    let mut p = patient();
    p.fasting_glucose = 0.0;
    assert!(matches!(
        p.validate(),
        Err(CoreError::MissingField(f)) if f == "fasting_glucose"
    ));
}

#[test]
fn intake_validation_rejects_dangling_meal_reference() {
    let mut p = patient();
    p.post_prandial_meal_ids = vec![99];
    assert!(matches!(p.validate(), Err(CoreError::UnknownMealId(99))));
}

#[test]
fn meals_sort_by_time_of_day_not_by_id() {
    let names: Vec<String> = patient()
        .sorted_meals()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, ["Café da Manhã", "Almoço", "Jantar"]);
}

#[test]
fn uses_insulin_ignores_empty_regimen_rows() {
    let mut p = patient();
    assert!(!p.uses_insulin());
    p.current_insulins.push(InsulinDose {
        id: 2,
        insulin: Some(InsulinType::Nph),
        dose: 10.0,
        schedule: "22:00".to_string(),
    });
    assert!(p.uses_insulin());
}

#[test]
fn follow_up_validation_requires_weight_and_one_glycemic_value() {
    assert!(follow_up().validate().is_ok());

    let mut f = follow_up();
    f.current_weight = 0.0;
    assert!(f.validate().is_err());

    let mut f = follow_up();
    f.current_fasting_glucose = 0.0;
    f.current_hba1c = 0.0;
    assert!(f.validate().is_err());

    // Either measurement alone is enough.
    let mut f = follow_up();
    f.current_fasting_glucose = 0.0;
    assert!(f.validate().is_ok());
}

#[test]
fn latest_conduct_prefers_the_last_adjustment() {
    let mut entry = HistoryEntry {
        id: Some(Uuid::new_v4()),
        patient: patient(),
        report: report(),
        saved_at: jiff::Timestamp::UNIX_EPOCH,
        adjustments: Vec::new(),
    };
    assert_eq!(entry.latest_conduct().nph_dose_text, "14U ao deitar");

    entry.adjustments.push(adjustment("16U ao deitar"));
    entry.adjustments.push(adjustment("18U ao deitar"));
    assert_eq!(entry.latest_conduct().nph_dose_text, "18U ao deitar");
}

#[test]
fn history_entry_round_trips_without_an_id() {
    let entry = HistoryEntry {
        id: None,
        patient: patient(),
        report: report(),
        saved_at: jiff::Timestamp::UNIX_EPOCH,
        adjustments: vec![adjustment("16U ao deitar")],
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert!(json.get("id").is_none(), "unsaved entry must not serialize an id");
    let back: HistoryEntry = serde_json::from_value(json).unwrap();
    assert!(back.id.is_none());
    assert_eq!(back.patient.name, "Maria");
    assert_eq!(back.adjustments.len(), 1);
    assert_eq!(
        back.adjustments[0].adjustment_report.adjusted_conduct.nph_dose_text,
        "16U ao deitar"
    );
}

#[test]
fn alert_recognition_is_centralized() {
    let mut r = report();
    assert!(!r.is_alert());
    r.goal_classification =
        glica_core::models::report::ALERT_GOAL_CLASSIFICATION.to_string();
    assert!(r.is_alert());
}
