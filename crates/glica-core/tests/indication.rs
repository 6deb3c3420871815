use glica_core::clinical::indication::{Triage, is_on_oral_agent, triage};
use glica_core::models::patient::{
    HypoglycemiaFrequency, Meal, PatientData, Sex,
};
use glica_core::models::report::ALERT_GOAL_CLASSIFICATION;

fn patient(hba1c: f64, medications: &[&str], symptoms: &[&str]) -> PatientData {
    PatientData {
        name: "Paciente Teste".to_string(),
        dob: None,
        age: 55,
        sex: Sex::Male,
        weight: 80.0,
        height: 1.7,
        bmi: 80.0 / (1.7 * 1.7),
        is_frail: false,
        comorbidities: Vec::new(),
        medications: medications.iter().map(|m| m.to_string()).collect(),
        creatinine: 1.0,
        egfr: 80.0,
        albuminuria: 0.0,
        hba1c,
        fasting_glucose: 150.0,
        pre_prandial_glucose: 0.0,
        post_prandial_glucose: 0.0,
        post_prandial_meal_ids: Vec::new(),
        hypoglycemia_episodes: HypoglycemiaFrequency::None,
        clinical_symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        clinical_situation: Vec::new(),
        current_insulins: Vec::new(),
        meals: vec![Meal {
            id: 1,
            name: "Almoço".to_string(),
            time: "12:00".to_string(),
        }],
    }
}

fn is_alert(t: &Triage) -> bool {
    matches!(t, Triage::OralTherapy { .. })
}

#[test]
fn low_hba1c_without_symptoms_bypasses_insulin_regardless_of_medications() {
    assert!(is_alert(&triage(&patient(7.0, &[], &[]), false)));
    assert!(is_alert(&triage(&patient(7.0, &["Metformina"], &[]), false)));
}

#[test]
fn mid_range_on_oral_agent_proceeds() {
    // 7.5 ≤ 8.0 ≤ 9.0 but the patient is already on an ADO, and 8.0 is not
    // below 7.5 — both alert branches fail.
    let t = triage(&patient(8.0, &["Metformina"], &[]), false);
    assert!(matches!(t, Triage::Insulin));
}

#[test]
fn mid_range_without_oral_agent_alerts() {
    assert!(is_alert(&triage(&patient(8.0, &[], &[]), false)));
}

#[test]
fn boundary_hba1c_9_on_oral_agent_proceeds() {
    // Literal boundary of the compound condition, kept on purpose.
    let t = triage(&patient(9.0, &["Gliclazida"], &[]), false);
    assert!(matches!(t, Triage::Insulin));
}

#[test]
fn boundary_hba1c_9_without_oral_agent_alerts() {
    assert!(is_alert(&triage(&patient(9.0, &[], &[]), false)));
}

#[test]
fn high_hba1c_proceeds() {
    let t = triage(&patient(9.5, &[], &["Poliúria"]), false);
    assert!(matches!(t, Triage::Insulin));
    let t = triage(&patient(9.5, &[], &[]), false);
    assert!(matches!(t, Triage::Insulin));
}

#[test]
fn any_symptom_proceeds_even_at_low_hba1c() {
    let t = triage(&patient(7.0, &[], &["Polidipsia"]), false);
    assert!(matches!(t, Triage::Insulin));
}

#[test]
fn fast_mode_skips_the_gate_entirely() {
    let t = triage(&patient(6.0, &[], &[]), true);
    assert!(matches!(t, Triage::Insulin));
}

#[test]
fn alert_report_carries_the_fixed_template() {
    let Triage::OralTherapy { report } = triage(&patient(7.2, &[], &[]), false)
    else {
        panic!("expected the oral-therapy alert");
    };
    assert_eq!(report.goal_classification, ALERT_GOAL_CLASSIFICATION);
    assert!(report.is_alert());
    assert!(report.clinical_summary.contains("7.2%"));
    assert!(report.final_conduct.recommended_insulins.is_empty());
    assert_eq!(report.calculations.target_hba1c, "N/A");
    assert_eq!(report.final_conduct.ado_management, "Otimizar terapia oral.");
}

#[test]
fn oral_agent_membership_is_exact_match() {
    assert!(is_on_oral_agent(&["Metformina".to_string()]));
    assert!(is_on_oral_agent(&[
        "Losartana".to_string(),
        "Outro ADO".to_string()
    ]));
    assert!(!is_on_oral_agent(&["Losartana".to_string()]));
    assert!(!is_on_oral_agent(&["metformina".to_string()]));
    assert!(!is_on_oral_agent(&[]));
}
