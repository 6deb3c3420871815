//! Integration tests for the history store.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment plus a scratch bucket named in `GLICA_TEST_BUCKET`.
//!
//! Run with: `cargo test -p glica-storage --test history -- --ignored`

use uuid::Uuid;

use glica_core::models::adjustment::{Adjustment, AdjustmentReportData};
use glica_core::models::follow_up::FollowUpData;
use glica_core::models::history::HistoryEntry;
use glica_core::models::patient::{HypoglycemiaFrequency, PatientData, Sex};
use glica_core::models::report::{Calculations, Conduct, ReportData};
use glica_storage::history::HistoryStore;

async fn build_store() -> HistoryStore {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await;
    let bucket =
        std::env::var("GLICA_TEST_BUCKET").expect("GLICA_TEST_BUCKET must name a scratch bucket");
    HistoryStore::new(aws_sdk_s3::Client::new(&config), bucket)
}

fn sample_entry(name: &str) -> HistoryEntry {
    HistoryEntry {
        id: None,
        patient: PatientData {
            name: name.to_string(),
            dob: None,
            age: 55,
            sex: Sex::Male,
            weight: 95.0,
            height: 1.75,
            bmi: 95.0 / (1.75 * 1.75),
            is_frail: false,
            comorbidities: vec!["HAS".to_string()],
            medications: vec!["Metformina".to_string()],
            creatinine: 1.1,
            egfr: 75.0,
            albuminuria: 50.0,
            hba1c: 9.8,
            fasting_glucose: 240.0,
            pre_prandial_glucose: 260.0,
            post_prandial_glucose: 310.0,
            post_prandial_meal_ids: Vec::new(),
            hypoglycemia_episodes: HypoglycemiaFrequency::Rare,
            clinical_symptoms: vec!["Poliúria".to_string()],
            clinical_situation: Vec::new(),
            current_insulins: Vec::new(),
            meals: Vec::new(),
        },
        report: ReportData {
            clinical_summary: "Paciente fora da meta.".to_string(),
            goal_classification: "FORA DA META".to_string(),
            calculations: Calculations {
                target_hba1c: "< 7.0%".to_string(),
                nph_initial_dose: "19U".to_string(),
                nph_adjustment: "+2U se GJ > 130".to_string(),
                regular_initial_dose: "N/A".to_string(),
            },
            final_conduct: Conduct {
                recommended_insulins: Vec::new(),
                nph_dose_text: "19U ao deitar".to_string(),
                regular_dose_plan_text: "Não indicada.".to_string(),
                ado_management: "Manter Metformina.".to_string(),
            },
            identified_risks: Vec::new(),
            complementary_conducts: Vec::new(),
            follow_up_plan: "Reavaliar em 7 dias.".to_string(),
            guideline_reference: "SBD 2024".to_string(),
        },
        saved_at: jiff::Timestamp::now(),
        adjustments: Vec::new(),
    }
}

fn sample_adjustment() -> Adjustment {
    Adjustment {
        adjusted_at: jiff::Timestamp::now(),
        adjustment_report: AdjustmentReportData {
            goal_classification: "FORA DA META".to_string(),
            situation_analysis: "Jejum ainda elevado.".to_string(),
            adjusted_conduct: Conduct {
                recommended_insulins: Vec::new(),
                nph_dose_text: "21U ao deitar".to_string(),
                regular_dose_plan_text: "Não indicada.".to_string(),
                ado_management: "Manter Metformina.".to_string(),
            },
            monitoring_plan: "Glicemia de jejum diária.".to_string(),
            next_goals: "GJ 80-130 mg/dL".to_string(),
        },
        follow_up_data: FollowUpData {
            current_fasting_glucose: 180.0,
            current_hba1c: 0.0,
            current_pre_prandial_glucose: 0.0,
            current_post_prandial_glucose: 0.0,
            current_weight: 94.0,
            high_glucose_meals: Vec::new(),
            hyperglycemia_events: Vec::new(),
            new_hypoglycemia_episodes: None,
            hypoglycemia_timings: Vec::new(),
            patient_notes: String::new(),
        },
    }
}

/// Insert → list round-trip: content identical, id assigned by the store.
#[tokio::test]
#[ignore]
async fn insert_then_list_round_trips() {
    let store = build_store().await;
    let name = format!("rt-{}", Uuid::new_v4());
    let entry = sample_entry(&name);

    let id = store.insert(&entry).await.expect("insert should succeed");

    let listed = store.list_recent(50).await.expect("list should succeed");
    let found = listed
        .iter()
        .find(|e| e.id == Some(id))
        .expect("inserted entry should be listed");

    assert_eq!(found.patient.name, name);
    assert_eq!(found.patient.hba1c, entry.patient.hba1c);
    assert_eq!(
        found.report.final_conduct.nph_dose_text,
        entry.report.final_conduct.nph_dose_text
    );
    assert!(found.adjustments.is_empty());

    store.delete(id).await.expect("cleanup delete");
}

/// Appending grows the adjustment array by exactly one, preserving priors.
#[tokio::test]
#[ignore]
async fn append_adjustment_preserves_prior_adjustments() {
    let store = build_store().await;
    let id = store
        .insert(&sample_entry(&format!("adj-{}", Uuid::new_v4())))
        .await
        .expect("insert should succeed");

    store
        .append_adjustment(id, &sample_adjustment())
        .await
        .expect("first append");
    let mut second = sample_adjustment();
    second.adjustment_report.adjusted_conduct.nph_dose_text = "23U ao deitar".to_string();
    store
        .append_adjustment(id, &second)
        .await
        .expect("second append");

    let listed = store.list_recent(50).await.expect("list should succeed");
    let found = listed.iter().find(|e| e.id == Some(id)).expect("entry");
    assert_eq!(found.adjustments.len(), 2);
    assert_eq!(
        found.adjustments[0].adjustment_report.adjusted_conduct.nph_dose_text,
        "21U ao deitar"
    );
    assert_eq!(
        found.adjustments[1].adjustment_report.adjusted_conduct.nph_dose_text,
        "23U ao deitar"
    );

    store.delete(id).await.expect("cleanup delete");
}

/// The duplicate-name guard sees saved entries and nothing else.
#[tokio::test]
#[ignore]
async fn exists_by_patient_name_is_exact() {
    let store = build_store().await;
    let name = format!("dup-{}", Uuid::new_v4());
    let id = store
        .insert(&sample_entry(&name))
        .await
        .expect("insert should succeed");

    assert!(store.exists_by_patient_name(&name).await.expect("exists"));
    assert!(
        !store
            .exists_by_patient_name(&format!("{name}-other"))
            .await
            .expect("exists")
    );

    store.delete(id).await.expect("cleanup delete");
    assert!(!store.exists_by_patient_name(&name).await.expect("exists"));
}
