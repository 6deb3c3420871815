//! Demo history entry: an out-of-goal patient with cardinal symptoms, used
//! to exercise the history and follow-up flows on a fresh installation.

use jiff::Timestamp;
use jiff::civil::date;

use glica_core::models::history::HistoryEntry;
use glica_core::models::patient::{
    HypoglycemiaFrequency, InsulinDose, InsulinType, Meal, PatientData, Sex,
};
use glica_core::models::report::{
    Calculations, Conduct, RecommendedInsulin, ReportData,
};

pub fn demo_entry(saved_at: Timestamp) -> HistoryEntry {
    HistoryEntry {
        id: None,
        patient: PatientData {
            name: "Paciente Teste Fora da Meta".to_string(),
            dob: Some(date(1969, 1, 15)),
            age: 55,
            sex: Sex::Male,
            weight: 95.0,
            height: 1.75,
            bmi: 31.02,
            is_frail: false,
            comorbidities: vec![
                "HAS".to_string(),
                "Dislipidemia".to_string(),
                "Obesidade".to_string(),
            ],
            medications: vec!["Metformina".to_string(), "Losartana".to_string()],
            creatinine: 1.1,
            egfr: 75.0,
            albuminuria: 50.0,
            hba1c: 9.8,
            fasting_glucose: 240.0,
            pre_prandial_glucose: 260.0,
            post_prandial_glucose: 310.0,
            post_prandial_meal_ids: vec![2],
            hypoglycemia_episodes: HypoglycemiaFrequency::Rare,
            clinical_symptoms: vec!["Poliúria".to_string(), "Perda Ponderal".to_string()],
            clinical_situation: Vec::new(),
            current_insulins: vec![InsulinDose {
                id: 1,
                insulin: None,
                dose: 0.0,
                schedule: String::new(),
            }],
            meals: vec![
                Meal {
                    id: 1,
                    name: "Café da Manhã".to_string(),
                    time: "07:00".to_string(),
                },
                Meal {
                    id: 2,
                    name: "Almoço".to_string(),
                    time: "12:00".to_string(),
                },
                Meal {
                    id: 3,
                    name: "Jantar".to_string(),
                    time: "19:00".to_string(),
                },
            ],
        },
        report: ReportData {
            goal_classification: "Paciente significativamente FORA DA META glicêmica."
                .to_string(),
            clinical_summary: "Paciente de 55 anos, com DM2, obesidade e HAS, \
                               apresentando mau controle glicêmico (HbA1c 9.8%) e \
                               sintomas cardinais, indicando necessidade de \
                               insulinoterapia."
                .to_string(),
            calculations: Calculations {
                target_hba1c: "< 7.0%".to_string(),
                nph_initial_dose: "0.2 U/kg -> 19U de NPH ao deitar.".to_string(),
                nph_adjustment: "Ajustar +2U a cada 3-7 dias se GJ > 130 mg/dL."
                    .to_string(),
                regular_initial_dose: "Considerar se glicemia pós-prandial persistir \
                                       elevada após otimização da basal."
                    .to_string(),
            },
            final_conduct: Conduct {
                recommended_insulins: vec![RecommendedInsulin {
                    insulin: InsulinType::Nph,
                    dose: 19.0,
                    schedule: "Noite (22:00)".to_string(),
                }],
                nph_dose_text: "19 unidades de NPH ao deitar (22:00).".to_string(),
                regular_dose_plan_text: "Não indicada no momento. Reavaliar após \
                                         ajuste da insulina basal."
                    .to_string(),
                ado_management: "Manter Metformina. Suspender sulfonilureia, se em uso."
                    .to_string(),
            },
            identified_risks: vec![
                "Risco de hipoglicemia noturna (monitorar)".to_string(),
            ],
            complementary_conducts: vec![
                "Educação em diabetes".to_string(),
                "Monitorização da glicemia capilar (jejum)".to_string(),
            ],
            follow_up_plan: "Reavaliar em 7 a 14 dias para ajuste de dose.".to_string(),
            guideline_reference: "Diretriz SBD 2024: Pacientes com HbA1c > 9% e \
                                  sintomas catabólicos devem iniciar insulinoterapia."
                .to_string(),
        },
        saved_at,
        adjustments: Vec::new(),
    }
}
