//! Insulin indication gate.
//!
//! Decides, before any reasoning-service call, whether the patient should
//! stay on (or start) oral therapy instead of insulin. This is the one
//! piece of branching business logic evaluated locally; the thresholds
//! come from the SBD 2024 / PCDT DM2-SUS guidance and must not drift.

use crate::models::patient::PatientData;
use crate::models::report::{
    ALERT_GOAL_CLASSIFICATION, Calculations, Conduct, ReportData,
};

/// Oral antidiabetic agents recognized by the gate. Membership is an exact
/// match against the patient's medication list.
pub const ORAL_AGENTS: [&str; 5] = [
    "Metformina",
    "Gliclazida",
    "Glibenclamida",
    "Dapagliflozina",
    "Outro ADO",
];

/// Gate outcome, tagged at the point of generation so no caller ever has
/// to re-inspect report text to know which path was taken.
#[derive(Debug, Clone)]
pub enum Triage {
    /// Insulin is not indicated — the fixed alert report stands in for the
    /// reasoning service, which is not called.
    OralTherapy { report: ReportData },
    /// Proceed to the reasoning service.
    Insulin,
}

pub fn is_on_oral_agent(medications: &[String]) -> bool {
    medications
        .iter()
        .any(|m| ORAL_AGENTS.contains(&m.as_str()))
}

/// Evaluate the gate. Skipped entirely in fast mode — the caller has
/// asserted oral therapy already failed.
///
/// Insulin is bypassed when the patient is asymptomatic AND either
/// HbA1c < 7.5, or HbA1c ≤ 9.0 without an oral agent on board. At exactly
/// HbA1c = 9.0 on an oral agent the gate proceeds to the reasoning
/// service — a literal boundary of the compound condition, kept as is.
pub fn triage(patient: &PatientData, fast_mode: bool) -> Triage {
    if fast_mode {
        return Triage::Insulin;
    }

    let on_oral_agent = is_on_oral_agent(&patient.medications);
    let oral_range =
        patient.hba1c < 7.5 || (!on_oral_agent && patient.hba1c <= 9.0);

    if oral_range && patient.clinical_symptoms.is_empty() {
        Triage::OralTherapy {
            report: oral_therapy_report(patient.hba1c),
        }
    } else {
        Triage::Insulin
    }
}

/// The fixed "insulin not indicated" report. Textual content is part of
/// the product contract — the UI renders it as a regular report with the
/// conduct and chart sections suppressed.
fn oral_therapy_report(hba1c: f64) -> ReportData {
    ReportData {
        goal_classification: ALERT_GOAL_CLASSIFICATION.to_string(),
        clinical_summary: format!(
            "Paciente com HbA1c de {hba1c}%. Com base nos dados fornecidos e nas \
             diretrizes atuais, a insulinoterapia não é a primeira linha de tratamento."
        ),
        calculations: Calculations {
            target_hba1c: "N/A".to_string(),
            nph_initial_dose: "N/A".to_string(),
            nph_adjustment: "N/A".to_string(),
            regular_initial_dose: "N/A".to_string(),
        },
        final_conduct: Conduct {
            recommended_insulins: Vec::new(),
            nph_dose_text: "Não aplicável.".to_string(),
            regular_dose_plan_text: "Não aplicável.".to_string(),
            ado_management: "Otimizar terapia oral.".to_string(),
        },
        identified_risks: vec![
            "Iniciar insulina neste momento pode ser inadequado e não segue as \
             diretrizes para este perfil de paciente."
                .to_string(),
        ],
        complementary_conducts: vec![
            "Recomenda-se iniciar ou otimizar a terapia com antidiabéticos orais.".to_string(),
            "A combinação de Metformina com outro antidiabético oral (ex: Sulfonilureia, \
             iSGLT2) deve ser tentada por pelo menos 3 meses antes de reavaliar a \
             necessidade de insulina, salvo contraindicações."
                .to_string(),
            "Focar em mudanças de estilo de vida: dieta e atividade física.".to_string(),
        ],
        follow_up_plan: "Reavaliar o controle glicêmico em 3 meses após otimização da \
                         terapia oral."
            .to_string(),
        guideline_reference: "Diretriz SBD 2024 / PCDT DM2-SUS: A insulinoterapia é \
                              indicada em casos de falha da terapia oral otimizada, ou em \
                              situações específicas como HbA1c > 9%, descompensação aguda \
                              ou sintomas catabólicos."
            .to_string(),
    }
}
