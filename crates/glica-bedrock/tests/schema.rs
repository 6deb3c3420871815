//! Contract tests for structured-output parsing: a response either matches
//! the operation's schema exactly or is rejected as a schema violation.

use glica_bedrock::error::BedrockError;
use glica_bedrock::generate::{parse_adjustment, parse_handout, parse_report};
use glica_core::models::patient::InsulinType;

const VALID_REPORT: &str = r#"{
  "clinical_summary": "Paciente de 55 anos com DM2 descompensado.",
  "goal_classification": "FORA DA META",
  "calculations": {
    "target_hba1c": "< 7.0%",
    "nph_initial_dose": "0.2 U/kg -> 19U ao deitar",
    "nph_adjustment": "+2U a cada 3-7 dias se GJ > 130 mg/dL",
    "regular_initial_dose": "N/A"
  },
  "final_conduct": {
    "recommended_insulins": [
      { "insulin": "NPH", "dose": 19, "schedule": "Noite (22:00)" }
    ],
    "nph_dose_text": "19 unidades de NPH ao deitar.",
    "regular_dose_plan_text": "Não indicada no momento.",
    "ado_management": "Manter Metformina."
  },
  "identified_risks": ["Risco de hipoglicemia noturna"],
  "complementary_conducts": ["Educação em diabetes"],
  "follow_up_plan": "Reavaliar em 7 a 14 dias.",
  "guideline_reference": "Diretriz SBD 2024."
}"#;

const VALID_ADJUSTMENT: &str = r#"{
  "goal_classification": "FORA DA META",
  "situation_analysis": "Jejum persiste elevado.",
  "adjusted_conduct": {
    "recommended_insulins": [
      { "insulin": "NPH", "dose": 21, "schedule": "Noite (22:00)" },
      { "insulin": "Regular", "dose": 4, "schedule": "Almoço (12:00)" }
    ],
    "nph_dose_text": "21U ao deitar.",
    "regular_dose_plan_text": "4U antes do almoço.",
    "ado_management": "Manter Metformina."
  },
  "monitoring_plan": "Glicemia de jejum diária.",
  "next_goals": "GJ entre 80-130 mg/dL."
}"#;

const VALID_HANDOUT: &str = r#"{
  "storage_instructions": "Guarde na geladeira.",
  "application_instructions": "Aplique na barriga, fazendo rodízio.",
  "hypoglycemia_management": "Use a *Regra dos 15*.",
  "hyperglycemia_management": "Procure o médico se persistir.",
  "general_recommendations": "Coma bem e caminhe todos os dias."
}"#;

#[test]
fn valid_report_parses() {
    let report = parse_report(VALID_REPORT).expect("valid payload should parse");
    assert_eq!(report.goal_classification, "FORA DA META");
    assert_eq!(report.final_conduct.recommended_insulins.len(), 1);
    assert_eq!(
        report.final_conduct.recommended_insulins[0].insulin,
        InsulinType::Nph
    );
    assert_eq!(report.final_conduct.recommended_insulins[0].dose, 19.0);
    assert!(!report.is_alert());
}

#[test]
fn fenced_report_parses() {
    let fenced = format!("```json\n{VALID_REPORT}\n```");
    assert!(parse_report(&fenced).is_ok());

    let bare_fence = format!("```\n{VALID_REPORT}\n```");
    assert!(parse_report(&bare_fence).is_ok());
}

#[test]
fn non_json_response_is_a_schema_violation() {
    let err = parse_report("O assistente está sobrecarregado.").unwrap_err();
    assert!(matches!(err, BedrockError::SchemaViolation(_)));
}

#[test]
fn missing_required_field_is_a_schema_violation() {
    // Drop final_conduct entirely.
    let mut value: serde_json::Value = serde_json::from_str(VALID_REPORT).unwrap();
    value.as_object_mut().unwrap().remove("final_conduct");
    let err = parse_report(&value.to_string()).unwrap_err();
    assert!(matches!(err, BedrockError::SchemaViolation(_)));
}

#[test]
fn unknown_insulin_type_is_a_schema_violation() {
    let payload = VALID_REPORT.replace("\"NPH\"", "\"Glargina\"");
    let err = parse_report(&payload).unwrap_err();
    assert!(matches!(err, BedrockError::SchemaViolation(_)));
}

#[test]
fn valid_adjustment_parses() {
    let plan = parse_adjustment(VALID_ADJUSTMENT).expect("valid payload should parse");
    assert_eq!(plan.adjusted_conduct.recommended_insulins.len(), 2);
    assert_eq!(
        plan.adjusted_conduct.recommended_insulins[1].insulin,
        InsulinType::Regular
    );
    assert_eq!(plan.next_goals, "GJ entre 80-130 mg/dL.");
}

#[test]
fn adjustment_missing_conduct_is_a_schema_violation() {
    let mut value: serde_json::Value = serde_json::from_str(VALID_ADJUSTMENT).unwrap();
    value.as_object_mut().unwrap().remove("adjusted_conduct");
    assert!(parse_adjustment(&value.to_string()).is_err());
}

#[test]
fn valid_handout_parses() {
    let handout = parse_handout(VALID_HANDOUT).expect("valid payload should parse");
    assert!(handout.hypoglycemia_management.contains("Regra dos 15"));
}

#[test]
fn truncated_handout_is_a_schema_violation() {
    let truncated = &VALID_HANDOUT[..60];
    assert!(parse_handout(truncated).is_err());
}
