//! The three reasoning operations. Each is a single Converse round trip —
//! no streaming, no partial results, no automatic retry. Responses must
//! parse into the typed report structs before anyone sees them; a payload
//! that doesn't is a recoverable `SchemaViolation`, surfaced and dropped.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use serde::de::DeserializeOwned;
use tracing::info;
use uuid::Uuid;

use glica_core::models::adjustment::AdjustmentReportData;
use glica_core::models::handout::PatientHandoutData;
use glica_core::models::patient::PatientData;
use glica_core::models::report::{Conduct, ReportData};

use crate::client::ModelTier;
use crate::error::BedrockError;
use crate::prompt::{self, AdjustmentContext};

/// Generate the initial insulin-therapy report.
pub async fn generate_report(
    client: &Client,
    tier: ModelTier,
    patient: &PatientData,
    fast_mode: bool,
) -> Result<ReportData, BedrockError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, model = tier.model_id(), fast_mode, "starting report generation");

    let response_text = invoke_converse(
        client,
        tier.model_id(),
        &prompt::report_system_prompt(),
        &prompt::report_user_message(patient, fast_mode),
    )
    .await?;

    let report = parse_report(&response_text)?;
    info!(%request_id, "report generation complete");
    Ok(report)
}

/// Generate a follow-up adjustment plan, aware of the full adjustment history.
pub async fn generate_adjustment(
    client: &Client,
    tier: ModelTier,
    ctx: &AdjustmentContext<'_>,
) -> Result<AdjustmentReportData, BedrockError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, model = tier.model_id(), "starting adjustment generation");

    let response_text = invoke_converse(
        client,
        tier.model_id(),
        &prompt::adjustment_system_prompt(),
        &prompt::adjustment_user_message(ctx),
    )
    .await?;

    let plan = parse_adjustment(&response_text)?;
    info!(%request_id, "adjustment generation complete");
    Ok(plan)
}

/// Generate the plain-language patient handout. Always runs on the fast
/// tier — the handout is short and formulaic.
pub async fn generate_handout(
    client: &Client,
    patient: &PatientData,
    conduct: &Conduct,
) -> Result<PatientHandoutData, BedrockError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "starting handout generation");

    let response_text = invoke_converse(
        client,
        ModelTier::Fast.model_id(),
        &prompt::handout_system_prompt(),
        &prompt::handout_user_message(patient, conduct),
    )
    .await?;

    let handout = parse_handout(&response_text)?;
    info!(%request_id, "handout generation complete");
    Ok(handout)
}

pub fn parse_report(text: &str) -> Result<ReportData, BedrockError> {
    parse_payload(text, "ReportData")
}

pub fn parse_adjustment(text: &str) -> Result<AdjustmentReportData, BedrockError> {
    parse_payload(text, "AdjustmentReportData")
}

pub fn parse_handout(text: &str) -> Result<PatientHandoutData, BedrockError> {
    parse_payload(text, "PatientHandoutData")
}

fn parse_payload<T: DeserializeOwned>(text: &str, type_name: &str) -> Result<T, BedrockError> {
    serde_json::from_str(json_payload(text)).map_err(|e| {
        BedrockError::SchemaViolation(format!(
            "failed to parse {type_name}: {e}. Response: {text}"
        ))
    })
}

/// Trim a markdown code fence if the model wrapped its JSON in one.
fn json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Core invocation using the Bedrock Converse API. Returns the response text.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<String, BedrockError> {
    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(
            Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(user_message.to_string()))
                .build()
                .map_err(|e| BedrockError::Invocation(e.to_string()))?,
        )
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    Ok(response_text)
}
