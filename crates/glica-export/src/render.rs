use std::cmp::Ordering;

use serde::Serialize;
use tera::{Context, Tera};

use glica_core::clinical::kinetics::schedule_time_hours;
use glica_core::models::handout::PatientHandoutData;
use glica_core::models::patient::PatientData;
use glica_core::models::report::Conduct;

use crate::error::ExportError;
use crate::format::format_text;

/// The printable care-plan document. Section fragments arrive pre-rendered
/// as HTML, so the template marks them `safe`.
const CARE_PLAN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8">
<title>Plano de Cuidado - {{ patient_name }}</title>
<style>
body { font-family: sans-serif; margin: 2rem; color: #1f2937; }
header { text-align: center; border-bottom: 1px solid #d1d5db; padding-bottom: 1rem; margin-bottom: 1.5rem; }
h1 { color: #1d4ed8; }
h2, h3 { border-bottom: 1px solid #e5e7eb; padding-bottom: 0.5rem; }
section { margin-bottom: 2rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e5e7eb; }
thead tr { background: #f3f4f6; }
.ids { display: flex; gap: 2rem; font-size: 0.9rem; }
.alert { padding: 1rem; border: 1px solid #fcd34d; border-radius: 0.5rem; background: #fffbeb; }
footer { text-align: center; font-size: 0.75rem; color: #6b7280; border-top: 1px solid #d1d5db; padding-top: 1rem; }
</style>
</head>
<body>
<header><h1>Plano de Cuidado do Paciente</h1></header>
<section class="ids">
<div><strong>Paciente:</strong> {{ patient_name }}</div>
<div><strong>Nascimento:</strong> {{ dob }}</div>
<div><strong>Data:</strong> {{ date }}</div>
</section>
<section>
<h2>Seu Tratamento com Insulina</h2>
<table>
<thead><tr><th>Insulina</th><th>Dose</th><th>Horário / Refeição</th></tr></thead>
<tbody>
{%- if insulin_rows | length > 0 -%}
{%- for row in insulin_rows %}
<tr><td>{{ row.insulin }}</td><td>{{ row.dose }} unidades</td><td>{{ row.schedule }}</td></tr>
{%- endfor -%}
{%- else %}
<tr><td colspan="3">Nenhuma insulina prescrita.</td></tr>
{%- endif %}
</tbody>
</table>
<p>{{ ado_management }}</p>
</section>
<section class="alert">
<h2>Como Guardar sua Insulina</h2>
{{ storage_instructions | safe }}
</section>
<section>
<h2>Como Aplicar sua Insulina</h2>
{{ application_instructions | safe }}
</section>
<section>
<h3>O que fazer se a Glicose Baixar (Hipoglicemia)</h3>
{{ hypoglycemia_management | safe }}
</section>
<section>
<h3>O que fazer se a Glicose Subir (Hiperglicemia)</h3>
{{ hyperglycemia_management | safe }}
</section>
<section>
<h2>Recomendações Gerais</h2>
{{ general_recommendations | safe }}
</section>
<footer><p>Este é um documento de apoio em caso de dúvidas procure uma opinião médica!</p></footer>
</body>
</html>
"#;

#[derive(Serialize)]
struct InsulinRow {
    insulin: &'static str,
    dose: String,
    schedule: String,
}

#[derive(Serialize)]
struct CarePlanDocument {
    patient_name: String,
    dob: String,
    date: String,
    insulin_rows: Vec<InsulinRow>,
    ado_management: String,
    storage_instructions: String,
    application_instructions: String,
    hypoglycemia_management: String,
    hyperglycemia_management: String,
    general_recommendations: String,
}

/// Assemble the printable care-plan HTML for the conduct currently in
/// effect. `today` is injected so the transform stays pure.
pub fn render_care_plan(
    patient: &PatientData,
    conduct: &Conduct,
    handout: &PatientHandoutData,
    today: jiff::civil::Date,
) -> Result<String, ExportError> {
    let mut rows: Vec<&glica_core::models::report::RecommendedInsulin> =
        conduct.recommended_insulins.iter().collect();
    // Sort by the HH:MM group in the schedule; annotations without one
    // fall back to plain string order.
    rows.sort_by(|a, b| {
        match (
            schedule_time_hours(&a.schedule),
            schedule_time_hours(&b.schedule),
        ) {
            (Some(ta), Some(tb)) => ta.partial_cmp(&tb).unwrap_or(Ordering::Equal),
            _ => a.schedule.cmp(&b.schedule),
        }
    });

    let document = CarePlanDocument {
        patient_name: patient.name.clone(),
        dob: patient
            .dob
            .map(|d| d.strftime("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        date: today.strftime("%d/%m/%Y").to_string(),
        insulin_rows: rows
            .into_iter()
            .map(|r| InsulinRow {
                insulin: r.insulin.label(),
                dose: format_dose(r.dose),
                schedule: r.schedule.clone(),
            })
            .collect(),
        ado_management: conduct.ado_management.clone(),
        storage_instructions: format_text(&handout.storage_instructions),
        application_instructions: format_text(&handout.application_instructions),
        hypoglycemia_management: format_text(&handout.hypoglycemia_management),
        hyperglycemia_management: format_text(&handout.hyperglycemia_management),
        general_recommendations: format_text(&handout.general_recommendations),
    };

    let mut tera = Tera::default();
    tera.add_raw_template("care_plan", CARE_PLAN_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(&document)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render("care_plan", &context)?;
    tracing::debug!(
        patient = %patient.name,
        rows = conduct.recommended_insulins.len(),
        "care plan rendered"
    );
    Ok(rendered)
}

/// Doses are clinically whole or half units — render "19", not "19.0".
fn format_dose(dose: f64) -> String {
    if dose.fract() == 0.0 {
        format!("{dose:.0}")
    } else {
        format!("{dose}")
    }
}
