//! Prompt assembly for the three reasoning operations.
//!
//! The clinical rule text is fixed and versioned by guideline year — it is
//! the contract with the reasoning service, not configuration. Patient and
//! follow-up data are serialized into the bullet layout the prompts were
//! validated with; the expected JSON shape is spelled out in each system
//! prompt because the Converse API has no response-schema parameter.

use glica_core::models::adjustment::Adjustment;
use glica_core::models::follow_up::FollowUpData;
use glica_core::models::patient::{Meal, PatientData};
use glica_core::models::report::{Conduct, ReportData};

/// SBD 2024 / PCDT DM2-SUS rules given to every initial evaluation.
pub const GUIDELINE_RULES: &str = "\
**Diretrizes Mandatórias:**

1.  **Metas Glicêmicas:**
    *   Adultos: HbA1c < 7%
    *   Idosos (>65 anos): HbA1c < 7.5%
    *   Idosos frágeis/comorbidades graves: HbA1c < 8%
    *   Jejum ideal: 80-130 mg/dL
    *   Pós-prandial (2h): < 180 mg/dL
    *   Hipoglicemia: < 70 mg/dL

2.  **Indicação de Insulina:**
    *   HbA1c > 9%
    *   Glicemia de jejum > 300 mg/dL
    *   Sintomas de hiperglicemia (poliúria, polidipsia, perda ponderal)
    *   Falha terapêutica com Metformina + Sulfonilureia (SU)

3.  **Cálculo Insulina NPH (Basal):**
    *   Dose inicial: 10U à noite ou 0.2 U/kg ao deitar. Priorize 0.2 U/kg. Se a \
Glicemia de Jejum (GJ) estiver controlada, mas houver hiperglicemia durante o dia \
(ex: pré-almoço elevada), considere iniciar a NPH pela manhã.
    *   Ajuste Semanal (baseado na glicemia de jejum):
        *   GJ > 130 mg/dL: +2U ou +10-15% da dose.
        *   GJ < 70 mg/dL: -4U ou -10% da dose.
        *   GJ 80-130 mg/dL: Manter a dose.
    *   Dividir em 2 doses/dia (60-70% pré-café, 30-40% pré-jantar) se: Jejum \
controlado mas pré-jantar elevada, ou dose total > 0.5 U/kg.

4.  **Cálculo Insulina Regular (Prandial):**
    *   Indicação: Glicemia pós-prandial > 180 mg/dL apesar de basal otimizada.
    *   Dose inicial: 2 a 4U antes da principal refeição. Aplicar 15-30 min antes.
    *   Ajuste (baseado na glicemia pós-prandial da refeição correspondente):
        *   GPP > 180 mg/dL: +2U
        *   GPP > 250 mg/dL: +4U
        *   GPP < 70 mg/dL: -2 a -4U

5.  **Manejo de Antidiabéticos Orais (ADO):**
    *   Metformina: Manter, se não houver contraindicação (TFG < 30).
    *   Sulfonilureia (Gliclazida, Glibenclamida): **Suspender** se iniciar insulina \
basal-bolus. Manter se usar apenas basal.
    *   iSGLT2 (Dapagliflozina): Manter se TFG > 30 e houver: Risco CV alto, ICC \
FEVE <= 40%, ou DRC (Albuminúria > 200 mg/g).

6.  **Perguntas de Segurança para Ajuste (Considerar no plano):**
    *   Hipoglicemias recentes?
    *   Mudança alimentar ou exercício intenso?
    *   Doença aguda / infecção?
    *   Risco de hipoglicemia noturna?";

/// Adjustment-cycle rules given at every reassessment.
pub const ADJUSTMENT_RULES: &str = "\
**Diretrizes Mandatórias para Ajuste:**
- **Ajuste NPH (baseado na glicemia de jejum):**
    - GJ > 130 mg/dL: +2U ou +10-15% da dose.
    - GJ < 70 mg/dL: -4U ou -10% da dose.
- **Ajuste NPH por Padrão Diurno:** Se a GJ estiver controlada, mas houver um padrão \
de hiperglicemia em outro horário (ex: pré-almoço ou pré-jantar), considere dividir a \
dose de NPH ou adicionar uma nova dose (ex: NPH pela manhã para controlar a glicemia \
da tarde).
- **Ajuste Regular (baseado na glicemia pós-prandial da refeição correspondente):**
    - GPP > 180 mg/dL: +2U
    - GPP > 250 mg/dL: +4U
    - GPP < 70 mg/dL: -2 a -4U
- **Cálculos baseados em peso:** Se precisar recalcular doses com base no peso (U/kg), \
**use o PESO ATUALIZADO** do paciente.
- **Segurança:** Priorize a segurança, evitando hipoglicemia. Se houver hipoglicemia, \
reduza a dose correspondente antes de qualquer aumento.";

const REPORT_SHAPE: &str = r#"Responda APENAS com um objeto JSON neste formato exato:
{
  "clinical_summary": "resumo clínico conciso do paciente",
  "goal_classification": "classificação do controle glicêmico (dentro/fora da meta)",
  "calculations": {
    "target_hba1c": "meta de HbA1c para este paciente",
    "nph_initial_dose": "cálculo da dose inicial de insulina NPH",
    "nph_adjustment": "sugestão de ajuste semanal para NPH",
    "regular_initial_dose": "cálculo da dose inicial de insulina Regular, se indicada"
  },
  "final_conduct": {
    "recommended_insulins": [
      { "insulin": "NPH" ou "Regular", "dose": número, "schedule": "Manhã (07:00)" }
    ],
    "nph_dose_text": "descrição textual da dose de NPH. Ex: 20U pela manhã e 10U à noite",
    "regular_dose_plan_text": "descrição textual do plano de Regular. Ex: 4U antes do almoço",
    "ado_management": "manter ou suspender antidiabéticos orais"
  },
  "identified_risks": ["risco identificado"],
  "complementary_conducts": ["conduta complementar"],
  "follow_up_plan": "plano de seguimento sugerido",
  "guideline_reference": "trecho da diretriz SBD/SUS que embasa a decisão"
}"#;

const ADJUSTMENT_SHAPE: &str = r#"Responda APENAS com um objeto JSON neste formato exato:
{
  "goal_classification": "DENTRO DA META ou FORA DA META",
  "situation_analysis": "breve análise da situação atual do paciente",
  "adjusted_conduct": {
    "recommended_insulins": [
      { "insulin": "NPH" ou "Regular", "dose": número, "schedule": "Manhã (07:00)" }
    ],
    "nph_dose_text": "descrição textual da NOVA dose de NPH",
    "regular_dose_plan_text": "descrição textual do NOVO plano de Regular",
    "ado_management": "manter ou suspender antidiabéticos orais após o ajuste"
  },
  "monitoring_plan": "plano de monitorização para os próximos dias",
  "next_goals": "metas claras para a próxima reavaliação"
}"#;

const HANDOUT_SHAPE: &str = r#"Responda APENAS com um objeto JSON neste formato exato:
{
  "storage_instructions": "como armazenar a insulina",
  "application_instructions": "passo-a-passo de aplicação",
  "hypoglycemia_management": "o que fazer em caso de hipoglicemia",
  "hyperglycemia_management": "o que fazer em caso de hiperglicemia",
  "general_recommendations": "recomendações gerais"
}"#;

pub fn report_system_prompt() -> String {
    format!(
        "Você é um assistente clínico para médicos, especializado em Diabetes Mellitus \
         tipo 2. Sua função é analisar os dados do paciente e gerar um plano de \
         insulinoterapia estritamente baseado nas diretrizes da Sociedade Brasileira de \
         Diabetes (SBD 2024) e no PCDT DM2 do SUS. Seja objetivo, profissional e forneça \
         a saída exclusivamente no formato JSON solicitado.\n\n{GUIDELINE_RULES}\n\n{REPORT_SHAPE}"
    )
}

/// Serialize the patient profile. Fast mode carries only the abbreviated
/// data set — the omitted fields were never collected.
pub fn report_user_message(patient: &PatientData, fast_mode: bool) -> String {
    let insulins = insulins_in_use(patient);
    let meals = meals_block(&patient.meals);
    let post_prandial = post_prandial_annotation(patient);

    let data_section = if fast_mode {
        format!(
            "**Dados do Paciente para Análise (Modo Rápido):**\n\
             *   Idade: {} anos\n\
             *   Peso: {} kg\n\
             *   Controle Glicêmico: HbA1c {}%, Jejum {} mg/dL, Pré-prandial {} mg/dL, \
             Pós-prandial {} mg/dL{}\n\
             *   Hipoglicemia: {}\n\
             *   Insulinas em uso:\n{}\n\
             *   Refeições do Paciente:\n{}",
            patient.age,
            patient.weight,
            patient.hba1c,
            patient.fasting_glucose,
            patient.pre_prandial_glucose,
            patient.post_prandial_glucose,
            post_prandial,
            patient.hypoglycemia_episodes.label(),
            insulins,
            meals,
        )
    } else {
        format!(
            "**Dados do Paciente para Análise:**\n\
             *   Idade: {} anos\n\
             *   Sexo: {}\n\
             *   Peso: {} kg, Altura: {} m, IMC: {:.2} kg/m²\n\
             *   Frágil/Comorbidades graves: {}\n\
             *   Comorbidades: {}\n\
             *   Medicamentos em uso: {}\n\
             *   Função Renal: Creatinina {} mg/dL, TFG {:.2} ml/min, Albuminúria {} mg/g\n\
             *   Controle Glicêmico: HbA1c {}%, Jejum {} mg/dL, Pré-prandial {} mg/dL, \
             Pós-prandial {} mg/dL{}\n\
             *   Hipoglicemia: {}\n\
             *   Sintomas Clínicos Atuais: {}\n\
             *   Situação Clínica Especial: {}\n\
             *   Insulinas em uso:\n{}\n\
             *   Refeições do Paciente:\n{}",
            patient.age,
            patient.sex.label(),
            patient.weight,
            patient.height,
            patient.bmi,
            if patient.is_frail { "Sim" } else { "Não" },
            list_or(&patient.comorbidities, "Nenhuma"),
            list_or(&patient.medications, "Nenhum"),
            patient.creatinine,
            patient.egfr,
            patient.albuminuria,
            patient.hba1c,
            patient.fasting_glucose,
            patient.pre_prandial_glucose,
            patient.post_prandial_glucose,
            post_prandial,
            patient.hypoglycemia_episodes.label(),
            list_or(&patient.clinical_symptoms, "Nenhum"),
            list_or(&patient.clinical_situation, "Nenhuma"),
            insulins,
            meals,
        )
    };

    format!(
        "{data_section}\n\nBaseado estritamente nas diretrizes acima e nos dados do \
         paciente, gere o plano terapêutico em formato JSON. **IMPORTANTE**: No campo \
         'recommended_insulins', crie um item para cada aplicação de insulina (NPH ou \
         Regular) com a dose e o horário exato (ex: 'Manhã (07:00)') para ser usado na \
         construção de um gráfico."
    )
}

/// Everything the adjustment prompt needs beyond the follow-up form.
pub struct AdjustmentContext<'a> {
    pub patient: &'a PatientData,
    pub initial_report: &'a ReportData,
    /// The most recent conduct in effect (last adjustment's, else initial).
    pub previous_conduct: &'a Conduct,
    pub adjustments: &'a [Adjustment],
    pub follow_up: &'a FollowUpData,
}

pub fn adjustment_system_prompt() -> String {
    format!(
        "Você é um endocrinologista especialista em DM2, atuando como consultor para \
         outro médico. Um paciente que iniciou insulinoterapia recentemente retorna para \
         reavaliação. Sua tarefa é analisar os dados de seguimento e propor um **plano \
         de ajuste terapêutico** em formato JSON.\n\n{ADJUSTMENT_RULES}\n\n{ADJUSTMENT_SHAPE}"
    )
}

pub fn adjustment_user_message(ctx: &AdjustmentContext<'_>) -> String {
    let follow_up = ctx.follow_up;

    let high_glucose_meals = {
        let names: Vec<&str> = follow_up
            .high_glucose_meals
            .iter()
            .filter_map(|id| ctx.patient.meal_name(*id))
            .collect();
        if names.is_empty() {
            "Nenhuma específica".to_string()
        } else {
            names.join(", ")
        }
    };

    let hyperglycemia_events = if follow_up.hyperglycemia_events.is_empty() {
        "Nenhum momento específico de hiperglicemia foi relatado.".to_string()
    } else {
        follow_up
            .hyperglycemia_events
            .iter()
            .map(|e| format!("  - {}: {} mg/dL", e.time, e.value))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let hypoglycemia_timings = list_or(&follow_up.hypoglycemia_timings, "Não especificado");

    let new_hypoglycemia = follow_up
        .new_hypoglycemia_episodes
        .map(|f| f.label())
        .unwrap_or("não avaliado");

    let adjustment_history = if ctx.adjustments.is_empty() {
        "Nenhum ajuste anterior.".to_string()
    } else {
        ctx.adjustments
            .iter()
            .enumerate()
            .map(|(i, adj)| {
                format!(
                    "\n    - **Ajuste #{} ({})**:\n      \
                     - Glicemia de Jejum: {} mg/dL, HbA1c: {}%\n      \
                     - Nova Conduta: NPH ({}), Regular ({})",
                    i + 1,
                    adj.adjusted_at.strftime("%d/%m/%Y"),
                    adj.follow_up_data.current_fasting_glucose,
                    adj.follow_up_data.current_hba1c,
                    adj.adjustment_report.adjusted_conduct.nph_dose_text,
                    adj.adjustment_report.adjusted_conduct.regular_dose_plan_text,
                )
            })
            .collect::<Vec<_>>()
            .join("")
    };

    let notes = if follow_up.patient_notes.is_empty() {
        "Nenhuma"
    } else {
        follow_up.patient_notes.as_str()
    };

    format!(
        "**1. RESUMO DO CASO INICIAL:**\n\
         - Paciente: {} anos.\n\
         - Diagnóstico: DM2 com HbA1c inicial de {}%.\n\
         - Meta Terapêutica: HbA1c {}.\n\n\
         **2. PLANO TERAPÊUTICO ANTERIOR (O MAIS RECENTE):**\n\
         - Insulina NPH: {}\n\
         - Insulina Regular: {}\n\
         - ADOs: {}\n\n\
         **3. HISTÓRICO DE AJUSTES ANTERIORES:** {}\n\n\
         **4. DADOS DA REAVALIAÇÃO ATUAL:**\n\
         - **Peso Atual: {} kg.** (IMC inicial: {:.2} kg/m²)\n\
         - Glicemia de Jejum Atual: {} mg/dL.\n\
         - Glicemia Pré-Prandial (média) Atual: {} mg/dL.\n\
         - Glicemia Pós-Prandial (2h) Atual: {} mg/dL.\n\
         - HbA1c Atual: {}%.\n\
         - Refeições com Hiperglicemia Pós-Prandial Persistente: {}.\n\
         - Momentos de Hiperglicemia (Horário: Valor):\n{}\n\
         - Episódios de Hipoglicemia Recentes: {}.\n\
         - Momentos de Hipoglicemia Recentes: {}.\n\
         - Notas Adicionais do Médico: \"{}\"\n\n\
         **5. SUA TAREFA (GERAR JSON):**\n\
         Com base estritamente nas diretrizes, nos dados atuais (incluindo o **NOVO \
         PESO**) E NO HISTÓRICO DE AJUSTES, gere o **Plano de Ajuste Terapêutico** em \
         formato JSON.\n\
         - Analise os **momentos de hiperglicemia** para identificar padrões que \
         necessitem de uma nova dose de insulina (NPH ou Regular) em um novo horário.\n\
         - No campo 'goal_classification', defina se o paciente está 'DENTRO DA META' \
         ou 'FORA DA META'.\n\
         - Analise a situação atual.\n\
         - Proponha o ajuste das insulinas (NPH e/ou Regular). **Leve em conta a \
         alteração de peso para o cálculo de doses, se necessário.**\n\
         - Crie um novo array 'recommended_insulins' com TODAS as doses finais \
         (ajustadas ou não) para o novo gráfico.\n\
         - Defina um plano de monitorização e metas.",
        ctx.patient.age,
        ctx.patient.hba1c,
        ctx.initial_report.calculations.target_hba1c,
        text_or(&ctx.previous_conduct.nph_dose_text, "Nenhuma"),
        text_or(&ctx.previous_conduct.regular_dose_plan_text, "Nenhuma"),
        ctx.previous_conduct.ado_management,
        adjustment_history,
        follow_up.current_weight,
        ctx.patient.bmi,
        follow_up.current_fasting_glucose,
        follow_up.current_pre_prandial_glucose,
        follow_up.current_post_prandial_glucose,
        follow_up.current_hba1c,
        high_glucose_meals,
        hyperglycemia_events,
        new_hypoglycemia,
        hypoglycemia_timings,
        notes,
    )
}

pub fn handout_system_prompt() -> String {
    format!(
        "Você é um educador em diabetes criando um guia prático para um paciente do SUS. \
         **NÃO use jargões médicos.** Use uma linguagem simples, clara e encorajadora. \
         Sua tarefa é gerar um guia para o paciente em formato JSON. O texto de cada \
         seção deve ser conciso. Use quebras de linha (\\n) para separar parágrafos e \
         itens de lista. Estruture em pequenos parágrafos e listas com marcadores para \
         máxima clareza. Seja direto e prático. Use negrito (com asteriscos, ex: \
         *palavra*) o mínimo possível, apenas para destacar os alertas de segurança mais \
         críticos (ex: *Regra dos 15*, *sintomas de hipoglicemia grave*).\n\n{HANDOUT_SHAPE}"
    )
}

pub fn handout_user_message(patient: &PatientData, conduct: &Conduct) -> String {
    let name = if patient.name.is_empty() {
        "Paciente"
    } else {
        patient.name.as_str()
    };

    format!(
        "O paciente se chama **{name}**.\n\
         O plano de tratamento com insulina dele(a) é:\n\
         - Insulina NPH: {}\n\
         - Insulina Regular: {}\n\n\
         Gere o guia cobrindo os seguintes pontos de forma objetiva:\n\
         1.  **storage_instructions**: Como guardar a insulina corretamente (na \
         geladeira, etc).\n\
         2.  **application_instructions**: Um passo a passo de como aplicar a insulina. \
         **Inclua instruções detalhadas e claras para os dois tipos de aplicação: com \
         SERINGAS e com CANETAS**, cobrindo o preparo da dose, locais de aplicação, \
         técnica do rodízio, e o que fazer com o material após o uso.\n\
         3.  **hypoglycemia_management**: O que fazer se a glicose ficar baixa \
         (< 70 mg/dL). Explique a \"Regra dos 15\" (ingerir 15g de carboidrato simples, \
         esperar 15 min e medir de novo).\n\
         4.  **hyperglycemia_management**: O que fazer se a glicose ficar alta. Quando \
         se preocupar e procurar o médico.\n\
         5.  **general_recommendations**: Recomendações gerais e amigáveis sobre \
         alimentação, atividade física e a importância de medir a glicose.",
        conduct.nph_dose_text, conduct.regular_dose_plan_text,
    )
}

fn insulins_in_use(patient: &PatientData) -> String {
    let rows: Vec<String> = patient
        .current_insulins
        .iter()
        .filter_map(|dose| {
            dose.insulin.map(|insulin| {
                format!("  - {}, {}U, {}", insulin.label(), dose.dose, dose.schedule)
            })
        })
        .collect();
    if rows.is_empty() {
        "Nenhuma".to_string()
    } else {
        rows.join("\n")
    }
}

fn meals_block(meals: &[Meal]) -> String {
    meals
        .iter()
        .map(|m| format!("  - {}: {}", m.name, m.time))
        .collect::<Vec<_>>()
        .join("\n")
}

fn post_prandial_annotation(patient: &PatientData) -> String {
    if patient.post_prandial_meal_ids.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = patient
        .post_prandial_meal_ids
        .iter()
        .filter_map(|id| patient.meal_name(*id))
        .collect();
    format!(" (após {})", names.join(", "))
}

fn list_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn text_or<'a>(text: &'a str, empty: &'a str) -> &'a str {
    if text.is_empty() { empty } else { text }
}
