//! The session controller.
//!
//! Owns the injected collaborators (document store, reasoning client), the
//! fast-mode flag threaded through every request, the local history cache,
//! and the current [`Screen`]. All operations are fire-and-await: the shell
//! disables the triggering control while one is pending, so no duplicate
//! request for the same user action is ever in flight. A failed operation
//! returns its error and leaves both the screen and the cache exactly as
//! they were — the user retries by re-triggering the action.

use jiff::Timestamp;
use jiff::civil::Date;
use tracing::info;
use uuid::Uuid;

use glica_bedrock::client::ModelTier;
use glica_bedrock::generate;
use glica_bedrock::prompt::AdjustmentContext;
use glica_core::clinical::indication::{self, Triage};
use glica_core::clinical::{age, anthropometry, renal};
use glica_core::error::CoreError;
use glica_core::models::adjustment::Adjustment;
use glica_core::models::follow_up::FollowUpData;
use glica_core::models::history::HistoryEntry;
use glica_core::models::patient::PatientData;
use glica_core::models::report::Conduct;
use glica_export::render::render_care_plan;
use glica_storage::history::HistoryStore;

use crate::error::{AppError, msg};
use crate::screen::{ReportView, Screen};

/// How many history entries the history screen shows.
pub const HISTORY_PAGE: usize = 50;

pub struct Session {
    store: HistoryStore,
    reasoning: aws_sdk_bedrockruntime::Client,
    fast_mode: bool,
    screen: Screen,
    history: Vec<HistoryEntry>,
}

impl Session {
    pub fn new(store: HistoryStore, reasoning: aws_sdk_bedrockruntime::Client) -> Self {
        Self {
            store,
            reasoning,
            fast_mode: false,
            screen: Screen::Home,
            history: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Begin a new evaluation, choosing the data-collection depth.
    pub fn start(&mut self, fast_mode: bool) {
        self.fast_mode = fast_mode;
        self.screen = Screen::NewPatient;
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
    }

    pub fn go_history(&mut self) {
        self.screen = Screen::History;
    }

    pub fn go_guide(&mut self) {
        self.screen = Screen::Guide;
    }

    /// Identity intake done — move to the clinical form with the age
    /// precomputed from the date of birth.
    pub fn continue_to_calculator(
        &mut self,
        name: String,
        dob: Option<Date>,
        today: Date,
    ) -> Result<(), AppError> {
        if !matches!(self.screen, Screen::NewPatient) {
            return Err(AppError::State("identity intake is not in progress"));
        }
        let age = dob
            .map(|d| age::completed_years(d, today).max(0))
            .unwrap_or(0);
        self.screen = Screen::Calculator { name, dob, age };
        Ok(())
    }

    /// Return from a fresh report to the form, keeping the identity fields.
    pub fn back_to_calculator(&mut self) -> Result<(), AppError> {
        let Screen::Report(view) = &self.screen else {
            return Err(AppError::State("no report is being shown"));
        };
        if view.viewing_history {
            return Err(AppError::State("historical reports reopen via re-evaluation"));
        }
        self.screen = Screen::Calculator {
            name: view.patient.name.clone(),
            dob: view.patient.dob,
            age: view.patient.age,
        };
        Ok(())
    }

    // ── History ──────────────────────────────────────────────────────────

    /// Reload the local history cache from the store.
    pub async fn refresh_history(&mut self) -> Result<(), AppError> {
        let entries = self
            .store
            .list_recent(HISTORY_PAGE)
            .await
            .map_err(|e| AppError::storage(msg::LOAD_HISTORY, e))?;
        self.history = entries;
        Ok(())
    }

    /// Open a saved entry on the report screen.
    pub fn view_history_item(&mut self, entry: HistoryEntry) {
        let alert = entry.report.is_alert();
        self.screen = Screen::Report(ReportView {
            patient: entry.patient.clone(),
            report: entry.report.clone(),
            alert,
            viewing_history: true,
            entry: Some(entry),
        });
    }

    pub async fn delete_entry(&mut self, id: Uuid) -> Result<(), AppError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| AppError::storage(msg::DELETE_ENTRY, e))?;
        self.history.retain(|e| e.id != Some(id));
        Ok(())
    }

    // ── Initial evaluation ───────────────────────────────────────────────

    /// Run the indication gate and, when insulin is indicated, the
    /// reasoning service. Lands on the report screen on success.
    pub async fn evaluate(&mut self, patient: PatientData) -> Result<(), AppError> {
        let mut patient = patient;
        // Derived measurements are recomputed here so reports and prompts
        // always see values consistent with the raw inputs. Fast mode never
        // collects weight/height/creatinine in full, so both stay undefined.
        if self.fast_mode {
            patient.bmi = 0.0;
            patient.egfr = 0.0;
        } else {
            patient.bmi = anthropometry::bmi(patient.weight, patient.height);
            patient.egfr =
                renal::ckd_epi_2021(patient.creatinine, f64::from(patient.age), patient.sex);
        }

        patient
            .validate()
            .map_err(|e| AppError::validation(intake_message(&e), e))?;

        match indication::triage(&patient, self.fast_mode) {
            Triage::OralTherapy { report } => {
                info!(hba1c = patient.hba1c, "insulin not indicated, oral-therapy alert");
                self.screen = Screen::Report(ReportView {
                    patient,
                    report,
                    alert: true,
                    viewing_history: false,
                    entry: None,
                });
                Ok(())
            }
            Triage::Insulin => {
                let tier = ModelTier::from_fast_mode(self.fast_mode);
                let report =
                    generate::generate_report(&self.reasoning, tier, &patient, self.fast_mode)
                        .await
                        .map_err(|e| AppError::reasoning(msg::GENERATE_REPORT, e))?;
                self.screen = Screen::Report(ReportView {
                    patient,
                    report,
                    alert: false,
                    viewing_history: false,
                    entry: None,
                });
                Ok(())
            }
        }
    }

    /// Save the report being shown. A name already in history makes this a
    /// no-op (`Ok(None)`) — entries are never overwritten.
    pub async fn save_current_report(
        &mut self,
        now: Timestamp,
    ) -> Result<Option<Uuid>, AppError> {
        let Screen::Report(view) = &self.screen else {
            return Err(AppError::State("no report is being shown"));
        };
        if view.viewing_history {
            return Err(AppError::State("historical entries are already saved"));
        }

        let exists = self
            .store
            .exists_by_patient_name(&view.patient.name)
            .await
            .map_err(|e| AppError::storage(msg::SAVE_ENTRY, e))?;
        if exists {
            info!(patient = %view.patient.name, "already in history, skipping save");
            return Ok(None);
        }

        let mut entry = HistoryEntry {
            id: None,
            patient: view.patient.clone(),
            report: view.report.clone(),
            saved_at: now,
            adjustments: Vec::new(),
        };
        let id = self
            .store
            .insert(&entry)
            .await
            .map_err(|e| AppError::storage(msg::SAVE_ENTRY, e))?;
        entry.id = Some(id);

        self.history.insert(0, entry.clone());
        if let Screen::Report(view) = &mut self.screen {
            view.entry = Some(entry);
        }
        Ok(Some(id))
    }

    // ── Follow-up cycle ──────────────────────────────────────────────────

    /// Open the follow-up form for the saved entry being viewed.
    pub fn start_reevaluation(&mut self) -> Result<(), AppError> {
        let Screen::Report(view) = &self.screen else {
            return Err(AppError::State("no report is being shown"));
        };
        if view.alert {
            return Err(AppError::State("oral-therapy alerts have no insulin to adjust"));
        }
        let Some(entry) = view.entry.clone() else {
            return Err(AppError::EntryNotSaved);
        };
        self.screen = Screen::Reevaluation { entry };
        Ok(())
    }

    /// Generate the adjustment plan from the follow-up data, aware of the
    /// entire adjustment history. Lands on the adjustment-report screen.
    pub async fn generate_adjustment(
        &mut self,
        follow_up: FollowUpData,
    ) -> Result<(), AppError> {
        let Screen::Reevaluation { entry } = &self.screen else {
            return Err(AppError::State("no re-evaluation is in progress"));
        };
        let entry = entry.clone();

        follow_up
            .validate()
            .map_err(|e| AppError::validation(follow_up_message(&e), e))?;

        let ctx = AdjustmentContext {
            patient: &entry.patient,
            initial_report: &entry.report,
            previous_conduct: entry.latest_conduct(),
            adjustments: &entry.adjustments,
            follow_up: &follow_up,
        };
        let tier = ModelTier::from_fast_mode(self.fast_mode);
        let report = generate::generate_adjustment(&self.reasoning, tier, &ctx)
            .await
            .map_err(|e| AppError::reasoning(msg::GENERATE_ADJUSTMENT, e))?;

        self.screen = Screen::AdjustmentReport {
            entry,
            follow_up,
            report,
        };
        Ok(())
    }

    /// Persist the adjustment being shown, then reopen the updated entry.
    /// Store append happens first; the cache mutates only on success.
    pub async fn save_adjustment(&mut self, now: Timestamp) -> Result<(), AppError> {
        let Screen::AdjustmentReport {
            entry,
            follow_up,
            report,
        } = &self.screen
        else {
            return Err(AppError::State("no adjustment plan is being shown"));
        };
        let id = entry.id.ok_or(AppError::EntryNotSaved)?;

        let adjustment = Adjustment {
            adjusted_at: now,
            adjustment_report: report.clone(),
            follow_up_data: follow_up.clone(),
        };
        let mut updated = entry.clone();

        self.store
            .append_adjustment(id, &adjustment)
            .await
            .map_err(|e| AppError::storage(msg::SAVE_ADJUSTMENT, e))?;

        updated.adjustments.push(adjustment);
        if let Some(cached) = self.history.iter_mut().find(|e| e.id == Some(id)) {
            *cached = updated.clone();
        }
        self.view_history_item(updated);
        Ok(())
    }

    // ── Patient handout ──────────────────────────────────────────────────

    /// Generate the handout for the conduct currently in effect and render
    /// the printable care-plan document. The shell opens it and prints.
    pub async fn print_care_plan(&self, today: Date) -> Result<String, AppError> {
        let (patient, conduct) = self.current_conduct()?;

        let handout = generate::generate_handout(&self.reasoning, patient, conduct)
            .await
            .map_err(|e| AppError::reasoning(msg::GENERATE_HANDOUT, e))?;

        Ok(render_care_plan(patient, conduct, &handout, today)?)
    }

    fn current_conduct(&self) -> Result<(&PatientData, &Conduct), AppError> {
        match &self.screen {
            Screen::Report(view) => {
                if view.alert {
                    return Err(AppError::State("oral-therapy alerts have no conduct"));
                }
                let conduct = view
                    .entry
                    .as_ref()
                    .map(|e| e.latest_conduct())
                    .unwrap_or(&view.report.final_conduct);
                Ok((&view.patient, conduct))
            }
            Screen::AdjustmentReport { entry, report, .. } => {
                Ok((&entry.patient, &report.adjusted_conduct))
            }
            _ => Err(AppError::State("no conduct is being shown")),
        }
    }

    // ── Demo data ────────────────────────────────────────────────────────

    /// Insert the demo out-of-goal patient, once. Repeated calls are no-ops
    /// thanks to the duplicate-name guard.
    pub async fn add_demo_patient(&mut self, now: Timestamp) -> Result<(), AppError> {
        let mut entry = crate::seed::demo_entry(now);

        let exists = self
            .store
            .exists_by_patient_name(&entry.patient.name)
            .await
            .map_err(|e| AppError::storage(msg::SAVE_ENTRY, e))?;
        if exists {
            return Ok(());
        }

        let id = self
            .store
            .insert(&entry)
            .await
            .map_err(|e| AppError::storage(msg::SAVE_ENTRY, e))?;
        entry.id = Some(id);
        self.history.insert(0, entry);
        Ok(())
    }
}

fn intake_message(error: &CoreError) -> &'static str {
    match error {
        CoreError::MissingField(_) => msg::INTAKE_REQUIRED,
        _ => msg::UNEXPECTED,
    }
}

fn follow_up_message(error: &CoreError) -> &'static str {
    match error {
        CoreError::MissingField(field) if field == "current_weight" => {
            msg::FOLLOW_UP_WEIGHT_REQUIRED
        }
        CoreError::MissingField(_) => msg::FOLLOW_UP_GLYCEMIA_REQUIRED,
        _ => msg::UNEXPECTED,
    }
}
