//! The screen state machine.
//!
//! One discriminated value replaces the pile of booleans and optionals the
//! rendering layer would otherwise juggle: every screen carries exactly the
//! payload it needs, and transitions happen only through [`Session`]
//! methods, so an impossible combination (an adjustment report without its
//! follow-up data, say) cannot be represented.
//!
//! [`Session`]: crate::session::Session

use jiff::civil::Date;

use glica_core::models::adjustment::AdjustmentReportData;
use glica_core::models::follow_up::FollowUpData;
use glica_core::models::history::HistoryEntry;
use glica_core::models::patient::PatientData;
use glica_core::models::report::ReportData;

/// A generated or recalled report being shown.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub patient: PatientData,
    pub report: ReportData,
    /// Tag carried from the indication gate: the fixed "insulin not
    /// indicated" alert. The shell suppresses conduct and chart sections.
    pub alert: bool,
    /// True when recalled from history rather than freshly generated.
    pub viewing_history: bool,
    /// The saved entry backing this view, when there is one.
    pub entry: Option<HistoryEntry>,
}

#[derive(Debug, Clone, Default)]
pub enum Screen {
    #[default]
    Home,
    /// Name/date-of-birth intake for a new patient.
    NewPatient,
    /// The clinical data form.
    Calculator {
        name: String,
        dob: Option<Date>,
        age: i16,
    },
    Report(ReportView),
    History,
    Guide,
    /// Follow-up data collection for a saved entry.
    Reevaluation { entry: HistoryEntry },
    /// A freshly generated adjustment plan, not yet saved.
    AdjustmentReport {
        entry: HistoryEntry,
        follow_up: FollowUpData,
        report: AdjustmentReportData,
    },
}

impl Screen {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::NewPatient => "new-patient",
            Screen::Calculator { .. } => "calculator",
            Screen::Report(_) => "report",
            Screen::History => "history",
            Screen::Guide => "guide",
            Screen::Reevaluation { .. } => "re-evaluation",
            Screen::AdjustmentReport { .. } => "adjustment-report",
        }
    }
}
