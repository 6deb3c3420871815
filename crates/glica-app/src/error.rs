use thiserror::Error;

use glica_bedrock::error::BedrockError;
use glica_core::error::CoreError;
use glica_export::error::ExportError;
use glica_storage::error::StorageError;

/// User-facing messages (pt-BR, the product language). Every failed
/// operation surfaces one of these and leaves state untouched.
pub mod msg {
    pub const INTAKE_REQUIRED: &str = "HbA1c e Glicemia de Jejum são obrigatórios.";
    pub const FOLLOW_UP_WEIGHT_REQUIRED: &str = "O peso atual do paciente é obrigatório.";
    pub const FOLLOW_UP_GLYCEMIA_REQUIRED: &str =
        "Pelo menos um valor de Glicemia de Jejum ou HbA1c atual é necessário.";
    pub const LOAD_HISTORY: &str = "Não foi possível carregar o histórico de pacientes.";
    pub const SAVE_ENTRY: &str = "Falha ao salvar paciente no banco de dados.";
    pub const SAVE_ADJUSTMENT: &str = "Falha ao salvar ajuste no banco de dados.";
    pub const DELETE_ENTRY: &str = "Falha ao apagar o registro do histórico.";
    pub const GENERATE_REPORT: &str = "Falha ao gerar o relatório. O assistente pode \
         estar sobrecarregado. Tente novamente em alguns instantes.";
    pub const GENERATE_ADJUSTMENT: &str =
        "Não foi possível gerar o plano de ajuste terapêutico.";
    pub const GENERATE_HANDOUT: &str =
        "Não foi possível gerar as orientações para o paciente.";
    pub const UNEXPECTED: &str = "Ocorreu um erro inesperado. Tente novamente.";
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {source}")]
    Validation {
        message: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("persistence failure: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("reasoning failure: {source}")]
    Reasoning {
        message: &'static str,
        #[source]
        source: BedrockError,
    },

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("entry has not been saved to history yet")]
    EntryNotSaved,

    #[error("operation not valid on the current screen: {0}")]
    State(&'static str),
}

impl AppError {
    pub fn validation(message: &'static str, source: CoreError) -> Self {
        AppError::Validation { message, source }
    }

    pub fn storage(message: &'static str, source: StorageError) -> Self {
        AppError::Storage { message, source }
    }

    pub fn reasoning(message: &'static str, source: BedrockError) -> Self {
        AppError::Reasoning { message, source }
    }

    /// The localized message the UI shows for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Storage { message, .. }
            | AppError::Reasoning { message, .. } => message,
            AppError::Export(_) => msg::GENERATE_HANDOUT,
            AppError::EntryNotSaved => msg::SAVE_ADJUSTMENT,
            AppError::State(_) => msg::UNEXPECTED,
        }
    }
}
