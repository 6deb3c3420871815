use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("template render error: {0}")]
    TemplateRender(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Tera(#[from] tera::Error),
}
