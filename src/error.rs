use thiserror::Error;

#[derive(Debug, Error)]
pub enum RippleError {
    #[error("schema parse error: {0}")]
    SchemaParse(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}
