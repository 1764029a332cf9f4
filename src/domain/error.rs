#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),
}
