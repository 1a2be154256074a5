#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] ward_types::TextError),
    #[error("failed to load admissions page: {0}")]
    LoadMore(String),
}

pub type WardResult<T> = std::result::Result<T, WardError>;
