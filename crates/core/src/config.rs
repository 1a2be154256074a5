//! Ward runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Request
//! handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DISPOSITION_TYPES, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::model::DispositionType;
use crate::{WardError, WardResult};

/// Ward configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WardConfig {
    page_size: usize,
    disposition_types: Vec<DispositionType>,
}

impl WardConfig {
    /// Create a new `WardConfig`.
    ///
    /// # Errors
    ///
    /// Returns `WardError::InvalidInput` if `page_size` is outside `1..=MAX_PAGE_SIZE` or no
    /// disposition types are given.
    pub fn new(page_size: usize, disposition_types: Vec<DispositionType>) -> WardResult<Self> {
        validate_page_size(page_size)?;
        if disposition_types.is_empty() {
            return Err(WardError::InvalidInput(
                "disposition_types cannot be empty".into(),
            ));
        }

        let mut deduped: Vec<DispositionType> = Vec::with_capacity(disposition_types.len());
        for t in disposition_types {
            if !deduped.contains(&t) {
                deduped.push(t);
            }
        }

        Ok(Self {
            page_size,
            disposition_types: deduped,
        })
    }

    /// Replace the page size, keeping the disposition types.
    pub fn with_page_size(self, page_size: usize) -> WardResult<Self> {
        validate_page_size(page_size)?;
        Ok(Self { page_size, ..self })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn disposition_types(&self) -> &[DispositionType] {
        &self.disposition_types
    }
}

impl Default for WardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            disposition_types: DEFAULT_DISPOSITION_TYPES.to_vec(),
        }
    }
}

fn validate_page_size(page_size: usize) -> WardResult<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(WardError::InvalidInput(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
        )));
    }
    Ok(())
}

/// Parse the admissions page size from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default page size.
pub fn page_size_from_env_value(value: Option<String>) -> WardResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(v) => v
            .parse::<usize>()
            .map_err(|e| WardError::InvalidInput(format!("invalid page size '{v}': {e}"))),
    }
}

/// Parse a comma-separated disposition type list, e.g. `ADMIT,TRANSFER`.
///
/// If `value` is `None` or empty/whitespace, returns the default set.
pub fn disposition_types_from_env_value(
    value: Option<String>,
) -> WardResult<Vec<DispositionType>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_DISPOSITION_TYPES.to_vec()),
        Some(v) => v
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<DispositionType>)
            .collect(),
    }
}
