//! Ward-wide defaults.

use crate::model::DispositionType;

/// Admissions released per page when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound accepted for a configured page size.
pub const MAX_PAGE_SIZE: usize = 1_000;

/// Requests a ward shows as pending when no disposition types are configured.
pub const DEFAULT_DISPOSITION_TYPES: [DispositionType; 2] =
    [DispositionType::Admit, DispositionType::Transfer];
