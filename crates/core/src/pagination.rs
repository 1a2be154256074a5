//! Incremental loading of inpatient admissions.
//!
//! Admissions arrive a page at a time. The reconciler never sees the cursor itself, only the
//! materialised snapshot after each page, and is simply re-run on it.

use crate::model::InpatientAdmission;
use crate::WardResult;

/// A pull-based source of admission pages.
pub trait AdmissionCursor {
    /// Whether another page is available.
    fn has_more(&self) -> bool;

    /// Fetch the next page and append it to the snapshot.
    ///
    /// Calling this when `has_more` is false is a no-op.
    ///
    /// # Errors
    ///
    /// Implementations backed by a transport return `WardError::LoadMore` when a page fails.
    fn load_more(&mut self) -> WardResult<()>;

    /// Everything loaded so far, in arrival order.
    fn snapshot(&self) -> &[InpatientAdmission];
}

/// Observed state of a paginated fetch, used to decide whether to request the next page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadState {
    pub has_more: bool,
    pub is_loading: bool,
    pub has_error: bool,
}

impl LoadState {
    /// Idle state of `cursor`: nothing in flight, no failure recorded.
    pub fn of<C: AdmissionCursor + ?Sized>(cursor: &C) -> Self {
        Self {
            has_more: cursor.has_more(),
            ..Self::default()
        }
    }

    /// Load only when more pages exist, nothing is in flight and the last load did not fail.
    pub fn should_load_more(&self) -> bool {
        self.has_more && !self.is_loading && !self.has_error
    }
}

/// In-memory cursor releasing a fixed number of admissions per page.
#[derive(Clone, Debug)]
pub struct PagedAdmissions {
    source: Vec<InpatientAdmission>,
    page_size: usize,
    loaded: usize,
    pages: usize,
}

impl PagedAdmissions {
    /// Wrap `source`, releasing `page_size` entries per `load_more`. Nothing is loaded yet.
    ///
    /// A `page_size` of zero is treated as one.
    pub fn new(source: Vec<InpatientAdmission>, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            loaded: 0,
            pages: 0,
        }
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }
}

impl AdmissionCursor for PagedAdmissions {
    fn has_more(&self) -> bool {
        self.loaded < self.source.len()
    }

    fn load_more(&mut self) -> WardResult<()> {
        if !self.has_more() {
            return Ok(());
        }
        self.loaded = (self.loaded + self.page_size).min(self.source.len());
        self.pages += 1;
        tracing::debug!(
            page = self.pages,
            loaded = self.loaded,
            total = self.source.len(),
            "loaded admissions page"
        );
        Ok(())
    }

    fn snapshot(&self) -> &[InpatientAdmission] {
        &self.source[..self.loaded]
    }
}

/// Pull pages from `cursor` while its `LoadState` allows, calling `on_page` with each new
/// snapshot.
///
/// # Errors
///
/// A failed page sets `has_error`, which closes the gate; that error is returned.
pub fn drain<C, F>(cursor: &mut C, mut on_page: F) -> WardResult<()>
where
    C: AdmissionCursor,
    F: FnMut(&[InpatientAdmission]),
{
    let mut state = LoadState::of(&*cursor);
    let mut failure = None;

    while state.should_load_more() {
        state.is_loading = true;
        let loaded = cursor.load_more();
        state.is_loading = false;

        match loaded {
            Ok(()) => {
                on_page(cursor.snapshot());
                state.has_more = cursor.has_more();
            }
            Err(err) => {
                tracing::warn!(
                    loaded = cursor.snapshot().len(),
                    "admissions page failed: {err}"
                );
                state.has_error = true;
                failure = Some(err);
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
