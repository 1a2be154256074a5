//! Ward view session: latest snapshots plus the view derived from them.
//!
//! Bed layouts change when the location changes; admissions change every time a page arrives.
//! Each setter swaps in a new snapshot. The view is recomputed from scratch the next time it is
//! requested after either snapshot reference changed.

use std::sync::Arc;

use crate::model::{BedLayout, InpatientAdmission, WardView};
use crate::reconcile::reconcile;

#[derive(Debug)]
struct CachedView {
    bed_layouts: Arc<[BedLayout]>,
    admissions: Arc<[InpatientAdmission]>,
    view: Arc<WardView>,
}

#[derive(Debug)]
pub struct WardSession {
    bed_layouts: Arc<[BedLayout]>,
    admissions: Arc<[InpatientAdmission]>,
    cached: Option<CachedView>,
}

impl Default for WardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WardSession {
    pub fn new() -> Self {
        Self {
            bed_layouts: Arc::from(Vec::<BedLayout>::new()),
            admissions: Arc::from(Vec::<InpatientAdmission>::new()),
            cached: None,
        }
    }

    pub fn set_bed_layouts(&mut self, bed_layouts: impl Into<Arc<[BedLayout]>>) {
        self.bed_layouts = bed_layouts.into();
    }

    pub fn set_admissions(&mut self, admissions: impl Into<Arc<[InpatientAdmission]>>) {
        self.admissions = admissions.into();
    }

    /// The view for the current snapshots, reconciling only if a snapshot was replaced.
    pub fn view(&mut self) -> Arc<WardView> {
        if let Some(cached) = &self.cached {
            if Arc::ptr_eq(&cached.bed_layouts, &self.bed_layouts)
                && Arc::ptr_eq(&cached.admissions, &self.admissions)
            {
                return cached.view.clone();
            }
        }

        let view = Arc::new(reconcile(&self.bed_layouts, &self.admissions));
        tracing::debug!(
            beds = view.beds.len(),
            unassigned = view.unassigned.len(),
            "recomputed ward view"
        );
        self.cached = Some(CachedView {
            bed_layouts: self.bed_layouts.clone(),
            admissions: self.admissions.clone(),
            view: view.clone(),
        });
        view
    }
}
