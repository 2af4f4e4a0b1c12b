use hazard_core::{AreaId, HazardError, HazardResult, ReportId};
use hazard_geo::{AreaKind, Coordinate, HazardArea, HazardReport, HazardSet, Severity};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Called once for every report accepted by the registry.
pub type ReportListener = Box<dyn Fn(&HazardReport) + Send + Sync>;

/// Session-scoped hazards. Evaluations never read it directly, they work on
/// the copy returned by [`HazardRegistry::snapshot`].
pub struct HazardRegistry {
    hazards: RwLock<HazardSet>,
    on_report_created: Option<ReportListener>,
}

impl HazardRegistry {
    pub fn new() -> Self {
        Self {
            hazards: RwLock::new(HazardSet::default()),
            on_report_created: None,
        }
    }

    pub fn with_listener(mut self, listener: ReportListener) -> Self {
        self.on_report_created = Some(listener);
        self
    }

    pub fn add_report(&self, location: Coordinate, severity: Severity) -> HazardResult<HazardReport> {
        if !location.is_valid() {
            return Err(HazardError::invalid_input(format!(
                "report location out of range: {}, {}",
                location.latitude, location.longitude
            )));
        }
        let report = HazardReport::new(location, severity);
        self.write().reports.push(report.clone());
        if let Some(listener) = &self.on_report_created {
            listener(&report);
        }
        Ok(report)
    }

    /// Stores a drawn area. Areas that cannot form a polygon are rejected
    /// here rather than carried into every evaluation.
    pub fn add_area(&self, kind: AreaKind, rings: Vec<Vec<Coordinate>>) -> HazardResult<HazardArea> {
        let area = HazardArea::new(kind, rings);
        area.validate()?;
        self.write().areas.push(area.clone());
        Ok(area)
    }

    pub fn remove_area(&self, id: AreaId) -> bool {
        let mut hazards = self.write();
        let before = hazards.areas.len();
        hazards.areas.retain(|area| area.id != id);
        hazards.areas.len() != before
    }

    pub fn report(&self, id: ReportId) -> Option<HazardReport> {
        self.read().reports.iter().find(|report| report.id == id).cloned()
    }

    pub fn snapshot(&self) -> HazardSet {
        self.read().clone()
    }

    pub fn reset(&self) {
        *self.write() = HazardSet::default();
    }

    fn read(&self) -> RwLockReadGuard<'_, HazardSet> {
        self.hazards.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HazardSet> {
        self.hazards.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HazardRegistry {
    fn default() -> Self {
        Self::new()
    }
}
