use tera::{Context, Tera};

use crate::trips::TripRecord;
use hazard_geo::HazardReport;

pub const REPORT_POPUP: &str = "partials/report_popup.html";
pub const TRIP_STATUS: &str = "partials/trip_status.html";

/// Templates are compiled into the binary so the service has no runtime
/// asset directory.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            REPORT_POPUP,
            include_str!("../templates/partials/report_popup.html"),
        ),
        (
            TRIP_STATUS,
            include_str!("../templates/partials/trip_status.html"),
        ),
    ])?;
    Ok(tera)
}

pub fn report_context(report: &HazardReport) -> Context {
    let mut context = Context::new();
    context.insert("report", report);
    context
}

pub fn trip_context(trip: Option<&TripRecord>) -> Context {
    let mut context = Context::new();
    context.insert("trip", &trip);
    context
}
