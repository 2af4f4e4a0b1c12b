pub mod hazards;
pub mod health;
pub mod partials;
pub mod trips;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(hazards::list)
        .service(hazards::create_report)
        .service(hazards::create_area)
        .service(hazards::delete_area)
        .service(hazards::reset)
        .service(trips::create)
        .service(trips::latest)
        .service(partials::report_popup)
        .service(partials::trip_status);
}
