use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    service: &'a str,
    environment: String,
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: &state.config.service_name,
        environment: state.config.environment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app_state, init_app};
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn health_reports_service_identity() {
        let app = init_app!(app_state());
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "hazard-web-test");
        assert_eq!(body["environment"], "test");
    }
}
