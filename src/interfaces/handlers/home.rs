use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Barcelona 2026 itinerary API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "login": "/api/v1/auth/login",
        "dashboard": "/api/v1/dashboard"
    }))
}
