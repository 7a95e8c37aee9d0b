use actix_web::{get, HttpResponse, Responder};

/// Liveness probe.
#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
