use actix_web::{get, HttpResponse, Responder};

use crate::entities::timeline::trip_timeline;

/// Trip header and timeline. Static data, no store involved.
#[get("")]
pub async fn timeline() -> impl Responder {
    HttpResponse::Ok().json(trip_timeline())
}
