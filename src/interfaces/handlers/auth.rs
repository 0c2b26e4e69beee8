use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tracing::instrument;

use crate::entities::session::{LoginRequest, SessionInfoResponse};
use crate::errors::GateError;
use crate::use_cases::auth::bearer_token;
use crate::use_cases::extractors::SessionAuth;
use crate::utils::get_client_ip::get_client_ip;
use crate::AppState;

#[post("/login")]
#[instrument(skip(request, state, credentials))]
pub async fn login(
    request: HttpRequest,
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, GateError> {
    let addr = get_client_ip(&request, false);
    state.login_guard.check(&addr)?;

    match state.session_gate.login(&credentials) {
        Ok(response) => {
            state.login_guard.clear(&addr);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            if matches!(e, GateError::WrongCredentials) {
                state.login_guard.record_failure(&addr);
            }
            Err(e)
        }
    }
}

#[post("/logout")]
#[instrument(skip(request, state))]
pub async fn logout(
    request: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GateError> {
    let token = bearer_token(request.headers()).ok_or(GateError::MissingToken)?;
    state.session_gate.logout(&token)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Logged out"})))
}

#[get("/session")]
pub async fn session(auth: SessionAuth) -> HttpResponse {
    HttpResponse::Ok().json(SessionInfoResponse {
        started_at: auth.0.started_at,
    })
}
