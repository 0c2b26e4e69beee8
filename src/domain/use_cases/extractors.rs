use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{entities::session::Session, errors::GateError};

/// Extractor for the session the gate middleware stored on the request.
/// Returns 401 when the request carries no live session.
/// Usage: Add `session: SessionAuth` as a parameter to your handler function.
#[derive(Debug)]
pub struct SessionAuth(pub Session);

impl FromRequest for SessionAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(SessionAuth(session.clone()))),
            None => ready(Err(GateError::MissingToken.into())),
        }
    }
}
