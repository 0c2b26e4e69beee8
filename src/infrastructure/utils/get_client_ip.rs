use actix_web::HttpRequest;

/// Address the login throttle keys on. `trust_x_forwarded_for` should
/// only be set when the service sits behind a proxy that rewrites the
/// header, otherwise a client could dodge the throttle by spoofing it.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        if let Some(forwarded) = req.headers().get("x-forwarded-for") {
            if let Ok(s) = forwarded.to_str() {
                return s.split(',').next().unwrap_or("").trim().to_string();
            }
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
