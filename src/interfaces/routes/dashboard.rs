use actix_web::web;

use crate::handlers::{dashboard, timeline};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .service(dashboard::dashboard)
    );

    cfg.service(
        web::scope("/timeline")
            .service(timeline::timeline)
    );
}
