use actix_web::web;

use crate::handlers::home::home;

mod auth;
mod cards;
mod dashboard;
mod system;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(cards::config_routes)
            .configure(dashboard::config_routes)
            .configure(system::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
