use actix_web::web;

use crate::handlers::{cards, images};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // /export must come before the /{id} routes so it is not read
        // as a card id.
        web::scope("/cards")
            .service(cards::export_cards)
            .service(cards::list_cards)
            .service(cards::add_card)
            .service(cards::get_card)
            .service(cards::update_card)
            .service(cards::delete_card)
    );

    cfg.service(
        web::scope("/images")
            .service(images::upload_image)
    );
}
