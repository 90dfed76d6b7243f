//! REST routes

pub mod popups;

use actix_web::web;

/// Register every route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/popups")
            .route(web::get().to(popups::get_popups))
            .route(web::post().to(popups::create_popup))
            .route(web::put().to(popups::update_popup))
            .route(web::delete().to(popups::delete_popup)),
    )
    .service(
        web::resource("/api/popups/{id}")
            .route(web::get().to(popups::get_popup_by_path))
            .route(web::put().to(popups::update_popup_by_path))
            .route(web::delete().to(popups::delete_popup_by_path)),
    );
}
