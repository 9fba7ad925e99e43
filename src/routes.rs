use crate::{
    api::{attendance, roster},
    config::Config,
    utils::request::{json_config, query_config},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("rate limiter period and burst are non-zero");
    Governor::new(&cfg)
}

/// Mounts every endpoint under the configured prefix, rate limited per peer IP.
pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_per_min))
            .configure(endpoints),
    );
}

pub fn endpoints(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        // /attendance
        .service(
            web::resource("/attendance")
                .route(web::get().to(attendance::list_attendance))
                .route(web::post().to(attendance::create_attendance))
                .route(web::put().to(attendance::update_attendance))
                .route(web::delete().to(attendance::delete_attendance)),
        )
        .service(web::resource("/units").route(web::get().to(roster::list_units)))
        .service(web::resource("/positions").route(web::get().to(roster::list_positions)))
        .service(
            web::resource("/deduction-table").route(web::get().to(roster::get_deduction_table)),
        )
        .service(web::resource("/employees").route(web::get().to(roster::list_employees)))
        .service(web::resource("/calculate").route(web::post().to(roster::calculate)));
}
