use backend::catchers::{
    bad_request, internal_error, not_found, too_many_requests, unauthorized, unprocessable_entity,
};
use backend::config::Config;
use backend::cors::CORS;
use backend::routes::{
    all_options, cast_vote, get_results, list_photos, reload_photos, stream_results, AppState,
};
use backend::store::Ledger;
use rocket::{catchers, routes};
use shared::Catalog;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    // An invalid catalog is fatal at startup.
    let catalog = Catalog::load(&config.photos_path)?;
    info!("Loaded {} photos from {}", catalog.len(), config.photos_path);

    if config.admin_key.is_none() {
        warn!("ADMIN_KEY not set, admin endpoints are disabled");
    }

    let ledger = Ledger::open(&config.database_path).await?;
    info!("Vote ledger open at {}", config.database_path);

    let port = config.port;
    let state = AppState::new(config, catalog, ledger);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(CORS)
        .manage(state)
        .mount(
            "/api",
            routes![
                list_photos,
                get_results,
                cast_vote,
                stream_results,
                reload_photos,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                unprocessable_entity,
                too_many_requests,
                internal_error
            ],
        )
        .launch()
        .await?;

    Ok(())
}
