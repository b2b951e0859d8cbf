use std::sync::{Arc, PoisonError, RwLock};

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::{get, post, Request, Shutdown, State};
use shared::models::{PhotoList, ReloadOutcome, TallySnapshot, VoteAccepted, VoteRequest};
use shared::Catalog;
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument};

use crate::broadcast::Hub;
use crate::client_info::ClientInfo;
use crate::config::Config;
use crate::error::ApiError;
use crate::processor::VoteProcessor;
use crate::rate_limiter::RateLimiter;
use crate::store::Ledger;
use crate::utils::read_catalog;

/// Vote admissions allowed per client address within one window.
pub const VOTE_RATE_LIMIT: u32 = 30;
pub const VOTE_RATE_WINDOW_SECONDS: i64 = 10;

/// How often idle result streams get a keep-alive comment.
const STREAM_HEARTBEAT_SECONDS: u64 = 15;

pub type SharedCatalog = Arc<RwLock<Catalog>>;

pub struct AppState {
    pub ledger: Ledger,
    pub catalog: SharedCatalog,
    pub hub: Hub,
    pub limiter: RateLimiter,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, ledger: Ledger) -> Self {
        Self {
            ledger,
            catalog: Arc::new(RwLock::new(catalog)),
            hub: Hub::new(),
            limiter: RateLimiter::new(
                VOTE_RATE_LIMIT,
                Duration::seconds(VOTE_RATE_WINDOW_SECONDS),
            ),
            config,
        }
    }
}

/// Request guard for the admin endpoints: the `X-Admin-Key` header must
/// match the configured key. With no key configured, every attempt is
/// rejected.
pub struct AdminKey;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminKey {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let configured = req
            .rocket()
            .state::<AppState>()
            .and_then(|state| state.config.admin_key.as_deref());

        match (configured, req.headers().get_one("X-Admin-Key")) {
            (Some(expected), Some(given)) if expected == given => Outcome::Success(AdminKey),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

#[get("/photos")]
pub async fn list_photos(state: &State<AppState>) -> Json<PhotoList> {
    let photos = read_catalog(&state.catalog).photos().to_vec();
    Json(PhotoList { photos })
}

#[get("/results")]
pub async fn get_results(state: &State<AppState>) -> Result<Json<TallySnapshot>, ApiError> {
    VoteProcessor::current_snapshot(state).await.map(Json)
}

#[instrument(skip(state, request, client), fields(photo_id = %request.photo_id))]
#[post("/vote", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    request: Json<VoteRequest>,
    client: ClientInfo,
) -> Result<Json<VoteAccepted>, ApiError> {
    if !state.limiter.allow(&client.ip, OffsetDateTime::now_utc()) {
        return Err(ApiError::RateLimited);
    }

    VoteProcessor::submit_vote(state, &request).await?;
    Ok(Json(VoteAccepted { ok: true }))
}

/// Live results feed. Emits one `results` event immediately on connect, then
/// one after every accepted vote until the client goes away or the server
/// shuts down.
#[get("/stream")]
pub async fn stream_results(
    state: &State<AppState>,
    mut end: Shutdown,
) -> Result<EventStream![], ApiError> {
    let initial = VoteProcessor::current_snapshot(state).await?;
    let mut subscription = state.hub.subscribe(initial);
    info!("Results subscriber {} connected", subscription.id());

    Ok(EventStream! {
        loop {
            let snapshot = tokio::select! {
                snapshot = subscription.next() => match snapshot {
                    Some(snapshot) => snapshot,
                    None => break,
                },
                _ = &mut end => break,
            };

            yield Event::json(&snapshot).event("results");
        }
    }
    .heartbeat(std::time::Duration::from_secs(STREAM_HEARTBEAT_SECONDS)))
}

/// Re-reads the catalog file and pushes the new results to every viewer.
/// A bad file leaves the running catalog untouched.
#[post("/admin/reload-photos")]
pub async fn reload_photos(
    state: &State<AppState>,
    _admin: AdminKey,
) -> Result<Json<ReloadOutcome>, ApiError> {
    let catalog = Catalog::load(&state.config.photos_path)
        .map_err(|e| ApiError::CatalogReload(e.to_string()))?;
    let photos = catalog.len();

    {
        let mut current = state
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = catalog;
    }
    info!("Catalog reloaded with {photos} photos");

    let snapshot = VoteProcessor::current_snapshot(state).await?;
    state.hub.publish(&snapshot);

    Ok(Json(ReloadOutcome { ok: true, photos }))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
