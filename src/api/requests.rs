//! Sell and scrap request operations.

use super::{ListParams, Page};
use crate::cache::{MutationAction, QueryKey, Resource};
use crate::errors::AppError;
use crate::http::Auth;
use crate::models::{RequestStatus, ScrapRequest, SellRequest, StatusUpdate};
use crate::AdminClient;

/// GET /sell/car — paginated sell requests.
pub async fn list_sell_requests(
    client: &AdminClient,
    params: &ListParams,
) -> Result<Page<SellRequest>, AppError> {
    let key = QueryKey::new(Resource::SellRequests, params.cache_key());
    client
        .cache
        .query(key, || async {
            client
                .http
                .get_json("/sell/car", &params.query(), Auth::Required)
                .await
        })
        .await
}

/// PATCH /sell/car/{id}/status.
pub async fn update_sell_request_status(
    client: &AdminClient,
    id: &str,
    status: RequestStatus,
) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::SellRequests, id, "Update sell request status");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .patch_empty(
                    &format!("/sell/car/{}/status", id),
                    &StatusUpdate { status },
                    Auth::Required,
                )
                .await
        })
        .await
}

/// GET /scrap/car/requests — paginated scrap requests.
pub async fn list_scrap_requests(
    client: &AdminClient,
    params: &ListParams,
) -> Result<Page<ScrapRequest>, AppError> {
    let key = QueryKey::new(Resource::ScrapRequests, params.cache_key());
    client
        .cache
        .query(key, || async {
            client
                .http
                .get_json("/scrap/car/requests", &params.query(), Auth::Required)
                .await
        })
        .await
}

/// PATCH /scrap/car/requests/{id}/status.
pub async fn update_scrap_request_status(
    client: &AdminClient,
    id: &str,
    status: RequestStatus,
) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::ScrapRequests, id, "Update scrap request status");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .patch_empty(
                    &format!("/scrap/car/requests/{}/status", id),
                    &StatusUpdate { status },
                    Auth::Required,
                )
                .await
        })
        .await
}
