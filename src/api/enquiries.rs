//! Customer enquiry operations.

use super::{ListParams, Page};
use crate::cache::{MutationAction, QueryKey, Resource};
use crate::errors::AppError;
use crate::http::Auth;
use crate::models::{Enquiry, EnquiryKind, EnquiryStatus, StatusUpdate};
use crate::AdminClient;

/// GET /enquiry — paginated enquiries of one kind.
pub async fn list_enquiries(
    client: &AdminClient,
    params: &ListParams,
    kind: EnquiryKind,
) -> Result<Page<Enquiry>, AppError> {
    let key = QueryKey::new(
        Resource::Enquiries,
        format!("{}&type={}", params.cache_key(), kind.as_str()),
    );
    client
        .cache
        .query(key, || async {
            let mut query = params.query();
            query.push(("type", kind.as_str().to_string()));
            client
                .http
                .get_json("/enquiry", &query, Auth::Required)
                .await
        })
        .await
}

/// PATCH /enquiry/{id}/status.
pub async fn update_enquiry_status(
    client: &AdminClient,
    id: &str,
    status: EnquiryStatus,
) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Enquiries, id, "Update enquiry status");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .patch_empty(
                    &format!("/enquiry/{}/status", id),
                    &StatusUpdate { status },
                    Auth::Required,
                )
                .await
        })
        .await
}
