//! Brand operations, including the per-brand model catalogue.

use reqwest::multipart::{Form, Part};

use super::{DataList, ListParams, Page};
use crate::cache::{MutationAction, QueryKey, Resource};
use crate::errors::AppError;
use crate::http::Auth;
use crate::models::{Brand, CarModel, NewBrand, NewCarModel};
use crate::AdminClient;

/// GET /brand/all — paginated brand list.
pub async fn list_brands(
    client: &AdminClient,
    params: &ListParams,
) -> Result<Page<Brand>, AppError> {
    let key = QueryKey::new(Resource::Brands, params.cache_key());
    client
        .cache
        .query(key, || async {
            client
                .http
                .get_json("/brand/all", &params.query(), Auth::Required)
                .await
        })
        .await
}

/// POST /brand/create — multipart create with the logo file.
pub async fn create_brand(client: &AdminClient, brand: NewBrand) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Brands, "new", "Add brand");
    client
        .cache
        .mutate(action, || async move {
            let logo = Part::bytes(brand.logo.bytes)
                .file_name(brand.logo.file_name)
                .mime_str(&brand.logo.content_type)
                .map_err(|e| AppError::Validation(format!("Invalid logo content type: {}", e)))?;

            let form = Form::new()
                .text("name", brand.name)
                .text("description", brand.description)
                .part("logo", logo);

            client
                .http
                .post_multipart("/brand/create", form, Auth::Required)
                .await
        })
        .await
}

/// DELETE /brand/{id}.
pub async fn delete_brand(client: &AdminClient, id: &str) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Brands, id, "Delete brand");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .delete(&format!("/brand/{}", id), Auth::Required)
                .await
        })
        .await
}

/// GET /brand/model/{brandId} — models belonging to one brand.
pub async fn list_models(client: &AdminClient, brand_id: &str) -> Result<Vec<CarModel>, AppError> {
    let key = QueryKey::new(Resource::Models, format!("brand={}", brand_id));
    let list: DataList<CarModel> = client
        .cache
        .query(key, || async {
            client
                .http
                .get_json(&format!("/brand/model/{}", brand_id), &[], Auth::Required)
                .await
        })
        .await?;
    Ok(list.data)
}

/// POST /brand/model.
pub async fn create_model(client: &AdminClient, model: NewCarModel) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Models, "new", "Add model");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .post_empty("/brand/model", &model, Auth::Required)
                .await
        })
        .await
}

/// DELETE /brand/model/{id}.
pub async fn delete_model(client: &AdminClient, id: &str) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Models, id, "Delete model");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .delete(&format!("/brand/model/{}", id), Auth::Required)
                .await
        })
        .await
}
