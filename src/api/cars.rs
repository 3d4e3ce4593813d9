//! Car listing operations.

use reqwest::multipart::{Form, Part};

use super::{CarPage, ListParams};
use crate::cache::{MutationAction, QueryKey, Resource};
use crate::errors::AppError;
use crate::http::Auth;
use crate::models::{NewCar, UpdateCar};
use crate::AdminClient;

/// GET /car/all — paginated car inventory, with free-text search.
pub async fn list_cars(client: &AdminClient, params: &ListParams) -> Result<CarPage, AppError> {
    let key = QueryKey::new(Resource::Cars, params.cache_key());
    client
        .cache
        .query(key, || async {
            client
                .http
                .get_json("/car/all", &params.query(), Auth::Required)
                .await
        })
        .await
}

/// POST /car/create — multipart create with the listing's image files.
pub async fn create_car(client: &AdminClient, car: NewCar) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Cars, "new", "Add car");
    client
        .cache
        .mutate(action, || async move {
            let form = car_form(car)?;
            client
                .http
                .post_multipart("/car/create", form, Auth::Required)
                .await
        })
        .await
}

/// PATCH /car/{id}.
pub async fn update_car(client: &AdminClient, id: &str, changes: UpdateCar) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Cars, id, "Update car");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .patch_empty(&format!("/car/{}", id), &changes, Auth::Required)
                .await
        })
        .await
}

/// DELETE /car/{id}.
pub async fn delete_car(client: &AdminClient, id: &str) -> Result<(), AppError> {
    let action = MutationAction::new(Resource::Cars, id, "Delete car");
    client
        .cache
        .mutate(action, || async move {
            client
                .http
                .delete(&format!("/car/{}", id), Auth::Required)
                .await
        })
        .await
}

/// Assemble the multipart payload for a new listing. Image files are appended
/// as repeated `images` parts.
fn car_form(car: NewCar) -> Result<Form, AppError> {
    let mut form = Form::new()
        .text("brand", car.brand)
        .text("modelName", car.model_name)
        .text("year", car.year.to_string())
        .text("price", car.price.to_string())
        .text("bodyType", car.body_type.as_str())
        .text("fuelType", car.fuel_type.as_str())
        .text("transmission", car.transmission.as_str())
        .text("condition", car.condition.as_str())
        .text("isApproved", car.is_approved.to_string())
        .text("isFeatured", car.is_featured.to_string())
        .text("isSold", car.is_sold.to_string());

    if let Some(mileage) = car.mileage {
        form = form.text("mileage", mileage.to_string());
    }
    if let Some(km_run) = car.km_run {
        form = form.text("kmRun", km_run.to_string());
    }
    if let Some(color) = car.color {
        form = form.text("color", color);
    }
    if let Some(description) = car.description {
        form = form.text("description", description);
    }
    if let Some(city) = car.city {
        form = form.text("city", city);
    }

    for image in car.images {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid image content type: {}", e)))?;
        form = form.part("images", part);
    }

    Ok(form)
}
