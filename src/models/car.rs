//! Car listing records and the enumerations behind the listing form dropdowns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ImageFile;

/// Fuel type of a listed car.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    #[serde(rename = "CNG")]
    Cng,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
            FuelType::Cng => "CNG",
        }
    }
}

/// Transmission of a listed car.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
        }
    }
}

/// Whether the car is listed as new or used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
        }
    }
}

/// Body style of a listed car.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BodyType {
    Sedan,
    Suv,
    Hatchback,
    Convertible,
    Coupe,
    Pickup,
    Van,
    Wagon,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Sedan => "SEDAN",
            BodyType::Suv => "SUV",
            BodyType::Hatchback => "HATCHBACK",
            BodyType::Convertible => "CONVERTIBLE",
            BodyType::Coupe => "COUPE",
            BodyType::Pickup => "PICKUP",
            BodyType::Van => "VAN",
            BodyType::Wagon => "WAGON",
        }
    }
}

/// Brand reference as embedded in a car listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A car listing as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    pub brand: BrandRef,
    /// Display name of the model
    pub model: String,
    pub year: i32,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km_run: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub is_sold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for `POST /car/create` (sent as multipart with the image files).
#[derive(Debug, Clone)]
pub struct NewCar {
    /// Selected brand id
    pub brand: String,
    /// Selected model id
    pub model_name: String,
    pub year: i32,
    pub price: i64,
    pub mileage: Option<i64>,
    pub km_run: Option<i64>,
    pub body_type: BodyType,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub condition: Condition,
    pub color: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub is_approved: bool,
    pub is_featured: bool,
    pub is_sold: bool,
    pub images: Vec<ImageFile>,
}

/// Request body for `PATCH /car/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub km_run: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sold: Option<bool>,
}
