//! Sell and scrap request records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Condition, FuelType, Transmission};

/// Processing state of a sell or scrap request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

/// A request from a seller to list their car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_phone: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<Transmission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_price: Option<i64>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A request to scrap an end-of-life vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email_id: String,
    pub phone_number: String,
    pub car_brand: String,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for the `/status` mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate<S> {
    pub status: S,
}
