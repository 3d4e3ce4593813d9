//! Brand and model records.

use serde::{Deserialize, Serialize};

use super::ImageFile;

/// A car brand (manufacturer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Logo file name under the API's upload directory
    #[serde(default)]
    pub logo: Option<String>,
}

/// A model belonging to a brand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarModel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Owning brand id
    pub brand: String,
}

/// Fields for `POST /brand/create` (sent as multipart with the logo file).
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub description: String,
    pub logo: ImageFile,
}

/// Request body for `POST /brand/model`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCarModel {
    /// Owning brand id
    pub brand: String,
    pub name: String,
}
