//! Customer enquiry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of an enquiry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    Pending,
    Contacted,
    Rejected,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EnquiryStatus::Pending),
            "contacted" => Some(EnquiryStatus::Contacted),
            "rejected" => Some(EnquiryStatus::Rejected),
            _ => None,
        }
    }
}

/// Kind of enquiry, used as the `type` list filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryKind {
    General,
    Bidding,
}

impl EnquiryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryKind::General => "general",
            EnquiryKind::Bidding => "bidding",
        }
    }
}

/// A customer enquiry about a listed car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Car the enquiry refers to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<String>,
    /// Offered price on bidding enquiries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(rename = "type")]
    pub kind: EnquiryKind,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}
