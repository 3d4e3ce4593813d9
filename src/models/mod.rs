//! Data models for the CarDikhao admin console.
//!
//! These models match the marketplace API's JSON wire format exactly
//! (Mongo-style `_id` keys, camelCase field names).

mod brand;
mod car;
mod enquiry;
mod request;
mod upload;
mod user;

pub use brand::*;
pub use car::*;
pub use enquiry::*;
pub use request::*;
pub use upload::*;
pub use user::*;
