//! UI-agnostic state machines behind the console's pages.
//!
//! The rendering layer owns widgets; these types own the behavior every page
//! repeats: pagination/search state, in-order application of list results,
//! and the dependent dropdowns of the add-car form.

mod car_form;
mod list;

pub use car_form::*;
pub use list::*;
