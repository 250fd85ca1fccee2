//! Domain types for the storefront API.
//!
//! These types represent validated domain objects, kept separate from the
//! database row types in [`crate::db`].

pub mod order;
pub mod product;
pub mod survey;
pub mod user;

pub use order::{
    NewOrder, Order, OrderItem, OrderTotals, OrderWithUser, PaymentSnapshot, ReturnRequest,
    ShippingAddress,
};
pub use product::{ColorOption, NewProduct, Product, SizeVariant};
pub use survey::{AbandonmentSurvey, NewSurvey};
pub use user::User;
