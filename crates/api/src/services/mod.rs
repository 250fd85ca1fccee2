//! Business logic services.
//!
//! Services own the rules; repositories own the SQL. Each service borrows
//! the pool and builds its repositories on the fly.

pub mod auth;
pub mod orders;
pub mod payment;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use orders::{OrderError, OrderService};
pub use payment::{PaymentError, PaymentService, RazorpayClient};
pub use token::TokenService;
