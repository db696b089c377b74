//! Staff-facing payment processing endpoints under `/api/payments/admin`.

mod get;
mod put;

pub use get::month_view;
pub use put::{bulk_process_payments, process_payment};
