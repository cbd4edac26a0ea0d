//! Services Layer
//!
//! Pure business logic without the HTTP layer. The sale and purchase services
//! are the only code paths that mutate stock; both run inside a single
//! database transaction.

pub mod purchase_service;
pub mod report_service;
pub mod sale_service;
pub mod store_service;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
    /// Malformed submission: missing fields, mismatched arrays, bad numbers
    InvalidInput(String),
    /// Business rule violation: insufficient stock, missing godown, etc.
    InvalidState(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}
