//! Vendor bill derivation error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while deriving a vendor bill.
#[derive(Debug, Error)]
pub enum BillError {
    /// The purchase order already has a bill.
    ///
    /// At most one vendor bill may be derived from a purchase order; the
    /// `billed` status and the unique source reference both enforce this.
    #[error("Purchase Order already billed")]
    AlreadyBilled(Uuid),

    /// The purchase order was cancelled and cannot be billed.
    #[error("Purchase Order is cancelled")]
    Cancelled(Uuid),
}
