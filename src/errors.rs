use thiserror::Error;

/// Failures surfaced to the submitter. None of these leave the book in a
/// partially-applied state beyond what the variant documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The intent failed validation; the book is untouched.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    /// Matching reached a resting order owned by the submitting client.
    /// Executions already produced against other clients within the same
    /// submission stay on the queue; the residual is discarded, not rested.
    #[error("self-trade rejected: client {client_id} crossed own resting order {resting_order_id}")]
    SelfTradeRejected {
        client_id: u64,
        resting_order_id: u64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CancelError {
    #[error("unknown order id {0}")]
    UnknownOrder(u64),
}
