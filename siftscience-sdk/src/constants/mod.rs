//! Static catalogs of the values the Sift APIs accept and return.
//!
//! Nothing here performs I/O; these enums exist so callers (and the client
//! itself) can use typed values instead of bare strings.

mod labels;
mod status;

pub use labels::{AbuseType, DeviceLabel, Reason};
pub use status::{
    DecisionSource, EntityType, RESPONSE_STATUS_MESSAGES, Status, TransactionType, status_message,
};
