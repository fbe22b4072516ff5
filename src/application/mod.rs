//! Application layer: the authoritative payment service and the wizard that
//! drives a single user through a submission.

pub mod payments;
pub mod wizard;
