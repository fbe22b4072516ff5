//! Domain layer: records, money, the fee rule, the validation schemas and
//! the ports the application layer depends on.

pub mod charges;
pub mod money;
pub mod personal;
pub mod policy;
pub mod ports;
pub mod transaction;
pub mod validation;
