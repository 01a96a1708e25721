//! Wire-level types shared between Driftline clients and the server API.

pub mod domain;
pub mod error;
pub mod protocol;
