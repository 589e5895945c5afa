//! # BlogMini Shared
//!
//! Wire types shared between the HTTP service and its clients.

pub mod dto;
pub mod response;

pub use response::MessageResponse;
