//! # BlogMini Core
//!
//! The domain layer of BlogMini.
//! This crate contains the post model, the storage ports, and the post
//! service. It performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
