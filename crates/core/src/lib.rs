//! `satchel-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod data;
pub mod error;
pub mod id;

pub use data::{ItemData, data_eq};
pub use error::{DomainError, DomainResult};
pub use id::{ActorId, ItemKey};
