//! Shared client contracts for the steel ERP.
//!
//! - `system::permissions`: role table, permission resolver, matrix, role form validation
//! - `shared::normalize`: raw API record access and the entity normalizers
//! - `domain`: canonical entity records

pub mod domain;
pub mod shared;
pub mod system;
