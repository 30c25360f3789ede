//! Core library for Taskpad
//!
//! This crate contains the task-management logic, including:
//! - The task model and status handling
//! - The task store and its synchronization with device storage
//! - Field validation for the create/edit flows

pub mod error;
pub mod task;
pub mod validate;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
