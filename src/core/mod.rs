//! Core types shared by every part of claude-manager.
//!
//! Currently this is the error taxonomy ([`ManagerError`]) and the terminal
//! error presentation ([`ErrorContext`], [`user_friendly_error`]).

pub mod error;

pub use error::{ErrorContext, ManagerError, ManagerResult, user_friendly_error};
