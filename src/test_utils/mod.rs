//! Test utilities.
//!
//! This module provides:
//! - Test data factories for events, subscriptions and signature headers
//! - In-memory implementations of the repository, provider and email ports
//! - `TestAppStateBuilder` for HTTP-level tests

mod app_state_builder;
mod billing_mocks;
mod email_mocks;
mod factories;

pub use app_state_builder::*;
pub use billing_mocks::*;
pub use email_mocks::*;
pub use factories::*;
