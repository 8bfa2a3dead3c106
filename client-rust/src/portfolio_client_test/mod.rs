//! Test doubles for code built on [`crate::PortfolioClient`].

mod backend;

pub use backend::{DeferredResponse, MockBackend, MockResult};
