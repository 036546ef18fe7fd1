//! Typed client for the FitTrack REST backend.
//!
//! One async method per endpoint, grouped by resource. Requests are sent
//! once; nothing is retried or cached.

mod client;
mod exercises;
mod routines;
mod scope;
mod sessions;
mod users;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use scope::RequestScope;
pub use sessions::SessionUpdate;
