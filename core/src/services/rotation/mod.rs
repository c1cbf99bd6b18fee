//! Refresh token rotation with reuse detection, logout and revocation.

mod config;
mod coordinator;
mod resolver;

#[cfg(test)]
mod tests;

pub use config::{RotationConfig, DEFAULT_STORE_TIMEOUT};
pub use coordinator::RotationCoordinator;
pub use resolver::PrincipalResolver;
