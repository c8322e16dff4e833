//! Local mutual-TLS development environment provisioning library
//!
//! This library drives the setup sequence for the demo Spring Boot server's
//! mutual-TLS environment:
//! - Java/JDK discovery and validation
//! - mkcert installation and local CA initialization
//! - JDK and application trust-store population
//! - Server keystore generation
//! - Properties and logging configuration patching
//! - Gradle build and launch
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod provision;

// Re-export commonly used types
pub use error::{CliError, Result, SetupError};
pub use provision::StepOutcome;
