//! mtls_dev_setup - Local mutual-TLS development environment provisioning.
//!
//! This binary prepares everything the demo Spring Boot server needs for
//! mutual TLS: a JDK with the local dev CA trusted, a PKCS#12 server
//! keystore, an application trust store, patched properties and a logback
//! config, then builds and launches the server.

mod cli;
mod error;
mod provision;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
