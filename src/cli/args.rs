//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Local mutual-TLS development environment setup
#[derive(Parser, Debug)]
#[command(
    name = "mtls_dev_setup",
    version,
    about = "Provisions the local mutual-TLS environment for the demo Spring Boot server",
    long_about = "Provisions everything the demo server needs for mutual TLS.

Locates a JDK, installs mkcert if needed, initializes the local CA and
registers it with the JDK trust store, generates the PKCS#12 server keystore,
rebuilds the application trust store, patches application.properties, writes
logback-spring.xml once, then builds and launches the server with Gradle.

Usage:
  mtls_dev_setup
  mtls_dev_setup --java-home /usr/lib/jvm/java-17-openjdk
  mtls_dev_setup --build-only

After launch the server listens on https://localhost:8443/."
)]
pub struct Args {
    /// Java installation to use (must carry bin/keytool)
    #[arg(short = 'j', long, value_name = "PATH")]
    pub java_home: Option<PathBuf>,

    /// Never attempt to install mkcert; fail if it is missing
    #[arg(long)]
    pub skip_mkcert_install: bool,

    /// Run every step through the Gradle build, then exit without launching
    #[arg(short = 'b', long)]
    pub build_only: bool,

    /// Spring Boot project root to provision
    #[arg(short = 'p', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_dir.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project_dir.display()
            ));
        }

        let resources = self.project_dir.join("src/main/resources");
        if !resources.is_dir() {
            return Err(format!(
                "{} does not look like the Spring Boot project: missing {}",
                self.project_dir.display(),
                resources.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(_args: &Args) -> Self {
        let output = super::OutputManager::new(
            true,  // Always verbose
            false, // Never quiet
        );

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_only_and_java_home_parse() {
        let args = Args::try_parse_from([
            "mtls_dev_setup",
            "--build-only",
            "--java-home",
            "/opt/jdk",
        ])
        .unwrap();
        assert!(args.build_only);
        assert_eq!(args.java_home.unwrap(), PathBuf::from("/opt/jdk"));
        assert!(!args.skip_mkcert_install);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["mtls_dev_setup", "--frobnicate"]).is_err());
    }

    #[test]
    fn project_dir_defaults_to_cwd() {
        let args = Args::try_parse_from(["mtls_dev_setup"]).unwrap();
        assert_eq!(args.project_dir, PathBuf::from("."));
    }

    #[test]
    fn validation_requires_a_spring_layout() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::try_parse_from([
            "mtls_dev_setup",
            "--project-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        let reason = args.validate().unwrap_err();
        assert!(reason.contains("src/main/resources"));

        std::fs::create_dir_all(dir.path().join("src/main/resources")).unwrap();
        assert!(args.validate().is_ok());
    }
}
