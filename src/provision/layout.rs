//! Resolved file locations inside the target Spring Boot project.

use std::path::{Path, PathBuf};

use super::config;

/// Paths the setup sequence reads and writes, all derived from the project
/// root so every step stays testable against a temporary directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at the given project directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `src/main/resources` of the application
    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("src/main/resources")
    }

    /// The PKCS#12 server keystore inside the resources directory
    pub fn server_keystore(&self) -> PathBuf {
        self.resources_dir().join(config::SERVER_KEYSTORE_FILE)
    }

    /// The PKCS#12 application trust store inside the resources directory
    pub fn truststore(&self) -> PathBuf {
        self.resources_dir().join(config::TRUSTSTORE_FILE)
    }

    /// The application properties file
    pub fn properties(&self) -> PathBuf {
        self.resources_dir().join("application.properties")
    }

    /// Backup of the properties file, written before any patch
    pub fn properties_backup(&self) -> PathBuf {
        self.resources_dir().join("application.properties.backup")
    }

    /// The logback configuration file
    pub fn logback(&self) -> PathBuf {
        self.resources_dir().join("logback-spring.xml")
    }

    /// The organizational root CA certificate (must exist before the run)
    pub fn org_root_ca(&self) -> PathBuf {
        self.root.join("certs/org-root-ca.pem")
    }

    /// The organizational issuing CA certificate (must exist before the run)
    pub fn org_issuing_ca(&self) -> PathBuf {
        self.root.join("certs/org-issuing-ca.pem")
    }

    /// The project's Gradle wrapper script
    pub fn gradle_wrapper(&self) -> PathBuf {
        #[cfg(windows)]
        let name = "gradlew.bat";
        #[cfg(not(windows))]
        let name = "gradlew";
        self.root.join(name)
    }
}
