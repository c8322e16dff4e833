//! Fixed names, paths, and passwords used across the setup sequence.

/// Alias under which the local dev CA is stored, both in the JDK system
/// trust store and in the application trust store.
pub const DEV_CA_ALIAS: &str = "mkcert-dev-root";

/// Alias for the organizational root CA in the application trust store
pub const ORG_ROOT_ALIAS: &str = "org-root-ca";

/// Alias for the organizational issuing CA in the application trust store
pub const ORG_ISSUING_ALIAS: &str = "org-issuing-ca";

/// Default password of the JDK `cacerts` store
pub const CACERTS_STORE_PASS: &str = "changeit";

/// Password for the generated application trust store
pub const TRUSTSTORE_PASS: &str = "changeit";

/// Server keystore file name inside `src/main/resources`
pub const SERVER_KEYSTORE_FILE: &str = "server-cert.p12";

/// Application trust store file name inside `src/main/resources`
pub const TRUSTSTORE_FILE: &str = "truststore.p12";

/// Names the server certificate is issued for
pub const SERVER_CERT_HOSTS: &[&str] = &["localhost", "mtls-demo.local", "127.0.0.1", "::1"];

/// Where the demo server listens once launched (informational only)
pub const SERVER_URL: &str = "https://localhost:8443/";

/// Conventional Java install locations, probed in order when no explicit
/// path is given. Glob patterns; the first match carrying `bin/keytool` wins.
#[cfg(target_os = "linux")]
pub const JAVA_HOME_GLOBS: &[&str] = &["/usr/lib/jvm/*", "/usr/java/*", "/opt/java/*"];

#[cfg(target_os = "macos")]
pub const JAVA_HOME_GLOBS: &[&str] = &[
    "/Library/Java/JavaVirtualMachines/*/Contents/Home",
    "/opt/homebrew/opt/openjdk*/libexec/openjdk.jdk/Contents/Home",
];

#[cfg(windows)]
pub const JAVA_HOME_GLOBS: &[&str] = &[
    "C:\\Program Files\\Java\\*",
    "C:\\Program Files\\Eclipse Adoptium\\*",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub const JAVA_HOME_GLOBS: &[&str] = &["/usr/lib/jvm/*"];

/// Platform-specific mkcert install instructions
#[cfg(target_os = "macos")]
pub const MKCERT_INSTALL_HELP: &str = "Install it with: brew install mkcert";

#[cfg(target_os = "linux")]
pub const MKCERT_INSTALL_HELP: &str =
    "Install it with your package manager, e.g.: sudo apt-get install mkcert";

#[cfg(windows)]
pub const MKCERT_INSTALL_HELP: &str = "Install it with: choco install mkcert";

#[cfg(not(any(target_os = "linux", target_os = "macos", windows)))]
pub const MKCERT_INSTALL_HELP: &str = "See https://github.com/FiloSottile/mkcert#installation";
