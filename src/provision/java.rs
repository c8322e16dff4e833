//! Java installation discovery.
//!
//! An installation is only acceptable if `keytool` sits under its `bin`
//! directory, since every trust-store operation goes through it. Resolution
//! order: explicit path, conventional install locations, then the `java`
//! binary on PATH with the install root derived from its real location.

use std::path::{Path, PathBuf};

use super::config;
use super::error::{Error, Result};

#[cfg(windows)]
const KEYTOOL: &str = "keytool.exe";
#[cfg(not(windows))]
const KEYTOOL: &str = "keytool";

/// A validated Java installation root.
#[derive(Debug, Clone)]
pub struct JavaHome {
    home: PathBuf,
}

impl JavaHome {
    fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// The installation root, exported as `JAVA_HOME` to child processes.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Path to the `keytool` binary of this installation.
    pub fn keytool(&self) -> PathBuf {
        self.home.join("bin").join(KEYTOOL)
    }

    /// Path to the system trust store of this installation.
    ///
    /// Modern JDKs keep it at `lib/security/cacerts`; pre-9 layouts used
    /// `jre/lib/security/cacerts`.
    pub fn cacerts(&self) -> Result<PathBuf> {
        for candidate in ["lib/security/cacerts", "jre/lib/security/cacerts"] {
            let path = self.home.join(candidate);
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(Error::MissingPrerequisite {
            what: "JDK system trust store (cacerts)".to_string(),
            path: self.home.join("lib/security/cacerts"),
        })
    }
}

/// Locate a usable Java installation.
///
/// With an explicit path, that path must carry `bin/keytool` or the run
/// aborts before anything is written. Without one, conventional install
/// locations are probed first and the PATH `java` binary is the fallback.
pub fn locate(explicit: Option<&Path>) -> Result<JavaHome> {
    if let Some(path) = explicit {
        return validated(path).ok_or_else(|| Error::MissingPrerequisite {
            what: "keytool under the given Java home".to_string(),
            path: path.join("bin").join(KEYTOOL),
        });
    }

    if let Some(java) = first_valid(&candidate_homes()) {
        log::debug!("found Java under a conventional location: {}", java.home().display());
        return Ok(java);
    }

    from_path_java()
}

/// Accept `home` only if its `bin/keytool` exists.
fn validated(home: &Path) -> Option<JavaHome> {
    let keytool = home.join("bin").join(KEYTOOL);
    if keytool.is_file() {
        Some(JavaHome::new(home.to_path_buf()))
    } else {
        None
    }
}

/// First candidate directory that carries `bin/keytool`.
pub(crate) fn first_valid(candidates: &[PathBuf]) -> Option<JavaHome> {
    candidates.iter().find_map(|home| validated(home))
}

/// Expand the conventional install locations into concrete directories.
fn candidate_homes() -> Vec<PathBuf> {
    let mut homes = Vec::new();
    for pattern in config::JAVA_HOME_GLOBS {
        match glob::glob(pattern) {
            Ok(paths) => homes.extend(paths.flatten()),
            Err(e) => log::debug!("bad candidate pattern {}: {}", pattern, e),
        }
    }
    if let Some(home_dir) = dirs::home_dir() {
        homes.push(home_dir.join(".sdkman/candidates/java/current"));
    }
    homes
}

/// Derive the install root from the `java` binary on PATH.
///
/// Canonicalizes first so distro alternatives links resolve to the real
/// JDK before taking the grandparent of the binary.
fn from_path_java() -> Result<JavaHome> {
    let java = which::which("java").map_err(|_| Error::MissingPrerequisite {
        what: "a Java installation (no conventional location matched and java is not on PATH)"
            .to_string(),
        path: PathBuf::from("java"),
    })?;

    let real = java.canonicalize().map_err(|source| Error::Fs {
        operation: "resolving the java binary".to_string(),
        path: java.clone(),
        source,
    })?;

    let home = real
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| Error::MissingPrerequisite {
            what: "the installation root above the java binary".to_string(),
            path: real.clone(),
        })?;

    validated(home).ok_or_else(|| Error::MissingPrerequisite {
        what: "keytool next to the PATH java binary".to_string(),
        path: home.join("bin").join(KEYTOOL),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fake_jdk(root: &Path, name: &str, with_keytool: bool) -> PathBuf {
        let home = root.join(name);
        fs::create_dir_all(home.join("bin")).unwrap();
        if with_keytool {
            fs::write(home.join("bin").join(KEYTOOL), "").unwrap();
        }
        home
    }

    #[test]
    fn explicit_home_without_keytool_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let home = fake_jdk(dir.path(), "jdk-17", false);

        let err = locate(Some(&home)).unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite { .. }));
        assert!(err.to_string().contains("keytool"));
    }

    #[test]
    fn explicit_home_with_keytool_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let home = fake_jdk(dir.path(), "jdk-17", true);

        let java = locate(Some(&home)).unwrap();
        assert_eq!(java.home(), home);
        assert!(java.keytool().ends_with(Path::new("bin").join(KEYTOOL)));
    }

    #[test]
    fn first_candidate_with_keytool_wins() {
        let dir = tempfile::tempdir().unwrap();
        let bad = fake_jdk(dir.path(), "jre-only", false);
        let good = fake_jdk(dir.path(), "jdk-21", true);
        let later = fake_jdk(dir.path(), "jdk-22", true);

        let java = first_valid(&[bad, good.clone(), later]).unwrap();
        assert_eq!(java.home(), good);
    }

    #[test]
    fn cacerts_prefers_modern_layout() {
        let dir = tempfile::tempdir().unwrap();
        let home = fake_jdk(dir.path(), "jdk-17", true);
        fs::create_dir_all(home.join("lib/security")).unwrap();
        fs::write(home.join("lib/security/cacerts"), "").unwrap();

        let java = locate(Some(&home)).unwrap();
        assert_eq!(java.cacerts().unwrap(), home.join("lib/security/cacerts"));
    }

    #[test]
    fn cacerts_missing_is_a_prerequisite_error() {
        let dir = tempfile::tempdir().unwrap();
        let home = fake_jdk(dir.path(), "jdk-17", true);

        let java = locate(Some(&home)).unwrap();
        assert!(matches!(
            java.cacerts().unwrap_err(),
            Error::MissingPrerequisite { .. }
        ));
    }
}
