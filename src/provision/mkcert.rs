//! mkcert detection, installation, and local CA initialization.

use std::path::{Path, PathBuf};

use crate::bail;
use crate::cli::OutputManager;

use super::config;
use super::error::{Error, Result};
use super::exec::Invocation;
use super::java::JavaHome;

/// A package manager able to install mkcert.
#[derive(Debug)]
pub struct PackageManager {
    /// Binary name probed on PATH
    pub name: &'static str,
    /// Arguments for a non-interactive mkcert install
    pub install_args: &'static [&'static str],
}

/// Supported package managers, in precedence order. First resolvable wins.
pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager { name: "brew", install_args: &["install", "mkcert"] },
    PackageManager { name: "apt-get", install_args: &["install", "-y", "mkcert"] },
    PackageManager { name: "dnf", install_args: &["install", "-y", "mkcert"] },
    PackageManager { name: "yum", install_args: &["install", "-y", "mkcert"] },
    PackageManager { name: "pacman", install_args: &["-S", "--noconfirm", "mkcert"] },
    PackageManager { name: "choco", install_args: &["install", "-y", "mkcert"] },
    PackageManager { name: "scoop", install_args: &["install", "mkcert"] },
];

/// Pick the first package manager the `available` probe accepts.
pub fn select_package_manager(available: impl Fn(&str) -> bool) -> Option<&'static PackageManager> {
    PACKAGE_MANAGERS.iter().find(|pm| available(pm.name))
}

/// Resolve mkcert on PATH, installing it if necessary.
///
/// Already resolvable: nothing is done. Otherwise one package manager is
/// selected by precedence and run; the run aborts if none is available, if
/// the install command fails, or if mkcert still does not resolve afterwards.
/// With `skip_install`, a missing mkcert is immediately terminal.
pub async fn ensure_installed(skip_install: bool, output: &OutputManager) -> Result<PathBuf> {
    if let Ok(path) = which::which("mkcert") {
        log::debug!("found mkcert at {}", path.display());
        output.warn("mkcert already installed, skipping installation")?;
        return Ok(path);
    }

    if skip_install {
        bail!(
            "mkcert is not on PATH and --skip-mkcert-install was given.\n{}",
            config::MKCERT_INSTALL_HELP
        );
    }

    let manager = select_package_manager(|name| which::which(name).is_ok()).ok_or_else(|| {
        Error::GenericError(format!(
            "mkcert is not installed and no supported package manager was found \
             (looked for: {}).\n{}",
            PACKAGE_MANAGERS
                .iter()
                .map(|pm| pm.name)
                .collect::<Vec<_>>()
                .join(", "),
            config::MKCERT_INSTALL_HELP
        ))
    })?;

    output.progress(&format!("Installing mkcert via {}...", manager.name))?;
    Invocation::new(manager.name)
        .args(manager.install_args.iter().copied())
        .run()
        .await?;

    which::which("mkcert").map_err(|_| {
        Error::GenericError(format!(
            "mkcert still not resolvable after {} ran. Check the installer output above.",
            manager.name
        ))
    })
}

/// Initialize the local CA and register it with the system stores.
///
/// `JAVA_HOME` is set in the child environment so mkcert also registers the
/// CA with the JDK trust store.
pub async fn install_local_ca(mkcert: &Path, java: &JavaHome) -> Result<()> {
    Invocation::new(mkcert)
        .arg("-install")
        .env("JAVA_HOME", java.home())
        .run()
        .await
}

/// The directory mkcert keeps its root CA in.
pub async fn ca_root(mkcert: &Path) -> Result<PathBuf> {
    let dir = Invocation::new(mkcert).arg("-CAROOT").capture().await?;
    if dir.is_empty() {
        bail!("mkcert -CAROOT printed nothing");
    }
    Ok(PathBuf::from(dir))
}

/// The root CA certificate inside the CA root directory.
pub fn root_cert(ca_root: &Path) -> PathBuf {
    ca_root.join("rootCA.pem")
}
