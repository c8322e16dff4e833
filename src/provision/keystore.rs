//! Server keystore generation.

use std::path::Path;

use crate::cli::OutputManager;

use super::config;
use super::error::{ErrorExt, Result};
use super::exec::Invocation;
use super::java::JavaHome;
use super::layout::ProjectLayout;
use super::StepOutcome;

/// Generate the PKCS#12 server keystore and place it in the resources
/// directory.
///
/// Skip-if-exists: an existing keystore is never regenerated, even if the
/// certificate inputs changed since. mkcert writes the bundle into the
/// project root, from where it is moved to its final location.
pub async fn build_server_keystore(
    mkcert: &Path,
    java: &JavaHome,
    layout: &ProjectLayout,
    output: &OutputManager,
) -> Result<StepOutcome> {
    let dest = layout.server_keystore();
    if dest.is_file() {
        output.warn(&format!(
            "server keystore {} already exists, keeping it",
            dest.display()
        ))?;
        return Ok(StepOutcome::Skipped);
    }

    let staging = layout.root().join(config::SERVER_KEYSTORE_FILE);
    Invocation::new(mkcert)
        .args(["-pkcs12", "-p12-file"])
        .arg(&staging)
        .args(config::SERVER_CERT_HOSTS.iter().copied())
        .env("JAVA_HOME", java.home())
        .current_dir(layout.root())
        .run()
        .await?;

    tokio::fs::create_dir_all(layout.resources_dir())
        .await
        .fs_context("creating the resources directory", &layout.resources_dir())?;
    move_file(&staging, &dest).await?;

    output.success(&format!("server keystore written to {}", dest.display()))?;
    Ok(StepOutcome::Done)
}

/// Rename, falling back to copy+remove when the rename crosses filesystems.
async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to)
        .await
        .fs_context("copying the keystore into the resources directory", to)?;
    tokio::fs::remove_file(from)
        .await
        .fs_context("removing the staged keystore", from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use crate::provision::java;
    use std::fs;

    #[tokio::test]
    async fn existing_keystore_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());

        let home = dir.path().join("jdk");
        fs::create_dir_all(home.join("bin")).unwrap();
        fs::write(home.join("bin/keytool"), "").unwrap();
        let java = java::locate(Some(&home)).unwrap();

        fs::create_dir_all(layout.resources_dir()).unwrap();
        fs::write(layout.server_keystore(), b"first run output").unwrap();

        // mkcert path is bogus; the skip must short-circuit before any spawn.
        let outcome = build_server_keystore(
            Path::new("/nonexistent/mkcert"),
            &java,
            &layout,
            &OutputManager::new(false, true),
        )
        .await
        .unwrap();

        assert_eq!(outcome, StepOutcome::Skipped);
        assert_eq!(
            fs::read(layout.server_keystore()).unwrap(),
            b"first run output"
        );
    }

    #[tokio::test]
    async fn move_file_replaces_staging_with_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("staging.p12");
        let to = dir.path().join("final.p12");
        fs::write(&from, b"bundle").unwrap();

        move_file(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"bundle");
    }
}
