//! Trust-store population.
//!
//! Two distinct stores are touched here. The JDK system store (`cacerts`)
//! gets the local dev CA exactly once, guarded by an alias check. The
//! application trust store is rebuilt from scratch on every run: deleted,
//! then repopulated with the two organizational CAs (required) and the local
//! dev CA (best effort).

use std::io;
use std::path::Path;

use crate::cli::OutputManager;

use super::config;
use super::error::{Error, ErrorExt, Result};
use super::exec::Invocation;
use super::java::JavaHome;
use super::layout::ProjectLayout;
use super::StepOutcome;

/// Import the local dev root CA into the JDK system trust store.
///
/// Idempotent: if the alias is already present the step is skipped with a
/// warning. On import failure the exact manual remediation command is part
/// of the error, since the usual cause is a read-only JDK install.
pub async fn import_into_jdk(
    java: &JavaHome,
    root_cert: &Path,
    output: &OutputManager,
) -> Result<StepOutcome> {
    let cacerts = java.cacerts()?;
    let keytool = java.keytool();

    let present = Invocation::new(&keytool)
        .args(["-list", "-alias", config::DEV_CA_ALIAS, "-keystore"])
        .arg(&cacerts)
        .args(["-storepass", config::CACERTS_STORE_PASS])
        .env("JAVA_HOME", java.home())
        .probe()
        .await?;

    if present {
        output.warn(&format!(
            "alias '{}' already present in {}, skipping import",
            config::DEV_CA_ALIAS,
            cacerts.display()
        ))?;
        return Ok(StepOutcome::Skipped);
    }

    let import = Invocation::new(&keytool)
        .args([
            "-importcert",
            "-noprompt",
            "-trustcacerts",
            "-alias",
            config::DEV_CA_ALIAS,
            "-file",
        ])
        .arg(root_cert)
        .arg("-keystore")
        .arg(&cacerts)
        .args(["-storepass", config::CACERTS_STORE_PASS])
        .env("JAVA_HOME", java.home());

    match import.run().await {
        Ok(()) => {
            output.success(&format!(
                "dev CA trusted by the JDK as '{}'",
                config::DEV_CA_ALIAS
            ))?;
            Ok(StepOutcome::Done)
        }
        Err(Error::CommandStatus { code, .. }) => {
            output.warn("could not write to the JDK trust store; elevated privileges may be required")?;
            Err(Error::JavaTrustStoreImport {
                code,
                remediation: import.rendered(),
            })
        }
        Err(e) => Err(e),
    }
}

/// Delete and rebuild the application trust store.
///
/// The two organizational CA certificates must pre-exist; the local dev CA
/// import is best effort. Aliases never collide across runs because the
/// store starts empty every time.
pub async fn rebuild_app_truststore(
    java: &JavaHome,
    layout: &ProjectLayout,
    root_cert: &Path,
    output: &OutputManager,
) -> Result<()> {
    let org_root = layout.org_root_ca();
    let org_issuing = layout.org_issuing_ca();
    for (what, path) in [
        ("organizational root CA certificate", &org_root),
        ("organizational issuing CA certificate", &org_issuing),
    ] {
        if !path.is_file() {
            return Err(Error::MissingPrerequisite {
                what: what.to_string(),
                path: path.clone(),
            });
        }
    }

    let store = layout.truststore();
    match tokio::fs::remove_file(&store).await {
        Ok(()) => log::debug!("removed previous trust store {}", store.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("removing the previous trust store", &store),
    }
    tokio::fs::create_dir_all(layout.resources_dir())
        .await
        .fs_context("creating the resources directory", &layout.resources_dir())?;

    import_cert(java, &store, config::ORG_ROOT_ALIAS, &org_root).await?;
    import_cert(java, &store, config::ORG_ISSUING_ALIAS, &org_issuing).await?;

    // Best effort: a broken CAROOT should not sink the run at this point.
    if let Err(e) = import_cert(java, &store, config::DEV_CA_ALIAS, root_cert).await {
        output.warn(&format!(
            "could not add the local dev CA to {}: {}",
            store.display(),
            e
        ))?;
    }

    output.success(&format!("trust store rebuilt at {}", store.display()))?;
    Ok(())
}

/// One aliased certificate entry into a PKCS#12 store, creating it on first use.
async fn import_cert(java: &JavaHome, store: &Path, alias: &str, cert: &Path) -> Result<()> {
    Invocation::new(java.keytool())
        .args(["-importcert", "-noprompt", "-alias", alias, "-file"])
        .arg(cert)
        .arg("-keystore")
        .arg(store)
        .args([
            "-storetype",
            "PKCS12",
            "-storepass",
            config::TRUSTSTORE_PASS,
        ])
        .env("JAVA_HOME", java.home())
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use std::fs;

    fn quiet() -> OutputManager {
        OutputManager::new(false, true)
    }

    fn fake_java(root: &Path) -> JavaHome {
        let home = root.join("jdk");
        fs::create_dir_all(home.join("bin")).unwrap();
        fs::write(home.join("bin/keytool"), "").unwrap();
        crate::provision::java::locate(Some(&home)).unwrap()
    }

    #[tokio::test]
    async fn missing_org_certs_abort_before_any_import() {
        let dir = tempfile::tempdir().unwrap();
        let java = fake_java(dir.path());
        let layout = ProjectLayout::new(dir.path().join("project"));

        // Pre-create a stale store so we can observe it survives the abort.
        fs::create_dir_all(layout.resources_dir()).unwrap();
        fs::write(layout.truststore(), b"stale").unwrap();

        let err = rebuild_app_truststore(&java, &layout, Path::new("rootCA.pem"), &quiet())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite { .. }));
        assert_eq!(fs::read(layout.truststore()).unwrap(), b"stale");
    }

    #[tokio::test]
    async fn stale_store_is_deleted_once_prerequisites_hold() {
        let dir = tempfile::tempdir().unwrap();
        let java = fake_java(dir.path());
        let layout = ProjectLayout::new(dir.path().join("project"));

        fs::create_dir_all(layout.root().join("certs")).unwrap();
        fs::write(layout.org_root_ca(), "root pem").unwrap();
        fs::write(layout.org_issuing_ca(), "issuing pem").unwrap();
        fs::create_dir_all(layout.resources_dir()).unwrap();
        fs::write(layout.truststore(), b"stale").unwrap();

        // The fake keytool is not executable, so the rebuild fails at the
        // first import, after the destructive delete has already happened.
        let result =
            rebuild_app_truststore(&java, &layout, Path::new("rootCA.pem"), &quiet()).await;
        assert!(result.is_err());
        assert!(!layout.truststore().exists());
    }
}
