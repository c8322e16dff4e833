//! Command line interface for the mutual-TLS environment setup.
//!
//! `run` executes the whole provisioning sequence strictly in order,
//! aborting on the first failed step. No retries, no rollback: already
//! completed steps stay completed.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, Result};
use crate::provision::config::SERVER_URL;
use crate::provision::{gradle, java, keystore, layout::ProjectLayout};
use crate::provision::{logging, mkcert, properties, truststore};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }
    let config = RuntimeConfig::from(&args);

    execute(&args, &config).await?;
    Ok(0)
}

/// Run the provisioning sequence against a validated argument set.
async fn execute(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let out = config.output();
    let layout = ProjectLayout::new(&args.project_dir);

    out.section("Locating Java")?;
    let java = java::locate(args.java_home.as_deref())?;
    out.success(&format!("using Java at {}", java.home().display()))?;

    out.section("Checking mkcert")?;
    let mkcert = mkcert::ensure_installed(args.skip_mkcert_install, out).await?;
    out.verbose(&format!("mkcert at {}", mkcert.display()))?;

    out.section("Initializing the local CA")?;
    mkcert::install_local_ca(&mkcert, &java).await?;
    let ca_root = mkcert::ca_root(&mkcert).await?;
    let root_cert = mkcert::root_cert(&ca_root);
    out.success(&format!("local CA ready under {}", ca_root.display()))?;

    out.section("Trusting the dev CA in the JDK")?;
    truststore::import_into_jdk(&java, &root_cert, out).await?;

    out.section("Building the server keystore")?;
    keystore::build_server_keystore(&mkcert, &java, &layout, out).await?;

    out.section("Rebuilding the application trust store")?;
    truststore::rebuild_app_truststore(&java, &layout, &root_cert, out).await?;

    out.section("Patching application.properties")?;
    properties::patch_file(&layout, out).await?;

    out.section("Writing the logging configuration")?;
    logging::write_config(&layout, out).await?;

    out.section("Building the application")?;
    let gradle = gradle::resolve_launcher(&layout)?;
    gradle::build(&gradle, &layout, &java).await?;

    if args.build_only {
        out.success("build complete, launch skipped (--build-only)")?;
        out.indent(&format!(
            "start it later with {} bootRun; it will listen on {}",
            gradle.display(),
            SERVER_URL
        ))?;
        return Ok(());
    }

    out.section("Launching the server")?;
    out.indent(&format!("the server will listen on {}", SERVER_URL))?;
    gradle::launch(&gradle, &layout, &java).await?;

    Ok(())
}
