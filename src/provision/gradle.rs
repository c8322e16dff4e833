//! Gradle build and launch.

use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::exec::Invocation;
use super::java::JavaHome;
use super::layout::ProjectLayout;

/// Resolve the Gradle launcher for the project.
///
/// The project's own wrapper wins; `gradle` on PATH is the fallback.
pub fn resolve_launcher(layout: &ProjectLayout) -> Result<PathBuf> {
    let wrapper = layout.gradle_wrapper();
    if wrapper.is_file() {
        log::debug!("using the project Gradle wrapper {}", wrapper.display());
        return Ok(wrapper);
    }

    which::which("gradle").map_err(|_| {
        Error::MissingPrerequisite {
            what: "a Gradle launcher (no project wrapper, and gradle is not on PATH)".to_string(),
            path: wrapper,
        }
    })
}

/// Build the application. Non-zero exit aborts the run.
pub async fn build(gradle: &Path, layout: &ProjectLayout, java: &JavaHome) -> Result<()> {
    Invocation::new(gradle)
        .arg("build")
        .current_dir(layout.root())
        .env("JAVA_HOME", java.home())
        .run()
        .await
}

/// Launch the server in the foreground.
///
/// Blocks for the lifetime of the server process; normally ends when the
/// user interrupts it. A non-zero exit is surfaced as a failure.
pub async fn launch(gradle: &Path, layout: &ProjectLayout, java: &JavaHome) -> Result<()> {
    Invocation::new(gradle)
        .arg("bootRun")
        .current_dir(layout.root())
        .env("JAVA_HOME", java.home())
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn project_wrapper_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        fs::write(layout.gradle_wrapper(), "#!/bin/sh\n").unwrap();

        assert_eq!(resolve_launcher(&layout).unwrap(), layout.gradle_wrapper());
    }
}
