//! logback-spring.xml provisioning.

use crate::cli::OutputManager;

use super::error::{ErrorExt, Result};
use super::layout::ProjectLayout;
use super::StepOutcome;

/// The logging configuration written on first run. Console output only,
/// with security debugging turned up so certificate authentication
/// decisions are visible during development.
const LOGBACK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<configuration>
    <appender name="CONSOLE" class="ch.qos.logback.core.ConsoleAppender">
        <encoder>
            <pattern>%d{HH:mm:ss.SSS} [%thread] %-5level %logger{36} - %msg%n</pattern>
        </encoder>
    </appender>

    <logger name="org.springframework.security" level="DEBUG"/>
    <logger name="com.example.mtlsdemo" level="DEBUG"/>

    <root level="INFO">
        <appender-ref ref="CONSOLE"/>
    </root>
</configuration>
"#;

/// Write the fixed logback configuration, unless one already exists.
pub async fn write_config(layout: &ProjectLayout, output: &OutputManager) -> Result<StepOutcome> {
    let path = layout.logback();
    if path.is_file() {
        output.warn(&format!("{} already exists, keeping it", path.display()))?;
        return Ok(StepOutcome::Skipped);
    }

    tokio::fs::create_dir_all(layout.resources_dir())
        .await
        .fs_context("creating the resources directory", &layout.resources_dir())?;
    tokio::fs::write(&path, LOGBACK_XML)
        .await
        .fs_context("writing the logback configuration", &path)?;

    output.success(&format!("wrote {}", path.display()))?;
    Ok(StepOutcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use std::fs;

    #[tokio::test]
    async fn writes_the_fixed_document_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());

        let outcome = write_config(&layout, &OutputManager::new(false, true))
            .await
            .unwrap();

        assert_eq!(outcome, StepOutcome::Done);
        let written = fs::read_to_string(layout.logback()).unwrap();
        assert!(written.contains("org.springframework.security"));
    }

    #[tokio::test]
    async fn existing_config_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        fs::create_dir_all(layout.resources_dir()).unwrap();
        fs::write(layout.logback(), "<configuration/>").unwrap();

        let outcome = write_config(&layout, &OutputManager::new(false, true))
            .await
            .unwrap();

        assert_eq!(outcome, StepOutcome::Skipped);
        assert_eq!(
            fs::read_to_string(layout.logback()).unwrap(),
            "<configuration/>"
        );
    }
}
