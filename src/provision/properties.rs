//! application.properties patching.
//!
//! Purely textual, line-oriented editing keyed on exact `key=` prefixes.
//! This is deliberately not a properties parser: unknown lines, comments,
//! and ordering all pass through untouched, and the original file is backed
//! up before anything is rewritten.

use crate::cli::OutputManager;

use super::error::{Error, ErrorExt, Result};
use super::layout::ProjectLayout;

/// Properties enforced by the patcher, in the order missing ones are appended.
pub const EXPECTED_PROPERTIES: &[(&str, &str)] = &[
    ("server.ssl.trust-store", "classpath:truststore.p12"),
    ("server.ssl.trust-store-password", "changeit"),
    ("server.ssl.trust-store-type", "PKCS12"),
    ("server.ssl.client-auth", "need"),
];

/// Comment line written above an appended property block
const APPEND_HEADER: &str = "# Mutual TLS trust store (added by mtls_dev_setup)";

/// Rewrite `contents` so every expected property holds its expected value.
///
/// A line matches a property when it starts with `key=` (the full key, then
/// the separator, so `server.ssl.trust-store=` never captures the
/// `-password` line). Matching lines are replaced in place regardless of
/// their current value; properties matched nowhere are appended as one block
/// at the end, in the fixed order above.
pub fn patch(contents: &str) -> String {
    let mut seen = [false; EXPECTED_PROPERTIES.len()];
    let mut lines: Vec<String> = Vec::new();

    for line in contents.lines() {
        let mut replaced = None;
        for (i, (key, value)) in EXPECTED_PROPERTIES.iter().enumerate() {
            if line_matches(line, key) {
                replaced = Some(format!("{}={}", key, value));
                seen[i] = true;
                break;
            }
        }
        lines.push(replaced.unwrap_or_else(|| line.to_string()));
    }

    if seen.iter().any(|s| !s) {
        if lines.last().is_some_and(|l| !l.trim().is_empty()) {
            lines.push(String::new());
        }
        lines.push(APPEND_HEADER.to_string());
        for (i, (key, value)) in EXPECTED_PROPERTIES.iter().enumerate() {
            if !seen[i] {
                lines.push(format!("{}={}", key, value));
            }
        }
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}

fn line_matches(line: &str, key: &str) -> bool {
    line.strip_prefix(key)
        .is_some_and(|rest| rest.starts_with('='))
}

/// Patch the project's properties file, writing a backup first.
///
/// The file must already exist; this tool never creates an application
/// configuration from nothing.
pub async fn patch_file(layout: &ProjectLayout, output: &OutputManager) -> Result<()> {
    let path = layout.properties();
    if !path.is_file() {
        return Err(Error::MissingPrerequisite {
            what: "application.properties".to_string(),
            path,
        });
    }

    let backup = layout.properties_backup();
    tokio::fs::copy(&path, &backup)
        .await
        .fs_context("writing the properties backup", &backup)?;
    log::debug!("backed up {} to {}", path.display(), backup.display());

    let contents = tokio::fs::read_to_string(&path)
        .await
        .fs_context("reading the properties file", &path)?;
    tokio::fs::write(&path, patch(&contents))
        .await
        .fs_context("writing the patched properties file", &path)?;

    output.success(&format!("patched {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use std::fs;

    #[test]
    fn existing_client_auth_value_is_forced_to_need() {
        let patched = patch("server.port=8443\nserver.ssl.client-auth=want\n");
        assert!(patched.contains("server.ssl.client-auth=need\n"));
        assert!(!patched.contains("want"));
    }

    #[test]
    fn absent_properties_are_appended_once_in_fixed_order() {
        let patched = patch("server.port=8443\n");

        let trust_lines: Vec<&str> = patched
            .lines()
            .filter(|l| l.starts_with("server.ssl."))
            .collect();
        assert_eq!(
            trust_lines,
            vec![
                "server.ssl.trust-store=classpath:truststore.p12",
                "server.ssl.trust-store-password=changeit",
                "server.ssl.trust-store-type=PKCS12",
                "server.ssl.client-auth=need",
            ]
        );
        // untouched line survives
        assert!(patched.starts_with("server.port=8443\n"));
    }

    #[test]
    fn trust_store_key_does_not_capture_the_password_line() {
        let patched = patch(
            "server.ssl.trust-store-password=hunter2\nserver.ssl.trust-store=old.p12\n",
        );
        assert!(patched.contains("server.ssl.trust-store-password=changeit\n"));
        assert!(patched.contains("server.ssl.trust-store=classpath:truststore.p12\n"));
        // both keys matched in place, so nothing got appended
        assert_eq!(
            patched.lines().filter(|l| l.contains("trust-store=")).count(),
            1
        );
    }

    #[test]
    fn replaced_lines_keep_their_position() {
        let patched = patch("a=1\nserver.ssl.client-auth=none\nb=2\n");
        let lines: Vec<&str> = patched.lines().collect();
        assert_eq!(lines[0], "a=1");
        assert_eq!(lines[1], "server.ssl.client-auth=need");
        assert_eq!(lines[2], "b=2");
    }

    #[test]
    fn patching_twice_is_stable() {
        let once = patch("server.port=8443\n");
        let twice = patch(&once);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn backup_is_written_before_the_patch() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        fs::create_dir_all(layout.resources_dir()).unwrap();
        fs::write(layout.properties(), "server.port=8443\n").unwrap();

        patch_file(&layout, &OutputManager::new(false, true))
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(layout.properties_backup()).unwrap(),
            "server.port=8443\n"
        );
        assert!(fs::read_to_string(layout.properties())
            .unwrap()
            .contains("server.ssl.client-auth=need"));
    }

    #[tokio::test]
    async fn missing_properties_file_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());

        let err = patch_file(&layout, &OutputManager::new(false, true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingPrerequisite { .. }));
        assert!(!layout.properties_backup().exists());
    }
}
