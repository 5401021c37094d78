use std::path::Path;

use anyhow::Context;
use researchdesk_models::{AccessDecision, AccessLevel, MenuEntry};
use researchdesk_permissions::{PermissionSession, generate_defaults, parse_permission_records};
use tracing::info;

/// Confirmed reset: the store holds the defaults when this returns `Ok`.
pub async fn reset(session: &PermissionSession) -> anyhow::Result<usize> {
    let count = session
        .save(generate_defaults())
        .await
        .context("Failed to store default permissions")?;
    info!(count, "Navigation permissions reset to defaults");
    Ok(count)
}

pub fn check(session: &PermissionSession, job_title: &str, navigation_item: &str) -> AccessDecision {
    session.decision(job_title, navigation_item)
}

pub fn menu(session: &PermissionSession, job_title: &str) -> Vec<MenuEntry> {
    session.menu(job_title)
}

/// Change one pair and wait until the store has the whole resulting table.
pub async fn set(
    session: &PermissionSession,
    job_title: &str,
    navigation_item: &str,
    access_level: &str,
) -> anyhow::Result<AccessDecision> {
    let access_level: AccessLevel = access_level.parse()?;

    let updated = session
        .resolver()
        .with_access_level(job_title, navigation_item, access_level)?;
    session
        .save(updated.records().to_vec())
        .await
        .context("Failed to store permission change")?;

    Ok(AccessDecision::new(job_title, navigation_item, access_level))
}

/// Write the session's table as a JSON array.
pub async fn export(session: &PermissionSession, path: &Path) -> anyhow::Result<usize> {
    let records = session.records();
    let body = serde_json::to_vec_pretty(&records)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(records.len())
}

/// Replace the store with a JSON array file. Any bad record rejects the
/// whole file.
pub async fn import(session: &PermissionSession, path: &Path) -> anyhow::Result<usize> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = parse_permission_records(&bytes)
        .with_context(|| format!("{} is not a valid permission table", path.display()))?;

    let count = session
        .save(records)
        .await
        .context("Failed to store imported permissions")?;
    info!(count, path = %path.display(), "Navigation permissions imported");
    Ok(count)
}

pub fn format_decision(decision: &AccessDecision) -> String {
    format!(
        "{} / {}: {} (view: {}, edit: {}, read-only: {})",
        decision.job_title,
        decision.navigation_item,
        decision.access_level,
        decision.can_view,
        decision.can_edit,
        decision.is_read_only
    )
}

pub fn format_menu(entries: &[MenuEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.read_only { " (read-only)" } else { "" };
            format!("  - {}{}", entry.navigation_item, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
