//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command, saving changes to `path`.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        ProfileAction::List => Ok(list_profiles(config, formatter)),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, path, name, formatter),
        ProfileAction::Set {
            name,
            key,
            entity_url,
            search_url,
        } => set_profile(config, path, name, key, entity_url, search_url, formatter),
        ProfileAction::Delete { name } => delete_profile(config, path, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> String {
    if config.profiles.is_empty() {
        return formatter.info("No profiles configured");
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    let mut lines = vec!["Available profiles:".to_string()];
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            lines.push(format!("* {}", formatter.success(name)));
        } else {
            lines.push(format!("  {}", name));
        }
        lines.extend(describe(profile, "    "));
    }
    lines.join("\n")
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<String> {
    let profile = config.get_active_profile()?;

    let mut lines = vec![format!(
        "Active profile: {}",
        formatter.success(&config.active_profile)
    )];
    lines.extend(describe(profile, "  "));
    Ok(lines.join("\n"))
}

fn describe(profile: &Profile, indent: &str) -> Vec<String> {
    vec![
        format!("{}Entity API: {}", indent, profile.entity_url),
        format!("{}Search API: {}", indent, profile.search_url),
        format!(
            "{}API key: {}",
            indent,
            profile.api_key.as_deref().map_or_else(|| "(not set)".to_string(), mask_key)
        ),
    ]
}

/// Keep the first four characters of a key visible.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}

/// Switch to a different profile.
fn switch_profile(
    config: &mut Config,
    path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<String> {
    config.switch_profile(name.clone())?;
    config.save_to(path)?;
    Ok(formatter.success(&format!("Switched to profile '{}'", name)))
}

/// Create or update a profile; unset options keep their current value.
fn set_profile(
    config: &mut Config,
    path: &Path,
    name: String,
    key: Option<String>,
    entity_url: Option<String>,
    search_url: Option<String>,
    formatter: &Formatter,
) -> Result<String> {
    let existing = config.profiles.get(&name).cloned();
    let action = if existing.is_some() { "Updated" } else { "Created" };

    let mut profile = existing.unwrap_or_default();
    if let Some(key) = key {
        profile.api_key = Some(key);
    }
    if let Some(url) = entity_url {
        profile.entity_url = url;
    }
    if let Some(url) = search_url {
        profile.search_url = url;
    }

    config.set_profile(name.clone(), profile);
    config.save_to(path)?;

    Ok(formatter.success(&format!("{} profile '{}'", action, name)))
}

/// Delete a profile.
fn delete_profile(
    config: &mut Config,
    path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<String> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save_to(path)?;
        Ok(formatter.success(&format!("Deleted profile '{}'", name)))
    } else {
        Ok(formatter.warning(&format!("Profile '{}' does not exist", name)))
    }
}
