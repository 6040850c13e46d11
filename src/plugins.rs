//! External plugin discovery and dispatch
//!
//! Any executable named `crew-<name>` on PATH is a plugin. The core CLI
//! forwards unrecognized subcommands to the matching binary, passing shared
//! context (config path, debug flag, leftover arguments) through a JSON file
//! referenced by the `CREW_PLUGIN_CONTEXT` environment variable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::process::Command;

/// Prefix for external plugin executables
const PLUGIN_PREFIX: &str = "crew-";

/// Environment variable naming the context file handed to plugins
pub const PLUGIN_CONTEXT_ENV: &str = "CREW_PLUGIN_CONTEXT";

/// Environment variable enabling plugin debug output
pub const PLUGIN_DEBUG_ENV: &str = "CREW_DEBUG";

/// Context injected into every plugin invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginContext {
    /// Path of the config file the core CLI was using
    pub config_path: String,
    /// Plugin-specific arguments, everything after the plugin name
    pub args: Vec<String>,
    /// Whether debug output was requested
    pub debug: bool,
}

impl PluginContext {
    pub fn new(config_path: String, args: Vec<String>, debug: bool) -> Self {
        Self {
            config_path,
            args,
            debug,
        }
    }
}

/// Try to execute an external plugin
pub fn try_external_plugin(plugin_name: &str, context: &PluginContext) -> Result<()> {
    let binary_name = format!("{}{}", PLUGIN_PREFIX, plugin_name);

    // Hand the context over through a temp file; argv stays clean for the
    // plugin's own flag parsing.
    let context_file = env::temp_dir().join(format!("crew-plugin-{}.json", std::process::id()));
    std::fs::write(&context_file, serde_json::to_string(context)?)
        .context("Failed to write plugin context")?;

    let mut cmd = Command::new(&binary_name);
    cmd.args(&context.args)
        .env(PLUGIN_CONTEXT_ENV, &context_file);
    if context.debug {
        cmd.env(PLUGIN_DEBUG_ENV, "1");
    }

    let status = cmd.status().map_err(|e| {
        anyhow::anyhow!(
            "Plugin '{}' not found or failed to execute: {}",
            binary_name,
            e
        )
    });

    let _ = std::fs::remove_file(&context_file);
    let status = status?;

    if !status.success() {
        anyhow::bail!("Plugin '{}' exited with status: {}", binary_name, status);
    }

    Ok(())
}

/// Load the context injected by the core CLI
///
/// Returns `Ok(None)` when the process was not started through the plugin
/// dispatcher.
pub fn load_plugin_context() -> Result<Option<PluginContext>> {
    let Ok(path) = env::var(PLUGIN_CONTEXT_ENV) else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read plugin context: {}", path))?;
    let context = serde_json::from_str(&content).context("Corrupt plugin context")?;
    Ok(Some(context))
}

/// Whether plugin debug output was requested
pub fn is_debug_mode() -> bool {
    env::var(PLUGIN_DEBUG_ENV).is_ok()
}

/// List all available external plugins by scanning PATH
pub fn list_external_plugins() -> Vec<String> {
    let mut plugins = Vec::new();

    if let Ok(path_env) = env::var("PATH") {
        for path_dir in env::split_paths(&path_env) {
            if let Ok(entries) = std::fs::read_dir(&path_dir) {
                for entry in entries.flatten() {
                    if let Some(file_name) = entry.file_name().to_str()
                        && file_name.starts_with(PLUGIN_PREFIX)
                        && is_executable(&entry.path())
                        && let Some(plugin_name) = file_name.strip_prefix(PLUGIN_PREFIX)
                        && !plugin_name.is_empty()
                        && !plugins.contains(&plugin_name.to_string())
                    {
                        plugins.push(plugin_name.to_string());
                    }
                }
            }
        }
    }

    plugins.sort();
    plugins
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(path) {
            let permissions = metadata.permissions();
            return permissions.mode() & 0o111 != 0;
        }
    }

    #[cfg(windows)]
    {
        use std::ffi::OsStr;
        if let Some(extension) = path.extension().and_then(OsStr::to_str) {
            let executable_extensions = ["exe", "bat", "cmd", "com"];
            return executable_extensions
                .iter()
                .any(|&ext| ext.eq_ignore_ascii_case(extension));
        }
    }

    false
}
