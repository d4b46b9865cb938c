use std::fs;
use std::path::Path;

use imageviewer_core::SessionConfig;

/// Load a JSON session config. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<SessionConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: SessionConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
