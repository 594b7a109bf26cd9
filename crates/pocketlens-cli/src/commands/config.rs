//! Config command implementations

use std::path::Path;

use anyhow::Result;
use pocketlens_core::{config::default_config_path, ClientConfig};

pub fn cmd_config_show(config: &ClientConfig) -> Result<()> {
    println!();
    println!("⚙️  Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   API URL: {}", config.api_base_url);
    println!("   Timeout: {}s", config.timeout.as_secs());
    println!(
        "   Token:   {}",
        config
            .access_token
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "(none)".to_string())
    );
    Ok(())
}

pub fn cmd_config_path(explicit: Option<&Path>) -> Result<()> {
    match explicit
        .map(Path::to_path_buf)
        .or_else(default_config_path)
    {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), state);
        }
        None => println!("No config directory on this platform"),
    }
    Ok(())
}

/// Show only the last four characters of a token
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
