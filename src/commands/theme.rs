use serde_json::json;

use crate::commands::print_json;
use crate::config::{Config, Theme};
use crate::error::Result;

/// Show the current theme
pub async fn cmd_theme_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    if output_json {
        return print_json(&json!({ "theme": config.theme }));
    }
    println!("Tema actual: {}", config.theme);
    Ok(())
}

/// Set the theme
pub async fn cmd_theme_set(theme: Theme, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.theme = theme;
    config.save()?;
    if output_json {
        return print_json(&json!({ "theme": config.theme }));
    }
    println!("Tema cambiado a {}", config.theme);
    Ok(())
}

/// Switch to the other theme
pub async fn cmd_theme_toggle(output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.theme = config.theme.toggle();
    config.save()?;
    if output_json {
        return print_json(&json!({ "theme": config.theme }));
    }
    println!("Tema cambiado a {}", config.theme);
    Ok(())
}
