// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::ui::{Section, Theme};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "server-room")]
#[command(about = "Animated server room backdrop with a navigation overlay", long_about = None)]
pub struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Start in this colour theme
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Start on this section
    #[arg(long, value_enum)]
    pub section: Option<Section>,

    /// Seed for phase offsets and layout jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable UI elements and show only the scene
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

impl Cli {
    /// Load the config file (if any) and layer the flags on top
    pub fn resolve(&self) -> anyhow::Result<AppConfig> {
        let config = AppConfig::load(self.config.as_deref())?;
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(section) = self.section {
            config.section = section;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        config.no_ui |= self.no_ui;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_value_enums() {
        let cli = Cli::parse_from(["server-room", "--theme", "light", "--section", "tools", "--seed", "42"]);
        assert_eq!(cli.theme, Some(Theme::Light));
        assert_eq!(cli.section, Some(Section::Tools));
        assert_eq!(cli.seed, Some(42));
        assert!(!cli.no_ui);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["server-room", "--no-ui", "--width", "640"]);
        let config = cli.apply(AppConfig::default());
        assert!(config.no_ui);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, AppConfig::default().window.height);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn resolve_without_file_uses_defaults() {
        let cli = Cli::parse_from(["server-room"]);
        assert_eq!(cli.resolve().unwrap(), AppConfig::default());
    }
}
