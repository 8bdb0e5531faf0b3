use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{
    analysis::Level,
    config::{Config, ConfigLoadOption},
    output::OutputFormat,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Command {
    /// Manifest files or directories to analyze ("-" reads stdin)
    #[arg(value_name = "PATH", required_unless_present = "list_analyzers")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, display_order = 1000)]
    pub output: Option<OutputFormat>,

    /// Minimum level of messages to print
    #[arg(long, value_enum, display_order = 1000)]
    pub output_threshold: Option<Level>,

    /// Exit with status 1 when a message reaches this level
    #[arg(long, value_enum, display_order = 1000)]
    pub failure_threshold: Option<Level>,

    /// Namespace for manifests without metadata.namespace
    #[arg(long, display_order = 1000)]
    pub default_namespace: Option<String>,

    /// List available analyzers and exit
    #[arg(long, display_order = 1000)]
    pub list_analyzers: bool,

    /// Logging
    #[arg(short = 'l', long, display_order = 1000)]
    pub logging: bool,

    /// Config file path
    #[arg(long, display_order = 1000)]
    pub config_file: Option<PathBuf>,
}

impl Command {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn config_load_option(&self) -> Result<ConfigLoadOption> {
        let option = if let Some(path) = &self.config_file {
            match path.try_exists() {
                Ok(true) => ConfigLoadOption::Path(path.clone()),
                Ok(false) => {
                    eprintln!("Config file not found: {:?}", path);

                    ConfigLoadOption::Default
                }
                Err(err) => {
                    eprintln!("Failed to check config file exists: {}", err);

                    ConfigLoadOption::Default
                }
            }
        } else {
            match xdg_config_home().map(|dir| dir.join("config.yaml")) {
                Some(path) if path.try_exists().unwrap_or(false) => ConfigLoadOption::Path(path),
                _ => ConfigLoadOption::Default,
            }
        };

        Ok(option)
    }

    /// Command line flags take precedence over the config file.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(format) = self.output {
            config.output.format = format;
        }

        if let Some(level) = self.output_threshold {
            config.output.output_threshold = level;
        }

        if let Some(level) = self.failure_threshold {
            config.output.failure_threshold = level;
        }

        if let Some(namespace) = &self.default_namespace {
            config.analysis.default_namespace = namespace.clone();
        }

        config
    }
}

fn xdg_config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME").map(|s| PathBuf::from(s).join("gwconflict")) {
        Some(path) => Some(path),
        None => dirs::home_dir().map(|home| home.join(".config").join("gwconflict")),
    }
}
