use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::{Level, Message};

const NO_ISSUES: &str = "\u{2714} No validation issues found when analyzing gateways.";

#[derive(Debug, Default, ValueEnum, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

/// Messages at or above `threshold`, in report order.
pub fn visible(messages: &[Message], threshold: Level) -> Vec<&Message> {
    messages.iter().filter(|m| threshold <= m.level).collect()
}

/// Whether any message reaches `threshold`.
pub fn fails(messages: &[Message], threshold: Level) -> bool {
    messages.iter().any(|m| threshold <= m.level)
}

pub fn render(messages: &[&Message], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text if messages.is_empty() => NO_ISSUES.to_string(),
        OutputFormat::Text => messages
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(messages)?,
        OutputFormat::Yaml => serde_yaml::to_string(messages)?,
    };

    Ok(rendered)
}
