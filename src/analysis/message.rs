use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::resource::{FullName, Instance, Kind, Origin};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "Info"),
            Level::Warning => write!(f, "Warning"),
            Level::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageType {
    pub code: &'static str,
    pub level: Level,
}

pub const REFERENCED_RESOURCE_NOT_FOUND: MessageType = MessageType {
    code: "IST0101",
    level: Level::Error,
};

pub const CONFLICTING_GATEWAYS: MessageType = MessageType {
    code: "IST0145",
    level: Level::Error,
};

/// A finding reported against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub code: &'static str,
    pub level: Level,
    pub kind: Kind,
    pub resource: FullName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    pub text: String,
    pub parameters: Vec<String>,
}

impl Message {
    fn new(message_type: MessageType, instance: &Instance, text: String, parameters: Vec<String>) -> Self {
        Self {
            code: message_type.code,
            level: message_type.level,
            kind: instance.metadata.kind,
            resource: instance.metadata.full_name.clone(),
            origin: instance.metadata.origin.clone(),
            text,
            parameters,
        }
    }

    pub fn referenced_resource_not_found(
        instance: &Instance,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let value = value.into();

        Self::new(
            REFERENCED_RESOURCE_NOT_FOUND,
            instance,
            format!("Referenced {field} not found: {value:?}"),
            vec![field, value],
        )
    }

    pub fn conflicting_gateways(
        instance: &Instance,
        gateways: impl Into<String>,
        selector: impl Into<String>,
        port: impl Into<String>,
        hosts: impl Into<String>,
    ) -> Self {
        let gateways = gateways.into();
        let selector = selector.into();
        let port = port.into();
        let hosts = hosts.into();

        Self::new(
            CONFLICTING_GATEWAYS,
            instance,
            format!(
                "Conflict with gateways {gateways} (workload selector {selector}, port {port}, hosts {hosts})."
            ),
            vec![gateways, selector, port, hosts],
        )
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({} {}", self.level, self.code, self.kind, self.resource)?;

        if let Some(origin) = &self.origin {
            write!(f, " {origin}")?;
        }

        write!(f, ") {}", self.text)
    }
}
