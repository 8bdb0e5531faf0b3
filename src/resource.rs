use std::{collections::BTreeMap, fmt, path::PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// Resource kinds understood by the analyzers
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Kind {
    Gateway,
}

impl Kind {
    pub fn group(&self) -> &'static str {
        match self {
            Kind::Gateway => "networking.istio.io",
        }
    }

    /// `networking.istio.io/v1alpha3` などのapiVersionがこのKindのグループに属するか
    pub fn is_api_version(&self, api_version: &str) -> bool {
        api_version
            .split_once('/')
            .is_some_and(|(group, version)| group == self.group() && !version.is_empty())
    }
}

/// Namespace-qualified resource name, rendered as `namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FullName {
    pub namespace: String,
    pub name: String,
}

impl FullName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Where a resource was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub path: PathBuf,

    /// 0-based index of the YAML document inside `path`
    pub document: usize,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path.display(), self.document)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: Kind,
    pub full_name: FullName,
    pub origin: Option<Origin>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub metadata: Metadata,
    pub gateway: GatewayRecord,
}

impl Instance {
    pub fn new(full_name: FullName, gateway: GatewayRecord) -> Self {
        Self {
            metadata: Metadata {
                kind: Kind::Gateway,
                full_name,
                origin: None,
            },
            gateway,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.metadata.origin = Some(origin);
        self
    }

    pub fn full_name(&self) -> &FullName {
        &self.metadata.full_name
    }
}

/// `key:`のように値が空(null)のフィールドもデフォルト値として扱う
fn deserialize_unwrap_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// `spec` of an Istio Gateway, restricted to the fields the analyzers read.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRecord {
    #[serde(default, deserialize_with = "deserialize_unwrap_or_default")]
    pub selector: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "deserialize_unwrap_or_default")]
    pub servers: Vec<ServerSpec>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSpec {
    #[serde(default, deserialize_with = "deserialize_unwrap_or_default")]
    pub port: Port,

    #[serde(default, deserialize_with = "deserialize_unwrap_or_default")]
    pub hosts: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// 未設定のときは0
    #[serde(default, deserialize_with = "deserialize_unwrap_or_default")]
    pub number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}
