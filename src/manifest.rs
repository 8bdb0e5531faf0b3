use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use kube::{core::DynamicObject, ResourceExt as _};
use serde::Deserialize as _;
use serde_yaml::Value;

use crate::{
    error::ManifestError,
    logger,
    resource::{FullName, GatewayRecord, Instance, Kind, Origin},
};

const STDIN: &str = "-";

/// Gateways collected from YAML manifests.
#[derive(Debug)]
pub struct Manifests {
    default_namespace: String,
    instances: Vec<Instance>,
    seen: HashMap<FullName, PathBuf>,
}

impl Manifests {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            instances: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Loads a file, every `*.yaml`/`*.yml` file directly under a directory, or stdin for `-`.
    pub fn load(&mut self, path: &Path) -> Result<(), ManifestError> {
        if path.as_os_str() == STDIN {
            let source = io::read_to_string(io::stdin()).map_err(|source| ManifestError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            return self.add_str(&source, path);
        }

        if path.is_dir() {
            for file in yaml_files(path)? {
                self.load_file(&file)?;
            }

            return Ok(());
        }

        self.load_file(path)
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ManifestError> {
        let source = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.add_str(&source, path)
    }

    /// Adds every Istio Gateway found in `source`. Other objects are ignored.
    pub fn add_str(&mut self, source: &str, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let before = self.instances.len();

        for (document, de) in serde_yaml::Deserializer::from_str(source).enumerate() {
            let value = Value::deserialize(de).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                document,
                source,
            })?;

            for object in objects(value) {
                if !is_gateway(&object) {
                    continue;
                }

                let origin = Origin {
                    path: path.to_path_buf(),
                    document,
                };

                let instance = self.instance(object, origin)?;

                self.push(instance)?;
            }
        }

        logger!(
            info,
            "load {}: {} gateways",
            path.display(),
            self.instances.len() - before
        );

        Ok(())
    }

    fn instance(&self, object: Value, origin: Origin) -> Result<Instance, ManifestError> {
        let object: DynamicObject =
            serde_yaml::from_value(object).map_err(|source| ManifestError::Parse {
                path: origin.path.clone(),
                document: origin.document,
                source,
            })?;

        let full_name = FullName::new(
            object
                .namespace()
                .unwrap_or_else(|| self.default_namespace.clone()),
            object.name_any(),
        );

        // `spec:`だけで値がないときはnullになる
        let gateway = match object.data.get("spec") {
            Some(serde_json::Value::Null) | None => GatewayRecord::default(),
            Some(spec) => serde_json::from_value::<GatewayRecord>(spec.clone()).map_err(|source| {
                ManifestError::InvalidSpec {
                    name: full_name.to_string(),
                    path: origin.path.clone(),
                    source,
                }
            })?,
        };

        Ok(Instance::new(full_name, gateway).with_origin(origin))
    }

    fn push(&mut self, instance: Instance) -> Result<(), ManifestError> {
        let path = instance
            .metadata
            .origin
            .as_ref()
            .map(|origin| origin.path.clone())
            .unwrap_or_default();

        if let Some(first) = self.seen.get(instance.full_name()) {
            return Err(ManifestError::Duplicate {
                name: instance.full_name().to_string(),
                path,
                first: first.clone(),
            });
        }

        self.seen.insert(instance.full_name().clone(), path);
        self.instances.push(instance);

        Ok(())
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

/// `kind: List`のときはitemsを展開する
fn objects(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Mapping(ref mapping) if mapping.get("kind").and_then(Value::as_str) == Some("List") => {
            match mapping.get("items") {
                Some(Value::Sequence(items)) => items.clone(),
                _ => Vec::new(),
            }
        }
        value => vec![value],
    }
}

fn is_gateway(object: &Value) -> bool {
    let kind = object.get("kind").and_then(Value::as_str);
    let api_version = object.get("apiVersion").and_then(Value::as_str);

    kind == Some("Gateway")
        && api_version.is_some_and(|api_version| Kind::Gateway.is_api_version(api_version))
}

fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let read_error = |source| ManifestError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");

        if path.is_file() && is_yaml {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::resource::{Port, ServerSpec};

    fn load(source: &str) -> Result<Vec<Instance>, ManifestError> {
        let mut manifests = Manifests::new("default");
        manifests.add_str(source, "gateways.yaml")?;
        Ok(manifests.into_instances())
    }

    #[test]
    fn gateway_with_namespace() {
        let actual = load(indoc! {
            r#"
            apiVersion: networking.istio.io/v1alpha3
            kind: Gateway
            metadata:
              name: bookinfo-gateway
              namespace: bookinfo
            spec:
              selector:
                istio: ingressgateway
              servers:
                - port:
                    number: 80
                    name: http
                    protocol: HTTP
                  hosts:
                    - "*"
            "#
        })
        .unwrap();

        let expected = vec![Instance::new(
            FullName::new("bookinfo", "bookinfo-gateway"),
            GatewayRecord {
                selector: BTreeMap::from([("istio".into(), "ingressgateway".into())]),
                servers: vec![ServerSpec {
                    port: Port {
                        number: 80,
                        name: Some("http".into()),
                        protocol: Some("HTTP".into()),
                    },
                    hosts: vec!["*".into()],
                }],
            },
        )
        .with_origin(Origin {
            path: PathBuf::from("gateways.yaml"),
            document: 0,
        })];

        assert_eq!(actual, expected);
    }

    #[test]
    fn skips_other_objects() {
        let actual = load(indoc! {
            "
            ---
            apiVersion: v1
            kind: Service
            metadata:
              name: svc
            ---
            apiVersion: gateway.networking.k8s.io/v1
            kind: Gateway
            metadata:
              name: k8s-gateway
            ---
            apiVersion: networking.istio.io/v1beta1
            kind: Gateway
            metadata:
              name: gw
            spec:
              servers:
                - port:
                    number: 443
                  hosts:
                    - a.com
            "
        })
        .unwrap();

        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].full_name(), &FullName::new("default", "gw"));
        assert_eq!(actual[0].metadata.origin.as_ref().map(|o| o.document), Some(2));
    }

    #[test]
    fn expands_list_items() {
        let actual = load(indoc! {
            "
            apiVersion: v1
            kind: List
            items:
              - apiVersion: networking.istio.io/v1
                kind: Gateway
                metadata:
                  name: a
              - apiVersion: networking.istio.io/v1
                kind: Gateway
                metadata:
                  name: b
            "
        })
        .unwrap();

        let names: Vec<_> = actual.iter().map(|i| i.full_name().to_string()).collect();

        assert_eq!(names, vec!["default/a", "default/b"]);
        assert_eq!(actual[0].gateway, GatewayRecord::default());
    }

    #[test]
    fn duplicate_name_is_error() {
        let actual = load(indoc! {
            "
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
            ---
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
              namespace: default
            "
        });

        assert!(matches!(actual, Err(ManifestError::Duplicate { .. })));
    }

    #[test]
    fn invalid_spec_is_error() {
        let actual = load(indoc! {
            "
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
            spec:
              servers: not-a-list
            "
        });

        assert!(matches!(actual, Err(ManifestError::InvalidSpec { .. })));
    }

    #[test]
    fn empty_spec_is_default() {
        let actual = load(indoc! {
            "
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
            spec:
            "
        })
        .unwrap();

        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].gateway, GatewayRecord::default());
    }

    #[test]
    fn empty_selector_is_default() {
        let actual = load(indoc! {
            "
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
            spec:
              selector:
              servers:
                - port:
                    number: 80
                  hosts:
                    - a.com
            "
        })
        .unwrap();

        assert_eq!(actual[0].gateway.selector, BTreeMap::new());
        assert_eq!(actual[0].gateway.servers[0].hosts, vec!["a.com"]);
    }

    #[test]
    fn empty_hosts_are_default() {
        let actual = load(indoc! {
            "
            apiVersion: networking.istio.io/v1
            kind: Gateway
            metadata:
              name: gw
            spec:
              selector:
                istio: ingressgateway
              servers:
                - port:
                    number: 80
                  hosts:
            "
        })
        .unwrap();

        let expected = vec![ServerSpec {
            port: Port {
                number: 80,
                ..Default::default()
            },
            hosts: Vec::new(),
        }];

        assert_eq!(actual[0].gateway.servers, expected);
    }

    #[test]
    fn broken_yaml_is_error() {
        let actual = load("kind: [Gateway");

        assert!(matches!(
            actual,
            Err(ManifestError::Parse { document: 0, .. })
        ));
    }
}
