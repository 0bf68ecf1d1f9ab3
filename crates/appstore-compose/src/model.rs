//! Compose application model.
//!
//! Mirrors the parts of the compose file format that the app store reads or
//! rewrites. Both the short and the long syntax are accepted for ports,
//! volumes, environment, labels and service networks; everything the model
//! does not name is kept verbatim in residual maps so a manifest survives a
//! parse/serialize cycle without losing fields.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::Error;
use crate::image::ImageRef;

/// Top-level key of the vendor extension block.
pub const EXTENSION_KEY: &str = "x-casaos";

/// A multi-service application manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposeApp {
    /// Project name, which is also the app identifier in the store.
    #[serde(default)]
    pub name: String,

    /// Services in document order.
    #[serde(default, with = "services_in_order")]
    pub services: Vec<ServiceConfig>,

    /// Top-level network definitions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, Option<NetworkConfig>>,

    /// Top-level named volumes, kept as written.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, Value>,

    /// Remaining top-level keys, including the `x-*` vendor blocks.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl ComposeApp {
    /// Parse a manifest from YAML.
    pub fn from_yaml(content: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize the manifest to YAML.
    pub fn to_yaml(&self) -> crate::Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// The raw `x-casaos` block, if the manifest carries one.
    pub fn extension(&self) -> Option<&Value> {
        self.extensions.get(EXTENSION_KEY)
    }

    /// The service named by `x-casaos.main`, or the first service when the
    /// manifest does not name one.
    pub fn main_service(&self) -> crate::Result<&ServiceConfig> {
        let declared = self
            .extension()
            .and_then(|ext| ext.get("main"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty());

        match declared {
            Some(name) => self.service(name).ok_or_else(|| Error::ServiceNotFound {
                app: self.name.clone(),
                service: name.to_owned(),
            }),
            None => self.services.first().ok_or_else(|| Error::NoServices {
                app: self.name.clone(),
            }),
        }
    }

    /// Image tag of the main service.
    pub fn main_tag(&self) -> crate::Result<String> {
        Ok(ImageRef::parse(&self.main_service()?.image).tag)
    }

    /// Image tag of the named service.
    pub fn service_tag(&self, service: &str) -> crate::Result<String> {
        let config = self.service(service).ok_or_else(|| Error::ServiceNotFound {
            app: self.name.clone(),
            service: service.to_owned(),
        })?;
        Ok(ImageRef::parse(&config.image).tag)
    }
}

/// One service of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name; the key under `services`.
    #[serde(skip)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Run-as identity (`uid[:gid]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,

    /// Host-published ports.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_ports"
    )]
    pub ports: Vec<PortConfig>,

    /// Container-only ports.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_expose"
    )]
    pub expose: Vec<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_volumes"
    )]
    pub volumes: Vec<VolumeMount>,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_service_networks"
    )]
    pub networks: BTreeMap<String, Option<ServiceNetwork>>,

    /// Environment; a `None` value inherits from the runtime.
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_environment"
    )]
    pub environment: BTreeMap<String, Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_labels"
    )]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Command>,

    /// Every other service key, kept as written.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServiceConfig {
    /// Whether the service runs in the default bridge mode, which is the only
    /// mode that may be moved onto a named network.
    pub fn uses_default_network_mode(&self) -> bool {
        matches!(self.network_mode.as_deref(), None | Some("") | Some("bridge"))
    }
}

/// A published port in long syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    /// Container-side port.
    pub target: u32,

    /// Host-side port or range.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub published: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl PortConfig {
    /// Parse a short-syntax port declaration:
    /// `[[host_ip:]published:]target[/protocol]`.
    ///
    /// A target range expands to one entry per port; a published range of the
    /// same length is paired element-wise.
    pub fn parse(spec: &str) -> crate::Result<Vec<Self>> {
        let invalid = || Error::InvalidPort {
            spec: spec.to_owned(),
        };

        let (body, protocol) = match spec.rsplit_once('/') {
            Some((body, protocol)) => (body, Some(protocol.to_owned())),
            None => (spec, None),
        };
        let (rest, target) = match body.rsplit_once(':') {
            Some((rest, target)) => (Some(rest), target),
            None => (None, body),
        };
        let (host_ip, published) = match rest {
            None => (None, None),
            Some(rest) => match rest.rsplit_once(':') {
                Some((ip, published)) => (
                    Some(ip.trim_start_matches('[').trim_end_matches(']').to_owned()),
                    Some(published),
                ),
                None => (None, Some(rest)),
            },
        };
        let published = published.filter(|p| !p.is_empty());

        let targets = parse_port_range(target).ok_or_else(invalid)?;
        let published_range = published.and_then(parse_port_range);

        let ports = targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let published = match &published_range {
                    Some(range) if targets.len() > 1 && range.len() == targets.len() => {
                        Some(range[i].to_string())
                    }
                    _ => published.map(str::to_owned),
                };
                PortConfig {
                    target: *target,
                    published,
                    protocol: protocol.clone(),
                    host_ip: host_ip.clone(),
                    mode: None,
                }
            })
            .collect();

        Ok(ports)
    }
}

fn parse_port_range(s: &str) -> Option<Vec<u32>> {
    match s.split_once('-') {
        Some((start, end)) => {
            let start: u32 = start.trim().parse().ok()?;
            let end: u32 = end.trim().parse().ok()?;
            (start <= end && end <= u32::from(u16::MAX)).then(|| (start..=end).collect())
        }
        None => s.trim().parse().ok().map(|port| vec![port]),
    }
}

/// A service volume mount in long syntax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Mount type (`bind`, `volume`, `tmpfs`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(default)]
    pub target: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VolumeMount {
    /// Parse a short-syntax volume declaration: `[source:]target[:mode]`.
    pub fn parse(spec: &str) -> crate::Result<Self> {
        let invalid = || Error::InvalidVolume {
            spec: spec.to_owned(),
        };

        let parts: Vec<&str> = spec.split(':').collect();
        let (source, target, mode) = match parts.as_slice() {
            [target] => ("", *target, None),
            [source, target] => (*source, *target, None),
            [source, target, mode] => (*source, *target, Some(*mode)),
            _ => return Err(invalid()),
        };
        if target.is_empty() {
            return Err(invalid());
        }

        let is_path = source.starts_with('/') || source.starts_with('.') || source.starts_with('~');
        let mut volume = VolumeMount {
            kind: if is_path { "bind" } else { "volume" }.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
            ..Default::default()
        };

        let mut bind = Mapping::new();
        for flag in mode.into_iter().flat_map(|m| m.split(',')) {
            match flag {
                "ro" => volume.read_only = true,
                "rw" | "" => {}
                "z" | "Z" => {
                    bind.insert("selinux".into(), flag.into());
                }
                "shared" | "rshared" | "slave" | "rslave" | "private" | "rprivate" => {
                    bind.insert("propagation".into(), flag.into());
                }
                "nocopy" => {
                    let mut options = Mapping::new();
                    options.insert("nocopy".into(), true.into());
                    volume.extra.insert("volume".to_owned(), Value::Mapping(options));
                }
                _ => return Err(invalid()),
            }
        }
        if !bind.is_empty() {
            volume.extra.insert("bind".to_owned(), Value::Mapping(bind));
        }

        Ok(volume)
    }
}

/// A service's attachment to a named network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceNetwork {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A top-level network definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "is_false",
        deserialize_with = "deserialize_external"
    )]
    pub external: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NetworkConfig {
    /// A pre-existing network managed outside the manifest.
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            external: true,
            ..Default::default()
        }
    }
}

/// `command` / `entrypoint` in either shell or exec form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    Shell(String),
    Exec(Vec<String>),
}

impl Command {
    /// Rewrite every string of the command.
    pub fn map_strings(&mut self, f: impl Fn(&str) -> String) {
        match self {
            Command::Shell(line) => *line = f(line),
            Command::Exec(args) => {
                for arg in args.iter_mut() {
                    *arg = f(arg);
                }
            }
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Render a YAML scalar as a string; non-scalars yield `None`.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept any scalar where a string is expected (`port_map: 8080`).
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_string(&value))
}

fn deserialize_ports<'de, D>(deserializer: D) -> Result<Vec<PortConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut ports = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(spec) => ports.extend(PortConfig::parse(&spec).map_err(de::Error::custom)?),
            Value::Number(n) => {
                ports.extend(PortConfig::parse(&n.to_string()).map_err(de::Error::custom)?)
            }
            Value::Mapping(_) => ports.push(serde_yaml::from_value(item).map_err(de::Error::custom)?),
            other => {
                return Err(de::Error::custom(format!(
                    "unsupported port entry: {other:?}"
                )));
            }
        }
    }
    Ok(ports)
}

fn deserialize_expose<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    items
        .iter()
        .map(|item| {
            scalar_string(item)
                .ok_or_else(|| de::Error::custom(format!("unsupported expose entry: {item:?}")))
        })
        .collect()
}

fn deserialize_volumes<'de, D>(deserializer: D) -> Result<Vec<VolumeMount>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    items
        .into_iter()
        .map(|item| match item {
            Value::String(spec) => VolumeMount::parse(&spec).map_err(de::Error::custom),
            Value::Mapping(_) => serde_yaml::from_value(item).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "unsupported volume entry: {other:?}"
            ))),
        })
        .collect()
}

fn deserialize_service_networks<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<ServiceNetwork>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Sequence(names)) => names
            .iter()
            .map(|name| {
                scalar_string(name)
                    .map(|name| (name, None))
                    .ok_or_else(|| de::Error::custom("network names must be strings"))
            })
            .collect(),
        Some(value @ Value::Mapping(_)) => serde_yaml::from_value(value).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "unsupported service networks: {other:?}"
        ))),
    }
}

fn deserialize_environment<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Mapping(map)) => map
            .iter()
            .map(|(key, value)| {
                let key = scalar_string(key)
                    .ok_or_else(|| de::Error::custom("environment keys must be strings"))?;
                Ok((key, scalar_string(value)))
            })
            .collect(),
        Some(Value::Sequence(entries)) => entries
            .iter()
            .map(|entry| {
                let entry = entry
                    .as_str()
                    .ok_or_else(|| de::Error::custom("environment entries must be strings"))?;
                Ok(match entry.split_once('=') {
                    Some((key, value)) => (key.to_owned(), Some(value.to_owned())),
                    None => (entry.to_owned(), None),
                })
            })
            .collect(),
        Some(other) => Err(de::Error::custom(format!(
            "unsupported environment: {other:?}"
        ))),
    }
}

fn deserialize_labels<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let environment = deserialize_environment(deserializer)?;
    Ok(environment
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

fn deserialize_external<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(external) => Ok(external),
        Value::Null => Ok(false),
        // Legacy `external: { name: ... }` form.
        Value::Mapping(_) => Ok(true),
        other => Err(de::Error::custom(format!(
            "unsupported external flag: {other:?}"
        ))),
    }
}

/// Services are a mapping in the document but an ordered list in the model.
mod services_in_order {
    use std::fmt;

    use serde::de::{self, Deserializer, MapAccess, Visitor};
    use serde::ser::{SerializeMap, Serializer};

    use super::ServiceConfig;

    pub fn serialize<S>(services: &[ServiceConfig], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(services.len()))?;
        for service in services {
            map.serialize_entry(&service.name, service)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ServiceConfig>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ServicesVisitor;

        impl<'de> Visitor<'de> for ServicesVisitor {
            type Value = Vec<ServiceConfig>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of service names to service definitions")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut services = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, mut service)) = access.next_entry::<String, ServiceConfig>()? {
                    service.name = name;
                    services.push(service);
                }
                Ok(services)
            }
        }

        deserializer.deserialize_any(ServicesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
name: nextcloud
services:
  nextcloud:
    image: nextcloud:29.0.4
    restart: unless-stopped
    ports:
      - "10080:80"
    volumes:
      - /DATA/AppData/nextcloud/html:/var/www/html
      - type: bind
        source: /DATA/Documents
        target: /documents
        read_only: true
    environment:
      - TZ
      - NEXTCLOUD_TRUSTED_DOMAINS=$domain
    depends_on:
      - db
  db:
    image: mariadb:11.4
    environment:
      MYSQL_PASSWORD: $default_pwd
x-casaos:
  main: nextcloud
  category: Cloud
"#;

    #[test]
    fn test_parses_services_in_document_order() {
        let app = ComposeApp::from_yaml(MANIFEST).unwrap();
        let names: Vec<&str> = app.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["nextcloud", "db"]);
    }

    #[test]
    fn test_parses_short_and_long_syntax() {
        let app = ComposeApp::from_yaml(MANIFEST).unwrap();
        let nextcloud = app.service("nextcloud").unwrap();

        assert_eq!(nextcloud.ports[0].target, 80);
        assert_eq!(nextcloud.ports[0].published.as_deref(), Some("10080"));

        assert_eq!(nextcloud.volumes[0].kind, "bind");
        assert_eq!(nextcloud.volumes[0].source, "/DATA/AppData/nextcloud/html");
        assert_eq!(nextcloud.volumes[1].target, "/documents");
        assert!(nextcloud.volumes[1].read_only);

        assert_eq!(nextcloud.environment.get("TZ"), Some(&None));
        assert_eq!(
            nextcloud.environment.get("NEXTCLOUD_TRUSTED_DOMAINS"),
            Some(&Some("$domain".to_string()))
        );
    }

    #[test]
    fn test_keeps_unmodelled_keys() {
        let app = ComposeApp::from_yaml(MANIFEST).unwrap();
        let nextcloud = app.service("nextcloud").unwrap();
        assert!(nextcloud.extra.contains_key("restart"));
        assert!(nextcloud.extra.contains_key("depends_on"));
        assert!(app.extension().is_some());

        let reparsed = ComposeApp::from_yaml(&app.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed, app);
    }

    #[test]
    fn test_main_service_prefers_declared_name() {
        let app = ComposeApp::from_yaml(MANIFEST).unwrap();
        assert_eq!(app.main_service().unwrap().name, "nextcloud");
        assert_eq!(app.main_tag().unwrap(), "29.0.4");
        assert_eq!(app.service_tag("db").unwrap(), "11.4");
    }

    #[test]
    fn test_main_service_falls_back_to_first() {
        let app = ComposeApp::from_yaml(
            r#"
name: solo
services:
  web:
    image: nginx
"#,
        )
        .unwrap();
        assert_eq!(app.main_service().unwrap().name, "web");
        assert_eq!(app.main_tag().unwrap(), "latest");
    }

    #[test]
    fn test_main_service_missing_is_an_error() {
        let app = ComposeApp::from_yaml(
            r#"
name: broken
services:
  web:
    image: nginx
x-casaos:
  main: api
"#,
        )
        .unwrap();
        assert!(matches!(
            app.main_service(),
            Err(Error::ServiceNotFound { .. })
        ));
        assert!(matches!(
            app.service_tag("api"),
            Err(Error::ServiceNotFound { .. })
        ));
    }

    #[test]
    fn test_port_short_syntax_variants() {
        let ports = PortConfig::parse("127.0.0.1:8080:80/udp").unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].host_ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(ports[0].published.as_deref(), Some("8080"));
        assert_eq!(ports[0].target, 80);
        assert_eq!(ports[0].protocol.as_deref(), Some("udp"));

        let ports = PortConfig::parse("[::1]:9000:9000").unwrap();
        assert_eq!(ports[0].host_ip.as_deref(), Some("::1"));

        let ports = PortConfig::parse("8000-8002:9000-9002").unwrap();
        let pairs: Vec<(u32, Option<&str>)> = ports
            .iter()
            .map(|p| (p.target, p.published.as_deref()))
            .collect();
        assert_eq!(
            pairs,
            vec![(9000, Some("8000")), (9001, Some("8001")), (9002, Some("8002"))]
        );

        assert!(PortConfig::parse("http").is_err());
    }

    #[test]
    fn test_volume_short_syntax_modes() {
        let volume = VolumeMount::parse("/DATA/x:/x:ro,z").unwrap();
        assert!(volume.read_only);
        assert!(volume.extra.contains_key("bind"));

        let named = VolumeMount::parse("cache:/cache").unwrap();
        assert_eq!(named.kind, "volume");

        let anonymous = VolumeMount::parse("/scratch").unwrap();
        assert_eq!(anonymous.target, "/scratch");
        assert!(anonymous.source.is_empty());

        assert!(VolumeMount::parse("a:b:c:d").is_err());
        assert!(VolumeMount::parse("/a:/b:bogus").is_err());
    }

    #[test]
    fn test_default_network_mode_detection() {
        let mut service = ServiceConfig::default();
        assert!(service.uses_default_network_mode());
        service.network_mode = Some("bridge".into());
        assert!(service.uses_default_network_mode());
        service.network_mode = Some("host".into());
        assert!(!service.uses_default_network_mode());
    }

    #[test]
    fn test_external_network_legacy_form() {
        let app = ComposeApp::from_yaml(
            r#"
name: legacy
services: {}
networks:
  proxy:
    external:
      name: proxy
  internal:
"#,
        )
        .unwrap();
        assert!(app.networks["proxy"].as_ref().unwrap().external);
        assert!(app.networks["internal"].is_none());
    }
}
