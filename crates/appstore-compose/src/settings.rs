//! Deployment environment settings.
//!
//! A [`DeploySettings`] value is a snapshot of the variables that steer
//! adaptation. It is taken once per call so adaptation never reads the
//! process environment piecemeal.

use std::collections::BTreeMap;

/// Shared storage root replacing the `/DATA` prefix of bind mounts.
pub const DATA_ROOT: &str = "DATA_ROOT";
/// Overlay network every bridge-mode service is moved onto.
pub const REF_NET: &str = "REF_NET";
/// Port the reverse proxy listens on.
pub const REF_PORT: &str = "REF_PORT";
/// Domain the reverse proxy serves apps under.
pub const REF_DOMAIN: &str = "REF_DOMAIN";
/// Public address substituted for `$public_ip`.
pub const REF_IP: &str = "REF_IP";
/// Password substituted for `$default_pwd`.
pub const REF_DEFAULT_PWD: &str = "REF_DEFAULT_PWD";
/// Scheme the reverse proxy serves apps with.
pub const REF_SCHEME: &str = "REF_SCHEME";
/// Separator between the parts of a generated hostname.
pub const REF_SEPARATOR: &str = "REF_SEPARATOR";
/// Web UI port that gets a hostname without a port prefix.
pub const REF_DEFAULT_PORT: &str = "REF_DEFAULT_PORT";
/// User id injected as the run-as identity.
pub const PUID: &str = "PUID";
/// Group id injected as the run-as identity.
pub const PGID: &str = "PGID";

const DEFAULT_PROXY_PORT: &str = "80";
const DEFAULT_SCHEME: &str = "http";
const DEFAULT_SEPARATOR: &str = "-";
const DEFAULT_WEB_PORT: &str = "80";
const DEFAULT_ID: &str = "1000";

/// Variables whose presence triggers an adaptation pass.
const TRIGGERS: [&str; 7] = [DATA_ROOT, REF_NET, REF_PORT, REF_DOMAIN, REF_SCHEME, PUID, PGID];

/// Every variable the adapter reads.
const KNOWN: [&str; 11] = [
    DATA_ROOT,
    REF_NET,
    REF_PORT,
    REF_DOMAIN,
    REF_IP,
    REF_DEFAULT_PWD,
    REF_SCHEME,
    REF_SEPARATOR,
    REF_DEFAULT_PORT,
    PUID,
    PGID,
];

/// Immutable snapshot of the deployment environment.
///
/// A variable counts as set only when it is present and non-empty. The
/// resolved accessors apply the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySettings {
    vars: BTreeMap<String, String>,
}

impl DeploySettings {
    /// Settings with nothing set. Adaptation is a no-op under these.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment.
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Build a snapshot of the known variables from a lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_pairs(
            KNOWN
                .iter()
                .filter_map(|name| lookup(name).map(|value| (name.to_string(), value))),
        )
    }

    /// Build a snapshot from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of any variable in the snapshot, if set and non-empty.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether any trigger variable is set.
    pub fn needs_adaptation(&self) -> bool {
        TRIGGERS.iter().any(|name| self.var(name).is_some())
    }

    pub fn data_root(&self) -> Option<&str> {
        self.var(DATA_ROOT)
    }

    pub fn network(&self) -> Option<&str> {
        self.var(REF_NET)
    }

    /// Reverse proxy port; falls back to `80` when unset or outside 1-65535.
    pub fn proxy_port(&self) -> &str {
        match self.var(REF_PORT) {
            None => DEFAULT_PROXY_PORT,
            Some(port) => match port.parse::<u16>() {
                Ok(p) if p > 0 => port,
                _ => {
                    tracing::warn!(port = %port, "Invalid {REF_PORT}, using {DEFAULT_PROXY_PORT}");
                    DEFAULT_PROXY_PORT
                }
            },
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.var(REF_DOMAIN)
    }

    /// The domain, if it is usable in a hostname.
    pub fn valid_domain(&self) -> Option<&str> {
        self.domain()
            .filter(|d| !d.contains([' ', '\t', '\n', '\r']))
    }

    pub fn public_ip(&self) -> Option<&str> {
        self.var(REF_IP)
    }

    pub fn default_password(&self) -> Option<&str> {
        self.var(REF_DEFAULT_PWD)
    }

    pub fn scheme(&self) -> &str {
        self.var(REF_SCHEME).unwrap_or(DEFAULT_SCHEME)
    }

    pub fn separator(&self) -> &str {
        self.var(REF_SEPARATOR).unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn default_port(&self) -> &str {
        self.var(REF_DEFAULT_PORT).unwrap_or(DEFAULT_WEB_PORT)
    }

    pub fn puid(&self) -> &str {
        self.var(PUID).unwrap_or(DEFAULT_ID)
    }

    pub fn pgid(&self) -> &str {
        self.var(PGID).unwrap_or(DEFAULT_ID)
    }

    /// Whether a run-as identity was requested explicitly.
    pub fn ownership_requested(&self) -> bool {
        self.var(PUID).is_some() || self.var(PGID).is_some()
    }

    pub fn with_data_root(self, path: impl Into<String>) -> Self {
        self.with_var(DATA_ROOT, path)
    }

    pub fn with_network(self, name: impl Into<String>) -> Self {
        self.with_var(REF_NET, name)
    }

    pub fn with_proxy_port(self, port: impl Into<String>) -> Self {
        self.with_var(REF_PORT, port)
    }

    pub fn with_domain(self, domain: impl Into<String>) -> Self {
        self.with_var(REF_DOMAIN, domain)
    }

    pub fn with_public_ip(self, ip: impl Into<String>) -> Self {
        self.with_var(REF_IP, ip)
    }

    pub fn with_default_password(self, password: impl Into<String>) -> Self {
        self.with_var(REF_DEFAULT_PWD, password)
    }

    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        self.with_var(REF_SCHEME, scheme)
    }

    pub fn with_separator(self, separator: impl Into<String>) -> Self {
        self.with_var(REF_SEPARATOR, separator)
    }

    pub fn with_default_port(self, port: impl Into<String>) -> Self {
        self.with_var(REF_DEFAULT_PORT, port)
    }

    pub fn with_owner(self, uid: impl Into<String>, gid: impl Into<String>) -> Self {
        self.with_var(PUID, uid).with_var(PGID, gid)
    }

    /// Set any variable, including ones only referenced by tips.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_do_not_trigger() {
        let settings = DeploySettings::new();
        assert!(!settings.needs_adaptation());
        assert!(!settings.ownership_requested());
        assert_eq!(settings.scheme(), "http");
        assert_eq!(settings.separator(), "-");
        assert_eq!(settings.proxy_port(), "80");
        assert_eq!(settings.puid(), "1000");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let settings = DeploySettings::from_pairs([(DATA_ROOT, ""), (REF_DOMAIN, "")]);
        assert!(!settings.needs_adaptation());
        assert!(settings.data_root().is_none());
    }

    #[test]
    fn test_non_trigger_variables_do_not_trigger() {
        let settings = DeploySettings::from_pairs([
            (REF_IP, "10.0.0.2"),
            (REF_SEPARATOR, "."),
            ("HOME", "/root"),
        ]);
        assert!(!settings.needs_adaptation());
    }

    #[test]
    fn test_each_trigger_triggers() {
        for name in TRIGGERS {
            let settings = DeploySettings::from_pairs([(name, "1")]);
            assert!(settings.needs_adaptation(), "{name} should trigger");
        }
    }

    #[test]
    fn test_invalid_proxy_port_falls_back() {
        for port in ["0", "70000", "http", "-1"] {
            let settings = DeploySettings::new().with_proxy_port(port);
            assert_eq!(settings.proxy_port(), "80", "port {port}");
        }
        let settings = DeploySettings::new().with_proxy_port("8443");
        assert_eq!(settings.proxy_port(), "8443");
    }

    #[test]
    fn test_domain_with_whitespace_is_not_valid() {
        let settings = DeploySettings::new().with_domain("my domain.com");
        assert_eq!(settings.domain(), Some("my domain.com"));
        assert!(settings.valid_domain().is_none());

        let settings = DeploySettings::new().with_domain("home.example.com");
        assert_eq!(settings.valid_domain(), Some("home.example.com"));
    }

    #[test]
    fn test_from_lookup_reads_known_names_only() {
        let settings = DeploySettings::from_lookup(|name| match name {
            "PUID" => Some("1001".to_string()),
            "UNRELATED" => Some("x".to_string()),
            _ => None,
        });
        assert_eq!(settings.puid(), "1001");
        assert_eq!(settings.pgid(), "1000");
        assert!(settings.ownership_requested());
        assert!(settings.var("UNRELATED").is_none());
    }
}
