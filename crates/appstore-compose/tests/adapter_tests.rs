use std::borrow::Cow;

use appstore_compose::{
    Command, ComposeApp, DeploySettings, EXTENSION_KEY, ManifestAdapter, WebUiPort, adapt,
    resolve_webui_port,
};
use appstore_test_utils::fixtures;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_yaml::Value;

fn load(yaml: &str) -> ComposeApp {
    ComposeApp::from_yaml(yaml).unwrap()
}

fn extension_str<'a>(app: &'a ComposeApp, key: &str) -> Option<&'a str> {
    app.extension()?.get(key)?.as_str()
}

#[test]
fn test_adapted_copy_does_not_alias_original() {
    let original = load(fixtures::JELLYFIN);
    let snapshot = original.clone();
    let settings = DeploySettings::new()
        .with_data_root("/mnt/pool")
        .with_network("casaos-proxy");

    let mut adapted = adapt(&original, &settings).into_owned();
    adapted.services[0].volumes[0].source = "/tampered".into();
    adapted.services[0].environment.clear();
    adapted.extensions.clear();

    assert_eq!(original, snapshot);
}

#[test]
fn test_no_trigger_returns_identical_manifest() {
    let original = load(fixtures::NEXTCLOUD);
    let settings = DeploySettings::from_pairs([("REF_IP", "10.0.0.5"), ("HOME", "/root")]);

    let adapted = adapt(&original, &settings);
    assert!(matches!(adapted, Cow::Borrowed(_)));
    assert_eq!(*adapted, original);
}

#[test]
fn test_full_adaptation_of_jellyfin() {
    let app = load(fixtures::JELLYFIN);
    let settings = DeploySettings::new()
        .with_data_root("/mnt/pool")
        .with_network("casaos-proxy")
        .with_domain("home.example.com")
        .with_scheme("https")
        .with_proxy_port("443")
        .with_owner("1001", "1001");

    let adapted = adapt(&app, &settings);
    let service = &adapted.services[0];

    let sources: Vec<&str> = service.volumes.iter().map(|v| v.source.as_str()).collect();
    assert_eq!(
        sources,
        vec!["/mnt/pool/AppData/jellyfin/config", "/mnt/pool/Media", "/dev/dri"]
    );
    assert!(service.ports.is_empty());
    assert_eq!(service.expose, vec!["8096".to_string()]);
    assert_eq!(service.network_mode, None);
    assert_eq!(
        service.networks.keys().collect::<Vec<_>>(),
        vec!["casaos-proxy"]
    );
    assert_eq!(service.hostname.as_deref(), Some("jellyfin"));
    assert_eq!(service.user.as_deref(), Some("1001:1001"));
    assert!(service.extra.contains_key("restart"));

    assert_eq!(extension_str(&adapted, "scheme"), Some("https"));
    assert_eq!(extension_str(&adapted, "port_map"), Some("443"));
    assert_eq!(
        extension_str(&adapted, "hostname"),
        Some("8096-jellyfin-home.example.com")
    );
    assert_eq!(extension_str(&adapted, "category"), Some("Media"));

    let tip = &adapted.extension().unwrap()["tips"]["before_install"]["en_us"];
    assert_eq!(
        tip,
        &Value::from("Put your media under /DATA/Media before opening home.example.com.")
    );

    assert_eq!(adapted.name, "jellyfin");
}

#[test]
fn test_author_values_win_over_settings() {
    let app = load(fixtures::NEXTCLOUD);
    let settings = DeploySettings::new()
        .with_scheme("http")
        .with_proxy_port("8080")
        .with_domain("example.com");

    let adapted = adapt(&app, &settings);
    assert_eq!(extension_str(&adapted, "scheme"), Some("https"));
    assert_eq!(extension_str(&adapted, "port_map"), Some("10081"));
    assert_eq!(
        extension_str(&adapted, "hostname"),
        Some("nextcloud-example.com")
    );
}

#[test]
fn test_placeholders_substituted_when_triggered() {
    let app = load(fixtures::NEXTCLOUD);
    let settings = DeploySettings::new()
        .with_domain("cloud.example.com")
        .with_public_ip("192.168.1.20")
        .with_default_password("s3cret");

    let adapted = adapt(&app, &settings);
    let nextcloud = adapted.service("nextcloud").unwrap();
    assert_eq!(
        nextcloud.environment["NEXTCLOUD_TRUSTED_DOMAINS"].as_deref(),
        Some("cloud.example.com 192.168.1.20")
    );
    let db = adapted.service("db").unwrap();
    assert_eq!(db.environment["MYSQL_ROOT_PASSWORD"].as_deref(), Some("s3cret"));
}

#[test]
fn test_service_order_and_name_preserved() {
    let app = load(fixtures::NEXTCLOUD);
    let settings = DeploySettings::new().with_data_root("/srv");

    let adapted = adapt(&app, &settings);
    let names: Vec<&str> = adapted.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["nextcloud", "db"]);
    assert_eq!(adapted.name, app.name);

    let yaml = adapted.to_yaml().unwrap();
    let nextcloud_at = yaml.find("nextcloud:").unwrap();
    let db_at = yaml.find("  db:").unwrap();
    assert!(nextcloud_at < db_at);
}

#[test]
fn test_explicit_port_keeps_published_ports() {
    let app = load(fixtures::HOME_ASSISTANT);
    let settings = DeploySettings::new()
        .with_network("casaos-proxy")
        .with_domain("example.com");

    let adapted = adapt(&app, &settings);
    let service = &adapted.services[0];
    assert_eq!(service.network_mode.as_deref(), Some("host"));
    assert!(service.networks.is_empty());
    assert_eq!(
        extension_str(&adapted, "hostname"),
        Some("8123-homeassistant-example.com")
    );
}

#[test]
fn test_broken_extension_is_all_or_nothing() {
    let app = load(fixtures::BROKEN);
    let settings = DeploySettings::new()
        .with_data_root("/mnt/pool")
        .with_owner("1000", "1000");

    let adapted = adapt(&app, &settings);
    assert!(matches!(adapted, Cow::Borrowed(_)));
    assert_eq!(adapted.services[0].user, None);
    assert_eq!(
        adapted.extensions[EXTENSION_KEY],
        Value::from("definitely not a mapping")
    );
}

#[test]
fn test_try_adapt_without_triggers_still_rewrites() {
    let app = load(fixtures::SYNCTHING);
    let settings = DeploySettings::new();
    let adapted = ManifestAdapter::new(&settings).try_adapt(&app).unwrap();
    assert_eq!(extension_str(&adapted, "scheme"), Some("http"));
    assert_eq!(extension_str(&adapted, "port_map"), Some("80"));
    assert_eq!(adapted.services[0].ports.len(), 3);
}

#[test]
fn test_syncthing_expose_is_deduplicated() {
    let app = load(fixtures::SYNCTHING);
    let settings = DeploySettings::new().with_network("casaos-proxy");
    let adapted = adapt(&app, &settings);
    assert_eq!(
        adapted.services[0].expose,
        vec!["8384".to_string(), "22000".to_string()]
    );
}

#[test]
fn test_syncthing_data_root_mount() {
    let app = load(fixtures::SYNCTHING);
    let settings = DeploySettings::new().with_data_root("/mnt/pool");
    let adapted = adapt(&app, &settings);
    let volume = &adapted.services[0].volumes[1];
    assert_eq!(volume.source, "/mnt/pool");
    assert_eq!(volume.target, "/DATA");
}

#[rstest]
#[case(Some(Value::from(8080)), 8080, false)]
#[case(Some(Value::from("9090")), 9090, false)]
#[case(Some(Value::from(0)), 3000, true)]
#[case(Some(Value::from("abc")), 3000, true)]
#[case(Some(Value::Null), 3000, true)]
#[case(None, 3000, true)]
fn test_webui_port_precedence(
    #[case] webui_port: Option<Value>,
    #[case] port: u16,
    #[case] dynamic: bool,
) {
    let app = load("name: web\nservices:\n  web:\n    image: web\n    ports:\n      - \"13000:3000\"\n");
    assert_eq!(
        resolve_webui_port(webui_port.as_ref(), &app.services, "web"),
        WebUiPort { port, dynamic }
    );
}

#[rstest]
#[case("echo $public_ip", "echo 10.1.1.1")]
#[case("pw=$default_pwd", "pw=$default_pwd")]
fn test_command_placeholders(#[case] command: &str, #[case] expected: &str) {
    let yaml = format!("name: cmd\nservices:\n  cmd:\n    image: busybox\n    command: \"{command}\"\n");
    let app = load(&yaml);
    let settings = DeploySettings::new()
        .with_data_root("/srv")
        .with_public_ip("10.1.1.1");

    let adapted = adapt(&app, &settings);
    assert_eq!(
        adapted.services[0].command,
        Some(Command::Shell(expected.to_string()))
    );
}
