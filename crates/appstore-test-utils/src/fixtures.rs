//! Canonical app manifests.
//!
//! | Fixture          | Author class | Category    | Architectures        | Notes                         |
//! |------------------|--------------|-------------|----------------------|-------------------------------|
//! | [`JELLYFIN`]     | by_casaos    | Media       | amd64, arm64         | dynamic web UI port           |
//! | [`NEXTCLOUD`]    | official     | Cloud       | all                  | two services, placeholders    |
//! | [`HOME_ASSISTANT`] | community  | Smart Home  | amd64, arm64, arm    | host networking, explicit port |
//! | [`SYNCTHING`]    | by_casaos    | Backup      | amd64, arm64, arm    | floating `latest` tag         |
//! | [`BROKEN`]       | n/a          | n/a         | n/a                  | extension block is a string   |

pub const JELLYFIN: &str = r#"name: jellyfin
services:
  jellyfin:
    image: linuxserver/jellyfin:10.9.7
    restart: unless-stopped
    network_mode: bridge
    ports:
      - target: 8096
        published: "8097"
        protocol: tcp
    volumes:
      - type: bind
        source: /DATA/AppData/jellyfin/config
        target: /config
      - type: bind
        source: /DATA/Media
        target: /Media
      - type: bind
        source: /dev/dri
        target: /dev/dri
    environment:
      PGID: "1000"
      PUID: "1000"
      TZ: $TZ
x-casaos:
  architectures:
    - amd64
    - arm64
  main: jellyfin
  author: CasaOS Team
  developer: Jellyfin
  category: Media
  icon: https://cdn.example.com/icons/jellyfin.png
  index: /
  title:
    en_us: Jellyfin
  tagline:
    en_us: Free software media system
  description:
    en_us: Stream your media to any device.
  tips:
    before_install:
      en_us: Put your media under /DATA/Media before opening ${REF_DOMAIN}.
"#;

pub const NEXTCLOUD: &str = r#"name: nextcloud
services:
  nextcloud:
    image: nextcloud:29.0.4
    restart: unless-stopped
    ports:
      - "10081:80"
    volumes:
      - /DATA/AppData/nextcloud/html:/var/www/html
      - nextcloud-cache:/cache
    environment:
      - NEXTCLOUD_TRUSTED_DOMAINS=$domain $public_ip
      - MYSQL_HOST=db
    depends_on:
      - db
  db:
    image: mariadb:11.4
    restart: unless-stopped
    volumes:
      - /DATA/AppData/nextcloud/db:/var/lib/mysql
    environment:
      MYSQL_ROOT_PASSWORD: $default_pwd
volumes:
  nextcloud-cache: {}
x-casaos:
  main: nextcloud
  author: Nextcloud
  developer: nextcloud
  category: Cloud
  icon: https://cdn.example.com/icons/nextcloud.png
  port_map: "10081"
  scheme: https
  title:
    en_us: Nextcloud
  tagline:
    en_us: Files, calendar and contacts
"#;

pub const HOME_ASSISTANT: &str = r#"name: homeassistant
services:
  homeassistant:
    image: homeassistant/home-assistant:2024.9.1
    network_mode: host
    privileged: true
    volumes:
      - /DATA/AppData/homeassistant/config:/config
x-casaos:
  architectures:
    - amd64
    - arm64
    - arm
  main: homeassistant
  author: home-automation-fans
  developer: Home Assistant
  category: Smart Home
  icon: https://cdn.example.com/icons/homeassistant.png
  webui_port: 8123
  title:
    en_us: Home Assistant
"#;

pub const SYNCTHING: &str = r#"name: syncthing
services:
  syncthing:
    image: linuxserver/syncthing:latest
    ports:
      - "8384:8384"
      - "22000:22000/tcp"
      - "22000:22000/udp"
    volumes:
      - /DATA/AppData/syncthing/config:/config
      - /DATA:/DATA
x-casaos:
  architectures:
    - amd64
    - arm64
    - arm
  main: syncthing
  author: casaos team
  developer: Syncthing
  category: Backup
  icon: https://cdn.example.com/icons/syncthing.png
  title:
    en_us: Syncthing
"#;

pub const BROKEN: &str = r#"name: broken
services:
  web:
    image: nginx:1.27
x-casaos: definitely not a mapping
"#;

/// Every fixture keyed by store app id, in table order.
pub const ALL: [(&str, &str); 5] = [
    ("jellyfin", JELLYFIN),
    ("nextcloud", NEXTCLOUD),
    ("homeassistant", HOME_ASSISTANT),
    ("syncthing", SYNCTHING),
    ("broken", BROKEN),
];
