//! CLI argument parsing using clap derive

use std::path::PathBuf;

use appstore_compose::DeploySettings;
use clap::{Args, Parser, Subcommand};

/// App store - adapt manifests and curate the catalog
#[derive(Parser, Debug)]
#[command(name = "appstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Adapt a compose manifest to the deployment environment
    ///
    /// Settings are read from DATA_ROOT, REF_NET, REF_PORT, REF_DOMAIN,
    /// REF_IP, REF_DEFAULT_PWD, REF_SCHEME, REF_SEPARATOR, REF_DEFAULT_PORT,
    /// PUID and PGID; flags override the environment.
    ///
    /// Examples:
    ///   appstore adapt docker-compose.yml
    ///   appstore adapt docker-compose.yml --data-root /mnt/pool --network proxy
    Adapt {
        /// Path to the compose file
        file: PathBuf,

        #[command(flatten)]
        overrides: DeployOverrides,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// List catalog apps
    List {
        /// App store directory (contains Apps/<id>/docker-compose.yml)
        store: PathBuf,

        /// Only apps in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only apps by this author class (official, by_casaos, community)
        #[arg(short, long)]
        author_type: Option<String>,

        /// Architecture to filter for (defaults to this host)
        #[arg(long)]
        arch: Option<String>,

        /// Do not filter by architecture
        #[arg(long, conflicts_with = "arch")]
        any_arch: bool,

        /// Only these app ids
        #[arg(short, long)]
        recommend: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List catalog categories with app counts
    Categories {
        /// App store directory
        store: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List installed apps with an upgrade available
    Upgradable {
        /// App store directory
        store: PathBuf,

        /// Directory of installed apps (contains <name>/docker-compose.yml)
        installed: PathBuf,

        /// Apps with an update already running
        #[arg(long)]
        updating: Vec<String>,

        /// Floating tags compared by digest (defaults to latest)
        #[arg(long = "digest-tag")]
        digest_tags: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the stable image tag of a catalog app
    Tag {
        /// App store directory
        store: PathBuf,

        /// Store app id
        id: String,

        /// Service to read instead of the main service
        #[arg(short, long)]
        service: Option<String>,
    },
}

/// Flags that override deployment settings from the environment
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployOverrides {
    /// Storage root replacing /DATA in bind mounts
    #[arg(long)]
    pub data_root: Option<String>,

    /// Network to move bridge-mode services onto
    #[arg(long)]
    pub network: Option<String>,

    /// Reverse proxy domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Reverse proxy port
    #[arg(long)]
    pub proxy_port: Option<String>,

    /// Reverse proxy scheme
    #[arg(long)]
    pub scheme: Option<String>,

    /// Public address substituted for $public_ip
    #[arg(long)]
    pub public_ip: Option<String>,

    /// Password substituted for $default_pwd
    #[arg(long)]
    pub default_pwd: Option<String>,

    /// Separator between hostname parts
    #[arg(long)]
    pub separator: Option<String>,

    /// Port that is left out of generated hostnames
    #[arg(long)]
    pub default_port: Option<String>,

    /// Run-as user id
    #[arg(long)]
    pub puid: Option<String>,

    /// Run-as group id
    #[arg(long)]
    pub pgid: Option<String>,
}

impl DeployOverrides {
    /// Layer the flags that were given over `settings`.
    pub fn apply(&self, mut settings: DeploySettings) -> DeploySettings {
        use appstore_compose::settings::{
            DATA_ROOT, PGID, PUID, REF_DEFAULT_PORT, REF_DEFAULT_PWD, REF_DOMAIN, REF_IP, REF_NET,
            REF_PORT, REF_SCHEME, REF_SEPARATOR,
        };

        let flags = [
            (DATA_ROOT, &self.data_root),
            (REF_NET, &self.network),
            (REF_DOMAIN, &self.domain),
            (REF_PORT, &self.proxy_port),
            (REF_SCHEME, &self.scheme),
            (REF_IP, &self.public_ip),
            (REF_DEFAULT_PWD, &self.default_pwd),
            (REF_SEPARATOR, &self.separator),
            (REF_DEFAULT_PORT, &self.default_port),
            (PUID, &self.puid),
            (PGID, &self.pgid),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                settings = settings.with_var(name, value.as_str());
            }
        }
        settings
    }
}
