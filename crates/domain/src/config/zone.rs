use serde::{Deserialize, Serialize};

pub const MIN_TTL: u32 = 1;
pub const MAX_TTL: u32 = 86_400;

/// The zone the server is authoritative for, and which decoders run in it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Domain suffix every encoded name must end with.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// TTL put on every synthesized record.
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,

    #[serde(default = "default_true")]
    pub enable_json_records: bool,

    #[serde(default = "default_true")]
    pub enable_ip_reflection: bool,

    #[serde(default = "default_true")]
    pub enable_dual_stack: bool,

    /// NS targets served at the apex. Empty means `ns1.<suffix>` and
    /// `ns2.<suffix>`.
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// SOA RNAME. Empty means `hostmaster.<suffix>`.
    #[serde(default)]
    pub hostmaster: String,

    #[serde(default = "default_serial")]
    pub serial: u32,

    #[serde(default = "default_refresh")]
    pub refresh: i32,

    #[serde(default = "default_retry")]
    pub retry: i32,

    #[serde(default = "default_expire")]
    pub expire: i32,

    #[serde(default = "default_minimum")]
    pub minimum: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            default_ttl: default_ttl(),
            enable_json_records: true,
            enable_ip_reflection: true,
            enable_dual_stack: true,
            nameservers: Vec::new(),
            hostmaster: String::new(),
            serial: default_serial(),
            refresh: default_refresh(),
            retry: default_retry(),
            expire: default_expire(),
            minimum: default_minimum(),
        }
    }
}

impl ZoneConfig {
    /// Suffix lowercased, without leading or trailing dots.
    pub fn normalized_suffix(&self) -> String {
        self.suffix.trim_matches('.').to_ascii_lowercase()
    }

    pub fn nameserver_names(&self) -> Vec<String> {
        if self.nameservers.is_empty() {
            let suffix = self.normalized_suffix();
            vec![format!("ns1.{}", suffix), format!("ns2.{}", suffix)]
        } else {
            self.nameservers
                .iter()
                .map(|ns| ns.trim_end_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    pub fn hostmaster_name(&self) -> String {
        if self.hostmaster.is_empty() {
            format!("hostmaster.{}", self.normalized_suffix())
        } else {
            self.hostmaster.trim_end_matches('.').to_ascii_lowercase()
        }
    }
}

fn default_suffix() -> String {
    "2dns.dev".to_string()
}

fn default_ttl() -> u32 {
    300
}

fn default_true() -> bool {
    true
}

fn default_serial() -> u32 {
    2025010101
}

fn default_refresh() -> i32 {
    3600
}

fn default_retry() -> i32 {
    1800
}

fn default_expire() -> i32 {
    604_800
}

fn default_minimum() -> u32 {
    86_400
}
