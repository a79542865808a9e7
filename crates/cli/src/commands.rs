use anyhow::{anyhow, bail, Context};
use clap::Subcommand;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use twodns_application::decoders::validate_record_value;
use twodns_application::use_cases::{describe_name, EncodeNameUseCase, Ipv6Notation};
use twodns_domain::{Config, DecodeOutcome, DnsRecord, RecordSet, RecordType};

#[derive(Subcommand, Debug)]
pub enum EncodeTarget {
    /// Name for an IPv4 address
    Ipv4 {
        address: Ipv4Addr,

        /// Base32 label instead of dotted-decimal
        #[arg(long)]
        base32: bool,
    },

    /// Name for an IPv6 address
    Ipv6 {
        address: Ipv6Addr,

        /// Base32 label instead of dash notation
        #[arg(long)]
        base32: bool,

        /// Spell out all eight groups
        #[arg(long, conflicts_with = "base32")]
        full: bool,
    },

    /// Name answering both A and AAAA
    Dual { ipv4: Ipv4Addr, ipv6: Ipv6Addr },

    /// Name carrying a JSON record set, e.g. `A=1.2.3.4 "MX=10 mail.example.com"`
    Records {
        #[arg(required = true, value_name = "TYPE=VALUE")]
        records: Vec<String>,
    },
}

pub fn encode(target: &EncodeTarget, config: &Config) -> anyhow::Result<String> {
    let encoder = EncodeNameUseCase::new(config.zone.suffix.as_str());

    let name = match target {
        EncodeTarget::Ipv4 { address, base32 } => {
            if *base32 {
                encoder.encode_ipv4_base32(*address)?
            } else {
                encoder.encode_ipv4(*address)?
            }
        }
        EncodeTarget::Ipv6 {
            address,
            base32,
            full,
        } => {
            if *base32 {
                encoder.encode_ipv6_base32(*address)?
            } else if *full {
                encoder.encode_ipv6(*address, Ipv6Notation::Full)?
            } else {
                encoder.encode_ipv6(*address, Ipv6Notation::Compressed)?
            }
        }
        EncodeTarget::Dual { ipv4, ipv6 } => encoder.encode_dual_stack(*ipv4, *ipv6)?,
        EncodeTarget::Records { records } => {
            let set = records
                .iter()
                .map(|arg| parse_record_arg(arg))
                .collect::<anyhow::Result<RecordSet>>()?;
            encoder.encode_records(&set)?
        }
    };
    Ok(name)
}

/// Parse `TYPE=VALUE` into a checked record.
pub fn parse_record_arg(arg: &str) -> anyhow::Result<DnsRecord> {
    let (record_type, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected TYPE=VALUE, got '{}'", arg))?;
    let record_type = RecordType::from_str(record_type.trim()).map_err(|e| anyhow!(e))?;
    validate_record_value(record_type, value)
        .with_context(|| format!("invalid {} record", record_type))?;
    Ok(DnsRecord::new(record_type, value))
}

/// Lines describing what `name` resolves to, as text or JSON.
pub fn decode(name: &str, json: bool, config: &Config) -> anyhow::Result<String> {
    let records = match describe_name(name, &config.zone) {
        DecodeOutcome::Matched(records) => records,
        DecodeOutcome::NoMatch => bail!("{} does not carry an encoding", name),
        DecodeOutcome::Malformed(reason) => bail!("{} is malformed: {}", name, reason),
    };

    if json {
        let entries: Vec<serde_json::Value> = records
            .iter()
            .map(|record| {
                serde_json::json!({
                    "type": record.record_type.as_str(),
                    "value": record.value,
                    "ttl": config.zone.default_ttl,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    Ok(records
        .iter()
        .map(|record| format!("{}\t{}\t{}", name, config.zone.default_ttl, record))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Summary of a validated configuration, optionally saving it to `write_to`.
pub fn check_config(config: &Config, write_to: Option<&str>) -> anyhow::Result<String> {
    let mut summary = format!(
        "configuration OK: zone {} (ttl {}), listening on {}:{}{}",
        config.zone.normalized_suffix(),
        config.zone.default_ttl,
        config.server.bind_address,
        config.server.dns_port,
        if config.server.tcp_enabled { " udp+tcp" } else { " udp" }
    );

    if let Some(path) = write_to {
        config.save(path)?;
        summary.push_str(&format!("\nwritten to {}", path));
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_encode_ipv4_forms() {
        let address = Ipv4Addr::new(1, 2, 3, 4);
        assert_eq!(
            encode(&EncodeTarget::Ipv4 { address, base32: false }, &config()).unwrap(),
            "1.2.3.4.2dns.dev"
        );
        assert_eq!(
            encode(&EncodeTarget::Ipv4 { address, base32: true }, &config()).unwrap(),
            "AEBAGBA8.2dns.dev"
        );
    }

    #[test]
    fn test_encode_records_round_trips_through_decode() {
        let target = EncodeTarget::Records {
            records: vec!["A=1.2.3.4".to_string(), "MX=10 mail.example.com".to_string()],
        };
        let name = encode(&target, &config()).unwrap();
        let output = decode(&name, false, &config()).unwrap();

        assert!(output.contains("A 1.2.3.4"));
        assert!(output.contains("MX 10 mail.example.com"));
    }

    #[test]
    fn test_parse_record_arg() {
        let record = parse_record_arg("mx=10 mail.example.com").unwrap();
        assert_eq!(record.record_type, RecordType::MX);
        assert_eq!(record.value, "10 mail.example.com");

        assert!(parse_record_arg("A").is_err());
        assert!(parse_record_arg("BOGUS=1").is_err());
        assert!(parse_record_arg("A=not-an-ip").is_err());
    }

    #[test]
    fn test_decode_json_output() {
        let output = decode("1.2.3.4.2dns.dev", true, &config()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed[0]["type"], "A");
        assert_eq!(parsed[0]["value"], "1.2.3.4");
        assert_eq!(parsed[0]["ttl"], 300);
    }

    #[test]
    fn test_decode_rejects_plain_names() {
        assert!(decode("www.2dns.dev", false, &config()).is_err());
        assert!(decode("nbswy3dp.2dns.dev", false, &config()).is_err());
    }

    #[test]
    fn test_check_config_summary() {
        let summary = check_config(&config(), None).unwrap();
        assert!(summary.contains("zone 2dns.dev"));
        assert!(summary.contains("udp+tcp"));
        assert!(!summary.contains("written"));
    }

    #[test]
    fn test_check_config_writes_effective_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effective.toml");
        let path = path.to_str().unwrap();

        let mut config = config();
        config.zone.suffix = "written.example".to_string();
        config.server.dns_port = 5353;

        let summary = check_config(&config, Some(path)).unwrap();
        assert!(summary.contains(path));

        let reloaded = crate::bootstrap::load_config(Some(path), Default::default()).unwrap();
        assert_eq!(reloaded.zone.suffix, "written.example");
        assert_eq!(reloaded.server.dns_port, 5353);
    }

    #[test]
    fn test_check_config_write_failure_is_reported() {
        assert!(check_config(&config(), Some("/nonexistent/dir/out.toml")).is_err());
    }
}
