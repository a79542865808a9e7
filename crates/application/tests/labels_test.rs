use twodns_application::codec::labels;
use twodns_domain::DomainError;

// ── normalization ──────────────────────────────────────────────────────────

#[test]
fn test_normalize_name() {
    assert_eq!(labels::normalize_name("1.2.3.4.2DNS.dev."), "1.2.3.4.2dns.dev");
    assert_eq!(labels::normalize_name("AEBAGBA8.2dns.dev"), "aebagba8.2dns.dev");
    assert_eq!(labels::normalize_name("."), "");
}

// ── suffix handling ────────────────────────────────────────────────────────

#[test]
fn test_strip_suffix() {
    assert_eq!(labels::strip_suffix("1.2.3.4.2dns.dev", "2dns.dev"), Some("1.2.3.4"));
    assert_eq!(labels::strip_suffix("2dns.dev", "2dns.dev"), Some(""));
    assert_eq!(labels::strip_suffix("example.com", "2dns.dev"), None);
}

#[test]
fn test_strip_suffix_requires_label_boundary() {
    assert_eq!(labels::strip_suffix("x2dns.dev", "2dns.dev"), None);
    assert_eq!(labels::strip_suffix("a.x2dns.dev", "2dns.dev"), None);
}

#[test]
fn test_extract_prefix() {
    assert_eq!(
        labels::extract_prefix("AEBAGBA8.2DNS.DEV.", "2dns.dev"),
        Some("aebagba8".to_string())
    );
    assert_eq!(
        labels::extract_prefix("j2abc.j1def.2dns.dev", ".2dns.dev."),
        Some("j2abc.j1def".to_string())
    );
    assert_eq!(labels::extract_prefix("2dns.dev.", "2dns.dev"), None);
    assert_eq!(labels::extract_prefix("1.2.3.4.example.com", "2dns.dev"), None);
}

#[test]
fn test_is_in_zone() {
    assert!(labels::is_in_zone("2dns.dev", "2dns.dev"));
    assert!(labels::is_in_zone("a.b.2dns.dev", "2dns.dev"));
    assert!(!labels::is_in_zone("a.b.3dns.dev", "2dns.dev"));
}

#[test]
fn test_split_labels_and_single_label() {
    let labels_found: Vec<&str> = labels::split_labels("j1abc.j2def").collect();
    assert_eq!(labels_found, vec!["j1abc", "j2def"]);
    assert!(labels::is_single_label("jabc"));
    assert!(!labels::is_single_label("j1abc.j2def"));
    assert!(!labels::is_single_label(""));
}

// ── length limits ──────────────────────────────────────────────────────────

#[test]
fn test_validate_name_lengths_accepts_limits() {
    let label = "a".repeat(63);
    assert!(labels::validate_name_lengths(&format!("{}.2dns.dev", label)).is_ok());

    let name = format!("{0}.{0}.{0}.{1}", "a".repeat(63), "b".repeat(61));
    assert_eq!(name.len(), 253);
    assert!(labels::validate_name_lengths(&name).is_ok());
    assert!(labels::validate_name_lengths(&format!("{}.", name)).is_ok());
}

#[test]
fn test_validate_name_lengths_rejects_long_label() {
    let label = "a".repeat(64);
    let result = labels::validate_name_lengths(&format!("{}.2dns.dev", label));
    assert!(matches!(
        result,
        Err(DomainError::LabelTooLong { length: 64, .. })
    ));
}

#[test]
fn test_validate_name_lengths_rejects_long_name() {
    let name = format!("{0}.{0}.{0}.{1}", "a".repeat(63), "b".repeat(62));
    assert_eq!(name.len(), 254);
    assert_eq!(
        labels::validate_name_lengths(&name),
        Err(DomainError::DomainTooLong(254))
    );
}

#[test]
fn test_validate_name_lengths_rejects_empty_label() {
    assert!(matches!(
        labels::validate_name_lengths("a..2dns.dev"),
        Err(DomainError::InvalidDomainName(_))
    ));
}

#[test]
fn test_validate_domain_name() {
    assert!(labels::validate_domain_name("mail.example.com").is_ok());
    assert!(labels::validate_domain_name("mail.example.com.").is_ok());
    assert!(labels::validate_domain_name("_sip._tcp.example.com").is_ok());
    assert!(labels::validate_domain_name(".").is_ok());

    assert!(labels::validate_domain_name("a..b").is_err());
    assert!(labels::validate_domain_name(".example.com").is_err());
    assert!(labels::validate_domain_name("").is_err());
    assert!(labels::validate_domain_name("bad\\name.com").is_err());
    assert!(labels::validate_domain_name("caf\u{e9}.com").is_err());
    assert!(labels::validate_domain_name(&format!("{}.com", "a".repeat(64))).is_err());
}

#[test]
fn test_join_name() {
    assert_eq!(
        labels::join_name("1.2.3.4", "2DNS.dev.").unwrap(),
        "1.2.3.4.2dns.dev"
    );
    assert_eq!(labels::join_name("", "2dns.dev").unwrap(), "2dns.dev");
    assert!(labels::join_name(&"a".repeat(64), "2dns.dev").is_err());
}
