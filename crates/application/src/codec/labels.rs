//! Name normalization and suffix handling shared by every decoder.

use twodns_domain::{DomainError, MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};

/// Lowercases `name` and drops one trailing root dot.
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Checks the RFC 1035 limits: at most 253 characters overall, every label
/// between 1 and 63 characters. A single trailing dot is allowed.
pub fn validate_name_lengths(name: &str) -> Result<(), DomainError> {
    let name = name.strip_suffix('.').unwrap_or(name);

    if name.len() > MAX_DOMAIN_LENGTH {
        return Err(DomainError::DomainTooLong(name.len()));
    }
    if name.is_empty() {
        return Ok(());
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty label in '{}'",
                name
            )));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(DomainError::LabelTooLong {
                label: label.to_string(),
                length: label.len(),
            });
        }
    }
    Ok(())
}

/// Whether normalized `name` equals `suffix` or ends with `.<suffix>`.
pub fn is_in_zone(name: &str, suffix: &str) -> bool {
    strip_suffix(name, suffix).is_some()
}

/// Part of `name` before `.<suffix>`; `Some("")` at the apex and `None`
/// when the name lies outside the suffix. Both inputs must be normalized.
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    if name == suffix {
        return Some("");
    }
    name.strip_suffix(suffix)?.strip_suffix('.')
}

/// Normalizes `name` and returns its prefix relative to `suffix`.
///
/// The apex and names outside the suffix both yield `None`.
pub fn extract_prefix(name: &str, suffix: &str) -> Option<String> {
    let name = normalize_name(name);
    let suffix = normalize_name(suffix.trim_start_matches('.'));
    match strip_suffix(&name, &suffix) {
        Some(prefix) if !prefix.is_empty() => Some(prefix.to_string()),
        _ => None,
    }
}

pub fn split_labels(prefix: &str) -> impl Iterator<Item = &str> {
    prefix.split('.').filter(|label| !label.is_empty())
}

pub fn is_single_label(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.contains('.')
}

/// Joins `prefix` and `suffix`, checking the result against DNS limits.
pub fn join_name(prefix: &str, suffix: &str) -> Result<String, DomainError> {
    let suffix = normalize_name(suffix.trim_start_matches('.'));
    let name = if prefix.is_empty() {
        suffix
    } else {
        format!("{}.{}", prefix, suffix)
    };
    validate_name_lengths(&name)?;
    Ok(name)
}

/// Checks a domain name carried inside record data, such as a CNAME target
/// or an MX exchange. `.` alone is the root. Labels may hold any printable
/// ASCII except `\` and `"`, so service labels like `_sip` pass.
pub fn validate_domain_name(name: &str) -> Result<(), DomainError> {
    if name == "." {
        return Ok(());
    }
    if name.is_empty() || name.starts_with('.') {
        return Err(DomainError::InvalidDomainName(format!(
            "empty label in '{}'",
            name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_graphic() || *c == '\\' || *c == '"')
    {
        return Err(DomainError::InvalidDomainName(format!(
            "character {:?} in '{}'",
            c, name
        )));
    }
    validate_name_lengths(name)
}
