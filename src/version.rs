//! JDK version string handling
//!
//! Vendor-reported versions come in two shapes: the legacy `1.8.0_392`
//! form and the modern `NN.m.p` form. Normalization rewrites the legacy
//! prefix so "8" queries match both, and ordering is component-wise
//! numeric so `17.0.11` sorts above `17.0.9`.

use std::cmp::Ordering;

/// Normalize a version string for matching.
///
/// Strips surrounding quotes and rewrites a leading `1.8` to `8`,
/// preserving the remainder: `1.8.0_392` -> `8.0_392`.
pub fn normalize(version: &str) -> String {
    let version = strip_quotes(version);
    if let Some(rest) = version.strip_prefix("1.8") {
        format!("8{}", rest)
    } else {
        version.to_string()
    }
}

/// Extract the major version: `"17.0.9"` -> `"17"`, `"1.8.0_392"` -> `"8"`,
/// `"21-ea"` -> `"21"`.
pub fn major_of(version: &str) -> String {
    let version = strip_quotes(version);
    if version.starts_with("1.8") {
        return "8".to_string();
    }
    match version.find('.') {
        Some(dot) => version[..dot].to_string(),
        None => {
            let digits: String = version.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                version.to_string()
            } else {
                digits
            }
        }
    }
}

/// Whether a cataloged version satisfies a query.
///
/// Both sides are normalized; the rule is prefix-or-equal, so "17"
/// matches "17.0.9" and "17" itself. A query of "17.0.9" also matches
/// the degenerate "17.0.9x" by the same rule.
pub fn matches(catalog_version: &str, query: &str) -> bool {
    let normalized = normalize(catalog_version);
    let requested = normalize(query);
    normalized.starts_with(&requested) || normalized == requested
}

/// Component-wise numeric version comparison.
///
/// Segments are split on `.`, `_`, `-` and `+`; numeric segments compare
/// numerically, anything else falls back to string comparison, and a
/// version with more segments sorts after its prefix.
pub fn cmp_versions(a: &str, b: &str) -> Ordering {
    let seg = |v: &str| -> Vec<String> {
        v.split(['.', '_', '-', '+'])
            .map(|s| s.to_string())
            .collect()
    };
    let (sa, sb) = (seg(&normalize(a)), seg(&normalize(b)));

    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(nx), Ok(ny)) => nx.cmp(&ny),
            _ => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len())
}

fn strip_quotes(s: &str) -> &str {
    s.trim_start_matches('"').trim_end_matches('"')
}
