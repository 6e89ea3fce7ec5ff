//! Parsing and formatting of duration strings like "30s", "1m2s", "1d2h3m4s5ms6µs".

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::CastError;

static DURATION_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(ms|µs|us|d|h|m|s)").unwrap());

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Unit suffixes and their length in nanoseconds, largest first.
const UNITS: &[(&str, u128)] = &[
    ("d", 86_400 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("s", NANOS_PER_SEC),
    ("ms", 1_000_000),
    ("µs", 1_000),
];

fn unit_nanos(unit: &str) -> Option<u128> {
    let unit = if unit == "us" { "µs" } else { unit };
    UNITS.iter().find(|(u, _)| *u == unit).map(|(_, n)| *n)
}

/// Parses a sequence of `<amount><unit>` pairs and sums them.
///
/// Pairs may come in any order and units may repeat. The whole input (after
/// trimming) must be made of pairs: `"abc"`, `"10"` or `"1x"` are rejected
/// rather than read as zero.
pub fn parse_duration(s: &str) -> Result<Duration, CastError> {
    let src = s.trim();
    let invalid = || CastError::Duration(s.to_string());
    if src.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut end = 0;
    for caps in DURATION_PART.captures_iter(src) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() != end {
            return Err(invalid());
        }
        end = whole.end();

        let amount: u128 = caps[1].parse().map_err(|_| invalid())?;
        let nanos = unit_nanos(&caps[2]).ok_or_else(invalid)?;
        total = amount
            .checked_mul(nanos)
            .and_then(|n| total.checked_add(n))
            .ok_or_else(invalid)?;
    }
    if end != src.len() {
        return Err(invalid());
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid())?;
    // Remainder is below one second, always fits.
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Formats a duration with the same units `parse_duration` accepts.
///
/// Precision below one microsecond is dropped.
pub fn format_duration(d: Duration) -> String {
    let mut rest = d.as_nanos();
    let mut out = String::new();
    for (unit, nanos) in UNITS {
        let amount = rest / nanos;
        if amount > 0 {
            out.push_str(&amount.to_string());
            out.push_str(unit);
            rest %= nanos;
        }
    }
    if out.is_empty() {
        out.push_str("0s");
    }
    out
}
