//! Numeric parameter parsing
//!
//! Accepts `-`, digits and `.` followed by an optional SI suffix:
//! `2k` = 2000, `1.5m` = 0.0015. Anything unparseable reads as 0.

/// SI magnitude for a suffix character
pub fn si_scale(suffix: u8) -> Option<f64> {
    match suffix {
        b'p' => Some(1.0e-12),
        b'n' => Some(1.0e-9),
        b'u' => Some(1.0e-6),
        b'm' => Some(1.0e-3),
        b'k' => Some(1.0e3),
        b'M' => Some(1.0e6),
        b'G' => Some(1.0e9),
        _ => None,
    }
}

/// Parse a numeric token, never failing
///
/// The numeric run is the longest prefix made of `0-9`, `.` and `-`.
/// Its longest prefix that reads as a float is the value (so `1.2.3`
/// reads 1.2). The character right after the run scales the value when
/// it is an SI suffix and is otherwise ignored.
pub fn parse_number(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let run = bytes
        .iter()
        .take_while(|&&c| c.is_ascii_digit() || c == b'.' || c == b'-')
        .count();

    if run == 0 {
        return 0.0;
    }

    let value = (1..=run)
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .unwrap_or(0.0);

    match bytes.get(run).copied().and_then(si_scale) {
        Some(scale) => value * scale,
        None => value,
    }
}
