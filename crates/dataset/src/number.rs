//! Lenient numeric parsing for spreadsheet cells.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a spreadsheet cell into a `Decimal`.
///
/// Accepts an optional leading currency symbol (`R$`, `$`, `€`), an optional
/// trailing `%`, and thousands separators. With `decimal_comma` the cell is
/// read as `1.234,56`; otherwise as `1,234.56`. A thousands separator must
/// sit between groups of exactly three digits, so `12,5` read without
/// `decimal_comma` is rejected rather than taken as `125`. Returns `None` for
/// anything that is still not a number after clean-up.
pub fn parse_decimal(raw: &str, decimal_comma: bool) -> Option<Decimal> {
    let mut s = raw.trim();
    for symbol in ["R$", "$", "€"] {
        if let Some(rest) = s.strip_prefix(symbol) {
            s = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = s.strip_suffix('%') {
        s = rest.trim_end();
    }
    if s.is_empty() {
        return None;
    }

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let (group, point) = if decimal_comma { ('.', ',') } else { (',', '.') };
    let cleaned = ungroup(&compact, group, point)?;

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Drops `group` separators from the integer part and rewrites `point` as `.`.
fn ungroup(s: &str, group: char, point: char) -> Option<String> {
    let (int_part, frac_part) = match s.split_once(point) {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    if frac_part.is_some_and(|f| f.contains([group, point])) {
        return None;
    }

    let mut out = String::with_capacity(s.len());
    if int_part.contains(group) {
        let unsigned = int_part.trim_start_matches(['-', '+']);
        let sign = &int_part[..int_part.len() - unsigned.len()];
        let mut groups = unsigned.split(group);
        let lead = groups.next().unwrap_or_default();
        if lead.is_empty() || lead.len() > 3 || !lead.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push_str(sign);
        out.push_str(lead);
        for g in groups {
            if g.len() != 3 || !g.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            out.push_str(g);
        }
    } else {
        out.push_str(int_part);
    }

    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    Some(out)
}
