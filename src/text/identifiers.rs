//! Parses free-form alternate-designator lists, e.g.
//! `"M 31, PGC 2557, UGC 454, MCG 7-2-16"`.

use std::fmt;

/// One catalog designator. Prefixes with no numeric slot in the object
/// model are retained verbatim as [`Other`](Designator::Other) — losing an
/// identifier is worse than keeping it imprecisely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Designator {
    Messier(u32),
    Ngc(u32),
    Ic(u32),
    Pgc(u32),
    Other(String),
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Messier(n) => write!(f, "M {}", n),
            Self::Ngc(n) => write!(f, "NGC {}", n),
            Self::Ic(n) => write!(f, "IC {}", n),
            Self::Pgc(n) => write!(f, "PGC {}", n),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Splits a designator list on commas/semicolons and parses each entry.
/// Pure, hence idempotent: the same input always yields the same ordered
/// list.
pub fn parse_identifiers(list: &str) -> Vec<Designator> {
    list.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_designator)
        .collect()
}

/// Parses one designator token. Never fails: anything that is not a known
/// prefix followed by a plain number comes back as
/// [`Other`](Designator::Other).
pub fn parse_designator(token: &str) -> Designator {
    let token = token.trim();
    let Some(digits_at) = token.find(|c: char| c.is_ascii_digit()) else {
        return Designator::Other(token.to_string());
    };
    let (prefix, digits) = token.split_at(digits_at);
    let prefix = prefix.trim();
    let Ok(number) = digits.trim().parse::<u32>() else {
        return Designator::Other(token.to_string());
    };
    if prefix.eq_ignore_ascii_case("M") || prefix.eq_ignore_ascii_case("Messier") {
        Designator::Messier(number)
    } else if prefix.eq_ignore_ascii_case("NGC") {
        Designator::Ngc(number)
    } else if prefix.eq_ignore_ascii_case("IC") {
        Designator::Ic(number)
    } else if prefix.eq_ignore_ascii_case("PGC") || prefix.eq_ignore_ascii_case("LEDA") {
        Designator::Pgc(number)
    } else {
        Designator::Other(token.to_string())
    }
}
