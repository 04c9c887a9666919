use lazy_static::lazy_static;
use regex::Regex;
use crate::models::PoolAddress;

lazy_static! {
    static ref ADDRESS_RE: Regex =
        Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern compiles");
}

/// Placeholder line shipped in the sample input; skipped without a warning.
const PLACEHOLDER: &str = "0x...";

pub fn is_valid(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

#[derive(Debug, Default, PartialEq)]
pub struct Partition {
    pub valid: Vec<PoolAddress>,
    pub invalid: Vec<String>,
}

/// Splits a multi-line block into validated addresses and rejected lines,
/// preserving input order. Blank lines and the placeholder are dropped.
pub fn parse_input(block: &str) -> Partition {
    let mut partition = Partition::default();

    for line in block.lines().map(str::trim) {
        if line.is_empty() || line == PLACEHOLDER {
            continue;
        }
        match PoolAddress::parse(line) {
            Some(address) => partition.valid.push(address),
            None => partition.invalid.push(line.to_string()),
        }
    }

    partition
}
