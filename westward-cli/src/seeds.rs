use anyhow::{Context, Result, bail};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1848;

/// Cap on how many seeds one range token may expand to.
const MAX_RANGE_LEN: u64 = 100_000;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve seed tokens into a deduplicated, ordered seed list.
///
/// Accepts literal integers (negative values use their magnitude), half-open
/// ranges like `10..20`, and inclusive ranges like `10..=20`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        let expanded = if let Some((start, end)) = token.split_once("..=") {
            let (start, end) = parse_bounds(token, start, end)?;
            expand_range(token, start, end.saturating_add(1))?
        } else if let Some((start, end)) = token.split_once("..") {
            let (start, end) = parse_bounds(token, start, end)?;
            expand_range(token, start, end)?
        } else {
            vec![parse_seed(token)?]
        };

        for seed in expanded {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn parse_seed(token: &str) -> Result<u64> {
    if let Ok(value) = token.parse::<u64>() {
        return Ok(value);
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(value.unsigned_abs());
    }
    bail!("Unrecognized seed token: {token}")
}

fn parse_bounds(token: &str, start: &str, end: &str) -> Result<(u64, u64)> {
    let start = start
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid range start in {token}"))?;
    let end = end
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid range end in {token}"))?;
    Ok((start, end))
}

fn expand_range(token: &str, start: u64, end: u64) -> Result<Vec<u64>> {
    if end <= start {
        bail!("Empty seed range: {token}");
    }
    if end - start > MAX_RANGE_LEN {
        bail!("Seed range {token} expands past {MAX_RANGE_LEN} seeds");
    }
    Ok((start..end).collect())
}
