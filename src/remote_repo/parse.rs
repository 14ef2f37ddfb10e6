// Parsing of pipe-delimited `docker stats` / `docker ps` output and the name join

use crate::models::{Row, Source};
use std::collections::HashMap;

/// Placeholder for metrics of a process missing from the stats sample.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsEntry {
    pub cpu: String,
    /// Numerator of `usage / limit`.
    pub mem: String,
}

fn fields(line: &str) -> Option<[&str; 3]> {
    let mut parts = line.split('|').map(str::trim);
    Some([parts.next()?, parts.next()?, parts.next()?])
}

/// `name|cpu|mem/limit` lines into name -> (cpu, mem numerator).
/// Lines with fewer than three fields are skipped.
pub fn parse_stats(raw: &str) -> HashMap<String, StatsEntry> {
    raw.lines()
        .filter_map(fields)
        .map(|[name, cpu, mem]| {
            let mem = mem.split('/').next().unwrap_or_default().trim();
            (
                name.to_string(),
                StatsEntry {
                    cpu: cpu.to_string(),
                    mem: mem.to_string(),
                },
            )
        })
        .collect()
}

/// `name|image|status` lines in their given order.
pub fn parse_process_list(raw: &str) -> Vec<(String, String, String)> {
    raw.lines()
        .filter_map(fields)
        .map(|[name, image, status]| (name.to_string(), image.to_string(), status.to_string()))
        .collect()
}

/// One row per process-list line, in process-list order. Names missing from
/// `stats` get placeholder metrics instead of being dropped.
pub fn join_remote(stats: &HashMap<String, StatsEntry>, raw_ps: &str, host: &str) -> Vec<Row> {
    parse_process_list(raw_ps)
        .into_iter()
        .map(|(name, image, status)| {
            let (cpu, mem) = match stats.get(&name) {
                Some(s) => (s.cpu.clone(), s.mem.clone()),
                None => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
            };
            Row {
                name,
                image,
                status,
                cpu,
                mem,
                source: Source::Remote(host.to_string()),
            }
        })
        .collect()
}
