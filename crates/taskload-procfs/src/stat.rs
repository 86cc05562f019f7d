//! Parsers for `/proc/<pid>/task/<tid>/stat` and `/proc/stat`.

use crate::errors::StatParseError;

/// The parts of a thread's stat line the sampler needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadStat {
    pub tid: u64,
    pub comm: String,
    /// Ticks in user mode
    pub utime: u64,
    /// Ticks in kernel mode
    pub stime: u64,
}

impl ThreadStat {
    pub fn runtime(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

// Field numbers from proc(5), counted from 1.
const FIELD_STATE: usize = 3;
const FIELD_UTIME: usize = 14;
const FIELD_STIME: usize = 15;

fn parse_u64(field: &'static str, value: &str) -> Result<u64, StatParseError> {
    value.parse().map_err(|_| StatParseError::NotANumber {
        field,
        value: value.to_string(),
    })
}

/// Parse one thread stat line
///
/// `comm` may itself contain spaces and parentheses, so it is delimited by
/// the first `(` and the last `)`.
pub fn parse_thread_stat(line: &str) -> Result<ThreadStat, StatParseError> {
    let open = line.find('(').ok_or(StatParseError::MissingComm)?;
    let close = line.rfind(')').ok_or(StatParseError::MissingComm)?;
    if close < open {
        return Err(StatParseError::MissingComm);
    }

    let tid = parse_u64("pid", line[..open].trim())?;
    let comm = line[open + 1..close].to_string();

    let rest: Vec<&str> = line[close + 1..].split_whitespace().collect();
    let needed = FIELD_STIME - FIELD_STATE + 1;
    if rest.len() < needed {
        return Err(StatParseError::TooFewFields {
            expected: needed,
            found: rest.len(),
        });
    }

    Ok(ThreadStat {
        tid,
        comm,
        utime: parse_u64("utime", rest[FIELD_UTIME - FIELD_STATE])?,
        stime: parse_u64("stime", rest[FIELD_STIME - FIELD_STATE])?,
    })
}

/// Aggregate CPU counters from `/proc/stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTotals {
    /// Sum of user..steal on the aggregate `cpu` line, across all CPUs
    pub total_ticks: u64,
    /// Number of `cpuN` lines
    pub cpus: u32,
}

impl CpuTotals {
    /// Ticks elapsed per CPU; the wall-clock tick counter
    pub fn per_cpu_ticks(&self) -> u64 {
        self.total_ticks / u64::from(self.cpus.max(1))
    }
}

/// Parse `/proc/stat`
///
/// Guest time is already folded into user time, so only the first eight
/// columns (user, nice, system, idle, iowait, irq, softirq, steal) count.
pub fn parse_proc_stat(text: &str) -> Result<CpuTotals, StatParseError> {
    let mut total_ticks = None;
    let mut cpus = 0u32;

    for line in text.lines() {
        let mut cols = line.split_whitespace();
        match cols.next() {
            Some("cpu") => {
                let mut sum = 0u64;
                for value in cols.take(8) {
                    sum = sum.saturating_add(parse_u64("cpu", value)?);
                }
                total_ticks = Some(sum);
            }
            Some(label) if label.starts_with("cpu") => cpus += 1,
            _ => {}
        }
    }

    Ok(CpuTotals {
        total_ticks: total_ticks.ok_or(StatParseError::MissingCpuLine)?,
        cpus: cpus.max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "4242 (tokio-rt (w) 1) S 1 4242 4242 0 -1 4194624 120 0 0 0 37 11 0 0 20 0 9 0 1000 0 0";

    #[test]
    fn test_parse_thread_stat_with_awkward_comm() {
        let stat = parse_thread_stat(LINE).unwrap();
        assert_eq!(stat.tid, 4242);
        assert_eq!(stat.comm, "tokio-rt (w) 1");
        assert_eq!(stat.utime, 37);
        assert_eq!(stat.stime, 11);
        assert_eq!(stat.runtime(), 48);
    }

    #[test]
    fn test_parse_thread_stat_truncated() {
        let err = parse_thread_stat("1 (init) S 0 1").unwrap_err();
        assert!(matches!(err, StatParseError::TooFewFields { .. }));
    }

    #[test]
    fn test_parse_thread_stat_without_comm() {
        assert_eq!(
            parse_thread_stat("1 init S").unwrap_err(),
            StatParseError::MissingComm
        );
    }

    #[test]
    fn test_parse_proc_stat() {
        let text = "cpu  100 0 50 800 10 0 5 0 7 0\n\
                    cpu0 50 0 25 400 5 0 3 0 0 0\n\
                    cpu1 50 0 25 400 5 0 2 0 0 0\n\
                    intr 12345\n\
                    ctxt 999\n";
        let totals = parse_proc_stat(text).unwrap();
        assert_eq!(totals.total_ticks, 965);
        assert_eq!(totals.cpus, 2);
        assert_eq!(totals.per_cpu_ticks(), 482);
    }

    #[test]
    fn test_parse_proc_stat_without_aggregate_line() {
        let err = parse_proc_stat("cpu0 1 2 3\n").unwrap_err();
        assert_eq!(err, StatParseError::MissingCpuLine);
    }
}
