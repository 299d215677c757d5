//! Writes the six output file types described in the external interface:
//! `memout`, `regout`, `coretrace`, `bustrace`, `dsram`, `tsram`, `stats`.

use std::fs;
use std::path::Path;

use crate::cache::Cache;
use crate::common::SimError;
use crate::memory::MainMemory;
use crate::stats::CoreStats;

fn write_lines(path: impl AsRef<Path>, lines: impl IntoIterator<Item = String>) -> Result<(), SimError> {
    let path = path.as_ref();
    let mut body: String = lines.into_iter().map(|l| l + "\n").collect();
    if body.is_empty() {
        body.push('\n');
    }
    fs::write(path, body).map_err(|e| SimError::io(path, e))
}

/// Writes `memout`: main memory contents, trailing zero words dropped.
pub fn write_memout(path: impl AsRef<Path>, memory: &MainMemory) -> Result<(), SimError> {
    let words = memory.words();
    let last_nonzero = words.iter().rposition(|&w| w != 0);
    let trimmed = match last_nonzero {
        Some(idx) => &words[..=idx],
        None => &[][..],
    };
    write_lines(path, trimmed.iter().map(|w| format!("{:08X}", *w as u32)))
}

/// Writes `regout{i}`: R2..R15, 8-hex uppercase per line.
pub fn write_regout(path: impl AsRef<Path>, registers: [i32; 14]) -> Result<(), SimError> {
    write_lines(path, registers.iter().map(|r| format!("{:08X}", *r as u32)))
}

/// Writes `coretrace{i}` or `bustrace`: pre-formatted lines, one per cycle
/// of observed activity.
pub fn write_trace(path: impl AsRef<Path>, lines: &[String]) -> Result<(), SimError> {
    write_lines(path, lines.iter().cloned())
}

/// Writes `dsram{i}`: all 512 data words, 8-hex per line.
pub fn write_dsram(path: impl AsRef<Path>, cache: &Cache) -> Result<(), SimError> {
    write_lines(path, cache.dump_data().iter().map(|w| format!("{:08X}", *w as u32)))
}

/// Writes `tsram{i}`: `(state << 12) | (tag & 0xFFF)` per line, 8-hex.
pub fn write_tsram(path: impl AsRef<Path>, cache: &Cache) -> Result<(), SimError> {
    write_lines(path, cache.dump_tag_state().iter().map(|w| format!("{:08X}", w)))
}

/// Writes `stats{i}`: the eight `name value` lines.
pub fn write_stats(path: impl AsRef<Path>, stats: CoreStats) -> Result<(), SimError> {
    write_lines(path, stats.to_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memout_drops_trailing_zeros() {
        let memory = MainMemory::new(vec![1, 2, 0, 0]);
        let tmp = std::env::temp_dir().join("mesi_cmp_sim_memout_test.hex");
        write_memout(&tmp, &memory).unwrap();
        let content = fs::read_to_string(&tmp).unwrap();
        let _ = fs::remove_file(&tmp);
        assert_eq!(content, "00000001\n00000002\n");
    }
}
