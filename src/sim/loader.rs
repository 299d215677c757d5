//! Loads hex-text memory images.
//!
//! Both instruction and main-memory images share the same text format:
//! one 8-hex-digit word per line, missing lines implicitly zero.

use std::fs;
use std::path::Path;

use crate::common::SimError;

/// Parses a hex-text image file into a vector of 32-bit words. Blank
/// lines are skipped; each remaining line must be a bare hex word.
pub fn load_hex_image(path: impl AsRef<Path>) -> Result<Vec<i32>, SimError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    parse_hex_lines(&content)
        .map_err(|line| SimError::UsageError(format!("malformed hex word in {}: {}", path.display(), line)))
}

/// Parses hex-text image contents into a vector of 32-bit words. Blank
/// lines are skipped. On failure, returns the offending line.
fn parse_hex_lines(content: &str) -> Result<Vec<i32>, String> {
    let mut words = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let bits = u32::from_str_radix(line, 16).map_err(|_| line.to_string())?;
        words.push(bits as i32);
    }
    Ok(words)
}

/// Loads an instruction memory image, zero-padded to 1024 words.
pub fn load_instruction_memory(path: impl AsRef<Path>) -> Result<Vec<u32>, SimError> {
    let words = load_hex_image(path)?;
    let mut raw: Vec<u32> = words.into_iter().map(|w| w as u32).collect();
    raw.resize(1024, 0);
    Ok(raw)
}

/// Loads the main-memory image, zero-padded up to 1 MiB of words.
pub fn load_main_memory(path: impl AsRef<Path>) -> Result<Vec<i32>, SimError> {
    load_hex_image(path)
}
