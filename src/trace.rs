//! Trace line formatting for `coretrace{i}` and `bustrace`.

use crate::bus::{BusTraceLine, TraceCommand};
use crate::core::CoreTraceLine;

fn stage_field(pc: Option<u16>) -> String {
    match pc {
        Some(pc) => format!("{:03X}", pc & 0xFFF),
        None => "---".to_string(),
    }
}

/// Formats one `coretrace{i}` line: cycle, five stage fields, R2..R15.
pub fn format_core_trace(cycle: u64, line: &CoreTraceLine) -> String {
    let mut fields = vec![
        cycle.to_string(),
        stage_field(line.f_pc),
        stage_field(line.d_pc),
        stage_field(line.e_pc),
        stage_field(line.m_pc),
        stage_field(line.w_pc),
    ];
    fields.extend(line.registers.iter().map(|r| format!("{:08X}", *r as u32)));
    fields.join(" ")
}

/// Formats one `bustrace` line: cycle, origin, command, address, data,
/// shared bit.
pub fn format_bus_trace(cycle: u64, line: &BusTraceLine) -> String {
    let cmd = match line.command {
        TraceCommand::Rd => 1,
        TraceCommand::Rdx => 2,
        TraceCommand::Flush => 3,
    };
    format!(
        "{} {:01X} {:01X} {:05X} {:08X} {:01X}",
        cycle,
        line.origin,
        cmd,
        line.addr & 0xFFFFF,
        line.data as u32,
        if line.shared { 1 } else { 0 }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_field_renders_dashes_for_empty_latch() {
        assert_eq!(stage_field(None), "---");
    }

    #[test]
    fn stage_field_renders_three_hex_digits() {
        assert_eq!(stage_field(Some(5)), "005");
    }

    #[test]
    fn bus_trace_line_formats_fixed_width_fields() {
        let line = BusTraceLine {
            origin: 2,
            command: TraceCommand::Flush,
            addr: 0x10,
            data: -1,
            shared: true,
        };
        assert_eq!(format_bus_trace(7, &line), "7 2 3 00010 FFFFFFFF 1");
    }
}
