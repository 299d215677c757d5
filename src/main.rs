//! Four-core MESI CMP cycle-accurate simulator CLI.
//!
//! Takes either zero arguments (all filenames default to well-known names
//! in the working directory) or exactly 27 positional filenames, in
//! order: `imem0..3`, `memin`, `memout`, `regout0..3`, `coretrace0..3`,
//! `bustrace`, `dsram0..3`, `tsram0..3`, `stats0..3`.

use clap::Parser;
use std::process;

use mesi_cmp_sim::common::SimError;
use mesi_cmp_sim::config::SimConfig;
use mesi_cmp_sim::sim::{loader, writer, System};

#[derive(Parser, Debug)]
#[command(author, version, about = "Four-core MESI CMP cycle-accurate simulator")]
struct Args {
    /// Zero filenames (use defaults) or exactly 27, in the fixed order
    /// this simulator's external interface specifies.
    files: Vec<String>,
}

/// The 27 filenames, unpacked from the positional argument list.
struct Filenames {
    imem: [String; 4],
    memin: String,
    memout: String,
    regout: [String; 4],
    coretrace: [String; 4],
    bustrace: String,
    dsram: [String; 4],
    tsram: [String; 4],
    stats: [String; 4],
}

const DEFAULT_NAMES: [&str; 27] = [
    "imem0.txt",
    "imem1.txt",
    "imem2.txt",
    "imem3.txt",
    "memin.txt",
    "memout.txt",
    "regout0.txt",
    "regout1.txt",
    "regout2.txt",
    "regout3.txt",
    "coretrace0.txt",
    "coretrace1.txt",
    "coretrace2.txt",
    "coretrace3.txt",
    "bustrace.txt",
    "dsram0.txt",
    "dsram1.txt",
    "dsram2.txt",
    "dsram3.txt",
    "tsram0.txt",
    "tsram1.txt",
    "tsram2.txt",
    "tsram3.txt",
    "stats0.txt",
    "stats1.txt",
    "stats2.txt",
    "stats3.txt",
];

impl Filenames {
    fn from_args(files: &[String]) -> Result<Filenames, SimError> {
        let files: Vec<String> = match files.len() {
            0 => DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
            27 => files.to_vec(),
            n => {
                return Err(SimError::UsageError(format!(
                    "expected 0 or 27 filename arguments, got {n}"
                )))
            }
        };

        Ok(Filenames {
            imem: take4(&files, 0),
            memin: files[4].clone(),
            memout: files[5].clone(),
            regout: take4(&files, 6),
            coretrace: take4(&files, 10),
            bustrace: files[14].clone(),
            dsram: take4(&files, 15),
            tsram: take4(&files, 19),
            stats: take4(&files, 23),
        })
    }
}

fn take4(files: &[String], start: usize) -> [String; 4] {
    [
        files[start].clone(),
        files[start + 1].clone(),
        files[start + 2].clone(),
        files[start + 3].clone(),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        tracing::error!(%err, "simulation aborted");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let args = Args::parse();
    let names = Filenames::from_args(&args.files)?;
    let config = SimConfig::from_env();

    let imems = [
        loader::load_instruction_memory(&names.imem[0])?,
        loader::load_instruction_memory(&names.imem[1])?,
        loader::load_instruction_memory(&names.imem[2])?,
        loader::load_instruction_memory(&names.imem[3])?,
    ];
    let mem_image = loader::load_main_memory(&names.memin)?;

    let mut system = System::new(imems, mem_image);
    system.run(&config);

    tracing::info!(cycles = system.cycle, "simulation complete");

    writer::write_memout(&names.memout, &system.memory)?;
    writer::write_trace(&names.bustrace, &system.bus_trace)?;

    for i in 0..4 {
        writer::write_regout(&names.regout[i], system.cores[i].regs.architectural_registers())?;
        writer::write_trace(&names.coretrace[i], &system.core_traces[i])?;
        writer::write_dsram(&names.dsram[i], &system.cores[i].cache)?;
        writer::write_tsram(&names.tsram[i], &system.cores[i].cache)?;
        writer::write_stats(&names.stats[i], system.cores[i].stats)?;
    }

    Ok(())
}
