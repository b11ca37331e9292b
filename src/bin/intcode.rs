// SPDX-FileCopyrightText: 2025 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Run an Intcode program, either with numeric I/O or interactively in ASCII mode, using stdin
//! and stdout for I/O

use intcode_vm::prelude::*;
use intcode_vm::{Config, MemoryLimit, Program, Status};
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write, stdin, stdout};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{debug, info};

#[derive(PartialEq, Clone, Copy, ValueEnum)]
enum CodeFormat {
    /// comma-separated ASCII-encoded decimal numbers
    #[value(alias("text"))]
    #[value(alias("aoc"))]
    Ascii,
    /// little-endian 64-bit integers
    #[cfg_attr(target_endian = "little", value(alias("binary-native")))]
    #[value(name("binary-little-endian"), alias("binle"))]
    LittleEndian,
    #[cfg_attr(target_endian = "big", value(alias("binary-native")))]
    #[value(name("binary-big-endian"), alias("binbe"))]
    /// big-endian 64-bit integers
    BigEndian,
}

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Intcode interpreter", long_about = None)]
struct Args {
    #[arg(help = "The program to run")]
    source: PathBuf,
    #[arg(help = "Input format for the intcode")]
    #[arg(short, long)]
    #[arg(default_value = "ascii")]
    format: CodeFormat,
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    #[arg(help = "Comma-separated values to provide as input before reading from stdin")]
    input: Vec<i64>,
    #[arg(short, long)]
    #[arg(help = "Exchange input and output as ASCII text instead of integers")]
    ascii: bool,
    #[arg(short, long, value_name = "CELLS")]
    #[arg(help = "Use a fixed memory arena with this many cells past the end of the program")]
    scratch: Option<usize>,
    #[arg(short, long)]
    #[arg(help = "Print each executed instruction to stderr")]
    trace: bool,
}

/// Read a line from stdin, returning `None` at end of file
fn get_line() -> io::Result<Option<String>> {
    let mut buf = String::new();
    if stdin().lock().read_line(&mut buf)? == 0 {
        Ok(None)
    } else {
        Ok(Some(buf))
    }
}

fn print_output(interp: &mut Interpreter, ascii: bool) -> io::Result<()> {
    let mut stdout = stdout().lock();
    let output = interp.output_mut();
    while !output.is_empty() {
        if ascii {
            write!(stdout, "{}", output.take_ascii())?;
        }
        // anything left over is either numeric output or a non-ASCII value in ASCII mode
        if let Some(value) = output.try_take_next() {
            writeln!(stdout, "{value}")?;
        }
    }
    stdout.flush()
}

fn interactive_run(interp: &mut Interpreter, args: &Args) -> Result<(), Box<dyn Error>> {
    interp.input_mut().fill(&args.input);
    loop {
        let state = interp.run()?;
        print_output(interp, args.ascii)?;
        if state == State::Halted {
            return Ok(());
        }
        let Some(line) = get_line()? else {
            return Err("reached end of input while program was awaiting input".into());
        };
        if args.ascii {
            interp.input_mut().add_ascii(&line)?;
        } else {
            for value in line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                interp.input_mut().add(value.parse()?);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let program = match args.format {
        CodeFormat::Ascii => Program::parse(&fs::read_to_string(&args.source)?)?,
        CodeFormat::LittleEndian => Program::from_le_bytes(&fs::read(&args.source)?)?,
        CodeFormat::BigEndian => Program::from_be_bytes(&fs::read(&args.source)?)?,
    };
    info!("loaded {} ints from {}", program.len(), args.source.display());

    let config = Config {
        memory: args.scratch.map_or(MemoryLimit::Unbounded, MemoryLimit::Scratch),
    };
    debug!("using {config:?}");
    let mut interp = Interpreter::with_config(program, config, IoQueue::new(), IoQueue::new());
    if args.trace {
        interp.start_trace();
    }

    let result = interactive_run(&mut interp, &args);
    if let Some(trace) = interp.end_trace() {
        let mut stderr = io::stderr().lock();
        for instr in trace.0 {
            writeln!(stderr, "{instr}")?;
        }
    }
    if interp.status() == Status::Poisoned {
        eprintln!("INTERPRETER ERROR at ip {}\n\n{interp:?}", interp.ip());
    }
    result
}
