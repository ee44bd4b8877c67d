//! Entrypoint for CLI
use std::{env, fs, process, time::Duration, time::Instant};

use chip8::{
    constants::NANOS_IN_SECOND,
    prelude::*,
    IMPL_VERSION,
};
use log::{error, info, warn};

use self::{config::CliConfig, error::CliError};

mod config;
mod error;

static USAGE: &str = r#"
usage: chip8 [--config PATH] CMD FILE [N]

commands:
    run     Run the target ROM file for N frames at 60 frames per second (default 600)
    step    Execute N instructions of the target ROM file (default 1), one at a time
    dis     Disassemble the target ROM into readable assembly

options:
    --config PATH   YAML file with clock frequency, random seed, quirks and key map

examples:
    chip8 run breakout.rom
    chip8 step breakout.rom 20
    chip8 --config chip8.yaml run breakout.rom 120
    chip8 dis breakout.rom
"#;

const FRAME_RATE: u64 = 60;
const DEFAULT_FRAMES: u64 = 600;

/// Headless sound output that counts the beeps.
#[derive(Default)]
struct BeepCounter {
    beeps: usize,
}

impl Buzzer for BeepCounter {
    fn start_tone(&mut self) {
        self.beeps += 1;
    }

    fn stop_tone(&mut self) {}
}

/// Returns the VM along with the size of the loaded program.
fn load_vm(filepath: &str, config: Option<&str>) -> Result<(Chip8Vm, usize), CliError> {
    let conf = match config {
        Some(path) => CliConfig::from_file(path)?.into_conf()?,
        None => Chip8Conf::default(),
    };

    let bytecode = fs::read(filepath)?;
    let mut vm = Chip8Vm::new(conf);
    vm.load_bytecode(bytecode.as_slice())?;

    Ok((vm, bytecode.len()))
}

fn run_bytecode(filepath: &str, frames: u64, config: Option<&str>) -> Result<(), CliError> {
    info!("running {filepath} for {frames} frames");

    let (mut vm, _) = load_vm(filepath, config)?;
    let input = InputState::new();
    let mut buzzer = BeepCounter::default();

    let start = Instant::now();
    let mut elapsed = 0;

    for frame in 1..=frames {
        // Frame boundaries are rounded individually so the total adds up.
        let target = frame * NANOS_IN_SECOND / FRAME_RATE;
        let delta = Duration::from_nanos(target - elapsed);
        elapsed = target;

        if vm.tick(delta, &input, &mut buzzer)? == Flow::KeyWait {
            warn!("program is waiting for a key press at frame {frame}, stopping");
            break;
        }
    }

    let end = Instant::now();

    println!("{}", vm.dump_display()?);
    println!("{}", vm.dump_registers()?);
    println!(
        "cycles: {}, beeps: {}, time taken: {}ms",
        vm.cycle_count(),
        buzzer.beeps,
        end.duration_since(start).as_nanos() as f64 / 1000000.0
    ); // to millis

    Ok(())
}

fn step_bytecode(filepath: &str, count: u64, config: Option<&str>) -> Result<(), CliError> {
    let (mut vm, size) = load_vm(filepath, config)?;
    let input = InputState::new();
    let mut buzzer = BeepCounter::default();

    println!("{}", vm.dump_ram(size)?);

    for _ in 0..count {
        let pc = vm.pc();
        let opcode = vm.current_opcode();
        let flow = vm.step(&input, &mut buzzer)?;
        println!("0x{pc:04X} {opcode} {:<16} {flow:?}", Op::decode(opcode).to_string());
        println!("{}\n", vm.dump_registers()?);

        if flow == Flow::KeyWait {
            warn!("program is waiting for a key press, stopping");
            break;
        }
    }

    Ok(())
}

fn run_disassembler(filepath: &str) -> Result<(), CliError> {
    let bytecode = fs::read(filepath)?;
    Disassembler::new(bytecode.as_slice()).print_bytecode()?;
    Ok(())
}

fn main() {
    simple_logger::SimpleLogger::new()
        .env()
        .init()
        .unwrap_or_else(|err| eprintln!("failed to initialise logger: {err}"));

    let Some(args) = parse_args(env::args().skip(1)) else {
        print_usage();
        // FreeBSD EX_USAGE (64)
        process::exit(64)
    };

    let config = args.config.as_deref();
    let result = match args.cmd {
        Cmd::Run { filepath, frames } => run_bytecode(&filepath, frames, config),
        Cmd::Step { filepath, count } => step_bytecode(&filepath, count, config),
        Cmd::Dis { filepath } => run_disassembler(&filepath),
    };

    if let Err(err) = result {
        if err.is_fault() {
            error!("program halted: {err}");
        } else {
            error!("{err}");
        }
        process::exit(1)
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Args> {
    let mut config = None;

    let mut cmd = args.next()?;
    if cmd == "--config" {
        config = Some(args.next()?);
        cmd = args.next()?;
    }

    let cmd = match cmd.as_str() {
        "run" => Cmd::Run {
            filepath: args.next()?,
            frames: consume_count(&mut args, DEFAULT_FRAMES)?,
        },
        "step" => Cmd::Step {
            filepath: args.next()?,
            count: consume_count(&mut args, 1)?,
        },
        "dis" => Cmd::Dis {
            filepath: args.next()?,
        },
        _ => return None,
    };

    // Trailing arguments are a usage error.
    if args.next().is_some() {
        return None;
    }

    Some(Args { config, cmd })
}

/// Consumes an optional numeric argument.
fn consume_count(args: &mut impl Iterator<Item = String>, default: u64) -> Option<u64> {
    match args.next() {
        Some(arg) => arg.parse().ok(),
        None => Some(default),
    }
}

fn print_usage() {
    println!("Chip8 v{IMPL_VERSION}");
    println!("{USAGE}");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    config: Option<String>,
    cmd: Cmd,
}

#[derive(Debug, PartialEq, Eq)]
enum Cmd {
    /// Run file
    Run { filepath: String, frames: u64 },
    /// Single step
    Step { filepath: String, count: u64 },
    /// Disassemble
    Dis { filepath: String },
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(line: &str) -> Option<Args> {
        parse_args(line.split_whitespace().map(String::from))
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse("run pong.rom"),
            Some(Args {
                config: None,
                cmd: Cmd::Run {
                    filepath: "pong.rom".to_string(),
                    frames: DEFAULT_FRAMES
                }
            })
        );
        assert_eq!(
            parse("--config c.yaml step pong.rom 12"),
            Some(Args {
                config: Some("c.yaml".to_string()),
                cmd: Cmd::Step {
                    filepath: "pong.rom".to_string(),
                    count: 12
                }
            })
        );
        assert!(matches!(parse("dis pong.rom"), Some(Args { cmd: Cmd::Dis { .. }, .. })));
    }

    #[test]
    fn test_parse_args_usage_errors() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("run"), None);
        assert_eq!(parse("asm pong.asm"), None);
        assert_eq!(parse("step pong.rom many"), None);
        assert_eq!(parse("dis pong.rom extra"), None);
        assert_eq!(parse("--config"), None);
    }
}
