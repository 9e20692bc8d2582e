//! Terminal front-end: load a sample and drive slices from typed commands.

use anyhow::{Context, Result};
use clap::Parser;
use snip::prelude::*;
use snip::{command::HELP, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Slice an audio file and play the slices from the keyboard", long_about = None)]
struct Cli {
    /// Audio file to load (WAV, MP3, FLAC, OGG)
    file: Option<PathBuf>,

    /// Number of slices to cut the file into
    #[arg(short = 'n', long, default_value_t = 9)]
    slices: usize,

    /// Output device index (see --list-devices)
    #[arg(long)]
    device: Option<usize>,

    /// Directory loaded files are copied into
    #[arg(long, default_value = "upload")]
    upload_dir: PathBuf,

    /// Load files in place instead of copying them
    #[arg(long)]
    no_upload: bool,

    /// Print output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if cli.list_devices {
        print_devices(None)?;
        return Ok(());
    }

    let mut builder = SnipEngine::builder();
    builder = if cli.no_upload {
        builder.no_upload()
    } else {
        builder.upload_dir(cli.upload_dir.clone())
    };
    if let Some(index) = cli.device {
        builder = builder.output_device(index);
    }
    let mut engine = builder.build()?;

    if let Some(file) = &cli.file {
        engine
            .load_file(file, cli.slices)
            .with_context(|| format!("failed to load {}", file.display()))?;
        print_table(&engine);
    } else {
        println!("No file loaded. Use: load PATH N");
    }

    repl(&mut engine)
}

fn repl(engine: &mut SnipEngine<CpalDevice>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match Command::parse(&line, engine.keymap()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        if let Err(e) = run(engine, command) {
            eprintln!("Error: {e}");
        }
    }

    engine.stop();
    Ok(())
}

fn run(engine: &mut SnipEngine<CpalDevice>, command: Command) -> Result<()> {
    match command {
        Command::Key(key) => {
            if engine.press_key(key)?.is_none() {
                println!("No slice on key '{key}'");
            }
        }
        Command::Play(number) => engine.play(number)?,
        Command::Stop => engine.stop(),
        Command::List => print_table(engine),
        Command::Adjust { number, adjustment } => {
            engine.adjust(number, adjustment)?;
            print_table(engine);
        }
        Command::Load { path, slices } => {
            engine.load_file(&path, slices)?;
            print_table(engine);
        }
        Command::Devices => print_devices(Some(engine.device()))?,
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn print_table<D: PlaybackDevice>(engine: &SnipEngine<D>) {
    if let Some(path) = engine.source_path() {
        println!("{}", path.display());
    }
    println!("{:>3}  {:>4}  {:>10}  {:>10}  {:>5}", "#", "Key", "Start (ms)", "End (ms)", "Pitch");
    for row in engine.rows() {
        let key = row.key.map_or_else(|| "N/A".to_string(), |k| k.to_string());
        println!(
            "{:>3}  {:>4}  {:>10}  {:>10}  {:>+5}",
            row.number, key, row.start_ms, row.end_ms, row.pitch_shift
        );
    }
}

fn print_devices(current: Option<&CpalDevice>) -> Result<()> {
    if let Some(device) = current {
        println!("Current: {}", device.device_name()?);
    }
    for device in CpalDevice::list_devices()? {
        println!("{device}");
    }
    Ok(())
}
