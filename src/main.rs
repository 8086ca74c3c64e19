use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rle7::{compress, decompress, CounterPair};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not print the byte report
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an input file to an output file
    #[command(visible_alias = "c", alias = "C")]
    Compress {
        /// Input file path (use - for stdin)
        input: String,
        /// Output file path (use - for stdout)
        output: String,
    },
    /// Decompress an input file to an output file
    #[command(visible_alias = "d", alias = "D")]
    Decompress {
        /// Input file path (use - for stdin)
        input: String,
        /// Output file path (use - for stdout)
        output: String,
    },
}

// Helper to open input (file or stdin)
fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

// Helper to open output (file or stdout)
fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        let file = File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn report(counters: &CounterPair, elapsed: std::time::Duration, to_stderr: bool) {
    let text = format!(
        "{} bytes processed,\n{} bytes produced.\nelapsed: {:.2?}",
        counters.input, counters.output, elapsed
    );
    if to_stderr {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let (input, output, compressing) = match &cli.command {
        Commands::Compress { input, output } => (input, output, true),
        Commands::Decompress { input, output } => (input, output, false),
    };

    let mut reader = open_input(input)?;
    let mut writer = open_output(output)?;

    let start = Instant::now();
    let counters = if compressing {
        compress(&mut reader, &mut writer)
            .with_context(|| format!("Compression failed from {} to {}", input, output))?
    } else {
        decompress(&mut reader, &mut writer)
            .with_context(|| format!("Decompression failed from {} to {}", input, output))?
    };
    writer.flush()?;
    let elapsed = start.elapsed();

    if !cli.quiet {
        report(&counters, elapsed, output == "-");
    }

    Ok(())
}
