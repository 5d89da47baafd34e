use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use console::style;
use progress::{Phase, Progress};
use ruhuff::ContainerInfo;
use tracing::{debug, level_filters::LevelFilter};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod progress;

/// Extension appended to compressed files
const EXTENSION: &str = "huff";

#[derive(Parser)]
#[command(version, about = "Compress and decompress files with static Huffman coding", long_about = None)]
struct Cli {
    /// Print more information, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Overwrite the output file if it already exists
    #[arg(short, long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a Huffman container
    Compress {
        input: PathBuf,
        /// Defaults to the input path with `.huff` appended
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore the original file from a Huffman container
    Decompress {
        input: PathBuf,
        /// Defaults to the input path without `.huff`, or with `.out` appended
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the header and code table of a Huffman container
    Inspect { input: PathBuf },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(level)
        .with(fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| append_extension(&input, EXTENSION));
            compress(&input, &output, cli.force)
        }
        Commands::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            decompress(&input, &output, cli.force)
        }
        Commands::Inspect { input } => inspect(&input),
    }
}

fn compress(input: &Path, output: &Path, force: bool) -> color_eyre::Result<()> {
    let progress = Progress::new();
    let data = read_input(input, &progress)?;

    progress.enter(Phase::Compressing);
    let container = ruhuff::compress(&data)
        .wrap_err_with(|| format!("failed to compress {}", input.display()))?;

    progress.enter(Phase::Writing);
    write_output(output, &container, force)?;

    let done = style("compressed").green().bold().to_string();
    progress.finish(&done, data.len(), container.len());
    Ok(())
}

fn decompress(input: &Path, output: &Path, force: bool) -> color_eyre::Result<()> {
    let progress = Progress::new();
    let container = read_input(input, &progress)?;

    progress.enter(Phase::Decompressing);
    let data = ruhuff::decompress(&container)
        .wrap_err_with(|| format!("{} is not a valid container", input.display()))?;

    progress.enter(Phase::Writing);
    write_output(output, &data, force)?;

    let done = style("decompressed").green().bold().to_string();
    progress.finish(&done, container.len(), data.len());
    Ok(())
}

fn inspect(input: &Path) -> color_eyre::Result<()> {
    let progress = Progress::new();
    let container = read_input(input, &progress)?;
    progress.clear();

    let info = ruhuff::inspect(&container)
        .wrap_err_with(|| format!("{} is not a valid container", input.display()))?;
    print_info(&info);
    Ok(())
}

fn print_info(info: &ContainerInfo) {
    println!("{:<16}{}", style("leaves").bold(), info.header.table.len());
    println!("{:<16}{} bytes", style("original size").bold(), info.original_len());
    println!("{:<16}{} bytes", style("header").bold(), info.header_len);
    println!(
        "{:<16}{} bits in {} bytes",
        style("body").bold(),
        info.body_bits,
        info.container_len - info.header_len
    );

    let Some(codebook) = info.codebook() else {
        return;
    };
    println!();
    println!("{:>8} {:>12}  code", "symbol", "count");
    for (symbol, count) in info.header.table.iter() {
        let code = codebook.get(symbol).map(|code| code.to_string()).unwrap_or_default();
        println!(
            "{:>8} {:>12}  {}",
            display_symbol(symbol),
            count,
            style(code).cyan()
        );
    }
}

/// Printable ASCII as itself, everything else as hex
fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{symbol:02x}")
    }
}

fn read_input(path: &Path, progress: &Progress) -> color_eyre::Result<Vec<u8>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let size = file.metadata()?.len();
    debug!("reading {} ({size} bytes)", path.display());

    let mut reader = progress.read(BufReader::new(file), size);
    let mut data = Vec::with_capacity(size as usize);
    reader
        .read_to_end(&mut data)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(data)
}

fn write_output(path: &Path, data: &[u8], force: bool) -> color_eyre::Result<()> {
    let file = if force {
        File::create(path)
    } else {
        File::create_new(path)
    };
    let mut file = file.wrap_err_with(|| {
        if path.exists() && !force {
            eyre!("{} already exists, pass --force to overwrite it", path.display())
        } else {
            eyre!("failed to create {}", path.display())
        }
    })?;
    file.write_all(data)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        input.with_extension("")
    } else {
        append_extension(input, "out")
    }
}
