//! epwing-json - EPWING/EB dictionary to JSON converter

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use epwing_json::export::{Exporter, JsonConfig, JsonExporter};
use epwing_json::import::{DEFAULT_BATCH_SIZE, DEFAULT_READ_BUFFER_SIZE, ImportConfig};
use epwing_json::{Book, ExportError, dedup_book, import_files};

#[derive(Parser)]
#[command(name = "epwing-json")]
#[command(version, about = "EPWING/EB dictionary to JSON converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    epwing-json catalog.json HONMON                Print compact JSON to stdout
    epwing-json -p -s catalog.json HONMON -o d.json  Pretty JSON with positions
    epwing-json -i catalog.json HONMON             Show subbook summary")]
struct Cli {
    /// Catalog describing the volume's subbooks and search hits (JSON)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Raw text image of the volume
    #[arg(value_name = "TEXT")]
    text: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Indent output by four spaces
    #[arg(short, long)]
    pretty_print: bool,

    /// Include page/offset positions of headings, texts and copyrights
    #[arg(short = 's', long)]
    positions: bool,

    /// Hits requested per search batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Read buffer size per heading or text, in bytes
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER_SIZE)]
    buffer_size: usize,

    /// Show a subbook summary instead of writing JSON
    #[arg(short, long)]
    info: bool,

    /// Log more detail (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> epwing_json::Result<()> {
    let import_config = ImportConfig::default()
        .with_batch_size(cli.batch_size)
        .with_read_buffer_size(cli.buffer_size);

    let mut book = import_files(&cli.catalog, &cli.text, &import_config)?;
    dedup_book(&mut book);

    if cli.info {
        show_info(&cli.catalog, &book);
        return Ok(());
    }

    let config = JsonConfig::default()
        .with_positions(cli.positions)
        .with_pretty_print(cli.pretty_print);
    let exporter = JsonExporter::with_config(config);

    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(ExportError::from)?;
            write_json(&exporter, &book, cli.pretty_print, BufWriter::new(file))?;
        }
        None => {
            let stdout = BufWriter::new(io::stdout().lock());
            write_json(&exporter, &book, cli.pretty_print, stdout)?;
        }
    }

    Ok(())
}

/// Export `book` to `out`, ending pretty output with a newline.
fn write_json<W: Write>(
    exporter: &JsonExporter,
    book: &Book,
    pretty_print: bool,
    mut out: W,
) -> Result<(), ExportError> {
    exporter.export(book, &mut out)?;
    if pretty_print {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn show_info(path: &Path, book: &Book) {
    println!("Catalog: {}", path.display());
    println!("Character code: {}", book.char_code());
    println!("Disc code: {}", book.disc_code());
    println!("Subbooks: {}", book.subbooks().len());
    for (i, subbook) in book.subbooks().iter().enumerate() {
        let title = subbook.title.as_deref().unwrap_or("(untitled)");
        println!("  [{i}] {title}: {} entries", subbook.len());
        if let Some(copyright) = subbook.copyright.as_deref() {
            let copyright = copyright.trim();
            match copyright.char_indices().nth(60) {
                Some((cut, _)) => println!("      {}...", &copyright[..cut]),
                None => println!("      {copyright}"),
            }
        }
    }
    println!("Total entries: {}", book.entry_count());
}
