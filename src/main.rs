//! Command-line interface for jsons2xsd

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use jsons2xsd::loaders::Loader;
#[cfg(feature = "cli")]
use jsons2xsd::{Converter, ConverterConfig, Limits, WrappingMode};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "jsons2xsd")]
#[command(
    author,
    version,
    about = "Convert a JSON Schema into an XML Schema (XSD)",
    long_about = None
)]
struct Cli {
    /// Path to the JSON Schema file ("-" reads stdin)
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Target namespace URI of the generated schema
    #[arg(short, long)]
    namespace: String,

    /// Name of the generated root type
    #[arg(short = 'r', long = "name")]
    root_name: String,

    /// Wrapping mode: element or type
    #[arg(short, long, default_value = "type")]
    wrapping: WrappingMode,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indentation of the generated XML
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Definition name emitted as the HAL link type (repeatable)
    #[arg(long = "link-type", value_name = "NAME")]
    link_types: Vec<String>,

    /// Write review notices as JSON to this file
    #[arg(long, value_name = "FILE")]
    notices: Option<PathBuf>,

    /// Use strict input limits
    #[arg(long)]
    strict: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let limits = if cli.strict {
        Limits::strict()
    } else {
        Limits::default()
    };

    let loader = Loader::new().with_limits(limits.clone());
    let schema_text = if cli.schema.as_os_str() == "-" {
        loader.load_reader(io::stdin().lock())?
    } else {
        loader.load_path(&cli.schema)?
    };

    let mut config = ConverterConfig::new(cli.namespace, cli.root_name)
        .with_wrapping(cli.wrapping)
        .with_limits(limits)
        .with_indent(cli.indent);
    if !cli.link_types.is_empty() {
        config = config.with_link_types(cli.link_types);
    }

    let converter = Converter::new(config);
    let conversion = converter.convert(&schema_text)?;

    if let Some(path) = cli.notices {
        fs::write(path, serde_json::to_string_pretty(&conversion.notices)?)?;
    }

    if let Some(path) = cli.output {
        let file = fs::File::create(&path)?;
        converter.write(&conversion, io::BufWriter::new(file))?;
    } else {
        let stdout = io::stdout();
        converter.write(&conversion, stdout.lock())?;
        println!();
    }

    if conversion.needs_review() {
        eprintln!(
            "{} construct(s) were approximated; review the generated schema",
            conversion.notices.len()
        );
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
