use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::GeneratorConfig;
use crate::generator::{GenerationMode, Generator, OptionStyle};
use crate::logging::{init_logging, LogConfig};
use crate::parser::{collect_fields, parse_package_info, ExclusionMarker};
use crate::writer::Writer;

/// Command-line interface for foggo
///
/// Generates 'Functional Option Pattern' code for a struct of a Go package.
#[derive(Parser)]
#[command(name = "foggo")]
#[command(about = "Generate 'Functional Option Pattern' code for Go structs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available generators
#[derive(Subcommand)]
pub enum Commands {
    /// Generate 'Functional Option Pattern' code (closure options)
    ///
    /// ref.
    /// - https://commandcenter.blogspot.com/2014/01/self-referential-functions-and-design.html
    /// - https://dave.cheney.net/2014/10/17/functional-options-for-friendly-apis
    Fop(FopArgs),
    /// Generate 'Applicable Functional Option Pattern' code (one option type per field)
    Afop(FopArgs),
}

impl Commands {
    pub fn args(&self) -> &FopArgs {
        match self {
            Commands::Fop(args) | Commands::Afop(args) => args,
        }
    }

    pub fn style(&self) -> OptionStyle {
        match self {
            Commands::Fop(_) => OptionStyle::Closure,
            Commands::Afop(_) => OptionStyle::Interface,
        }
    }
}

/// Arguments shared by `fop` and `afop`
#[derive(Args, Debug, Clone)]
pub struct FopArgs {
    /// Target struct name
    #[arg(short, long = "struct")]
    pub struct_name: String,

    /// Directory of the package declaring the struct
    #[arg(short, long, default_value = ".")]
    pub package: PathBuf,

    /// Do not generate the `New<Struct>` constructor
    #[arg(long, default_value_t = false)]
    pub no_instance: bool,

    /// Skip the formatter and emit the raw template expansion
    #[arg(long, default_value_t = false)]
    pub no_format: bool,

    /// Exclude fields whose struct tag has `<KEY>:"-"`
    #[arg(
        long,
        value_name = "KEY",
        conflicts_with = "exclude_comment",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub exclude_tag: Option<String>,

    /// Exclude fields with a comment containing `<DIRECTIVE>`
    #[arg(long, value_name = "DIRECTIVE", value_parser = NonEmptyStringValueParser::new())]
    pub exclude_comment: Option<String>,

    /// Configuration file (default: foggo.toml in the package directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the generated code instead of writing it next to the struct
    #[arg(long, default_value_t = false)]
    pub stdout: bool,
}

impl FopArgs {
    pub(crate) fn exclusion_marker(&self) -> Option<ExclusionMarker> {
        match (&self.exclude_tag, &self.exclude_comment) {
            (Some(key), _) => Some(ExclusionMarker::tag(key.as_str())),
            (None, Some(directive)) => Some(ExclusionMarker::comment(directive.as_str())),
            (None, None) => None,
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if logging cannot be initialised or generation fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if cli.verbose {
        LogConfig::from_env().verbose()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config)?;
    run(&cli.command, &mut io::stdout().lock())?;
    Ok(())
}

/// Run one generation command, returning the path written (if any)
///
/// With `--stdout` the code goes to `out` instead of a file.
///
/// # Errors
///
/// Propagates configuration, package loading, collection, generation,
/// and write failures.
pub fn run(command: &Commands, out: &mut dyn Write) -> anyhow::Result<Option<PathBuf>> {
    let args = command.args();
    let config = GeneratorConfig::resolve(args.config.as_deref(), &args.package)?;
    let marker = match args.exclusion_marker() {
        Some(marker) => {
            marker.validate()?;
            marker
        }
        None => config.exclude.marker()?,
    };

    let pkg = parse_package_info(&args.package)?;
    let (fields, index) = collect_fields(&args.struct_name, &pkg.files, &marker)?;

    let generator = Generator::new(config.format && !args.no_format, config.formatter());
    let mode = GenerationMode {
        constructor: !args.no_instance,
        style: command.style(),
    };
    let code = generator.generate(&pkg.name, &args.struct_name, &fields, mode)?;

    if args.stdout {
        out.write_all(code.as_bytes())?;
        return Ok(None);
    }

    let source: &Path = pkg
        .paths
        .get(index)
        .with_context(|| format!("no path recorded for file #{index}"))?;
    let dest =
        Writer::new(config.output_suffix.as_str()).write(&code, source, &args.struct_name)?;
    info!(
        struct_name = %args.struct_name,
        package = %pkg.name,
        "generated options in {}",
        dest.display()
    );
    Ok(Some(dest))
}
