//! errgen CLI - generate error-code constants and enums from a table
//!
//! # Main Commands
//!
//! ```bash
//! errgen generate errors.txt -o src/generated          # Rust (default)
//! errgen generate errors.txt -o gen --language kotlin  # another target
//! errgen preview errors.txt --language go              # print, write nothing
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! errgen parse errors.txt      # Print the built model as JSON
//! errgen languages             # List target languages
//! errgen example-config        # Print an example config file
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use errgen::config::GeneratorConfig;
use errgen::error::ConfigError;
use errgen::logs::{init_logging, LogConfig, LogFormat};
use errgen::output::LocalFs;
use errgen::pipeline::{generate, load_model, preview};
use errgen::render::Language;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "errgen", version)]
#[command(about = "Generate error-code constants and enums from a delimited table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate constant tables and the enum into a directory
    Generate {
        /// Input table
        input: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: GeneratorArgs,
    },

    /// Render all outputs to stdout without writing files
    Preview {
        /// Input table
        input: PathBuf,

        #[command(flatten)]
        options: GeneratorArgs,
    },

    /// Parse a table and print the model as JSON
    Parse {
        /// Input table
        input: PathBuf,

        #[command(flatten)]
        options: GeneratorArgs,
    },

    /// List supported target languages
    Languages,

    /// Show example configuration file
    ExampleConfig,
}

/// Config file plus per-field overrides.
#[derive(Args)]
struct GeneratorArgs {
    /// JSON config file (flags below override its values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target language (rust, kotlin, java, javascript, python, go)
    #[arg(short, long)]
    language: Option<Language>,

    /// Name of the generated enum
    #[arg(short, long)]
    enum_name: Option<String>,

    /// Field separator of the input table
    #[arg(short, long)]
    separator: Option<char>,

    /// Package clause for Go output
    #[arg(long)]
    go_package: Option<String>,
}

impl GeneratorArgs {
    fn resolve(self) -> Result<GeneratorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(enum_name) = self.enum_name {
            config.enum_name = enum_name;
        }
        if let Some(separator) = self.separator {
            config.separator = separator;
        }
        if let Some(go_package) = self.go_package {
            config.go_package = go_package;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    // Load .env file (if present) so RUST_LOG can be set per project
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format)
        .with_ansi(std::io::stderr().is_terminal());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            options,
        } => cmd_generate(&input, &output, options),

        Commands::Preview { input, options } => cmd_preview(&input, options),

        Commands::Parse { input, options } => cmd_parse(&input, options),

        Commands::Languages => cmd_languages(),

        Commands::ExampleConfig => cmd_example_config(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    input: &Path,
    output: &Path,
    options: GeneratorArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.resolve()?;
    eprintln!("📄 Generating {} from: {}", config.language, input.display());

    let report = generate(&LocalFs, input, output, &config)?;

    if report.encoding != "utf-8" {
        eprintln!("   Encoding: {}", report.encoding);
    }
    // written files and failures are logged per path by the pipeline
    eprintln!("{}", report.summary());

    if !report.is_success() {
        return Err(format!(
            "{} of {} outputs could not be written",
            report.failures.len(),
            report.total()
        )
        .into());
    }
    Ok(())
}

fn cmd_preview(input: &Path, options: GeneratorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.resolve()?;
    let outputs = preview(&LocalFs, input, &config)?;

    for (i, output) in outputs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("==> {} <==", output.file_name);
        print!("{}", output.content);
    }
    Ok(())
}

fn cmd_parse(input: &Path, options: GeneratorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.resolve()?;
    eprintln!("📄 Parsing table: {}", input.display());

    let loaded = load_model(&LocalFs, input, &config)?;
    eprintln!("   Encoding: {}", loaded.encoding);
    eprintln!("   Attributes: {}", loaded.model.schema().names().join(", "));
    eprintln!("✅ Parsed {} error codes", loaded.model.len());

    let json = serde_json::to_string_pretty(&loaded.model.to_json_value())?;
    println!("{}", json);
    Ok(())
}

fn cmd_languages() -> Result<(), Box<dyn std::error::Error>> {
    for language in Language::ALL {
        println!("{:<12} .{}", language.name(), language.extension());
    }
    Ok(())
}

fn cmd_example_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", GeneratorConfig::example().to_json()?);
    Ok(())
}
