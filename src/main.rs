use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use avsc_forge::definitions::{error_message_schema, ERROR_MESSAGE_PATH};
use avsc_forge::output::{read_schema, resolve_output_path, write_schema};
use avsc_forge::{parse_record, SchemaSerializer, SerializerOptions};

#[derive(Parser)]
#[command(author, version, about = "Build and canonicalize Avro schemas", long_about = None)]
struct Cli {
    /// Render without indentation
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the ErrorMessage schema, write it and print it
    ErrorMessage {
        /// Output file (defaults to schemas/error-message.avsc)
        output: Option<PathBuf>,
    },
    /// Re-render an existing record schema in canonical form
    Canonicalize {
        /// Schema file to read
        input: PathBuf,
        /// Output file (prints to stdout when absent)
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only schema text.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let serializer =
        SchemaSerializer::with_options(SerializerOptions::new().with_pretty(!cli.compact));

    match cli.command {
        Commands::ErrorMessage { output } => {
            info!("building error message schema");
            let schema = error_message_schema().context("building ErrorMessage schema")?;
            let content = serializer.serialize(&schema);

            let path = resolve_output_path(output.as_deref(), ERROR_MESSAGE_PATH);
            write_schema(&path, &content)?;
            println!("{}", content);
        }
        Commands::Canonicalize { input, output } => {
            let text = read_schema(&input)?;
            let schema = parse_record(&text)
                .with_context(|| format!("parsing {}", input.display()))?;
            let content = serializer.serialize(&schema);

            match output {
                Some(path) => write_schema(&path, &content)?,
                None => println!("{}", content),
            }
        }
    }

    Ok(())
}
