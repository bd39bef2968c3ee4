//! ORMAP Command-Line Tool
//!
//! Loads a schema declaration, runs the mapping bootstrap, and prints the
//! resolved physical schema.

use clap::Parser;
use ormap_core::{MappingConfig, NamingPolicy, SchemaDeclaration};
use std::path::PathBuf;
use tracing::info;

/// ORMAP schema mapping check
#[derive(Parser, Debug)]
#[command(name = "ormap")]
#[command(version, about = "Resolve and validate an ORMAP schema declaration")]
pub struct Args {
    /// Path to the JSON schema declaration
    pub file: PathBuf,

    /// Join words with underscores (overrides the declaration)
    #[arg(long)]
    pub underscore: Option<bool>,

    /// Fold names to uppercase (overrides the declaration)
    #[arg(long)]
    pub uppercase: Option<bool>,

    /// Print the resolved schema on a single line
    #[arg(long)]
    pub compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ormap=info,ormap_core=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let declaration = SchemaDeclaration::from_path(&args.file)?;
    let config = apply_overrides(declaration.naming, args.underscore, args.uppercase);

    info!(
        file = %args.file.display(),
        entities = declaration.entities.len(),
        "loaded declaration"
    );

    let registry = declaration.build_with(config)?;
    let schema = registry.resolved();

    let output = if args.compact {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    println!("{}", output);

    Ok(())
}

/// Apply command-line policy flags to both table and column naming.
fn apply_overrides(
    config: MappingConfig,
    underscore: Option<bool>,
    uppercase: Option<bool>,
) -> MappingConfig {
    let apply = |policy: NamingPolicy| {
        NamingPolicy::new(
            underscore.unwrap_or(policy.use_underscore()),
            uppercase.unwrap_or(policy.is_uppercase()),
        )
    };

    config
        .with_table_naming(apply(config.table_naming))
        .with_column_naming(apply(config.column_naming))
}
