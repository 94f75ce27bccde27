use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tagquery::cli::{self, CheckOptions, CheckResult, CliError};

#[derive(ClapParser)]
#[command(name = "tagq")]
#[command(about = "tagq - Filter tagged photo collections with tag query expressions")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and run a tag query against a catalog
    Check {
        /// The tag query to run
        query: String,

        /// Catalog JSON file (reads from stdin if not provided)
        #[arg(short, long, env = "TAGQ_CATALOG")]
        catalog: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't resolve or run
        #[arg(long)]
        syntax_only: bool,
    },

    /// List fixed fields and their types
    Fields,

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'tagq docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Check {
            query,
            catalog,
            pretty,
            syntax_only,
        } => run_check(query, catalog, pretty, syntax_only),
        Commands::Fields => {
            print!("{}", cli::list_fields());
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: String,
    catalog: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let catalog = match catalog {
        Some(path) => Some(fs::read_to_string(path)?),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        catalog,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("Syntax is valid: {}", canonical),
        CheckResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
