use clap::{Args, Parser as ClapParser, Subcommand};
use objective_json::{
    ParserConfig,
    cli::{self, CheckOptions, CheckResult, CliError, Input},
    scanner::{DEFAULT_CHUNK_SIZE, DEFAULT_SCRATCH_CAPACITY},
};
use std::{
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "ojson")]
#[command(about = "ojson - Validate and normalize JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// JSON file (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Initial size of the literal buffer in bytes
    #[arg(long, default_value_t = DEFAULT_SCRATCH_CAPACITY)]
    scratch_capacity: usize,

    /// Read window size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the input is valid JSON
    Check {
        #[command(flatten)]
        args: InputArgs,
    },

    /// Print the input as canonical compact JSON
    Emit {
        #[command(flatten)]
        args: InputArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { args } => run(args, false, false),
        Commands::Emit { args, pretty } => run(args, true, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: InputArgs, emit: bool, pretty: bool) -> Result<(), CliError> {
    let input = match args.input {
        Some(path) => Some(Input::File(path)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(Input::Text(buffer))
        }
        None => None,
    };

    let options = CheckOptions {
        input,
        config: ParserConfig {
            scratch_capacity: args.scratch_capacity,
            chunk_size: args.chunk_size,
        },
        emit,
        pretty,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid => println!("Valid JSON"),
        CheckResult::Emitted(text) => println!("{}", text),
    }
    Ok(())
}
