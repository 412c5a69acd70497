use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod progress;
mod status;

use config::RuntimeArgs;

/// ErrorFree runtime.
///
/// Runs ErrorFree programs: arbitrary byte files where every byte is a valid
/// instruction and no instruction can fail.
///
/// EXAMPLES:
///     efrt run hello.ef              Run a program
///     efrt run a.ef b.ef -z          Run two programs with input disabled
///     efrt random 4096 --seed 7      Run 4096 reproducible random bytes
///     efrt completions bash          Print a completion script
///
/// ENVIRONMENT VARIABLES:
///     EFRT_STACK_CAPACITY   Stack capacity in cells
///     EFRT_HEAP_CAPACITY    Heap capacity in addresses
///     EFRT_MAX_CYCLES       Stop runs after this many cycles
///     EFRT_SEED             Seed for `R` and random programs
///     EFRT_AUTO_ZERO        Set to '1' to make input opcodes push 0
///     EFRT_NO_PROGRESS      Set to '1' to hide the progress spinner
///     EFRT_JSON             Set to '1' for JSON run summaries
///     NO_COLOR              Set to disable colored output
#[derive(Parser)]
#[command(name = "efrt")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more program files
    ///
    /// Files run one after another, each with a fresh stack and heap. A file
    /// that cannot be read is reported and skipped.
    ///
    /// EXAMPLES:
    ///     efrt run hello.ef                     Run a program
    ///     efrt run loop.ef --max-cycles 100000  Cut long runs short
    ///     efrt run calc.ef --json               Summary as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Program files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        runtime: RuntimeArgs,
    },

    /// Generate and run a random program
    ///
    /// EXAMPLES:
    ///     efrt random 1024                     Run 1024 random bytes
    ///     efrt random 1024 --seed 3 --save out.ef
    #[command(visible_alias = "rnd")]
    Random {
        /// Number of bytes to generate
        length: usize,
        /// Also write the generated bytes to this file
        #[arg(long, short = 's')]
        save: Option<PathBuf>,
        #[command(flatten)]
        runtime: RuntimeArgs,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     efrt completions bash > ~/.local/share/bash-completion/completions/efrt
    ///     efrt completions zsh > ~/.zfunc/_efrt
    ///     efrt completions fish > ~/.config/fish/completions/efrt.fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { files, runtime } => {
            let session = runtime.resolve()?;
            commands::run::run(&files, &session)?;
        }
        Commands::Random {
            length,
            save,
            runtime,
        } => {
            let session = runtime.resolve()?;
            commands::random::run(length, save.as_deref(), &session)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
