mod commands;
mod dispatch;
mod helpers;
mod logging;

use clap::Parser;
use dispatch::command_alias_from_program_name;
use fmoe_core::domain::FmoeError;
use std::path::PathBuf;

const PROGRAM_NAME: &str = "fmoe";

pub fn run_from_env() -> i32 {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| PROGRAM_NAME.to_string());
    let remaining: Vec<String> = args.collect();

    match run_with_program_name(&program_name, remaining) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_fmoe_error();
            eprintln!("{}", error.message().trim_end());
            error.exit_code()
        }
    }
}

fn run_with_program_name(program_name: &str, args: Vec<String>) -> Result<i32, CliError> {
    let alias = command_alias_from_program_name(program_name);
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(alias.map(str::to_string))
        .chain(args)
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "fmoe",
    version,
    about = "Convert ABINIT-MP FMO reports into SVL binary data"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Convert a CPF checkpoint report into SVL binary data
    Cpf2svl(commands::Cpf2svlArgs),
    /// Convert an auto-fragmentation log into SVL binary data
    Autofrag2svl(commands::Autofrag2svlArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Cpf2svl(args) => commands::run_cpf2svl_command(args),
        CliCommand::Autofrag2svl(args) => commands::run_autofrag2svl_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Fmoe(FmoeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_fmoe_error(&self) -> FmoeError {
        match self {
            Self::Usage(message) => FmoeError::option_parse("OPTION.CLI_USAGE", message.clone()),
            Self::Fmoe(error) => error.clone(),
            Self::Internal(error) => FmoeError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<FmoeError> for CliError {
    fn from(error: FmoeError) -> Self {
        Self::Fmoe(error)
    }
}
