use super::CliError;
use super::helpers::{emit_output, open_input};
use anyhow::Context;
use fmoe_core::domain::{Conversion, FmoeError};
use fmoe_core::modules::SvlEncode;
use fmoe_core::modules::autofrag::parse_autofrag;
use fmoe_core::modules::cpf::parse_checkpoint;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(clap::Args)]
pub(super) struct Cpf2svlArgs {
    /// Input CPF report (`.gz` is decompressed); standard input when omitted
    #[arg(short, long, env = Conversion::Cpf2Svl.input_env())]
    input: Option<PathBuf>,

    /// Output SVL binary file
    #[arg(short, long, env = Conversion::Cpf2Svl.output_env())]
    output: Option<PathBuf>,

    /// Dump the parsed record as JSON instead of SVL
    #[arg(short, long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct Autofrag2svlArgs {
    /// ABINIT-MP auto-fragmentation log
    #[arg(short, long, env = Conversion::Autofrag2Svl.input_env())]
    input: Option<PathBuf>,

    /// Output SVL binary file; standard output when omitted
    #[arg(short, long, env = Conversion::Autofrag2Svl.output_env())]
    output: Option<PathBuf>,
}

pub(super) fn run_cpf2svl_command(args: Cpf2svlArgs) -> Result<i32, CliError> {
    let conversion = Conversion::Cpf2Svl;
    if !args.json && args.output.is_none() {
        return Err(CliError::Usage(
            "the required flag `-o, --output' was not specified".to_string(),
        ));
    }

    debug!(
        %conversion,
        input = ?args.input,
        output = ?args.output,
        json = args.json,
        "starting conversion"
    );
    let reader = open_input(args.input.as_deref())?;
    let record = parse_checkpoint(reader).map_err(FmoeError::from)?;
    info!(
        version = %record.version,
        atoms = record.num_atoms,
        fragments = record.num_frags,
        dimers = record.num_dimers(),
        "parsed checkpoint"
    );

    let bytes = if args.json {
        let mut json = serde_json::to_vec(&record).context("serialize checkpoint as JSON")?;
        json.push(b'\n');
        json
    } else {
        record.to_svl_bytes().map_err(FmoeError::from)?
    };

    emit_output(args.output.as_deref(), &bytes)?;
    debug!(%conversion, bytes = bytes.len(), "wrote output");
    Ok(0)
}

pub(super) fn run_autofrag2svl_command(args: Autofrag2svlArgs) -> Result<i32, CliError> {
    let conversion = Conversion::Autofrag2Svl;
    let Some(input) = args.input.as_deref() else {
        return Err(FmoeError::io_system("IO.INPUT_MISSING", "input isn't set").into());
    };

    debug!(%conversion, input = %input.display(), output = ?args.output, "starting conversion");
    let reader = open_input(Some(input))?;
    let record = parse_autofrag(reader).map_err(FmoeError::from)?;
    info!(bonds = record.len(), "parsed auto-fragmentation table");

    let bytes = record.to_svl_bytes().map_err(FmoeError::from)?;
    emit_output(args.output.as_deref(), &bytes)?;
    debug!(%conversion, bytes = bytes.len(), "wrote output");
    Ok(0)
}
