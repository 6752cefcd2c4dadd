//! ABINIT-MP checkpoint (CPF) reports.

mod layout;
mod model;
mod parser;
mod version;

pub use layout::{
    AtomColumns, CountColumns, CpfLayout, DimerEnergyColumns, FragmentColumns, Section,
};
pub use model::{
    AtomRow, AtomTable, CheckpointBuilder, CheckpointRecord, DimerTable, FragmentTopology,
    dimer_count,
};
pub use parser::{parse_checkpoint, run_section};
pub use version::{CpfVersion, VERSION_HEADERS};

use crate::common::{ColumnError, LineError};
use crate::modules::serialization::{SvlEncoder, SvlResult};
use crate::modules::traits::SvlEncode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CpfError {
    #[error("unknown CPF version: {header}")]
    UnknownVersion { header: String },
    #[error("line {line}: {source}")]
    Column {
        line: usize,
        #[source]
        source: ColumnError,
    },
    #[error("line {line}: missing {index}-th field in '{content}'")]
    MissingFields {
        line: usize,
        index: usize,
        content: String,
    },
    #[error("line {line}: invalid float '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: {field} must not be negative, got {value}")]
    InvalidCount {
        line: usize,
        field: &'static str,
        value: i64,
    },
    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<CpfError>,
    },
}

impl CpfError {
    pub fn in_stage(self, stage: &'static str) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error beneath any stage wrappers.
    pub fn root(&self) -> &CpfError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Outermost stage name, if the error was raised inside a section.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<LineError> for CpfError {
    fn from(error: LineError) -> Self {
        match error {
            LineError::UnexpectedEof { line } => Self::UnexpectedEof { line },
            LineError::Io { line, source } => Self::Io { line, source },
        }
    }
}

impl SvlEncode for CheckpointRecord {
    fn encode_svl(&self, encoder: &mut SvlEncoder) -> SvlResult<()> {
        encoder.write_int_scalar("atom count", self.num_atoms)?;
        encoder.write_int_scalar("fragment count", self.num_frags)?;

        let atoms = &self.atoms;
        encoder.write_int(&atoms.indices)?;
        encoder.write_token(&atoms.elements)?;
        encoder.write_token(&atoms.types)?;
        encoder.write_token(&atoms.residue_names)?;
        encoder.write_int(&atoms.residue_indices)?;
        encoder.write_int(&atoms.fragment_indices)?;
        encoder.write_float(&atoms.x)?;
        encoder.write_float(&atoms.y)?;
        encoder.write_float(&atoms.z)?;
        encoder.write_float(&atoms.hf_mulliken)?;
        encoder.write_float(&atoms.mp2_mulliken)?;
        encoder.write_float(&atoms.hf_nbo)?;
        encoder.write_float(&atoms.mp2_nbo)?;
        encoder.write_float(&atoms.hf_resp)?;
        encoder.write_float(&atoms.mp2_resp)?;
        encoder.write_token(&atoms.chain_ids)?;
        encoder.write_token(&atoms.insertion_codes)?;

        encoder.write_int(&self.fragments.bond_numbers)?;
        encoder.write_int(&self.fragments.bond_selfs)?;
        encoder.write_int(&self.fragments.bond_others)?;

        let dimers = &self.dimers;
        encoder.write_float(&dimers.distances)?;
        encoder.write_float(&dimers.electrostatic)?;
        encoder.write_float(&dimers.dispersion)?;
        encoder.write_float(&dimers.exchange_repulsion)?;
        encoder.write_float(&dimers.charge_transfer)
    }
}
