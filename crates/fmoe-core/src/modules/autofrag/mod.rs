//! Auto-fragmentation logs: the table of bond-detached / bond-attached atom
//! pairs printed by ABINIT-MP when it splits a molecule into fragments.

mod parser;

pub use parser::{TABLE_MARKER, parse_autofrag};

use crate::common::{ColumnError, LineError};
use crate::modules::serialization::{SvlEncoder, SvlResult};
use crate::modules::traits::SvlEncode;
use serde::Serialize;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutofragRecord {
    /// Bond-detached atoms.
    #[serde(rename = "BDA")]
    pub bda: Vec<i32>,
    /// Bond-attached atoms.
    #[serde(rename = "BAA")]
    pub baa: Vec<i32>,
}

impl AutofragRecord {
    pub fn len(&self) -> usize {
        self.bda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bda.is_empty()
    }
}

impl SvlEncode for AutofragRecord {
    fn encode_svl(&self, encoder: &mut SvlEncoder) -> SvlResult<()> {
        encoder.write_int(&self.bda)?;
        encoder.write_int(&self.baa)
    }
}

#[derive(Debug, Error)]
pub enum AutofragError {
    #[error("fragment bond table not found before line {line}")]
    MissingTable { line: usize },
    #[error("line {line}: {source}")]
    Column {
        line: usize,
        #[source]
        source: ColumnError,
    },
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl From<LineError> for AutofragError {
    fn from(error: LineError) -> Self {
        match error {
            LineError::UnexpectedEof { line } => Self::MissingTable { line },
            LineError::Io { line, source } => Self::Io { line, source },
        }
    }
}
