use super::{AutofragError, AutofragRecord};
use crate::common::columns::{int_field, slice_trim};
use crate::common::{Columns, LineCursor};
use std::io::BufRead;
use tracing::debug;

/// Header of the bond table; rows start on the following line.
pub const TABLE_MARKER: &str = "Frag.   Bonded Atom  Proj.";

const ROW_KEY: Columns = Columns::new(0, 13);
const BDA: Columns = Columns::new(14, 21);
const BAA: Columns = Columns::new(22, 27);

pub fn parse_autofrag<R: BufRead>(reader: R) -> Result<AutofragRecord, AutofragError> {
    let mut cursor = LineCursor::new(reader);
    loop {
        let line = cursor.next_line()?;
        if line.contains(TABLE_MARKER) {
            break;
        }
    }
    debug!(line = cursor.line_number(), "found fragment bond table");

    let mut record = AutofragRecord::default();
    loop {
        let line_number = cursor.line_number() + 1;
        let Some(line) = cursor.try_next_line()? else {
            break;
        };
        if !is_table_row(line) {
            break;
        }

        let bda = int_field(line, BDA).map_err(|source| AutofragError::Column {
            line: line_number,
            source,
        })?;
        let baa = int_field(line, BAA).map_err(|source| AutofragError::Column {
            line: line_number,
            source,
        })?;
        record.bda.push(bda);
        record.baa.push(baa);
    }

    debug!(bonds = record.len(), "parsed fragment bond table");
    Ok(record)
}

fn is_table_row(line: &str) -> bool {
    slice_trim(line, ROW_KEY).is_ok_and(|key| key.parse::<i32>().is_ok())
}
