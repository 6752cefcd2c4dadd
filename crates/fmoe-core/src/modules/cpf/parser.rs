use super::CpfError;
use super::layout::{AtomColumns, CpfLayout, DimerEnergyColumns, Section};
use super::model::{AtomRow, AtomTable, CheckpointBuilder, CheckpointRecord};
use super::version::CpfVersion;
use crate::common::columns::{
    ColumnResult, float_field, int_field, optional_slice, packed_int_fields, slice_trim,
};
use crate::common::{ColumnError, LineCursor};
use std::io::BufRead;
use tracing::{debug, trace};

const BLANK_FIELD: &str = " ";
const DISTANCE_TOKEN: usize = 2;
/// Upper bound on rows reserved before any row has been read.
const PREALLOCATED_ROWS: usize = 4096;

fn row_capacity(rows: usize) -> usize {
    rows.min(PREALLOCATED_ROWS)
}

/// Parses a whole checkpoint report in one pass. The first line selects the
/// layout; every later section is read with that layout's column table.
pub fn parse_checkpoint<R: BufRead>(reader: R) -> Result<CheckpointRecord, CpfError> {
    let mut cursor = LineCursor::new(reader);
    let version = read_version(&mut cursor).map_err(|error| error.in_stage("parse version"))?;
    let layout = CpfLayout::for_version(version);
    debug!(%version, "detected CPF layout");

    let mut builder = CheckpointBuilder::new(version);
    for &section in layout.sections {
        builder = run_section(section, layout, &mut cursor, builder)
            .map_err(|error| error.in_stage(section.stage()))?;
    }

    let record = builder.finish();
    debug!(
        num_atoms = record.num_atoms,
        num_frags = record.num_frags,
        num_dimers = record.num_dimers(),
        lines = cursor.line_number(),
        "checkpoint parsed"
    );
    Ok(record)
}

fn read_version<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<CpfVersion, CpfError> {
    let header = cursor.next_line()?;
    CpfVersion::detect(header).ok_or_else(|| CpfError::UnknownVersion {
        header: header.to_string(),
    })
}

/// Reads one section and returns the builder extended with its output.
pub fn run_section<R: BufRead>(
    section: Section,
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    debug!(stage = section.stage(), line = cursor.line_number() + 1, "reading section");
    match section {
        Section::Counts => read_counts(layout, cursor, builder),
        Section::Skip(lines) => {
            trace!(lines, "skipping fixed block");
            cursor.skip(lines)?;
            Ok(builder)
        }
        Section::Atoms => read_atoms(layout, cursor, builder),
        Section::FragmentElectrons => {
            let lines = layout.wrapped_lines(builder.num_frags());
            trace!(lines, "skipping fragment electron counts");
            cursor.skip(lines)?;
            Ok(builder)
        }
        Section::FragmentBondCounts => read_bond_counts(layout, cursor, builder),
        Section::FragmentBonds => read_bonds(layout, cursor, builder),
        Section::DimerDistances => read_distances(cursor, builder),
        Section::MonomerSummaries => {
            let lines = layout.monomer_skip_lines(builder.num_frags());
            trace!(lines, "skipping dipole moments and monomer summaries");
            cursor.skip(lines)?;
            Ok(builder)
        }
        Section::DimerEnergies => read_energies(layout, cursor, builder),
    }
}

fn column_error(line: usize) -> impl FnOnce(ColumnError) -> CpfError {
    move |source| CpfError::Column { line, source }
}

fn non_negative(line: usize, field: &'static str, value: i64) -> Result<usize, CpfError> {
    usize::try_from(value).map_err(|_| CpfError::InvalidCount { line, field, value })
}

fn read_counts<R: BufRead>(
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let line_number = cursor.line_number() + 1;
    let line = cursor.next_line()?;
    let atoms = int_field(line, layout.counts.atoms).map_err(column_error(line_number))?;
    let frags = int_field(line, layout.counts.fragments).map_err(column_error(line_number))?;

    let num_atoms = non_negative(line_number, "number of atoms", i64::from(atoms))?;
    let num_frags = non_negative(line_number, "number of fragments", i64::from(frags))?;
    debug!(num_atoms, num_frags, "read counts");
    Ok(builder.with_counts(num_atoms, num_frags))
}

fn read_atoms<R: BufRead>(
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let mut atoms = AtomTable::with_capacity(row_capacity(builder.num_atoms()));
    for _ in 0..builder.num_atoms() {
        let line_number = cursor.line_number() + 1;
        let line = cursor.next_line()?;
        let atom = parse_atom_line(line, &layout.atoms).map_err(column_error(line_number))?;
        atoms.push(atom);
    }
    Ok(builder.with_atoms(atoms))
}

pub(crate) fn parse_atom_line(line: &str, columns: &AtomColumns) -> ColumnResult<AtomRow> {
    let index = int_field(line, columns.index)?;
    let element = slice_trim(line, columns.element)?.to_string();
    let atom_type = slice_trim(line, columns.atom_type)?.to_string();
    let residue_name = slice_trim(line, columns.residue_name)?.to_string();
    let residue_index = int_field(line, columns.residue_index)?;
    let fragment_index = int_field(line, columns.fragment_index)?;
    let position = [
        float_field(line, columns.x)?,
        float_field(line, columns.y)?,
        float_field(line, columns.z)?,
    ];

    let mut populations = [0.0; 6];
    if let Some(ranges) = &columns.populations {
        for (value, range) in populations.iter_mut().zip(ranges) {
            *value = float_field(line, *range)?;
        }
    }

    Ok(AtomRow {
        index,
        element,
        atom_type,
        residue_name,
        residue_index,
        fragment_index,
        position,
        populations,
        chain_id: optional_slice(line, columns.chain_id, BLANK_FIELD)?,
        insertion_code: optional_slice(line, columns.insertion_code, BLANK_FIELD)?,
    })
}

fn read_bond_counts<R: BufRead>(
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let mut bond_numbers = Vec::with_capacity(row_capacity(builder.num_frags()));
    for row in layout.wrapped_row_sizes(builder.num_frags()) {
        let line_number = cursor.line_number() + 1;
        let line = cursor.next_line()?;
        let values = packed_int_fields(line, layout.fragments.count_width, row)
            .map_err(column_error(line_number))?;
        bond_numbers.extend(values);
    }
    Ok(builder.with_bond_numbers(bond_numbers))
}

fn read_bonds<R: BufRead>(
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let total = builder.fragments().announced_bonds();
    let bonds = non_negative(cursor.line_number(), "fragment bond total", total)?;
    debug!(bonds, "reading fragment bonds");

    let mut selfs = Vec::with_capacity(row_capacity(bonds));
    let mut others = Vec::with_capacity(row_capacity(bonds));
    for _ in 0..bonds {
        let line_number = cursor.line_number() + 1;
        let line = cursor.next_line()?;
        let other =
            int_field(line, layout.fragments.bond_other).map_err(column_error(line_number))?;
        let this =
            int_field(line, layout.fragments.bond_self).map_err(column_error(line_number))?;
        others.push(other);
        selfs.push(this);
    }
    Ok(builder.with_bonds(selfs, others))
}

fn read_distances<R: BufRead>(
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let dimers = builder.num_dimers();
    debug!(dimers, "reading dimer distances");

    let mut distances = Vec::with_capacity(row_capacity(dimers));
    for _ in 0..dimers {
        let line_number = cursor.line_number() + 1;
        let line = cursor.next_line()?;
        distances.push(parse_distance(line, line_number)?);
    }
    Ok(builder.with_distances(distances))
}

pub(crate) fn parse_distance(line: &str, line_number: usize) -> Result<f64, CpfError> {
    let token = line
        .split_whitespace()
        .nth(DISTANCE_TOKEN)
        .ok_or_else(|| CpfError::MissingFields {
            line: line_number,
            index: DISTANCE_TOKEN,
            content: line.to_string(),
        })?;
    token.parse::<f64>().map_err(|_| CpfError::InvalidNumber {
        line: line_number,
        value: token.to_string(),
    })
}

fn read_energies<R: BufRead>(
    layout: &CpfLayout,
    cursor: &mut LineCursor<R>,
    builder: CheckpointBuilder,
) -> Result<CheckpointBuilder, CpfError> {
    let dimers = builder.num_dimers();
    let columns = &layout.dimers;
    let mut electrostatic = Vec::with_capacity(row_capacity(dimers));
    let mut dispersion = Vec::with_capacity(row_capacity(dimers));
    let mut exchange_repulsion = Vec::with_capacity(row_capacity(dimers));
    let mut charge_transfer = Vec::with_capacity(row_capacity(dimers));

    for _ in 0..dimers {
        let line_number = cursor.line_number() + 1;
        let line = cursor.next_line()?;
        let [es, di, ex, ct] =
            parse_energy_line(line, columns).map_err(column_error(line_number))?;
        electrostatic.push(es);
        dispersion.push(di);
        exchange_repulsion.push(ex);
        charge_transfer.push(ct);
    }

    Ok(builder.with_energies(electrostatic, dispersion, exchange_repulsion, charge_transfer))
}

fn parse_energy_line(line: &str, columns: &DimerEnergyColumns) -> ColumnResult<[f64; 4]> {
    Ok([
        float_field(line, columns.electrostatic)?,
        float_field(line, columns.dispersion)?,
        float_field(line, columns.exchange_repulsion)?,
        float_field(line, columns.charge_transfer)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::{parse_atom_line, parse_checkpoint, parse_distance, run_section};
    use crate::common::{ColumnError, Columns, LineCursor};
    use crate::modules::cpf::{CheckpointBuilder, CpfError, CpfLayout, CpfVersion, Section};
    use std::io::Cursor;

    /// Writes `text` right-aligned into `[start, end)`, padding the line as needed.
    fn put(line: &mut String, start: usize, end: usize, text: &str) {
        if line.len() < end {
            line.push_str(&" ".repeat(end - line.len()));
        }
        let field = format!("{text:>width$}", width = end - start);
        line.replace_range(start..end, &field);
    }

    fn legacy_atom_line(chain: Option<&str>) -> String {
        let mut line = String::new();
        put(&mut line, 0, 5, "1");
        put(&mut line, 6, 8, "C");
        put(&mut line, 9, 13, "CA");
        put(&mut line, 14, 17, "ALA");
        put(&mut line, 18, 22, "1");
        put(&mut line, 23, 27, "1");
        put(&mut line, 28, 40, "1.500");
        put(&mut line, 40, 52, "-2.250");
        put(&mut line, 52, 64, "3.000");
        for (slot, value) in ["0.1", "0.2", "0.3", "0.4", "0.5", "0.6"].iter().enumerate() {
            put(&mut line, 64 + slot * 12, 76 + slot * 12, value);
        }
        if let Some(chain) = chain {
            put(&mut line, 137, 138, chain);
        }
        line
    }

    #[test]
    fn legacy_atom_line_fills_every_column() {
        let layout = CpfLayout::for_version(CpfVersion::Ver7_2);
        let atom = parse_atom_line(&legacy_atom_line(Some("A")), &layout.atoms)
            .expect("atom line should parse");

        assert_eq!(atom.index, 1);
        assert_eq!(atom.element, "C");
        assert_eq!(atom.atom_type, "CA");
        assert_eq!(atom.residue_name, "ALA");
        assert_eq!(atom.position, [1.5, -2.25, 3.0]);
        assert_eq!(atom.populations, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert_eq!(atom.chain_id, "A");
        assert_eq!(atom.insertion_code, " ");
    }

    #[test]
    fn short_atom_line_defaults_chain_and_insertion_code() {
        let layout = CpfLayout::for_version(CpfVersion::Ver7_2);
        let line = legacy_atom_line(None);
        assert_eq!(line.len(), 136);

        let atom = parse_atom_line(&line, &layout.atoms).expect("short line should parse");
        assert_eq!(atom.chain_id, " ");
        assert_eq!(atom.insertion_code, " ");
    }

    #[test]
    fn missing_coordinate_column_is_fatal() {
        let layout = CpfLayout::for_version(CpfVersion::Ver7_2);
        let full = legacy_atom_line(None);
        let error = parse_atom_line(&full[..50], &layout.atoms).expect_err("y column is cut off");
        assert_eq!(
            error,
            ColumnError::OutOfRange {
                columns: Columns::new(40, 52),
                len: 50
            }
        );
    }

    #[test]
    fn wide_atom_line_leaves_populations_zeroed() {
        let layout = CpfLayout::for_version(CpfVersion::Open1_0Rev23);
        let mut line = String::new();
        put(&mut line, 0, 10, "12");
        put(&mut line, 10, 12, "N");
        put(&mut line, 15, 18, "N");
        put(&mut line, 19, 22, "GLY");
        put(&mut line, 22, 33, "4");
        put(&mut line, 33, 44, "2");
        put(&mut line, 44, 65, "10.0");
        put(&mut line, 65, 85, "11.0");
        put(&mut line, 85, 105, "12.0");
        put(&mut line, 108, 109, "B");
        put(&mut line, 109, 111, "A");

        let atom = parse_atom_line(&line, &layout.atoms).expect("wide line should parse");
        assert_eq!(atom.index, 12);
        assert_eq!(atom.residue_name, "GLY");
        assert_eq!(atom.fragment_index, 2);
        assert_eq!(atom.position, [10.0, 11.0, 12.0]);
        assert_eq!(atom.populations, [0.0; 6]);
        assert_eq!(atom.chain_id, "B");
        assert_eq!(atom.insertion_code, " A");
    }

    #[test]
    fn distance_is_the_third_whitespace_token() {
        assert_eq!(parse_distance("   1   2   3.75  extra", 4).unwrap(), 3.75);
        let error = parse_distance("   1   2", 4).expect_err("only two tokens");
        assert!(matches!(
            error,
            CpfError::MissingFields { line: 4, index: 2, .. }
        ));
        assert!(matches!(
            parse_distance("1 2 far", 5),
            Err(CpfError::InvalidNumber { line: 5, .. })
        ));
    }

    #[test]
    fn bond_count_rows_wrap_with_a_short_remainder() {
        let layout = CpfLayout::for_version(CpfVersion::Ver7_2);
        let full_row: String = (0..16).map(|_| "    1").collect();
        let input = format!("{full_row}\n    2\n");
        let mut cursor = LineCursor::new(Cursor::new(input));
        let builder = CheckpointBuilder::new(CpfVersion::Ver7_2).with_counts(0, 17);

        let builder = run_section(Section::FragmentBondCounts, layout, &mut cursor, builder)
            .expect("bond counts should parse");
        assert_eq!(builder.fragments().bond_numbers.len(), 17);
        assert_eq!(builder.fragments().bond_numbers[16], 2);
        assert_eq!(builder.fragments().announced_bonds(), 18);
        assert_eq!(cursor.line_number(), 2);
    }

    #[test]
    fn bond_rows_store_the_partner_fragment_first() {
        let layout = CpfLayout::for_version(CpfVersion::Open1_0Rev23);
        let input = format!("{:>10}{:>10}\n", 7, 3);
        let mut cursor = LineCursor::new(Cursor::new(input));
        let builder = CheckpointBuilder::new(CpfVersion::Open1_0Rev23)
            .with_counts(0, 1)
            .with_bond_numbers(vec![1]);

        let builder = run_section(Section::FragmentBonds, layout, &mut cursor, builder)
            .expect("bond row should parse");
        assert_eq!(builder.fragments().bond_others, vec![7]);
        assert_eq!(builder.fragments().bond_selfs, vec![3]);
    }

    #[test]
    fn negative_counts_cannot_size_arrays() {
        let layout = CpfLayout::for_version(CpfVersion::Ver7_2);
        let mut cursor = LineCursor::new(Cursor::new("   -1    2\n"));
        let error = run_section(
            Section::Counts,
            layout,
            &mut cursor,
            CheckpointBuilder::new(CpfVersion::Ver7_2),
        )
        .expect_err("negative atom count");
        assert!(matches!(
            error,
            CpfError::InvalidCount { line: 1, field: "number of atoms", value: -1 }
        ));
    }

    #[test]
    fn skipped_blocks_must_be_present() {
        let layout = CpfLayout::for_version(CpfVersion::Open1_0Rev23);
        let mut cursor = LineCursor::new(Cursor::new("a\nb\n"));
        let error = run_section(
            Section::Skip(4),
            layout,
            &mut cursor,
            CheckpointBuilder::new(CpfVersion::Open1_0Rev23),
        )
        .expect_err("only two lines to skip");
        assert!(matches!(error, CpfError::UnexpectedEof { line: 2 }));
    }

    #[test]
    fn unknown_header_fails_in_the_version_stage() {
        let error = parse_checkpoint(Cursor::new("CPF Ver.9.9\n")).expect_err("unknown header");
        assert_eq!(error.stage(), Some("parse version"));
        assert_eq!(error.to_string(), "parse version: unknown CPF version: CPF Ver.9.9");
    }

    #[test]
    fn empty_input_fails_before_detection() {
        let error = parse_checkpoint(Cursor::new("")).expect_err("no header line");
        assert!(matches!(error.root(), CpfError::UnexpectedEof { line: 0 }));
    }
}
