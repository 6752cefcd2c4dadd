//! Column layouts of the supported CPF revisions.
//!
//! Every revision runs the same section algorithm; the differences live in
//! these tables. Offsets are copied literally from the report formats,
//! including the single-column gaps between some dimer fields.

use super::version::CpfVersion;
use crate::common::Columns;

/// One step of the sequential read, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Counts,
    Skip(usize),
    Atoms,
    FragmentElectrons,
    FragmentBondCounts,
    FragmentBonds,
    DimerDistances,
    MonomerSummaries,
    DimerEnergies,
}

impl Section {
    pub const fn stage(self) -> &'static str {
        match self {
            Self::Counts => "parse number of atoms and number of fragments",
            Self::Skip(_) | Self::MonomerSummaries => "skip informations",
            Self::Atoms => "parse atoms",
            Self::FragmentElectrons => "skip fragment electrons",
            Self::FragmentBondCounts => "parse fragment bond numbers",
            Self::FragmentBonds => "parse fragment bonds",
            Self::DimerDistances => "parse dimer distances",
            Self::DimerEnergies => "parse dimers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountColumns {
    pub atoms: Columns,
    pub fragments: Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomColumns {
    pub index: Columns,
    pub element: Columns,
    pub atom_type: Columns,
    pub residue_name: Columns,
    pub residue_index: Columns,
    pub fragment_index: Columns,
    pub x: Columns,
    pub y: Columns,
    pub z: Columns,
    /// HF/MP2 Mulliken, HF/MP2 NBO, HF/MP2 RESP, when the revision has them.
    pub populations: Option<[Columns; 6]>,
    pub chain_id: Columns,
    pub insertion_code: Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentColumns {
    /// Values per wrapped line of the per-fragment tables.
    pub per_line: usize,
    /// Width of one packed bond-count field.
    pub count_width: usize,
    /// Bond rows store the partner fragment first.
    pub bond_other: Columns,
    pub bond_self: Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimerEnergyColumns {
    pub electrostatic: Columns,
    pub dispersion: Columns,
    pub exchange_repulsion: Columns,
    pub charge_transfer: Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpfLayout {
    pub counts: CountColumns,
    pub atoms: AtomColumns,
    pub fragments: FragmentColumns,
    /// Fixed lines after the `2 * numFrags` dipole/monomer block.
    pub monomer_trailer_lines: usize,
    pub dimers: DimerEnergyColumns,
    pub sections: &'static [Section],
}

impl CpfLayout {
    pub fn for_version(version: CpfVersion) -> &'static CpfLayout {
        match version {
            CpfVersion::Ver7_2 | CpfVersion::Ver4_201 => &VER_7_2,
            CpfVersion::Ver4_201Mizuho => &VER_4_201_MIZUHO,
            CpfVersion::Open1_0Rev10 => &OPEN_1_0_REV10,
            CpfVersion::Open1_0Rev23 => &OPEN_1_0_REV23,
        }
    }

    /// Lines occupied by a per-fragment table of `num_frags` values.
    pub const fn wrapped_lines(&self, num_frags: usize) -> usize {
        num_frags.div_ceil(self.fragments.per_line)
    }

    /// Values held by each line of a per-fragment table, the last one possibly short.
    pub fn wrapped_row_sizes(&self, num_frags: usize) -> impl Iterator<Item = usize> {
        let per_line = self.fragments.per_line;
        (0..self.wrapped_lines(num_frags))
            .map(move |row| (num_frags - row * per_line).min(per_line))
    }

    pub const fn monomer_skip_lines(&self, num_frags: usize) -> usize {
        2 * num_frags + self.monomer_trailer_lines
    }
}

const LEGACY_SECTIONS: [Section; 8] = [
    Section::Counts,
    Section::Atoms,
    Section::FragmentElectrons,
    Section::FragmentBondCounts,
    Section::FragmentBonds,
    Section::DimerDistances,
    Section::MonomerSummaries,
    Section::DimerEnergies,
];

const WIDE_SECTIONS: [Section; 9] = [
    Section::Counts,
    Section::Skip(4),
    Section::Atoms,
    Section::FragmentElectrons,
    Section::FragmentBondCounts,
    Section::FragmentBonds,
    Section::DimerDistances,
    Section::MonomerSummaries,
    Section::DimerEnergies,
];

const LEGACY_COUNTS: CountColumns = CountColumns {
    atoms: Columns::new(0, 5),
    fragments: Columns::new(5, 10),
};

const LEGACY_ATOMS: AtomColumns = AtomColumns {
    index: Columns::new(0, 5),
    element: Columns::new(6, 8),
    atom_type: Columns::new(9, 13),
    residue_name: Columns::new(14, 17),
    residue_index: Columns::new(18, 22),
    fragment_index: Columns::new(23, 27),
    x: Columns::new(28, 40),
    y: Columns::new(40, 52),
    z: Columns::new(52, 64),
    populations: Some([
        Columns::new(64, 76),
        Columns::new(76, 88),
        Columns::new(88, 100),
        Columns::new(100, 112),
        Columns::new(112, 124),
        Columns::new(124, 136),
    ]),
    chain_id: Columns::new(137, 138),
    insertion_code: Columns::new(139, 140),
};

const LEGACY_FRAGMENTS: FragmentColumns = FragmentColumns {
    per_line: 16,
    count_width: 5,
    bond_other: Columns::new(0, 5),
    bond_self: Columns::new(5, 10),
};

pub static VER_7_2: CpfLayout = CpfLayout {
    counts: LEGACY_COUNTS,
    atoms: LEGACY_ATOMS,
    fragments: LEGACY_FRAGMENTS,
    monomer_trailer_lines: 7,
    dimers: DimerEnergyColumns {
        electrostatic: Columns::new(48, 72),
        dispersion: Columns::new(72, 96),
        exchange_repulsion: Columns::new(336, 360),
        charge_transfer: Columns::new(360, 384),
    },
    sections: &LEGACY_SECTIONS,
};

pub static VER_4_201_MIZUHO: CpfLayout = CpfLayout {
    counts: LEGACY_COUNTS,
    atoms: LEGACY_ATOMS,
    fragments: LEGACY_FRAGMENTS,
    monomer_trailer_lines: 7,
    dimers: DimerEnergyColumns {
        electrostatic: Columns::new(48, 72),
        dispersion: Columns::new(72, 96),
        exchange_repulsion: Columns::new(288, 312),
        charge_transfer: Columns::new(312, 336),
    },
    sections: &LEGACY_SECTIONS,
};

pub static OPEN_1_0_REV10: CpfLayout = CpfLayout {
    counts: LEGACY_COUNTS,
    atoms: LEGACY_ATOMS,
    fragments: LEGACY_FRAGMENTS,
    monomer_trailer_lines: 7,
    dimers: DimerEnergyColumns {
        electrostatic: Columns::new(50, 72),
        dispersion: Columns::new(74, 96),
        exchange_repulsion: Columns::new(362, 384),
        charge_transfer: Columns::new(386, 408),
    },
    sections: &LEGACY_SECTIONS,
};

pub static OPEN_1_0_REV23: CpfLayout = CpfLayout {
    counts: CountColumns {
        atoms: Columns::new(0, 10),
        fragments: Columns::new(10, 20),
    },
    atoms: AtomColumns {
        index: Columns::new(0, 10),
        element: Columns::new(10, 12),
        atom_type: Columns::new(15, 18),
        residue_name: Columns::new(19, 22),
        residue_index: Columns::new(22, 33),
        fragment_index: Columns::new(33, 44),
        x: Columns::new(44, 65),
        y: Columns::new(65, 85),
        z: Columns::new(85, 105),
        populations: None,
        chain_id: Columns::new(108, 109),
        insertion_code: Columns::new(109, 111),
    },
    fragments: FragmentColumns {
        per_line: 10,
        count_width: 8,
        bond_other: Columns::new(0, 10),
        bond_self: Columns::new(10, 20),
    },
    monomer_trailer_lines: 9,
    dimers: DimerEnergyColumns {
        electrostatic: Columns::new(70, 92),
        dispersion: Columns::new(94, 116),
        exchange_repulsion: Columns::new(166, 188),
        charge_transfer: Columns::new(190, 212),
    },
    sections: &WIDE_SECTIONS,
};
