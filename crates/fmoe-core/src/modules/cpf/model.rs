use super::version::CpfVersion;
use serde::Serialize;

/// Per-atom parallel arrays. Every vector holds exactly `num_atoms` entries
/// once the atom section has been read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AtomTable {
    #[serde(rename = "AtomIndices")]
    pub indices: Vec<i32>,
    #[serde(rename = "AtomElements")]
    pub elements: Vec<String>,
    #[serde(rename = "AtomTypes")]
    pub types: Vec<String>,
    #[serde(rename = "AtomResNames")]
    pub residue_names: Vec<String>,
    #[serde(rename = "AtomResIndices")]
    pub residue_indices: Vec<i32>,
    #[serde(rename = "AtomFragIndices")]
    pub fragment_indices: Vec<i32>,
    #[serde(rename = "AtomX")]
    pub x: Vec<f64>,
    #[serde(rename = "AtomY")]
    pub y: Vec<f64>,
    #[serde(rename = "AtomZ")]
    pub z: Vec<f64>,
    #[serde(rename = "AtomHFMulliken")]
    pub hf_mulliken: Vec<f64>,
    #[serde(rename = "AtomMP2Mulliken")]
    pub mp2_mulliken: Vec<f64>,
    #[serde(rename = "AtomHFNBO")]
    pub hf_nbo: Vec<f64>,
    #[serde(rename = "AtomMP2NBO")]
    pub mp2_nbo: Vec<f64>,
    #[serde(rename = "AtomHFRESP")]
    pub hf_resp: Vec<f64>,
    #[serde(rename = "AtomMP2RESP")]
    pub mp2_resp: Vec<f64>,
    #[serde(rename = "AtomChainID")]
    pub chain_ids: Vec<String>,
    #[serde(rename = "AtomInsCode")]
    pub insertion_codes: Vec<String>,
}

impl AtomTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            elements: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
            residue_names: Vec::with_capacity(capacity),
            residue_indices: Vec::with_capacity(capacity),
            fragment_indices: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            hf_mulliken: Vec::with_capacity(capacity),
            mp2_mulliken: Vec::with_capacity(capacity),
            hf_nbo: Vec::with_capacity(capacity),
            mp2_nbo: Vec::with_capacity(capacity),
            hf_resp: Vec::with_capacity(capacity),
            mp2_resp: Vec::with_capacity(capacity),
            chain_ids: Vec::with_capacity(capacity),
            insertion_codes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, atom: AtomRow) {
        self.indices.push(atom.index);
        self.elements.push(atom.element);
        self.types.push(atom.atom_type);
        self.residue_names.push(atom.residue_name);
        self.residue_indices.push(atom.residue_index);
        self.fragment_indices.push(atom.fragment_index);
        self.x.push(atom.position[0]);
        self.y.push(atom.position[1]);
        self.z.push(atom.position[2]);
        let [hf_mulliken, mp2_mulliken, hf_nbo, mp2_nbo, hf_resp, mp2_resp] = atom.populations;
        self.hf_mulliken.push(hf_mulliken);
        self.mp2_mulliken.push(mp2_mulliken);
        self.hf_nbo.push(hf_nbo);
        self.mp2_nbo.push(mp2_nbo);
        self.hf_resp.push(hf_resp);
        self.mp2_resp.push(mp2_resp);
        self.chain_ids.push(atom.chain_id);
        self.insertion_codes.push(atom.insertion_code);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Lengths of all seventeen arrays, in encoding order.
    pub fn column_lengths(&self) -> [usize; 17] {
        [
            self.indices.len(),
            self.elements.len(),
            self.types.len(),
            self.residue_names.len(),
            self.residue_indices.len(),
            self.fragment_indices.len(),
            self.x.len(),
            self.y.len(),
            self.z.len(),
            self.hf_mulliken.len(),
            self.mp2_mulliken.len(),
            self.hf_nbo.len(),
            self.mp2_nbo.len(),
            self.hf_resp.len(),
            self.mp2_resp.len(),
            self.chain_ids.len(),
            self.insertion_codes.len(),
        ]
    }
}

/// One decoded atom line.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRow {
    pub index: i32,
    pub element: String,
    pub atom_type: String,
    pub residue_name: String,
    pub residue_index: i32,
    pub fragment_index: i32,
    pub position: [f64; 3],
    pub populations: [f64; 6],
    pub chain_id: String,
    pub insertion_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FragmentTopology {
    #[serde(rename = "FragBondNumbers")]
    pub bond_numbers: Vec<i32>,
    #[serde(rename = "FragBondSelfs")]
    pub bond_selfs: Vec<i32>,
    #[serde(rename = "FragBondOthers")]
    pub bond_others: Vec<i32>,
}

impl FragmentTopology {
    /// Total bond rows announced by the bond-count table.
    pub fn announced_bonds(&self) -> i64 {
        self.bond_numbers.iter().map(|&count| i64::from(count)).sum()
    }
}

/// Dimer scalars in file order; row `i` of every array is the `i`-th dimer line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DimerTable {
    #[serde(rename = "DimerDistances")]
    pub distances: Vec<f64>,
    #[serde(rename = "DimerES")]
    pub electrostatic: Vec<f64>,
    #[serde(rename = "DimerDI")]
    pub dispersion: Vec<f64>,
    #[serde(rename = "DimerEX")]
    pub exchange_repulsion: Vec<f64>,
    #[serde(rename = "DimerCT")]
    pub charge_transfer: Vec<f64>,
}

pub const fn dimer_count(num_frags: usize) -> usize {
    num_frags.saturating_mul(num_frags.saturating_sub(1)) / 2
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointRecord {
    #[serde(rename = "Version")]
    pub version: CpfVersion,
    #[serde(rename = "NumAtoms")]
    pub num_atoms: usize,
    #[serde(rename = "NumFrags")]
    pub num_frags: usize,
    #[serde(flatten)]
    pub atoms: AtomTable,
    #[serde(flatten)]
    pub fragments: FragmentTopology,
    #[serde(flatten)]
    pub dimers: DimerTable,
}

impl CheckpointRecord {
    pub const fn num_dimers(&self) -> usize {
        dimer_count(self.num_frags)
    }
}

/// Partially assembled record threaded through the section steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointBuilder {
    version: CpfVersion,
    num_atoms: usize,
    num_frags: usize,
    atoms: AtomTable,
    fragments: FragmentTopology,
    dimers: DimerTable,
}

impl CheckpointBuilder {
    pub fn new(version: CpfVersion) -> Self {
        Self {
            version,
            num_atoms: 0,
            num_frags: 0,
            atoms: AtomTable::default(),
            fragments: FragmentTopology::default(),
            dimers: DimerTable::default(),
        }
    }

    pub const fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    pub const fn num_frags(&self) -> usize {
        self.num_frags
    }

    pub const fn num_dimers(&self) -> usize {
        dimer_count(self.num_frags)
    }

    pub fn fragments(&self) -> &FragmentTopology {
        &self.fragments
    }

    pub fn with_counts(self, num_atoms: usize, num_frags: usize) -> Self {
        Self {
            num_atoms,
            num_frags,
            ..self
        }
    }

    pub fn with_atoms(self, atoms: AtomTable) -> Self {
        Self { atoms, ..self }
    }

    pub fn with_bond_numbers(mut self, bond_numbers: Vec<i32>) -> Self {
        self.fragments.bond_numbers = bond_numbers;
        self
    }

    pub fn with_bonds(mut self, selfs: Vec<i32>, others: Vec<i32>) -> Self {
        self.fragments.bond_selfs = selfs;
        self.fragments.bond_others = others;
        self
    }

    pub fn with_distances(mut self, distances: Vec<f64>) -> Self {
        self.dimers.distances = distances;
        self
    }

    pub fn with_energies(
        mut self,
        electrostatic: Vec<f64>,
        dispersion: Vec<f64>,
        exchange_repulsion: Vec<f64>,
        charge_transfer: Vec<f64>,
    ) -> Self {
        self.dimers.electrostatic = electrostatic;
        self.dimers.dispersion = dispersion;
        self.dimers.exchange_repulsion = exchange_repulsion;
        self.dimers.charge_transfer = charge_transfer;
        self
    }

    pub fn finish(self) -> CheckpointRecord {
        CheckpointRecord {
            version: self.version,
            num_atoms: self.num_atoms,
            num_frags: self.num_frags,
            atoms: self.atoms,
            fragments: self.fragments,
            dimers: self.dimers,
        }
    }
}
