use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpfVersion {
    Ver7_2,
    Ver4_201Mizuho,
    Ver4_201,
    Open1_0Rev10,
    Open1_0Rev23,
}

/// Header prefixes in match priority order. The MIZUHO header extends the
/// plain 4.201 header, so it has to be tested first.
pub const VERSION_HEADERS: [(&str, CpfVersion); 5] = [
    ("CPF Ver.7.2", CpfVersion::Ver7_2),
    ("CPF Ver.4.201 (MIZUHO)", CpfVersion::Ver4_201Mizuho),
    ("CPF Ver.4.201", CpfVersion::Ver4_201),
    ("CPF Open1.0 rev10", CpfVersion::Open1_0Rev10),
    ("CPF Open1.0 rev23", CpfVersion::Open1_0Rev23),
];

impl CpfVersion {
    pub fn detect(header: &str) -> Option<Self> {
        VERSION_HEADERS
            .iter()
            .find(|(prefix, _)| header.starts_with(prefix))
            .map(|(_, version)| *version)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ver7_2 => "Ver.7.2",
            Self::Ver4_201Mizuho => "Ver.4.201 (MIZUHO)",
            Self::Ver4_201 => "Ver.4.201",
            Self::Open1_0Rev10 => "Open1.0 rev10",
            Self::Open1_0Rev23 => "Open1.0 rev23",
        }
    }

    /// Numeric code written to JSON dumps. Both 4.201 headers share one code.
    pub const fn code(self) -> u16 {
        match self {
            Self::Ver7_2 => 72,
            Self::Ver4_201Mizuho | Self::Ver4_201 => 4201,
            Self::Open1_0Rev10 => 1010,
            Self::Open1_0Rev23 => 1023,
        }
    }
}

impl Display for CpfVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl Serialize for CpfVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}
