pub mod errors;

pub use errors::{FmoeError, FmoeErrorCategory, FmoeResult};

use std::fmt::{Display, Formatter};

/// The conversions the tool set performs; each one turns a text report into
/// an SVL binary container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    Cpf2Svl,
    Autofrag2Svl,
}

impl Conversion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpf2Svl => "cpf2svl",
            Self::Autofrag2Svl => "autofrag2svl",
        }
    }

    pub const fn input_env(self) -> &'static str {
        match self {
            Self::Cpf2Svl => "CPF_PATH",
            Self::Autofrag2Svl => "AUTOFRAG_PATH",
        }
    }

    pub const fn output_env(self) -> &'static str {
        match self {
            Self::Cpf2Svl => "SVL_PATH",
            Self::Autofrag2Svl => "SVLBIN_PATH",
        }
    }
}

impl Display for Conversion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
