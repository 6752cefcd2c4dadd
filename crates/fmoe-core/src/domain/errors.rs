use crate::modules::autofrag::AutofragError;
use crate::modules::cpf::CpfError;
use crate::modules::serialization::SvlError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FmoeResult<T> = Result<T, FmoeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FmoeErrorCategory {
    Success,
    OptionParse,
    IoSystem,
    Parse,
}

impl FmoeErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::OptionParse => 1,
            Self::IoSystem => 2,
            Self::Parse => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::OptionParse => "OptionParse",
            Self::IoSystem => "IoSystem",
            Self::Parse => "Parse",
        }
    }
}

/// Boundary error carried out of a conversion. The placeholder is a stable
/// dotted code (`PARSE.CPF`, `IO.OUTPUT_CREATE`, ...) for logs and tests; the
/// message is what gets printed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmoeError {
    category: FmoeErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl FmoeError {
    pub fn new(
        category: FmoeErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn option_parse(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FmoeErrorCategory::OptionParse, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FmoeErrorCategory::IoSystem, placeholder, message)
    }

    pub fn parse(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FmoeErrorCategory::Parse, placeholder, message)
    }

    pub const fn category(&self) -> FmoeErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }
}

impl Display for FmoeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FmoeError {}

impl From<CpfError> for FmoeError {
    fn from(error: CpfError) -> Self {
        Self::parse("PARSE.CPF", error.to_string())
    }
}

impl From<AutofragError> for FmoeError {
    fn from(error: AutofragError) -> Self {
        Self::parse("PARSE.AUTOFRAG", error.to_string())
    }
}

// The SVL container only fails on lengths beyond 32 bits, which the
// consumer cannot represent either; report it as an output failure.
impl From<SvlError> for FmoeError {
    fn from(error: SvlError) -> Self {
        Self::io_system("IO.SVL_ENCODE", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{FmoeError, FmoeErrorCategory};
    use crate::modules::cpf::CpfError;

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (FmoeErrorCategory::Success, 0, "Success"),
            (FmoeErrorCategory::OptionParse, 1, "OptionParse"),
            (FmoeErrorCategory::IoSystem, 2, "IoSystem"),
            (FmoeErrorCategory::Parse, 3, "Parse"),
        ];

        for (category, exit_code, name) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn parse_errors_keep_the_wrapped_message() {
        let source = CpfError::UnknownVersion {
            header: "CPF Ver.9.9".to_string(),
        }
        .in_stage("parse version");
        let error = FmoeError::from(source);

        assert_eq!(error.category(), FmoeErrorCategory::Parse);
        assert_eq!(error.placeholder(), "PARSE.CPF");
        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.to_string(),
            "parse version: unknown CPF version: CPF Ver.9.9"
        );
    }
}
