use fmoe_core::domain::Conversion;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub(super) struct ConversionCommandSpec {
    pub(super) command: &'static str,
    pub(super) conversion: Conversion,
}

pub(super) const CONVERSION_COMMANDS: [ConversionCommandSpec; 2] = [
    ConversionCommandSpec {
        command: "cpf2svl",
        conversion: Conversion::Cpf2Svl,
    },
    ConversionCommandSpec {
        command: "autofrag2svl",
        conversion: Conversion::Autofrag2Svl,
    },
];

pub(super) fn conversion_command_spec(command: &str) -> Option<ConversionCommandSpec> {
    CONVERSION_COMMANDS
        .iter()
        .copied()
        .find(|spec| spec.command == command)
}

/// Maps an executable named after a conversion (`cpf2svl`, `autofrag2svl.exe`)
/// to the subcommand it implies.
pub(super) fn command_alias_from_program_name(program_name: &str) -> Option<&'static str> {
    let executable_name = Path::new(program_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program_name);
    let normalized = executable_name
        .strip_suffix(".exe")
        .unwrap_or(executable_name);

    conversion_command_spec(normalized).map(|spec| spec.conversion.as_str())
}
