use flate2::read::GzDecoder;
use fmoe_core::domain::{FmoeError, FmoeResult};
use fmoe_core::modules::serialization::write_binary_artifact;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Opens the conversion input: standard input when no path is given, a gzip
/// stream when the path ends in `.gz`, the plain file otherwise.
pub(super) fn open_input(path: Option<&Path>) -> FmoeResult<Box<dyn BufRead>> {
    let Some(path) = path else {
        return Ok(Box::new(BufReader::new(io::stdin())));
    };

    let file = File::open(path).map_err(|source| {
        FmoeError::io_system(
            "IO.INPUT_OPEN",
            format!("open {}: {}", path.display(), source),
        )
    })?;

    if !is_gzip_path(path) {
        return Ok(Box::new(BufReader::new(file)));
    }

    // Pull the first block so a corrupt gzip header fails here as an I/O error.
    let mut reader = BufReader::new(GzDecoder::new(file));
    reader.fill_buf().map_err(|source| {
        FmoeError::io_system(
            "IO.INPUT_GZIP",
            format!("gzip: {}: {}", path.display(), source),
        )
    })?;
    Ok(Box::new(reader))
}

pub(super) fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "gz")
}

/// Writes a finished artifact to `path`, or to standard output.
pub(super) fn emit_output(path: Option<&Path>, bytes: &[u8]) -> FmoeResult<()> {
    match path {
        Some(path) => write_binary_artifact(path, bytes).map_err(|source| {
            FmoeError::io_system(
                "IO.OUTPUT_WRITE",
                format!("create {}: {}", path.display(), source),
            )
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .map_err(|source| {
                    FmoeError::io_system("IO.OUTPUT_WRITE", format!("write stdout: {}", source))
                })
        }
    }
}
