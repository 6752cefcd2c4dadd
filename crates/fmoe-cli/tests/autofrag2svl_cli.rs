use fmoe_core::modules::autofrag::TABLE_MARKER;
use fmoe_core::modules::serialization::{SvlArray, decode_svl};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn autofrag_log(rows: &[(i32, i32, i32)]) -> String {
    let mut text = String::from(" ## AUTOMATIC FRAGMENTATION\n\n");
    text.push_str(&format!("  {TABLE_MARKER}\n"));
    for (fragment, bda, baa) in rows {
        text.push_str(&format!("{fragment:>13} {bda:>7} {baa:>5}\n"));
    }
    text.push_str("\n ## END\n");
    text
}

fn fmoe(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fmoe"))
        .args(args)
        .current_dir(cwd)
        .env_remove("AUTOFRAG_PATH")
        .env_remove("SVLBIN_PATH")
        .env_remove("FMOE_LOG")
        .output()
        .expect("fmoe should run")
}

#[test]
fn bond_table_is_written_as_two_int_arrays() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("autofrag.log"),
        autofrag_log(&[(1, 10, 12), (2, 25, 27)]),
    )
    .expect("fixture should be written");

    let output = fmoe(&["autofrag2svl", "-i", "autofrag.log", "-o", "bonds.svl"], temp.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let bytes = fs::read(temp.path().join("bonds.svl")).expect("output should exist");
    assert_eq!(
        decode_svl(&bytes).expect("output should decode"),
        vec![SvlArray::Int(vec![10, 25]), SvlArray::Int(vec![12, 27])]
    );
}

#[test]
fn output_defaults_to_stdout() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(temp.path().join("autofrag.log"), autofrag_log(&[(1, 3, 4)]))
        .expect("fixture should be written");

    let output = fmoe(&["autofrag2svl", "-i", "autofrag.log"], temp.path());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        output.stdout,
        vec![2, 0, 0, 0, 1, 0, 0, 0, 3, 2, 0, 0, 0, 1, 0, 0, 0, 4]
    );
}

#[test]
fn missing_input_flag_is_an_io_failure() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = fmoe(&["autofrag2svl"], temp.path());
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&output.stderr), "input isn't set\n");
}

#[test]
fn log_without_bond_table_is_a_parse_failure() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(temp.path().join("plain.log"), "nothing to see\n")
        .expect("fixture should be written");

    let output = fmoe(&["autofrag2svl", "-i", "plain.log", "-o", "bonds.svl"], temp.path());
    assert_eq!(output.status.code(), Some(3));
    assert!(!temp.path().join("bonds.svl").exists());
}

#[test]
fn paths_can_come_from_the_environment() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(temp.path().join("env.log"), autofrag_log(&[(1, 5, 6)]))
        .expect("fixture should be written");

    let output = Command::new(env!("CARGO_BIN_EXE_fmoe"))
        .arg("autofrag2svl")
        .current_dir(temp.path())
        .env("AUTOFRAG_PATH", "env.log")
        .env("SVLBIN_PATH", "env.svl")
        .env_remove("FMOE_LOG")
        .output()
        .expect("fmoe should run");
    assert_eq!(output.status.code(), Some(0));
    assert!(temp.path().join("env.svl").is_file());
}
