use crate::core::models::topology::{AtomRecord, Topology};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("ATOM/HETATM record is too short (needs at least 54 columns)")]
    LineTooShort,
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Reader for PDB-format topology files.
///
/// Only the atom records matter here: serial, atom name, residue name, chain
/// identifier, residue sequence number, and position. Multi-model files are
/// truncated to their first model, which is the static topology the engine
/// writes next to a trajectory.
pub struct PdbFile;

impl PdbFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Topology, PdbError> {
        let mut atoms = Vec::new();

        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_num = line_index + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    atoms.push(parse_atom_line(&line, line_num)?);
                }
                // The topology is the first model; anything past it belongs
                // to trajectory-style PDB files.
                "ENDMDL" | "END" => break,
                _ => continue,
            }
        }

        Ok(Topology::new(atoms))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Topology, PdbError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<AtomRecord, PdbError> {
    if line.len() < 54 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let serial = parse_int(line, line_num, 6, 11, "7-11")?;
    let name = slice_and_trim(line, 12, 16).to_string();
    let residue_name = slice_and_trim(line, 17, 20).to_string();
    let chain_id = line.chars().nth(21).unwrap_or(' ');
    let residue_seq = parse_int(line, line_num, 22, 26, "23-26")? as isize;

    let x = parse_float(line, line_num, 30, 38, "31-38")?;
    let y = parse_float(line, line_num, 38, 46, "39-46")?;
    let z = parse_float(line, line_num, 46, 54, "47-54")?;

    Ok(AtomRecord {
        serial: serial as usize,
        name,
        residue_name,
        chain_id,
        residue_seq,
        position: Point3::new(x, y, z),
    })
}

fn parse_int(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<i64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse::<i64>().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns,
            value: value.to_string(),
        },
    })
}

fn parse_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse::<f64>().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        },
    })
}
