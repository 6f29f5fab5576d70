use crate::core::models::frame::{Frame, SimulationBox};
use crate::core::models::trajectory::Trajectory;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Largest record payload the reader will allocate for. DCD records are tiny
/// (84-byte header, 48-byte cell, 4 bytes per atom per axis); anything bigger
/// is a corrupt length marker.
const MAX_RECORD_BYTES: u32 = 1 << 28;

#[derive(Debug, Error)]
pub enum DcdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Not a DCD file: header record is {0} bytes, expected 84")]
    HeaderLength(usize),
    #[error("Not a DCD file: magic is {found:?}, expected \"CORD\"")]
    BadMagic { found: [u8; 4] },
    #[error("Record length markers disagree ({leading} != {trailing})")]
    RecordMarkerMismatch { leading: u32, trailing: u32 },
    #[error("Record of {0} bytes exceeds the supported maximum")]
    OversizedRecord(u32),
    #[error("Unexpected end of file inside a record")]
    Truncated,
    #[error("Atom count record is invalid")]
    InvalidAtomCount,
    #[error("Unit cell record is {0} bytes, expected 48")]
    CellLength(usize),
    #[error("Coordinate record holds {found} values, expected {expected}")]
    CoordinateLength { expected: usize, found: usize },
}

/// Reader for DCD-format binary trajectories.
///
/// Parses the little-endian CHARMM/X-PLOR layout written by the common
/// engines: an 84-byte header record, a title record, an atom-count record,
/// then per frame an optional 48-byte unit-cell record followed by one record
/// of 32-bit floats per coordinate axis. Frames are read until end of file;
/// the frame count advertised in the header is not trusted.
pub struct DcdFile;

impl DcdFile {
    pub fn read_from(reader: &mut impl Read) -> Result<Trajectory, DcdError> {
        let header = read_record(reader)?.ok_or(DcdError::Truncated)?;
        if header.len() != 84 {
            return Err(DcdError::HeaderLength(header.len()));
        }
        if &header[0..4] != b"CORD" {
            return Err(DcdError::BadMagic {
                found: [header[0], header[1], header[2], header[3]],
            });
        }

        // The 20 control integers follow the magic. Only two matter here:
        // icntrl[10] flags per-frame unit-cell records and icntrl[19] is the
        // CHARMM version stamp that makes that flag meaningful.
        let icntrl: Vec<i32> = (0..20)
            .map(|i| le_i32(&header[4 + 4 * i..8 + 4 * i]))
            .collect();
        let charmm_format = icntrl[19] != 0;
        let has_unit_cell = charmm_format && icntrl[10] != 0;

        // Title record: free-form 80-column lines, skipped entirely.
        read_record(reader)?.ok_or(DcdError::Truncated)?;

        let natoms_record = read_record(reader)?.ok_or(DcdError::Truncated)?;
        if natoms_record.len() != 4 {
            return Err(DcdError::InvalidAtomCount);
        }
        let natoms = le_i32(&natoms_record[0..4]);
        if natoms < 0 {
            return Err(DcdError::InvalidAtomCount);
        }
        let atom_count = natoms as usize;

        let mut frames = Vec::new();
        loop {
            let first = match read_record(reader)? {
                Some(record) => record,
                None => break,
            };

            let (unit_cell, x_record) = if has_unit_cell {
                let cell = parse_unit_cell(&first)?;
                let x_record = read_record(reader)?.ok_or(DcdError::Truncated)?;
                (Some(cell), x_record)
            } else {
                (None, first)
            };

            let y_record = read_record(reader)?.ok_or(DcdError::Truncated)?;
            let z_record = read_record(reader)?.ok_or(DcdError::Truncated)?;

            let xs = parse_axis(&x_record, atom_count)?;
            let ys = parse_axis(&y_record, atom_count)?;
            let zs = parse_axis(&z_record, atom_count)?;

            let positions = (0..atom_count)
                .map(|i| Point3::new(xs[i], ys[i], zs[i]))
                .collect();
            frames.push(Frame {
                positions,
                unit_cell,
            });
        }

        Ok(Trajectory::new(frames, atom_count))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Trajectory, DcdError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// The unit-cell record stores the lower triangle of the cell matrix as six
/// doubles: edge lengths at slots 0, 2, and 5 with the cosines of the angles
/// between them. Only the lengths matter for an orthorhombic box.
fn parse_unit_cell(record: &[u8]) -> Result<SimulationBox, DcdError> {
    if record.len() != 48 {
        return Err(DcdError::CellLength(record.len()));
    }
    let a = le_f64(&record[0..8]);
    let b = le_f64(&record[16..24]);
    let c = le_f64(&record[40..48]);
    Ok(SimulationBox::new(a, b, c))
}

fn parse_axis(record: &[u8], atom_count: usize) -> Result<Vec<f64>, DcdError> {
    if record.len() != atom_count * 4 {
        return Err(DcdError::CoordinateLength {
            expected: atom_count,
            found: record.len() / 4,
        });
    }
    Ok((0..atom_count)
        .map(|i| le_f32(&record[4 * i..4 * i + 4]) as f64)
        .collect())
}

/// Reads one Fortran-style record: a leading length marker, the payload, and
/// a trailing marker that must match. Returns `None` on a clean end of file
/// before the leading marker.
fn read_record(reader: &mut impl Read) -> Result<Option<Vec<u8>>, DcdError> {
    let leading = match read_marker(reader)? {
        Some(marker) => marker,
        None => return Ok(None),
    };
    if leading > MAX_RECORD_BYTES {
        return Err(DcdError::OversizedRecord(leading));
    }

    let mut payload = vec![0u8; leading as usize];
    reader.read_exact(&mut payload).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            DcdError::Truncated
        } else {
            DcdError::Io(e)
        }
    })?;

    let trailing = read_marker(reader)?.ok_or(DcdError::Truncated)?;
    if trailing != leading {
        return Err(DcdError::RecordMarkerMismatch { leading, trailing });
    }

    Ok(Some(payload))
}

fn read_marker(reader: &mut impl Read) -> Result<Option<u32>, DcdError> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(DcdError::Truncated);
        }
        filled += n;
    }
    Ok(Some(u32::from_le_bytes(buf)))
}

fn le_i32(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn le_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn le_f64(bytes: &[u8]) -> f64 {
    f64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 8);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out
    }

    fn header(n_frames: i32, with_cell: bool) -> Vec<u8> {
        let mut payload = Vec::with_capacity(84);
        payload.extend_from_slice(b"CORD");
        let mut icntrl = [0i32; 20];
        icntrl[0] = n_frames;
        icntrl[10] = if with_cell { 1 } else { 0 };
        icntrl[19] = 24;
        for value in icntrl {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        record(&payload)
    }

    fn title() -> Vec<u8> {
        let mut payload = Vec::with_capacity(84);
        payload.extend_from_slice(&1i32.to_le_bytes());
        payload.extend_from_slice(&[b' '; 80]);
        record(&payload)
    }

    fn natoms(n: i32) -> Vec<u8> {
        record(&n.to_le_bytes())
    }

    fn cell(a: f64, b: f64, c: f64) -> Vec<u8> {
        let values = [a, 0.0, b, 0.0, 0.0, c];
        let mut payload = Vec::with_capacity(48);
        for value in values {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        record(&payload)
    }

    fn axis(values: &[f32]) -> Vec<u8> {
        let mut payload = Vec::with_capacity(values.len() * 4);
        for value in values {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        record(&payload)
    }

    fn two_frame_file() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(header(2, true));
        bytes.extend(title());
        bytes.extend(natoms(2));
        // Frame 1
        bytes.extend(cell(50.0, 50.0, 50.0));
        bytes.extend(axis(&[1.0, 2.0]));
        bytes.extend(axis(&[3.0, 4.0]));
        bytes.extend(axis(&[5.0, 6.0]));
        // Frame 2
        bytes.extend(cell(50.0, 50.0, 50.0));
        bytes.extend(axis(&[7.0, 8.0]));
        bytes.extend(axis(&[9.0, 10.0]));
        bytes.extend(axis(&[11.0, 12.0]));
        bytes
    }

    #[test]
    fn reads_frames_positions_and_unit_cells() {
        let bytes = two_frame_file();
        let trajectory = DcdFile::read_from(&mut bytes.as_slice()).unwrap();

        assert_eq!(trajectory.frame_count(), 2);
        assert_eq!(trajectory.atom_count(), 2);

        let first = &trajectory.frames()[0];
        assert_eq!(first.positions[0], Point3::new(1.0, 3.0, 5.0));
        assert_eq!(first.positions[1], Point3::new(2.0, 4.0, 6.0));
        let cell = first.unit_cell.expect("frame should carry a unit cell");
        assert_eq!(cell.lengths().x, 50.0);
        assert_eq!(cell.lengths().z, 50.0);

        let second = &trajectory.frames()[1];
        assert_eq!(second.positions[1], Point3::new(8.0, 10.0, 12.0));
    }

    #[test]
    fn reads_files_without_unit_cell_records() {
        let mut bytes = Vec::new();
        bytes.extend(header(1, false));
        bytes.extend(title());
        bytes.extend(natoms(1));
        bytes.extend(axis(&[1.5]));
        bytes.extend(axis(&[2.5]));
        bytes.extend(axis(&[3.5]));

        let trajectory = DcdFile::read_from(&mut bytes.as_slice()).unwrap();
        assert_eq!(trajectory.frame_count(), 1);
        let frame = &trajectory.frames()[0];
        assert!(frame.unit_cell.is_none());
        assert_eq!(frame.positions[0], Point3::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn rejects_a_bad_magic_number() {
        let mut bytes = two_frame_file();
        bytes[4..8].copy_from_slice(b"VELO");
        let err = DcdFile::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DcdError::BadMagic { found } if &found == b"VELO"));
    }

    #[test]
    fn rejects_mismatched_record_markers() {
        let mut bytes = two_frame_file();
        let last = bytes.len() - 1;
        bytes[last] = 0xFF;
        let err = DcdFile::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DcdError::RecordMarkerMismatch { .. }));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let mut bytes = two_frame_file();
        bytes.truncate(bytes.len() - 6);
        let err = DcdFile::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DcdError::Truncated));
    }

    #[test]
    fn wrong_coordinate_count_is_an_error() {
        let mut bytes = Vec::new();
        bytes.extend(header(1, false));
        bytes.extend(title());
        bytes.extend(natoms(2));
        bytes.extend(axis(&[1.0]));
        bytes.extend(axis(&[2.0]));
        bytes.extend(axis(&[3.0]));
        let err = DcdFile::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            DcdError::CoordinateLength {
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DcdFile::read_from_path("definitely/not/here.dcd").unwrap_err();
        assert!(matches!(err, DcdError::Io(_)));
    }
}
