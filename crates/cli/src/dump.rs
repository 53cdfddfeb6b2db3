//! Raw noise dumps for cross-level regression checks.
//!
//! A dump is a headerless array of native-endian `f32` in grid order (x outer,
//! z inner). It is not a portable format: dumps are compared on the machine
//! that wrote them.

use hasty_noise::{NoiseType, SimdLevel};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Failure reading or writing a dump.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The file could not be read or written
    #[error("failed to access dump {}", path.display())]
    Io {
        /// Dump path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The file does not hold the expected number of floats
    #[error("dump {} holds {actual} bytes, expected {expected}", path.display())]
    SizeMismatch {
        /// Dump path
        path: PathBuf,
        /// Expected size in bytes
        expected: usize,
        /// Actual size in bytes
        actual: usize,
    },
}

/// File name of the dump for one noise type at one level.
pub fn dump_file_name(noise_type: NoiseType, level: SimdLevel) -> String {
    format!("{noise_type}_{level}.ns")
}

/// Write `values` to `path`, replacing any existing file.
pub fn write_dump(path: &Path, values: &[f32]) -> Result<(), DumpError> {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    fs::write(path, bytes).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a dump that must hold exactly `len` floats.
pub fn read_dump(path: &Path, len: usize) -> Result<Vec<f32>, DumpError> {
    let bytes = fs::read(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let expected = len * FLOAT_BYTES;
    if bytes.len() != expected {
        return Err(DumpError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len(),
        });
    }

    Ok(bytes
        .chunks_exact(FLOAT_BYTES)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Sum of the absolute differences larger than `f32::EPSILON`.
pub fn accumulated_error(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .filter(|delta| *delta > f32::EPSILON)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_names() {
        assert_eq!(dump_file_name(NoiseType::PerlinFractal, SimdLevel::Sse41), "PerlinFractal_SSE4.1.ns");
        assert_eq!(dump_file_name(NoiseType::WhiteNoise, SimdLevel::None), "WhiteNoise_None.ns");
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dump.ns");
        let values = [0.25, -1.0, 3.5e-7, f32::MAX];
        write_dump(&path, &values).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().len(), 16);
        assert_eq!(read_dump(&path, 4).unwrap(), values);
    }

    #[test]
    fn test_size_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.ns");
        write_dump(&path, &[1.0, 2.0]).unwrap();

        match read_dump(&path, 3) {
            Err(DumpError::SizeMismatch { expected, actual, .. }) => {
                assert_eq!((expected, actual), (12, 8));
            }
            other => panic!("expected a size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_dump(&dir.path().join("absent.ns"), 1).unwrap_err();
        assert!(matches!(err, DumpError::Io { .. }));
    }

    #[test]
    fn test_error_ignores_rounding_noise() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + f32::EPSILON / 2.0, 2.5, 2.0];
        assert_eq!(accumulated_error(&a, &b), 1.5);
        assert_eq!(accumulated_error(&a, &a), 0.0);
    }
}
