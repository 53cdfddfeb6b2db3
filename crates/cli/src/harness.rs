//! Generate, compare and benchmark passes over every registered level.

use crate::dump::{accumulated_error, dump_file_name, read_dump, write_dump};
use anyhow::{Context, Result};
use hasty_noise::{BackendRegistry, GridRegion, NoiseType, SimdLevel};
use std::fs;
use std::path::Path;
use std::time::Instant;

const SEED: i32 = 1337;
const BENCH_ITERATIONS: i32 = 100;

/// One compared pair of dumps.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub noise_type: NoiseType,
    pub first: SimdLevel,
    pub second: SimdLevel,
    pub error: f32,
}

/// Registered levels at or below `cap`.
pub fn levels_up_to(registry: &BackendRegistry, cap: Option<SimdLevel>) -> Vec<SimdLevel> {
    registry
        .levels()
        .filter(|level| cap.is_none_or(|cap| *level <= cap))
        .collect()
}

/// Write one dump per noise type and level into `dir`.
pub fn generate(registry: &BackendRegistry, levels: &[SimdLevel], dir: &Path, size: usize) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let region = GridRegion::sized(size, size, size);
    let mut written = 0;

    for &level in levels {
        for noise_type in NoiseType::ALL {
            let mut noise = registry.create_noise_at(SEED, level);
            noise.set_noise_type(noise_type);
            let values = noise.noise_set(&region, 1.0);

            let path = dir.join(dump_file_name(noise_type, level));
            write_dump(&path, &values[..region.len()])?;
            log::debug!("wrote {}", path.display());
            written += 1;
        }
        println!("Generated {} dumps at {level}", NoiseType::ALL.len());
    }

    Ok(written)
}

/// Compare every pair of dumps found in `dir`, per noise type.
pub fn compare(dir: &Path, size: usize) -> Result<Vec<Comparison>> {
    let len = GridRegion::sized(size, size, size).len();
    let mut comparisons = Vec::new();

    for noise_type in NoiseType::ALL {
        let mut dumps = Vec::new();
        for level in SimdLevel::ALL {
            let path = dir.join(dump_file_name(noise_type, level));
            if path.is_file() {
                dumps.push((level, read_dump(&path, len)?));
            }
        }

        for (i, (first, a)) in dumps.iter().enumerate() {
            for (second, b) in &dumps[i + 1..] {
                comparisons.push(Comparison {
                    noise_type,
                    first: *first,
                    second: *second,
                    error: accumulated_error(a, b),
                });
            }
        }
    }

    Ok(comparisons)
}

/// Time repeated grid fills per level and noise type, returning milliseconds.
pub fn benchmark(registry: &BackendRegistry, levels: &[SimdLevel], size: usize) -> Vec<(SimdLevel, NoiseType, f64)> {
    let mut results = Vec::new();

    for &level in levels {
        for noise_type in NoiseType::ALL {
            let mut noise = registry.create_noise_at(SEED, level);
            noise.set_noise_type(noise_type);
            let mut out = noise.empty_set(GridRegion::sized(size, size, size).len());

            let start = Instant::now();
            for j in 0..BENCH_ITERATIONS {
                let offset = j.wrapping_mul(size as i32);
                let region = GridRegion::new([offset; 3], [size; 3]);
                noise.fill_set(&mut out, &region, 1.0);
            }
            let ms = start.elapsed().as_secs_f64() * 1000.0;
            println!("{level:>7} {noise_type:<20} {ms:>10.2} ms");
            results.push((level, noise_type, ms));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generated_levels_compare_clean() {
        let registry = BackendRegistry::global();
        let levels = levels_up_to(registry, None);
        let dir = tempdir().unwrap();

        let written = generate(registry, &levels, dir.path(), 8).unwrap();
        assert_eq!(written, levels.len() * NoiseType::ALL.len());

        let comparisons = compare(dir.path(), 8).unwrap();
        let pairs = levels.len() * levels.len().saturating_sub(1) / 2;
        assert_eq!(comparisons.len(), pairs * NoiseType::ALL.len());
        if !cfg!(feature = "fma") {
            assert!(comparisons.iter().all(|c| c.error < 1e-3), "{comparisons:?}");
        }
    }

    #[test]
    fn test_level_cap() {
        let registry = BackendRegistry::global();
        assert_eq!(levels_up_to(registry, Some(SimdLevel::None)), vec![SimdLevel::None]);
        assert!(levels_up_to(registry, None).contains(&SimdLevel::None));
    }

    #[test]
    fn test_compare_reports_divergence() {
        let dir = tempdir().unwrap();
        let path = |level| dir.path().join(dump_file_name(NoiseType::Value, level));
        write_dump(&path(SimdLevel::None), &[0.0; 8]).unwrap();
        write_dump(&path(SimdLevel::Avx2), &[0.5; 8]).unwrap();

        let comparisons = compare(dir.path(), 2).unwrap();
        assert_eq!(
            comparisons,
            vec![Comparison {
                noise_type: NoiseType::Value,
                first: SimdLevel::None,
                second: SimdLevel::Avx2,
                error: 4.0,
            }]
        );
    }
}
