//! Matrices and vectors on disk.
//!
//! A matrix is a list of rows (`[[1.0, 0.5], [0.5, 1.0]]`) and a vector is a flat list,
//! written either as JSON or YAML.  The format is picked from the file extension.

use crate::FailResult;

use factorlab_linalg::CMatrix;
use failure::ResultExt;
use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataFormat { Json, Yaml }

impl DataFormat {
    /// `.yaml` and `.yml` are YAML; anything else is taken to be JSON.
    pub fn guess(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => DataFormat::Yaml,
            _ => DataFormat::Json,
        }
    }
}

pub fn read_matrix(path: &Path) -> FailResult<Array2<f64>> {
    let rows: Vec<Vec<f64>> = read_value(path)?;
    let matrix = CMatrix::try_from_rows(&rows)
        .with_context(|_| format!("bad matrix in '{}'", path.display()))?;
    Ok(matrix.into_inner())
}

pub fn read_vector(path: &Path) -> FailResult<Array1<f64>> {
    let values: Vec<f64> = read_value(path)?;
    Ok(Array1::from(values))
}

fn read_value<T: DeserializeOwned>(path: &Path) -> FailResult<T> {
    let file = File::open(path)
        .with_context(|_| format!("could not open '{}'", path.display()))?;
    let reader = BufReader::new(file);

    let value = match DataFormat::guess(path) {
        DataFormat::Json => serde_json::from_reader(reader).map_err(failure::Error::from),
        DataFormat::Yaml => serde_yaml::from_reader(reader).map_err(failure::Error::from),
    };
    Ok(value.with_context(|_| format!("could not parse '{}'", path.display()))?)
}

/// Rows of a matrix, in the form `read_matrix` accepts.
pub fn matrix_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>>
{ CMatrix::from(matrix).to_rows() }

/// Pretty JSON to the given file, or to stdout.
pub fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> FailResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|_| format!("could not create '{}'", path.display()))?;
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, value)?;
            writeln!(w)?;
            w.flush()?;
        },
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value)?;
            writeln!(w)?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn guess() {
        assert_eq!(DataFormat::guess("a/b.yaml".as_ref()), DataFormat::Yaml);
        assert_eq!(DataFormat::guess("b.yml".as_ref()), DataFormat::Yaml);
        assert_eq!(DataFormat::guess("b.json".as_ref()), DataFormat::Json);
        assert_eq!(DataFormat::guess("matrix".as_ref()), DataFormat::Json);
    }

    #[test]
    fn read_both_formats() {
        let dir = TempDir::new("factorlab").unwrap();
        let json = dir.path().join("corr.json");
        let yaml = dir.path().join("corr.yaml");
        fs::write(&json, "[[1.0, 0.5], [0.5, 1.0]]").unwrap();
        fs::write(&yaml, "- [1.0, 0.5]\n- [0.5, 1.0]\n").unwrap();

        let expected = arr2(&[[1.0, 0.5], [0.5, 1.0]]);
        assert_eq!(read_matrix(&json).unwrap(), expected);
        assert_eq!(read_matrix(&yaml).unwrap(), expected);
    }

    #[test]
    fn ragged_matrix() {
        let dir = TempDir::new("factorlab").unwrap();
        let path = dir.path().join("ragged.json");
        fs::write(&path, "[[1.0, 0.5], [0.5]]").unwrap();
        assert!(read_matrix(&path).is_err());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new("factorlab").unwrap();
        let path = dir.path().join("out.json");
        let matrix = arr2(&[[0.25, -1.0, 3.0], [0.125, 2.0, 0.0]]);
        write_json(Some(&path), &matrix_rows(&matrix)).unwrap();
        assert_eq!(read_matrix(&path).unwrap(), matrix);

        let path = dir.path().join("vec.json");
        write_json(Some(&path), &vec![1.5, 2.5]).unwrap();
        assert_eq!(read_vector(&path).unwrap().to_vec(), vec![1.5, 2.5]);
    }
}
