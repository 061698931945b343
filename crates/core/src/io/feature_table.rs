//! Flat feature-table records
//!
//! One line per image: an optional integer label followed by the feature
//! values, either dense (`label v1 v2 ...`) or sparse with 1-based indices
//! (`label \t1:v1 \t2:v2 ... n:vn`).

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Space-separated values
    #[default]
    Dense,
    /// `index:value` pairs
    Sparse,
}

impl FromStr for TableFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dense" | "plain" => Ok(TableFormat::Dense),
            "sparse" | "svm" => Ok(TableFormat::Sparse),
            other => Err(Error::invalid_parameter(
                "format",
                other,
                "expected dense or sparse",
            )),
        }
    }
}

/// Write one record to `writer`.
pub fn write_record<W: Write>(
    writer: &mut W,
    label: Option<i64>,
    values: &[f64],
    format: TableFormat,
) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid_parameter("values", 0, "record has no values"));
    }

    match format {
        TableFormat::Dense => {
            if let Some(label) = label {
                write!(writer, "{label} ")?;
            }
            for v in values {
                write!(writer, "{v:.6} ")?;
            }
            writeln!(writer)?;
        }
        TableFormat::Sparse => {
            if let Some(label) = label {
                write!(writer, "{label} \t")?;
            }
            let last = values.len() - 1;
            for (i, v) in values[..last].iter().enumerate() {
                write!(writer, "{}:{v:.6} \t", i + 1)?;
            }
            writeln!(writer, "{}:{:.6}", last + 1, values[last])?;
        }
    }
    Ok(())
}

/// Append one record to the table at `path`, creating the file if needed.
pub fn append_record<P: AsRef<Path>>(
    path: P,
    label: Option<i64>,
    values: &[f64],
    format: TableFormat,
) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_record(&mut writer, label, values, format)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(label: Option<i64>, values: &[f64], format: TableFormat) -> String {
        let mut out = Vec::new();
        write_record(&mut out, label, values, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_dense_with_label() {
        assert_eq!(
            render(Some(3), &[1.0, 0.25], TableFormat::Dense),
            "3 1.000000 0.250000 \n"
        );
    }

    #[test]
    fn test_dense_without_label() {
        assert_eq!(render(None, &[0.5], TableFormat::Dense), "0.500000 \n");
    }

    #[test]
    fn test_sparse() {
        assert_eq!(
            render(Some(1), &[1.0, 2.0, 3.0], TableFormat::Sparse),
            "1 \t1:1.000000 \t2:2.000000 \t3:3.000000\n"
        );
    }

    #[test]
    fn test_empty_record_rejected() {
        let mut out = Vec::new();
        assert!(write_record(&mut out, None, &[], TableFormat::Dense).is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("SVM".parse::<TableFormat>().unwrap(), TableFormat::Sparse);
        assert_eq!("dense".parse::<TableFormat>().unwrap(), TableFormat::Dense);
        assert!("csv".parse::<TableFormat>().is_err());
    }

    #[test]
    fn test_append_accumulates_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.txt");
        append_record(&path, Some(1), &[0.1], TableFormat::Dense).unwrap();
        append_record(&path, Some(2), &[0.2], TableFormat::Dense).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("1 0.100000"));
        assert!(text.lines().nth(1).unwrap().starts_with("2 0.200000"));
    }
}
