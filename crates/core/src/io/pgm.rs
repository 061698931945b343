//! Netpbm gray map (PGM) reading
//!
//! Supports ASCII (`P2`) and binary (`P5`) gray maps. Binary samples are one
//! byte when `maxval < 256` and two big-endian bytes otherwise. Header fields
//! may be separated by comments starting with `#`.
//!
//! The header's first dimension is the column count; it becomes the second
//! matrix axis (`height`), and the row count becomes `width`.

use crate::error::{Error, Result};
use crate::raster::GrayscaleMatrix;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Read a gray map file into a [`GrayscaleMatrix`].
///
/// The declared `maxval` becomes `max_gray = maxval + 1`.
pub fn read_pgm<P: AsRef<Path>>(path: P) -> Result<GrayscaleMatrix> {
    let file = File::open(path.as_ref())?;
    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes)?;
    decode_pgm(Cursor::new(bytes.as_slice()))
}

/// Read a gray map from an in-memory buffer.
pub fn read_pgm_from_buffer(data: &[u8]) -> Result<GrayscaleMatrix> {
    decode_pgm(Cursor::new(data))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Ascii,
    Binary,
}

/// Internal: decode a gray map from an in-memory cursor
fn decode_pgm(mut cursor: Cursor<&[u8]>) -> Result<GrayscaleMatrix> {
    let encoding = match read_token(&mut cursor)?.as_str() {
        "P2" => Encoding::Ascii,
        "P5" => Encoding::Binary,
        other => return Err(Error::Format(format!("unsupported magic number '{other}'"))),
    };

    let cols = parse_header_field(&mut cursor, "width")?;
    let rows = parse_header_field(&mut cursor, "height")?;
    let maxval = parse_header_field(&mut cursor, "maxval")?;

    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: rows,
            height: cols,
        });
    }
    if maxval == 0 || maxval > u16::MAX as usize {
        return Err(Error::Format(format!("maxval {maxval} outside 1..=65535")));
    }

    debug!("gray map {:?}: {} x {}, maxval {}", encoding, rows, cols, maxval);

    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| Error::Format(format!("{rows} x {cols} raster is too large")))?;
    let data = match encoding {
        Encoding::Ascii => read_ascii_samples(&mut cursor, count)?,
        Encoding::Binary => {
            // Exactly one whitespace byte separates the header from the raster.
            let mut sep = [0u8; 1];
            cursor.read_exact(&mut sep).map_err(truncated)?;
            read_binary_samples(&mut cursor, count, maxval > 255)?
        }
    };

    if let Some(&bad) = data.iter().find(|&&v| v as usize > maxval) {
        return Err(Error::Format(format!("sample {bad} exceeds maxval {maxval}")));
    }

    GrayscaleMatrix::from_vec(data, rows, cols, maxval as u32 + 1)
}

fn remaining_bytes(cursor: &Cursor<&[u8]>) -> u64 {
    (cursor.get_ref().len() as u64).saturating_sub(cursor.position())
}

fn truncated(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::Format("unexpected end of data".into())
    } else {
        Error::Io(e)
    }
}

fn parse_header_field(cursor: &mut Cursor<&[u8]>, name: &str) -> Result<usize> {
    let token = read_token(cursor)?;
    token
        .parse()
        .map_err(|_| Error::Format(format!("invalid {name} '{token}'")))
}

/// Next whitespace-delimited header token, skipping `#` comments.
fn read_token(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];

    loop {
        if cursor.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];

        if c == b'#' && token.is_empty() {
            // Comment runs to end of line.
            while cursor.read(&mut byte)? == 1 && byte[0] != b'\n' {}
            continue;
        }

        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            // Leave the delimiter unread so the raster offset stays exact.
            cursor.set_position(cursor.position() - 1);
            break;
        }

        token.push(c as char);
    }

    if token.is_empty() {
        return Err(Error::Format("unexpected end of header".into()));
    }
    Ok(token)
}

fn read_ascii_samples(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<u32>> {
    // Every ASCII sample takes at least one byte.
    let remaining = remaining_bytes(cursor);
    if (count as u64) > remaining {
        return Err(Error::Format(format!(
            "expected {count} samples, only {remaining} bytes left"
        )));
    }
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let token = read_token(cursor)
            .map_err(|_| Error::Format(format!("expected {count} samples, got {}", samples.len())))?;
        let value = token
            .parse::<u32>()
            .map_err(|_| Error::Format(format!("invalid sample '{token}'")))?;
        samples.push(value);
    }
    Ok(samples)
}

fn read_binary_samples(cursor: &mut Cursor<&[u8]>, count: usize, wide: bool) -> Result<Vec<u32>> {
    let width = if wide { 2 } else { 1 };
    let len = count
        .checked_mul(width)
        .ok_or_else(|| Error::Format(format!("{count} samples is too large")))?;
    let remaining = remaining_bytes(cursor);
    if (len as u64) > remaining {
        return Err(Error::Format("unexpected end of data".into()));
    }
    let mut buf = vec![0u8; len];
    cursor.read_exact(&mut buf).map_err(truncated)?;

    let samples = if wide {
        buf.chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]) as u32)
            .collect()
    } else {
        buf.into_iter().map(u32::from).collect()
    };
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ascii_with_comments() {
        let src = b"P2\n# feep.pgm\n3 2\n# levels\n15\n0 3 7\n11 15 0\n";
        let m = read_pgm_from_buffer(src).unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.height(), 3);
        assert_eq!(m.max_gray(), 16);
        assert_eq!(m.at(0, 2), 7);
        assert_eq!(m.at(1, 1), 15);
    }

    #[test]
    fn test_binary_8bit() {
        let mut src = b"P5 2 2 255\n".to_vec();
        src.extend_from_slice(&[0, 10, 200, 255]);
        let m = read_pgm_from_buffer(&src).unwrap();
        assert_eq!(m.max_gray(), 256);
        assert_eq!(m.at(1, 0), 200);
        assert_eq!(m.at(1, 1), 255);
    }

    #[test]
    fn test_binary_16bit_big_endian() {
        let mut src = b"P5\n2 1\n1023\n".to_vec();
        src.extend_from_slice(&[0x01, 0x02, 0x03, 0xFF]);
        let m = read_pgm_from_buffer(&src).unwrap();
        assert_eq!(m.width(), 1);
        assert_eq!(m.height(), 2);
        assert_eq!(m.at(0, 0), 0x0102);
        assert_eq!(m.at(0, 1), 0x03FF);
    }

    #[test]
    fn test_binary_sample_that_looks_like_whitespace() {
        // First sample is 0x0A ('\n'); it must not be eaten as a delimiter.
        let mut src = b"P5 2 1 255\n".to_vec();
        src.extend_from_slice(&[0x0A, 0x20]);
        let m = read_pgm_from_buffer(&src).unwrap();
        assert_eq!(m.at(0, 0), 10);
        assert_eq!(m.at(0, 1), 32);
    }

    #[test]
    fn test_rejects_bad_magic_and_truncation() {
        assert!(matches!(
            read_pgm_from_buffer(b"P6 1 1 255\n\0\0\0"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            read_pgm_from_buffer(b"P2 2 2 15\n1 2 3"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            read_pgm_from_buffer(b"P5 2 2 255\n\x01"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_rejects_sample_above_maxval() {
        assert!(matches!(
            read_pgm_from_buffer(b"P2 1 1 7\n9\n"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_oversized_header_is_format_error() {
        assert!(matches!(
            read_pgm_from_buffer(b"P2 4294967296 4294967296 255\n1\n"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            read_pgm_from_buffer(b"P5 100000 100000 65535\n\x01\x02"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            read_pgm_from_buffer(b"P2 1000 1000 255\n1 2 3\n"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"P2 2 2 3\n0 1\n2 3\n").unwrap();
        let m = read_pgm(file.path()).unwrap();
        assert_eq!(m.max_gray(), 4);
        assert_eq!(m.at(1, 1), 3);
    }
}
