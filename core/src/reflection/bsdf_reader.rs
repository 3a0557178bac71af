//! BSDF Reader

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};
use thiserror::Error;

/// The first 8 bytes of a BSDF file are the header `SCATFUN` terminated with
/// char `0x01`.
pub const EXPECTED_HEADER: [u8; 8] = [b'S', b'C', b'A', b'T', b'F', b'U', b'N', b'\x01'];

/// Errors raised while loading a Fourier BSDF table.
#[derive(Debug, Error)]
pub enum FourierTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid header '{0}', expected 'SCATFUN\\x01'")]
    BadHeader(String),

    #[error("Unsupported BSDF file format (flags {flags}, channels {channels}, bases {bases})")]
    Unsupported { flags: i32, channels: i32, bases: i32 },

    #[error("Invalid {name} {value} in header")]
    InvalidDimension { name: &'static str, value: i32 },

    #[error("{name} has {actual} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Zenith knots must be strictly increasing within [-1, 1]")]
    KnotsNotMonotone,

    #[error("CDF row {row} is not monotone")]
    CdfNotMonotone { row: usize },

    #[error("Coefficients for pair ({i}, {o}) exceed the coefficient array")]
    CoefficientRange { i: usize, o: usize },

    #[error("Order {m} for pair ({i}, {o}) exceeds maximum order {m_max}")]
    OrderTooLarge {
        i: usize,
        o: usize,
        m: usize,
        m_max: usize,
    },
}

/// Helpers for reading little-endian Fourier BSDF files.
pub trait BSDFReader {
    /// Reads the header bytes and compares them to the expected header.
    fn check_header(&mut self) -> Result<(), FourierTableError>;

    /// Reads one 32-bit signed value.
    fn read_int(&mut self) -> Result<i32, FourierTableError>;

    /// Reads one 32-bit floating point value.
    fn read_float(&mut self) -> Result<f32, FourierTableError>;

    /// Reads a non-negative 32-bit value used as a size.
    ///
    /// * `name` - Field name used in the error.
    fn read_size(&mut self, name: &'static str) -> Result<usize, FourierTableError> {
        let value = self.read_int()?;
        if value < 0 {
            Err(FourierTableError::InvalidDimension { name, value })
        } else {
            Ok(value as usize)
        }
    }

    /// Reads given number of 32-bit signed values.
    ///
    /// * `count` - Number of values to read.
    fn read_int_vec(&mut self, count: usize) -> Result<Vec<i32>, FourierTableError>;

    /// Reads given number of 32-bit floating point values.
    ///
    /// * `count` - Number of values to read.
    fn read_float_vec(&mut self, count: usize) -> Result<Vec<f32>, FourierTableError>;
}

impl<R: Read> BSDFReader for R {
    fn check_header(&mut self) -> Result<(), FourierTableError> {
        let mut header = [0_u8; 8];
        self.read_exact(&mut header)?;
        if header == EXPECTED_HEADER {
            Ok(())
        } else {
            Err(FourierTableError::BadHeader(
                String::from_utf8_lossy(&header).into_owned(),
            ))
        }
    }

    fn read_int(&mut self) -> Result<i32, FourierTableError> {
        Ok(ReadBytesExt::read_i32::<LittleEndian>(self)?)
    }

    fn read_float(&mut self) -> Result<f32, FourierTableError> {
        Ok(ReadBytesExt::read_f32::<LittleEndian>(self)?)
    }

    fn read_int_vec(&mut self, count: usize) -> Result<Vec<i32>, FourierTableError> {
        let mut buffer = vec![0_i32; count];
        self.read_i32_into::<LittleEndian>(&mut buffer)?;
        Ok(buffer)
    }

    fn read_float_vec(&mut self, count: usize) -> Result<Vec<f32>, FourierTableError> {
        let mut buffer = vec![0.0_f32; count];
        self.read_f32_into::<LittleEndian>(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    #[test]
    fn reads_little_endian_values() {
        let mut bytes = vec![];
        bytes.write_i32::<LittleEndian>(-7).unwrap();
        bytes.write_f32::<LittleEndian>(1.5).unwrap();
        bytes.write_i32::<LittleEndian>(3).unwrap();
        let mut r = Cursor::new(bytes);
        assert_eq!(BSDFReader::read_int(&mut r).unwrap(), -7);
        assert_eq!(r.read_float().unwrap(), 1.5);
        assert_eq!(r.read_size("n").unwrap(), 3);
    }

    #[test]
    fn negative_size_is_rejected() {
        let mut bytes = vec![];
        bytes.write_i32::<LittleEndian>(-1).unwrap();
        let err = Cursor::new(bytes).read_size("nMu").unwrap_err();
        assert!(matches!(
            err,
            FourierTableError::InvalidDimension { name: "nMu", value: -1 }
        ));
    }

    #[test]
    fn bad_header_and_truncation() {
        let mut r = Cursor::new(b"SCATFUX\x01".to_vec());
        assert!(matches!(r.check_header(), Err(FourierTableError::BadHeader(_))));

        let mut r = Cursor::new(vec![0_u8; 2]);
        assert!(matches!(r.read_float_vec(4), Err(FourierTableError::Io(_))));
    }
}
