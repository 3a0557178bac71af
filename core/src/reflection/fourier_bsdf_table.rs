//! Fourier BSDF Table

use super::bsdf_reader::*;
use crate::interpolation::*;
use crate::pbrt::*;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Stores the measured Fourier BSDF data.
#[derive(Clone, Debug)]
pub struct FourierBSDFTable {
    /// Relative index of refraction over the surface boundary between two media.
    pub eta: Float,

    /// Maximum order `m` for any pair of μi, μo directions used to allocate
    /// ak coefficients.
    pub m_max: usize,

    /// Number of spectral channels available:
    /// 1: Monochromatic BSDF
    /// 3: BSDF with RGB colors (stored as luminance, red, blue values)
    pub n_channels: usize,

    /// Zenith angle cosines stored in sorted order from low to high.
    pub mu: Vec<Float>,

    /// The order of the Fourier representation for each `(o, i)` pair, stored
    /// as `mu.len() x mu.len()` matrix indexed by `o * n_mu + i`.
    pub m: Vec<usize>,

    /// Offsets into `a` for each pair. The first `m` coefficients after the
    /// offset are luminance; for RGB tables red and blue follow.
    pub a_offset: Vec<usize>,

    /// The coefficients for all pairs of discretized direction `mu`.
    pub a: Vec<Float>,

    /// First coefficient a0 for each pair.
    pub a0: Vec<Float>,

    /// Running integrals of `a0` along μi for each μo row.
    pub cdf: Vec<Float>,

    /// Contains 1 / i for i in [0..`m_max`].
    pub recip: Vec<Float>,
}

impl FourierBSDFTable {
    /// Create a validated table. Fails instead of returning a partially
    /// consistent table.
    ///
    /// * `eta`               - Relative index of refraction.
    /// * `m_max`             - Maximum order.
    /// * `n_channels`        - Number of channels; 1 or 3.
    /// * `mu`                - Zenith angle cosines.
    /// * `cdf`               - Running integrals, `mu.len()²` values.
    /// * `offset_and_length` - Pairs of offset into `a` and order `m` per
    ///                         `(o, i)` pair.
    /// * `a`                 - The coefficients.
    pub fn new(
        eta: Float,
        m_max: usize,
        n_channels: usize,
        mu: Vec<Float>,
        cdf: Vec<Float>,
        offset_and_length: &[(usize, usize)],
        a: Vec<Float>,
    ) -> Result<Self, FourierTableError> {
        if n_channels != 1 && n_channels != 3 {
            return Err(FourierTableError::Unsupported {
                flags: 1,
                channels: n_channels as i32,
                bases: 1,
            });
        }

        let n_mu = mu.len();
        if n_mu < 2 {
            return Err(FourierTableError::InvalidDimension {
                name: "nMu",
                value: n_mu as i32,
            });
        }
        if !(mu[0] >= -1.0 && mu[n_mu - 1] <= 1.0) || mu.iter().tuple_windows().any(|(a, b)| a >= b)
        {
            return Err(FourierTableError::KnotsNotMonotone);
        }

        let n_pairs = n_mu * n_mu;
        check_len("cdf", n_pairs, cdf.len())?;
        check_len("offsetAndLength", n_pairs, offset_and_length.len())?;
        if let Some(row) = cdf
            .chunks(n_mu)
            .position(|row| row.iter().tuple_windows().any(|(a, b)| b < a))
        {
            return Err(FourierTableError::CdfNotMonotone { row });
        }

        let mut a_offset = Vec::with_capacity(n_pairs);
        let mut m = Vec::with_capacity(n_pairs);
        let mut a0 = Vec::with_capacity(n_pairs);
        for (idx, &(offset, length)) in offset_and_length.iter().enumerate() {
            let (o, i) = (idx / n_mu, idx % n_mu);
            if length > m_max {
                return Err(FourierTableError::OrderTooLarge {
                    i,
                    o,
                    m: length,
                    m_max,
                });
            }
            if offset > a.len() || offset + length * n_channels > a.len() {
                return Err(FourierTableError::CoefficientRange { i, o });
            }
            a_offset.push(offset);
            m.push(length);
            a0.push(if length > 0 { a[offset] } else { 0.0 });
        }

        let recip = (0..m_max).map(|i| 1.0 / i as Float).collect();

        Ok(Self {
            eta,
            m_max,
            n_channels,
            mu,
            m,
            a_offset,
            a,
            a0,
            cdf,
            recip,
        })
    }

    /// Loads a table from a binary file.
    ///
    /// * `path` - The path to the BSDF binary file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FourierTableError> {
        let file = File::open(path.as_ref())?;
        let table = Self::read(&mut BufReader::new(file))?;
        info!(
            "Loaded Fourier BSDF table {} ({} zenith knots, m_max {}, {} channel(s), eta {})",
            path.as_ref().display(),
            table.mu.len(),
            table.m_max,
            table.n_channels,
            table.eta,
        );
        Ok(table)
    }

    /// Reads a table from a stream in the little-endian `SCATFUN` layout.
    ///
    /// * `reader` - The source.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, FourierTableError> {
        reader.check_header()?;

        let flags = reader.read_int()?;
        let n_mu = reader.read_size("nMu")?;
        let n_coeffs = reader.read_size("nCoeffs")?;
        let m_max = reader.read_size("mMax")?;
        let n_channels = reader.read_int()?;
        let n_bases = reader.read_int()?;
        let _unused = reader.read_int_vec(3)?;
        let eta = reader.read_float()?;
        let _unused = reader.read_int_vec(4)?;

        // Only monochromatic and RGB tables with uniform material properties
        // are supported.
        if flags != 1 || (n_channels != 1 && n_channels != 3) || n_bases != 1 {
            return Err(FourierTableError::Unsupported {
                flags,
                channels: n_channels,
                bases: n_bases,
            });
        }

        let mu = reader.read_float_vec(n_mu)?;
        let cdf = reader.read_float_vec(n_mu * n_mu)?;
        let offset_and_length = reader.read_int_vec(n_mu * n_mu * 2)?;
        let a = reader.read_float_vec(n_coeffs)?;

        let mut pairs = Vec::with_capacity(n_mu * n_mu);
        for (offset, length) in offset_and_length.into_iter().tuples() {
            if offset < 0 || length < 0 {
                return Err(FourierTableError::InvalidDimension {
                    name: "offsetAndLength",
                    value: min(offset, length),
                });
            }
            pairs.push((offset as usize, length as usize));
        }

        Self::new(eta, m_max, n_channels as usize, mu, cdf, &pairs, a)
    }

    /// Returns the number of zenith knots.
    pub fn n_mu(&self) -> usize {
        self.mu.len()
    }

    /// Returns the order of the Fourier series for a pair of knots.
    ///
    /// * `offset_i` - Knot index for the incident direction.
    /// * `offset_o` - Knot index for the outgoing direction.
    pub fn get_m(&self, offset_i: usize, offset_o: usize) -> usize {
        self.m[offset_o * self.mu.len() + offset_i]
    }

    /// Returns the coefficients for a pair of knots; `m * n_channels` values.
    ///
    /// * `offset_i` - Knot index for the incident direction.
    /// * `offset_o` - Knot index for the outgoing direction.
    pub fn get_ak(&self, offset_i: usize, offset_o: usize) -> &[Float] {
        let idx = offset_o * self.mu.len() + offset_i;
        match self.m[idx] {
            0 => &[],
            m => {
                let start = self.a_offset[idx];
                &self.a[start..start + m * self.n_channels]
            }
        }
    }

    /// Returns Catmull-Rom weights and index offset for a zenith angle cosine.
    /// See `catmull_rom_weights()` for the boundary handling.
    ///
    /// * `cos_theta` - The zenith angle cosine to interpolate from `mu`.
    pub fn get_weights_and_offset(&self, cos_theta: Float) -> Option<([Float; 4], isize)> {
        catmull_rom_weights(&self.mu, cos_theta)
    }

    /// Blends the coefficients of the 4x4 knot neighbourhood of `(μi, μo)`.
    /// Returns the blended coefficients laid out as `channels x m_max` and the
    /// largest order that contributed.
    ///
    /// * `mu_i`       - Incident zenith angle cosine.
    /// * `mu_o`       - Outgoing zenith angle cosine.
    /// * `n_channels` - Number of channels to blend.
    pub fn interpolate_coefficients(
        &self,
        mu_i: Float,
        mu_o: Float,
        n_channels: usize,
    ) -> Option<(Vec<Float>, usize)> {
        let (weights_i, offset_i) = self.get_weights_and_offset(mu_i)?;
        let (weights_o, offset_o) = self.get_weights_and_offset(mu_o)?;

        let mut ak = vec![0.0; self.m_max * n_channels];
        let mut m_max = 0;
        for ((b, wo), (a, wi)) in weights_o
            .iter()
            .enumerate()
            .cartesian_product(weights_i.iter().enumerate())
        {
            let weight = wi * wo;
            if weight == 0.0 {
                continue;
            }
            let i = (offset_i + a as isize) as usize;
            let o = (offset_o + b as isize) as usize;
            let m = self.get_m(i, o);
            let ap = self.get_ak(i, o);
            m_max = max(m_max, m);
            for c in 0..n_channels {
                for k in 0..m {
                    ak[c * self.m_max + k] += weight * ap[c * m + k];
                }
            }
        }
        Some((ak, m_max))
    }
}

/// Returns an error if an array does not have the expected length.
fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), FourierTableError> {
    if expected == actual {
        Ok(())
    } else {
        Err(FourierTableError::LengthMismatch {
            name,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::{Cursor, Write};

    /// A monochromatic table with a constant series `c` for every pair over
    /// the knots [-1, 1].
    pub(crate) fn constant_table(c: Float, eta: Float) -> FourierBSDFTable {
        FourierBSDFTable::new(
            eta,
            1,
            1,
            vec![-1.0, 1.0],
            vec![0.0, 2.0 * c, 0.0, 2.0 * c],
            &[(0, 1), (1, 1), (2, 1), (3, 1)],
            vec![c; 4],
        )
        .unwrap()
    }

    /// Serializes a table in the `SCATFUN` layout.
    pub(crate) fn write_table<W: Write>(
        w: &mut W,
        n_channels: i32,
        eta: f32,
        m_max: i32,
        mu: &[f32],
        cdf: &[f32],
        offset_and_length: &[(i32, i32)],
        a: &[f32],
    ) -> std::io::Result<()> {
        w.write_all(&EXPECTED_HEADER)?;
        for v in [
            1,
            mu.len() as i32,
            a.len() as i32,
            m_max,
            n_channels,
            1,
            0,
            0,
            0,
        ] {
            w.write_i32::<LittleEndian>(v)?;
        }
        w.write_f32::<LittleEndian>(eta)?;
        for _ in 0..4 {
            w.write_i32::<LittleEndian>(0)?;
        }
        for v in mu.iter().chain(cdf.iter()) {
            w.write_f32::<LittleEndian>(*v)?;
        }
        for (offset, length) in offset_and_length {
            w.write_i32::<LittleEndian>(*offset)?;
            w.write_i32::<LittleEndian>(*length)?;
        }
        for v in a {
            w.write_f32::<LittleEndian>(*v)?;
        }
        Ok(())
    }

    const MU: [f32; 3] = [-1.0, 0.0, 1.0];
    const CDF: [f32; 9] = [0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0];

    fn pairs() -> Vec<(i32, i32)> {
        (0..9).map(|i| (2 * i, 2)).collect()
    }

    fn coefficients() -> Vec<f32> {
        (0..18).map(|i| if i % 2 == 0 { 1.0 } else { 0.25 }).collect()
    }

    #[test]
    fn reads_table_from_stream() {
        let mut bytes = vec![];
        write_table(&mut bytes, 1, 1.5, 2, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        let table = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(table.n_mu(), 3);
        assert_eq!(table.eta, 1.5);
        assert_eq!(table.m_max, 2);
        assert_eq!(table.get_m(1, 2), 2);
        assert_eq!(table.get_ak(1, 2), &[1.0, 0.25]);
        assert_eq!(table.a0, vec![1.0; 9]);
        assert_eq!(table.recip[1], 1.0);
    }

    #[test]
    fn reads_table_from_file() {
        let path = std::env::temp_dir().join(format!("scatter-core-{}.bsdf", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            write_table(&mut file, 1, 1.33, 2, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        }
        let table = FourierBSDFTable::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        let table = table.unwrap();
        assert_eq!(table.eta, 1.33);
        assert_eq!(table.a.len(), 18);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FourierBSDFTable::from_file("/nonexistent/table.bsdf").unwrap_err();
        assert!(matches!(err, FourierTableError::Io(_)));
    }

    #[test]
    fn truncated_stream_fails() {
        let mut bytes = vec![];
        write_table(&mut bytes, 1, 1.5, 2, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        bytes.truncate(bytes.len() - 4);
        let err = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FourierTableError::Io(_)));
    }

    #[test]
    fn unsupported_channel_count_fails() {
        let mut bytes = vec![];
        write_table(&mut bytes, 2, 1.5, 2, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        let err = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FourierTableError::Unsupported { channels: 2, .. }));
    }

    #[test]
    fn inconsistent_arrays_fail() {
        // Coefficients past the end of `a`.
        let mut bytes = vec![];
        let mut bad = pairs();
        bad[8] = (17, 2);
        write_table(&mut bytes, 1, 1.5, 2, &MU, &CDF, &bad, &coefficients()).unwrap();
        let err = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FourierTableError::CoefficientRange { i: 2, o: 2 }));

        // An empty series still needs an offset inside `a`.
        let mut bytes = vec![];
        let mut bad = pairs();
        bad[4] = (99, 0);
        write_table(&mut bytes, 1, 1.5, 2, &MU, &CDF, &bad, &coefficients()).unwrap();
        let err = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FourierTableError::CoefficientRange { i: 1, o: 1 }));

        // Order larger than `m_max`.
        let mut bytes = vec![];
        write_table(&mut bytes, 1, 1.5, 1, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        let err = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FourierTableError::OrderTooLarge { .. }));

        // Wrong cdf length.
        let err = FourierBSDFTable::new(
            1.0,
            1,
            1,
            vec![-1.0, 1.0],
            vec![0.0; 3],
            &[(0, 1); 4],
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FourierTableError::LengthMismatch { name: "cdf", expected: 4, actual: 3 }
        ));
    }

    #[test]
    fn empty_series_has_no_coefficients() {
        let table = FourierBSDFTable::new(
            1.0,
            1,
            1,
            vec![-1.0, 1.0],
            vec![0.0; 4],
            &[(0, 1), (1, 0), (0, 1), (0, 1)],
            vec![1.0],
        )
        .unwrap();
        assert_eq!(table.get_m(1, 0), 0);
        assert!(table.get_ak(1, 0).is_empty());
        assert_eq!(table.get_ak(0, 0), &[1.0]);
    }

    #[test]
    fn knots_must_increase() {
        let err = FourierBSDFTable::new(
            1.0,
            1,
            1,
            vec![0.5, -0.5],
            vec![0.0; 4],
            &[(0, 1); 4],
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(err, FourierTableError::KnotsNotMonotone));
    }

    #[test]
    fn cdf_rows_must_not_decrease() {
        let err = FourierBSDFTable::new(
            1.0,
            1,
            1,
            vec![-1.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.5],
            &[(0, 1); 4],
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(err, FourierTableError::CdfNotMonotone { row: 1 }));
    }

    #[test]
    fn weights_at_stored_knot() {
        let mut bytes = vec![];
        write_table(&mut bytes, 1, 1.5, 2, &MU, &CDF, &pairs(), &coefficients()).unwrap();
        let table = FourierBSDFTable::read(&mut Cursor::new(bytes)).unwrap();
        let (weights, offset) = table.get_weights_and_offset(0.0).unwrap();
        for (k, w) in weights.iter().enumerate() {
            if offset + k as isize == 1 {
                assert_eq!(*w, 1.0);
            } else {
                assert_eq!(*w, 0.0);
            }
        }
        assert!(table.get_weights_and_offset(1.5).is_none());
    }

    #[test]
    fn interpolated_coefficients_at_knots() {
        let table = constant_table(0.5, 1.0);
        let (ak, m_max) = table.interpolate_coefficients(0.3, -0.7, 1).unwrap();
        assert_eq!(m_max, 1);
        assert!((ak[0] - 0.5).abs() < 1e-6);
        assert!(table.interpolate_coefficients(2.0, 0.0, 1).is_none());
    }
}
