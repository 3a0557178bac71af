//! Fourier Basis BSDF Model

use super::*;
use crate::interpolation::*;
use crate::material::TransportMode;
use crate::rng::ONE_MINUS_EPSILON;
use bumpalo::Bump;
use std::fmt;

/// BSDF for measured or precomputed materials stored as Fourier series over
/// the azimuth difference between the two directions.
#[derive(Copy, Clone)]
pub struct FourierBSDF<'arena> {
    /// The BSDF data.
    table: &'arena FourierBSDFTable,

    /// Indicates whether incident ray started from a light source or from camera.
    mode: TransportMode,
}

impl<'arena> FourierBSDF<'arena> {
    /// Create a new instance of `FourierBSDF`.
    ///
    /// * `table` - The BSDF data.
    /// * `mode`  - Transport mode.
    pub fn new(table: &'arena FourierBSDFTable, mode: TransportMode) -> Self {
        Self { table, mode }
    }

    /// Allocate a new instance of `FourierBSDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `table` - The BSDF data.
    /// * `mode`  - Transport mode.
    pub fn alloc(
        arena: &'arena Bump,
        table: &'arena FourierBSDFTable,
        mode: TransportMode,
    ) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::FourierBSDF(Self::new(table, mode)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_GLOSSY
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        // Find the zenith angle cosines and azimuth difference angle.
        let mu_i = cos_theta(&(-*wi));
        let mu_o = cos_theta(wo);
        let cos_phi = cos_d_phi(&(-*wi), wo) as f64;

        let n_channels = self.table.n_channels;
        let (ak, m_max) = match self.table.interpolate_coefficients(mu_i, mu_o, n_channels) {
            Some(coefficients) => coefficients,
            None => return Spectrum::ZERO,
        };

        // Evaluate Fourier expansion for angle φ.
        let y = max(0.0, fourier(&ak[0..m_max], cos_phi));
        self.spectrum(&ak, m_max, y, cos_phi, self.scale(mu_i, mu_o))
    }

    /// Samples μi from the tabulated `a0` marginal and φ from the
    /// interpolated luminance series.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        // Sample zenith angle component.
        let mu_o = cos_theta(wo);
        let zenith = match sample_catmull_rom_2d(
            &self.table.mu,
            &self.table.mu,
            &self.table.a0,
            &self.table.cdf,
            mu_o,
            u[1],
        ) {
            Some(zenith) => zenith,
            None => return BxDFSample::from(self.get_type()),
        };
        let mu_i = zenith.x;

        let n_channels = self.table.n_channels;
        let (ak, m_max) = match self.table.interpolate_coefficients(mu_i, mu_o, n_channels) {
            Some((ak, m_max)) if m_max > 0 && ak[0] > 0.0 => (ak, m_max),
            _ => return BxDFSample::from(self.get_type()),
        };

        // Importance sample the luminance Fourier expansion.
        let azimuth = sample_fourier(&ak[0..m_max], &self.table.recip, min(u[0], ONE_MINUS_EPSILON));
        let pdf_phi = if azimuth.pdf.is_nan() { 0.0 } else { azimuth.pdf };
        let pdf = max(0.0, pdf_phi * zenith.pdf);

        // Compute the scattered direction; `wi` points into the opposite
        // zenith of `mu_i`.
        let sin_2_theta_i = max(0.0, 1.0 - mu_i * mu_i);
        let mut norm = (sin_2_theta_i / sin_2_theta(wo)).sqrt();
        if !norm.is_finite() {
            norm = 0.0;
        }
        let sin_phi = sin(azimuth.phi);
        let cos_phi = cos(azimuth.phi);
        let wi = -Vector3f::new(
            norm * (cos_phi * wo.x - sin_phi * wo.y),
            norm * (sin_phi * wo.x + cos_phi * wo.y),
            mu_i,
        );

        // Renormalize to keep rounding error from compounding across bounces.
        let wi = wi.normalize();

        let f = self.spectrum(&ak, m_max, azimuth.f, cos_phi as f64, self.scale(mu_i, mu_o));
        BxDFSample::new(f, pdf, wi, self.get_type())
    }

    /// Evaluates the PDF of `sample_f()`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        let mu_i = cos_theta(&(-*wi));
        let mu_o = cos_theta(wo);
        let cos_phi = cos_d_phi(&(-*wi), wo) as f64;

        // Luminance coefficients only.
        let (ak, m_max) = match self.table.interpolate_coefficients(mu_i, mu_o, 1) {
            Some(coefficients) => coefficients,
            None => return 0.0,
        };

        // Total integral of the `a0` row for `mu_o`.
        let (weights_o, offset_o) = match self.table.get_weights_and_offset(mu_o) {
            Some(weights) => weights,
            None => return 0.0,
        };
        let n_mu = self.table.n_mu();
        let rho: Float = weights_o
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(o, w)| {
                let row = (offset_o + o as isize) as usize;
                w * self.table.cdf[row * n_mu + n_mu - 1] * TWO_PI
            })
            .sum();

        let y = fourier(&ak[0..m_max], cos_phi);
        if rho > 0.0 && y > 0.0 {
            y / rho
        } else {
            0.0
        }
    }

    /// Returns the 1/|μi| factor, including the η² correction for radiance
    /// transport through the boundary.
    fn scale(&self, mu_i: Float, mu_o: Float) -> Float {
        let mut scale = if mu_i != 0.0 { 1.0 / abs(mu_i) } else { 0.0 };
        if self.mode == TransportMode::Radiance && mu_i * mu_o > 0.0 {
            let eta = if mu_i > 0.0 {
                1.0 / self.table.eta
            } else {
                self.table.eta
            };
            scale *= eta * eta;
        }
        scale
    }

    /// Converts evaluated luminance and the red/blue series into a spectrum.
    fn spectrum(&self, ak: &[Float], m_max: usize, y: Float, cos_phi: f64, scale: Float) -> Spectrum {
        if self.table.n_channels == 1 {
            Spectrum::new(y * scale)
        } else {
            let stride = self.table.m_max;
            let r = fourier(&ak[stride..stride + m_max], cos_phi);
            let b = fourier(&ak[2 * stride..2 * stride + m_max], cos_phi);
            let g = 1.39829 * y - 0.100913 * b - 0.297375 * r;
            Spectrum::from_rgb(&[r * scale, g * scale, b * scale]).clamp_default()
        }
    }
}

impl<'arena> fmt::Display for FourierBSDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FourierBSDF {{ eta: {}, n_mu: {}, mode: {} }}",
            self.table.eta,
            self.table.n_mu(),
            self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::fourier_bsdf_table::tests::constant_table;
    use crate::rng::RNG;
    use float_cmp::approx_eq;

    #[test]
    fn constant_table_samples_uniform_sphere() {
        let table = constant_table(0.5, 1.0);
        let bxdf = FourierBSDF::new(&table, TransportMode::Importance);
        let wo = Vector3f::new(0.3, -0.2, 0.8).normalize();
        let mut rng = RNG::default();
        for _ in 0..64 {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let sample = bxdf.sample_f(&wo, &u);
            assert!(approx_eq!(Float, sample.pdf, INV_FOUR_PI, epsilon = 1e-4));
            assert!(approx_eq!(Float, sample.wi.length(), 1.0, epsilon = 1e-4));
            assert!(approx_eq!(Float, bxdf.pdf(&wo, &sample.wi), sample.pdf, epsilon = 1e-4));
            let expected = 0.5 / abs_cos_theta(&sample.wi);
            assert!(approx_eq!(Float, sample.f[0], expected, epsilon = 1e-2 * expected));
        }
    }

    #[test]
    fn evaluation_is_consistent_with_sampling() {
        let table = constant_table(0.25, 1.0);
        let bxdf = FourierBSDF::new(&table, TransportMode::Importance);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.3, 0.7));
        let f = bxdf.f(&wo, &sample.wi);
        assert!(approx_eq!(Float, f[0], sample.f[0], epsilon = 1e-3 * f[0]));
    }

    #[test]
    fn radiance_mode_scales_by_eta() {
        let table = constant_table(0.5, 1.5);
        let importance = FourierBSDF::new(&table, TransportMode::Importance);
        let radiance = FourierBSDF::new(&table, TransportMode::Radiance);

        // Transmission: `wi` below the surface while `wo` is above, so
        // μi = cos θ(-wi) > 0 shares the sign of μo.
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.0, 0.6, -0.8);
        let ratio = radiance.f(&wo, &wi)[0] / importance.f(&wo, &wi)[0];
        assert!(approx_eq!(Float, ratio, 1.0 / (1.5 * 1.5), epsilon = 1e-4));

        // Reflection: no scaling.
        let wi = Vector3f::new(0.0, 0.6, 0.8);
        assert_eq!(radiance.f(&wo, &wi), importance.f(&wo, &wi));
    }

    #[test]
    fn directions_outside_table_are_zero() {
        let table = FourierBSDFTable::new(
            1.0,
            1,
            1,
            vec![0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
            &[(0, 1), (1, 1), (2, 1), (3, 1)],
            vec![1.0; 4],
        )
        .unwrap();
        let bxdf = FourierBSDF::new(&table, TransportMode::Radiance);
        let wo = Vector3f::new(0.0, 0.0, -1.0);
        let wi = Vector3f::new(0.0, 0.0, 1.0);
        assert!(bxdf.f(&wo, &wi).is_black());
        assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
        assert_eq!(bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5)).pdf, 0.0);
    }
}
