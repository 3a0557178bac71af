//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 1 << 0;
        const BSDF_TRANSMISSION = 1 << 1;
        const BSDF_DIFFUSE = 1 << 2;
        const BSDF_GLOSSY = 1 << 3;
        const BSDF_SPECULAR = 1 << 4;
        const BSDF_ALL = Self::BSDF_REFLECTION.bits()
            | Self::BSDF_TRANSMISSION.bits()
            | Self::BSDF_DIFFUSE.bits()
            | Self::BSDF_GLOSSY.bits()
            | Self::BSDF_SPECULAR.bits();
    }
}

impl Default for BxDFType {
    /// Returns an empty set of flags.
    fn default() -> Self {
        Self::empty()
    }
}

impl BxDFType {
    /// Returns `true` if the lobe samples a Dirac distribution.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_union_of_every_flag() {
        let t = BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE;
        assert!(BxDFType::BSDF_ALL.contains(t));
        assert!(!t.is_specular());
        assert!((BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR).is_specular());
        assert_eq!(BxDFType::default(), BxDFType::empty());
    }
}
