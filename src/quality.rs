//! Acquisition modalities and the pixel skip predicate.
//!
//! Each modality records a different per-pixel quality field, but every
//! field uses NaN for "not indexed". The ISR sweep only sees the
//! `QualityFilter` capability, so new modalities never touch the kernel.

use std::fmt;
use std::str::FromStr;

use crate::util::IsrError;

/// Decides whether a comparison pixel is excluded from matching.
pub trait QualityFilter {
    /// Returns true if the pixel with this quality value must be skipped.
    fn is_missing(&self, quality: f32) -> bool;
}

impl<F> QualityFilter for F
where
    F: Fn(f32) -> bool,
{
    fn is_missing(&self, quality: f32) -> bool {
        self(quality)
    }
}

/// Quality field recorded by an acquisition modality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityField {
    ConfidenceIndex,
    DotProduct,
    MeanAngularError,
}

impl QualityField {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityField::ConfidenceIndex => "ci",
            QualityField::DotProduct => "dp",
            QualityField::MeanAngularError => "mae",
        }
    }
}

/// Source of a scan, which selects the quality field that gets checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Modality {
    /// TSL/EDAX `.ang` export.
    #[default]
    Ang,
    /// EMsoft dictionary indexing.
    Emsoft,
    /// AstroEBSD.
    Astro,
    /// TSL `.osc` converted to columnar text.
    Osc,
}

impl Modality {
    pub const ALL: [Modality; 4] = [
        Modality::Ang,
        Modality::Emsoft,
        Modality::Astro,
        Modality::Osc,
    ];

    pub fn quality_field(self) -> QualityField {
        match self {
            Modality::Ang | Modality::Osc => QualityField::ConfidenceIndex,
            Modality::Emsoft => QualityField::DotProduct,
            Modality::Astro => QualityField::MeanAngularError,
        }
    }

    /// Zero-based column of the quality field in columnar scan text.
    ///
    /// Columns are `phi1 Phi phi2 x y <iq> <quality> ...`.
    pub fn default_quality_column(self) -> usize {
        match self {
            Modality::Ang | Modality::Osc => 6,
            Modality::Emsoft | Modality::Astro => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Ang => "ang",
            Modality::Emsoft => "emsoft",
            Modality::Astro => "astro",
            Modality::Osc => "osc",
        }
    }
}

impl QualityFilter for Modality {
    fn is_missing(&self, quality: f32) -> bool {
        quality.is_nan()
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = IsrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ang" => Ok(Modality::Ang),
            "emsoft" => Ok(Modality::Emsoft),
            "astro" => Ok(Modality::Astro),
            "osc" => Ok(Modality::Osc),
            other => Err(IsrError::config(format!(
                "unknown modality `{other}` (expected ang, emsoft, astro, or osc)"
            ))),
        }
    }
}
