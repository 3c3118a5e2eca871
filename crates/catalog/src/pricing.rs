//! Deterministic gem pricing.
//!
//! `price = base(kind) * clarity_multiplier * size³ [* color_multiplier]`,
//! where the color multiplier applies to diamonds only. Pure arithmetic with
//! no rounding; callers round if they need to.

use gemforge_core::DomainError;

use crate::gem::{GemClarity, GemColor, GemProperties, GemType};

/// Base price per kind.
fn base(kind: GemType) -> f64 {
    match kind {
        GemType::Diamond => 1000.0,
        GemType::Ruby => 400.0,
        GemType::Emerald => 650.0,
    }
}

impl GemClarity {
    /// Pricing multiplier for this clarity grade.
    ///
    /// Grade 2 (VS) is the 1.0 baseline.
    pub fn multiplier(&self) -> f64 {
        match self {
            GemClarity::Si => 0.75,
            GemClarity::Vs => 1.0,
            GemClarity::Vvs => 1.25,
            GemClarity::Fl => 1.5,
        }
    }
}

impl GemColor {
    /// Pricing multiplier for this color grade (diamonds only).
    pub fn multiplier(&self) -> f64 {
        match self {
            GemColor::D => 1.8,
            GemColor::E => 1.6,
            GemColor::G => 1.4,
            GemColor::F => 1.2,
            GemColor::H => 1.0,
            GemColor::I => 0.8,
        }
    }
}

/// Compute the price of a gem from its kind and properties.
///
/// Deterministic and side-effect free. Fails only on invalid properties
/// (non-positive size, or a diamond without a color grade).
pub fn price(kind: GemType, properties: &GemProperties) -> Result<f64, DomainError> {
    properties.validate(kind)?;

    let mut price = base(kind) * properties.clarity.multiplier();
    price *= properties.size.powi(3);

    if kind == GemType::Diamond {
        // validate() guarantees the color is present here.
        if let Some(color) = properties.color {
            price *= color.multiplier();
        }
    }

    Ok(price)
}
