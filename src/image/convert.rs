//! Conversion of numeric pixel data to `u8`.
//!
//! A plain `as u8` cast wraps values above 255 around modulo 256. The
//! conversions here either saturate ([`Mode::Clip`]) or rescale the element
//! type's full range onto `[0, 255]` ([`Mode::Norm`]).

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::error::{Error, Result};

use super::{saturate_u8, Sample};

/// How out-of-range values are mapped into `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Round and saturate each value.
    #[default]
    Clip,
    /// Scale by `255 / (type_max - type_min)` of the element type, then clip.
    Norm,
}

impl Mode {
    /// Lowercase name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::Norm => "norm",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clip" => Ok(Self::Clip),
            "norm" => Ok(Self::Norm),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Convert an array to `u8` without wraparound.
///
/// The input is only borrowed; a new array of the same shape is returned.
///
/// # Errors
///
/// Returns [`Error::InvalidMode`] for [`Mode::Norm`] on a floating point
/// element type, which has no representable range to scale from.
pub fn to_uint8<S, A, D>(image: &ArrayBase<S, D>, mode: Mode) -> Result<Array<u8, D>>
where
    S: Data<Elem = A>,
    A: Sample,
    D: Dimension,
{
    let alpha = match mode {
        Mode::Clip => 1.0,
        Mode::Norm => {
            let (type_min, type_max) = A::type_range().ok_or_else(|| Error::InvalidMode {
                mode: format!("{mode} (requires an integer element type)"),
            })?;
            255.0 / (type_max - type_min)
        }
    };

    tracing::debug!("Converting {:?} array to u8 with mode {mode}", image.shape());

    Ok(image.mapv(|v| saturate_u8(v.to_f64() * alpha)))
}

/// Like [`to_uint8`], parsing the mode from a string first.
///
/// # Errors
///
/// Returns [`Error::InvalidMode`] if `mode` is neither `clip` nor `norm`
/// (case-insensitive), or under the same conditions as [`to_uint8`].
pub fn to_uint8_str<S, A, D>(image: &ArrayBase<S, D>, mode: &str) -> Result<Array<u8, D>>
where
    S: Data<Elem = A>,
    A: Sample,
    D: Dimension,
{
    to_uint8(image, mode.parse()?)
}
