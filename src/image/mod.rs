//! Image conversion, loading, and display utilities.

mod convert;
mod display;
mod load;

pub use convert::{to_uint8, to_uint8_str, Mode};
#[cfg(feature = "viewer")]
pub use display::{plot_image, Window};
pub use display::{plot_image_on, Frame, Surface};
pub use load::{
    get_images_from_dir, get_images_from_dir_with_rng, is_image_file, list_image_files,
    load_grayscale, LoadConfig,
};

use ndarray::Array2;

/// Single-channel 8-bit image in (height, width) layout.
pub type GrayArray = Array2<u8>;

/// File extensions (lowercase, without the dot) recognised as images.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["bmp", "jpeg", "jpg", "png", "tif", "tiff"];

/// Numeric pixel element.
///
/// Integer types report their representable range; floating point types
/// have none, which is what makes [`Mode::Norm`] reject them.
pub trait Sample: Copy {
    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// `(MIN, MAX)` of the element type, or `None` for floating point.
    fn type_range() -> Option<(f64, f64)>;

    /// Whether the type is an integer type.
    #[must_use]
    fn is_integer() -> bool {
        Self::type_range().is_some()
    }
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn type_range() -> Option<(f64, f64)> {
                    Some((<$t>::MIN as f64, <$t>::MAX as f64))
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, u32, u64, i8, i16, i32, i64);

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn type_range() -> Option<(f64, f64)> {
        None
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn type_range() -> Option<(f64, f64)> {
        None
    }
}

/// Round to nearest (ties to even) and saturate into `[0, 255]`.
///
/// NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn saturate_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // Safe: clamped to [0, 255] range before casting
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
