//! # cvutils
//!
//! Small, stateless helpers for image-centric numeric work:
//!
//! - [`to_uint8`]: convert pixel data to `u8` by saturating or by rescaling
//!   the element type's range, never by wrapping.
//! - [`rolling_average`]: "valid"-mode moving average.
//! - [`plot_image`]: show an array in a window with an optional caption.
//! - [`get_images_from_dir`]: load every image in a directory as grayscale.
//!
//! ## Example
//!
//! ```no_run
//! use cvutils::{get_images_from_dir, to_uint8, LoadConfig, Mode};
//!
//! # fn main() -> cvutils::Result<()> {
//! let config = LoadConfig {
//!     max_count: Some(10),
//!     shuffle: true,
//!     seed: Some(7),
//! };
//! let images = get_images_from_dir("frames", &config)?;
//!
//! for image in &images {
//!     let scaled = image.mapv(|v| u32::from(v) * 300);
//!     let clipped = to_uint8(&scaled, Mode::Clip)?;
//!     assert_eq!(clipped.dim(), image.dim());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod series;

pub use error::{Error, Result};
#[cfg(feature = "viewer")]
pub use self::image::plot_image;
pub use self::image::{
    get_images_from_dir, get_images_from_dir_with_rng, plot_image_on, to_uint8, Frame, GrayArray,
    LoadConfig, Mode, Sample, Surface,
};
pub use series::rolling_average;
