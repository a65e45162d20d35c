//! Blocking image display with an optional caption.

use ndarray::{s, ArrayBase, ArrayView2, ArrayView3, Axis, Data, Dimension, Ix2, Ix3};

use crate::error::{Error, Result};

use super::{saturate_u8, Sample};

/// An 8-bit RGB rendering of an array, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    rgb: Vec<u8>,
    caption: String,
}

impl Frame {
    /// Compose a frame from a 2D grayscale or 3D channel-last array.
    ///
    /// Grayscale data (2D, or 3D with one channel) is stretched from its
    /// minimum and maximum onto `[0, 255]`. Color data (3 or 4 channels,
    /// alpha ignored) is clipped to `[0, 255]` for integer elements and
    /// treated as `[0, 1]` intensities for floating point elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedShape`] for empty arrays and for any
    /// other rank or channel count.
    pub fn from_array<S, A, D>(image: &ArrayBase<S, D>, caption: &str) -> Result<Self>
    where
        S: Data<Elem = A>,
        A: Sample,
        D: Dimension,
    {
        let shape = image.shape().to_vec();
        let unsupported = |reason: &str| Error::UnsupportedShape {
            shape: shape.clone(),
            reason: reason.to_string(),
        };

        if shape.len() >= 2 && (shape[0] == 0 || shape[1] == 0) {
            return Err(unsupported("image is empty"));
        }

        let view = image.view().into_dyn();
        let rgb = match shape.as_slice() {
            [_, _] => gray_pixels(
                view.into_dimensionality::<Ix2>()
                    .map_err(|err| unsupported(&err.to_string()))?,
            ),
            [_, _, 1] => gray_pixels(
                view.into_dimensionality::<Ix3>()
                    .map_err(|err| unsupported(&err.to_string()))?
                    .index_axis_move(Axis(2), 0),
            ),
            [_, _, 3 | 4] => color_pixels(
                view.into_dimensionality::<Ix3>()
                    .map_err(|err| unsupported(&err.to_string()))?,
            ),
            [_, _, _] => return Err(unsupported("expected 1, 3 or 4 channels")),
            _ => return Err(unsupported("expected a 2D or 3D channel-last array")),
        };

        Ok(Self {
            width: shape[1],
            height: shape[0],
            rgb,
            caption: caption.to_string(),
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Interleaved RGB bytes in row-major order.
    #[must_use]
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Caption text, empty when none.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// RGB value at (x, y), or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        self.rgb.get(i..i + 3).map(|px| [px[0], px[1], px[2]])
    }
}

/// Stretch a grayscale view onto `[0, 255]` and replicate into RGB.
fn gray_pixels<A: Sample>(view: ArrayView2<'_, A>) -> Vec<u8> {
    let (lo, hi) = view
        .iter()
        .map(|v| v.to_f64())
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;

    view.iter()
        .flat_map(|v| {
            let g = if range > 0.0 {
                saturate_u8((v.to_f64() - lo) / range * 255.0)
            } else {
                0
            };
            [g, g, g]
        })
        .collect()
}

/// Take the first three channels of a channel-last view as RGB.
fn color_pixels<A: Sample>(view: ArrayView3<'_, A>) -> Vec<u8> {
    let scale = if A::is_integer() { 1.0 } else { 255.0 };

    view.slice(s![.., .., ..3])
        .iter()
        .map(|v| saturate_u8(v.to_f64() * scale))
        .collect()
}

/// Something a [`Frame`] can be shown on.
pub trait Surface {
    /// Show the frame, returning once the viewer has been dismissed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the frame cannot be shown.
    fn show(&mut self, frame: &Frame) -> Result<()>;
}

/// Render `image` with `caption` on the given surface.
///
/// # Errors
///
/// Returns an error if the array has an unsupported shape or the surface
/// fails.
pub fn plot_image_on<T, S, A, D>(surface: &mut T, image: &ArrayBase<S, D>, caption: &str) -> Result<()>
where
    T: Surface + ?Sized,
    S: Data<Elem = A>,
    A: Sample,
    D: Dimension,
{
    let frame = Frame::from_array(image, caption)?;
    tracing::debug!(
        "Showing {}x{} frame with caption {:?}",
        frame.width(),
        frame.height(),
        frame.caption()
    );
    surface.show(&frame)
}

/// Show `image` in a native window, blocking until it is closed.
///
/// A non-empty `caption` is drawn in white near the bottom-right corner.
///
/// # Errors
///
/// Returns an error if the array has an unsupported shape or the window
/// cannot be opened.
#[cfg(feature = "viewer")]
pub fn plot_image<S, A, D>(image: &ArrayBase<S, D>, caption: &str) -> Result<()>
where
    S: Data<Elem = A>,
    A: Sample,
    D: Dimension,
{
    plot_image_on(&mut Window::default(), image, caption)
}

#[cfg(feature = "viewer")]
pub use window::Window;

#[cfg(feature = "viewer")]
mod window {
    use eframe::egui;

    use super::{Frame, Surface};
    use crate::error::{Error, Result};

    /// Relative caption anchor, measured from the image's left and bottom edges.
    const CAPTION_ANCHOR: (f32, f32) = (0.95, 0.05);
    const CAPTION_SIZE: f32 = 14.0;

    /// Native window backed by `eframe`.
    #[derive(Debug, Clone)]
    pub struct Window {
        title: String,
    }

    impl Default for Window {
        fn default() -> Self {
            Self::with_title("cvutils")
        }
    }

    impl Window {
        /// Create a window with the given title.
        #[must_use]
        pub fn with_title(title: impl Into<String>) -> Self {
            Self {
                title: title.into(),
            }
        }
    }

    impl Surface for Window {
        #[allow(clippy::cast_precision_loss)]
        fn show(&mut self, frame: &Frame) -> Result<()> {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_title(self.title.clone())
                    .with_inner_size([frame.width() as f32, frame.height() as f32]),
                ..Default::default()
            };

            let frame = frame.clone();
            eframe::run_native(
                &self.title,
                options,
                Box::new(move |_cc| Box::new(Viewer::new(frame))),
            )
            .map_err(|err| Error::Display {
                reason: err.to_string(),
            })
        }
    }

    struct Viewer {
        frame: Frame,
        texture: Option<egui::TextureHandle>,
    }

    impl Viewer {
        const fn new(frame: Frame) -> Self {
            Self {
                frame,
                texture: None,
            }
        }
    }

    impl eframe::App for Viewer {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            let frame = &self.frame;
            let texture = self.texture.get_or_insert_with(|| {
                ctx.load_texture(
                    "image",
                    egui::ColorImage::from_rgb([frame.width(), frame.height()], frame.rgb()),
                    egui::TextureOptions::NEAREST,
                )
            });

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let image = egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                        texture,
                    ))
                    .shrink_to_fit();
                    let rect = ui.add(image).rect;

                    if !frame.caption().is_empty() {
                        let pos = egui::pos2(
                            rect.left() + CAPTION_ANCHOR.0 * rect.width(),
                            rect.bottom() - CAPTION_ANCHOR.1 * rect.height(),
                        );
                        ui.painter().text(
                            pos,
                            egui::Align2::RIGHT_CENTER,
                            frame.caption(),
                            egui::FontId::proportional(CAPTION_SIZE),
                            egui::Color32::WHITE,
                        );
                    }
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2, Array3};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
    }

    impl Surface for Recorder {
        fn show(&mut self, frame: &Frame) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    #[test]
    fn test_plot_gray_does_not_fail() {
        let mut surface = Recorder::default();
        let image = Array2::<f64>::from_shape_fn((4, 6), |(y, x)| (y * 6 + x) as f64);
        plot_image_on(&mut surface, &image, "frame 1").unwrap();

        let frame = &surface.frames[0];
        assert_eq!((frame.width(), frame.height()), (6, 4));
        assert_eq!(frame.caption(), "frame 1");
        assert_eq!(frame.rgb().len(), 6 * 4 * 3);
    }

    #[test]
    fn test_gray_is_stretched() {
        let frame = Frame::from_array(&arr2(&[[10u16, 20], [30, 40]]), "").unwrap();
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(frame.pixel(1, 0), Some([85, 85, 85]));
        assert_eq!(frame.pixel(1, 1), Some([255, 255, 255]));
        assert!(frame.caption().is_empty());
    }

    #[test]
    fn test_pixel_outside_frame() {
        let frame = Frame::from_array(&Array2::<u8>::zeros((2, 3)), "").unwrap();
        assert_eq!(frame.pixel(2, 1), Some([0, 0, 0]));
        assert_eq!(frame.pixel(3, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
        assert_eq!(frame.pixel(usize::MAX, 0), None);
    }

    #[test]
    fn test_constant_gray_is_black() {
        let frame = Frame::from_array(&Array2::<u8>::from_elem((2, 2), 77), "").unwrap();
        assert!(frame.rgb().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_single_channel_matches_gray() {
        let gray = arr2(&[[0u8, 255], [128, 64]]);
        let single = gray.clone().insert_axis(Axis(2));
        let a = Frame::from_array(&gray, "x").unwrap();
        let b = Frame::from_array(&single, "x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_float_color_is_unit_range() {
        let mut image = Array3::<f32>::zeros((1, 2, 3));
        image[[0, 0, 0]] = 1.0;
        image[[0, 1, 1]] = 0.5;
        image[[0, 1, 2]] = 2.0;
        let frame = Frame::from_array(&image, "").unwrap();
        assert_eq!(frame.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(frame.pixel(1, 0), Some([0, 128, 255]));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let mut image = Array3::<u16>::zeros((1, 1, 4));
        image[[0, 0, 0]] = 300;
        image[[0, 0, 1]] = 12;
        image[[0, 0, 3]] = 255;
        let frame = Frame::from_array(&image, "").unwrap();
        assert_eq!(frame.pixel(0, 0), Some([255, 12, 0]));
        assert_eq!(frame.rgb().len(), 3);
    }

    #[test]
    fn test_unsupported_shapes() {
        let two_channel = Array3::<u8>::zeros((2, 2, 2));
        assert!(matches!(
            Frame::from_array(&two_channel, ""),
            Err(Error::UnsupportedShape { .. })
        ));

        let flat = ndarray::arr1(&[1u8, 2, 3]);
        assert!(matches!(
            Frame::from_array(&flat, ""),
            Err(Error::UnsupportedShape { .. })
        ));

        let empty = Array2::<u8>::zeros((0, 3));
        let mut surface = Recorder::default();
        assert!(plot_image_on(&mut surface, &empty, "").is_err());
        assert!(surface.frames.is_empty());
    }
}
