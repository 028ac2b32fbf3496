use crate::error::Error;
use image::RgbaImage;

/// The render target: an RGBA pixel buffer and a same-sized depth buffer.
///
/// The logical size is `width x height`; the buffers are allocated at the
/// render resolution, which is the logical size scaled by `quality` (a cheap
/// way to trade sharpness for speed without touching the presentation
/// surface). The depth buffer holds the perpendicular distance, in world
/// units, from the camera plane to the surface that produced each pixel; it
/// is what arbitrates between the render passes.
#[derive(Debug, Clone)]
pub struct Screen {
    width: u32,
    height: u32,
    quality: f64,
    render_width: usize,
    render_height: usize,
    aspect: f64,
    pixels: Vec<u8>,
    depth: Vec<f64>,
}

impl Screen {
    /// Fails on non-positive dimensions or a quality outside (0, 1].
    pub fn new(width: u32, height: u32, quality: f64) -> Result<Screen, Error> {
        if width == 0 || height == 0 {
            return Err(Error::ScreenSize { width, height });
        }
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(Error::Quality(quality));
        }

        let render_width = ((width as f64 * quality).round() as usize).max(1);
        let render_height = ((height as f64 * quality).round() as usize).max(1);

        Ok(Screen {
            width,
            height,
            quality,
            render_width,
            render_height,
            aspect: render_width as f64 / render_height as f64,
            pixels: vec![0; 4 * render_width * render_height],
            depth: vec![f64::INFINITY; render_width * render_height],
        })
    }

    /// Resets every pixel byte to 0 and every depth entry to infinity.
    /// Callers are responsible for clearing between frames.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.depth.fill(f64::INFINITY);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn render_width(&self) -> usize {
        self.render_width
    }

    pub fn render_height(&self) -> usize {
        self.render_height
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// The RGBA byte array, row-major with top-left origin, one frame's
    /// output surface. Length is `4 * render_width * render_height`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The depth buffer, exposed so callers can extend the pipeline or
    /// inspect occlusion decisions.
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    /// Both buffers at once, for passes that interleave pixel writes with
    /// depth updates.
    pub(crate) fn buffers_mut(&mut self) -> (&mut [u8], &mut [f64]) {
        (&mut self.pixels, &mut self.depth)
    }

    /// Hands the frame over as an owned image, the seam to the presentation
    /// surface (which this crate treats as an external collaborator).
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(
            self.render_width as u32,
            self.render_height as u32,
            self.pixels.clone(),
        )
        .expect("pixel buffer length matches the render dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_is_validated() {
        assert!(matches!(
            Screen::new(0, 10, 1.0),
            Err(Error::ScreenSize { .. })
        ));
        assert!(matches!(Screen::new(10, 10, 0.0), Err(Error::Quality(_))));
        assert!(matches!(Screen::new(10, 10, 1.5), Err(Error::Quality(_))));
        assert!(matches!(
            Screen::new(10, 10, f64::NAN),
            Err(Error::Quality(_))
        ));
    }

    #[test]
    fn quality_scales_render_dimensions() {
        let screen = Screen::new(100, 50, 0.5).unwrap();
        assert_eq!(screen.render_width(), 50);
        assert_eq!(screen.render_height(), 25);
        assert_eq!(screen.aspect(), 2.0);
        assert_eq!(screen.pixels().len(), 4 * 50 * 25);
        assert_eq!(screen.depth().len(), 50 * 25);

        // Rounding never produces a zero-sized buffer.
        let tiny = Screen::new(1, 1, 0.1).unwrap();
        assert_eq!(tiny.render_width(), 1);
        assert_eq!(tiny.render_height(), 1);
    }

    #[test]
    fn clear_resets_pixels_and_depth() {
        let mut screen = Screen::new(4, 4, 1.0).unwrap();
        {
            let (pixels, depth) = screen.buffers_mut();
            pixels[0] = 200;
            depth[3] = 1.25;
        }
        screen.clear();
        assert!(screen.pixels().iter().all(|&b| b == 0));
        assert!(screen.depth().iter().all(|&d| d == f64::INFINITY));
    }
}
