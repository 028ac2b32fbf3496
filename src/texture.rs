use crate::color::Color;
use crate::error::Error;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// An immutable RGBA raster. A texture starts out unloaded and renders as its
/// `temporary_color` until the host publishes pixel data; the transition from
/// unloaded to loaded happens at most once, and the `loaded` flag acts as the
/// publish barrier (the renderer samples it once per decision site, so a
/// mid-frame transition produces valid output either way).
#[derive(Debug, Clone)]
pub struct Texture {
    source: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    loaded: bool,
    temporary_color: Color,
}

impl Texture {
    /// An unloaded texture that renders as `temporary_color` until
    /// [`Texture::load_raster`] publishes pixels for it.
    pub fn placeholder(source: &str, temporary_color: Color) -> Texture {
        Texture {
            source: source.to_string(),
            width: 0,
            height: 0,
            pixels: Vec::new(),
            loaded: false,
            temporary_color,
        }
    }

    /// A loaded texture over a row-major RGBA byte array with top-left
    /// origin. Fails when the dimensions are non-positive or the raster
    /// length does not equal `4 * width * height`.
    pub fn from_raster(
        source: &str,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Texture, Error> {
        if width == 0 || height == 0 {
            return Err(Error::TextureDimensions { width, height });
        }
        if pixels.len() != 4 * width as usize * height as usize {
            return Err(Error::TextureRaster {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Texture {
            source: source.to_string(),
            width,
            height,
            pixels,
            loaded: true,
            temporary_color: Color::MAGENTA,
        })
    }

    /// Decodes an image file into a loaded texture.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Texture, Error> {
        let path = path.as_ref();
        let raster = image::open(path)?.to_rgba8();
        let (width, height) = raster.dimensions();
        debug!("loaded texture {} ({width}x{height})", path.display());
        Texture::from_raster(&path.to_string_lossy(), width, height, raster.into_raw())
    }

    /// Publishes pixel data for a placeholder texture. A second load attempt
    /// is an error; loaded textures are immutable.
    pub fn load_raster(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), Error> {
        if self.loaded {
            return Err(Error::AlreadyLoaded(self.source.clone()));
        }
        let loaded = Texture::from_raster(&self.source, width, height, pixels)?;
        self.width = loaded.width;
        self.height = loaded.height;
        self.pixels = loaded.pixels;
        self.loaded = true;
        Ok(())
    }

    /// The shared fallback raster substituted for textures that failed to
    /// load: a 2x2 magenta and black checkerboard.
    pub fn missing() -> Arc<Texture> {
        static MISSING: Lazy<Arc<Texture>> = Lazy::new(|| {
            let (m, k) = (Color::MAGENTA, Color::BLACK);
            let pixels = [m, k, k, m]
                .iter()
                .flat_map(|c| [c.r, c.g, c.b, c.a])
                .collect();
            Arc::new(
                Texture::from_raster("missing", 2, 2, pixels)
                    .expect("missing-texture raster is well formed"),
            )
        });
        MISSING.clone()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn temporary_color(&self) -> Color {
        self.temporary_color
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The four RGBA bytes of the texel at (x, y).
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height);
        let index = 4 * (y as usize * self.width as usize + x as usize);
        &self.pixels[index..index + 4]
    }
}

/// What a wall cell, plane or sprite looks like: a solid color or a texture.
/// The renderer branches on the variant once per column or row, keeping the
/// per-pixel loop monomorphic.
#[derive(Debug, Clone)]
pub enum Appearance {
    Color(Color),
    Texture(Arc<Texture>),
}

impl Appearance {
    /// Opens a texture appearance from an image file, degrading to the given
    /// fallback color when decoding fails. The failure is reported on the
    /// texture itself; rendering continues with the fallback.
    pub fn texture_or_fallback<P: AsRef<Path>>(path: P, fallback: Color) -> Appearance {
        match Texture::open(&path) {
            Ok(texture) => Appearance::Texture(Arc::new(texture)),
            Err(e) => {
                warn!(
                    "texture {} failed to load, using fallback color: {e}",
                    path.as_ref().display()
                );
                Appearance::Texture(Arc::new(Texture::placeholder(
                    &path.as_ref().to_string_lossy(),
                    fallback,
                )))
            }
        }
    }

    /// The texture behind this appearance, when there is one and its pixels
    /// have been published.
    #[inline]
    pub fn as_loaded_texture(&self) -> Option<&Texture> {
        match self {
            Appearance::Texture(texture) if texture.loaded() => Some(texture),
            _ => None,
        }
    }

    /// The solid color a pass substitutes when no texture pixels are
    /// available: the color itself, or an unloaded texture's temporary color.
    #[inline]
    pub fn fallback_color(&self) -> Color {
        match self {
            Appearance::Color(color) => *color,
            Appearance::Texture(texture) => texture.temporary_color(),
        }
    }
}

impl From<Color> for Appearance {
    fn from(color: Color) -> Self {
        Appearance::Color(color)
    }
}

impl From<Texture> for Appearance {
    fn from(texture: Texture) -> Self {
        Appearance::Texture(Arc::new(texture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_length_is_validated() {
        assert!(matches!(
            Texture::from_raster("t", 2, 2, vec![0; 15]),
            Err(Error::TextureRaster { .. })
        ));
        assert!(matches!(
            Texture::from_raster("t", 0, 2, vec![]),
            Err(Error::TextureDimensions { .. })
        ));
        assert!(Texture::from_raster("t", 2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn placeholder_loads_exactly_once() {
        let mut texture = Texture::placeholder("wall", Color::WHITE);
        assert!(!texture.loaded());
        texture.load_raster(1, 1, vec![1, 2, 3, 255]).unwrap();
        assert!(texture.loaded());
        assert_eq!(texture.texel(0, 0), &[1, 2, 3, 255]);
        assert!(matches!(
            texture.load_raster(1, 1, vec![0; 4]),
            Err(Error::AlreadyLoaded(_))
        ));
    }

    #[test]
    fn texel_lookup_is_row_major() {
        let pixels: Vec<u8> = (0..16).collect();
        let texture = Texture::from_raster("t", 2, 2, pixels).unwrap();
        assert_eq!(texture.texel(0, 0), &[0, 1, 2, 3]);
        assert_eq!(texture.texel(1, 0), &[4, 5, 6, 7]);
        assert_eq!(texture.texel(0, 1), &[8, 9, 10, 11]);
    }

    #[test]
    fn appearance_fallback_color() {
        let solid = Appearance::from(Color::new(1, 2, 3, 4));
        assert_eq!(solid.fallback_color(), Color::new(1, 2, 3, 4));
        assert!(solid.as_loaded_texture().is_none());

        let unloaded = Appearance::from(Texture::placeholder("wall", Color::WHITE));
        assert_eq!(unloaded.fallback_color(), Color::WHITE);
        assert!(unloaded.as_loaded_texture().is_none());

        let loaded = Appearance::from(Texture::from_raster("t", 1, 1, vec![0; 4]).unwrap());
        assert!(loaded.as_loaded_texture().is_some());
    }

    #[test]
    fn missing_texture_is_shared() {
        let a = Texture::missing();
        let b = Texture::missing();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.width(), 2);
        assert_eq!(a.height(), 2);
    }
}
