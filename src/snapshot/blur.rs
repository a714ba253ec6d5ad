use image::RgbaImage;

/// Opaque post-processing step applied to a block's background crop.
///
/// The engine never calls a backend itself; it emits blur jobs and lets the
/// host decide where to run them, so a slow backend degrades one block's
/// background rather than the UI thread.
pub trait BlurBackend {
    fn blur(&self, image: &RgbaImage, sigma: f32) -> RgbaImage;
}

/// Gaussian blur over `image::imageops`, the frosted-glass default.
#[derive(Debug, Default, Clone, Copy)]
pub struct GaussianBlur;

impl BlurBackend for GaussianBlur {
    fn blur(&self, image: &RgbaImage, sigma: f32) -> RgbaImage {
        if sigma <= 0.0 {
            return image.clone();
        }
        image::imageops::blur(image, sigma)
    }
}

/// Identity backend for hosts that want raw crops and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughBlur;

impl BlurBackend for PassthroughBlur {
    fn blur(&self, image: &RgbaImage, _sigma: f32) -> RgbaImage {
        image.clone()
    }
}
