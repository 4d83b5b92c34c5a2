use crate::assets::TextureImage;
use crate::device::{
    Backend, GraphicsContext, RenderError, TextureBinding, TextureFilter, TextureWrap,
};

/// 2D texture resource.
///
/// Created from a decoded image and uploaded exactly once: `create` consumes
/// the image. Sampling is repeat-wrapped and nearest-filtered on both axes so
/// pixel art stays crisp.
#[derive(Debug)]
pub struct Texture<B: Backend> {
    handle: B::Texture,
    width: u32,
    height: u32,
    channels: u8,
}

impl<B: Backend> Texture<B> {
    pub fn create(ctx: &mut GraphicsContext<B>, image: TextureImage) -> Result<Self, RenderError> {
        if !image.is_complete() {
            return Err(RenderError::InvalidImage {
                width: image.width,
                height: image.height,
                len: image.pixels.len(),
            });
        }

        let handle = ctx.create_texture()?;
        {
            let mut bound = ctx.bind_texture_2d(0, handle);
            bound.set_wrap(TextureWrap::Repeat, TextureWrap::Repeat);
            bound.set_filter(TextureFilter::Nearest, TextureFilter::Nearest);
            bound.upload_rgba8(image.width, image.height, &image.pixels);
            bound.generate_mipmaps();
        }

        log::debug!(
            "uploaded texture {handle:?} ({}x{}, {} source channels)",
            image.width,
            image.height,
            image.channels
        );

        Ok(Self {
            handle,
            width: image.width,
            height: image.height,
            channels: image.channels,
        })
    }

    pub fn handle(&self) -> B::Texture {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count reported by the source image (the GPU copy is RGBA).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn bind<'c>(&self, ctx: &'c mut GraphicsContext<B>, unit: u32) -> TextureBinding<'c, B> {
        ctx.bind_texture_2d(unit, self.handle)
    }

    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        ctx.delete_texture(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Call, HeadlessBackend};

    fn image(width: u32, height: u32, channels: u8) -> TextureImage {
        TextureImage {
            pixels: vec![0x7f; width as usize * height as usize * 4],
            width,
            height,
            channels,
        }
    }

    #[test]
    fn upload_configures_sampling_then_uploads_and_mipmaps() {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let texture = Texture::create(&mut ctx, image(4, 2, 3)).unwrap();

        let calls = ctx.backend().calls();
        let h = texture.handle();
        assert_eq!(
            calls,
            &[
                Call::CreateTexture(h),
                Call::BindTexture2d(Some(h)),
                Call::TextureWrap(TextureWrap::Repeat, TextureWrap::Repeat),
                Call::TextureFilter(TextureFilter::Nearest, TextureFilter::Nearest),
                Call::TextureImage { width: 4, height: 2, bytes: 32 },
                Call::GenerateMipmap,
                Call::BindTexture2d(None),
            ]
        );
        assert_eq!(texture.channels(), 3);
    }

    #[test]
    fn empty_pixels_are_rejected_before_any_gpu_call() {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let bad = TextureImage { pixels: Vec::new(), width: 8, height: 8, channels: 4 };

        let err = Texture::create(&mut ctx, bad).unwrap_err();
        assert_eq!(err, RenderError::InvalidImage { width: 8, height: 8, len: 0 });
        assert!(ctx.backend().calls().is_empty());
        assert_eq!(ctx.stats().created.textures, 0);
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let mut bad = image(2, 2, 4);
        bad.pixels.truncate(15);
        assert!(Texture::create(&mut ctx, bad).is_err());
    }
}
