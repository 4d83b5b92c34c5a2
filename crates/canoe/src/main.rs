use anyhow::{Context, Result};

use canoe_engine::assets::decode_rgba8;
use canoe_engine::logging::{init_logging, LoggingConfig};
use canoe_engine::window::{Session, SessionConfig};

const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/bricks_texture.png");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run() -> Result<()> {
    let image = decode_rgba8(TEXTURE_PATH)
        .with_context(|| format!("failed to load texture {TEXTURE_PATH}"))?;
    log::info!(
        "loaded {} ({}x{}, {} channels)",
        TEXTURE_PATH,
        image.width,
        image.height,
        image.channels
    );

    Session::run(SessionConfig::default(), image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_texture_decodes_to_rgba() {
        let image = decode_rgba8(TEXTURE_PATH).unwrap();
        assert_eq!((image.width, image.height), (64, 64));
        assert_eq!(image.channels, 3);
        assert!(image.is_complete());
    }
}
