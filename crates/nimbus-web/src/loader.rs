use js_sys::Promise;
use nimbus_engine::{AssetError, AssetManifest, AssetRegistry, ImageFrame};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlImageElement};

use crate::canvas::WebCanvas;
use crate::error::{describe, WebError};

/// Load an image and wait until it has decoded.
///
/// `width`/`height` override the element's intrinsic size when given.
pub async fn load_image(
    path: &str,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<HtmlImageElement, WebError> {
    let image = HtmlImageElement::new()?;
    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(path);

    let result = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);
    result.map_err(|err| AssetError::load(path, describe(&err)))?;

    if let Some(width) = width {
        image.set_width(width);
    }
    if let Some(height) = height {
        image.set_height(height);
    }
    log::debug!("loaded image {path} ({}x{})", image.width(), image.height());
    Ok(image)
}

/// Create an audio element for `path`. The browser fetches it lazily.
pub fn load_audio(path: &str) -> Result<HtmlAudioElement, WebError> {
    let audio = HtmlAudioElement::new_with_src(path)?;
    audio.set_preload("auto");
    Ok(audio)
}

/// Load every image in the manifest, in name order.
///
/// Each image is stored on the canvas under a fresh handle and registered by
/// name, so scenes can build sprites with [`AssetRegistry::sprite`].
/// Stops at the first image that fails.
pub async fn load_manifest_images(
    manifest: &AssetManifest,
    assets: &mut AssetRegistry,
    canvas: &mut WebCanvas,
) -> Result<usize, WebError> {
    for (name, desc) in &manifest.images {
        let width = desc.width.map(|w| w.round() as u32);
        let height = desc.height.map(|h| h.round() as u32);
        let element = load_image(&desc.path, width, height).await?;

        let frame = ImageFrame {
            image: assets.allocate_image(),
            width: desc.width.unwrap_or(element.natural_width() as f32),
            height: desc.height.unwrap_or(element.natural_height() as f32),
        };
        canvas.store_image(frame.image, element);
        assets.insert_image(name.clone(), frame);
    }
    log::info!("loaded {} images", manifest.images.len());
    Ok(manifest.images.len())
}
