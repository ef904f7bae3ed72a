use nimbus_engine::{Canvas2d, Color, ImageId, TextStyle, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{describe, window, WebError};

/// [`Canvas2d`] over a browser `<canvas>` element.
///
/// The backing store follows the window size, multiplied by the device pixel
/// ratio when enabled. Drawing happens in logical pixels; the ratio lives in
/// the base transform.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: Vec<Option<HtmlImageElement>>,
    use_device_pixel_ratio: bool,
    viewport: Viewport,
}

impl WebCanvas {
    /// Look up `<canvas id="...">` in the current document.
    pub fn from_element_id(id: &str, use_device_pixel_ratio: bool) -> Result<Self, WebError> {
        let document = window()?.document().ok_or(WebError::NoDocument)?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| WebError::ElementNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WebError::NotACanvas(id.to_string()))?;
        Self::new(element, use_device_pixel_ratio)
    }

    pub fn new(element: HtmlCanvasElement, use_device_pixel_ratio: bool) -> Result<Self, WebError> {
        let ctx = element
            .get_context("2d")?
            .ok_or(WebError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WebError::NoContext)?;
        Ok(Self {
            element,
            ctx,
            images: Vec::new(),
            use_device_pixel_ratio,
            viewport: Viewport::default(),
        })
    }

    /// Toggle device-pixel-ratio scaling; takes effect at the next resize.
    pub fn set_use_device_pixel_ratio(&mut self, enabled: bool) {
        self.use_device_pixel_ratio = enabled;
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }

    /// Keep a loaded image so `draw_image` can find it by handle.
    pub fn store_image(&mut self, id: ImageId, image: HtmlImageElement) {
        let slot = id.0 as usize;
        if self.images.len() <= slot {
            self.images.resize(slot + 1, None);
        }
        self.images[slot] = Some(image);
    }

    fn image(&self, id: ImageId) -> Option<&HtmlImageElement> {
        self.images.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn measure(&self) -> Result<Viewport, WebError> {
        let window = window()?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        let pixel_ratio = if self.use_device_pixel_ratio {
            window.device_pixel_ratio() as f32
        } else {
            1.0
        };
        Ok(Viewport {
            width,
            height,
            pixel_ratio,
        })
    }
}

fn warn_on_err(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("canvas {op} failed: {}", describe(&err));
    }
}

impl Canvas2d for WebCanvas {
    fn resize_to_viewport(&mut self) -> Viewport {
        match self.measure() {
            Ok(viewport) => {
                if viewport != self.viewport {
                    self.element.set_width((viewport.width * viewport.pixel_ratio) as u32);
                    self.element.set_height((viewport.height * viewport.pixel_ratio) as u32);
                    log::debug!(
                        "canvas resized to {}x{} @{}x",
                        viewport.width,
                        viewport.height,
                        viewport.pixel_ratio
                    );
                    self.viewport = viewport;
                }
            }
            Err(err) => log::warn!("canvas resize skipped: {err}"),
        }
        // A resize resets context state, including the transform.
        let ratio = f64::from(self.viewport.pixel_ratio);
        warn_on_err("set_transform", self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0));
        self.viewport
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        );
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_brightness(&mut self, percent: f32) {
        self.ctx.set_filter(&format!("brightness({percent}%)"));
    }

    fn translate(&mut self, x: f32, y: f32) {
        warn_on_err("translate", self.ctx.translate(f64::from(x), f64::from(y)));
    }

    fn rotate(&mut self, radians: f32) {
        warn_on_err("rotate", self.ctx.rotate(f64::from(radians)));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(f64::from(alpha));
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, width: f32, height: f32) {
        let Some(element) = self.image(image) else {
            log::warn!("draw_image: no image stored for {image:?}");
            return;
        };
        warn_on_err(
            "draw_image",
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                element,
                f64::from(x),
                f64::from(y),
                f64::from(width),
                f64::from(height),
            ),
        );
    }

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(f64::from(x), f64::from(y), f64::from(width), f64::from(height));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle<'_>) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(&style.color.to_css());
        warn_on_err("fill_text", self.ctx.fill_text(text, f64::from(x), f64::from(y)));
    }
}
