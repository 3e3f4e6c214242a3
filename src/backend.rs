use livephoto_core::{FrameSource, MediaError, PlayerBackend, SurfaceSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement};

/// Canvas 2D context plus the detached image and video elements it draws.
pub struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    video: HtmlVideoElement,
}

impl CanvasBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("missing document"))?;
        let video = document
            .create_element("video")?
            .dyn_into::<HtmlVideoElement>()?;
        video.set_cross_origin(Some("anonymous"));
        video.set_attribute("playsinline", "")?;
        video.set_preload("auto");
        Ok(Self {
            canvas,
            ctx,
            image,
            video,
        })
    }

    /// Starts both downloads. Listeners must be attached before this runs.
    pub fn start_loading(&self, image_src: &str, video_src: &str) {
        self.image.set_src(image_src);
        self.video.set_src(video_src);
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }

    pub fn image_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.natural_width(), self.image.natural_height())
    }

    pub fn video_error_message(&self) -> String {
        match self.video.error() {
            Some(error) => format!("media error code {}", error.code()),
            None => "media error".to_string(),
        }
    }
}

impl PlayerBackend for CanvasBackend {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.ctx.set_global_alpha(opacity);
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn scale(&mut self, x: f64, y: f64) {
        let _ = self.ctx.scale(x, y);
    }

    fn draw(
        &mut self,
        source: FrameSource,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), MediaError> {
        let result = match source {
            FrameSource::Image => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(&self.image, x, y, width, height),
            FrameSource::Video => self
                .ctx
                .draw_image_with_html_video_element_and_dw_and_dh(&self.video, x, y, width, height),
        };
        result.map_err(|err| MediaError::Draw(js_err(err)))
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        if !seconds.is_finite() {
            return Err(MediaError::Seek(format!("invalid time {seconds}")));
        }
        if seconds > 0.0 && self.video.seekable().length() == 0 {
            return Err(MediaError::Seek("video is not seekable".to_string()));
        }
        self.video.set_current_time(seconds);
        Ok(())
    }

    fn pause(&mut self) {
        let _ = self.video.pause();
    }

    fn is_muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn release(&mut self) {
        let _ = self.video.pause();
        let _ = self.video.remove_attribute("src");
        self.video.load();
        self.video.remove();
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
