use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement};

use super::frame;
use crate::domain::a001_material::lookup::LookupFailure;

/// HAVE_CURRENT_DATA
const READY_STATE_CURRENT_DATA: u16 = 2;

enum Backend {
    /// BarcodeDetector браузера
    Native { detector: JsValue, detect: Function },
    /// Кадр через canvas, распознавание в Rust (rqrr)
    Canvas {
        canvas: HtmlCanvasElement,
        context: CanvasRenderingContext2d,
    },
}

/// Распознавание QR кода в кадре видео
///
/// Если браузер не умеет BarcodeDetector (Firefox, Safari, десктопный
/// Chrome вне macOS), кадр рисуется на canvas и разбирается в Rust.
pub struct QrFrameDecoder {
    backend: Backend,
}

impl QrFrameDecoder {
    pub fn new() -> Result<Self, LookupFailure> {
        let backend = match native_detector() {
            Some((detector, detect)) => {
                log::info!("QR decoding via BarcodeDetector");
                Backend::Native { detector, detect }
            }
            None => {
                log::info!("BarcodeDetector unavailable, QR decoding via canvas");
                canvas_backend()?
            }
        };
        Ok(Self { backend })
    }

    /// Текст первого QR кода в текущем кадре
    pub async fn decode(&self, video: &HtmlVideoElement) -> Option<String> {
        if video.ready_state() < READY_STATE_CURRENT_DATA {
            return None;
        }
        match &self.backend {
            Backend::Native { detector, detect } => detect_native(detector, detect, video).await,
            Backend::Canvas { canvas, context } => decode_canvas(canvas, context, video),
        }
    }
}

fn native_detector() -> Option<(JsValue, Function)> {
    let window = web_sys::window()?;
    let ctor = Reflect::get(&window, &"BarcodeDetector".into()).ok()?;
    if ctor.is_undefined() {
        return None;
    }
    let ctor: Function = ctor.dyn_into().ok()?;

    let options = Object::new();
    Reflect::set(&options, &"formats".into(), &Array::of1(&"qr_code".into())).ok()?;
    let detector = Reflect::construct(&ctor, &Array::of1(&options))
        .map_err(|e| log::warn!("BarcodeDetector construction failed: {e:?}"))
        .ok()?;
    let detect: Function = Reflect::get(&detector, &"detect".into())
        .ok()?
        .dyn_into()
        .ok()?;
    Some((detector, detect))
}

fn canvas_backend() -> Result<Backend, LookupFailure> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(LookupFailure::DecoderUnavailable)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| LookupFailure::DecoderUnavailable)?
        .dyn_into()
        .map_err(|_| LookupFailure::DecoderUnavailable)?;
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| LookupFailure::DecoderUnavailable)?
        .ok_or(LookupFailure::DecoderUnavailable)?
        .dyn_into()
        .map_err(|_| LookupFailure::DecoderUnavailable)?;
    Ok(Backend::Canvas { canvas, context })
}

async fn detect_native(
    detector: &JsValue,
    detect: &Function,
    video: &HtmlVideoElement,
) -> Option<String> {
    let promise: Promise = detect.call1(detector, video).ok()?.dyn_into().ok()?;
    let codes: Array = JsFuture::from(promise).await.ok()?.dyn_into().ok()?;
    let first = codes.get(0);
    if first.is_undefined() {
        return None;
    }
    Reflect::get(&first, &"rawValue".into()).ok()?.as_string()
}

fn decode_canvas(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    video: &HtmlVideoElement,
) -> Option<String> {
    let (width, height) = frame::scaled_frame_size(video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return None;
    }
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }

    let (w, h) = (f64::from(width), f64::from(height));
    context
        .draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, w, h)
        .ok()?;
    let pixels = context.get_image_data(0.0, 0.0, w, h).ok()?.data();
    frame::decode_rgba(width as usize, height as usize, &pixels)
}
