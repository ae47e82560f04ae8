//! Браузерные адаптеры камеры и распознавания QR

pub mod barcode;
pub mod camera;
pub mod frame;

pub use barcode::QrFrameDecoder;
pub use camera::{open_preferred_camera, WebCameraStream};
