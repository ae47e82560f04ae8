//! Захват QR кода и поиск материала без привязки к браузеру
//!
//! - camera.rs: выбор камеры и владение потоком
//! - controller.rs: конечный автомат сканирования / поиска
//! - failure.rs: ошибки, показываемые пользователю

pub mod camera;
pub mod controller;
pub mod failure;

pub use camera::{select_camera, CameraInfo, CameraLease, CameraStream};
pub use controller::{LookupController, LookupRequest, LookupState, ScanTicket};
pub use failure::LookupFailure;
