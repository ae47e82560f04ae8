//! Экран сканирования QR кода (MVVM)
//!
//! - `model`: HTTP запрос к сервису поиска
//! - `view_model`: состояние экрана и команды
//! - `view`: разметка

mod model;
mod view;
mod view_model;

pub use view::MaterialScanner;
pub use view_model::MaterialScannerViewModel;
