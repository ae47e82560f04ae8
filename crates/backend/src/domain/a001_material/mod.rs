pub mod repository;
pub mod service;
pub mod store;

pub use repository::SeaOrmMaterialStore;
pub use service::MaterialLookupError;
pub use store::MaterialStore;
