pub mod lookup;
pub mod ui;
