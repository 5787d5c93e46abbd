pub mod button;
pub mod footer;
pub mod header;
pub mod ui;
