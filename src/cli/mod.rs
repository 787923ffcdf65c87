pub mod board;
pub mod convert;
pub mod setup;
pub mod ui;
pub mod view;
