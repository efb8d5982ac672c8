pub mod app;
pub mod event;
pub mod game;
pub mod ui;
