pub mod config;
pub mod console_interface;
pub mod controller;
pub mod core;
pub mod editor;
pub mod history;
pub mod models;
pub mod stage;

#[cfg(test)]
mod test;
