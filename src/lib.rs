pub mod modules;
pub use modules::cv;

pub mod config;
pub mod health;
pub mod telemetry;

#[cfg(test)]
mod tests;
