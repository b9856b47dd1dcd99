pub mod board;
pub mod game;
pub mod piece;
pub mod rules;

#[cfg(target_arch = "wasm32")]
mod wasm_api;
