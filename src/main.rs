#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod anchors;
mod config;
mod cursor;
mod glitch;
mod reveal;
mod scroll;
mod telemetry;
mod tilt;

#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod page;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
