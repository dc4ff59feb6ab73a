//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (translated to intents)
//! - Frame scheduling
//! - Logger setup

pub mod frame;
pub mod input;

pub use frame::{FrameDriver, FrameOutcome};
pub use input::{Intent, TouchPoint, classify_touch, intent_for_button, intent_for_key};

/// Install the browser console logger and panic hook
#[cfg(target_arch = "wasm32")]
pub fn init_logging(verbose: bool) {
    console_error_panic_hook::set_once();
    let level = if verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(level);
}

/// Install `env_logger`; `RUST_LOG` overrides the default filter
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(verbose: bool) {
    use env_logger::{Builder, Env};

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    // `try_init` only fails if a logger was already set
    let _ = Builder::from_env(env).try_init();
}
