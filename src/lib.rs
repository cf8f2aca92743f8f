//! # cmdengine - interactive console for embedded targets
//!
//! A heap-free command console that multiplexes one byte-oriented input
//! stream (typically a UART) between line commands, full-screen
//! applications that capture focus, and background services advanced one
//! step per scheduler tick. There are no threads, no blocking calls and no
//! allocation: the host drives everything through two entry points.
//!
//! ## Features
//!
//! - **Line editing**: fixed-capacity line buffer with echo, backspace and
//!   interrupt handling
//! - **Commands**: named, run-to-completion actions with up to
//!   [`MAX_ARGS`](console::MAX_ARGS) arguments
//! - **Applications**: named modes receiving every keystroke until closed
//! - **Services**: cooperative round-robin background state machines
//! - **Built-ins**: `help`, `clear`, `services`, `start`, `stop`
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cmdengine = "0.1.0"
//! ```
//!
//! ### Main loop
//!
//! ```rust,no_run
//! use cmdengine::console::{Engine, EngineConfig, Registries, builtins};
//! # fn uart_read() -> Option<u8> { None }
//! # fn uart_write(_: &str) {}
//!
//! let commands = [builtins::HELP, builtins::CLEAR, builtins::SERVICES];
//! let config = EngineConfig {
//!     output: Some(uart_write),
//!     error: Some(uart_write),
//!     intro: Some("\r\nWelcome\r\n"),
//!     ..EngineConfig::default()
//! };
//! let mut engine = Engine::<255>::new(config, Registries::new(&commands, &[], &[]));
//!
//! loop {
//!     if let Some(byte) = uart_read() {
//!         let _ = engine.add_keystroke(byte);
//!     }
//!     let _ = engine.do_tasks();
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `defmt`: structured logging of state transitions, dispatch and errors
//!   through `defmt`, plus `defmt::Format` for the public enums

#![cfg_attr(not(test), no_std)]
#![deny(missing_debug_implementations)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

/// The command engine and its collaborators.
///
/// Contains the line buffer, registries, keystroke processor, command
/// resolver and dispatcher, application focus manager and service
/// scheduler.
pub mod console;
