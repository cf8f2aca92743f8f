//! Command console engine for embedded targets.
//!
//! One byte stream is shared by three kinds of work:
//!
//! - **Commands** run to completion when their name is entered at the prompt.
//! - **Applications** take keyboard focus when their name is entered and keep
//!   it until closed, by the interrupt key (Ctrl+C) or on request.
//! - **Services** run in the background, one state step per scheduler tick,
//!   round-robin.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Keystroke     │───▶│  Resolver /     │───▶│   Command       │
//! │   Processor     │    │  Dispatcher     │    │   Registry      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Line Buffer   │    │  Focus Manager  │    │   Service       │
//! │                 │    │  (Applications) │    │   Scheduler     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! The host calls [`Engine::add_keystroke`] for every received byte and
//! [`Engine::do_tasks`] from its main loop. Both return after a small,
//! bounded amount of work. If bytes arrive in an interrupt handler, the host
//! must keep the two calls from overlapping.
//!
//! # Usage
//!
//! ```rust
//! use cmdengine::console::{
//!     Application, ApplicationHandler, Args, Context, Engine, EngineConfig, Registries,
//!     Service, ServiceState, builtins,
//! };
//!
//! struct Viewer;
//!
//! impl ApplicationHandler for Viewer {
//!     fn on_input(&mut self, key: u8, ctx: &mut Context<'_, '_>) {
//!         if key == b'q' {
//!             ctx.request_close();
//!         }
//!     }
//! }
//!
//! fn blink(state: ServiceState, _ctx: &mut Context<'_, '_>) -> ServiceState {
//!     // toggle a pin, then stay in the same phase
//!     ServiceState(if state.0 == 1 { 2 } else { 1 })
//! }
//!
//! fn uart_write(text: &str) {
//!     print!("{}", text);
//! }
//!
//! let mut viewer = Viewer;
//! let mut blinker = blink;
//! let commands = [builtins::HELP, builtins::CLEAR];
//! let applications = [Application::new("view", &mut viewer).with_help("Log viewer")];
//! let services = [Service::new("blink", &mut blinker)];
//!
//! let config = EngineConfig {
//!     output: Some(uart_write),
//!     error: Some(uart_write),
//!     ..EngineConfig::default()
//! };
//! let mut engine = Engine::<128>::new(config, Registries::new(&commands, &applications, &services));
//!
//! for &byte in b"\rview\rq" {
//!     let _ = engine.add_keystroke(byte);
//!     for _ in 0..3 {
//!         let _ = engine.do_tasks();
//!     }
//! }
//! assert!(engine.focused_application().is_none());
//! ```

pub mod ansi;
pub mod builtins;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod registry;
pub mod scheduler;
pub mod writer;

pub use config::{EngineConfig, IntroPolicy};
pub use context::Context;
pub use engine::{Engine, EngineState, KeyState};
pub use error::EngineError;
pub use line_buffer::LineBuffer;
pub use parser::{Args, MAX_ARGS, ParsedLine, parse_line};
pub use registry::{
    Application, ApplicationHandler, Command, CommandHandler, Registries, Service, ServiceHandler,
    ServiceState,
};
pub use scheduler::Scheduler;
pub use writer::{ErrorStyle, WriterFn};
