//! Command, application and service registries.
//!
//! Each role is a descriptor struct (name, optional help text, behaviour)
//! whose behaviour is a trait object supplied by the host. Registries are
//! plain slices of descriptors built once at startup; only service state
//! changes afterwards.
//!
//! ```rust
//! use cmdengine::console::{Args, Command, Context, Registries, Service, ServiceState};
//!
//! fn version(_args: &Args<'_>, _ctx: &mut Context<'_, '_>) -> Option<&'static str> {
//!     Some("\r\nv1.0.0\r\n")
//! }
//!
//! let mut ticks = 0u32;
//! let mut heartbeat = |state: ServiceState, _ctx: &mut Context<'_, '_>| {
//!     ticks += 1;
//!     state
//! };
//!
//! let commands = [Command::new("version", &version).with_help("Show firmware version")];
//! let services = [Service::new("heartbeat", &mut heartbeat)];
//! let registries = Registries::new(&commands, &[], &services);
//! assert!(registries.find_command("version").is_some());
//! ```

use core::cell::{Cell, RefCell, RefMut};
use core::fmt;

use super::context::Context;
use super::error::EngineError;
use super::parser::Args;

/// Behaviour of a run-to-completion command.
///
/// Any output returned is forwarded to the output writer after `execute`
/// returns. Commands may also write directly through the context.
pub trait CommandHandler {
    /// Run the command with the tokens that followed its name.
    fn execute(&self, args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&str>;
}

impl<F> CommandHandler for F
where
    F: Fn(&Args<'_>, &mut Context<'_, '_>) -> Option<&'static str>,
{
    fn execute(&self, args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&str> {
        self(args, ctx)
    }
}

/// Behaviour of a full-screen application that holds keyboard focus.
pub trait ApplicationHandler {
    /// Called for every keystroke while focused, except the interrupt key.
    fn on_input(&mut self, key: u8, ctx: &mut Context<'_, '_>);

    /// Called once when focus is acquired, before any keystroke is routed.
    fn on_start(&mut self, _args: &Args<'_>, _ctx: &mut Context<'_, '_>) {}

    /// Called once when focus is released.
    fn on_close(&mut self, _ctx: &mut Context<'_, '_>) {}
}

/// One step of a background service.
///
/// Receives the current state and returns the next one. Returning
/// [`ServiceState::STOPPED`] ends the service until something restarts it.
/// The implementing value is the service's own working storage.
pub trait ServiceHandler {
    /// Perform one step from `state` and return the state to resume from.
    fn run(&mut self, state: ServiceState, ctx: &mut Context<'_, '_>) -> ServiceState;
}

impl<F> ServiceHandler for F
where
    F: FnMut(ServiceState, &mut Context<'_, '_>) -> ServiceState,
{
    fn run(&mut self, state: ServiceState, ctx: &mut Context<'_, '_>) -> ServiceState {
        self(state, ctx)
    }
}

/// State byte of a service.
///
/// `0xFF` means stopped and `0x00` means starting; every other value is
/// private to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceState(pub u8);

impl ServiceState {
    /// The service is not scheduled.
    pub const STOPPED: ServiceState = ServiceState(0xFF);
    /// Initial state of a freshly started service.
    pub const STARTING: ServiceState = ServiceState(0x00);

    /// Whether this is [`STOPPED`](Self::STOPPED).
    pub const fn is_stopped(self) -> bool {
        self.0 == Self::STOPPED.0
    }

    /// Whether this is [`STARTING`](Self::STARTING).
    pub const fn is_starting(self) -> bool {
        self.0 == Self::STARTING.0
    }

    /// Human-readable phase: `Stopped`, `Starting` or `Running`.
    pub const fn label(self) -> &'static str {
        match self.0 {
            0xFF => "Stopped",
            0x00 => "Starting",
            _ => "Running",
        }
    }
}

impl From<u8> for ServiceState {
    fn from(value: u8) -> Self {
        ServiceState(value)
    }
}

impl From<ServiceState> for u8 {
    fn from(value: ServiceState) -> Self {
        value.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ServiceState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}({=u8:#x})", self.label(), self.0)
    }
}

/// A named command.
#[derive(Clone, Copy)]
pub struct Command<'a> {
    /// Exact, case-sensitive name typed at the prompt.
    pub name: &'a str,
    /// Description shown by `help`.
    pub help_text: Option<&'a str>,
    /// What runs when the name is entered.
    pub handler: &'a dyn CommandHandler,
}

impl<'a> Command<'a> {
    /// Command without help text.
    pub const fn new(name: &'a str, handler: &'a dyn CommandHandler) -> Self {
        Self {
            name,
            help_text: None,
            handler,
        }
    }

    /// Attach the description shown by `help`.
    pub const fn with_help(mut self, help_text: &'a str) -> Self {
        self.help_text = Some(help_text);
        self
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help_text", &self.help_text)
            .finish_non_exhaustive()
    }
}

/// A named application.
///
/// The handler sits behind a [`RefCell`] so the registry can be shared while
/// the focused application runs.
pub struct Application<'a> {
    /// Name that gives the application focus when entered.
    pub name: &'a str,
    /// Description shown by `help`.
    pub help_text: Option<&'a str>,
    handler: RefCell<&'a mut dyn ApplicationHandler>,
}

impl<'a> Application<'a> {
    /// Application without help text.
    pub fn new(name: &'a str, handler: &'a mut dyn ApplicationHandler) -> Self {
        Self {
            name,
            help_text: None,
            handler: RefCell::new(handler),
        }
    }

    /// Attach the description shown by `help`.
    pub fn with_help(mut self, help_text: &'a str) -> Self {
        self.help_text = Some(help_text);
        self
    }

    /// The handler, or `None` if it is already borrowed further up the
    /// call stack.
    pub(crate) fn handler(&self) -> Option<RefMut<'_, &'a mut dyn ApplicationHandler>> {
        self.handler.try_borrow_mut().ok()
    }
}

impl fmt::Debug for Application<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("help_text", &self.help_text)
            .finish_non_exhaustive()
    }
}

/// A named background service and its current state.
///
/// Services are always registered; "not running" is `state == STOPPED`.
pub struct Service<'a> {
    /// Name used by `start`, `stop` and the listings.
    pub name: &'a str,
    /// Description shown by `help` and `services`.
    pub help_text: Option<&'a str>,
    state: Cell<ServiceState>,
    handler: RefCell<&'a mut dyn ServiceHandler>,
}

impl<'a> Service<'a> {
    /// New service in the `STARTING` state.
    pub fn new(name: &'a str, handler: &'a mut dyn ServiceHandler) -> Self {
        Self {
            name,
            help_text: None,
            state: Cell::new(ServiceState::STARTING),
            handler: RefCell::new(handler),
        }
    }

    /// Attach the description shown by `help`.
    pub fn with_help(mut self, help_text: &'a str) -> Self {
        self.help_text = Some(help_text);
        self
    }

    /// Register the service stopped; it runs once something starts it.
    pub fn stopped(self) -> Self {
        self.state.set(ServiceState::STOPPED);
        self
    }

    /// State the next step will receive.
    pub fn state(&self) -> ServiceState {
        self.state.get()
    }

    /// Overwrite the state. Works through a shared reference.
    pub fn set_state(&self, state: ServiceState) {
        self.state.set(state);
    }

    /// Set the state to [`ServiceState::STARTING`].
    pub fn start(&self) {
        self.set_state(ServiceState::STARTING);
    }

    /// Set the state to [`ServiceState::STOPPED`].
    pub fn stop(&self) {
        self.set_state(ServiceState::STOPPED);
    }

    /// Whether the scheduler skips this service.
    pub fn is_stopped(&self) -> bool {
        self.state().is_stopped()
    }

    /// Advance the service by one step and store the state it returns.
    ///
    /// Returns `None` without running if the handler is already borrowed.
    pub(crate) fn step(&self, ctx: &mut Context<'_, '_>) -> Option<ServiceState> {
        let mut handler = self.handler.try_borrow_mut().ok()?;
        let next = handler.run(self.state.get(), ctx);
        self.state.set(next);
        Some(next)
    }
}

impl fmt::Debug for Service<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name)
            .field("help_text", &self.help_text)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

/// The three lookup tables, each with an explicit length.
#[derive(Debug, Clone, Copy)]
pub struct Registries<'a> {
    /// Searched first when a line is resolved.
    pub commands: &'a [Command<'a>],
    /// Searched when no command matches.
    pub applications: &'a [Application<'a>],
    /// Stepped round-robin by the scheduler.
    pub services: &'a [Service<'a>],
}

impl Default for Registries<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> Registries<'a> {
    /// Bundle the three tables.
    pub const fn new(
        commands: &'a [Command<'a>],
        applications: &'a [Application<'a>],
        services: &'a [Service<'a>],
    ) -> Self {
        Self {
            commands,
            applications,
            services,
        }
    }

    /// No commands, applications or services.
    pub const fn empty() -> Self {
        Self {
            commands: &[],
            applications: &[],
            services: &[],
        }
    }

    /// First command with exactly this name.
    pub fn find_command(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }

    /// First application with exactly this name.
    pub fn find_application(&self, name: &str) -> Option<usize> {
        self.applications.iter().position(|a| a.name == name)
    }

    /// First service with exactly this name.
    pub fn find_service(&self, name: &str) -> Option<&'a Service<'a>> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Reject names that repeat within or across the command and
    /// application tables, or within the service table.
    ///
    /// The engine never calls this itself: lookups are first-match-wins.
    pub fn check_unique_names(&self) -> Result<(), EngineError> {
        let dispatchable = self
            .commands
            .iter()
            .map(|c| c.name)
            .chain(self.applications.iter().map(|a| a.name));

        for (i, name) in dispatchable.clone().enumerate() {
            if dispatchable.clone().skip(i + 1).any(|other| other == name) {
                return Err(EngineError::DuplicateName);
            }
        }

        for (i, service) in self.services.iter().enumerate() {
            if self.services[i + 1..].iter().any(|s| s.name == service.name) {
                return Err(EngineError::DuplicateName);
            }
        }

        Ok(())
    }
}
