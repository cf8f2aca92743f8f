//! The handle passed to every command, application and service callback.

use core::fmt;

use super::registry::{Application, Command, Registries, Service, ServiceState};
use super::writer::Writers;

/// Requests a callback leaves behind for the engine to act on once it
/// returns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Requests {
    pub(crate) close_application: bool,
}

impl Requests {
    pub(crate) fn take_close(&mut self) -> bool {
        core::mem::take(&mut self.close_application)
    }
}

/// Access to the engine from inside a callback.
///
/// Gives the shared output and error channels, read access to the
/// registries, service control, and a way to ask for the focused
/// application to be closed.
///
/// ```rust
/// use core::fmt::Write;
/// use cmdengine::console::{Args, Context};
///
/// fn uptime(_args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
///     let _ = write!(ctx, "\r\nup {} s\r\n", 42);
///     None
/// }
/// ```
pub struct Context<'c, 'a> {
    registries: Registries<'a>,
    writers: Writers,
    focused: Option<usize>,
    requests: &'c mut Requests,
}

impl<'c, 'a> Context<'c, 'a> {
    pub(crate) fn new(
        registries: Registries<'a>,
        writers: Writers,
        focused: Option<usize>,
        requests: &'c mut Requests,
    ) -> Self {
        Self {
            registries,
            writers,
            focused,
            requests,
        }
    }

    /// Write to the output channel.
    pub fn write(&mut self, text: &str) {
        self.writers.write(text);
    }

    /// Write to the error channel, with the configured error style.
    pub fn write_error(&mut self, text: &str) {
        self.writers.write_error(text);
    }

    /// Formatted write to the error channel, decorated as one message.
    pub fn write_error_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.writers.write_error_fmt(args);
    }

    /// All three tables.
    pub fn registries(&self) -> Registries<'a> {
        self.registries
    }

    /// The command table.
    pub fn commands(&self) -> &'a [Command<'a>] {
        self.registries.commands
    }

    /// The application table.
    pub fn applications(&self) -> &'a [Application<'a>] {
        self.registries.applications
    }

    /// The service table.
    pub fn services(&self) -> &'a [Service<'a>] {
        self.registries.services
    }

    /// The application holding focus, if any.
    pub fn focused_application(&self) -> Option<&'a Application<'a>> {
        self.focused.and_then(|idx| self.registries.applications.get(idx))
    }

    /// Set a service to `STARTING`. Returns `false` if no service has
    /// that name.
    pub fn start_service(&mut self, name: &str) -> bool {
        self.set_service_state(name, ServiceState::STARTING)
    }

    /// Set a service to `STOPPED`. Returns `false` if no service has that
    /// name.
    pub fn stop_service(&mut self, name: &str) -> bool {
        self.set_service_state(name, ServiceState::STOPPED)
    }

    /// Set a named service's state. Returns `false` if no service has that
    /// name.
    pub fn set_service_state(&mut self, name: &str, state: ServiceState) -> bool {
        match self.registries.find_service(name) {
            Some(service) => {
                debug!("service {=str} set to {}", service.name, state);
                service.set_state(state);
                true
            }
            None => false,
        }
    }

    /// Ask the engine to release the focused application once the current
    /// callback returns. Ignored when nothing is focused.
    pub fn request_close(&mut self) {
        self.requests.close_application = true;
    }
}

impl fmt::Write for Context<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.writers.write(s);
        Ok(())
    }
}

impl fmt::Debug for Context<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("focused", &self.focused)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}
