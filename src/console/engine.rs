//! The command engine: keystroke processing, dispatch, focus and the
//! outer state machine.
//!
//! Two entry points drive everything. [`Engine::add_keystroke`] consumes
//! one input byte; [`Engine::do_tasks`] advances the state machine by one
//! step. Neither blocks and neither may be called while the other is
//! running.
//!
//! ```text
//!                  ┌──────────────┐
//!   Initialize ──▶ │ReadyForInput │◀──────────────┐
//!                  └──────┬───────┘               │
//!                         ▼                       │
//!   ┌─────────────▶ ┌──────────┐ ─ pending ─▶ ExecuteCommand
//!   │               │   Loop   │ ─ to parse ─▶ ParseForCommand ─┐
//!   │               └────┬─────┘                                │
//!   │                    ▼                                      ▼
//!   └──────────── ExecuteServices ◀──────────── ExecuteApplication
//! ```

use super::config::{EngineConfig, IntroPolicy};
use super::context::{Context, Requests};
use super::error::EngineError;
use super::line_buffer::LineBuffer;
use super::parser::{Args, parse_line, split_name};
use super::registry::{Application, Registries};
use super::scheduler::Scheduler;
use super::writer::Writers;
use super::ansi;

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII delete character (0x7F), what most terminals send for backspace.
pub const ASCII_DEL: u8 = 0x7F;
/// ASCII NUL, ignored on input.
pub const ASCII_NUL: u8 = 0x00;

/// Outer state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Count services and reset the line. Entered on construction and reset.
    Initialize,
    /// Clear the line and write the prompt if nothing is focused.
    ReadyForInput,
    /// Pick the next piece of work from the pending signals.
    Loop,
    /// Resolve the submitted line against commands and applications.
    ParseForCommand,
    /// Run the command resolved on an earlier tick.
    ExecuteCommand,
    /// An application is focused; only services are stepped.
    ExecuteApplication,
    /// Step one background service.
    ExecuteServices,
}

/// Signal raised by the keystroke side for the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Nothing pending.
    ReadyForKeyInput,
    /// A non-empty line was submitted.
    ReadyToParse,
    /// The prompt should be written again.
    ReadyToShowPrompt,
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EngineState::Initialize => defmt::write!(f, "Initialize"),
            EngineState::ReadyForInput => defmt::write!(f, "ReadyForInput"),
            EngineState::Loop => defmt::write!(f, "Loop"),
            EngineState::ParseForCommand => defmt::write!(f, "ParseForCommand"),
            EngineState::ExecuteCommand => defmt::write!(f, "ExecuteCommand"),
            EngineState::ExecuteApplication => defmt::write!(f, "ExecuteApplication"),
            EngineState::ExecuteServices => defmt::write!(f, "ExecuteServices"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            KeyState::ReadyForKeyInput => defmt::write!(f, "ReadyForKeyInput"),
            KeyState::ReadyToParse => defmt::write!(f, "ReadyToParse"),
            KeyState::ReadyToShowPrompt => defmt::write!(f, "ReadyToShowPrompt"),
        }
    }
}

/// One console instance over one input stream.
///
/// `N` is the line buffer size; a line holds at most `N - 1` bytes.
///
/// # Examples
///
/// ```rust
/// use cmdengine::console::{Args, Command, Context, Engine, EngineConfig, Registries};
///
/// fn hello(_args: &Args<'_>, _ctx: &mut Context<'_, '_>) -> Option<&'static str> {
///     Some("\r\nHello!\r\n")
/// }
///
/// let commands = [Command::new("hello", &hello)];
/// let config = EngineConfig { output: Some(|s| print!("{}", s)), ..EngineConfig::default() };
/// let mut engine = Engine::<64>::new(config, Registries::new(&commands, &[], &[]));
///
/// for &byte in b"\rhello\r" {
///     let _ = engine.add_keystroke(byte);
///     for _ in 0..4 {
///         let _ = engine.do_tasks();
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Engine<'a, const N: usize> {
    line: LineBuffer<N>,
    registries: Registries<'a>,
    writers: Writers,
    prompt: &'a str,
    intro: Option<&'a str>,
    intro_policy: IntroPolicy,
    line_terminator: u8,
    interrupt_key: u8,
    state: EngineState,
    key_state: KeyState,
    focused: Option<usize>,
    scheduler: Scheduler,
    parsed_command: Option<usize>,
    // set from submission until the line has been resolved and run
    line_locked: bool,
    awake: bool,
    requests: Requests,
}

impl<'a, const N: usize> Engine<'a, N> {
    /// Build an engine. Configuration and registries are fixed from here on.
    pub fn new(config: EngineConfig<'a>, registries: Registries<'a>) -> Self {
        Self {
            line: LineBuffer::new(),
            registries,
            writers: config.writers(),
            prompt: config.prompt,
            intro: config.intro,
            intro_policy: config.intro_policy,
            line_terminator: config.line_terminator,
            interrupt_key: config.interrupt_key,
            state: EngineState::Initialize,
            key_state: KeyState::ReadyForKeyInput,
            focused: None,
            scheduler: Scheduler::new(),
            parsed_command: None,
            line_locked: false,
            awake: false,
            requests: Requests::default(),
        }
    }

    /// Current outer state, the one the next [`do_tasks`](Self::do_tasks)
    /// call will run.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Signal currently raised by the keystroke side.
    pub fn key_state(&self) -> KeyState {
        self.key_state
    }

    /// Current content of the input line.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// The command, application and service tables.
    pub fn registries(&self) -> Registries<'a> {
        self.registries
    }

    /// The application holding focus, if any.
    pub fn focused_application(&self) -> Option<&'a Application<'a>> {
        self.focused.and_then(|idx| self.registries.applications.get(idx))
    }

    /// Whether a resolved command is waiting for the next tick.
    pub fn has_pending_command(&self) -> bool {
        self.parsed_command.is_some()
    }

    /// Whether a submitted line is held until it has been resolved and run.
    /// Input other than the interrupt key is dropped meanwhile.
    pub fn is_line_pending(&self) -> bool {
        self.line_locked
    }

    /// The service scheduler, for inspecting its round-robin cursor.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Restart from `Initialize`, releasing any focused application.
    ///
    /// The next keystroke counts as the first one again.
    pub fn reset(&mut self) {
        self.close_application();
        self.state = EngineState::Initialize;
        self.key_state = KeyState::ReadyForKeyInput;
        self.parsed_command = None;
        self.line_locked = false;
        self.awake = false;
        self.line.clear();
    }

    /// Feed one input byte. Never blocks.
    ///
    /// An `Err` has already been reported through the error writer; the
    /// engine keeps accepting input.
    pub fn add_keystroke(&mut self, key: u8) -> Result<(), EngineError> {
        if self.focused.is_some() {
            if key == self.interrupt_key {
                self.close_application();
            } else {
                self.route_to_application(key);
            }
            return Ok(());
        }

        if !self.awake && self.intro_policy == IntroPolicy::OnFirstKeystroke {
            self.wake();
            return Ok(());
        }

        // the interrupt also cancels a line that is still pending
        if key == self.interrupt_key && key != self.line_terminator {
            self.cancel_line();
            return Ok(());
        }

        if self.line_locked {
            trace!("line pending, dropping {=u8:#x}", key);
            return Ok(());
        }

        match key {
            _ if key == self.line_terminator => {
                if self.line.is_empty() {
                    self.key_state = KeyState::ReadyToShowPrompt;
                    self.writers.write(ansi::CRLF);
                } else {
                    self.key_state = KeyState::ReadyToParse;
                    self.line_locked = true;
                }
            }
            ASCII_DEL | ASCII_BACKSPACE => {
                if self.line.backspace() {
                    self.echo(key);
                }
            }
            ASCII_NUL => {}
            0x01..=0x1F => {
                let error = EngineError::UnsupportedCharacter(key);
                self.writers.report(&error);
                return Err(error);
            }
            _ => {
                if let Err(error) = self.line.push(key) {
                    self.writers.report(&error);
                    return Err(error);
                }
                // multi-byte characters echo once their last byte is in
                if let Some(ch) = self.line.last_char() {
                    self.writers.write(ch);
                }
            }
        }

        Ok(())
    }

    /// Advance the state machine by one step. Never blocks.
    ///
    /// Returns `Err(EngineError::NotFound)` on the tick that failed to
    /// resolve a name; the error has already been reported.
    pub fn do_tasks(&mut self) -> Result<(), EngineError> {
        trace!("tick {}", self.state);
        match self.state {
            EngineState::Initialize => {
                self.scheduler.count_services(self.registries.services);
                self.line.clear();
                self.line_locked = false;
                if self.intro_policy == IntroPolicy::OnInitialize && !self.awake {
                    self.awake = true;
                    self.write_intro();
                }
                self.state = EngineState::ReadyForInput;
            }
            EngineState::ReadyForInput => self.ready_for_input(),
            EngineState::Loop => {
                self.state = if self.parsed_command.is_some() {
                    EngineState::ExecuteCommand
                } else if self.key_state == KeyState::ReadyToParse {
                    self.key_state = KeyState::ReadyForKeyInput;
                    EngineState::ParseForCommand
                } else if self.key_state == KeyState::ReadyToShowPrompt {
                    self.key_state = KeyState::ReadyForKeyInput;
                    EngineState::ReadyForInput
                } else if self.focused.is_none() {
                    EngineState::ExecuteServices
                } else {
                    EngineState::ExecuteApplication
                };
            }
            EngineState::ParseForCommand => {
                // an interrupt may have cancelled the line since Loop
                let resolved = if self.line_locked { self.resolve() } else { Ok(()) };
                self.state = if self.focused.is_none() {
                    EngineState::ExecuteServices
                } else {
                    EngineState::ExecuteApplication
                };
                return resolved;
            }
            EngineState::ExecuteCommand => {
                self.execute_command();
                self.ready_for_input();
            }
            // Per-tick application stepping has no hook yet.
            EngineState::ExecuteApplication | EngineState::ExecuteServices => {
                self.run_services();
                self.state = EngineState::Loop;
            }
        }
        Ok(())
    }

    /// Release the focused application: `on_close`, then back to the
    /// prompt. Does nothing when no application is focused.
    pub fn close_application(&mut self) {
        let Some(idx) = self.focused.take() else {
            return;
        };
        let registries = self.registries;
        let app = &registries.applications[idx];
        debug!("closing {=str}", app.name);

        if let Some(mut handler) = app.handler() {
            let mut ctx = Context::new(registries, self.writers, Some(idx), &mut self.requests);
            handler.on_close(&mut ctx);
        }
        self.requests.take_close();
        self.key_state = KeyState::ReadyToShowPrompt;
    }

    fn wake(&mut self) {
        debug!("wake-up byte received");
        self.awake = true;
        self.write_intro();
        self.line.clear();
        self.key_state = KeyState::ReadyToShowPrompt;
    }

    fn write_intro(&self) {
        if let Some(intro) = self.intro {
            self.writers.write(intro);
        }
    }

    fn cancel_line(&mut self) {
        if self.line_locked {
            debug!("pending line cancelled");
        }
        self.line.clear();
        self.line_locked = false;
        self.parsed_command = None;
        self.key_state = KeyState::ReadyToShowPrompt;
        self.writers.write(ansi::CRLF);
    }

    fn ready_for_input(&mut self) {
        self.line.clear();
        self.line_locked = false;
        if self.focused.is_none() && self.awake {
            self.writers.write(self.prompt);
            // the prompt a pending signal asked for is the one just written
            if self.key_state == KeyState::ReadyToShowPrompt {
                self.key_state = KeyState::ReadyForKeyInput;
            }
        }
        self.state = EngineState::Loop;
    }

    fn echo(&self, key: u8) {
        let echo = [key];
        if let Ok(s) = core::str::from_utf8(&echo) {
            self.writers.write(s);
        }
    }

    fn route_to_application(&mut self, key: u8) {
        let Some(idx) = self.focused else {
            return;
        };
        let registries = self.registries;
        if let Some(mut handler) = registries.applications[idx].handler() {
            let mut ctx = Context::new(registries, self.writers, Some(idx), &mut self.requests);
            handler.on_input(key, &mut ctx);
        }
        self.honour_close_request();
    }

    fn honour_close_request(&mut self) {
        if self.requests.take_close() {
            self.close_application();
        }
    }

    /// Resolve the line's name against commands, then applications.
    fn resolve(&mut self) -> Result<(), EngineError> {
        let registries = self.registries;
        let (name, rest) = split_name(self.line.as_str());

        if let Some(idx) = registries.find_command(name) {
            debug!("resolved command {=str}", name);
            self.parsed_command = Some(idx);
            return Ok(());
        }

        if let Some(idx) = registries.find_application(name) {
            debug!("focusing {=str}", name);
            self.focused = Some(idx);
            self.key_state = KeyState::ReadyForKeyInput;
            {
                let args = Args::parse(rest);
                if let Some(mut handler) = registries.applications[idx].handler() {
                    let mut ctx =
                        Context::new(registries, self.writers, Some(idx), &mut self.requests);
                    handler.on_start(&args, &mut ctx);
                }
            }
            self.line.clear();
            self.line_locked = false;
            self.honour_close_request();
            return Ok(());
        }

        self.writers.report_not_found(name);
        self.key_state = KeyState::ReadyToShowPrompt;
        Err(EngineError::NotFound)
    }

    fn execute_command(&mut self) {
        let Some(idx) = self.parsed_command.take() else {
            return;
        };
        let registries = self.registries;
        let command = &registries.commands[idx];
        let output = {
            let parsed = parse_line(self.line.as_str());
            let mut ctx = Context::new(registries, self.writers, self.focused, &mut self.requests);
            command.handler.execute(&parsed.args, &mut ctx)
        };

        if let Some(output) = output.filter(|text| !text.is_empty()) {
            self.writers.write(output);
        }
        self.line.clear();
        self.honour_close_request();
    }

    fn run_services(&mut self) {
        let registries = self.registries;
        let mut ctx = Context::new(registries, self.writers, self.focused, &mut self.requests);
        self.scheduler.tick(registries.services, &mut ctx);
        self.honour_close_request();
    }
}
