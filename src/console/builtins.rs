//! Ready-made commands a host can put in its command registry.
//!
//! ```rust
//! use cmdengine::console::{Command, Registries, builtins};
//!
//! let commands: [Command<'static>; 3] = [builtins::HELP, builtins::CLEAR, builtins::SERVICES];
//! let registries = Registries::new(&commands, &[], &[]);
//! assert_eq!(registries.find_command("clear"), Some(1));
//! ```

use core::fmt::Write;

use super::ansi::{
    CLEAR_ATTRIBUTES, CLEAR_SCREEN, CRLF, MAKE_BOLD, MAKE_GREEN, MAKE_RED, MAKE_WHITE,
};
use super::context::Context;
use super::parser::Args;
use super::registry::{Command, Service, ServiceState};

const NO_DESCRIPTION: &str = "[ No description ]";

/// `clear`: clears the console.
pub const CLEAR: Command<'static> = Command::new("clear", &clear).with_help("Clears the console.");

/// `help`: lists commands, applications and services.
pub const HELP: Command<'static> =
    Command::new("help", &help).with_help("Provides descriptions for commands.");

/// `services`: lists services with their state.
pub const SERVICES: Command<'static> =
    Command::new("services", &services).with_help("Provides details of the background services.");

/// `start <service>`: set a service to `Starting`.
pub const START: Command<'static> =
    Command::new("start", &start).with_help("Starts a background service.");

/// `stop <service>`: set a service to `Stopped`.
pub const STOP: Command<'static> = Command::new("stop", &stop).with_help("Stops a background service.");

fn clear(_args: &Args<'_>, _ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    Some(CLEAR_SCREEN)
}

fn help(_args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    let rule = "***********************************************************************";
    let _ = write!(
        ctx,
        "{MAKE_BOLD}{MAKE_GREEN}{CRLF}{rule}{CRLF}**{MAKE_WHITE} Available commands in this terminal                               {MAKE_GREEN}**{CRLF}{rule}{CRLF}{CRLF}{CLEAR_ATTRIBUTES}"
    );

    let _ = write!(ctx, "{MAKE_GREEN}Commands:{CRLF}{CLEAR_ATTRIBUTES}");
    for command in ctx.commands() {
        write_entry(ctx, command.name, command.help_text);
    }

    let _ = write!(ctx, "{MAKE_GREEN}{CRLF}Applications:{CRLF}{CLEAR_ATTRIBUTES}");
    for application in ctx.applications() {
        write_entry(ctx, application.name, application.help_text);
    }

    let _ = write!(ctx, "{MAKE_GREEN}{CRLF}Services:{CRLF}{CLEAR_ATTRIBUTES}");
    for service in ctx.services() {
        write_service(ctx, service);
    }

    ctx.write(CRLF);
    None
}

fn services(_args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    let _ = write!(
        ctx,
        "{MAKE_BOLD}{MAKE_GREEN}{CRLF}{CRLF} (*){MAKE_WHITE} Available services in this terminal{CRLF}{CRLF}{CLEAR_ATTRIBUTES}"
    );
    for service in ctx.services() {
        write_service(ctx, service);
    }
    ctx.write(CRLF);
    None
}

fn start(args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    set_state(args, ctx, ServiceState::STARTING)
}

fn stop(args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    set_state(args, ctx, ServiceState::STOPPED)
}

fn set_state(args: &Args<'_>, ctx: &mut Context<'_, '_>, state: ServiceState) -> Option<&'static str> {
    let Some(name) = args.get(0) else {
        ctx.write_error("\r\nMissing service name\r\n");
        return None;
    };

    if ctx.set_service_state(name, state) {
        let _ = write!(ctx, "{CRLF}{} {}{CRLF}", name, state.label());
    } else {
        ctx.write_error_fmt(format_args!("{CRLF}Service '{}' not found{CRLF}", name));
    }
    None
}

fn write_entry(ctx: &mut Context<'_, '_>, name: &str, help_text: Option<&str>) {
    let _ = write!(ctx, "{}{CRLF}\t{}{CRLF}", name, help_text.unwrap_or(NO_DESCRIPTION));
}

fn write_service(ctx: &mut Context<'_, '_>, service: &Service<'_>) {
    let state = service.state();
    let color = if state.is_stopped() { MAKE_RED } else { MAKE_GREEN };
    let _ = write!(
        ctx,
        "{}\t\t[{color}{}{CLEAR_ATTRIBUTES}] / [0x{:02X}]{CRLF}\t{}{CRLF}",
        service.name,
        state.label(),
        state.0,
        service.help_text.unwrap_or(NO_DESCRIPTION),
    );
}
