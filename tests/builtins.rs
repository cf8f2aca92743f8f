mod common;

use cmdengine::console::ansi::{CLEAR_ATTRIBUTES, CLEAR_SCREEN, MAKE_GREEN, MAKE_RED};
use cmdengine::console::{
    Application, ApplicationHandler, Command, Context, Engine, Registries, Service, ServiceState,
    builtins,
};
use common::*;

struct Viewer;

impl ApplicationHandler for Viewer {
    fn on_input(&mut self, _key: u8, _ctx: &mut Context<'_, '_>) {}
}

fn hold(state: ServiceState, _ctx: &mut Context<'_, '_>) -> ServiceState {
    state
}

fn standard_commands() -> [Command<'static>; 5] {
    [
        builtins::HELP,
        builtins::CLEAR,
        builtins::SERVICES,
        builtins::START,
        builtins::STOP,
    ]
}

#[test]
fn clear_returns_the_clear_screen_sequence() {
    let commands = standard_commands();
    let mut engine = Engine::<32>::new(config(), Registries::new(&commands, &[], &[]));
    boot(&mut engine);
    clear_captured();

    enter_line(&mut engine, "clear");
    assert_eq!(take_output(), format!("clear{CLEAR_SCREEN}$> "));
}

#[test]
fn help_lists_every_registry() {
    let commands = standard_commands();
    let mut viewer = Viewer;
    let mut blink = hold;
    let applications = [Application::new("view", &mut viewer)];
    let services = [Service::new("blink", &mut blink).with_help("Blinks the status led")];
    let mut engine =
        Engine::<32>::new(config(), Registries::new(&commands, &applications, &services));
    boot(&mut engine);
    clear_captured();

    enter_line(&mut engine, "help");
    let out = take_output();

    let commands_at = out.find("Commands:").unwrap();
    let applications_at = out.find("Applications:").unwrap();
    let services_at = out.find("Services:").unwrap();
    assert!(commands_at < applications_at && applications_at < services_at);

    assert!(out.contains("help\r\n\tProvides descriptions for commands.\r\n"));
    assert!(out.contains("stop\r\n\tStops a background service.\r\n"));
    assert!(out.contains("view\r\n\t[ No description ]\r\n"));
    assert!(out.contains("blink\t\t["));
    assert!(out.contains("\tBlinks the status led\r\n"));
    assert!(out.ends_with("\r\n$> "));
}

#[test]
fn services_shows_state_label_and_hex() {
    let commands = standard_commands();
    let (mut a, mut b) = (hold, hold);
    let services = [
        Service::new("blink", &mut a),
        Service::new("logger", &mut b).stopped(),
    ];
    services[0].set_state(ServiceState(0x2A));
    let mut engine = Engine::<32>::new(config(), Registries::new(&commands, &[], &services));
    boot(&mut engine);
    clear_captured();

    enter_line(&mut engine, "services");
    let out = take_output();
    assert!(out.contains(&format!(
        "blink\t\t[{MAKE_GREEN}Running{CLEAR_ATTRIBUTES}] / [0x2A]\r\n\t[ No description ]\r\n"
    )));
    assert!(out.contains(&format!(
        "logger\t\t[{MAKE_RED}Stopped{CLEAR_ATTRIBUTES}] / [0xFF]\r\n"
    )));
}

#[test]
fn stop_and_start_change_service_state() {
    let commands = standard_commands();
    let mut a = hold;
    let services = [Service::new("blink", &mut a)];
    let mut engine = Engine::<32>::new(config(), Registries::new(&commands, &[], &services));
    boot(&mut engine);
    clear_captured();

    enter_line(&mut engine, "stop blink");
    assert!(services[0].is_stopped());
    assert_eq!(take_output(), "stop blink\r\nblink Stopped\r\n$> ");

    enter_line(&mut engine, "start blink");
    assert!(services[0].state().is_starting());
    assert_eq!(take_output(), "start blink\r\nblink Starting\r\n$> ");
}

#[test]
fn start_without_a_name_reports_an_error() {
    let commands = standard_commands();
    let mut engine = Engine::<32>::new(config(), Registries::new(&commands, &[], &[]));
    boot(&mut engine);
    clear_captured();

    enter_line(&mut engine, "start");
    assert_eq!(take_errors(), "\r\nMissing service name\r\n");

    enter_line(&mut engine, "stop ghost");
    assert_eq!(take_errors(), "\r\nService 'ghost' not found\r\n");
}
