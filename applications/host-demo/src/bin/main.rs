//! Console demo on a desktop terminal.
//!
//! stdin stands in for the UART receive line and stdout for the transmit
//! line. The terminal stays in cooked mode, so input arrives a line at a
//! time and Enter is translated to the carriage return the engine expects.
//! Type `~` to leave a focused application.

use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use cmdengine::console::{
    Application, ApplicationHandler, Args, Command, Context, Engine, EngineConfig, ErrorStyle,
    Registries, Service, ServiceState, builtins,
};

fn write_stdout(text: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

fn example_command(_args: &Args<'_>, ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    // kick the on-demand service
    ctx.start_service("example-2");
    Some("\r\nDone.\r\n")
}

/// Echoes keys in brackets; `s` starts the on-demand service.
struct ExampleApp {
    keys: usize,
}

impl ApplicationHandler for ExampleApp {
    fn on_input(&mut self, key: u8, ctx: &mut Context<'_, '_>) {
        self.keys += 1;
        match key {
            b's' => {
                ctx.start_service("example-2");
                ctx.write("\r\n[example-2 started]\r\n");
            }
            b'\r' => ctx.write("\r\n"),
            _ => {
                let buf = [b'[', key, b']'];
                if let Ok(text) = core::str::from_utf8(&buf) {
                    ctx.write(text);
                }
            }
        }
    }

    fn on_start(&mut self, args: &Args<'_>, ctx: &mut Context<'_, '_>) {
        self.keys = 0;
        ctx.write("\r\nExample process");
        for arg in args.iter() {
            ctx.write(" ");
            ctx.write(arg);
        }
        ctx.write("\r\n");
    }

    fn on_close(&mut self, ctx: &mut Context<'_, '_>) {
        let _ = write!(ctx, "\r\n[Ended after {} keys]\r\n", self.keys);
    }
}

/// Runs forever, cycling between its two working states.
fn perpetual(state: ServiceState, _ctx: &mut Context<'_, '_>) -> ServiceState {
    match state.0 {
        0x00 | 0x01 | 0x02 => ServiceState(0x01),
        _ => ServiceState::STOPPED,
    }
}

/// Two steps, then stops until started again.
fn on_demand(state: ServiceState, ctx: &mut Context<'_, '_>) -> ServiceState {
    match state.0 {
        0x00 => ServiceState(0x01),
        0x01 => ServiceState(0x02),
        _ => {
            ctx.write("\r\n[example-2 finished]\r\n");
            ServiceState::STOPPED
        }
    }
}

fn main() {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for byte in stdin.lock().bytes() {
            let Ok(byte) = byte else { break };
            let byte = if byte == b'\n' { b'\r' } else { byte };
            if tx.send(byte).is_err() {
                break;
            }
        }
    });

    let example = Command::new("example-command", &example_command)
        .with_help("Starts example-2 and reports back.");
    let commands = [
        builtins::HELP,
        builtins::CLEAR,
        builtins::SERVICES,
        builtins::START,
        builtins::STOP,
        example,
    ];

    let mut app = ExampleApp { keys: 0 };
    let applications = [Application::new("example.exe", &mut app).with_help("Example process")];

    let (mut first, mut second) = (perpetual, on_demand);
    let services = [
        Service::new("example-1", &mut first)
            .with_help("Example background service that runs forever"),
        Service::new("example-2", &mut second)
            .with_help("Example background service that runs on demand")
            .stopped(),
    ];

    let config = EngineConfig {
        intro: Some("\r\ncmdengine host demo, type 'help' for a list of commands\r\n"),
        interrupt_key: b'~',
        output: Some(write_stdout),
        error: Some(write_stdout),
        error_style: ErrorStyle::Highlighted,
        ..EngineConfig::default()
    };
    let registries = Registries::new(&commands, &applications, &services);
    if let Err(e) = registries.check_unique_names() {
        eprintln!("registry error: {e}");
        return;
    }
    let mut engine = Engine::<256>::new(config, registries);

    write_stdout("press Enter to wake the console\n");
    loop {
        match rx.try_recv() {
            Ok(byte) => {
                let _ = engine.add_keystroke(byte);
            }
            Err(mpsc::TryRecvError::Empty) => thread::sleep(Duration::from_millis(1)),
            Err(mpsc::TryRecvError::Disconnected) => break,
        }
        let _ = engine.do_tasks();
    }
}
