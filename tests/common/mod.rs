//! Shared helpers for the console integration tests.
//!
//! Writer callbacks are plain `fn(&str)`, so output is captured through
//! thread-local sinks; every test runs on its own thread and sees only its
//! own output.

#![allow(dead_code)]

use std::cell::RefCell;

use cmdengine::console::{Engine, EngineConfig};

thread_local! {
    static OUTPUT: RefCell<String> = const { RefCell::new(String::new()) };
    static ERRORS: RefCell<String> = const { RefCell::new(String::new()) };
}

pub fn capture_output(text: &str) {
    OUTPUT.with(|out| out.borrow_mut().push_str(text));
}

pub fn capture_error(text: &str) {
    ERRORS.with(|err| err.borrow_mut().push_str(text));
}

/// Drain everything written to the output channel so far.
pub fn take_output() -> String {
    OUTPUT.with(|out| std::mem::take(&mut *out.borrow_mut()))
}

/// Drain everything written to the error channel so far.
pub fn take_errors() -> String {
    ERRORS.with(|err| std::mem::take(&mut *err.borrow_mut()))
}

pub fn clear_captured() {
    take_output();
    take_errors();
}

/// Default configuration wired to the capture sinks.
pub fn config() -> EngineConfig<'static> {
    EngineConfig {
        output: Some(capture_output),
        error: Some(capture_error),
        ..EngineConfig::default()
    }
}

/// Run `ticks` scheduler steps.
pub fn pump<const N: usize>(engine: &mut Engine<'_, N>, ticks: usize) {
    for _ in 0..ticks {
        let _ = engine.do_tasks();
    }
}

/// Send the wake-up byte and run until the first prompt is out.
pub fn boot<const N: usize>(engine: &mut Engine<'_, N>) {
    let _ = engine.add_keystroke(b'\r');
    pump(engine, 2);
}

/// Feed bytes without ticking in between.
pub fn type_bytes<const N: usize>(engine: &mut Engine<'_, N>, bytes: &[u8]) {
    for &byte in bytes {
        let _ = engine.add_keystroke(byte);
    }
}

/// Type a line, press enter and run enough ticks for it to be resolved,
/// executed and the prompt shown again.
pub fn enter_line<const N: usize>(engine: &mut Engine<'_, N>, line: &str) {
    type_bytes(engine, line.as_bytes());
    let _ = engine.add_keystroke(b'\r');
    pump(engine, 6);
}
