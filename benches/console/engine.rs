use cmdengine::console::{
    Args, Command, Context, Engine, EngineConfig, IntroPolicy, Registries, Service, ServiceState,
};
use criterion::{Criterion, Throughput};
use std::hint::black_box;

fn sink(text: &str) {
    black_box(text);
}

fn noop(_args: &Args<'_>, _ctx: &mut Context<'_, '_>) -> Option<&'static str> {
    Some("\r\nok\r\n")
}

fn counter(state: ServiceState, _ctx: &mut Context<'_, '_>) -> ServiceState {
    ServiceState(state.0.wrapping_add(1) % 0x80)
}

fn config() -> EngineConfig<'static> {
    EngineConfig {
        output: Some(sink),
        error: Some(sink),
        intro_policy: IntroPolicy::OnInitialize,
        ..EngineConfig::default()
    }
}

fn ready<const N: usize>(engine: &mut Engine<'_, N>) {
    for _ in 0..2 {
        let _ = engine.do_tasks();
    }
}

pub fn bench_keystrokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystrokes");
    let line = b"led on 25 blink fast";
    group.throughput(Throughput::Bytes(line.len() as u64));

    let mut engine = Engine::<128>::new(config(), Registries::empty());
    ready(&mut engine);

    group.bench_function("type_and_interrupt", |b| {
        b.iter(|| {
            for &byte in line {
                let _ = engine.add_keystroke(black_box(byte));
            }
            // Ctrl+C empties the line for the next iteration
            let _ = engine.add_keystroke(0x03);
        })
    });
    group.finish();
}

pub fn bench_command_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_round_trip");
    let commands = [Command::new("noop", &noop)];
    let mut engine = Engine::<64>::new(config(), Registries::new(&commands, &[], &[]));
    ready(&mut engine);

    group.bench_function("noop", |b| {
        b.iter(|| {
            for &byte in b"noop 1 2\r" {
                let _ = engine.add_keystroke(byte);
            }
            for _ in 0..6 {
                let _ = engine.do_tasks();
            }
        })
    });
    group.finish();
}

pub fn bench_service_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("service_ticks");
    let (mut a, mut b, mut c2, mut d) = (counter, counter, counter, counter);
    let services = [
        Service::new("a", &mut a),
        Service::new("b", &mut b).stopped(),
        Service::new("c", &mut c2).stopped(),
        Service::new("d", &mut d),
    ];
    let mut engine = Engine::<32>::new(config(), Registries::new(&[], &[], &services));
    ready(&mut engine);

    group.throughput(Throughput::Elements(100));
    group.bench_function("idle_100_ticks", |bencher| {
        bencher.iter(|| {
            for _ in 0..100 {
                let _ = black_box(engine.do_tasks());
            }
        })
    });
    group.finish();
}
