//! RPG Adventure - headless idle runner.
//!
//! Loads the saved game, drives the 1 Hz tick loop and prints status lines
//! and alerts to the terminal. Rendering beyond that is out of scope; any
//! front end can implement `Presenter` instead.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rpg_adventure::build_info;
use rpg_adventure::core::{Clock, Engine, EngineConfig, GameState, Monster, Presenter, Scheduler};
use rpg_adventure::data::StandardData;
use rpg_adventure::simulator::greedy_step;
use rpg_adventure::utils::store::{FileStore, KeyValueStore};
use std::path::PathBuf;

struct Options {
    ticks: Option<u64>,
    fast: bool,
    autoplay: bool,
    data_dir: Option<PathBuf>,
    export: bool,
    import: Option<String>,
    reset: bool,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        ticks: None,
        fast: false,
        autoplay: false,
        data_dir: None,
        export: false,
        import: None,
        reset: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                options.ticks = Some(parse_number(args.get(i), "--ticks"));
            }
            "--fast" => options.fast = true,
            "--autoplay" => options.autoplay = true,
            "--data-dir" => {
                i += 1;
                options.data_dir = Some(PathBuf::from(required(args.get(i), "--data-dir")));
            }
            "--export" => options.export = true,
            "--import" => {
                i += 1;
                options.import = Some(required(args.get(i), "--import").to_string());
            }
            "--reset" => options.reset = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn required<'a>(value: Option<&'a String>, flag: &str) -> &'a str {
    match value {
        Some(v) => v,
        None => {
            eprintln!("{flag} requires a value");
            std::process::exit(1);
        }
    }
}

fn parse_number(value: Option<&String>, flag: &str) -> u64 {
    required(value, flag).parse().unwrap_or_else(|_| {
        eprintln!("{flag} requires a number");
        std::process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "RPG Adventure - idle RPG runner\n\
         \n\
         Usage: rpg-adventure [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ticks N        Stop after N ticks (default: run until interrupted)\n\
         \x20 --fast           Do not wait between ticks\n\
         \x20 --autoplay       Spend currency and resolve promotions automatically\n\
         \x20 --data-dir DIR   Save directory (default: ~/.rpg-adventure)\n\
         \x20 --export         Print an export code for the current save and exit\n\
         \x20 --import CODE    Replace the current save with an export code\n\
         \x20 --reset          Start a new game\n\
         \x20 --version, -v    Show version\n\
         \x20 --help, -h       Show this help"
    );
}

/// Prints alerts as they happen.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn alert(&mut self, message: &str) {
        println!("  * {message}");
    }
}

fn status_line(state: &GameState, monster: &Monster, dps: f64) -> String {
    format!(
        "Stage {:>4}{} | HP {:>5.1}% | Lv {:>3} | Coins {:>10} | Diamonds {:>5} | SP {:>3} | Helpers {:>2} | DPS {:.1}",
        state.stage,
        if state.is_boss_stage() { " (boss)" } else { "" },
        monster.hp_fraction() * 100.0,
        state.player_lv,
        state.coins,
        state.diamonds,
        state.sp,
        state.helpers.len(),
        dps
    )
}

fn open_store(options: &Options) -> Box<dyn KeyValueStore> {
    let store = match &options.data_dir {
        Some(dir) => FileStore::new(dir),
        None => match FileStore::in_home() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Could not locate a save directory: {e}");
                std::process::exit(1);
            }
        },
    };
    log::debug!("using save directory {}", store.dir().display());
    Box::new(store)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let options = parse_args();

    let mut engine = Engine::load(
        Box::new(StandardData::new()),
        open_store(&options),
        EngineConfig::default(),
        StdRng::from_entropy(),
    );

    if options.reset {
        engine.reset();
        println!("Started a new game.");
    }

    if let Some(code) = &options.import {
        match engine.import_code(code) {
            Ok(()) => println!("Save imported (stage {}).", engine.state().stage),
            Err(e) => {
                eprintln!("Import failed: {e}");
                std::process::exit(1);
            }
        }
    }

    if options.export {
        match engine.export_code() {
            Ok(code) => println!("{code}"),
            Err(e) => {
                eprintln!("Export failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    engine.set_presenter(Box::new(ConsolePresenter));
    let clock = if options.fast {
        Clock::Simulated
    } else {
        Clock::RealTime
    };
    let mut scheduler = Scheduler::new(engine.config().tick_interval_ms, clock);
    let status_every = if options.fast { 60 } else { 1 };

    println!("{}", build_info::version_string());
    let mut tick = 0u64;
    let mut failed = 0u64;
    while options.ticks.map_or(true, |limit| tick < limit) {
        let summary = scheduler.run(&mut engine, 1, |engine, _, _| {
            if tick % status_every == 0 {
                println!(
                    "{}",
                    status_line(engine.state(), engine.monster(), engine.last_dps().total())
                );
            }
        });
        failed += summary.failed_ticks;

        if options.autoplay {
            for action in greedy_step(&mut engine) {
                log::debug!("autoplay: {action:?}");
            }
        }
        tick += 1;
    }

    if let Err(e) = engine.save() {
        log::warn!("final save failed: {e}");
    }
    println!(
        "Ran {tick} ticks ({failed} skipped). {}",
        status_line(engine.state(), engine.monster(), engine.dps().total())
    );
}
