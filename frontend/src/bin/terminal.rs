use chrono::Local;
use clap::{Parser, ValueEnum};
use env_logger::Target;
use frontend::control::{self, Command};
use frontend::narrator::Narrator;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use smol::Timer;
use smol::future;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use xiangqi::display_format::DisplayFormat;
use xiangqi::narration;
use xiangqi::piece::Side;
use xiangqi::selector::Strategy;
use xiangqi::session::{Session, SessionConfig};

const TICK: Duration = Duration::from_millis(50);

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Player {
    Red,
    Black,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Selector {
    Sample,
    Enumerate,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Level {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug)]
#[command(about = "play xiangqi in the terminal against a random opponent")]
struct Arguments {
    #[arg(long, value_enum, default_value_t = Player::Red, help = "side played from the keyboard")]
    human: Player,

    #[arg(long, value_enum, default_value_t = Selector::Sample, help = "how the opponent picks moves")]
    strategy: Selector,

    #[arg(long, default_value_t = Strategy::DEFAULT_ATTEMPTS, help = "draws per turn for the sampling opponent")]
    attempts: u32,

    #[arg(long, default_value_t = 1000)]
    move_delay_ms: u64,

    #[arg(long, default_value_t = 3000)]
    reset_delay_ms: u64,

    #[arg(long, help = "seed for a reproducible opponent")]
    seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    english: bool,

    #[arg(long, default_value_t = false, help = "disable terminal colours")]
    no_effects: bool,

    #[arg(long, help = "program used to speak announcements, e.g. say or espeak")]
    speech: Option<String>,

    #[arg(long, help = "append logs to this file instead of stderr")]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Level::Warn)]
    log_level: Level,
}

impl Arguments {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            human: match self.human {
                Player::Red => Side::Red,
                Player::Black => Side::Black,
            },
            strategy: match self.strategy {
                Selector::Sample => Strategy::Sample {
                    attempts: self.attempts,
                },
                Selector::Enumerate => Strategy::Enumerate,
            },
            move_delay: Duration::from_millis(self.move_delay_ms),
            reset_delay: Duration::from_millis(self.reset_delay_ms),
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => LevelFilter::Off,
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    init_logging(&arguments)?;

    DisplayFormat::set_default_chinese(!arguments.english);
    DisplayFormat::set_default_effects(!arguments.no_effects);

    let config = arguments.session_config();
    let mut random = match arguments.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (sender, commands) = smol::channel::unbounded();
    thread::spawn(move || control::begin(sender));

    let narrator = arguments.speech.clone().map(Narrator::spawn);
    smol::block_on(async {
        let mut session = Session::new(config, Instant::now());
        info!("starting session with {:?}", session.config());
        println!("{}", session.game().display(DisplayFormat::pretty()));

        loop {
            let next = future::or(async { Some(commands.recv().await) }, async {
                Timer::after(TICK).await;
                None
            })
            .await;

            let now = Instant::now();
            let (events, redraw) = match next {
                Some(Ok(Command::Click { at })) => {
                    if let Some(reason) = refuse_click(&session, DisplayFormat::pretty()) {
                        println!("{reason}");
                        continue;
                    }
                    (session.click(at, now), true)
                }
                Some(Ok(Command::Restart)) => (session.restart(now), true),
                Some(Ok(Command::Board)) => (Vec::new(), true),
                Some(Ok(Command::Quit)) | Some(Err(_)) => break,
                None => (session.tick(now, &mut random), false),
            };

            if redraw || !events.is_empty() {
                println!("{}", session.game().display(DisplayFormat::pretty()));
            }

            if let Some(text) = narration::announce(&events, DisplayFormat::pretty()) {
                println!("{text}");
                if let Some(narrator) = &narrator {
                    narrator.say(&text);
                }
            }
        }
    });

    Ok(())
}

fn init_logging(arguments: &Arguments) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(arguments.log_level.into())
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                Local::now().format("%T%.3f"),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        });

    if let Some(path) = &arguments.log_file {
        let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        builder.target(Target::Pipe(Box::new(std::io::BufWriter::new(file))));
    }

    builder.init();
    Ok(())
}

/// Why a click cannot be taken right now, if it cannot.
fn refuse_click(session: &Session, format: DisplayFormat) -> Option<String> {
    if let Some(outcome) = session.game().outcome() {
        return Some(outcome.display(format).to_string());
    }
    if !session.is_human_turn() {
        return Some(format!("not your turn, {} is playing", session.game().turn()));
    }
    None
}
