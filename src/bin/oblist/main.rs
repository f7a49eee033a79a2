use clap::Parser;
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent},
    terminal::enable_raw_mode,
};
use std::{env, error::Error, process};
use std::{
    io::{self, Stdout},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    time::{Duration, Instant},
};
use tracing::info;
use tui::{backend::CrosstermBackend, Terminal};

use oblist::{
    components::ObjectsList,
    providers::{filesystem::FilesystemSource, manifest::ManifestSource, EntrySource},
    screens::BrowseScreen,
};

enum Event<I> {
    Input(I),
    Shutdown,
    Tick,
}

fn spawn_sender() -> Receiver<Event<KeyEvent>> {
    let (tx, rx) = mpsc::channel();
    let tick_rate = Duration::from_millis(75);

    tokio::spawn(async move {
        let mut last_tick = Instant::now();

        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout).expect("Timeout occured while polling event") {
                if let CEvent::Key(key) = event::read().expect("Couldn't read key") {
                    if key.code == KeyCode::Esc {
                        tx.send(Event::Shutdown)
                            .expect("Couldn't send shutdown event");
                    } else {
                        tx.send(Event::Input(key))
                            .expect("Couldn't send user input event");
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if let Ok(_) = tx.send(Event::Tick) {
                    last_tick = Instant::now();
                }
            }
        }
    });
    rx
}

fn capture_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, Box<dyn Error>> {
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Sets up file logging. The terminal belongs to the UI, so tracing output
/// goes to a file; the returned guard must be held for the app lifetime.
fn init_logging(path: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_file = std::fs::File::create(path).expect("Couldn't create log file");
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

fn get_source(args: &Args) -> Box<dyn EntrySource> {
    match args.source.as_str() {
        "fs" => {
            let root = args.root.clone().unwrap_or_else(|| {
                env::current_dir().expect("Couldn't obtain path of the current directory")
            });
            Box::new(FilesystemSource::new(root))
        }
        "manifest" => {
            if let Some(path) = &args.manifest {
                match ManifestSource::from_file(path) {
                    Ok(source) => Box::new(source),
                    Err(err) => {
                        println!("Error: Couldn't load the listing manifest: {}", err);
                        process::exit(1);
                    }
                }
            } else {
                println!("Error: Please provide the path of the listing manifest to browse");
                process::exit(1);
            }
        }
        _ => {
            println!("Error: Please provide a valid source");
            process::exit(1);
        }
    }
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _log_guard = args.log_file.as_deref().map(init_logging);
    info!(source = %args.source, "oblist starting");

    let source = get_source(&args);
    let pane = ObjectsList::new(source);

    let terminal = capture_terminal().expect("Couldn't capture terminal");
    let mut screen = BrowseScreen::new(terminal, pane).await;

    let input_channel = spawn_sender();
    loop {
        match input_channel.recv().unwrap() {
            Event::Input(event) => screen.handle_event(event).await,
            Event::Shutdown => {
                screen.shutdown()?;
                break;
            }
            Event::Tick => screen.render().expect("Couldn't render browse screen"),
        }
    }
    Ok(())
}

/// oblist - a terminal browser for object storage listings
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Source backing the listing pane ("fs" or "manifest")
    #[clap(long, short, default_value = "fs")]
    source: String,
    /// Root directory browsed by the fs source
    #[clap(long)]
    root: Option<PathBuf>,
    /// Path to a saved ListBucketResult XML document
    #[clap(long)]
    manifest: Option<PathBuf>,
    /// Write a log to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    run().await?;
    Ok(())
}
