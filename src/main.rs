use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::process::ExitCode;
use urdu_flashcards::{
    App, AppError, Args, Config, CsvStore, StudySession, WordStore, logger, open_deck, stats, ui,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config_path();
    let (mut config, config_found) = Config::load_reporting(&config_path)?;
    args.apply(&mut config);
    config.validate()?;

    if let Err(e) = logger::init(&config.log) {
        eprintln!("Warning: logging disabled: {e}");
    }
    if config_found {
        tracing::debug!(path = %config_path.display(), "loaded config file");
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
    }
    tracing::info!(data_dir = %config.data.dir.display(), "starting");

    let store = CsvStore::from_config(&config.data);
    let (loaded, load_error) = open_deck(&store);
    let origin = loaded.origin;
    let session = StudySession::new(loaded, &config.study);
    let mut app = App::new(session, store, &config.study, origin);
    if let Some(e) = load_error {
        app.report_load_failure(e);
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result?;

    match app.finish() {
        Ok(record) => {
            if let Err(e) = stats::append_record(&config.data.stats_path(), &record) {
                tracing::warn!("could not save session stats: {}", e);
                eprintln!("Warning: {e}");
            }
            println!(
                "Learned {} word(s) this session, {} left to learn.",
                record.learned, record.remaining
            );
        }
        Err(e) => {
            tracing::error!("final save failed: {}", e);
            eprintln!("Could not save progress: {e}");
        }
    }
    Ok(())
}

async fn run_app<S: WordStore>(terminal: &mut Tui, app: &mut App<S>) -> io::Result<()> {
    let mut events = EventStream::new();

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            _ = app.timer_mut().fired() => app.on_flip_timer(),
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
