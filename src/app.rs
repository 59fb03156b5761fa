//! Application runtime: terminal lifecycle, worker tasks, and the event loop.
//!
//! The loop owns the [`AppState`]; the fetch workers only resolve requests
//! and report outcomes over channels, so every state mutation happens here.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::config;
use crate::logic::detail_session::{self, DetailOutcome};
use crate::logic::search_session::{self, SearchOutcome};
use crate::logic::watched::{JsonFileRepository, WatchedList};
use crate::sources::CatalogConfig;
use crate::state::{AppState, QueryInput};

/// What: Run the application until the user exits.
///
/// Inputs:
/// - None (settings and the persisted watched list are loaded here).
///
/// Output:
/// - `Ok(())` on a clean exit; terminal modes are restored on the way out.
///
/// Details:
/// - Spawns one search worker and one detail worker plus a blocking thread
///   that forwards terminal events into the async loop.
pub async fn run() -> io::Result<()> {
    let settings = config::settings();
    if settings.api_key.is_empty() {
        tracing::warn!("no catalog api key configured; searches will fail until one is set");
    }
    let catalog = CatalogConfig::from(&settings);

    let mut app = AppState {
        layout_left_pct: settings.layout_left_pct,
        layout_right_pct: settings.layout_right_pct,
        watched: WatchedList::load(Box::new(JsonFileRepository::new(
            config::lists_dir().join("watched.json"),
        ))),
        ..Default::default()
    };

    let (query_tx, query_rx) = mpsc::unbounded_channel::<QueryInput>();
    let (search_outcome_tx, mut search_outcome_rx) = mpsc::unbounded_channel::<SearchOutcome>();
    let (details_tx, details_rx) = mpsc::unbounded_channel::<String>();
    let (detail_outcome_tx, mut detail_outcome_rx) = mpsc::unbounded_channel::<DetailOutcome>();

    tokio::spawn(search_session::run_search_worker(
        catalog.clone(),
        query_rx,
        search_outcome_tx,
    ));
    tokio::spawn(detail_session::run_detail_worker(
        catalog,
        details_rx,
        detail_outcome_tx,
    ));

    // Blocking input thread; ends once the loop drops the receiver
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<CEvent>();
    std::thread::spawn(move || {
        loop {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if input_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {
                    if input_tx.is_closed() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        &query_tx,
        &details_tx,
        &mut input_rx,
        &mut search_outcome_rx,
        &mut detail_outcome_rx,
    )
    .await;

    // Cancel whatever is still in flight; the loop no longer drains outcomes,
    // so no further state mutation can occur.
    search_session::teardown(&mut app);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

#[allow(clippy::too_many_arguments)]
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    details_tx: &mpsc::UnboundedSender<String>,
    input_rx: &mut mpsc::UnboundedReceiver<CEvent>,
    search_outcome_rx: &mut mpsc::UnboundedReceiver<SearchOutcome>,
    detail_outcome_rx: &mut mpsc::UnboundedReceiver<DetailOutcome>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::draw(f, app))?;

        tokio::select! {
            Some(ev) = input_rx.recv() => {
                if crate::events::handle_event(ev, app, query_tx, details_tx) {
                    return Ok(());
                }
            }
            Some(outcome) = search_outcome_rx.recv() => {
                search_session::apply_search_outcome(app, outcome);
            }
            Some(outcome) = detail_outcome_rx.recv() => {
                detail_session::apply_detail_outcome(app, outcome);
            }
            else => return Ok(()),
        }
    }
}
