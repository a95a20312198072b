//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::client::{api::AdvocateClient, session::FetchRequest};

use super::app::{App, FetchOutcome};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

const TICK: Duration = Duration::from_millis(50);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the advocate browser against `client` until the user quits
pub async fn run(client: AdvocateClient, page_size: u64) -> Result<()> {
    info!(url = client.url(), page_size, "starting advocate browser");
    let mut terminal = init_terminal()?;

    let mut app = App::new(page_size);
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_fetch(&client, &tx, app.session.load());

    let result = run_loop(&mut terminal, &mut app, &client, &tx, &mut rx);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &AdvocateClient,
    tx: &UnboundedSender<FetchOutcome>,
    rx: &mut UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.apply(outcome);
        }

        if let Some(request) = app.poll_search(Instant::now()) {
            spawn_fetch(client, tx, request);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // crossterm polling blocks, keep the runtime free for fetches
        let event = tokio::task::block_in_place(|| poll_event(TICK))?;
        if let Some(Event::Key(key)) = event {
            match handle_key(app, key, Instant::now()) {
                HandleResult::Quit => app.should_quit = true,
                HandleResult::Continue => {}
                HandleResult::Fetch(request) => spawn_fetch(client, tx, request),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_fetch(client: &AdvocateClient, tx: &UnboundedSender<FetchOutcome>, request: FetchRequest) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.fetch_page(&request.query).await;
        if let Err(err) = &result {
            error!(generation = request.generation, "{}", err);
        }
        // receiver is gone once the browser has quit
        let _ = tx.send(FetchOutcome {
            generation: request.generation,
            result,
        });
    });
}
