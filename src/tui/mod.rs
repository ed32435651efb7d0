// Module declarations
pub mod widgets;

pub mod action;
pub mod effects;
pub mod keys;
pub mod layout;
pub mod reducer;
pub mod reducers;
pub mod renderer;
pub mod runtime;
pub mod state;
pub mod viewport;

#[cfg(test)]
pub mod testing;


pub use action::Action;
pub use effects::{Effect, JournalEffects};
pub use keys::{key_to_action, mouse_to_action};
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::AppState;
pub use viewport::Viewport;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::journal::JournalProvider;
use layout::ScreenLayout;

/// Input poll interval; also the animation frame period
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main entry point for TUI mode
pub async fn run(
    config: Config,
    today: NaiveDate,
    provider: Arc<dyn JournalProvider>,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let journal_effects = Arc::new(JournalEffects::new(provider));
    let mut runtime = Runtime::new(AppState::new(today, config), journal_effects);

    // Trigger initial journal load
    runtime.dispatch(Action::ReloadJournals);

    let result = run_loop(&mut terminal, &mut runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime,
) -> Result<(), io::Error> {
    loop {
        // Process any actions from effects FIRST (so loads and timers trigger re-render)
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::trace!("LOOP: Processed {} actions", actions_processed);
        }

        runtime.dispatch(Action::Tick(Instant::now()));

        let size = terminal.size()?;
        let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        let grid_height = ScreenLayout::new(area).grid.height;
        if u32::from(grid_height) != runtime.state().calendar.viewport.height {
            tracing::debug!("LOOP: grid height changed to {}", grid_height);
            runtime.dispatch(Action::Resize(grid_height));
        }

        // Rows merged by an extension are laid out by this draw; compensate first
        runtime.dispatch(Action::LayoutCommitted);

        terminal.draw(|f| {
            let area = f.area();
            renderer::render(runtime.state(), area, f.buffer_mut());
        })?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_to_action(key, runtime.state())
            }
            Event::Mouse(mouse) => mouse_to_action(mouse, runtime.state(), area),
            Event::Resize(width, height) => {
                tracing::debug!("LOOP: terminal resized to {}x{}", width, height);
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            if matches!(action, Action::Quit) {
                tracing::debug!("ACTION: Quitting application");
                return Ok(());
            }
            runtime.dispatch(action);
        }
    }
}
