use chrono::NaiveDate;
use tracing::{debug, error, trace};

use crate::calendar::{CalendarResult, Phase, ScrollCommand, ScrollOutcome};
use crate::dates::add_days;
use crate::tui::action::Action;
use crate::tui::effects::{tick_after, Effect};
use crate::tui::state::{AppState, ModalState};

/// Handle scrolling, selection and jump actions
pub fn reduce_calendar(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::Tick(now) => Ok(tick(state, *now)),
        Action::Resize(height) => Ok(resize(state, *height)),
        Action::LayoutCommitted => Ok(layout_committed(state)),
        Action::ScrollBy(delta) => Ok(scroll_by(state, *delta)),
        Action::MoveSelection(days) => Ok(move_selection(state, *days)),
        Action::SelectDate(date) => Ok(select_date(state, *date)),
        Action::GoToToday => Ok(go_to_today(state)),
        Action::JumpTo(date) => Ok(jump_to(state, *date)),
        _ => Err(state),
    }
}

/// Report the current offset to the engine, as a scroll event would
fn notify_scroll(state: &mut AppState) {
    let metrics = state.calendar.viewport.metrics();
    let outcome = state.calendar.engine.on_scroll(metrics, state.system.clock);
    log_outcome(&outcome);
}

fn log_outcome(outcome: &ScrollOutcome) {
    match outcome {
        ScrollOutcome::Skipped(reason) => trace!("CALENDAR: scroll skipped ({:?})", reason),
        ScrollOutcome::Measured {
            header_changed,
            extended,
        } => {
            if let Some(header) = header_changed {
                debug!("CALENDAR: header now {}", header);
            }
            if let Some(edge) = extended {
                debug!("CALENDAR: extending at {:?}", edge);
            }
        }
    }
}

fn tick(state: AppState, now: std::time::Instant) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.system.clock = now;

    let content_height = new_state.calendar.engine.total_height();
    if new_state.calendar.viewport.step(now, content_height) {
        notify_scroll(&mut new_state);
    }
    if let Some(outcome) = new_state.calendar.engine.tick(now) {
        log_outcome(&outcome);
    }
    (new_state, Effect::None)
}

fn resize(state: AppState, height: u16) -> (AppState, Effect) {
    let mut new_state = state;
    let calendar = &mut new_state.calendar;
    calendar.viewport.height = u32::from(height);

    if !calendar.engine.is_initialized() {
        let command = calendar.engine.initialize(calendar.viewport.metrics());
        let content_height = calendar.engine.total_height();
        calendar.viewport.apply(command, content_height, new_state.system.clock);
        debug!(
            "CALENDAR: initialized with {} day(s), viewport {} line(s)",
            calendar.engine.store().len(),
            height
        );
    } else if !calendar.viewport.is_animating() {
        let content_height = calendar.engine.total_height();
        let offset = calendar.viewport.offset;
        calendar.viewport.scroll_to(offset, content_height);
    }

    notify_scroll(&mut new_state);
    (new_state, Effect::None)
}

fn layout_committed(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    if !matches!(new_state.calendar.engine.phase(), Phase::Extending { .. }) {
        return (new_state, Effect::None);
    }

    if let Some(command) = new_state.calendar.engine.layout_committed() {
        let content_height = new_state.calendar.engine.total_height();
        new_state
            .calendar
            .viewport
            .apply(command, content_height, new_state.system.clock);
        if let ScrollCommand::Shift(delta) = command {
            trace!("CALENDAR: compensated offset by {}", delta);
        }
    }
    // Rows are in place; the edges may still be close after a small extension
    notify_scroll(&mut new_state);
    (new_state, Effect::None)
}

fn scroll_by(state: AppState, delta: i64) -> (AppState, Effect) {
    let mut new_state = state;
    let content_height = new_state.calendar.engine.total_height();
    new_state.calendar.viewport.scroll_by(delta, content_height);
    notify_scroll(&mut new_state);
    (new_state, Effect::None)
}

fn move_selection(state: AppState, days: i64) -> (AppState, Effect) {
    let target = add_days(state.ui.selected, days);
    trace!("CALENDAR: selection {} -> {}", state.ui.selected, target);
    let mut new_state = state;
    new_state.ui.selected = target;
    reveal(new_state, target)
}

/// Scroll just enough to show `date`, jumping when it is not generated yet
fn reveal(state: AppState, date: NaiveDate) -> (AppState, Effect) {
    let engine = &state.calendar.engine;
    let Some(index) = engine.store().position(date) else {
        return jump_to(state, date);
    };

    let layout = *engine.layout();
    let content_height = engine.total_height();
    let row_top = layout.row_top(layout.row_of(index));
    let row_bottom = row_top + u64::from(layout.row_height);

    let mut new_state = state;
    let viewport = &mut new_state.calendar.viewport;
    let view_top = u64::from(viewport.offset);
    let view_bottom = view_top + u64::from(viewport.height);

    let offset = if row_top < view_top {
        row_top
    } else if row_bottom > view_bottom {
        row_bottom - u64::from(viewport.height)
    } else {
        return (new_state, Effect::None);
    };
    viewport.scroll_to(offset.min(u64::from(u32::MAX)) as u32, content_height);
    notify_scroll(&mut new_state);
    (new_state, Effect::None)
}

fn select_date(state: AppState, date: NaiveDate) -> (AppState, Effect) {
    let mut new_state = state;
    new_state.ui.selected = date;
    if let Some(index) = new_state.journals.book.index_of(&crate::dates::iso_key(date)) {
        debug!("CALENDAR: opening journal for {}", date);
        new_state.ui.modal = Some(ModalState { index });
    }
    (new_state, Effect::None)
}

fn go_to_today(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    let today = new_state.calendar.engine.today();
    let metrics = new_state.calendar.viewport.metrics();
    let result = new_state
        .calendar
        .engine
        .reset_to_today(metrics, new_state.system.clock);
    finish_jump(new_state, today, result)
}

fn jump_to(state: AppState, target: NaiveDate) -> (AppState, Effect) {
    let mut new_state = state;
    let metrics = new_state.calendar.viewport.metrics();
    let result = new_state
        .calendar
        .engine
        .scroll_to_date(target, metrics, new_state.system.clock);
    finish_jump(new_state, target, result)
}

fn finish_jump(
    state: AppState,
    target: NaiveDate,
    result: CalendarResult<ScrollCommand>,
) -> (AppState, Effect) {
    let mut new_state = state;
    match result {
        Ok(command) => {
            let content_height = new_state.calendar.engine.total_height();
            new_state
                .calendar
                .viewport
                .apply(command, content_height, new_state.system.clock);
            new_state.ui.selected = target;
            debug!("CALENDAR: jumping to {}", target);
            // Wake the loop when the cooldown ends so pending edges are handled
            let cooldown = new_state.calendar.engine.config().jump_cooldown;
            (new_state, tick_after(cooldown))
        }
        Err(e) => {
            error!("CALENDAR: jump to {} failed: {}", target, e);
            new_state
                .system
                .set_status_error_message(format!("Cannot go to {}: {}", target, e));
            (new_state, Effect::None)
        }
    }
}
