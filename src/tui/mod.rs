pub mod input;
pub mod render;
pub mod state;

use crate::dashboard::{ActionDispatcher, AssignOutcome};
use crate::feed::query::LeadQuery;
use crate::feed::QueryResult;
use crate::notify::{Notifier, Toast};
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use state::{AppState, Effect};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Everything the event loop needs besides the view state.
pub struct TuiContext {
    pub query: LeadQuery,
    pub results: mpsc::UnboundedReceiver<QueryResult>,
    pub toasts: mpsc::UnboundedReceiver<Toast>,
    pub dispatcher: ActionDispatcher,
    pub notifier: Arc<dyn Notifier>,
}

/// Run the TUI until the user quits.
pub async fn run_tui(state: AppState, ctx: TuiContext) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state, ctx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// One handler runs to completion before the next event is taken.
async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state: AppState,
    mut ctx: TuiContext,
) -> Result<()> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<AssignOutcome>();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(100));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut spinner_frame: u8 = 0;

    loop {
        terminal.draw(|f| render::draw(f, &state, spinner_frame))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let effect = input::map_key(state.input_mode, key).and_then(|cmd| state.apply(cmd));
                    match effect {
                        Some(Effect::Quit) => return Ok(()),
                        Some(Effect::Assign { lead_id, lead_name }) => {
                            let dispatcher = ctx.dispatcher.clone();
                            let done_tx = done_tx.clone();
                            tokio::spawn(async move {
                                let outcome = dispatcher.assign(&lead_id, &lead_name).await;
                                let _ = done_tx.send(outcome);
                            });
                        }
                        Some(Effect::Refresh) => {
                            let query = ctx.query.clone();
                            tokio::spawn(async move { query.refresh().await });
                        }
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(result) = ctx.results.recv() => {
                state.on_query_result(result, ctx.notifier.as_ref());
            }
            Some(toast) = ctx.toasts.recv() => {
                state.push_toast(toast);
            }
            Some(outcome) = done_rx.recv() => {
                state.on_assign_finished(&outcome);
            }
            _ = tick.tick() => {
                spinner_frame = spinner_frame.wrapping_add(1);
                state.expire_toasts(Instant::now());
            }
        }
    }
}
