//! TUI Runner - owns the terminal and the event loop
//!
//! The runner draws at every event (a 250ms tick keeps it breathing), hands
//! key events to the App, and performs the actions the App queues up:
//! starting the single in-flight generation task, exporting the itinerary
//! with guaranteed state restoration, and persisting theme toggles.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use eyre::Result;
use prefstore::{PrefStore, Theme};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::Itinerary;
use crate::export;
use crate::llm::{LlmClient, create_client};
use crate::pipeline::{GenerateError, run_generation};
use crate::prompts::PromptLoader;
use crate::render::ItineraryView;
use crate::state::Session;

use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{AppState, PendingAction, ResultState};
use super::{Tui, views};

/// Poll interval for the event heartbeat
const TICK_RATE: Duration = Duration::from_millis(250);

/// Launch the TUI
///
/// Checks the credential once at startup: an unusable key routes to the
/// setup guidance view with About still reachable.
pub async fn run(config: &Config) -> Result<()> {
    let status = config.credential_status();
    debug!(?status, "run: credential checked");

    let store = PrefStore::open(config.storage.prefs_dir())?;
    let theme = store.load()?.theme;

    let client = if status.is_usable() {
        Some(create_client(&config.llm)?)
    } else {
        None
    };

    let session = Session::new(theme, !status.is_usable());
    let app = App::new(AppState::new(session));

    let runner = TuiRunner::new(app, client, store, config.clone());
    let terminal = super::init()?;
    let result = runner.run(terminal).await;
    super::restore()?;
    result
}

/// Result channel payload from the background generation task
type GenResult = Result<Itinerary, GenerateError>;

/// TUI runner that manages the terminal and event loop
struct TuiRunner {
    app: App,
    /// None while unconfigured (setup mode)
    client: Option<Arc<dyn LlmClient>>,
    store: PrefStore,
    config: Config,
    events: EventHandler,
    /// Root directory for prompt template overrides
    prompt_root: PathBuf,
    /// Receiver for the in-flight generation result
    gen_rx: Option<mpsc::Receiver<GenResult>>,
    gen_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    fn new(app: App, client: Option<Arc<dyn LlmClient>>, store: PrefStore, config: Config) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app,
            client,
            store,
            config,
            events: EventHandler::new(TICK_RATE),
            prompt_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            gen_rx: None,
            gen_task: None,
        }
    }

    async fn run(mut self, mut terminal: Tui) -> Result<()> {
        info!("TuiRunner::run: entering event loop");
        loop {
            self.poll_generation();
            terminal.draw(|frame| views::render(self.app.state(), frame))?;

            match self.events.next().await? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if self.app.handle_key(key) {
                        break;
                    }
                    self.drain_pending();
                }
                Event::Resize(..) | Event::Tick => {}
            }

            if self.app.state().should_quit {
                break;
            }
        }
        info!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Perform whatever the key handler queued up
    fn drain_pending(&mut self) {
        if let Some(action) = self.app.state_mut().pending.take() {
            debug!(?action, "drain_pending: performing");
            match action {
                PendingAction::Generate => self.start_generation(),
                PendingAction::Export => self.export_itinerary(),
                PendingAction::PersistTheme(theme) => self.persist_theme(theme),
            }
        }
    }

    /// Kick off the background generation task
    ///
    /// The busy flag is claimed synchronously before the task is spawned, so
    /// a second submit arriving before the reply sees the flag set and does
    /// nothing. Validation runs first: an empty destination surfaces inline
    /// without claiming the flag or sending anything.
    fn start_generation(&mut self) {
        let Some(client) = self.client.clone() else {
            warn!("start_generation: no client configured");
            return;
        };

        let request = self.app.state().trip_request();
        if !request.has_destination() {
            self.app.state_mut().result = ResultState::Error(GenerateError::EmptyDestination.user_message());
            return;
        }

        let state = self.app.state_mut();
        if !state.session.try_begin_generation() {
            debug!("start_generation: already in flight");
            return;
        }
        state.begin_loading();

        let max_tokens = self.config.llm.max_tokens;
        let root = self.prompt_root.clone();
        let (tx, rx) = mpsc::channel(1);

        self.gen_rx = Some(rx);
        self.gen_task = Some(tokio::spawn(async move {
            let loader = PromptLoader::new(&root);
            let result = run_generation(client, &loader, &request, max_tokens).await;
            let _ = tx.send(result).await;
        }));
    }

    /// Check whether the in-flight request has settled
    ///
    /// The busy flag clears here no matter how the call ended, so it can
    /// never stick.
    fn poll_generation(&mut self) {
        let Some(rx) = self.gen_rx.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.gen_rx = None;
                self.gen_task = None;

                let state = self.app.state_mut();
                state.session.finish_generation();
                match result {
                    Ok(itinerary) => {
                        info!(days = itinerary.daily_plans.len(), "poll_generation: itinerary ready");
                        state.selected_section = 0;
                        state.result = ResultState::Ready(ItineraryView::from_itinerary(&itinerary));
                    }
                    Err(e) => {
                        warn!(error = %e, "poll_generation: generation failed");
                        state.result = ResultState::Error(e.user_message());
                    }
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // Task died without reporting; clear the flag anyway
                warn!("poll_generation: result channel dropped");
                self.gen_rx = None;
                self.gen_task = None;

                let state = self.app.state_mut();
                state.session.finish_generation();
                state.result =
                    ResultState::Error("We couldn't generate your itinerary. Please try again.".to_string());
            }
        }
    }

    /// Export the rendered itinerary to a document
    ///
    /// Section states are captured, forced open for the capture, and
    /// restored before the outcome is even inspected; the export control is
    /// re-enabled the same way. A failed write can therefore never leave the
    /// view force-expanded or the control disabled.
    fn export_itinerary(&mut self) {
        let output_dir = self.config.export.output_dir.clone();
        let page_lines = self.config.export.page_lines;

        let state = self.app.state_mut();
        if state.exporting {
            debug!("export_itinerary: already exporting");
            return;
        }
        let Some(view) = state.result.view_mut() else {
            debug!("export_itinerary: nothing to export");
            return;
        };

        state.exporting = true;
        let saved = view.expanded_states();
        view.expand_all();

        let result = export::export_document(view, &output_dir, page_lines);

        view.set_expanded_states(&saved);
        state.exporting = false;

        state.flash = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => {
                warn!(error = %e, "export_itinerary: export failed");
                format!("Could not generate the document. Please try again. ({})", e)
            }
        });
    }

    /// Write the toggled theme to the preference store
    fn persist_theme(&mut self, theme: Theme) {
        if let Err(e) = self.store.set_theme(theme) {
            // The in-memory theme already flipped; losing persistence is
            // only a warning
            warn!(error = %e, "persist_theme: failed to write preference");
        }
    }
}
