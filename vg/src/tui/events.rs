//! TUI event handling
//!
//! Bridges crossterm's blocking event poll into the async event loop via a
//! tokio channel. A tick fires whenever the poll window elapses quietly, so
//! the runner gets a steady heartbeat for polling the generation channel.

use std::time::Duration;

use crossterm::event::{self, KeyEvent};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::debug;

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic heartbeat
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        // Blocking poll loop lives on its own thread
        std::thread::spawn(move || {
            loop {
                let send_result = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(event::Event::Key(key)) => tx.send(Event::Key(key)),
                        Ok(event::Event::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                        _ => continue,
                    }
                } else {
                    tx.send(Event::Tick)
                };

                if send_result.is_err() {
                    debug!("EventHandler: channel closed, exiting poll loop");
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))
    }
}
