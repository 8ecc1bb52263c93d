use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::data::loader::DirResources;
use crate::data::model::Record;
use crate::data::store::RecordStore;

// ---------------------------------------------------------------------------
// What the central panel shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    Welcome,
    Card(Record),
    Message(String),
}

// ---------------------------------------------------------------------------
// Slideshow
// ---------------------------------------------------------------------------

/// A running slideshow over a snapshot of the store.
#[derive(Debug)]
struct Slideshow {
    cards: Vec<Record>,
    next: usize,
    last_advance: Instant,
    interval: Duration,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub store: RecordStore,
    pub config: AppConfig,

    /// Central panel content.
    pub display: Display,

    /// Text field contents.
    pub search_text: String,
    pub remove_text: String,

    /// Status line shown in the top bar (load summaries, file errors).
    pub status_message: Option<String>,

    slideshow: Option<Slideshow>,
}

impl AppState {
    pub fn new(store: RecordStore, config: AppConfig) -> Self {
        let report = store.report();
        let status_message = if report.resource_missing {
            Some(format!("{} not found; showing built-in cards", report.resource))
        } else {
            Some(report.summary())
        };
        Self {
            store,
            config,
            display: Display::Welcome,
            search_text: String::new(),
            remove_text: String::new(),
            status_message,
            slideshow: None,
        }
    }

    fn show_message(&mut self, msg: impl Into<String>) {
        self.display = Display::Message(msg.into());
    }

    /// Show a random card.
    pub fn view_random(&mut self) {
        match self.store.random() {
            Some(record) => {
                log::info!("Random pick: {record}");
                self.display = Display::Card(record.clone());
            }
            None => self.show_message("No Pokemon available in the database."),
        }
    }

    // ---- Slideshow ----

    pub fn slideshow_running(&self) -> bool {
        self.slideshow.is_some()
    }

    /// Start the slideshow, or stop it if it is already running.
    pub fn toggle_slideshow(&mut self, now: Instant) {
        if self.slideshow.take().is_some() {
            log::info!("Slideshow stopped");
            return;
        }

        let cards = self.store.all();
        let Some(first) = cards.first() else {
            self.show_message("No Pokemon available for slideshow.");
            return;
        };

        self.display = Display::Card(first.clone());
        log::info!("Slideshow started over {} cards", cards.len());
        self.slideshow = Some(Slideshow {
            cards,
            next: 1,
            last_advance: now,
            interval: self.config.slideshow_interval(),
        });
    }

    /// Advance the slideshow if its interval has elapsed. Returns how long
    /// until the next advance, so the caller can schedule a repaint.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let show = self.slideshow.as_mut()?;
        let elapsed = now.saturating_duration_since(show.last_advance);
        if elapsed < show.interval {
            return Some(show.interval - elapsed);
        }

        if let Some(card) = show.cards.get(show.next) {
            self.display = Display::Card(card.clone());
            show.next += 1;
            show.last_advance = now;
            Some(show.interval)
        } else {
            self.slideshow = None;
            self.show_message("Slideshow completed!");
            None
        }
    }

    pub fn stop_slideshow(&mut self) {
        self.slideshow = None;
    }

    // ---- Search / remove ----

    pub fn search(&mut self) {
        let query = self.search_text.trim().to_string();
        if query.is_empty() {
            self.show_message("Please enter a Pokemon name to search.");
            return;
        }

        match self.store.search(&query) {
            Some(record) => {
                self.display = Display::Card(record.clone());
                self.search_text.clear();
            }
            None => self.show_message(format!("Pokemon '{query}' not found in the database.")),
        }
    }

    pub fn remove(&mut self) {
        let query = self.remove_text.trim().to_string();
        if query.is_empty() {
            self.show_message("Please enter a Pokemon name to remove.");
            return;
        }

        if self.store.remove(&query) {
            self.show_message(format!(
                "Pokemon '{query}' has been removed from the database.\nRemaining Pokemon: {}",
                self.store.count()
            ));
            self.remove_text.clear();
        } else {
            self.show_message(format!("Pokemon '{query}' not found in the database."));
        }
    }

    // ---- File loading ----

    /// Rebuild the store from a CSV file picked by the user.
    pub fn open_file(&mut self, path: &Path) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::error!("Not a file: {}", path.display());
            self.status_message = Some(format!("Error: not a file: {}", path.display()));
            return;
        };
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        self.stop_slideshow();
        self.store.reinitialize(&DirResources::new(dir), name);

        let report = self.store.report();
        if report.resource_missing {
            log::error!("Failed to load file: {}", path.display());
            self.status_message = Some(format!("Error: could not read {}", path.display()));
        } else {
            self.status_message = Some(format!("{name}: {}", report.summary()));
        }
        self.display = Display::Welcome;
    }
}
