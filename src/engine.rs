//! Session object tying the catalog, similarity table and search together,
//! and fanning out notifications to registered observers.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::Sender;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, RowStats};
use crate::input::{InputError, open_maybe_gz, read_lines, source_name};
use crate::scheme::{Scheme, SearchLimits, SearchOutcome, generate_with_limits, rank};
use crate::similarity::{ScoreParsePolicy, SimilarityTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub success: bool,
    pub source: String,
    pub accepted_rows: usize,
    pub skipped_rows: usize,
}

impl LoadOutcome {
    fn succeeded(source: &str, stats: RowStats) -> Self {
        Self {
            success: true,
            source: source.to_string(),
            accepted_rows: stats.accepted,
            skipped_rows: stats.skipped,
        }
    }

    fn failed(source: &str) -> Self {
        Self {
            success: false,
            source: source.to_string(),
            accepted_rows: 0,
            skipped_rows: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    LibraryLoaded(LoadOutcome),
    SimilarityLoaded(LoadOutcome),
    AvailableAntibodies(Vec<String>),
    SelectedAntibodies(Vec<String>),
    SchemesGenerated(Vec<Scheme>),
}

pub trait EngineObserver {
    fn notify(&mut self, notification: &Notification);
}

impl EngineObserver for Sender<Notification> {
    fn notify(&mut self, notification: &Notification) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.send(notification.clone());
    }
}

/// Emits every notification as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl EngineObserver for LogObserver {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::LibraryLoaded(outcome) => log_load("library", outcome),
            Notification::SimilarityLoaded(outcome) => log_load("similarity", outcome),
            Notification::AvailableAntibodies(list) => {
                debug!(count = list.len(), antibodies = ?list, "available antibodies refreshed");
            }
            Notification::SelectedAntibodies(list) => {
                debug!(count = list.len(), antibodies = ?list, "selected antibodies refreshed");
            }
            Notification::SchemesGenerated(schemes) => {
                info!(count = schemes.len(), "found {} valid staining schemes", schemes.len());
            }
        }
    }
}

fn log_load(kind: &str, outcome: &LoadOutcome) {
    if outcome.success {
        info!(
            source = %outcome.source,
            accepted = outcome.accepted_rows,
            skipped = outcome.skipped_rows,
            "{kind} table imported"
        );
    } else {
        warn!(source = %outcome.source, "{kind} table import failed");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub score_policy: ScoreParsePolicy,
    pub limits: SearchLimits,
}

#[derive(Default)]
pub struct StainingEngine {
    config: EngineConfig,
    catalog: Catalog,
    similarity: SimilarityTable,
    library_source: Option<String>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl StainingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn register<O: EngineObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityTable {
        &self.similarity
    }

    pub fn library_source(&self) -> Option<&str> {
        self.library_source.as_deref()
    }

    /// Imports a library table. On success the previous catalog and selection
    /// are discarded; on failure they are kept as they were.
    pub fn load_library_file(&mut self, path: &Path) -> Result<LoadOutcome, InputError> {
        let name = source_name(path);
        let lines = open_maybe_gz(path).and_then(read_lines);
        self.finish_library_load(&name, lines)
    }

    pub fn load_library_reader<R: BufRead>(
        &mut self,
        source: &str,
        reader: R,
    ) -> Result<LoadOutcome, InputError> {
        self.finish_library_load(source, read_lines(reader))
    }

    fn finish_library_load(
        &mut self,
        source: &str,
        lines: Result<Vec<String>, InputError>,
    ) -> Result<LoadOutcome, InputError> {
        let lines = match lines {
            Ok(lines) => lines,
            Err(err) => {
                self.emit(Notification::LibraryLoaded(LoadOutcome::failed(source)));
                return Err(err);
            }
        };

        let mut catalog = Catalog::new();
        let stats = catalog.load(&lines);
        self.catalog = catalog;
        self.library_source = Some(source.to_string());

        let outcome = LoadOutcome::succeeded(source, stats);
        self.emit(Notification::LibraryLoaded(outcome.clone()));
        self.emit_lists();
        Ok(outcome)
    }

    /// Imports a similarity table, replacing the previous one on success only.
    pub fn load_similarity_file(&mut self, path: &Path) -> Result<LoadOutcome, InputError> {
        let name = source_name(path);
        let lines = open_maybe_gz(path).and_then(read_lines);
        self.finish_similarity_load(&name, lines)
    }

    pub fn load_similarity_reader<R: BufRead>(
        &mut self,
        source: &str,
        reader: R,
    ) -> Result<LoadOutcome, InputError> {
        self.finish_similarity_load(source, read_lines(reader))
    }

    fn finish_similarity_load(
        &mut self,
        source: &str,
        lines: Result<Vec<String>, InputError>,
    ) -> Result<LoadOutcome, InputError> {
        let lines = match lines {
            Ok(lines) => lines,
            Err(err) => {
                self.emit(Notification::SimilarityLoaded(LoadOutcome::failed(source)));
                return Err(err);
            }
        };

        let mut table = SimilarityTable::new();
        let stats = table.load(&lines, self.config.score_policy);
        self.similarity = table;

        let outcome = LoadOutcome::succeeded(source, stats);
        self.emit(Notification::SimilarityLoaded(outcome.clone()));
        Ok(outcome)
    }

    /// Returns whether the antibody moved. Lists are emitted either way.
    pub fn select(&mut self, antibody: &str) -> bool {
        let moved = self.catalog.select(antibody);
        if moved {
            debug!(antibody, "selected antibody");
        } else {
            debug!(antibody, "antibody is not available; selection unchanged");
        }
        self.emit_lists();
        moved
    }

    pub fn deselect(&mut self, antibody: &str) -> bool {
        let moved = self.catalog.deselect(antibody);
        if moved {
            debug!(antibody, "deselected antibody");
        } else {
            debug!(antibody, "antibody is not selected; selection unchanged");
        }
        self.emit_lists();
        moved
    }

    /// Selects each named antibody after trimming surrounding whitespace.
    /// Names the library does not contain are logged, skipped and returned
    /// sorted and deduplicated.
    pub fn select_many<I, S>(&mut self, antibodies: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = antibodies
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .collect();

        let mut unknown = Vec::new();
        for antibody in &requested {
            if !self.catalog.contains(antibody) {
                warn!(antibody = %antibody, "antibody is not in the library; ignoring");
                unknown.push(antibody.clone());
                continue;
            }
            self.select(antibody);
        }
        unknown
    }

    /// Moves every available antibody into the selection.
    pub fn select_all(&mut self) {
        for antibody in self.catalog.available_list() {
            self.select(&antibody);
        }
    }

    /// Enumerates and ranks schemes for the current selection without
    /// notifying anyone.
    pub fn compute_schemes(&self) -> SearchOutcome {
        let outcome =
            generate_with_limits(self.catalog.selected(), &self.catalog, self.config.limits);
        if outcome.truncated {
            warn!(
                max_schemes = ?self.config.limits.max_schemes,
                "scheme enumeration stopped at the configured cap; only the schemes found so far are ranked"
            );
        }
        SearchOutcome {
            schemes: rank(outcome.schemes, &self.similarity),
            truncated: outcome.truncated,
        }
    }

    pub fn generate(&mut self) -> SearchOutcome {
        let outcome = self.compute_schemes();
        self.emit(Notification::SchemesGenerated(outcome.schemes.clone()));
        outcome
    }

    fn emit_lists(&mut self) {
        self.emit(Notification::SelectedAntibodies(self.catalog.selected_list()));
        self.emit(Notification::AvailableAntibodies(self.catalog.available_list()));
    }

    fn emit(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer.notify(&notification);
        }
    }
}

impl std::fmt::Debug for StainingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StainingEngine")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("similarity", &self.similarity)
            .field("library_source", &self.library_source)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/engine.rs"]
mod tests;
