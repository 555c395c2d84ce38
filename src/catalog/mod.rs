//! Antibody option table and the available/selected partition.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::input::split_row;

pub type ChannelSet = BTreeSet<String>;
pub type SpectrumOptions = BTreeMap<String, ChannelSet>;

/// Row accounting for a single table load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStats {
    pub total_rows: usize,
    pub accepted: usize,
    pub skipped: usize,
}

impl RowStats {
    pub(crate) fn accept(&mut self) {
        self.total_rows += 1;
        self.accepted += 1;
    }

    pub(crate) fn skip(&mut self) {
        self.total_rows += 1;
        self.skipped += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRow {
    pub spectrum: String,
    pub channel: String,
    pub antibody: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    TooShort,
    EmptyField,
}

/// Parses `spectrum, channel, antibody[, ...]`. Columns past the third are ignored.
pub fn parse_library_row(line: &str) -> Result<LibraryRow, RowRejection> {
    let fields = split_row(line);
    if fields.len() < 3 {
        return Err(RowRejection::TooShort);
    }
    let spectrum = fields[0].trim();
    let channel = fields[1].trim();
    let antibody = fields[2].trim();
    if spectrum.is_empty() || channel.is_empty() || antibody.is_empty() {
        return Err(RowRejection::EmptyField);
    }
    Ok(LibraryRow {
        spectrum: spectrum.to_string(),
        channel: channel.to_string(),
        antibody: antibody.to_string(),
    })
}

/// Every loaded antibody is in exactly one of `available` or `selected`,
/// and every key of `options` has at least one spectrum with at least one channel.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    options: BTreeMap<String, SpectrumOptions>,
    available: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads library rows. The first row is a sheet header and is always skipped.
    pub fn load<I, S>(&mut self, rows: I) -> RowStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = RowStats::default();
        for (idx, line) in rows.into_iter().enumerate() {
            let line_no = idx + 1;
            if line_no == 1 {
                continue;
            }
            match parse_library_row(line.as_ref()) {
                Ok(row) => {
                    debug!(
                        line = line_no,
                        spectrum = %row.spectrum,
                        channel = %row.channel,
                        antibody = %row.antibody,
                        "library row loaded"
                    );
                    self.insert(&row.antibody, &row.spectrum, &row.channel);
                    stats.accept();
                }
                Err(RowRejection::TooShort) => {
                    warn!(line = line_no, "library row is too short; skipping");
                    stats.skip();
                }
                Err(RowRejection::EmptyField) => {
                    warn!(line = line_no, "library row has an empty field; skipping");
                    stats.skip();
                }
            }
        }
        stats
    }

    /// Adds one option. A new antibody lands in the available set; an
    /// antibody that is already selected stays selected.
    pub fn insert(&mut self, antibody: &str, spectrum: &str, channel: &str) {
        self.options
            .entry(antibody.to_string())
            .or_default()
            .entry(spectrum.to_string())
            .or_default()
            .insert(channel.to_string());
        if !self.selected.contains(antibody) {
            self.available.insert(antibody.to_string());
        }
    }

    /// Moves `antibody` from available to selected. Returns whether anything moved.
    pub fn select(&mut self, antibody: &str) -> bool {
        if self.available.remove(antibody) {
            self.selected.insert(antibody.to_string());
            true
        } else {
            false
        }
    }

    /// Moves `antibody` from selected back to available. Returns whether anything moved.
    pub fn deselect(&mut self, antibody: &str) -> bool {
        if self.selected.remove(antibody) {
            self.available.insert(antibody.to_string());
            true
        } else {
            false
        }
    }

    pub fn available_list(&self) -> Vec<String> {
        self.available.iter().cloned().collect()
    }

    pub fn selected_list(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn options(&self, antibody: &str) -> Option<&SpectrumOptions> {
        self.options.get(antibody)
    }

    pub fn contains(&self, antibody: &str) -> bool {
        self.options.contains_key(antibody)
    }

    pub fn antibody_count(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
