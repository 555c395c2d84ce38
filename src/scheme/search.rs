use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::catalog::Catalog;
use crate::scheme::{Scheme, StainingAssignment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop collecting once this many schemes exist.
    pub max_schemes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub schemes: Vec<Scheme>,
    /// Set when `max_schemes` cut the enumeration short.
    pub truncated: bool,
}

/// Enumerates every assignment of the selected antibodies in which no
/// spectrum is used twice. An empty selection yields one empty scheme.
pub fn generate(selected: &BTreeSet<String>, catalog: &Catalog) -> Vec<Scheme> {
    generate_with_limits(selected, catalog, SearchLimits::default()).schemes
}

pub fn generate_with_limits(
    selected: &BTreeSet<String>,
    catalog: &Catalog,
    limits: SearchLimits,
) -> SearchOutcome {
    let antibodies: Vec<&str> = selected.iter().map(String::as_str).collect();
    let mut state = SearchState {
        catalog,
        current: Vec::with_capacity(antibodies.len()),
        antibodies,
        used_spectra: HashSet::new(),
        max_schemes: limits.max_schemes,
        out: SearchOutcome::default(),
    };
    state.backtrack(0);

    debug!(
        antibodies = state.antibodies.len(),
        schemes = state.out.schemes.len(),
        truncated = state.out.truncated,
        "scheme search finished"
    );
    state.out
}

struct SearchState<'a> {
    catalog: &'a Catalog,
    antibodies: Vec<&'a str>,
    used_spectra: HashSet<&'a str>,
    current: Vec<StainingAssignment>,
    max_schemes: Option<usize>,
    out: SearchOutcome,
}

impl<'a> SearchState<'a> {
    /// Returns `false` once the scheme cap is hit, unwinding the whole search.
    fn backtrack(&mut self, index: usize) -> bool {
        if index == self.antibodies.len() {
            if self
                .max_schemes
                .is_some_and(|max| self.out.schemes.len() >= max)
            {
                self.out.truncated = true;
                return false;
            }
            self.out.schemes.push(Scheme::new(self.current.clone()));
            return true;
        }

        let catalog = self.catalog;
        let antibody = self.antibodies[index];
        let Some(options) = catalog.options(antibody) else {
            return true;
        };

        for (spectrum, channels) in options {
            if self.used_spectra.contains(spectrum.as_str()) {
                continue;
            }
            for channel in channels {
                self.current
                    .push(StainingAssignment::new(antibody, spectrum, channel));
                self.used_spectra.insert(spectrum.as_str());

                let keep_going = self.backtrack(index + 1);

                self.used_spectra.remove(spectrum.as_str());
                self.current.pop();
                if !keep_going {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scheme/search.rs"]
mod tests;
