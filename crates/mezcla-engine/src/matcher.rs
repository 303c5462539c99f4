//! Catalog matching: rank candidates by Delta E to a target color.
//!
//! Given a target `#RRGGBB` color and a catalog of candidates (stock items
//! or saved formulas), the matcher measures the CIE76 difference from the
//! target to each candidate and returns the closest ones first.
//!
//! Candidates without a usable color are dropped, not ranked last: a
//! missing swatch on one item should not stop the rest from matching. The
//! target, on the other hand, is required; a malformed target is an error
//! because any ranking against a substitute would be misleading.
//!
//! Ties keep catalog order. The sort is stable, so two candidates at the
//! same distance come out in the order they went in.

use std::num::NonZeroUsize;

use mezcla_color::{ColorError, delta_e76, hex_to_lab};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{DEFAULT_MATCH_LIMIT, EngineConfig};

/// What kind of catalog a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A stock item from inventory.
    #[default]
    Product,
    /// A saved customer formula.
    Formula,
}

/// A catalog entry offered to the matcher.
///
/// `payload` belongs to the caller. The matcher never reads or changes it;
/// it is handed back by reference in each [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCandidate<P> {
    /// Caller-defined identifier.
    pub id: String,
    /// `#RRGGBB` display color, if the item has one.
    pub color: Option<String>,
    /// Opaque caller data.
    pub payload: P,
}

impl<P> CatalogCandidate<P> {
    /// Create a candidate with a color.
    #[must_use]
    pub fn new(id: impl Into<String>, color: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            color: Some(color.into()),
            payload,
        }
    }

    /// Create a candidate that has no color on record.
    #[must_use]
    pub fn without_color(id: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            color: None,
            payload,
        }
    }
}

/// A ranked candidate and its distance to the target.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a, P> {
    /// The matched catalog entry, unchanged.
    pub candidate: &'a CatalogCandidate<P>,
    /// CIE76 Delta E to the target; 0.0 is an exact match.
    pub distance: f64,
    /// Which catalog the candidate came from.
    pub kind: MatchKind,
}

/// Rank `candidates` by distance to `target`, closest first, keeping at
/// most `limit` results. Results are tagged [`MatchKind::Product`].
///
/// A `limit` of zero yields an empty list.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `target` is not a valid
/// `#RRGGBB` color.
pub fn find_closest_matches<'a, P>(
    target: &str,
    candidates: &'a [CatalogCandidate<P>],
    limit: usize,
) -> Result<Vec<MatchResult<'a, P>>, ColorError> {
    find_closest_matches_of_kind(target, candidates, MatchKind::Product, limit)
}

/// [`find_closest_matches`] with the default limit of
/// [`DEFAULT_MATCH_LIMIT`] results.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `target` is not a valid
/// `#RRGGBB` color.
pub fn find_closest_matches_default<'a, P>(
    target: &str,
    candidates: &'a [CatalogCandidate<P>],
) -> Result<Vec<MatchResult<'a, P>>, ColorError> {
    find_closest_matches(target, candidates, DEFAULT_MATCH_LIMIT)
}

/// Like [`find_closest_matches`], tagging each result with `kind`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `target` is not a valid
/// `#RRGGBB` color.
pub fn find_closest_matches_of_kind<'a, P>(
    target: &str,
    candidates: &'a [CatalogCandidate<P>],
    kind: MatchKind,
    limit: usize,
) -> Result<Vec<MatchResult<'a, P>>, ColorError> {
    let target_lab = hex_to_lab(target)?;

    let mut results: Vec<MatchResult<'a, P>> = candidates
        .iter()
        .filter_map(|candidate| {
            let Some(color) = candidate.color.as_deref() else {
                trace!(id = %candidate.id, "candidate has no color, skipping");
                return None;
            };
            match hex_to_lab(color) {
                Ok(lab) => Some(MatchResult {
                    candidate,
                    distance: delta_e76(target_lab, lab),
                    kind,
                }),
                Err(err) => {
                    trace!(id = %candidate.id, %err, "candidate color unusable, skipping");
                    None
                }
            }
        })
        .collect();

    let qualified = results.len();
    // Stable: equal distances keep catalog order.
    results.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    results.truncate(limit);

    debug!(
        target_color = target,
        ?kind,
        considered = candidates.len(),
        qualified,
        returned = results.len(),
        "ranked catalog matches"
    );
    Ok(results)
}

/// A matcher with a configured result limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    limit: NonZeroUsize,
}

impl Matcher {
    /// Build a matcher from engine configuration.
    ///
    /// A zero `match_limit` falls back to the default of five; use
    /// [`EngineConfig::validate`] to reject such configurations up front.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_limit(NonZeroUsize::new(config.match_limit).unwrap_or(DEFAULT_LIMIT))
    }

    /// Build a matcher with an explicit limit.
    #[must_use]
    pub const fn with_limit(limit: NonZeroUsize) -> Self {
        Self { limit }
    }

    /// The maximum number of results returned by [`Matcher::rank`].
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Rank `candidates` against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if `target` is malformed.
    pub fn rank<'a, P>(
        &self,
        target: &str,
        candidates: &'a [CatalogCandidate<P>],
        kind: MatchKind,
    ) -> Result<Vec<MatchResult<'a, P>>, ColorError> {
        find_closest_matches_of_kind(target, candidates, kind, self.limit())
    }
}

const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MATCH_LIMIT) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

impl Default for Matcher {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}
