//! Id-keyed collection entries: evidence, pain points and customer quotes.
//!
//! Entries are never edited in place. Collections are rebuilt through
//! [`with_added`], [`with_updated`] and [`without`], which enforce id
//! uniqueness and report unknown ids.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, FivePointScale};

/// An entry stored in an id-keyed collection of the decision record.
pub trait KeyedEntry: Clone {
    /// Name of the collection, used in error details and logs.
    const COLLECTION: &'static str;

    /// Returns the caller-assigned key.
    fn id(&self) -> EntryId;
}

/// Evidence that contradicts the current direction, rated on four
/// quality dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: EntryId,
    pub description: String,
    pub source: String,
    pub credibility: FivePointScale,
    pub sample_size: FivePointScale,
    pub recency: FivePointScale,
    pub directness: FivePointScale,
}

impl KeyedEntry for Evidence {
    const COLLECTION: &'static str = "contradictory_evidence";

    fn id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for an [`Evidence`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidencePatch {
    pub description: Option<String>,
    pub source: Option<String>,
    pub credibility: Option<FivePointScale>,
    pub sample_size: Option<FivePointScale>,
    pub recency: Option<FivePointScale>,
    pub directness: Option<FivePointScale>,
}

impl EvidencePatch {
    pub fn apply_to(self, base: &Evidence) -> Evidence {
        Evidence {
            id: base.id,
            description: self.description.unwrap_or_else(|| base.description.clone()),
            source: self.source.unwrap_or_else(|| base.source.clone()),
            credibility: self.credibility.unwrap_or(base.credibility),
            sample_size: self.sample_size.unwrap_or(base.sample_size),
            recency: self.recency.unwrap_or(base.recency),
            directness: self.directness.unwrap_or(base.directness),
        }
    }
}

/// A customer problem surfaced in interviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainPoint {
    pub id: EntryId,
    pub description: String,
    pub severity: FivePointScale,
}

impl KeyedEntry for PainPoint {
    const COLLECTION: &'static str = "pain_points";

    fn id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for a [`PainPoint`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainPointPatch {
    pub description: Option<String>,
    pub severity: Option<FivePointScale>,
}

impl PainPointPatch {
    pub fn apply_to(self, base: &PainPoint) -> PainPoint {
        PainPoint {
            id: base.id,
            description: self.description.unwrap_or_else(|| base.description.clone()),
            severity: self.severity.unwrap_or(base.severity),
        }
    }
}

/// Tone of a customer quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// A verbatim customer statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: EntryId,
    pub text: String,
    pub source: String,
    pub sentiment: Sentiment,
}

impl KeyedEntry for Quote {
    const COLLECTION: &'static str = "customer_quotes";

    fn id(&self) -> EntryId {
        self.id
    }
}

/// Partial update for a [`Quote`] entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePatch {
    pub text: Option<String>,
    pub source: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl QuotePatch {
    pub fn apply_to(self, base: &Quote) -> Quote {
        Quote {
            id: base.id,
            text: self.text.unwrap_or_else(|| base.text.clone()),
            source: self.source.unwrap_or_else(|| base.source.clone()),
            sentiment: self.sentiment.unwrap_or(base.sentiment),
        }
    }
}

/// Returns a copy of `entries` with `entry` appended.
///
/// # Errors
///
/// - `DuplicateEntry` if an entry with the same id already exists
pub fn with_added<T: KeyedEntry>(entries: &[T], entry: T) -> Result<Vec<T>, DomainError> {
    if entries.iter().any(|e| e.id() == entry.id()) {
        return Err(DomainError::new(
            ErrorCode::DuplicateEntry,
            format!("Entry {} already exists in {}", entry.id(), T::COLLECTION),
        )
        .with_detail("collection", T::COLLECTION));
    }
    let mut next = entries.to_vec();
    next.push(entry);
    Ok(next)
}

/// Returns a copy of `entries` with the entry `id` rebuilt by `update`.
///
/// # Errors
///
/// - `EntryNotFound` if no entry has the given id
pub fn with_updated<T, F>(entries: &[T], id: EntryId, update: F) -> Result<Vec<T>, DomainError>
where
    T: KeyedEntry,
    F: FnOnce(&T) -> T,
{
    let index = position_of(entries, id)?;
    let mut next = entries.to_vec();
    next[index] = update(&entries[index]);
    Ok(next)
}

/// Returns a copy of `entries` without the entry `id`.
///
/// # Errors
///
/// - `EntryNotFound` if no entry has the given id
pub fn without<T: KeyedEntry>(entries: &[T], id: EntryId) -> Result<Vec<T>, DomainError> {
    position_of(entries, id)?;
    Ok(entries.iter().filter(|e| e.id() != id).cloned().collect())
}

fn position_of<T: KeyedEntry>(entries: &[T], id: EntryId) -> Result<usize, DomainError> {
    entries.iter().position(|e| e.id() == id).ok_or_else(|| {
        DomainError::new(
            ErrorCode::EntryNotFound,
            format!("Entry {} not found in {}", id, T::COLLECTION),
        )
        .with_detail("collection", T::COLLECTION)
    })
}
