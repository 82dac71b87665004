//! Identifiers for reconstructed diagram entities.
//!
//! This module provides the [`Id`] type and the [`IdRegistry`] that mints
//! them. Identifiers look like `Task_k3v9x0a`: the entity kind followed by a
//! short random suffix.
//!
//! # Scope
//!
//! A registry lives for exactly one reconstruction pass. Two passes running
//! side by side each own their registry, so they can neither collide with
//! nor observe each other's identifiers.

use std::fmt;

use indexmap::IndexSet;
use log::trace;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Characters used for the random suffix.
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 7;

/// Identifier of a diagram entity.
///
/// # Examples
///
/// ```
/// use bpmn_recon_core::identifier::Id;
///
/// let id = Id::new("StartEvent_1");
/// assert_eq!(id, "StartEvent_1");
/// assert_eq!(id.to_string(), "StartEvent_1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id(String);

impl Id {
    /// Creates an `Id` from a string slice.
    ///
    /// Identifiers created this way bypass the registry; the engine itself
    /// only uses [`IdRegistry::generate`].
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Issues unique identifiers for one reconstruction pass.
///
/// Every generated id is recorded; a candidate that collides with an earlier
/// one is thrown away and regenerated.
///
/// # Examples
///
/// ```
/// use bpmn_recon_core::identifier::IdRegistry;
///
/// let mut registry = IdRegistry::with_seed(7);
/// let task = registry.generate("Task");
/// let flow = registry.generate("SequenceFlow");
///
/// assert!(task.as_str().starts_with("Task_"));
/// assert_ne!(task, flow);
/// assert_eq!(registry.len(), 2);
/// ```
pub struct IdRegistry {
    issued: IndexSet<String>,
    rng: StdRng,
}

impl IdRegistry {
    /// Creates a registry seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a registry with a fixed seed.
    ///
    /// Two registries with the same seed generate the same sequence of
    /// identifiers for the same sequence of prefixes.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            issued: IndexSet::new(),
            rng,
        }
    }

    /// Generates and registers a new identifier with the given prefix.
    pub fn generate(&mut self, prefix: &str) -> Id {
        loop {
            let candidate = format!("{prefix}_{}", self.random_suffix());
            if !self.issued.contains(&candidate) {
                self.issued.insert(candidate.clone());
                return Id(candidate);
            }
            trace!(candidate = candidate.as_str(); "Identifier collision, regenerating");
        }
    }

    /// Returns `true` if `id` was issued by this registry.
    pub fn contains(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// Number of issued identifiers.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Returns `true` if no identifier has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// Iterates over issued identifiers in issue order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.issued.iter().map(String::as_str)
    }

    fn random_suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_CHARSET[self.rng.random_range(0..SUFFIX_CHARSET.len())]))
            .collect()
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRegistry")
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}
