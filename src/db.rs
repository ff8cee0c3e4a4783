// 🗄️ NEO Database - owns every entity and links them
//
// Linking is a one-shot pass at construction:
// 1. index NEOs by designation (and by name when they have one)
// 2. for each approach, look up its foreign designation
// 3. set approach.neo and append the approach id to neo.approaches
//
// After `new` returns nothing is mutated again, so queries only borrow.

use crate::entities::{ApproachId, CloseApproach, NearEarthObject, NeoId, NeoLookup};
use crate::error::{NeoError, NeoResult};
use crate::filters::{matches_all, Filter};
use std::collections::HashMap;
use tracing::{info, warn};

pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    unlinked: usize,
}

impl NeoDatabase {
    /// Build the database and link approaches to their NEOs.
    ///
    /// Approaches whose designation has no NEO stay unlinked and are skipped
    /// by `query`. An approach handed in already linked is rejected.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> NeoResult<Self> {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();

        for (index, neo) in neos.iter().enumerate() {
            let id = NeoId::new(index);
            if by_designation.contains_key(neo.designation()) {
                warn!(designation = neo.designation(), "duplicate NEO designation, keeping first");
                continue;
            }
            by_designation.insert(neo.designation().to_string(), id);
            if let Some(name) = neo.name() {
                by_name.entry(name.to_string()).or_insert(id);
            }
        }

        let mut db = NeoDatabase {
            neos,
            approaches,
            by_designation,
            by_name,
            unlinked: 0,
        };
        db.link()?;
        Ok(db)
    }

    fn link(&mut self) -> NeoResult<()> {
        for (index, approach) in self.approaches.iter_mut().enumerate() {
            if approach.is_linked() {
                return Err(NeoError::AlreadyLinked {
                    designation: approach.foreign_designation().to_string(),
                });
            }

            match self.by_designation.get(approach.foreign_designation()) {
                Some(&neo_id) => {
                    approach.link(neo_id)?;
                    self.neos[neo_id.index()].push_approach(ApproachId::new(index));
                }
                None => self.unlinked += 1,
            }
        }

        if self.unlinked > 0 {
            warn!(
                unlinked = self.unlinked,
                "close approaches without a matching NEO were left unlinked"
            );
        }
        info!(
            neos = self.neos.len(),
            approaches = self.approaches.len(),
            unlinked = self.unlinked,
            "linked close approaches to NEOs"
        );
        Ok(())
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// Find a NEO by its primary designation (exact match)
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|id| &self.neos[id.index()])
    }

    /// Find a NEO by its name (exact match). Unnamed NEOs are never found.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|id| &self.neos[id.index()])
    }

    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.index())
    }

    /// The close approaches linked to `neo`, in load order
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        neo.approaches().iter().filter_map(move |&id| self.approach(id))
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Number of approaches that found no NEO
    pub fn unlinked_count(&self) -> usize {
        self.unlinked
    }

    // ========================================================================
    // QUERY
    // ========================================================================

    /// Lazily yield linked approaches, in load order, that pass all filters
    pub fn query<'a>(
        &'a self,
        filters: &'a [Filter],
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches.iter().filter(move |approach| {
            approach
                .linked(self)
                .map(|linked| matches_all(filters, &linked))
                .unwrap_or(false)
        })
    }
}

impl NeoLookup for NeoDatabase {
    fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }
}

// ============================================================================
// TESTS
// ============================================================================
