//! Module: db
//! Responsibility: store ownership, schema registration and the save path.
//! Does not own: field generation rules or form handling.
//!
//! `Db` pairs one `RecordStore` with the RNG every save draws from, so a
//! seeded `Db` produces the same identifiers run after run.

mod save;
pub mod store;


pub use save::{DEFAULT_CONFLICT_RETRIES, SaveError, SaveExecutor};

use crate::{
    db::store::{RecordStore, StoreError},
    model::Model,
    traits::EntityKind,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

///
/// SaveMode
///
/// Insert fails on an existing key, Update fails on a missing key, Replace
/// inserts or overwrites.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveMode {
    Insert,
    Update,
    Replace,
}

///
/// Db
///

pub struct Db<S: RecordStore> {
    store: S,
    rng: Box<dyn RngCore + Send>,
}

impl<S: RecordStore> Db<S> {
    /// Wrap `store` with an RNG seeded from the thread RNG.
    pub fn new(store: S) -> Self {
        Self::with_rng(store, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Wrap `store` with a deterministic RNG.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(store: S, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            store,
            rng: Box::new(rng),
        }
    }

    // ======================================================================
    // Schema
    // ======================================================================

    /// Register a declared model's columns with the store.
    pub fn register<E: EntityKind>(&mut self, model: &Model<E>) -> Result<(), StoreError> {
        self.store.register(model.entity_model().clone())
    }

    // ======================================================================
    // Access
    // ======================================================================

    /// Save executor for one declared entity.
    pub fn save<'a, E: EntityKind>(&'a mut self, model: &'a Model<E>) -> SaveExecutor<'a, E, S> {
        SaveExecutor::new(self, model)
    }

    /// Load and decode one record by primary key.
    pub fn load<E: EntityKind>(&self, key: &str) -> Result<Option<E>, StoreError> {
        let Some(row) = self.store.get(E::ENTITY_NAME, key)? else {
            return Ok(None);
        };

        serde_json::from_value(row)
            .map(Some)
            .map_err(|err| StoreError::Decode {
                entity: E::ENTITY_NAME.to_string(),
                message: err.to_string(),
            })
    }

    pub fn count<E: EntityKind>(&self) -> Result<usize, StoreError> {
        self.store.len(E::ENTITY_NAME)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    // parts
    // Disjoint borrows for one save attempt.
    pub(crate) fn parts(&mut self) -> (&mut S, &mut (dyn RngCore + Send)) {
        (&mut self.store, &mut *self.rng)
    }
}
