//! crates/contract_openapi/src/operation_id.rs
//!
//! Operation identifier derivation and the duplicate-identifier guard.

use crate::error::{ContractError, ContractResult};
use crate::flatten::FlattenedPath;
use std::collections::HashMap;

/// How the generated operations are labelled with an `operationId`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationIdMode {
    /// No `operationId` is emitted and ids are not checked.
    #[default]
    Off,
    /// The bare route name. Ids must be unique across the whole table.
    BareId,
    /// The dot-joined breadcrumb followed by the route name.
    ConcatenatedPath,
}

impl OperationIdMode {
    /// Bare ids are the only ones that can collide across namespaces.
    pub fn enforces_uniqueness(&self) -> bool {
        matches!(self, Self::BareId)
    }

    pub fn operation_id(&self, path: &FlattenedPath<'_>) -> Option<String> {
        match self {
            Self::Off => None,
            Self::BareId => Some(path.id.clone()),
            Self::ConcatenatedPath => {
                let mut segments = path.breadcrumb.clone();
                segments.push(path.id.clone());
                Some(segments.join("."))
            }
        }
    }
}

/// Remembers under which breadcrumb each id was first seen.
#[derive(Debug, Default)]
pub struct OperationIdIndex {
    seen: HashMap<String, Vec<String>>,
}

impl OperationIdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path`, failing if its id was already recorded elsewhere.
    pub fn check(&mut self, path: &FlattenedPath<'_>) -> ContractResult<()> {
        match self.seen.get(&path.id) {
            Some(existing) if *existing != path.breadcrumb => {
                Err(ContractError::DuplicateOperationId {
                    id: path.id.clone(),
                    existing: existing.join("."),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.seen.insert(path.id.clone(), path.breadcrumb.clone());
                Ok(())
            }
        }
    }
}
