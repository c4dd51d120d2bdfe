//! Generic mutation-effect application.
//!
//! Every resource store patches its caches through the same routine:
//! an effect (`Created` / `Updated` / `Deleted`) plus a membership
//! predicate deciding which filtered list entries the entity belongs
//! to. List append, in-place replace, and removal are written once
//! here instead of per resource, so the write-visibility guarantee
//! holds uniformly.

use std::hash::Hash;

use fabrica_api_types::{Blog, LocaleEntry, ProductionLine, Project};
use uuid::Uuid;

/// Identity extraction for cached entities.
pub trait Identified {
    type Id: Clone + Eq + Hash;

    fn identity(&self) -> Self::Id;
}

impl Identified for Blog {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}

impl Identified for Project {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}

impl Identified for ProductionLine {
    type Id = Uuid;

    fn identity(&self) -> Uuid {
        self.id
    }
}

impl Identified for LocaleEntry {
    type Id = String;

    fn identity(&self) -> String {
        self.key.clone()
    }
}

/// The cache-visible effect of one completed mutation.
#[derive(Debug, Clone)]
pub enum MutationEffect<T: Identified> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
}

impl<T: Identified> MutationEffect<T> {
    pub fn id(&self) -> T::Id {
        match self {
            MutationEffect::Created(entity) | MutationEffect::Updated(entity) => entity.identity(),
            MutationEffect::Deleted(id) => id.clone(),
        }
    }
}

/// Apply one effect to one cached list.
///
/// `belongs` is the membership verdict for this particular list's
/// filter. An updated entity that lost membership is removed; one that
/// gained it is appended.
pub(crate) fn apply_to_list<T>(list: &mut Vec<T>, effect: &MutationEffect<T>, belongs: bool)
where
    T: Identified + Clone,
{
    match effect {
        MutationEffect::Created(entity) => {
            if belongs && !contains(list, &entity.identity()) {
                list.push(entity.clone());
            }
        }
        MutationEffect::Updated(entity) => {
            let id = entity.identity();
            if belongs {
                match list.iter_mut().find(|item| item.identity() == id) {
                    Some(slot) => *slot = entity.clone(),
                    None => list.push(entity.clone()),
                }
            } else {
                list.retain(|item| item.identity() != id);
            }
        }
        MutationEffect::Deleted(id) => {
            list.retain(|item| item.identity() != *id);
        }
    }
}

fn contains<T: Identified>(list: &[T], id: &T::Id) -> bool {
    list.iter().any(|item| item.identity() == *id)
}
