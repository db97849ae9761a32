use std::collections::HashMap;

use crate::model::Person;
use crate::normalize;

/// Key for the exact-name indices: a normalized (last, first) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey {
    pub last: String,
    pub first: String,
}

impl NameKey {
    /// Key for an event record's own name order.
    pub fn of(person: &Person) -> Self {
        Self {
            last: normalize::key(&person.last_name),
            first: normalize::key(&person.first_name),
        }
    }
}

/// Hash indices over the reference set, built once per matching run.
///
/// Values are positions into the reference slice, in reference-file order;
/// duplicate keys accumulate, none are dropped. Rebuild whenever the
/// reference set changes.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    by_name: HashMap<NameKey, Vec<usize>>,
    by_swapped: HashMap<NameKey, Vec<usize>>,
}

impl CandidateIndex {
    pub fn build(reference: &[Person]) -> Self {
        let mut by_name: HashMap<NameKey, Vec<usize>> = HashMap::new();
        let mut by_swapped: HashMap<NameKey, Vec<usize>> = HashMap::new();

        for (pos, person) in reference.iter().enumerate() {
            let last = normalize::key(&person.last_name);
            let first = normalize::key(&person.first_name);
            by_name
                .entry(NameKey { last: last.clone(), first: first.clone() })
                .or_default()
                .push(pos);
            by_swapped
                .entry(NameKey { last: first, first: last })
                .or_default()
                .push(pos);
        }

        Self { by_name, by_swapped }
    }

    /// Reference positions whose (last, first) equals the key.
    pub fn exact(&self, key: &NameKey) -> &[usize] {
        self.by_name.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reference positions whose (first, last) equals the key.
    pub fn swapped(&self, key: &NameKey) -> &[usize] {
        self.by_swapped.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}
