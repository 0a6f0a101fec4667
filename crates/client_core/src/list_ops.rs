//! Immutable list updates used to build state patches.
//!
//! Each helper leaves its input untouched and returns a new vector in the
//! original order.

pub fn with_appended<T: Clone>(list: &[T], items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = list.to_vec();
    out.extend(items);
    out
}

/// Replaces the first element matching `predicate` with `item`.
pub fn with_replaced<T: Clone>(list: &[T], predicate: impl Fn(&T) -> bool, item: T) -> Vec<T> {
    let mut out = list.to_vec();
    if let Some(slot) = out.iter_mut().find(|entry| predicate(entry)) {
        *slot = item;
    }
    out
}

/// Removes the first element matching `predicate`.
pub fn with_removed<T: Clone>(list: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    let mut out = list.to_vec();
    if let Some(index) = out.iter().position(|entry| predicate(entry)) {
        out.remove(index);
    }
    out
}
