//! Structural equality.
//!
//! Two values are structurally equal when they have the same shape and the same
//! contents, regardless of whether they are the same instance. Maps are compared
//! as their entries sorted by key, so field order never matters; sets are compared
//! as their sorted elements; sequences are compared in order.
//!
//! Values are owned trees, so the comparison always terminates.

use crate::{Record, RecordId};
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Deep value equality.
pub trait Structural {
    fn structural_eq(&self, other: &Self) -> bool;
}

/// Compare two values structurally. Identical references short-circuit.
pub fn equal<T: Structural + ?Sized>(x: &T, y: &T) -> bool {
    std::ptr::eq(x, y) || x.structural_eq(y)
}

fn pairwise<'a, T, I>(lhs: I, rhs: I) -> bool
where
    T: Structural + ?Sized + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    lhs.len() == rhs.len() && lhs.zip(rhs).all(|(x, y)| equal(x, y))
}

fn sorted_entries<'a, K, V, I>(entries: I) -> Vec<(&'a K, &'a V)>
where
    K: Ord + 'a,
    V: 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}

fn entries_equal<K: Eq, V: Structural + ?Sized>(lhs: &[(&K, &V)], rhs: &[(&K, &V)]) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|((ka, va), (kb, vb))| ka == kb && equal(*va, *vb))
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        // 1 and 1.0 are the same number
        return matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y);
    }
    // Integers compare exactly, beyond f64 precision
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => a.as_u64().is_some() && a.as_u64() == b.as_u64(),
    }
}

impl Structural for Value {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => equal(a.as_slice(), b.as_slice()),
            (Value::Object(a), Value::Object(b)) => equal(a, b),
            _ => false,
        }
    }
}

impl Structural for Map<String, Value> {
    fn structural_eq(&self, other: &Self) -> bool {
        entries_equal(
            &sorted_entries(self.iter()),
            &sorted_entries(other.iter()),
        )
    }
}

impl<T: Structural> Structural for [T] {
    fn structural_eq(&self, other: &Self) -> bool {
        pairwise(self.iter(), other.iter())
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        equal(self.as_slice(), other.as_slice())
    }
}

impl<T: Structural> Structural for Option<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => equal(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Structural + Ord> Structural for BTreeSet<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        pairwise(self.iter(), other.iter())
    }
}

impl<T: Structural + Ord + Hash, S> Structural for HashSet<T, S> {
    fn structural_eq(&self, other: &Self) -> bool {
        let mut lhs: Vec<_> = self.iter().collect();
        let mut rhs: Vec<_> = other.iter().collect();
        lhs.sort();
        rhs.sort();
        pairwise(lhs.into_iter(), rhs.into_iter())
    }
}

impl<K: Ord, V: Structural> Structural for BTreeMap<K, V> {
    fn structural_eq(&self, other: &Self) -> bool {
        entries_equal(
            &self.iter().collect::<Vec<_>>(),
            &other.iter().collect::<Vec<_>>(),
        )
    }
}

impl<K: Ord + Hash, V: Structural, S> Structural for HashMap<K, V, S> {
    fn structural_eq(&self, other: &Self) -> bool {
        entries_equal(
            &sorted_entries(self.iter()),
            &sorted_entries(other.iter()),
        )
    }
}

impl Structural for Record {
    fn structural_eq(&self, other: &Self) -> bool {
        self.id() == other.id() && equal(self.fields(), other.fields())
    }
}

macro_rules! primitive_structural {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structural for $ty {
                fn structural_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

primitive_structural!(bool, char, i32, i64, u32, u64, usize, f64, str, String, RecordId);
