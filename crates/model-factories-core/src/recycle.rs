//! Recycled instances shared across a factory graph.
//!
//! A factory's pool maps a type identity to one instance that replaces
//! generation for every property declared with that type. When a related
//! factory is resolved, the owner's pool is copied into it, so nested
//! factories see everything their ancestors recycled while sibling subtrees
//! stay isolated from each other's later additions.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Clones a stored instance into a fresh type-erased box.
trait RecycledValue {
	fn clone_boxed(&self) -> Box<dyn Any>;
}

impl<T: Any + Clone> RecycledValue for T {
	fn clone_boxed(&self) -> Box<dyn Any> {
		Box::new(self.clone())
	}
}

#[derive(Clone)]
struct RecycledEntry {
	type_name: &'static str,
	value: Rc<dyn RecycledValue>,
}

/// Mapping from type identity to the instance reused for that type.
///
/// Entries are first-registration-wins: adding a second instance of a type
/// that is already pooled keeps the first one. Cloning a pool copies the
/// mapping, not a reference to it.
#[derive(Clone, Default)]
pub struct RecycledPool {
	entries: HashMap<TypeId, RecycledEntry>,
}

impl RecycledPool {
	/// Creates an empty pool.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `instance` under its concrete type.
	///
	/// Returns `false` when an instance of that type was already pooled, in
	/// which case the pool is left untouched.
	pub fn insert<T: Any + Clone>(&mut self, instance: T) -> bool {
		let key = TypeId::of::<T>();
		if self.entries.contains_key(&key) {
			tracing::trace!(
				recycled_type = type_name::<T>(),
				"instance already recycled, keeping the first one"
			);
			return false;
		}
		self.entries.insert(
			key,
			RecycledEntry {
				type_name: type_name::<T>(),
				value: Rc::new(instance),
			},
		);
		true
	}

	/// Returns a fresh copy of the instance pooled under `key`.
	pub fn get(&self, key: TypeId) -> Option<Box<dyn Any>> {
		self.entries
			.get(&key)
			.map(|entry| (*entry.value).clone_boxed())
	}

	/// Returns `true` if an instance is pooled under `key`.
	pub fn contains(&self, key: TypeId) -> bool {
		self.entries.contains_key(&key)
	}

	/// Copies every entry of `parent` that this pool does not hold yet.
	pub fn inherit(&mut self, parent: &RecycledPool) {
		for (key, entry) in &parent.entries {
			self.entries.entry(*key).or_insert_with(|| entry.clone());
		}
	}

	/// Number of pooled instances.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if nothing is pooled.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Debug for RecycledPool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set()
			.entries(self.entries.values().map(|entry| entry.type_name))
			.finish()
	}
}
