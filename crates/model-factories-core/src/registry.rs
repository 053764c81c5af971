//! Process-wide mapping from model type to factory type.
//!
//! Related bindings created with `with_registered` look their factory up here
//! when they resolve. Entries are added explicitly with [`map_factory`] or in
//! bulk from the candidates submitted with [`register_factory!`](crate::register_factory).
//! Both paths are first-write-wins: mapping a model that already has a
//! factory is a silent no-op.
//!
//! The map starts empty and lives for the whole process; [`clear_factory_map`]
//! is the teardown for tests.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{FactoryError, FactoryResult};
use crate::factory::{Factory, ModelFactory};
use crate::model::Model;

/// A factory type that can be picked up by discovery.
///
/// Built with [`FactoryCandidate::new`]; the `Factory` bound is what limits
/// discovery to real factories for a concrete model.
#[derive(Debug, Clone, Copy)]
pub struct FactoryCandidate {
	factory_name: &'static str,
	module_path: &'static str,
	model_type: fn() -> TypeId,
	model_name: fn() -> &'static str,
	build: fn() -> Box<dyn Any>,
}

impl FactoryCandidate {
	/// Describes factory `F`, declared in `module_path`.
	pub const fn new<F: Factory>(factory_name: &'static str, module_path: &'static str) -> Self {
		Self {
			factory_name,
			module_path,
			model_type: F::model_type,
			model_name: model_name_of::<F>,
			build: build_core::<F>,
		}
	}

	/// Name of the factory type.
	pub fn factory_name(&self) -> &'static str {
		self.factory_name
	}

	/// Module the factory was declared in.
	pub fn module_path(&self) -> &'static str {
		self.module_path
	}

	/// Name of the model the factory builds.
	pub fn model_name(&self) -> &'static str {
		(self.model_name)()
	}

	/// Type identity of the model the factory builds.
	pub fn model_type(&self) -> TypeId {
		(self.model_type)()
	}

	/// Returns `true` if the factory was declared in `prefix` or one of its
	/// submodules.
	pub fn is_in_module(&self, prefix: &str) -> bool {
		match self.module_path.strip_prefix(prefix) {
			Some(rest) => rest.is_empty() || rest.starts_with("::"),
			None => false,
		}
	}
}

inventory::collect!(FactoryCandidate);

/// Submits a factory for discovery.
///
/// The factory is not mapped until one of the discovery functions runs.
///
/// # Example
///
/// ```ignore
/// use model_factories::register_factory;
///
/// register_factory!(AuthorFactory);
///
/// model_factories::discover_in_module(module_path!());
/// ```
#[macro_export]
macro_rules! register_factory {
	($factory:ty) => {
		$crate::inventory::submit! {
			$crate::registry::FactoryCandidate::new::<$factory>(
				stringify!($factory),
				module_path!(),
			)
		}
	};
}

fn model_name_of<F: Factory>() -> &'static str {
	<F::Model as Model>::model_name()
}

fn build_core<F: Factory>() -> Box<dyn Any> {
	Box::new(F::new().into_core())
}

#[derive(Clone, Copy)]
struct FactoryEntry {
	factory_name: &'static str,
	model_name: &'static str,
	build: fn() -> Box<dyn Any>,
}

/// Global factory map.
static FACTORY_MAP: Lazy<RwLock<HashMap<TypeId, FactoryEntry>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

fn insert_entry(model_type: TypeId, entry: FactoryEntry) -> bool {
	let mut map = FACTORY_MAP.write();
	if let Some(existing) = map.get(&model_type) {
		tracing::trace!(
			model = entry.model_name,
			factory = entry.factory_name,
			mapped = existing.factory_name,
			"model already has a factory, skipping"
		);
		return false;
	}
	map.insert(model_type, entry);
	tracing::debug!(
		model = entry.model_name,
		factory = entry.factory_name,
		"mapped factory"
	);
	true
}

/// Maps model `M` to factory `F`. Does nothing if `M` is already mapped.
///
/// Returns `true` if the mapping was added.
pub fn map_factory<M, F>() -> bool
where
	M: Model,
	F: Factory<Model = M>,
{
	insert_entry(
		TypeId::of::<M>(),
		FactoryEntry {
			factory_name: std::any::type_name::<F>(),
			model_name: M::model_name(),
			build: build_core::<F>,
		},
	)
}

/// Maps every candidate whose model is not mapped yet.
///
/// Returns the number of mappings added.
pub fn discover<'a, I>(candidates: I) -> usize
where
	I: IntoIterator<Item = &'a FactoryCandidate>,
{
	let mut added = 0;
	let mut seen = 0;
	for candidate in candidates {
		seen += 1;
		let entry = FactoryEntry {
			factory_name: candidate.factory_name,
			model_name: candidate.model_name(),
			build: candidate.build,
		};
		if insert_entry(candidate.model_type(), entry) {
			added += 1;
		}
	}
	tracing::debug!(candidates = seen, added, "discovered factories");
	added
}

/// Maps the submitted factories declared in `module` or its submodules.
pub fn discover_in_module(module: &str) -> usize {
	discover(
		inventory::iter::<FactoryCandidate>
			.into_iter()
			.filter(|candidate| candidate.is_in_module(module)),
	)
}

/// Maps every submitted factory.
pub fn discover_all() -> usize {
	discover(inventory::iter::<FactoryCandidate>)
}

/// All submitted candidates, mapped or not.
pub fn candidates() -> Vec<&'static FactoryCandidate> {
	inventory::iter::<FactoryCandidate>.into_iter().collect()
}

/// Builds a fresh instance of the factory mapped for `M`.
///
/// The factory's definition has already run on the returned core.
pub fn factory_for<M: Model>() -> FactoryResult<ModelFactory<M>> {
	let entry = FACTORY_MAP.read().get(&TypeId::of::<M>()).copied();
	let Some(entry) = entry else {
		tracing::debug!(model = M::model_name(), "no factory mapped");
		return Err(FactoryError::FactoryNotFound(M::model_name().to_string()));
	};
	(entry.build)()
		.downcast::<ModelFactory<M>>()
		.map(|factory| *factory)
		.map_err(|_| FactoryError::FactoryNotFound(M::model_name().to_string()))
}

/// Returns `true` if a factory is mapped for `M`.
pub fn has_factory_for<M: Model>() -> bool {
	FACTORY_MAP.read().contains_key(&TypeId::of::<M>())
}

/// Name of the factory mapped for `M`, if any.
pub fn factory_name_for<M: Model>() -> Option<&'static str> {
	FACTORY_MAP
		.read()
		.get(&TypeId::of::<M>())
		.map(|entry| entry.factory_name)
}

/// Number of mapped models.
pub fn factory_count() -> usize {
	FACTORY_MAP.read().len()
}

/// Removes every mapping.
///
/// This is primarily useful for testing.
pub fn clear_factory_map() {
	FACTORY_MAP.write().clear();
	tracing::debug!("cleared factory map");
}

/// Handle to the process-wide factory map.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactoryRegistry;

impl FactoryRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Maps model `M` to factory `F` unless `M` is already mapped.
	pub fn map<M, F>(&self) -> bool
	where
		M: Model,
		F: Factory<Model = M>,
	{
		map_factory::<M, F>()
	}

	/// Maps every candidate whose model is not mapped yet.
	pub fn discover<'a, I>(&self, candidates: I) -> usize
	where
		I: IntoIterator<Item = &'a FactoryCandidate>,
	{
		discover(candidates)
	}

	/// Maps the submitted factories declared in `module` or its submodules.
	pub fn discover_in_module(&self, module: &str) -> usize {
		discover_in_module(module)
	}

	/// Builds a fresh instance of the factory mapped for `M`.
	pub fn factory_for<M: Model>(&self) -> FactoryResult<ModelFactory<M>> {
		factory_for::<M>()
	}

	/// Returns `true` if a factory is mapped for `M`.
	pub fn contains<M: Model>(&self) -> bool {
		has_factory_for::<M>()
	}

	/// Number of mapped models.
	pub fn len(&self) -> usize {
		factory_count()
	}

	/// Returns `true` if nothing is mapped.
	pub fn is_empty(&self) -> bool {
		factory_count() == 0
	}

	/// Removes every mapping.
	pub fn clear(&self) {
		clear_factory_map();
	}
}
