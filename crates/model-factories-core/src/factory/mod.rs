//! The factory engine.
//!
//! [`ModelFactory`] owns the bindings of one factory instance and turns them
//! into models. User factories wrap a `ModelFactory` and implement
//! [`Factory`] to declare their defaults; the fluent configuration surface
//! lives on [`FactoryExt`].
//!
//! # Creation order
//!
//! `create()` default-constructs the model, then applies plain bindings,
//! model-aware bindings and related bindings in that order (each group in
//! registration order), and finally runs the `after_create` hooks. Model-aware
//! producers can therefore read plain-bound fields of the same model.
//!
//! A property name lives in at most one binding group: binding a name again,
//! with any flavor, replaces whatever was bound to it before.

mod ext;

pub use ext::FactoryExt;

use std::any::{Any, TypeId, type_name};
use std::fmt;

use indexmap::IndexMap;

use crate::binding::{PropertyBinding, RelatedBinding, RelatedKind};
use crate::error::{FactoryError, FactoryResult};
use crate::model::{FieldError, FieldInfo, Model};
use crate::recycle::RecycledPool;

type Hook<M> = Box<dyn Fn(M) -> M>;

/// Which binding group currently owns a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
	/// Producer without input.
	Plain,
	/// Producer reading the in-progress model.
	ModelAware,
	/// Single related model built by a nested factory.
	Related,
	/// List of related models built by a nested factory.
	ManyRelated,
}

/// Binding store and creation engine for models of type `M`.
pub struct ModelFactory<M: Model> {
	plain: IndexMap<String, PropertyBinding<M>>,
	model_aware: IndexMap<String, PropertyBinding<M>>,
	related: IndexMap<String, RelatedBinding>,
	recycled: RecycledPool,
	hooks: Vec<Hook<M>>,
	count: usize,
	invalid: Option<FactoryError>,
}

impl<M: Model> Default for ModelFactory<M> {
	fn default() -> Self {
		Self {
			plain: IndexMap::new(),
			model_aware: IndexMap::new(),
			related: IndexMap::new(),
			recycled: RecycledPool::new(),
			hooks: Vec::new(),
			count: 1,
			invalid: None,
		}
	}
}

impl<M: Model> ModelFactory<M> {
	/// Adds a property binding, replacing any binding for the same name.
	pub fn bind_property(&mut self, binding: PropertyBinding<M>) {
		if !self.accept_name(binding.name()) {
			return;
		}
		let name = binding.name().to_string();
		self.evict(&name);
		if binding.is_model_aware() {
			self.model_aware.insert(name, binding);
		} else {
			self.plain.insert(name, binding);
		}
	}

	/// Adds a related binding, replacing any binding for the same name.
	pub fn bind_related(&mut self, binding: RelatedBinding) {
		if !self.accept_name(binding.name()) {
			return;
		}
		let name = binding.name().to_string();
		self.evict(&name);
		self.related.insert(name, binding);
	}

	/// Adds `instance` to the recycled pool (first instance per type wins).
	pub fn add_recycled<T: Any + Clone>(&mut self, instance: T) {
		if self.recycled.insert(instance) {
			tracing::debug!(
				model = M::model_name(),
				recycled_type = type_name::<T>(),
				"recycled instance"
			);
		}
	}

	/// Copies the entries of an ancestor's pool into this factory's pool.
	pub fn inherit_recycled(&mut self, pool: &RecycledPool) {
		self.recycled.inherit(pool);
	}

	/// The recycled pool of this factory.
	pub fn recycled(&self) -> &RecycledPool {
		&self.recycled
	}

	/// Registers a hook run on every created model.
	pub fn add_hook(&mut self, hook: impl Fn(M) -> M + 'static) {
		self.hooks.push(Box::new(hook));
	}

	/// Sets the number of models built by `create_batch`.
	pub fn set_batch_size(&mut self, count: usize) {
		self.count = count;
	}

	/// Number of models built by `create_batch` (defaults to 1).
	pub fn batch_size(&self) -> usize {
		self.count
	}

	/// Reports which binding group owns `name`, if any.
	pub fn binding_kind(&self, name: &str) -> Option<BindingKind> {
		if self.plain.contains_key(name) {
			return Some(BindingKind::Plain);
		}
		if self.model_aware.contains_key(name) {
			return Some(BindingKind::ModelAware);
		}
		self.related.get(name).map(|binding| match binding.kind() {
			RelatedKind::Single => BindingKind::Related,
			RelatedKind::Many => BindingKind::ManyRelated,
		})
	}

	/// Names of all bound properties, in creation order.
	pub fn bound_properties(&self) -> Vec<&str> {
		self.plain
			.keys()
			.chain(self.model_aware.keys())
			.chain(self.related.keys())
			.map(String::as_str)
			.collect()
	}

	/// Builds one model from the current bindings.
	///
	/// The first failing binding aborts the whole creation.
	pub fn create(&self) -> FactoryResult<M> {
		if let Some(error) = &self.invalid {
			return Err(error.clone());
		}

		let mut model = M::default();

		for binding in self.plain.values().chain(self.model_aware.values()) {
			let field = writable_field::<M>(binding.name())?;
			if self.assign_recycled(&mut model, &field)? {
				continue;
			}
			let value = binding.produce(&model);
			assign(&mut model, &field, value)?;
		}

		for binding in self.related.values() {
			let field = writable_field::<M>(binding.name())?;
			if self.assign_recycled(&mut model, &field)? {
				continue;
			}
			let value = binding.resolve(&self.recycled)?;
			assign(&mut model, &field, value)?;
		}

		let model = self.hooks.iter().fold(model, |model, hook| hook(model));

		tracing::debug!(
			model = M::model_name(),
			bindings = self.plain.len() + self.model_aware.len() + self.related.len(),
			hooks = self.hooks.len(),
			"created model"
		);

		Ok(model)
	}

	/// Builds `count` independent models.
	pub fn create_many(&self, count: usize) -> FactoryResult<Vec<M>> {
		(0..count).map(|_| self.create()).collect()
	}

	fn accept_name(&mut self, name: &str) -> bool {
		match property_name(name) {
			Ok(_) => true,
			Err(error) => {
				tracing::warn!(
					model = M::model_name(),
					expression = name,
					"ignoring binding with an invalid property expression"
				);
				self.invalid.get_or_insert(error);
				false
			}
		}
	}

	fn evict(&mut self, name: &str) {
		self.plain.shift_remove(name);
		self.model_aware.shift_remove(name);
		self.related.shift_remove(name);
	}

	fn assign_recycled(&self, model: &mut M, field: &FieldInfo) -> FactoryResult<bool> {
		let Some(value) = self.recycled.get(field.recycle_key) else {
			return Ok(false);
		};
		tracing::trace!(
			model = M::model_name(),
			property = field.name,
			"assigning recycled instance"
		);
		assign(model, field, value)?;
		Ok(true)
	}
}

impl<M: Model> fmt::Debug for ModelFactory<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelFactory")
			.field("model", &M::model_name())
			.field("plain", &self.plain.keys().collect::<Vec<_>>())
			.field("model_aware", &self.model_aware.keys().collect::<Vec<_>>())
			.field("related", &self.related.keys().collect::<Vec<_>>())
			.field("recycled", &self.recycled)
			.field("hooks", &self.hooks.len())
			.field("count", &self.count)
			.finish()
	}
}

fn writable_field<M: Model>(name: &str) -> FactoryResult<FieldInfo> {
	let field = M::field(name).ok_or_else(|| FactoryError::MissingProperty {
		property: name.to_string(),
		model: M::model_name().to_string(),
	})?;
	if !field.writable {
		return Err(FactoryError::ReadOnlyProperty {
			property: name.to_string(),
			model: M::model_name().to_string(),
		});
	}
	Ok(field)
}

fn assign<M: Model>(model: &mut M, field: &FieldInfo, value: Box<dyn Any>) -> FactoryResult<()> {
	tracing::trace!(model = M::model_name(), property = field.name, "assigning property");
	model
		.set_field(field.name, value)
		.map_err(|error| match error {
			FieldError::Missing => FactoryError::MissingProperty {
				property: field.name.to_string(),
				model: M::model_name().to_string(),
			},
			FieldError::ReadOnly => FactoryError::ReadOnlyProperty {
				property: field.name.to_string(),
				model: M::model_name().to_string(),
			},
			FieldError::TypeMismatch { expected } => FactoryError::TypeMismatch {
				property: field.name.to_string(),
				model: M::model_name().to_string(),
				expected: expected.to_string(),
			},
		})
}

/// Resolves a property expression to a property name.
///
/// Only direct member names are accepted: a non-empty identifier made of
/// letters, digits and underscores that does not start with a digit.
pub fn property_name(expression: &str) -> FactoryResult<&str> {
	let mut chars = expression.chars();
	let valid = match chars.next() {
		Some(first) if first == '_' || first.is_alphabetic() => {
			expression != "_" && chars.all(|c| c == '_' || c.is_alphanumeric())
		}
		_ => false,
	};
	if valid {
		Ok(expression)
	} else {
		Err(FactoryError::InvalidExpression(expression.to_string()))
	}
}

/// Ties a factory type to the [`ModelFactory`] it wraps.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(FactoryCore)]
/// #[factory(model = Post)]
/// pub struct PostFactory {
///     core: ModelFactory<Post>,
/// }
/// ```
pub trait FactoryCore: Sized + 'static {
	/// The model this factory builds.
	type Model: Model;

	/// Wraps a binding store.
	fn from_core(core: ModelFactory<Self::Model>) -> Self;

	/// The wrapped binding store.
	fn core(&self) -> &ModelFactory<Self::Model>;

	/// The wrapped binding store, mutably.
	fn core_mut(&mut self) -> &mut ModelFactory<Self::Model>;

	/// Unwraps the binding store.
	fn into_core(self) -> ModelFactory<Self::Model>;
}

/// A factory with a default recipe for its model.
pub trait Factory: FactoryCore {
	/// Declares the default bindings of this factory.
	///
	/// Runs exactly once, when the factory is constructed with [`Factory::new`].
	fn definition(self) -> Self;

	/// Creates the factory and seeds it with its definition.
	fn new() -> Self {
		tracing::trace!(factory = type_name::<Self>(), "constructing factory");
		Self::from_core(ModelFactory::default()).definition()
	}

	/// Type identity of the built model.
	fn model_type() -> TypeId {
		TypeId::of::<Self::Model>()
	}
}

impl<M: Model> FactoryCore for ModelFactory<M> {
	type Model = M;

	fn from_core(core: ModelFactory<M>) -> Self {
		core
	}

	fn core(&self) -> &ModelFactory<M> {
		self
	}

	fn core_mut(&mut self) -> &mut ModelFactory<M> {
		self
	}

	fn into_core(self) -> ModelFactory<M> {
		self
	}
}

impl<M: Model> Factory for ModelFactory<M> {
	fn definition(self) -> Self {
		self
	}
}
