//! Fluent configuration surface shared by every factory.

use std::any::{Any, type_name};

use super::{BindingKind, Factory, ModelFactory};
use crate::binding::{PropertyBinding, RelatedBinding};
use crate::error::{FactoryError, FactoryResult};
use crate::model::Model;

/// Builder-style methods available on every [`Factory`].
///
/// All configuration methods consume the factory and hand it back, so calls
/// chain naturally:
///
/// ```ignore
/// let post = PostFactory::new()
///     .property("title", || "Hello".to_string())
///     .with::<AuthorFactory>("author")
///     .with_many::<CommentFactory>("comments", 3)
///     .create()?;
/// ```
///
/// Named states are ordinary methods on the factory type that call
/// [`property`](FactoryExt::property) under a descriptive name.
pub trait FactoryExt: Factory {
	/// Binds `name` to a producer invoked once per created model.
	fn property<V, P>(mut self, name: &str, producer: P) -> Self
	where
		V: 'static,
		P: Fn() -> V + 'static,
	{
		self.core_mut()
			.bind_property(PropertyBinding::value(name, producer));
		self
	}

	/// Binds `name` to a producer that reads the model under construction.
	///
	/// Plain bindings have already been applied when the producer runs.
	fn property_with_model<V, P>(mut self, name: &str, producer: P) -> Self
	where
		V: 'static,
		P: Fn(&Self::Model) -> V + 'static,
	{
		self.core_mut()
			.bind_property(PropertyBinding::with_model(name, producer));
		self
	}

	/// Binds `name` to a fixed value cloned into every created model.
	fn property_value<V>(self, name: &str, value: V) -> Self
	where
		V: Clone + 'static,
	{
		self.property(name, move || value.clone())
	}

	/// Binds `name` to a model built by a fresh `F`.
	fn with<F: Factory>(self, name: &str) -> Self {
		self.with_using::<F, _>(name, |factory: F| factory.create())
	}

	/// Binds `name` to a model built by `callback` from a fresh `F`.
	fn with_using<F, C>(mut self, name: &str, callback: C) -> Self
	where
		F: Factory,
		C: Fn(F) -> FactoryResult<F::Model> + 'static,
	{
		self.core_mut()
			.bind_related(RelatedBinding::single::<F, C>(name, callback));
		self
	}

	/// Binds `name` to a model built by the factory registered for `R`.
	///
	/// The registry is consulted on every `create`, so a missing mapping
	/// surfaces as [`FactoryError::FactoryNotFound`] at that point.
	fn with_registered<R: Model>(self, name: &str) -> Self {
		self.with_registered_using::<R, _>(name, |factory: ModelFactory<R>| factory.create())
	}

	/// Binds `name` to a model built by `callback` from the factory
	/// registered for `R`.
	fn with_registered_using<R, C>(mut self, name: &str, callback: C) -> Self
	where
		R: Model,
		C: Fn(ModelFactory<R>) -> FactoryResult<R> + 'static,
	{
		self.core_mut()
			.bind_related(RelatedBinding::registered::<R, C>(name, callback));
		self
	}

	/// Binds `name` to `count` models built by a fresh `F`.
	fn with_many<F: Factory>(self, name: &str, count: usize) -> Self {
		self.with_many_using::<F, _>(name, move |factory: F| factory.create_many(count))
	}

	/// Binds `name` to the list returned by `callback` from a fresh `F`.
	fn with_many_using<F, C>(mut self, name: &str, callback: C) -> Self
	where
		F: Factory,
		C: Fn(F) -> FactoryResult<Vec<F::Model>> + 'static,
	{
		self.core_mut()
			.bind_related(RelatedBinding::many::<F, C>(name, callback));
		self
	}

	/// Binds `name` to `count` models built by a fresh `F` after `configure`
	/// has adjusted it.
	fn with_many_configured<F, C>(self, name: &str, count: usize, configure: C) -> Self
	where
		F: Factory,
		C: Fn(F) -> F + 'static,
	{
		self.with_many_using::<F, _>(name, move |factory: F| {
			configure(factory).create_many(count)
		})
	}

	/// Reuses `instance` for every property declared with its type, here and
	/// in every related factory resolved beneath this one.
	fn recycle<T: Any + Clone>(mut self, instance: T) -> Self {
		self.core_mut().add_recycled(instance);
		self
	}

	/// Like [`recycle`](FactoryExt::recycle), but fails when no instance is
	/// given.
	fn try_recycle<T: Any + Clone>(self, instance: Option<T>) -> FactoryResult<Self> {
		match instance {
			Some(instance) => Ok(self.recycle(instance)),
			None => Err(FactoryError::NullRecycledInstance(
				type_name::<T>().to_string(),
			)),
		}
	}

	/// Registers a hook run on every created model, in registration order.
	fn after_create<H>(mut self, hook: H) -> Self
	where
		H: Fn(Self::Model) -> Self::Model + 'static,
	{
		self.core_mut().add_hook(hook);
		self
	}

	/// Sets how many models [`create_batch`](FactoryExt::create_batch) builds.
	fn count(mut self, count: usize) -> Self {
		self.core_mut().set_batch_size(count);
		self
	}

	/// Builds one model.
	fn create(&self) -> FactoryResult<Self::Model> {
		self.core().create()
	}

	/// Builds `count` independent models.
	fn create_many(&self, count: usize) -> FactoryResult<Vec<Self::Model>> {
		self.core().create_many(count)
	}

	/// Builds as many models as configured with [`count`](FactoryExt::count).
	fn create_batch(&self) -> FactoryResult<Vec<Self::Model>> {
		self.core().create_many(self.core().batch_size())
	}

	/// Reports which binding group owns `name`, if any.
	fn binding_kind(&self, name: &str) -> Option<BindingKind> {
		self.core().binding_kind(name)
	}

	/// Number of distinct recycled types.
	fn recycled_count(&self) -> usize {
		self.core().recycled().len()
	}
}

impl<F: Factory> FactoryExt for F {}
