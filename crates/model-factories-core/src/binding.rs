//! Bindings: rules that produce the value of one model property.
//!
//! A [`PropertyBinding`] pairs a property name with a value producer, either
//! one that takes no input or one that reads the model built so far. A
//! [`RelatedBinding`] pairs a property name with a nested factory that builds
//! one related model or a list of them.

use std::any::{Any, type_name};
use std::fmt;

use crate::error::FactoryResult;
use crate::factory::{Factory, ModelFactory};
use crate::model::Model;
use crate::recycle::RecycledPool;
use crate::registry;

type ValueProducer = Box<dyn Fn() -> Box<dyn Any>>;
type ModelProducer<M> = Box<dyn Fn(&M) -> Box<dyn Any>>;
type RelatedResolver = Box<dyn Fn(&RecycledPool) -> FactoryResult<Box<dyn Any>>>;

enum Producer<M> {
	Value(ValueProducer),
	WithModel(ModelProducer<M>),
}

/// Binding of a property to a value producer.
pub struct PropertyBinding<M> {
	name: String,
	producer: Producer<M>,
}

impl<M: Model> PropertyBinding<M> {
	/// Binds `name` to a producer that takes no input.
	pub fn value<V, P>(name: impl Into<String>, producer: P) -> Self
	where
		V: 'static,
		P: Fn() -> V + 'static,
	{
		Self {
			name: name.into(),
			producer: Producer::Value(Box::new(move || Box::new(producer()) as Box<dyn Any>)),
		}
	}

	/// Binds `name` to a producer that reads the model under construction.
	pub fn with_model<V, P>(name: impl Into<String>, producer: P) -> Self
	where
		V: 'static,
		P: Fn(&M) -> V + 'static,
	{
		Self {
			name: name.into(),
			producer: Producer::WithModel(Box::new(move |model| {
				Box::new(producer(model)) as Box<dyn Any>
			})),
		}
	}

	/// Name of the bound property.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns `true` if the producer receives the in-progress model.
	pub fn is_model_aware(&self) -> bool {
		matches!(self.producer, Producer::WithModel(_))
	}

	pub(crate) fn produce(&self, model: &M) -> Box<dyn Any> {
		match &self.producer {
			Producer::Value(producer) => producer(),
			Producer::WithModel(producer) => producer(model),
		}
	}
}

impl<M> fmt::Debug for PropertyBinding<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let flavor = match self.producer {
			Producer::Value(_) => "value",
			Producer::WithModel(_) => "with_model",
		};
		f.debug_struct("PropertyBinding")
			.field("name", &self.name)
			.field("producer", &flavor)
			.finish()
	}
}

/// Shape of a related binding's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedKind {
	/// One related model.
	Single,
	/// An ordered list of related models.
	Many,
}

/// Binding of a property to a nested factory.
///
/// Resolution creates a fresh child factory, copies the owner's recycled
/// pool into it, and runs the creation callback against it.
pub struct RelatedBinding {
	name: String,
	kind: RelatedKind,
	related_model: &'static str,
	resolve: RelatedResolver,
}

impl RelatedBinding {
	/// Binds `name` to one model built by factory `F`.
	pub fn single<F, C>(name: impl Into<String>, callback: C) -> Self
	where
		F: Factory,
		C: Fn(F) -> FactoryResult<F::Model> + 'static,
	{
		Self {
			name: name.into(),
			kind: RelatedKind::Single,
			related_model: F::Model::model_name(),
			resolve: Box::new(move |pool| {
				let factory = child_factory::<F>(pool);
				callback(factory).map(|model| Box::new(model) as Box<dyn Any>)
			}),
		}
	}

	/// Binds `name` to one model built by whichever factory is registered
	/// for `R` at the time the binding resolves.
	pub fn registered<R, C>(name: impl Into<String>, callback: C) -> Self
	where
		R: Model,
		C: Fn(ModelFactory<R>) -> FactoryResult<R> + 'static,
	{
		Self {
			name: name.into(),
			kind: RelatedKind::Single,
			related_model: R::model_name(),
			resolve: Box::new(move |pool| {
				let mut factory = registry::factory_for::<R>()?;
				factory.inherit_recycled(pool);
				callback(factory).map(|model| Box::new(model) as Box<dyn Any>)
			}),
		}
	}

	/// Binds `name` to a list of models built by factory `F`.
	pub fn many<F, C>(name: impl Into<String>, callback: C) -> Self
	where
		F: Factory,
		C: Fn(F) -> FactoryResult<Vec<F::Model>> + 'static,
	{
		Self {
			name: name.into(),
			kind: RelatedKind::Many,
			related_model: F::Model::model_name(),
			resolve: Box::new(move |pool| {
				let factory = child_factory::<F>(pool);
				callback(factory).map(|models| Box::new(models) as Box<dyn Any>)
			}),
		}
	}

	/// Name of the bound property.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether this binding builds one model or a list.
	pub fn kind(&self) -> RelatedKind {
		self.kind
	}

	/// Name of the related model.
	pub fn related_model(&self) -> &'static str {
		self.related_model
	}

	pub(crate) fn resolve(&self, pool: &RecycledPool) -> FactoryResult<Box<dyn Any>> {
		(self.resolve)(pool)
	}
}

impl fmt::Debug for RelatedBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RelatedBinding")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("related_model", &self.related_model)
			.finish()
	}
}

fn child_factory<F: Factory>(pool: &RecycledPool) -> F {
	let mut factory = F::new();
	factory.core_mut().inherit_recycled(pool);
	tracing::trace!(
		factory = type_name::<F>(),
		recycled = pool.len(),
		"resolved related factory"
	);
	factory
}
