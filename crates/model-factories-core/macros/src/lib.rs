//! Procedural macros for model-factories.
//!
//! This crate provides `#[derive(Model)]`, which generates the setter table
//! factories write through, and `#[derive(FactoryCore)]`, which ties a
//! factory struct to the binding store it wraps.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod crate_paths;
mod factory_derive;
mod model_derive;

/// Derives the `Model` trait for a struct with named fields.
///
/// Every field becomes a settable property named after the field. The
/// struct must implement `Default`.
///
/// # Attributes
///
/// ## Struct-level attributes
///
/// - `#[factory(name = "BlogPost")]` - Model name used in errors (defaults to the struct name)
///
/// ## Field-level attributes
///
/// - `#[factory(readonly)]` - Property exists but cannot be assigned
/// - `#[factory(skip)]` - Property is hidden from factories
///
/// # Example
///
/// ```ignore
/// use model_factories::Model;
///
/// #[derive(Debug, Clone, Default, Model)]
/// pub struct Author {
///     pub id: uuid::Uuid,
///     pub name: String,
///     pub born: Option<chrono::NaiveDate>,
///     #[factory(readonly)]
///     pub not_writable: String,
/// }
/// ```
///
/// `Option<T>` fields accept either an `Option<T>` or a bare `T`, and
/// recycled `T` instances are substituted into them.
#[proc_macro_derive(Model, attributes(factory))]
pub fn derive_model(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	model_derive::derive_model_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}

/// Derives the `FactoryCore` trait for a factory struct.
///
/// # Attributes
///
/// ## Struct-level attributes
///
/// - `#[factory(model = ModelType)]` - Specifies the model type to create
///
/// ## Field-level attributes
///
/// - `#[factory(core)]` - Marks the `ModelFactory` field when it cannot be
///   found by its type
///
/// Fields other than the core are initialized with `Default::default()`.
///
/// # Example
///
/// ```ignore
/// use model_factories::prelude::*;
///
/// #[derive(FactoryCore)]
/// #[factory(model = Post)]
/// pub struct PostFactory {
///     core: ModelFactory<Post>,
/// }
/// ```
#[proc_macro_derive(FactoryCore, attributes(factory))]
pub fn derive_factory_core(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	factory_derive::derive_factory_core_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}
