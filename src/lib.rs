//! # model-factories
//!
//! Declarative test-data factories for Rust structs.
//!
//! A factory holds a default recipe for a model and builds instances on
//! demand. Recipes can be overridden per call, extended with named states,
//! linked to other factories for related models, and told to reuse
//! ("recycle") specific instances anywhere in the graph they build.
//!
//! ## Quick Start
//!
//! ```ignore
//! use model_factories::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Model)]
//! pub struct Author {
//!     pub id: uuid::Uuid,
//!     pub name: String,
//! }
//!
//! #[derive(FactoryCore)]
//! #[factory(model = Author)]
//! pub struct AuthorFactory {
//!     core: ModelFactory<Author>,
//! }
//!
//! impl Factory for AuthorFactory {
//!     fn definition(self) -> Self {
//!         self.property("id", uuid::Uuid::new_v4)
//!             .property("name", || FakerType::Name.generate())
//!     }
//! }
//!
//! register_factory!(AuthorFactory);
//!
//! let author = AuthorFactory::new().property_value("name", "foo").create()?;
//! let authors = AuthorFactory::new().create_many(3)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `macros` (default) - `#[derive(Model)]` and `#[derive(FactoryCore)]`
//!
//! ## Configuration
//!
//! Set `MODEL_FACTORIES_SEED` and call [`FactoryConfig::from_env`] followed by
//! [`FactoryConfig::apply`] to make generated values reproducible.

#![warn(missing_docs)]

pub use model_factories_core::*;

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use model_factories_core::prelude::*;
}
