//! Factory engine for declarative test data.
//!
//! A factory declares, per model type, a default recipe for filling the
//! model's properties, and builds one or many instances on demand. On top of
//! the recipe, callers can:
//!
//! - override properties or apply named states,
//! - wire related models through nested factories (single or lists),
//! - recycle instances so a whole factory graph reuses them,
//! - run hooks on every created model.
//!
//! # Quick Start
//!
//! ```ignore
//! use model_factories::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Model)]
//! pub struct Post {
//!     pub id: uuid::Uuid,
//!     pub title: String,
//!     pub author: Option<Author>,
//! }
//!
//! #[derive(FactoryCore)]
//! #[factory(model = Post)]
//! pub struct PostFactory {
//!     core: ModelFactory<Post>,
//! }
//!
//! impl Factory for PostFactory {
//!     fn definition(self) -> Self {
//!         self.property("id", uuid::Uuid::new_v4)
//!             .property_value("title", "Post title")
//!             .with::<AuthorFactory>("author")
//!     }
//! }
//!
//! let post = PostFactory::new().create()?;
//! ```
//!
//! # Architecture
//!
//! - [`Model`](model::Model) - Setter table a factory writes through
//! - [`ModelFactory`](factory::ModelFactory) - Binding store and creation engine
//! - [`Factory`](factory::Factory) / [`FactoryExt`](factory::FactoryExt) - User factories and the fluent surface
//! - [`RecycledPool`](recycle::RecycledPool) - Instances reused across a factory graph
//! - [`registry`] - Process-wide model to factory mapping
//! - [`faker`] / [`sequence`](mod@sequence) - Generated values for definitions

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

extern crate self as model_factories_core;

pub mod binding;
pub mod config;
pub mod error;
pub mod factory;
pub mod faker;
pub mod model;
pub mod prelude;
pub mod recycle;
pub mod registry;
pub mod sequence;

#[doc(hidden)]
pub use inventory;

// Re-export commonly used types at crate root
pub use binding::{PropertyBinding, RelatedBinding, RelatedKind};
pub use config::FactoryConfig;
pub use error::{FactoryError, FactoryResult};
pub use factory::{BindingKind, Factory, FactoryCore, FactoryExt, ModelFactory, property_name};
pub use faker::{FakerType, generate_fake, random_int};
pub use model::{FieldError, FieldInfo, Model};
pub use recycle::RecycledPool;
pub use registry::{
	FactoryCandidate, FactoryRegistry, clear_factory_map, discover, discover_all,
	discover_in_module, factory_count, factory_for, has_factory_for, map_factory,
};
pub use sequence::{Sequence, reset_sequences, sequence};

// Re-export derive macros when available
#[cfg(feature = "macros")]
pub use model_factories_macros::{FactoryCore, Model};
