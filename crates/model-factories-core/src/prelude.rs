//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use model_factories::prelude::*;
//! ```

// Error types
pub use crate::error::{FactoryError, FactoryResult};

// Factory types
pub use crate::factory::{BindingKind, Factory, FactoryCore, FactoryExt, ModelFactory};
pub use crate::model::Model;
pub use crate::registry::FactoryRegistry;

// Fake data
pub use crate::config::FactoryConfig;
pub use crate::faker::{FakerType, generate_fake, random_int};
pub use crate::sequence::{Sequence, sequence};

// Macros
pub use crate::register_factory;

#[cfg(feature = "macros")]
pub use model_factories_macros::{FactoryCore, Model};
