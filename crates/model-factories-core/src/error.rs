//! Error types for the factory engine.
//!
//! Every failure the engine can report is a variant of [`FactoryError`].
//! They are raised synchronously from `create*`, `try_recycle` and registry
//! lookups, and are meant to be fixed in the calling code rather than handled.

use thiserror::Error;

/// Errors that can occur while configuring or running a factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
	/// No factory is mapped for the requested model type.
	#[error("Could not find a factory for model {0}")]
	FactoryNotFound(String),

	/// A binding targets a property the model does not expose.
	#[error("Property {property} does not exist on {model}")]
	MissingProperty {
		/// Bound property name.
		property: String,
		/// Model the property was looked up on.
		model: String,
	},

	/// A binding targets a property that cannot be assigned.
	#[error("Property {property} on {model} is not writable")]
	ReadOnlyProperty {
		/// Bound property name.
		property: String,
		/// Model owning the property.
		model: String,
	},

	/// A property selector is not a plain property name.
	#[error("Invalid property expression: {0:?}")]
	InvalidExpression(String),

	/// `try_recycle` was called without an instance.
	#[error("Cannot recycle a missing instance of {0}")]
	NullRecycledInstance(String),

	/// A produced value does not have the declared type of its property.
	#[error("Property {property} on {model} expects a value of type {expected}")]
	TypeMismatch {
		/// Bound property name.
		property: String,
		/// Model owning the property.
		model: String,
		/// Declared type of the property.
		expected: String,
	},
}

impl FactoryError {
	/// Returns the property name this error refers to, if any.
	pub fn property(&self) -> Option<&str> {
		match self {
			Self::MissingProperty { property, .. }
			| Self::ReadOnlyProperty { property, .. }
			| Self::TypeMismatch { property, .. } => Some(property),
			Self::InvalidExpression(expression) => Some(expression),
			Self::FactoryNotFound(_) | Self::NullRecycledInstance(_) => None,
		}
	}
}

/// Result type alias for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;
