//! Reflective property access for factory-built models.
//!
//! The engine never touches model fields directly. Instead each model exposes
//! a setter table through the [`Model`] trait: a field lookup that reports
//! whether a property exists and is writable, and a setter that accepts a
//! type-erased value. The table is normally generated with
//! `#[derive(Model)]`:
//!
//! ```ignore
//! use model_factories::Model;
//!
//! #[derive(Debug, Clone, Default, Model)]
//! pub struct Author {
//!     pub id: uuid::Uuid,
//!     pub name: String,
//!     #[factory(readonly)]
//!     pub not_writable: String,
//! }
//! ```

use std::any::{Any, TypeId, type_name};

/// Metadata describing one settable property of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
	/// Property name as used in bindings.
	pub name: &'static str,
	/// Declared type of the property.
	pub type_name: &'static str,
	/// Whether the property may be assigned by a factory.
	pub writable: bool,
	/// Type identity used to match recycled instances.
	///
	/// This is the declared type with one `Option<_>` layer removed, so an
	/// `Option<Author>` property matches a recycled `Author`. Collections are
	/// not unwrapped: a `Vec<Comment>` property never matches a recycled
	/// `Comment`.
	pub recycle_key: TypeId,
}

impl FieldInfo {
	/// Describes a property whose declared type is `T`.
	pub fn of<T: 'static>(name: &'static str, writable: bool) -> Self {
		Self {
			name,
			type_name: type_name::<T>(),
			writable,
			recycle_key: TypeId::of::<T>(),
		}
	}

	/// Describes an `Option<T>` property; recycled `T` instances match it.
	pub fn optional<T: 'static>(name: &'static str, writable: bool) -> Self {
		Self {
			name,
			type_name: type_name::<Option<T>>(),
			writable,
			recycle_key: TypeId::of::<T>(),
		}
	}
}

/// Reasons a setter can refuse a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
	/// The model has no property with that name.
	Missing,
	/// The property exists but cannot be assigned.
	ReadOnly,
	/// The value does not have the declared type of the property.
	TypeMismatch {
		/// Declared type of the property.
		expected: &'static str,
	},
}

/// A type that factories can build.
///
/// Models are default-constructed before any binding is applied, so every
/// field starts from its `Default` value.
pub trait Model: Default + 'static {
	/// Short name of the model, used in error messages and logs.
	fn model_name() -> &'static str;

	/// Looks up a property by name.
	fn field(name: &str) -> Option<FieldInfo>;

	/// Assigns a type-erased value to a property.
	fn set_field(&mut self, name: &str, value: Box<dyn Any>) -> Result<(), FieldError>;
}

/// Downcasts a value destined for a property declared as `T`.
///
/// String literals are accepted for `String` properties.
#[doc(hidden)]
pub fn downcast_value<T: 'static>(value: Box<dyn Any>) -> Result<T, FieldError> {
	match value.downcast::<T>() {
		Ok(value) => Ok(*value),
		Err(value) => from_str_literal(&*value).ok_or(FieldError::TypeMismatch {
			expected: type_name::<T>(),
		}),
	}
}

/// Downcasts a value destined for a property declared as `Option<T>`.
///
/// `Option<T>`, a bare `T`, and (for `Option<String>`) a string literal are
/// accepted.
#[doc(hidden)]
pub fn downcast_optional_value<T: 'static>(
	value: Box<dyn Any>,
) -> Result<Option<T>, FieldError> {
	let value = match value.downcast::<Option<T>>() {
		Ok(value) => return Ok(*value),
		Err(value) => value,
	};
	match value.downcast::<T>() {
		Ok(value) => Ok(Some(*value)),
		Err(value) => from_str_literal(&*value)
			.map(Some)
			.ok_or(FieldError::TypeMismatch {
				expected: type_name::<Option<T>>(),
			}),
	}
}

fn from_str_literal<T: 'static>(value: &dyn Any) -> Option<T> {
	let text = value.downcast_ref::<&'static str>()?;
	let owned: Box<dyn Any> = Box::new(text.to_string());
	owned.downcast::<T>().ok().map(|value| *value)
}
