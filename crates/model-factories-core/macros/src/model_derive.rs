//! Derive macro for the Model trait
//!
//! Builds the property lookup and setter table for a struct with named
//! fields.

use crate::crate_paths::get_model_factories_crate;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type};

/// Field classification result
enum FieldKind {
	/// Settable property declared as `T`
	Plain,
	/// Settable property declared as `Option<T>`; carries `T`
	Optional(Type),
	/// Property that exists but cannot be assigned
	ReadOnly,
}

struct ModelField {
	ident: syn::Ident,
	name: String,
	ty: Type,
	kind: FieldKind,
}

/// Implementation of the Model derive macro
pub(crate) fn derive_model_impl(input: DeriveInput) -> syn::Result<TokenStream> {
	let struct_name = &input.ident;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Model cannot be derived for generic structs",
		));
	}

	// Only support structs with named fields
	let fields = match &input.data {
		Data::Struct(data_struct) => match &data_struct.fields {
			Fields::Named(fields) => &fields.named,
			_ => {
				return Err(syn::Error::new_spanned(
					struct_name,
					"Model can only be derived for structs with named fields",
				));
			}
		},
		_ => {
			return Err(syn::Error::new_spanned(
				struct_name,
				"Model can only be derived for structs",
			));
		}
	};

	let model_name = parse_model_name(&input.attrs)?.unwrap_or_else(|| struct_name.to_string());

	let mut model_fields = Vec::new();
	for field in fields {
		if let Some(model_field) = classify_field(field)? {
			model_fields.push(model_field);
		}
	}

	let krate = get_model_factories_crate()?;
	let field_impl = generate_field(&model_fields, &krate);
	let set_field_impl = generate_set_field(&model_fields, &krate);

	Ok(quote! {
		impl #krate::model::Model for #struct_name {
			fn model_name() -> &'static str {
				#model_name
			}

			fn field(name: &str) -> ::std::option::Option<#krate::model::FieldInfo> {
				#field_impl
			}

			#[allow(unused_variables)]
			fn set_field(
				&mut self,
				name: &str,
				value: ::std::boxed::Box<dyn ::std::any::Any>,
			) -> ::std::result::Result<(), #krate::model::FieldError> {
				#set_field_impl
			}
		}
	})
}

/// Reads `#[factory(name = "...")]` from the struct attributes
fn parse_model_name(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
	let mut name = None;
	for attr in attrs {
		if !attr.path().is_ident("factory") {
			continue;
		}
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("name") {
				let value: LitStr = meta.value()?.parse()?;
				name = Some(value.value());
				Ok(())
			} else {
				Err(meta.error("unsupported model attribute, expected `name`"))
			}
		})?;
	}
	Ok(name)
}

/// Classify a field, returning `None` for skipped fields
fn classify_field(field: &syn::Field) -> syn::Result<Option<ModelField>> {
	let Some(ident) = field.ident.clone() else {
		return Ok(None);
	};

	let mut readonly = false;
	let mut skip = false;
	for attr in &field.attrs {
		if !attr.path().is_ident("factory") {
			continue;
		}
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("readonly") {
				readonly = true;
				Ok(())
			} else if meta.path.is_ident("skip") {
				skip = true;
				Ok(())
			} else {
				Err(meta.error("unsupported field attribute, expected `readonly` or `skip`"))
			}
		})?;
	}

	if skip {
		return Ok(None);
	}

	let kind = if readonly {
		FieldKind::ReadOnly
	} else if let Some(inner) = option_inner_type(&field.ty) {
		FieldKind::Optional(inner.clone())
	} else {
		FieldKind::Plain
	};

	Ok(Some(ModelField {
		name: ident.unraw().to_string(),
		ident,
		ty: field.ty.clone(),
		kind,
	}))
}

/// Returns `T` for a field declared as `Option<T>`
fn option_inner_type(ty: &Type) -> Option<&Type> {
	if let Type::Path(type_path) = ty
		&& type_path.qself.is_none()
		&& let Some(segment) = type_path.path.segments.last()
		&& segment.ident == "Option"
		&& let PathArguments::AngleBracketed(args) = &segment.arguments
		&& args.args.len() == 1
		&& let Some(GenericArgument::Type(inner)) = args.args.first()
	{
		return Some(inner);
	}
	None
}

/// Generate the field lookup
fn generate_field(fields: &[ModelField], krate: &TokenStream) -> TokenStream {
	let arms: Vec<_> = fields
		.iter()
		.map(|field| {
			let name = &field.name;
			let ty = &field.ty;
			let info = match &field.kind {
				FieldKind::Plain => quote! {
					#krate::model::FieldInfo::of::<#ty>(#name, true)
				},
				FieldKind::Optional(inner) => quote! {
					#krate::model::FieldInfo::optional::<#inner>(#name, true)
				},
				FieldKind::ReadOnly => match option_inner_type(ty) {
					Some(inner) => quote! {
						#krate::model::FieldInfo::optional::<#inner>(#name, false)
					},
					None => quote! {
						#krate::model::FieldInfo::of::<#ty>(#name, false)
					},
				},
			};
			quote! {
				#name => ::std::option::Option::Some(#info),
			}
		})
		.collect();

	quote! {
		match name {
			#(#arms)*
			_ => ::std::option::Option::None,
		}
	}
}

/// Generate the setter table
fn generate_set_field(fields: &[ModelField], krate: &TokenStream) -> TokenStream {
	let arms: Vec<_> = fields
		.iter()
		.map(|field| {
			let name = &field.name;
			let ident = &field.ident;
			let ty = &field.ty;
			let assignment = match &field.kind {
				FieldKind::Plain => quote! {
					self.#ident = #krate::model::downcast_value::<#ty>(value)?;
					::std::result::Result::Ok(())
				},
				FieldKind::Optional(inner) => quote! {
					self.#ident = #krate::model::downcast_optional_value::<#inner>(value)?;
					::std::result::Result::Ok(())
				},
				FieldKind::ReadOnly => quote! {
					::std::result::Result::Err(#krate::model::FieldError::ReadOnly)
				},
			};
			quote! {
				#name => {
					#assignment
				}
			}
		})
		.collect();

	quote! {
		match name {
			#(#arms)*
			_ => ::std::result::Result::Err(#krate::model::FieldError::Missing),
		}
	}
}
