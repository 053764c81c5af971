//! Derive macro for the FactoryCore trait

use crate::crate_paths::get_model_factories_crate;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Member, Type};

/// Implementation of the FactoryCore derive macro
pub(crate) fn derive_factory_core_impl(input: DeriveInput) -> syn::Result<TokenStream> {
	let struct_name = &input.ident;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"FactoryCore cannot be derived for generic structs",
		));
	}

	let fields = match &input.data {
		Data::Struct(data_struct) => &data_struct.fields,
		_ => {
			return Err(syn::Error::new_spanned(
				struct_name,
				"FactoryCore can only be derived for structs",
			));
		}
	};
	if matches!(fields, Fields::Unit) {
		return Err(syn::Error::new_spanned(
			struct_name,
			"FactoryCore requires a field holding the ModelFactory",
		));
	}

	let model = parse_model_type(&input.attrs)?.ok_or_else(|| {
		syn::Error::new_spanned(
			struct_name,
			"missing `#[factory(model = ModelType)]` attribute",
		)
	})?;

	let core_member = find_core_member(fields)?.ok_or_else(|| {
		syn::Error::new_spanned(
			struct_name,
			"no `ModelFactory<_>` field found; mark the core field with `#[factory(core)]`",
		)
	})?;

	let other_members: Vec<Member> = fields
		.members()
		.filter(|member| *member != core_member)
		.collect();

	let krate = get_model_factories_crate()?;

	Ok(quote! {
		impl #krate::factory::FactoryCore for #struct_name {
			type Model = #model;

			fn from_core(core: #krate::factory::ModelFactory<#model>) -> Self {
				Self {
					#core_member: core,
					#(#other_members: ::std::default::Default::default(),)*
				}
			}

			fn core(&self) -> &#krate::factory::ModelFactory<#model> {
				&self.#core_member
			}

			fn core_mut(&mut self) -> &mut #krate::factory::ModelFactory<#model> {
				&mut self.#core_member
			}

			fn into_core(self) -> #krate::factory::ModelFactory<#model> {
				self.#core_member
			}
		}
	})
}

/// Reads `#[factory(model = ModelType)]` from the struct attributes
fn parse_model_type(attrs: &[syn::Attribute]) -> syn::Result<Option<Type>> {
	let mut model = None;
	for attr in attrs {
		if !attr.path().is_ident("factory") {
			continue;
		}
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("model") {
				model = Some(meta.value()?.parse::<Type>()?);
				Ok(())
			} else {
				Err(meta.error("unsupported factory attribute, expected `model`"))
			}
		})?;
	}
	Ok(model)
}

/// Finds the field holding the binding store
///
/// A field marked `#[factory(core)]` wins; otherwise the single field whose
/// type is `ModelFactory<_>` is used.
fn find_core_member(fields: &Fields) -> syn::Result<Option<Member>> {
	let mut marked = None;
	let mut by_type = Vec::new();

	for (member, field) in fields.members().zip(fields.iter()) {
		for attr in &field.attrs {
			if !attr.path().is_ident("factory") {
				continue;
			}
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("core") {
					marked = Some(member.clone());
					Ok(())
				} else {
					Err(meta.error("unsupported field attribute, expected `core`"))
				}
			})?;
		}
		if is_model_factory(&field.ty) {
			by_type.push(member);
		}
	}

	if marked.is_some() {
		return Ok(marked);
	}
	match by_type.len() {
		0 => Ok(None),
		1 => Ok(by_type.pop()),
		_ => Err(syn::Error::new_spanned(
			&by_type[1],
			"several `ModelFactory<_>` fields found; mark the core field with `#[factory(core)]`",
		)),
	}
}

fn is_model_factory(ty: &Type) -> bool {
	matches!(
		ty,
		Type::Path(type_path)
			if type_path
				.path
				.segments
				.last()
				.is_some_and(|segment| segment.ident == "ModelFactory")
	)
}
