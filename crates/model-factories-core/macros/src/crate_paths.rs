//! Helper functions for dynamic crate path resolution using proc_macro_crate

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the path the generated code uses to reach the factory runtime.
///
/// The `model-factories` facade is preferred; `model-factories-core` is
/// accepted for crates depending on the engine directly.
pub(crate) fn get_model_factories_crate() -> syn::Result<TokenStream> {
	use proc_macro_crate::{FoundCrate, crate_name};

	for (package, itself) in [
		("model-factories", quote!(::model_factories)),
		("model-factories-core", quote!(::model_factories_core)),
	] {
		match crate_name(package) {
			Ok(FoundCrate::Itself) => return Ok(itself),
			Ok(FoundCrate::Name(name)) => {
				let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
				return Ok(quote!(::#ident));
			}
			Err(_) => continue,
		}
	}

	Err(syn::Error::new(
		proc_macro2::Span::call_site(),
		"failed to resolve `model-factories` crate. Ensure it is listed in Cargo.toml dependencies.",
	))
}
