//! Derive macros for the Patchbay native plugin framework.
//!
//! This crate provides `#[derive(HasParams)]`, which wires a plugin struct
//! to the parameter collection stored in one of its fields.
//!
//! # Example
//!
//! ```ignore
//! use patchbay::prelude::*;
//!
//! #[derive(Default, HasParams)]
//! pub struct RouterPlugin {
//!     #[params]
//!     params: RouterParams,
//! }
//! ```

use proc_macro::TokenStream;

mod has_params;

/// Derive macro for implementing the `HasParams` trait.
///
/// Exactly one field must carry the `#[params]` attribute. Named and tuple
/// structs are supported; the generated impl forwards `params()` and
/// `params_mut()` to that field.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, HasParams)]
/// pub struct RouterPlugin {
///     #[params]
///     params: RouterParams,
///     blocks_seen: u64,
/// }
///
/// #[derive(Default, HasParams)]
/// pub struct Thru(#[params] NoParams);
/// ```
#[proc_macro_derive(HasParams, attributes(params))]
pub fn derive_has_params(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match has_params::derive_has_params_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
