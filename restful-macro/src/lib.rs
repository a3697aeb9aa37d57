use proc_macro::TokenStream;

mod controller;

/// Derive macro declaring which REST capabilities a controller supports
///
/// Each listed capability becomes an `as_*` accessor on `restful::Controller`.
/// Listing a capability whose trait the type does not implement is a compile error.
///
/// # Example
/// ```ignore
/// use restful::Controller;
///
/// #[derive(Controller)]
/// #[controller(index, show, create, update, delete)]
/// pub struct ProductController {
///     store: DashMap<String, Product>,
/// }
/// ```
#[proc_macro_derive(Controller, attributes(controller))]
pub fn derive_controller(input: TokenStream) -> TokenStream {
    controller::derive_controller(input)
}
