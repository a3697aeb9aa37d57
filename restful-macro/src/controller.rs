use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, DeriveInput, Ident, Token};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Capability {
    Index,
    Show,
    Create,
    Update,
    Delete,
}

impl Capability {
    fn from_ident(ident: &Ident) -> syn::Result<Self> {
        match ident.to_string().as_str() {
            "index" => Ok(Capability::Index),
            "show" => Ok(Capability::Show),
            "create" => Ok(Capability::Create),
            "update" => Ok(Capability::Update),
            "delete" => Ok(Capability::Delete),
            other => Err(syn::Error::new(
                ident.span(),
                format!(
                    "unknown capability `{}`, expected one of: index, show, create, update, delete",
                    other
                ),
            )),
        }
    }

    fn accessor(self) -> (Ident, Ident) {
        let (method, capability_trait) = match self {
            Capability::Index => ("as_indexer", "Indexer"),
            Capability::Show => ("as_shower", "Shower"),
            Capability::Create => ("as_creator", "Creator"),
            Capability::Update => ("as_updater", "Updater"),
            Capability::Delete => ("as_deleter", "Deleter"),
        };
        (
            Ident::new(method, Span::call_site()),
            Ident::new(capability_trait, Span::call_site()),
        )
    }
}

struct ControllerArgs {
    capabilities: Vec<Capability>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut capabilities = Vec::new();
        while !input.is_empty() {
            let name: Ident = input.parse()?;
            let capability = Capability::from_ident(&name)?;
            if capabilities.contains(&capability) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("capability `{}` listed twice", name),
                ));
            }
            capabilities.push(capability);
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(ControllerArgs { capabilities })
    }
}

pub fn derive_controller(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = generate_controller_impl(&input).unwrap_or_else(|err| err.to_compile_error());
    TokenStream::from(expanded)
}

fn generate_controller_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut capabilities = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("controller")) {
        let args: ControllerArgs = attr.parse_args()?;
        for capability in args.capabilities {
            if capabilities.contains(&capability) {
                return Err(syn::Error::new_spanned(attr, "capability listed twice"));
            }
            capabilities.push(capability);
        }
    }

    if capabilities.is_empty() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "#[derive(Controller)] needs at least one capability, \
             e.g. #[controller(index, show, create, update, delete)]",
        ));
    }

    let accessors = capabilities.iter().map(|capability| {
        let (method, capability_trait) = capability.accessor();
        quote! {
            fn #method(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::option::Option<
                ::std::sync::Arc<
                    dyn ::restful::#capability_trait<
                        Element = <Self as ::restful::Resource>::Element,
                    >,
                >,
            > {
                let controller: ::std::sync::Arc<
                    dyn ::restful::#capability_trait<
                        Element = <Self as ::restful::Resource>::Element,
                    >,
                > = self;
                ::std::option::Option::Some(controller)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::restful::Controller for #struct_name #ty_generics #where_clause {
            #(#accessors)*
        }
    })
}
