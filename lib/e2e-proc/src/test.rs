use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat};

/// Shorthand to print nice errors.
macro_rules! error {
    ($tokens:expr, $($msg:expr),+ $(,)?) => {{
        let span = syn::spanned::Spanned::span(&$tokens);
        let error = syn::Error::new(span, format!($($msg),+));
        return error.to_compile_error().into();
    }};
}

pub(crate) fn test(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let item_fn = parse_macro_input!(input as ItemFn);
    let attrs = &item_fn.attrs;
    let sig = &item_fn.sig;
    let fn_name = &sig.ident;
    let fn_output = &sig.output;
    let fn_block = &item_fn.block;

    if sig.asyncness.is_none() {
        error!(sig.fn_token, "e2e tests must be `async`");
    }

    let mut accounts = Vec::with_capacity(sig.inputs.len());
    for arg in &sig.inputs {
        let FnArg::Typed(arg) = arg else {
            error!(arg, "e2e tests can't take `self`");
        };
        let Pat::Ident(binding) = arg.pat.as_ref() else {
            error!(arg.pat, "expected a plain binding, e.g. `alice: Account`");
        };
        let ident = &binding.ident;
        let ty = &arg.ty;
        accounts.push(quote! {
            let #ident = <#ty>::new().await?;
        });
    }

    quote! {
        #( #attrs )*
        #[tokio::test]
        async fn #fn_name() #fn_output {
            #( #accounts )*
            #fn_block
        }
    }
    .into()
}
