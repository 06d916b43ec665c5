use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{FnArg, Ident, ItemFn, Pat, ReturnType, Type, parse_macro_input};

/// Parameters that are kernel plumbing rather than user arguments.
const SKIPPED_ARGS: &[&str] = &["kernel", "tf"];

/// Logs a syscall's arguments on entry and its result on return.
///
/// The function must return a `Result`. User pointer arguments are printed
/// through their `fmt_trace()`; `kernel` and `tf` parameters are left out.
#[proc_macro_attribute]
pub fn syscall_trace(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut function = parse_macro_input!(item as ItemFn);
    let signature = &function.sig;
    let fn_name = &signature.ident;
    let fn_args: Vec<(&Ident, &Type)> = signature
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => {
                // only plain `name: Type` arguments are traced
                let Pat::Ident(pat_ident) = &*pat_type.pat else {
                    return None;
                };
                let arg_name = &pat_ident.ident;
                if SKIPPED_ARGS.iter().any(|skipped| arg_name == skipped) {
                    return None;
                }
                Some((arg_name, &*pat_type.ty))
            }
            FnArg::Receiver(_) => None,
        })
        .collect();

    let arg_values: Vec<TokenStream2> = fn_args
        .iter()
        .map(|(arg_name, arg_type)| {
            if is_user_ptr(arg_type) {
                quote! { #arg_name.fmt_trace() }
            } else {
                quote! { #arg_name }
            }
        })
        .collect();

    let arg_list_pattern = fn_args
        .iter()
        .map(|(name, _)| format!("{} = {{}}", name))
        .collect::<Vec<_>>()
        .join(", ");
    let format_pattern_in = format!("[syscall] <= {}({})", fn_name, arg_list_pattern);
    let format_pattern_out = format!("[syscall] => {}({}) = {{}}", fn_name, arg_list_pattern);

    let result_type = match &signature.output {
        ReturnType::Type(_, ty) => quote! { #ty },
        ReturnType::Default => quote! { _ },
    };
    let fn_body = &function.block;
    function.block = Box::new(syn::parse_quote! {{
        debug!(#format_pattern_in #(, #arg_values)*);

        let __result: #result_type = (|| #fn_body)();

        let __trace = match __result {
            Ok(ref value) => alloc::format!("Ok({:?})", value),
            Err(ref error) => alloc::format!("Err({:?})", error),
        };
        debug!(#format_pattern_out #(, #arg_values)*, __trace);
        __result
    }});
    quote! { #function }.into()
}

fn is_user_ptr(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "UserOutPtr"
    })
}
