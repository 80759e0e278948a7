//! Attribute macros for the Bayrell runtime.
//!
//! - `#[runtime_class]`: exposes the `pub fn`s of an inherent `impl` block as runtime methods, generating
//!   `bayrell_rtl::RuntimeClass` (the class descriptor used by registries) and `bayrell_rtl::Object` (instance
//!   dispatch).
//!
//! Generated code refers to the runtime as `::bayrell_rtl`.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    FnArg, GenericArgument, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, PathArguments, ReturnType, Type,
    TypeReference, Visibility, parse_macro_input,
};

/// Expose an inherent `impl` block as a runtime class.
///
/// Every `pub fn` becomes a method. Functions without a receiver are static methods; `&self` functions are
/// instance methods. Arguments are decoded with `FromValue` and return values encoded with `IntoValue`, except
/// that `()` becomes `null`, `Self` becomes an object value and `Result`s propagate their error through
/// `Into<DispatchError>`.
///
/// # Example
/// ```ignore
/// #[derive(Debug)]
/// struct Greeter {
///     greeting: String,
/// }
///
/// #[runtime_class(name = "Runtime.Greeter")]
/// impl Greeter {
///     pub fn new(greeting: &str) -> Self {
///         Greeter { greeting: greeting.to_string() }
///     }
///
///     pub fn hello(name: &str) -> String {
///         format!("Hello, {name}")
///     }
///
///     pub fn greet(&self, name: &str) -> String {
///         format!("{}, {name}", self.greeting)
///     }
/// }
///
/// // Generates:
/// impl bayrell_rtl::RuntimeClass for Greeter { /* "new" and "hello" static, "greet" instance */ }
/// impl bayrell_rtl::Object for Greeter { /* dispatches all three by name */ }
/// ```
#[proc_macro_attribute]
pub fn runtime_class(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut name: Option<LitStr> = None;
    let name_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported runtime_class property; expected `name = \"...\"`"))
        }
    });
    parse_macro_input!(attr with name_parser);
    let item_impl = parse_macro_input!(item as ItemImpl);

    match expand_runtime_class(name, item_impl) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How a method is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Receiver {
    None,
    Ref,
}

/// How a method's return value becomes a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReturnShape {
    Unit,
    SelfValue,
    Result { ok_is_self: bool },
    Plain,
}

/// One decoded parameter: the owned type to decode into, and whether the call borrows it.
struct Param {
    decode_ty: Type,
    borrow: bool,
}

struct Method {
    ident: Ident,
    name: String,
    receiver: Receiver,
    params: Vec<Param>,
    shape: ReturnShape,
}

fn expand_runtime_class(name: Option<LitStr>, item_impl: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[runtime_class] must be applied to an inherent impl block",
        ));
    }
    if !item_impl.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.generics,
            "#[runtime_class] does not support generic types",
        ));
    }

    let self_ty = &item_impl.self_ty;
    let (raw_name, name_span) = match &name {
        Some(lit) => (lit.value(), lit.span()),
        None => (type_name(self_ty)?, Span::call_site()),
    };
    let Some(class_name) = bayrell_core::names::canonical_class_name(&raw_name) else {
        return Err(syn::Error::new(
            name_span,
            format!("`{raw_name}` is not a valid class name"),
        ));
    };

    let mut methods = Vec::new();
    let mut errors: Option<syn::Error> = None;
    for item in &item_impl.items {
        let ImplItem::Fn(func) = item else {
            continue;
        };
        if !matches!(func.vis, Visibility::Public(_)) {
            continue;
        }
        match parse_method(func) {
            Ok(method) => methods.push(method),
            Err(err) => {
                errors = Some(match errors.take() {
                    Some(mut acc) => {
                        acc.combine(err);
                        acc
                    }
                    None => err,
                });
            }
        }
    }
    if let Some(err) = errors {
        return Err(err);
    }

    let describe_entries = methods.iter().map(describe_entry);
    let dispatch_arms = methods.iter().map(dispatch_arm);
    let method_names = methods.iter().map(|m| m.name.as_str());

    Ok(quote! {
        #item_impl

        impl ::bayrell_rtl::RuntimeClass for #self_ty {
            const CLASS_NAME: &'static str = #class_name;

            fn describe() -> ::bayrell_rtl::ClassDescriptor {
                ::bayrell_rtl::ClassBuilder::new(<Self as ::bayrell_rtl::RuntimeClass>::CLASS_NAME)
                    #(#describe_entries)*
                    .build()
            }
        }

        impl ::bayrell_rtl::Object for #self_ty {
            fn class_name(&self) -> &str {
                <Self as ::bayrell_rtl::RuntimeClass>::CLASS_NAME
            }

            fn has_method(&self, name: &str) -> bool {
                let methods: &[&str] = &[#(#method_names),*];
                methods.contains(&name)
            }

            #[allow(unused_variables)]
            fn call_method(
                &self,
                name: &str,
                args: &[::bayrell_rtl::Value],
            ) -> ::bayrell_rtl::DispatchResult<::bayrell_rtl::Value> {
                match name {
                    #(#dispatch_arms)*
                    _ => Err(::bayrell_rtl::DispatchError::undefined_method(
                        <Self as ::bayrell_rtl::RuntimeClass>::CLASS_NAME,
                        name,
                    )),
                }
            }
        }
    })
}

fn type_name(ty: &Type) -> syn::Result<String> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .map(|seg| seg.ident.unraw().to_string())
            .ok_or_else(|| syn::Error::new_spanned(ty, "expected a type name")),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[runtime_class] needs a named type; pass `name = \"...\"` or use a path type",
        )),
    }
}

fn parse_method(func: &ImplItemFn) -> syn::Result<Method> {
    let sig = &func.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "runtime methods cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "runtime methods cannot be generic"));
    }

    let mut receiver = Receiver::None;
    let mut params = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(recv) => {
                if recv.reference.is_none() || recv.mutability.is_some() {
                    return Err(syn::Error::new_spanned(
                        recv,
                        "runtime instance methods must take `&self`",
                    ));
                }
                receiver = Receiver::Ref;
            }
            FnArg::Typed(typed) => params.push(decode_param(&typed.ty)?),
        }
    }

    Ok(Method {
        ident: sig.ident.clone(),
        name: sig.ident.unraw().to_string(),
        receiver,
        params,
        shape: return_shape(&sig.output),
    })
}

/// `&str` decodes as `String`, `&[T]` as `Vec<T>` and `&T` as `T`; all three are borrowed at the call.
fn decode_param(ty: &Type) -> syn::Result<Param> {
    let Type::Reference(TypeReference { mutability, elem, .. }) = ty else {
        return Ok(Param {
            decode_ty: ty.clone(),
            borrow: false,
        });
    };
    if mutability.is_some() {
        return Err(syn::Error::new_spanned(ty, "runtime method parameters cannot be `&mut`"));
    }
    let decode_ty = match elem.as_ref() {
        Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => {
            syn::parse_quote!(::std::string::String)
        }
        Type::Slice(slice) => {
            let inner = &slice.elem;
            syn::parse_quote!(::std::vec::Vec<#inner>)
        }
        other => other.clone(),
    };
    Ok(Param {
        decode_ty,
        borrow: true,
    })
}

fn return_shape(output: &ReturnType) -> ReturnShape {
    let ReturnType::Type(_, ty) = output else {
        return ReturnShape::Unit;
    };
    match ty.as_ref() {
        Type::Tuple(tuple) if tuple.elems.is_empty() => ReturnShape::Unit,
        ty if is_self(ty) => ReturnShape::SelfValue,
        Type::Path(path) if path.qself.is_none() => match path.path.segments.last() {
            Some(last) if is_result_ident(&last.ident) => ReturnShape::Result {
                ok_is_self: first_type_arg(&last.arguments).is_some_and(is_self),
            },
            _ => ReturnShape::Plain,
        },
        _ => ReturnShape::Plain,
    }
}

/// `Result` itself and the runtime's result aliases. Other `*Result` types are plain values.
fn is_result_ident(ident: &Ident) -> bool {
    RESULT_IDENTS.iter().any(|name| ident == name)
}

const RESULT_IDENTS: &[&str] = &["Result", "DispatchResult", "CallbackResult"];

fn is_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

fn first_type_arg(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = args else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Decode arguments, call, and encode the result as a `DispatchResult<Value>`.
fn call_body(method: &Method) -> TokenStream2 {
    let name = &method.name;
    let ident = &method.ident;
    let arity = method.params.len();

    let bindings: Vec<Ident> = (0..arity).map(|i| format_ident!("__arg{}", i)).collect();
    let decodes = method.params.iter().zip(&bindings).enumerate().map(|(index, (param, binding))| {
        let ty = &param.decode_ty;
        quote! {
            let #binding: #ty = ::bayrell_rtl::conversions::arg(#name, args, #index)?;
        }
    });
    let call_args: Vec<TokenStream2> = method
        .params
        .iter()
        .zip(&bindings)
        .map(|(param, binding)| if param.borrow { quote!(&#binding) } else { quote!(#binding) })
        .collect();
    let call = match method.receiver {
        Receiver::Ref => quote!(self.#ident(#(#call_args),*)),
        Receiver::None => quote!(Self::#ident(#(#call_args),*)),
    };
    let encoded = match method.shape {
        ReturnShape::Unit => quote! {
            #call;
            Ok(::bayrell_rtl::Value::Null)
        },
        ReturnShape::SelfValue => quote!(Ok(::bayrell_rtl::Value::object(#call))),
        ReturnShape::Result { ok_is_self: true } => quote! {
            #call
                .map(::bayrell_rtl::Value::object)
                .map_err(::core::convert::Into::<::bayrell_rtl::DispatchError>::into)
        },
        ReturnShape::Result { ok_is_self: false } => quote! {
            #call
                .map(::bayrell_rtl::conversions::IntoValue::into_value)
                .map_err(::core::convert::Into::<::bayrell_rtl::DispatchError>::into)
        },
        ReturnShape::Plain => quote!(Ok(::bayrell_rtl::conversions::IntoValue::into_value(#call))),
    };

    quote! {
        ::bayrell_rtl::conversions::expect_arity(#name, args, #arity)?;
        #(#decodes)*
        #encoded
    }
}

/// Builder call registering `method` in the class descriptor.
fn describe_entry(method: &Method) -> TokenStream2 {
    let name = &method.name;
    match method.receiver {
        Receiver::Ref => quote!(.instance_method(#name)),
        Receiver::None => {
            let body = call_body(method);
            quote! {
                .static_method(
                    #name,
                    |args: &[::bayrell_rtl::Value]| -> ::bayrell_rtl::DispatchResult<::bayrell_rtl::Value> {
                        #body
                    },
                )
            }
        }
    }
}

/// `match` arm for instance dispatch; static methods are reachable through instances too.
fn dispatch_arm(method: &Method) -> TokenStream2 {
    let name = &method.name;
    let body = call_body(method);
    quote! {
        #name => {
            #body
        }
    }
}
