//! Implementation of the #[tool_spec] proc macro.

use darling::FromMeta;
use darling::ast::NestedMeta;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, format_ident, quote};
use syn::{
    Attribute, Expr, ExprLit, FnArg, Ident, ItemFn, Lit, Meta, Pat, PatType, ReturnType, Type,
    parse2,
};

/// Parsed #[tool_spec(...)] attributes.
#[derive(Debug, Default, FromMeta)]
#[darling(default)]
struct ToolSpecAttr {
    /// Override the tool name (defaults to function name).
    name: Option<String>,
    /// Description of what the tool does.
    description: Option<String>,
    /// Structured output model type.
    output_model: Option<Expr>,
    /// Version string.
    version: Option<String>,
}

/// One function parameter and how to bind it from keyword arguments.
struct ParamSpec {
    ident: Ident,
    ty: Type,
    skip: bool,
    default: Option<Expr>,
}

impl ParamSpec {
    fn has_default(&self) -> bool {
        self.default.is_some() || is_option(&self.ty)
    }

    fn signature_entry(&self) -> TokenStream {
        let name = self.ident.to_string();
        let ty = &self.ty;
        let param = if self.skip {
            quote! { ::toolspec_core::Param::untyped(#name) }
        } else {
            let annotation = annotation_of(ty);
            quote! { ::toolspec_core::Param::annotated(#name, #annotation) }
        };
        if self.has_default() {
            quote! { #param.with_default() }
        } else {
            param
        }
    }

    fn binding(&self) -> TokenStream {
        let ident = &self.ident;
        let name = ident.to_string();
        let ty = &self.ty;
        match (&self.default, is_option(ty)) {
            (Some(expr), _) => quote! { let #ident: #ty = args.or_else(#name, || #expr)?; },
            (None, true) => {
                quote! { let #ident: #ty = args.or_else(#name, || ::core::option::Option::None)?; }
            }
            (None, false) => quote! { let #ident: #ty = args.required(#name)?; },
        }
    }
}

/// Expand the #[tool_spec] attribute macro.
pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let mut func: ItemFn = parse2(item)?;

    if let Some(asyncness) = func.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "tool_spec function must be synchronous",
        ));
    }
    if !func.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &func.sig.generics,
            "tool_spec function cannot be generic",
        ));
    }

    let spec_attr = if attr.is_empty() {
        ToolSpecAttr::default()
    } else {
        let nested = NestedMeta::parse_meta_list(attr.clone())
            .map_err(|e| syn::Error::new_spanned(&attr, e))?;
        ToolSpecAttr::from_list(&nested).map_err(|e| syn::Error::new_spanned(&attr, e))?
    };

    let fn_ident = func.sig.ident.clone();
    let fn_name = fn_ident.to_string();
    let tool_name = spec_attr.name.unwrap_or_else(|| fn_name.clone());
    if tool_name.trim().is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            "tool_spec name must not be empty",
        ));
    }
    let description = spec_attr
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "tool_spec requires a non-empty `description`",
            )
        })?;
    let output_model = spec_attr.output_model.map(expr_to_type).transpose()?;

    let params = collect_params(&mut func)?;
    let doc = doc_text(&func.attrs);

    // Create PascalCase struct name from function name
    let tool_struct = format_ident!("{}Tool", to_pascal_case(&fn_name));
    let vis = &func.vis;
    let output = &func.sig.output;

    let idents: Vec<_> = params.iter().map(|p| &p.ident).collect();
    let types: Vec<_> = params.iter().map(|p| &p.ty).collect();
    let signature_entries = params.iter().map(ParamSpec::signature_entry);
    let bindings = params.iter().map(ParamSpec::binding);

    let (returns, result) = match &func.sig.output {
        ReturnType::Default => (
            quote! { .returns_annotation(::core::option::Option::None) },
            quote! { ::toolspec_core::to_output(#fn_ident(#(#idents),*)) },
        ),
        ReturnType::Type(_, ty) => match extract_result_ok_type(ty) {
            Some(ok) => (
                annotated_returns(&ok),
                quote! {
                    ::toolspec_core::to_output(
                        #fn_ident(#(#idents),*).map_err(::toolspec_core::ToolError::function)?
                    )
                },
            ),
            None => (
                annotated_returns(ty),
                quote! { ::toolspec_core::to_output(#fn_ident(#(#idents),*)) },
            ),
        },
    };

    let args_pat = if params.is_empty() {
        quote! { args }
    } else {
        quote! { mut args }
    };
    let with_doc = doc.map(|d| quote! { .with_doc(#d) });
    let with_version = spec_attr.version.map(|v| quote! { .version(#v) });
    let with_output_model = output_model.map(|ty| quote! { .output_model::<#ty>() });

    let expanded = quote! {
        #func

        #[doc = concat!("Auto-generated tool specification for [`", stringify!(#fn_ident), "`].")]
        #[derive(Debug, Clone, Copy, Default)]
        #vis struct #tool_struct;

        impl #tool_struct {
            /// Tool name.
            pub const NAME: &'static str = #tool_name;
            /// Tool description.
            pub const DESCRIPTION: &'static str = #description;

            /// Call the function with its own typed signature.
            #vis fn call(&self, #(#idents: #types),*) #output {
                #fn_ident(#(#idents),*)
            }

            /// Decorator carrying this tool's options.
            pub fn decorator() -> ::toolspec_core::Decorator {
                ::toolspec_core::tool_spec(#tool_name, #description)
                    #with_version
                    #with_output_model
            }

            /// Keyword-argument form of the function.
            pub fn tool_function() -> ::toolspec_core::ToolFunction {
                let signature = ::toolspec_core::Signature::new()
                    #(.param(#signature_entries))*
                    #returns;
                ::toolspec_core::ToolFunction::new(
                    #fn_name,
                    signature,
                    |#args_pat: ::toolspec_core::Arguments| {
                        #(#bindings)*
                        args.finish()?;
                        #result
                    },
                )
                #with_doc
            }
        }

        impl ::toolspec_core::Decorated for #tool_struct {
            fn wrapped(&self) -> &::toolspec_core::WrappedTool {
                static WRAPPED: ::std::sync::OnceLock<::toolspec_core::WrappedTool> =
                    ::std::sync::OnceLock::new();
                WRAPPED.get_or_init(|| match Self::decorator().wrap(Self::tool_function()) {
                    ::core::result::Result::Ok(wrapped) => wrapped,
                    ::core::result::Result::Err(e) => {
                        unreachable!("tool `{}` was validated at compile time: {}", #tool_name, e)
                    }
                })
            }
        }
    };

    Ok(expanded)
}

/// Annotation of `ty`; types without an `Annotate` impl become `Other`.
fn annotation_of(ty: &Type) -> TokenStream {
    quote! {
        {
            use ::toolspec_core::__dispatch::*;
            (&AnnotationOf::<#ty>::new(stringify!(#ty))).annotation()
        }
    }
}

fn annotated_returns(ty: &Type) -> TokenStream {
    let annotation = annotation_of(ty);
    quote! { .returns_annotation(::core::option::Option::Some(#annotation)) }
}

/// Read parameters and strip `#[schema(...)]` attributes from the function.
fn collect_params(func: &mut ItemFn) -> syn::Result<Vec<ParamSpec>> {
    let mut params = Vec::new();
    for arg in &mut func.sig.inputs {
        let pat_type = match arg {
            FnArg::Receiver(recv) => {
                return Err(syn::Error::new_spanned(
                    recv,
                    "tool_spec function cannot take `self`",
                ));
            }
            FnArg::Typed(pat_type) => pat_type,
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new_spanned(
                &pat_type.pat,
                "tool_spec parameters must be plain identifiers",
            ));
        };
        if let Type::Reference(reference) = &*pat_type.ty {
            return Err(syn::Error::new_spanned(
                reference,
                "tool_spec parameters must be owned types",
            ));
        }

        let ident = pat_ident.ident.clone();
        let (skip, default) = take_schema_attrs(pat_type)?;
        params.push(ParamSpec {
            ident,
            ty: (*pat_type.ty).clone(),
            skip,
            default,
        });
    }
    Ok(params)
}

fn take_schema_attrs(pat_type: &mut PatType) -> syn::Result<(bool, Option<Expr>)> {
    let mut skip = false;
    let mut default = None;
    for attr in pat_type.attrs.iter().filter(|a| a.path().is_ident("schema")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("default") {
                default = Some(meta.value()?.parse::<Expr>()?);
            } else {
                return Err(meta.error("unknown schema attribute"));
            }
            Ok(())
        })?;
    }
    pat_type.attrs.retain(|a| !a.path().is_ident("schema"));
    Ok((skip, default))
}

/// Join `///` doc lines into one text.
fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').unwrap_or(&line).to_string())
        .collect();
    let text = lines.join("\n").trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// `output_model = Type` or `output_model = "Type"`.
fn expr_to_type(expr: Expr) -> syn::Result<Type> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => s.parse(),
        other => parse2(other.to_token_stream()),
    }
}

/// Convert snake_case to PascalCase.
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn is_option(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.qself.is_none()
        && p.path.segments.last().is_some_and(|s| s.ident == "Option"))
}

/// Try to extract the Ok type from a Result<T, E> type.
fn extract_result_ok_type(ty: &Type) -> Option<Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let last_segment = type_path.path.segments.last()?;
    if last_segment.ident == "Result"
        && let syn::PathArguments::AngleBracketed(args) = &last_segment.arguments
        && let Some(syn::GenericArgument::Type(ok_type)) = args.args.first()
    {
        return Some(ok_type.clone());
    }
    None
}
