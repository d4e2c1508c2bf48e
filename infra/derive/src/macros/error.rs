use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, FieldsNamed, GenericArgument, Ident,
    PathArguments, Type, Variant,
};

const INTERNAL_VARIANT: &str = "Internal";

/// What the expansion needs to know about one error variant.
struct VariantShape<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg: Vec<Attribute>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "formgate_error can only be applied to enums")
            .to_compile_error();
    };

    let mut shapes = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match VariantShape::parse(variant) {
            Ok(shape) => shapes.push(shape),
            Err(err) => return err.to_compile_error(),
        }
    }

    if let Some(orphan) = shapes.iter().find(|s| s.source.is_some() && !s.has_context) {
        return syn::Error::new_spanned(
            orphan.ident,
            "formgate_error requires `context: Option<Cow<'static, str>>` next to a source field",
        )
        .to_compile_error();
    }

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let derives = missing_derives(&input);
    let ext_trait = ext_trait(name, &ext, &shapes);
    let source_impls = shapes.iter().filter_map(|s| source_impls(name, &ext, s));
    let internal_impls = internal_impls(name, &shapes);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

impl<'a> VariantShape<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "formgate_error variants must use named fields",
            ));
        };

        let has_context = context_field(fields)?.is_some();
        let source = source_field(fields).and_then(|f| f.ident.as_ref().map(|id| (id, &f.ty)));
        let cfg = variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).cloned().collect();

        Ok(Self { ident: &variant.ident, source, has_context, cfg })
    }
}

fn context_field(fields: &FieldsNamed) -> syn::Result<Option<&Field>> {
    let Some(field) = fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(None);
    };

    if is_optional_static_cow(&field.ty) {
        Ok(Some(field))
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn source_field(fields: &FieldsNamed) -> Option<&Field> {
    fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|i| i == "source")
            || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
    })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let present = derived_traits(input);
    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }

    if wanted.is_empty() { quote! {} } else { quote! { #[derive(#(#wanted),*)] } }
}

fn derived_traits(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                traits.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn ext_trait(name: &Ident, ext: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let arms = shapes.iter().filter(|s| s.has_context).map(|s| {
        let ident = s.ident;
        let cfg = &s.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, shape: &VariantShape<'_>) -> Option<TokenStream> {
    if shape.ident == INTERNAL_VARIANT {
        return None;
    }
    let (field, ty) = shape.source?;
    let variant = shape.ident;
    let cfg = &shape.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#variant { #field, context: None } }
        }

        #(#cfg)*
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let Some(internal) = shapes.iter().find(|s| s.ident == INTERNAL_VARIANT) else {
        return quote! {};
    };
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

/// Matches `Option<Cow<'static, str>>` regardless of path qualification.
fn is_optional_static_cow(ty: &Type) -> bool {
    let Some(inner) = single_type_arg(ty, "Option") else {
        return false;
    };
    let Type::Path(path) = inner else {
        return false;
    };
    let Some(cow) = path.path.segments.last() else {
        return false;
    };
    if cow.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &cow.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    lifetime_ok && str_ok && args.next().is_none()
}

fn single_type_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
