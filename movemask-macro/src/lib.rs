use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Lit, parse_macro_input};

/// Derive macro that reads `#[packer(name = "...", input = "...", kernel = path)]`
/// on a unit struct and implements `MaskPacker` for it, plus the capability
/// marker matching `input`.
///
/// `input` is `"strict_boolean"` (lanes must be `0x00`/`0xFF`) or
/// `"sign_bit"` (only bit 7 is read). `kernel` names a
/// `fn(LaneVector) -> LaneMask`.
///
/// # Example
/// ```rust,ignore
/// #[derive(MaskPacker)]
/// #[packer(name = "scalar-loop", input = "sign_bit", kernel = scalar_loop)]
/// pub struct ScalarLoop;
/// ```
#[proc_macro_derive(MaskPacker, attributes(packer))]
pub fn derive_mask_packer(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match impl_mask_packer(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Which capability marker the generated impl carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    StrictBoolean,
    SignBit,
}

impl InputKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "strict_boolean" => Some(InputKind::StrictBoolean),
            "sign_bit" => Some(InputKind::SignBit),
            _ => None,
        }
    }
}

struct PackerAttr {
    name: String,
    input: InputKind,
    kernel: syn::Path,
}

fn impl_mask_packer(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    match &input.data {
        Data::Struct(data) if matches!(data.fields, Fields::Unit) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "MaskPacker can only be derived for unit structs",
            ));
        }
    }

    let attr = extract_packer_attr(&input.attrs)?;
    let name = attr.name;
    let kernel = attr.kernel;

    let (input_variant, marker) = match attr.input {
        InputKind::StrictBoolean => (
            quote! { ::movemask::LaneInput::StrictBoolean },
            quote! { ::movemask::StrictBooleanLanePacker },
        ),
        InputKind::SignBit => (
            quote! { ::movemask::LaneInput::SignBit },
            quote! { ::movemask::SignBitPacker },
        ),
    };

    Ok(quote! {
        impl #impl_generics ::movemask::MaskPacker for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const INPUT: ::movemask::LaneInput = #input_variant;

            #[inline(always)]
            fn pack(vector: ::movemask::LaneVector) -> ::movemask::LaneMask {
                #kernel(vector)
            }
        }

        impl #impl_generics #marker for #ident #ty_generics #where_clause {}
    })
}

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

fn extract_packer_attr(attrs: &[syn::Attribute]) -> syn::Result<PackerAttr> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("packer")) else {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "missing #[packer(name = \"...\", input = \"...\", kernel = ...)] attribute",
        ));
    };

    let mut name: Option<String> = None;
    let mut input: Option<InputKind> = None;
    let mut kernel: Option<syn::Path> = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            if name.is_some() {
                return Err(meta.error("duplicate `name`"));
            }
            let value = meta.value()?; // consumes `=`
            let Lit::Str(ls) = value.parse::<Lit>()? else {
                return Err(meta.error("expected string literal for `name`"));
            };
            let s = ls.value();
            if !is_kebab_case(&s) {
                return Err(syn::Error::new_spanned(
                    ls,
                    "packer name must be non-empty lowercase kebab-case",
                ));
            }
            name = Some(s);
            Ok(())
        } else if meta.path.is_ident("input") {
            if input.is_some() {
                return Err(meta.error("duplicate `input`"));
            }
            let value = meta.value()?;
            let Lit::Str(ls) = value.parse::<Lit>()? else {
                return Err(meta.error("expected string literal for `input`"));
            };
            match InputKind::parse(&ls.value()) {
                Some(kind) => {
                    input = Some(kind);
                    Ok(())
                }
                None => Err(syn::Error::new_spanned(
                    ls,
                    "`input` must be \"strict_boolean\" or \"sign_bit\"",
                )),
            }
        } else if meta.path.is_ident("kernel") {
            if kernel.is_some() {
                return Err(meta.error("duplicate `kernel`"));
            }
            kernel = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unknown packer attribute key"))
        }
    })?;

    let missing = |key: &str| syn::Error::new_spanned(attr, format!("missing `{}` in #[packer]", key));
    Ok(PackerAttr {
        name: name.ok_or_else(|| missing("name"))?,
        input: input.ok_or_else(|| missing("input"))?,
        kernel: kernel.ok_or_else(|| missing("kernel"))?,
    })
}

fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
