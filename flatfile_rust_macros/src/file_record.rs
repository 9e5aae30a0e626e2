use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Token};

pub fn derive_file_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (struct_pk, ext) = parse_struct_attrs(&input);
    let rename_all = parse_rename_all(&input);
    let pk = struct_pk.unwrap_or_else(|| extract_pk_field(&input, rename_all.as_deref()));
    let ext = ext.unwrap_or_else(|| "json".to_string());

    let expanded = quote! {
        impl #impl_generics flatfile_rust::FileRecord for #name #ty_generics #where_clause {
            const PK: &'static str = #pk;
            const EXT: &'static str = #ext;
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[record(pk = "...", ext = "...")]` from the struct.
fn parse_struct_attrs(input: &DeriveInput) -> (Option<String>, Option<String>) {
    let mut pk = None;
    let mut ext = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("pk") {
                let value: LitStr = meta.value()?.parse()?;
                pk = Some(value.value());
            } else if meta.path.is_ident("ext") {
                let value: LitStr = meta.value()?.parse()?;
                ext = Some(value.value().trim_start_matches('.').to_string());
            }
            Ok(())
        });
    }

    (pk, ext)
}

/// Reads the struct-level `#[serde(rename_all = "...")]`, taking the
/// `serialize` side of the `rename_all(serialize = "...")` form.
fn parse_rename_all(input: &DeriveInput) -> Option<String> {
    let mut rule = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if meta.input.peek(Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    rule = Some(value.value());
                } else {
                    meta.parse_nested_meta(|inner| {
                        let value: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            rule = Some(value.value());
                        }
                        Ok(())
                    })?;
                }
            } else if meta.input.peek(Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _ = meta.parse_nested_meta(|inner| {
                    if inner.input.peek(Token![=]) {
                        let _: syn::Expr = inner.value()?.parse()?;
                    }
                    Ok(())
                });
            }
            Ok(())
        });
    }

    rule
}

/// Stored name of the field marked `#[record(pk)]`, or of the field named `id`.
fn extract_pk_field(input: &DeriveInput, rename_all: Option<&str>) -> String {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            for field in &fields.named {
                for attr in &field.attrs {
                    if !attr.path().is_ident("record") {
                        continue;
                    }
                    let mut is_pk = false;
                    let _ = attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("pk") {
                            is_pk = true;
                        }
                        Ok(())
                    });
                    if is_pk {
                        return stored_name(field, rename_all);
                    }
                }
            }

            for field in &fields.named {
                if let Some(ident) = &field.ident {
                    if ident == "id" {
                        return stored_name(field, rename_all);
                    }
                }
            }
        }
    }

    panic!("FileRecord derive: no field marked with #[record(pk)] and no field named `id`");
}

/// The field's serde name: `#[serde(rename = "...")]` if present, else the
/// ident with the struct's `rename_all` rule applied.
fn stored_name(field: &syn::Field, rename_all: Option<&str>) -> String {
    for attr in &field.attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        let mut renamed = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                renamed = Some(value.value());
            } else if meta.input.peek(Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        });

        if let Some(name) = renamed {
            return name;
        }
    }

    let ident = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
        .unwrap_or_default();

    match rename_all {
        Some(rule) => apply_rename_rule(&ident, rule),
        None => ident,
    }
}

/// Serde's field renaming rules, applied to a snake_case field name.
fn apply_rename_rule(field: &str, rule: &str) -> String {
    let words = field.split('_').filter(|word| !word.is_empty());
    let capitalize = |word: &str| {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        }
    };

    match rule {
        "lowercase" => field.to_lowercase(),
        "UPPERCASE" => field.to_uppercase(),
        "PascalCase" => words.map(capitalize).collect(),
        "camelCase" => words
            .enumerate()
            .map(|(i, word)| if i == 0 { word.to_string() } else { capitalize(word) })
            .collect(),
        "SCREAMING_SNAKE_CASE" => field.to_uppercase(),
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.replace('_', "-").to_uppercase(),
        _ => field.to_string(),
    }
}
