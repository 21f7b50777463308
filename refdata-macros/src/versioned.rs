use crate::utils::{apply_derives, ensure_leading_fields, parse_bool_value, set_once};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Field, Item, Path, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[versioned] 宏实现
/// - 字段最前注入 `versioned` / `naming` / `priority`（按参数），均为 `#[serde(flatten)]`
/// - 合并派生：Debug（可关闭）, Clone, Default, Serialize, Deserialize
/// - 实现 `::refdata_domain::entity::Entity`，以及按需实现 `Named` / `Prioritized`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as VersionedAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[versioned] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let mut leading: Vec<Field> = vec![syn::parse_quote! {
        #[serde(flatten)]
        pub versioned: ::refdata_domain::versioned::VersionedFields
    }];
    if cfg.name_rule.is_some() {
        leading.push(syn::parse_quote! {
            #[serde(flatten)]
            pub naming: ::refdata_domain::named::NamingFields
        });
    }
    if cfg.prioritized {
        leading.push(syn::parse_quote! {
            #[serde(flatten)]
            pub priority: ::refdata_domain::prioritized::PrioritizedFields
        });
    }
    ensure_leading_fields(fields_named, leading);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    // ---- Entity 各方法 ----
    let name_rule = cfg.name_rule.as_ref().map(NameRuleKind::tokens);

    let naming_check = name_rule.as_ref().map(|rule| {
        quote! { self.naming.validate(#rule)?; }
    });
    let priority_check = cfg.prioritized.then(|| {
        quote! { self.priority.validate()?; }
    });
    let custom_check = cfg.validate.as_ref().map(|f| {
        quote! { #f(self)?; }
    });

    let unique_name = matches!(cfg.name_rule, Some(NameRuleKind::Required)).then(|| {
        quote! {
            fn unique_name(&self) -> ::core::option::Option<&str> {
                self.naming.name()
            }
        }
    });

    let foreign_keys = cfg.foreign_keys.as_ref().map(|f| {
        quote! {
            fn foreign_keys(&self) -> ::std::vec::Vec<::refdata_domain::entity::Reference> {
                #f(self)
            }
        }
    });

    let named_methods = cfg.name_rule.is_some().then(|| {
        quote! {
            // 命名记录按名称排序，名称相同再按主键
            fn ordering(&self, other: &Self) -> ::std::cmp::Ordering {
                self.naming
                    .name()
                    .cmp(&other.naming.name())
                    .then_with(|| self.versioned.id().cmp(&other.versioned.id()))
            }

            fn display_name(&self) -> ::std::string::String {
                self.naming.display_name().to_string()
            }
        }
    });

    let naming_columns = name_rule.as_ref().map(|rule| {
        quote! { columns.extend(::refdata_domain::schema::naming_columns(#rule)); }
    });
    let priority_columns = cfg.prioritized.then(|| {
        quote! { columns.extend(::refdata_domain::schema::prioritized_columns()); }
    });

    let named_impl = name_rule.as_ref().map(|rule| {
        quote! {
            impl #impl_generics ::refdata_domain::named::Named for #ident #ty_generics #where_clause {
                const NAME_RULE: ::refdata_domain::named::NameRule = #rule;

                fn naming(&self) -> &::refdata_domain::named::NamingFields {
                    &self.naming
                }

                fn naming_mut(&mut self) -> &mut ::refdata_domain::named::NamingFields {
                    &mut self.naming
                }
            }
        }
    });

    let prioritized_impl = cfg.prioritized.then(|| {
        quote! {
            impl #impl_generics ::refdata_domain::prioritized::Prioritized for #ident #ty_generics #where_clause {
                fn prioritized(&self) -> &::refdata_domain::prioritized::PrioritizedFields {
                    &self.priority
                }

                fn prioritized_mut(&mut self) -> &mut ::refdata_domain::prioritized::PrioritizedFields {
                    &mut self.priority
                }
            }
        }
    });

    let expanded: TokenStream2 = quote! {
        #st

        impl #impl_generics ::refdata_domain::entity::Entity for #ident #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            fn versioned(&self) -> &::refdata_domain::versioned::VersionedFields {
                &self.versioned
            }

            fn versioned_mut(&mut self) -> &mut ::refdata_domain::versioned::VersionedFields {
                &mut self.versioned
            }

            fn validate(&self) -> ::refdata_domain::error::DomainResult<()> {
                #naming_check
                #priority_check
                #custom_check
                ::core::result::Result::Ok(())
            }

            #unique_name

            #foreign_keys

            #named_methods

            fn base_columns() -> ::std::vec::Vec<::refdata_domain::schema::ColumnSpec> {
                let mut columns = ::refdata_domain::schema::versioned_columns();
                #naming_columns
                #priority_columns
                columns
            }
        }

        #named_impl

        #prioritized_impl
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

enum NameRuleKind {
    Required,
    Optional,
}

impl NameRuleKind {
    fn tokens(&self) -> TokenStream2 {
        match self {
            Self::Required => quote! { ::refdata_domain::named::NameRule::Required },
            Self::Optional => quote! { ::refdata_domain::named::NameRule::Optional },
        }
    }
}

struct VersionedAttrConfig {
    name_rule: Option<NameRuleKind>,
    prioritized: bool,
    validate: Option<Path>,
    foreign_keys: Option<Path>,
    derive_debug: Option<bool>,
}

impl Parse for VersionedAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name_rule: Option<NameRuleKind> = None;
        let mut prioritized: Option<bool> = None;
        let mut validate: Option<Path> = None;
        let mut foreign_keys: Option<Path> = None;
        let mut derive_debug: Option<bool> = None;

        let elems: Punctuated<VersionedAttrElem, Token![,]> =
            Punctuated::<VersionedAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                VersionedAttrElem::Named(key) => {
                    if name_rule.is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "'named' and 'optional_named' are mutually exclusive",
                        ));
                    }
                    name_rule = Some(if key == "named" {
                        NameRuleKind::Required
                    } else {
                        NameRuleKind::Optional
                    });
                }
                VersionedAttrElem::Prioritized(key) => set_once(&mut prioritized, true, &key)?,
                VersionedAttrElem::Validate(key, path) => set_once(&mut validate, path, &key)?,
                VersionedAttrElem::ForeignKeys(key, path) => {
                    set_once(&mut foreign_keys, path, &key)?
                }
                VersionedAttrElem::Debug(key, b) => set_once(&mut derive_debug, b, &key)?,
            }
        }

        Ok(Self {
            name_rule,
            prioritized: prioritized.unwrap_or(false),
            validate,
            foreign_keys,
            derive_debug,
        })
    }
}

enum VersionedAttrElem {
    Named(syn::Ident),
    Prioritized(syn::Ident),
    Validate(syn::Ident, Path),
    ForeignKeys(syn::Ident, Path),
    Debug(syn::Ident, bool),
}

impl Parse for VersionedAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: syn::Ident = input.parse()?;
        if key == "named" || key == "optional_named" {
            Ok(Self::Named(key))
        } else if key == "prioritized" {
            Ok(Self::Prioritized(key))
        } else if key == "validate" || key == "foreign_keys" {
            let _eq: Token![=] = input.parse()?;
            let path: Path = input.parse()?;
            if key == "validate" {
                Ok(Self::Validate(key, path))
            } else {
                Ok(Self::ForeignKeys(key, path))
            }
        } else if key == "debug" {
            let value = parse_bool_value(input, &key)?;
            Ok(Self::Debug(key, value))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'named', 'optional_named', 'prioritized', \
                 'validate', 'foreign_keys' or 'debug'",
            ))
        }
    }
}
