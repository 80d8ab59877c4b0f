use strum::{Display, EnumString};
use syn::{
    Expr, ExprLit, Lit, LitStr, MetaNameValue, Result, Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

pub(crate) struct ToolAttributes {
    pub(crate) name: LitStr,
    pub(crate) description: LitStr,
    pub(crate) input: Type,
}

#[derive(EnumString, Display)]
pub(crate) enum ToolAttributeKeys {
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "description")]
    Description,
    #[strum(serialize = "input")]
    Input,
}

fn expect_str(pair: &MetaNameValue) -> Result<LitStr> {
    match &pair.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn expect_type(pair: &MetaNameValue) -> Result<Type> {
    match &pair.value {
        Expr::Path(path) => Ok(Type::Path(syn::TypePath {
            qself: path.qself.clone(),
            path: path.path.clone(),
        })),
        other => Err(syn::Error::new_spanned(other, "expected a type path")),
    }
}

impl Parse for ToolAttributes {
    fn parse(input: ParseStream) -> Result<Self> {
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;

        let mut name = None;
        let mut description = None;
        let mut args = None;

        for pair in &pairs {
            let key = pair
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            match key.parse::<ToolAttributeKeys>() {
                Ok(ToolAttributeKeys::Name) => name = Some(expect_str(pair)?),
                Ok(ToolAttributeKeys::Description) => description = Some(expect_str(pair)?),
                Ok(ToolAttributeKeys::Input) => args = Some(expect_type(pair)?),
                Err(_) => {
                    return Err(syn::Error::new_spanned(
                        &pair.path,
                        format!("Unexpected attribute key: {key}"),
                    ));
                }
            }
        }

        let missing = |key: ToolAttributeKeys| {
            syn::Error::new(input.span(), format!("Missing attribute: {key}"))
        };

        Ok(ToolAttributes {
            name: name.ok_or_else(|| missing(ToolAttributeKeys::Name))?,
            description: description.ok_or_else(|| missing(ToolAttributeKeys::Description))?,
            input: args.ok_or_else(|| missing(ToolAttributeKeys::Input))?,
        })
    }
}
