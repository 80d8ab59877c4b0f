use serde_json::Value;
use std::fmt;
use syn::{
    Ident, Lit, LitStr, Result, Token, bracketed,
    parse::{Parse, ParseStream},
};

/// One allowed value listed in `choice = [...]`.
#[derive(Debug, Clone)]
pub(crate) enum Choice {
    String(String),
    Number(Value),
}

impl Choice {
    pub(crate) fn to_value(&self) -> Value {
        match self {
            Choice::String(s) => Value::String(s.clone()),
            Choice::Number(n) => n.clone(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::String(s) => write!(f, "{s}"),
            Choice::Number(n) => write!(f, "{n}"),
        }
    }
}

impl Parse for Choice {
    fn parse(input: ParseStream) -> Result<Self> {
        let lit: Lit = input.parse()?;
        match &lit {
            Lit::Str(s) => Ok(Choice::String(s.value())),
            Lit::Int(i) => Ok(Choice::Number(Value::from(i.base10_parse::<i64>()?))),
            Lit::Float(f) => Ok(Choice::Number(Value::from(f.base10_parse::<f64>()?))),
            _ => Err(syn::Error::new(
                lit.span(),
                "choices must be string or number literals",
            )),
        }
    }
}

/// Contents of a field-level `#[input(...)]` attribute.
#[derive(Debug, Default)]
pub(crate) struct FieldSchemaAttr {
    pub(crate) description: Option<LitStr>,
    pub(crate) choice: Option<Vec<Choice>>,
}

impl Parse for FieldSchemaAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldSchemaAttr::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "description" => attr.description = Some(input.parse()?),
                "choice" => {
                    let content;
                    bracketed!(content in input);
                    let choices = content.parse_terminated(Choice::parse, Token![,])?;
                    attr.choice = Some(choices.into_iter().collect());
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("Unexpected input attribute: {other}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attr)
    }
}
