use quote::ToTokens;
use strum::{Display, EnumString};
use syn::{Error, Result, Type};

/// JSON-schema primitive types a tool argument can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub(crate) enum JsonType {
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "number")]
    Number,
    #[strum(serialize = "boolean")]
    Boolean,
    #[strum(serialize = "array")]
    Array,
    #[strum(serialize = "object")]
    Object,
}

impl JsonType {
    pub(crate) fn from_type(field_type: &Type) -> Result<Self> {
        let type_str = field_type.to_token_stream().to_string();
        let json_type = match type_str.as_str() {
            "String" | "str" | "& str" | "& 'static str" => JsonType::String,
            "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
                JsonType::Integer
            }
            "f32" | "f64" => JsonType::Number,
            "bool" => JsonType::Boolean,
            "Value" | "serde_json :: Value" | "Map < String , Value >" => JsonType::Object,
            _ => {
                if type_str.starts_with("Vec <") {
                    return Ok(JsonType::Array);
                }
                if type_str.starts_with("HashMap <") || type_str.starts_with("BTreeMap <") {
                    return Ok(JsonType::Object);
                }
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    format!("Unsupported data type: {type_str}"),
                ));
            }
        };
        Ok(json_type)
    }
}

/// Returns `(true, inner)` when `ty` is `Option<inner>`.
pub(crate) fn extract_option_type(ty: &Type) -> (bool, Option<&Type>) {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(inner_type)) = args.args.first()
    {
        return (true, Some(inner_type));
    }
    (false, None)
}
