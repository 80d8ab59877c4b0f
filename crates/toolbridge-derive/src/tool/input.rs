use super::field::FieldSchemaAttr;
use super::json::{JsonType, extract_option_type};
use proc_macro::TokenStream;
use quote::quote;
use serde_json::{Map, Value, json};
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr, Result, parse_macro_input};

const INPUT_ATTR: &str = "input";

/// Builds the JSON schema of a tool's argument struct.
#[derive(Debug, Default)]
pub(crate) struct InputParser {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl InputParser {
    pub fn parse(&mut self, input: TokenStream) -> TokenStream {
        let input = parse_macro_input!(input as DeriveInput);
        let struct_ident = input.ident.clone();
        let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

        if let Err(err) = self.parse_data(&input.data) {
            return err.to_compile_error().into();
        }

        let schema_literal = LitStr::new(&self.schema().to_string(), struct_ident.span());

        let expanded = quote! {
            impl #impl_generics ::toolbridge::core::tool::ToolInputT for #struct_ident #ty_generics #where_clause {
                fn io_schema() -> &'static str {
                    #schema_literal
                }
            }
        };
        TokenStream::from(expanded)
    }

    fn schema(&self) -> Value {
        json!({
            "type": JsonType::Object.to_string(),
            "properties": self.properties,
            "required": self.required,
        })
    }

    fn parse_data(&mut self, data: &Data) -> Result<()> {
        let Data::Struct(struct_data) = data else {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "ToolInput can only be derived for structs",
            ));
        };

        match &struct_data.fields {
            Fields::Named(fields) => {
                for field in fields.named.iter() {
                    self.parse_field(field)?;
                }
                Ok(())
            }
            Fields::Unit => Ok(()),
            Fields::Unnamed(_) => Err(Error::new(
                proc_macro2::Span::call_site(),
                "Tuple structs not yet supported!",
            )),
        }
    }

    fn parse_field(&mut self, field: &Field) -> Result<()> {
        let Some(ident) = field.ident.as_ref() else {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "Couldn't get the field name!",
            ));
        };
        let name = ident.to_string();

        let (is_optional, inner_type) = extract_option_type(&field.ty);
        if !is_optional {
            self.required.push(name.clone());
        }

        let json_type = JsonType::from_type(inner_type.unwrap_or(&field.ty))?;
        let mut property = Map::new();
        property.insert("type".into(), Value::String(json_type.to_string()));

        for attr in field.attrs.iter().filter(|a| a.path().is_ident(INPUT_ATTR)) {
            let schema = attr.parse_args::<FieldSchemaAttr>()?;
            if let Some(description) = schema.description {
                property.insert("description".into(), Value::String(description.value()));
            }
            if let Some(choices) = schema.choice {
                let mismatched = choices.iter().any(|choice| {
                    matches!(
                        (choice, json_type),
                        (super::field::Choice::String(_), JsonType::Integer | JsonType::Number)
                            | (super::field::Choice::Number(_), JsonType::String)
                    )
                });
                if mismatched {
                    return Err(Error::new_spanned(
                        attr,
                        "Enum choices must match the field type",
                    ));
                }
                property.insert(
                    "enum".into(),
                    Value::Array(choices.iter().map(|c| c.to_value()).collect()),
                );
            }
        }

        self.properties.insert(name, Value::Object(property));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_for(src: &str) -> Result<Value> {
        let input: DeriveInput = syn::parse_str(src).unwrap();
        let mut parser = InputParser::default();
        parser.parse_data(&input.data)?;
        Ok(parser.schema())
    }

    #[test]
    fn builds_schema_with_required_and_optional_fields() {
        let schema = schema_for(
            r#"
            struct SearchArgs {
                #[input(description = "Query for search")]
                query: String,
                #[input(description = "Maximum results")]
                limit: Option<u32>,
            }
            "#,
        )
        .unwrap();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(
            schema["properties"]["query"]["description"],
            "Query for search"
        );
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
    }

    #[test]
    fn serde_attributes_are_ignored() {
        let schema = schema_for(
            r#"
            struct CodeArgs {
                #[serde(default)]
                #[input(description = "Python code to execute.")]
                code: String,
            }
            "#,
        )
        .unwrap();
        assert_eq!(schema["required"], json!(["code"]));
        assert!(schema["properties"]["code"].get("enum").is_none());
    }

    #[test]
    fn choices_become_enum() {
        let schema = schema_for(
            r#"
            struct Args {
                #[input(description = "Mode", choice = ["fast", "slow"])]
                mode: String,
            }
            "#,
        )
        .unwrap();
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["fast", "slow"]));
    }

    #[test]
    fn mismatched_choices_error() {
        let err = schema_for(
            r#"
            struct Args {
                #[input(choice = [1, 2])]
                mode: String,
            }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Enum choices must match"));
    }

    #[test]
    fn tuple_struct_errors() {
        let err = schema_for("struct Args(u32);").unwrap_err();
        assert!(err.to_string().contains("Tuple structs not yet supported"));
    }

    #[test]
    fn enums_error() {
        let err = schema_for("enum Args { A }").unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }
}
