use attr::ToolAttributes;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

pub(crate) mod attr;
pub(crate) mod field;
pub(crate) mod input;
pub(crate) mod json;

/// Expands `#[tool(name = ..., description = ..., input = ...)]` into a
/// `ToolT` implementation. The struct gains a `Debug` derive, so it must not
/// derive `Debug` itself; `ToolRuntime` is still implemented by hand.
#[derive(Debug, Default)]
pub(crate) struct ToolParser {}

impl ToolParser {
    pub fn parse(&self, attr: TokenStream, item: TokenStream) -> TokenStream {
        let tool_attrs = parse_macro_input!(attr as ToolAttributes);
        let input_struct = parse_macro_input!(item as ItemStruct);
        let struct_name = &input_struct.ident;
        let (impl_generics, ty_generics, where_clause) = input_struct.generics.split_for_impl();
        let ToolAttributes {
            name: tool_name_literal,
            description: tool_description,
            input: input_type,
        } = tool_attrs;

        let expanded = quote! {
            #[derive(Debug)]
            #input_struct

            impl #impl_generics ::toolbridge::core::tool::ToolT for #struct_name #ty_generics #where_clause {
                fn name(&self) -> &str {
                    #tool_name_literal
                }

                fn description(&self) -> &str {
                    #tool_description
                }

                fn args_schema(&self) -> ::serde_json::Value {
                    let schema = <#input_type as ::toolbridge::core::tool::ToolInputT>::io_schema();
                    ::serde_json::from_str(schema).unwrap_or_default()
                }
            }
        };
        expanded.into()
    }
}
