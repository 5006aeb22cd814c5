use super::selection_tree::SelectionNode;
use crate::utils::graphql_string::quote;

/// Serialize a compiled node to GraphQL text
pub trait ToGraphql {
    fn to_graphql(&self) -> String;
}

impl ToGraphql for SelectionNode {
    fn to_graphql(&self) -> String {
        let mut out = self.type_name.clone();

        if !self.arguments.is_empty() {
            let args: Vec<String> = self
                .arguments
                .iter()
                .map(|(name, value)| format!("{}: {}", name, quote(value)))
                .collect();
            out.push('(');
            out.push_str(&args.join(", "));
            out.push(')');
        }

        let mut selections: Vec<String> = self.fields.clone();
        if let Some(child) = &self.child {
            selections.push(child.to_graphql());
        }
        out.push_str(" {");
        out.push_str(&selections.join(" "));
        out.push('}');
        out
    }
}

/// The anonymous query operation wrapping the outermost node.
pub struct QueryDocument<'a>(pub &'a SelectionNode);

impl ToGraphql for QueryDocument<'_> {
    fn to_graphql(&self) -> String {
        format!("{{{}}}", self.0.to_graphql())
    }
}
