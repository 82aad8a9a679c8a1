use super::{NodeKind, NodeStream};
use std::fmt::Write;

/// Renders a stream as an indented listing, one node per line.
///
/// Indentation follows namespace scopes: it grows after every interior node
/// and shrinks at every scope-closing node.
pub fn disassemble(stream: &NodeStream) -> String {
    let mut output = String::new();
    let mut depth: usize = 0;
    for (index, node) in stream.iter().enumerate() {
        if node.kind.is_scope_close() {
            depth = depth.saturating_sub(1);
        }
        let operands = operands(&node.kind);
        let _ = write!(
            &mut output,
            "{index:>5} @{offset:<6} {indent}{name}",
            offset = node.offset,
            indent = "  ".repeat(depth),
            name = node.kind.name()
        );
        if !operands.is_empty() {
            let _ = write!(&mut output, " {operands}");
        }
        output.push('\n');
        if !node.kind.is_leaf() {
            depth += 1;
        }
    }
    output.trim_end().to_owned()
}

fn operands(kind: &NodeKind) -> String {
    let Ok(serde_json::Value::Object(mut fields)) = serde_json::to_value(kind) else {
        return String::new();
    };
    fields.remove("op");
    fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{PropertyIndex, TypeIndex};
    use crate::object::Constant;

    #[test]
    fn listing_indents_children_of_interior_nodes() {
        let stream: NodeStream = [
            NodeKind::PushScopeCreateTypeBeginInit { type_index: TypeIndex(2) },
            NodeKind::SetValueConstant { property: PropertyIndex(7), value: Constant::from("hi") },
            NodeKind::EndInitPopScope,
        ]
        .into_iter()
        .collect();

        let listing = disassemble(&stream);
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("PushScopeCreateTypeBeginInit type_index=2"));
        assert!(lines[1].contains("property=7"));
        let column = lines[0].find("PushScope").unwrap();
        assert_eq!(lines[1].find("SetValueConstant"), Some(column + 2));
        assert_eq!(lines[2].find("EndInitPopScope"), Some(column));
    }
}
