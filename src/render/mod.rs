//! The rendering driver shared by every node with contents.

mod eval;

pub(crate) use crate::render::eval::evaluate;
use crate::node::Node;
use crate::{Context, Result, Value};

/// Render a content list, one item per node.
pub(crate) fn contents(ctx: &mut Context<'_>, nodes: &[Node]) -> Result<Vec<Value>> {
    nodes.iter().map(|node| node.render(ctx)).collect()
}

/// Flatten nested lists into a single sequence of items.
pub(crate) fn flatten(items: Vec<Value>) -> Vec<Value> {
    fn push(out: &mut Vec<Value>, value: Value) {
        match value {
            Value::List(list) => {
                for item in list {
                    push(out, item);
                }
            }
            value => out.push(value),
        }
    }

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        push(&mut out, item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn flatten_nested() {
        let items = vec![
            value!("a"),
            value!(["b", ["c", []], { d: 1 }]),
            value!(None),
        ];
        assert_eq!(
            flatten(items),
            [
                value!("a"),
                value!("b"),
                value!("c"),
                value!({ d: 1 }),
                value!(None)
            ]
        );
    }
}
