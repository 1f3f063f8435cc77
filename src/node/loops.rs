use crate::node::split_empty;
use crate::value::Map;
use crate::{compile, Context, Error, Node, Result, Value, Variable};

/// Renders its contents once for every item of a list.
///
/// Strings iterate over their characters and maps over `[key, value]` pairs.
///
/// Inside the loop the variable `forloop` holds the loop state: `counter`,
/// `counter0`, `revcounter`, `revcounter0`, `first`, `last` and the
/// `parentloop` of an enclosing loop (an empty map at the outermost level).
#[derive(Debug)]
pub struct ForNode {
    vars: Vec<String>,
    list: Variable,
    contents: Vec<Node>,
    empty: Vec<Node>,
}

impl ForNode {
    /// Construct a loop from an expression like `item in items` or
    /// `key, value in pairs`.
    ///
    /// A trailing [`Node::Empty`] in `contents` is rendered instead of the
    /// loop body when the list is empty.
    pub fn new(expr: &str, contents: Vec<Node>) -> Result<Self> {
        let (vars, list) = compile::for_expr(expr)?;
        Ok(Self::with_vars(vars, list, contents))
    }

    /// Construct a loop from already separated parts.
    pub fn with_vars(vars: Vec<String>, list: Variable, mut contents: Vec<Node>) -> Self {
        let empty = split_empty(&mut contents);
        Self {
            vars,
            list,
            contents,
            empty,
        }
    }

    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn list(&self) -> &Variable {
        &self.list
    }

    pub fn contents(&self) -> &[Node] {
        &self.contents
    }

    /// The contents rendered when the list is empty.
    pub fn empty(&self) -> &[Node] {
        &self.empty
    }

    pub fn render(&self, ctx: &mut Context<'_>) -> Result<Value> {
        let items = match self.list.resolve(ctx)? {
            Value::List(list) => list,
            Value::Map(map) => map
                .into_iter()
                .map(|(k, v)| Value::List(vec![Value::String(k), v]))
                .collect(),
            Value::String(s) => chars(&s),
            value => {
                return Err(Error::render(format!(
                    "expected iterable, but found {}",
                    value.human()
                )))
            }
        };

        if items.is_empty() {
            return ctx.render(&self.empty).map(Value::List);
        }

        let parentloop = ctx
            .get("forloop")
            .cloned()
            .unwrap_or_else(|| Value::Map(Map::new()));
        ctx.push(Map::new());
        let result = self.render_items(ctx, items, parentloop);
        ctx.pop()?;
        result.map(Value::List)
    }

    fn render_items(
        &self,
        ctx: &mut Context<'_>,
        items: Vec<Value>,
        parentloop: Value,
    ) -> Result<Vec<Value>> {
        let len = items.len();
        let mut results = Vec::new();
        for (i, item) in items.into_iter().enumerate() {
            match (self.vars.as_slice(), item) {
                ([var], item) => ctx.set(var.as_str(), item),
                (vars, Value::List(values)) => ctx.zip(vars, &values),
                (vars, Value::String(s)) => ctx.zip(vars, &chars(&s)),
                (vars, item) => {
                    return Err(Error::render(format!(
                        "cannot unpack {} into {} loop variables",
                        item.human(),
                        vars.len()
                    )))
                }
            }
            ctx.set(
                "forloop",
                Value::from([
                    ("parentloop", parentloop.clone()),
                    ("counter", Value::from(i + 1)),
                    ("counter0", Value::from(i)),
                    ("revcounter", Value::from(len - i)),
                    ("revcounter0", Value::from(len - i - 1)),
                    ("first", Value::Bool(i == 0)),
                    ("last", Value::Bool(i == len - 1)),
                ]),
            );
            results.extend(ctx.render(&self.contents)?);
        }
        Ok(results)
    }
}

fn chars(s: &str) -> Vec<Value> {
    s.chars().map(Value::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Engine, ErrorKind};

    #[test]
    fn for_single_item_forloop() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("xs", value!(["x"]));
        let node = ForNode::new("item in xs", vec![Node::from(Variable::new("forloop"))]).unwrap();
        let result = node.render(&mut ctx).unwrap();
        assert_eq!(
            result,
            value!([{
                parentloop: {},
                counter: 1,
                counter0: 0,
                revcounter: 1,
                revcounter0: 0,
                first: true,
                last: true,
            }])
        );
        assert!(!ctx.has_key("forloop"));
        assert!(!ctx.has_key("item"));
    }

    #[test]
    fn for_empty_list() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("xs", value!([]));
        let node = ForNode::new(
            "x in xs",
            vec![Node::from("{{ x }}"), Node::Empty(vec![Node::from("none")])],
        )
        .unwrap();
        assert_eq!(node.render(&mut ctx).unwrap(), value!(["none"]));
    }

    #[test]
    fn for_unpack_map() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("m", value!({ a: 1, b: 2 }));
        let node = ForNode::new("k, v in m", vec![Node::from("{{ k }}={{ v }};")]).unwrap();
        let text = node.render(&mut ctx).unwrap().to_text().unwrap();
        assert_eq!(text, "a=1;b=2;");
    }

    #[test]
    fn for_string_characters() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("s", "ab");
        let node = ForNode::new("c in s", vec![Node::from("{{ c }}-")]).unwrap();
        let text = node.render(&mut ctx).unwrap().to_text().unwrap();
        assert_eq!(text, "a-b-");
    }

    #[test]
    fn for_empty_string() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("s", "");
        let node = ForNode::new(
            "c in s",
            vec![Node::from("{{ c }}"), Node::Empty(vec![Node::from("none")])],
        )
        .unwrap();
        assert_eq!(node.render(&mut ctx).unwrap(), value!(["none"]));
    }

    #[test]
    fn for_unpack_string_item() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("xs", value!(["xy", "zw"]));
        let node = ForNode::new("a, b in xs", vec![Node::from("({{ b }}{{ a }})")]).unwrap();
        let text = node.render(&mut ctx).unwrap().to_text().unwrap();
        assert_eq!(text, "(yx)(wz)");
    }

    #[test]
    fn for_err_not_iterable() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("n", 3);
        let node = ForNode::new("c in n", vec![]).unwrap();
        let err = node.render(&mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
        assert_eq!(err.to_string(), "expected iterable, but found integer");
    }

    #[test]
    fn for_err_unpack_scalar() {
        let engine = Engine::new();
        let mut ctx = engine.context();
        ctx.set("xs", value!([1]));
        let node = ForNode::new("a, b in xs", vec![]).unwrap();
        let err = node.render(&mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "cannot unpack integer into 2 loop variables");
    }
}
