use canopy::build::{doctype, el, el_with, for_, include, template};
use canopy::mode::tree::{Element, Fragment, Tree, TreeNode};
use canopy::{value, Engine, Value};

fn fragment(value: &Value) -> &Fragment {
    match value {
        Value::Markup(markup) => markup.downcast_ref::<Fragment>().unwrap(),
        value => panic!("expected markup, found {:?}", value),
    }
}

fn element(node: &TreeNode) -> &Element {
    match node {
        TreeNode::Element(element) => element,
        node => panic!("expected element, found {:?}", node),
    }
}

#[test]
fn tree_render_elements() -> canopy::Result<()> {
    let mut engine = Engine::with_mode(Tree);
    engine.add_template(template(
        "t",
        vec![
            doctype(5),
            el_with(
                "UL",
                [("Class", "items")],
                vec![for_("i in items", vec![el("li", vec!["{{ i }}".into()])])?],
            ),
        ],
    )?);

    let value = engine
        .template("t")?
        .render_value(value! { items: ["a", "<b>"] })?;
    let fragment = fragment(&value);
    assert_eq!(fragment.children().len(), 2);
    assert_eq!(fragment.children()[0], TreeNode::Raw("<!DOCTYPE html>".into()));

    let ul = element(&fragment.children()[1]);
    assert_eq!(ul.tag(), "ul");
    assert_eq!(ul.attribute("class"), Some("items"));
    let items: Vec<_> = ul
        .children()
        .iter()
        .map(|li| element(li).children().to_vec())
        .collect();
    assert_eq!(
        items,
        [
            vec![TreeNode::Text("a".into())],
            vec![TreeNode::Text("<b>".into())]
        ]
    );

    assert_eq!(
        value.to_text()?,
        r#"<!DOCTYPE html><ul class="items"><li>a</li><li>&lt;b&gt;</li></ul>"#
    );
    Ok(())
}

#[test]
fn tree_include_is_inlined() -> canopy::Result<()> {
    let mut engine = Engine::with_mode(Tree);
    engine.add_template(template("item", vec![el("em", vec![]), "tail".into()])?);
    engine.add_template(template("main", vec![el("p", vec![include("item")])])?);

    let value = engine.template("main")?.render_value(Value::None)?;
    let p = element(&fragment(&value).children()[0]);
    assert_eq!(p.children().len(), 2);
    assert_eq!(element(&p.children()[0]).tag(), "em");
    assert_eq!(p.children()[1], TreeNode::Text("tail".into()));
    Ok(())
}
