use canopy::build::{el, else_, for_, if_, include, include_only, include_with, template, text};
use canopy::{value, Engine, ErrorKind, Node, Variable};

fn engine() -> canopy::Result<Engine> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "item",
        vec![el("li", vec!["{{ arg }}-{{ name }}".into()])],
    )?);
    Ok(engine)
}

#[test]
fn include_extra_context_is_scoped() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template(
        "main",
        vec![
            include_with("item", [("arg", "X")]),
            if_("arg", vec![text("leaked"), else_(vec![text("clean")])])?,
        ],
    )?);
    let result = engine.render_template("main", value! { name: "n" })?;
    assert_eq!(result, "<li>X-n</li>clean");
    Ok(())
}

#[test]
fn include_extra_context_from_variables() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template(
        "main",
        vec![el(
            "ul",
            vec![for_(
                "n in numbers",
                vec![include_with(
                    "item",
                    [("arg", Node::from(Variable::new("forloop.counter")))],
                )],
            )?],
        )],
    )?);
    let result = engine.render_template("main", value! { numbers: [1, 2], name: "x" })?;
    assert_eq!(result, "<ul><li>1-x</li><li>2-x</li></ul>");
    Ok(())
}

#[test]
fn include_extra_context_text_is_a_string() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "greeting",
        vec![
            if_("g == 'Hi Bob' && g.length == 6", vec![text("EQ")])?,
            "[{{ g }}]".into(),
        ],
    )?);
    engine.add_template(template(
        "main",
        vec![include_with("greeting", [("g", "Hi {{ name }}")])],
    )?);
    let result = engine.render_template("main", value! { name: "Bob" })?;
    assert_eq!(result, "EQ[Hi Bob]");
    Ok(())
}

#[test]
fn include_shares_context() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template("main", vec![include("item")])?);
    let result = engine.render_template("main", value! { arg: "a", name: "b" })?;
    assert_eq!(result, "<li>a-b</li>");
    Ok(())
}

#[test]
fn include_only_isolates_context() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template(
        "isolated",
        vec![include_only("item", [("arg", "X")])],
    )?);
    let err = engine
        .render_template("isolated", value! { name: "n" })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VariableNotFound);
    assert_eq!(err.template_name(), Some("item"));

    engine.add_template(template(
        "isolated",
        vec![include_only("item", [("arg", "X"), ("name", "Y")])],
    )?);
    let result = engine.render_template("isolated", value! { name: "n" })?;
    assert_eq!(result, "<li>X-Y</li>");
    Ok(())
}

#[test]
fn include_first_existing_template() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template("main", vec![include(vec!["missing", "item"])])?);
    let result = engine.render_template("main", value! { arg: 1, name: 2 })?;
    assert_eq!(result, "<li>1-2</li>");
    Ok(())
}

#[test]
fn include_target_from_variable() -> canopy::Result<()> {
    let mut engine = engine()?;
    engine.add_template(template("main", vec![include(Variable::new("which"))])?);

    let result = engine.render_template("main", value! { which: "item", arg: 1, name: 2 })?;
    assert_eq!(result, "<li>1-2</li>");

    let result =
        engine.render_template("main", value! { which: ["nope", "item"], arg: 1, name: 2 })?;
    assert_eq!(result, "<li>1-2</li>");

    let err = engine
        .render_template("main", value! { which: 7 })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Render);
    assert_eq!(
        err.to_string(),
        "expected template name, but found integer in template `main`"
    );
    Ok(())
}

#[test]
fn include_output_is_not_escaped_twice() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "list",
        vec![for_("i in items", vec![el("p", vec!["{{ i }}".into()])])?],
    )?);
    engine.add_template(template(
        "main",
        vec![
            "Before >".into(),
            include_with("list", [("extra", "Extra Context")]),
            "< After".into(),
        ],
    )?);
    let result = engine.render_template("main", value! { items: [1, 2, 3] })?;
    assert_eq!(result, "Before &gt;<p>1</p><p>2</p><p>3</p>&lt; After");
    Ok(())
}

#[test]
fn include_err_missing_template() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template("main", vec![include(vec!["a", "b"])])?);
    let err = engine.render_template("main", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    assert_eq!(err.to_string(), "template not found: a, b in template `main`");
    Ok(())
}

#[test]
fn include_err_self_include() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.set_max_include_depth(8);
    engine.add_template(template("loop", vec!["x".into(), include("loop")])?);
    let err = engine.render_template("loop", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicTemplate);
    assert_eq!(err.message(), "reached the maximum include depth (8)");
    Ok(())
}

#[test]
fn include_nested_within_depth() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.set_max_include_depth(2);
    engine.add_template(template("c", vec!["c".into()])?);
    engine.add_template(template("b", vec!["b".into(), include("c")])?);
    engine.add_template(template("a", vec!["a".into(), include("b")])?);
    assert_eq!(engine.render_template("a", value! {})?, "abc");
    Ok(())
}
