use canopy::build::{block, el, extends, template, var};
use canopy::{value, Engine, ErrorKind};

fn base() -> canopy::Result<canopy::Template> {
    template(
        "base",
        vec![el(
            "main",
            vec![block("content", vec!["Base Content".into()])],
        )],
    )
}

#[test]
fn inheritance_child_overrides_block() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(base()?);
    engine.add_template(extends(
        "child",
        "base",
        vec![block("content", vec!["{{ message }}".into()])],
    )?);

    let result = engine.render_template("child", value! { message: "Child Content" })?;
    assert_eq!(result, "<main>Child Content</main>");

    let result = engine.render_template("base", value! {})?;
    assert_eq!(result, "<main>Base Content</main>");
    Ok(())
}

#[test]
fn inheritance_block_super() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(base()?);
    engine.add_template(extends(
        "child",
        "base",
        vec![block("content", vec!["Child + ".into(), var("block.super")])],
    )?);
    let result = engine.render_template("child", value! {})?;
    assert_eq!(result, "<main>Child + Base Content</main>");
    Ok(())
}

#[test]
fn inheritance_block_super_without_parent_definition() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "base",
        vec![block("content", vec!["[".into(), var("block.super"), "]".into()])],
    )?);
    engine.add_template(extends(
        "child",
        "base",
        vec![block("content", vec!["child ".into(), var("block.super")])],
    )?);
    assert_eq!(engine.render_template("base", value! {})?, "[]");
    assert_eq!(engine.render_template("child", value! {})?, "child []");
    Ok(())
}

#[test]
fn inheritance_three_levels() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "base",
        vec![el(
            "div",
            vec![
                block("content", vec!["base".into()]),
                block("footer", vec!["footer".into()]),
            ],
        )],
    )?);
    engine.add_template(extends(
        "mid",
        "base",
        vec![block("content", vec!["mid+".into(), var("block.super")])],
    )?);
    engine.add_template(extends(
        "leaf",
        "mid",
        vec![block("content", vec!["leaf+".into(), var("block.super")])],
    )?);

    let result = engine.render_template("leaf", value! {})?;
    assert_eq!(result, "<div>leaf+mid+basefooter</div>");
    let result = engine.render_template("mid", value! {})?;
    assert_eq!(result, "<div>mid+basefooter</div>");
    Ok(())
}

#[test]
fn inheritance_block_name() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(template(
        "t",
        vec![block("sidebar", vec!["{{ block.name }}".into()])],
    )?);
    assert_eq!(engine.render_template("t", value! {})?, "sidebar");
    Ok(())
}

#[test]
fn inheritance_child_contents_outside_blocks_are_ignored() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(base()?);
    engine.add_template(extends(
        "child",
        "base",
        vec!["ignored".into(), block("content", vec!["kept".into()])],
    )?);
    assert_eq!(engine.render_template("child", value! {})?, "<main>kept</main>");
    Ok(())
}

#[test]
fn inheritance_err_missing_parent() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(extends("child", "nope", vec![])?);
    let err = engine.render_template("child", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    assert_eq!(err.template_name(), Some("child"));
    assert_eq!(err.to_string(), "template not found: nope in template `child`");
    Ok(())
}

#[test]
fn inheritance_err_cyclic() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(extends("a", "b", vec![])?);
    engine.add_template(extends("b", "a", vec![])?);
    let err = engine.render_template("a", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicTemplate);
    assert_eq!(
        err.to_string(),
        "template `a` extends itself through `a` -> `b` in template `a`"
    );
    Ok(())
}

#[test]
fn inheritance_err_in_child_block_names_root() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(base()?);
    engine.add_template(extends(
        "child",
        "base",
        vec![block("content", vec!["{{ missing }}".into()])],
    )?);
    let err = engine.render_template("child", value! {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VariableNotFound);
    assert_eq!(err.template_name(), Some("base"));
    Ok(())
}

#[test]
fn inheritance_failed_render_restores_context() -> canopy::Result<()> {
    let mut engine = Engine::new();
    engine.add_template(base()?);
    engine.add_template(extends(
        "child",
        "base",
        vec![block("content", vec!["{{ status }}".into()])],
    )?);
    let template = engine.template("child")?;

    let mut ctx = engine.context();
    let err = template.render_with(&mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VariableNotFound);
    assert!(!ctx.render_context().has_blocks());

    ctx.set("status", "ok");
    let result = template.render_with(&mut ctx)?;
    assert_eq!(result.to_text()?, "<main>ok</main>");
    Ok(())
}
