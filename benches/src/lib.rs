pub mod context;

use canopy::build::{block, cycle, doctype, el, el_with, empty, extends, for_, if_, include, template};
use canopy::{Engine, Mode, Result};

/// Construct an engine with a base layout, a page extending it and a partial
/// included once per team member.
pub fn engine<M>(mode: M) -> Result<Engine>
where
    M: Mode + 'static,
{
    let mut engine = Engine::with_mode(mode);
    engine.add_template(template(
        "base",
        vec![
            doctype(5),
            el(
                "html",
                vec![
                    el("head", vec![el("title", vec![block("title", vec!["Site".into()])])]),
                    el("body", vec![block("content", vec![])]),
                ],
            ),
        ],
    )?);
    engine.add_template(template(
        "member",
        vec![el_with(
            "tr",
            [("id", "member-{{ forloop.parentloop.counter }}-{{ forloop.counter }}")],
            vec![
                el("td", vec!["{{ member.name }}".into()]),
                el("td", vec!["{{ member.age }}".into()]),
            ],
        )],
    )?);
    engine.add_template(extends(
        "page",
        "base",
        vec![
            block("title", vec!["{{ title }}".into()]),
            block(
                "content",
                vec![for_(
                    "team in teams",
                    vec![el_with(
                        "section",
                        [("class", cycle(["odd", "even"]))],
                        vec![
                            el("h2", vec!["{{ team.name }}".into()]),
                            el(
                                "table",
                                vec![for_(
                                    "member in team.members",
                                    vec![
                                        if_(
                                            "!member.is_disabled && member.age >= 30",
                                            vec![include("member")],
                                        )?,
                                        empty(vec![el("tr", vec!["No members".into()])]),
                                    ],
                                )?],
                            ),
                        ],
                    )],
                )?],
            ),
        ],
    )?);
    Ok(engine)
}
