#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use canopy::build::{el, for_, if_, include, template, text};
use libfuzzer_sys::fuzz_target;
use serde::Serialize;

#[derive(Debug, Serialize, Arbitrary)]
enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fuzz_target!(|data: (&str, &str, &str, Vec<(&str, &str)>, Value)| {
    let (test, list, body, includes, value) = data;
    let mut engine = canopy::Engine::new();
    engine.set_max_include_depth(8);

    let (Ok(cond), Ok(looped)) = (
        if_(test, vec![text(body)]),
        for_(list, vec![el("li", vec![body.into()])]),
    ) else {
        return;
    };
    let Ok(root) = template("fuzz", vec![cond, el("ul", vec![looped])]) else {
        return;
    };
    engine.add_template(root);
    for (name, target) in includes {
        if let Ok(t) = template(name, vec![text(body), include(target)]) {
            engine.add_template(t);
        }
    }
    let _ = engine.template("fuzz").unwrap().render(&value);
});
