#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = canopy::IfNode::new(data, Vec::new());
    let _ = canopy::ForNode::new(data, Vec::new());
    let _ = canopy::TextNode::new(data);
});
