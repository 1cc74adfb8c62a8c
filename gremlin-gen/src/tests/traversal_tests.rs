use proptest::prelude::*;

use crate::{
    args,
    protocol::{RenderedQuery, Value},
    traversal::{
        Traversal, TraversalBuilder,
        binder::Param,
        steps::{Function, Step},
    },
};

/// Name bound to `value` in the rendered table.
fn name_of(rendered: &RenderedQuery, value: impl Into<Value>) -> String {
    rendered
        .bindings
        .name_of(&value.into())
        .map(str::to_string)
        .unwrap_or_default()
}

// ============================================================================
// Attribute Tests
// ============================================================================

#[test]
fn test_one_attribute() {
    assert_eq!(Traversal::new().attr("a").to_string(), "g.a");
}

#[test]
fn test_one_attribute_without_graph_variable() {
    let g = Traversal::new().attr("a").with_graph_variable("");
    assert_eq!(g.to_string(), "a");
}

#[test]
fn test_two_attributes() {
    assert_eq!(Traversal::new().attr("a").attr("b").to_string(), "g.a.b");
}

proptest! {
    #[test]
    fn attributes_join_with_periods(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..20)) {
        let g = names.iter().fold(Traversal::new(), |g, name| g.attr(name.as_str()));
        prop_assert_eq!(g.to_string(), format!("g.{}", names.join(".")));
    }

    #[test]
    fn attributes_join_without_graph_variable(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..20)) {
        let g = names
            .iter()
            .fold(Traversal::new().with_graph_variable(""), |g, name| g.attr(name.as_str()));
        prop_assert_eq!(g.to_string(), names.join("."));
    }
}

// ============================================================================
// Function Tests
// ============================================================================

#[test]
fn test_function_without_args_binds_nothing() {
    let rendered = Traversal::new().call("function", args![]).render().unwrap();

    assert_eq!(rendered.query, "g.function()");
    assert!(rendered.bindings.is_empty());
}

#[test]
fn test_unbound_function_without_args() {
    let rendered = Traversal::new().call_unbound("mark", args![]).render().unwrap();

    assert_eq!(rendered.query, "g.mark()");
    assert!(rendered.bindings.is_empty());
}

#[test]
fn test_raw_function_drops_separator() {
    let rendered = Traversal::new().call_raw("mark", args![]).render().unwrap();

    assert_eq!(rendered.query, "gmark()");
    assert!(rendered.bindings.is_empty());
}

#[test]
fn test_function_with_one_arg() {
    let rendered = Traversal::new().call("function", args!["arg"]).render().unwrap();
    let arg = name_of(&rendered, "arg");

    assert_eq!(rendered.query, format!("g.function({arg})"));
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_function_binds_every_arg() {
    let rendered = Traversal::new()
        .call("some_function", args!["one", "two", "three"])
        .render()
        .unwrap();
    let one = name_of(&rendered, "one");
    let two = name_of(&rendered, "two");
    let three = name_of(&rendered, "three");

    assert_eq!(rendered.query, format!("g.some_function({one}, {two}, {three})"));
    assert_eq!(rendered.bindings.len(), 3);
}

#[test]
fn test_function_with_mixed_manually_bound_args() {
    let mut g = Traversal::new();
    let two = g.bind("two", Some("two"));
    let g = g.call("some_function", args![Param::new("one", "one"), two, "three"]);

    let rendered = g.render().unwrap();
    let three = name_of(&rendered, "three");

    assert_eq!(rendered.query, format!("g.some_function(one, two, {three})"));
    assert_eq!(rendered.bindings.len(), 3);
}

#[test]
fn test_same_value_in_two_functions_shares_a_name() {
    let rendered = Traversal::new()
        .call("func1", args!["random-value"])
        .call("func2", args!["random-value"])
        .render()
        .unwrap();
    let name = name_of(&rendered, "random-value");

    assert_eq!(rendered.query, format!("g.func1({name}).func2({name})"));
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_unbound_function_writes_args() {
    let rendered = Traversal::new()
        .call_unbound("function", args!["arg", "two"])
        .render()
        .unwrap();

    assert_eq!(rendered.query, "g.function(arg, two)");
    assert!(rendered.bindings.is_empty());
}

#[test]
fn test_raw_function_binds_args() {
    let rendered = Traversal::new()
        .call_raw("function", args!["arg", "two"])
        .render()
        .unwrap();
    let arg = name_of(&rendered, "arg");
    let two = name_of(&rendered, "two");

    assert_eq!(rendered.query, format!("gfunction({arg}, {two})"));
    assert_eq!(rendered.bindings.len(), 2);
}

#[test]
fn test_manually_bound_params() {
    let mut g = Traversal::new();
    let first = g.bind("arg", None);
    let second = g.bind("arg2", None);
    let g = g.call("function", args![&first, &second]);
    let rendered = g.render().unwrap();

    assert_eq!(
        rendered.query,
        format!("g.function({}, {})", first.name, second.name)
    );
    assert_eq!(rendered.bindings.len(), 2);
}

#[test]
fn test_bound_name_passed_as_literal_resolves_to_binding() {
    let mut g = Traversal::new();
    let param = g.bind("arg", Some("bound"));
    let rendered = g.call("function", args!["bound"]).render().unwrap();

    assert_eq!(rendered.query, "g.function(bound)");
    assert_eq!(rendered.bindings.get(&param.name), Some(&Value::from("arg")));
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_function_around_attribute() {
    let rendered = Traversal::new()
        .call("function", args!["val"])
        .attr("a")
        .render()
        .unwrap();
    assert_eq!(rendered.query, format!("g.function({}).a", name_of(&rendered, "val")));

    let rendered = Traversal::new()
        .with_graph_variable("")
        .attr("a")
        .call("function", args!["val"])
        .render()
        .unwrap();
    assert_eq!(rendered.query, format!("a.function({})", name_of(&rendered, "val")));
}

#[test]
fn test_unbound_then_bound_function() {
    let rendered = Traversal::new()
        .call_unbound("function", args!["val1", "val2"])
        .call("isbound", args!["hello"])
        .render()
        .unwrap();
    let hello = name_of(&rendered, "hello");

    assert_eq!(rendered.query, format!("g.function(val1, val2).isbound({hello})"));
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_reserved_word_function_step() {
    let g = Traversal::new().append(Step::function(Function::new("__init__", args!["arg"])));
    let rendered = g.render().unwrap();

    assert_eq!(
        rendered.query,
        format!("g.__init__({})", name_of(&rendered, "arg"))
    );
}

#[test]
fn test_reserved_word_unbound_function_step() {
    let g = Traversal::new()
        .call("someFunc", args!["some_arg"])
        .append(Step::function(Function::new("__init__", args!["arg", "2"]).unbound()));
    let rendered = g.render().unwrap();

    assert_eq!(
        rendered.query,
        format!("g.someFunc({}).__init__(arg, 2)", name_of(&rendered, "some_arg"))
    );
    assert_eq!(rendered.bindings.len(), 1);
}

// ============================================================================
// Closure And Index Tests
// ============================================================================

#[test]
fn test_function_with_closure() {
    let rendered = Traversal::new()
        .call("condition", args!["x"])
        .close("body")
        .render()
        .unwrap();

    assert_eq!(rendered.query, format!("g.condition({}){{body}}", name_of(&rendered, "x")));
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_index_single_value() {
    assert_eq!(
        Traversal::new().call("function", args![]).index(1).to_string(),
        "g.function()[1]"
    );
    assert_eq!(
        Traversal::new().call("function", args![]).index(5).to_string(),
        "g.function()[5]"
    );
}

#[test]
fn test_index_range_after_closure() {
    let rendered = Traversal::new()
        .call("condition", args!["x"])
        .close("body")
        .index(12..44)
        .render()
        .unwrap();

    assert_eq!(
        rendered.query,
        format!("g.condition({}){{body}}[12..44]", name_of(&rendered, "x"))
    );
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_closure_args_chain() {
    let rendered = Traversal::new()
        .call("look", args!["LOOK"])
        .call("at", args!["AT"])
        .close("--this--")
        .call("__init__", args!["arg"])
        .render()
        .unwrap();

    assert_eq!(
        rendered.query,
        format!(
            "g.look({}).at({}){{--this--}}.__init__({})",
            name_of(&rendered, "LOOK"),
            name_of(&rendered, "AT"),
            name_of(&rendered, "arg")
        )
    );
    assert_eq!(rendered.bindings.len(), 3);
}

// ============================================================================
// Raw Tests
// ============================================================================

#[test]
fn test_raw_after_function() {
    let rendered = Traversal::new()
        .call("function", args![])
        .raw("--raw-text--")
        .render()
        .unwrap();

    assert_eq!(rendered.query, "g.function()--raw-text--");
    assert!(rendered.bindings.is_empty());
}

#[test]
fn test_raw_without_graph_variable() {
    let g = Traversal::new().raw("--raw-text--").with_graph_variable("");
    assert_eq!(g.to_string(), "--raw-text--");
}

#[test]
fn test_raw_suppresses_next_separator() {
    let rendered = Traversal::new()
        .call("function", args![])
        .raw("--raw-text--")
        .call("func2", args!["arg"])
        .render()
        .unwrap();

    assert_eq!(
        rendered.query,
        format!("g.function()--raw-text--func2({})", name_of(&rendered, "arg"))
    );
    assert_eq!(rendered.bindings.len(), 1);
}

#[test]
fn test_raw_after_closure() {
    let rendered = Traversal::new()
        .call("function", args![])
        .close("[[[]]]")
        .raw("--raw-text--")
        .render()
        .unwrap();

    assert_eq!(rendered.query, "g.function(){[[[]]]}--raw-text--");
    assert!(rendered.bindings.is_empty());
}
