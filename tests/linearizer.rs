//! Tests for ordering action blocks under both linearization policies.
mod common;
use botforge::linearizer::vertical_order;
use botforge::prelude::*;
use common::*;

fn ids(blocks: &[&Block]) -> Vec<String> {
    blocks.iter().map(|b| b.id.clone()).collect()
}

#[test]
fn test_vertical_order_sorts_by_y() {
    let canvas = Canvas::new(
        vec![
            block("low", "action_log", 300.0),
            slash_command("t1", "ping", 500.0),
            block("high", "action_log", -10.0),
            block("mid", "action_log", 120.5),
        ],
        vec![],
    );
    let trigger = canvas.block("t1").unwrap();
    let ordered = FlowLinearizer::default().linearize(&canvas, trigger);
    assert_eq!(ids(&ordered), vec!["high", "mid", "low"]);
}

#[test]
fn test_vertical_order_is_stable_for_equal_y() {
    let canvas = Canvas::new(
        vec![
            block("b", "action_log", 100.0),
            block("a", "action_log", 100.0),
            block("c", "action_log", 50.0),
        ],
        vec![],
    );
    assert_eq!(ids(&vertical_order(&canvas)), vec!["c", "b", "a"]);
}

#[test]
fn test_vertical_order_ignores_connections_and_shares_list() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "one", 0.0),
            slash_command("t2", "two", 0.0),
            block("a", "action_log", 10.0),
            block("b", "action_log", 20.0),
        ],
        chain(&["t1", "a"]),
    );
    let linearizer = FlowLinearizer::new(LinearizationPolicy::VerticalPosition);
    let first = linearizer.linearize(&canvas, canvas.block("t1").unwrap());
    let second = linearizer.linearize(&canvas, canvas.block("t2").unwrap());
    assert_eq!(ids(&first), vec!["a", "b"]);
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_no_actions_gives_empty_sequence() {
    let canvas = Canvas::new(vec![slash_command("t1", "ping", 0.0)], vec![]);
    let ordered = FlowLinearizer::default().linearize(&canvas, canvas.block("t1").unwrap());
    assert!(ordered.is_empty());
}

#[test]
fn test_traversal_follows_only_reachable_blocks() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "one", 0.0),
            slash_command("t2", "two", 0.0),
            block("a", "action_log", 300.0),
            block("b", "action_log", 100.0),
            block("other", "action_log", 0.0),
        ],
        vec![
            Connection::new("e1", "t1", "a"),
            Connection::new("e2", "a", "b"),
            Connection::new("e3", "t2", "other"),
        ],
    );
    let linearizer = FlowLinearizer::new(LinearizationPolicy::ConnectionTraversal);
    assert_eq!(linearizer.policy(), LinearizationPolicy::ConnectionTraversal);

    let first = linearizer.linearize(&canvas, canvas.block("t1").unwrap());
    assert_eq!(ids(&first), vec!["a", "b"]);

    let second = linearizer.linearize(&canvas, canvas.block("t2").unwrap());
    assert_eq!(ids(&second), vec!["other"]);
}

#[test]
fn test_traversal_orders_branches_by_y_depth_first() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            block("cond", "condition_has_role", 50.0),
            block("lower", "action_log", 200.0),
            block("upper", "action_log", 100.0),
            block("after_upper", "action_log", 300.0),
        ],
        vec![
            Connection::new("e1", "t1", "cond"),
            Connection::new("e2", "cond", "lower").from_handle("false"),
            Connection::new("e3", "cond", "upper").from_handle("true"),
            Connection::new("e4", "upper", "after_upper"),
        ],
    );
    let linearizer = FlowLinearizer::new(LinearizationPolicy::ConnectionTraversal);
    let ordered = linearizer.linearize(&canvas, canvas.block("t1").unwrap());
    assert_eq!(ids(&ordered), vec!["cond", "upper", "after_upper", "lower"]);
}

#[test]
fn test_traversal_terminates_on_cycles_and_skips_triggers() {
    let canvas = Canvas::new(
        vec![
            slash_command("t1", "ping", 0.0),
            slash_command("t2", "pong", 0.0),
            block("a", "action_log", 100.0),
            block("b", "action_log", 200.0),
        ],
        vec![
            Connection::new("e1", "t1", "a"),
            Connection::new("e2", "a", "b"),
            Connection::new("e3", "b", "a"),
            Connection::new("e4", "b", "b"),
            Connection::new("e5", "b", "t2"),
            Connection::new("e6", "a", "missing"),
        ],
    );
    let linearizer = FlowLinearizer::new(LinearizationPolicy::ConnectionTraversal);
    let ordered = linearizer.linearize(&canvas, canvas.block("t1").unwrap());
    assert_eq!(ids(&ordered), vec!["a", "b"]);
}
