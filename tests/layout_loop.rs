//! Behavior of the background layout loop: progress, double-start
//! rejection, deterministic shutdown, and mutation under a running loop.

use std::{thread, time::Duration};

use nalgebra::Vector3;

use fourd::{EdgeStyle, Graph, GraphError, Settings, VertexStyle};

const TICK: Duration = Duration::from_millis(2);

fn seeded_pair() -> Graph {
    let graph = Graph::new(Settings::default());
    graph
        .add_vertex_at("a", Vector3::zeros(), VertexStyle::default())
        .unwrap();
    graph
        .add_vertex_at("b", Vector3::new(1., 0., 0.), VertexStyle::default())
        .unwrap();
    graph
}

#[test]
fn loop_moves_vertices_while_running() {
    let mut graph = seeded_pair();

    graph.start_layout(TICK).unwrap();
    thread::sleep(Duration::from_millis(50));
    graph.stop_layout();

    let a = graph.vertex_position("a").unwrap();
    let b = graph.vertex_position("b").unwrap();
    assert!(a.x < 0.);
    assert!(b.x > 1.);
}

#[test]
fn double_start_is_rejected() {
    let mut graph = seeded_pair();

    graph.start_layout(TICK).unwrap();
    assert!(graph.is_layout_running());
    assert_eq!(graph.start_layout(TICK).unwrap_err(), GraphError::LayoutRunning);

    graph.stop_layout();
    assert!(!graph.is_layout_running());
}

#[test]
fn stopped_loop_leaves_positions_untouched() {
    let mut graph = seeded_pair();

    graph.start_layout(TICK).unwrap();
    thread::sleep(Duration::from_millis(20));
    graph.stop_layout();

    let a = graph.vertex_position("a").unwrap();
    let b = graph.vertex_position("b").unwrap();
    thread::sleep(Duration::from_millis(20));

    assert_eq!(graph.vertex_position("a").unwrap(), a);
    assert_eq!(graph.vertex_position("b").unwrap(), b);
}

#[test]
fn loop_can_be_restarted_after_stop() {
    let mut graph = seeded_pair();

    graph.start_layout(TICK).unwrap();
    graph.stop_layout();

    graph.start_layout(TICK).unwrap();
    thread::sleep(Duration::from_millis(20));
    graph.stop_layout();

    assert!(graph.vertex_position("a").unwrap().x < 0.);
}

#[test]
fn mutations_interleave_with_running_loop() {
    let mut graph = Graph::new(Settings::default());
    graph.start_layout(TICK).unwrap();

    for i in 0..20 {
        graph
            .add_vertex(format!("v{i}"), VertexStyle::default())
            .unwrap();
    }
    for i in 0..19 {
        graph
            .add_edge(
                format!("e{i}"),
                format!("v{i}"),
                format!("v{}", i + 1),
                1.0,
                EdgeStyle::default(),
            )
            .unwrap();
    }
    thread::sleep(Duration::from_millis(20));
    for i in 0..10 {
        graph.remove_vertex(&format!("v{i}")).unwrap();
    }
    thread::sleep(Duration::from_millis(20));
    graph.stop_layout();

    assert_eq!(graph.vertex_count(), 10);
    // v10 lost its edge to v9 in the cascade; the chain v10..v19 remains.
    assert_eq!(graph.edge_count(), 9);
}

#[test]
fn drop_stops_the_loop() {
    let mut graph = seeded_pair();
    graph.start_layout(TICK).unwrap();
    // Dropping must join the loop thread rather than leak it.
    drop(graph);
}
