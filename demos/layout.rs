//! Headless hosting demo: a small ring graph laid out for two seconds,
//! with positions printed as a renderer would poll them.

use std::{thread, time::Duration};

use fourd::{EdgeStyle, Graph, Settings, VertexStyle};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut graph = Graph::new(Settings::default());

    const N: usize = 8;
    for i in 0..N {
        graph
            .add_vertex(format!("v{i}"), VertexStyle::default())
            .expect("fresh vertex id");
    }
    for i in 0..N {
        graph
            .add_edge(
                format!("e{i}"),
                format!("v{i}"),
                format!("v{}", (i + 1) % N),
                1.0,
                EdgeStyle::default(),
            )
            .expect("fresh edge id with existing endpoints");
    }

    graph
        .start_layout(Duration::from_millis(30))
        .expect("loop not yet running");

    for _ in 0..4 {
        thread::sleep(Duration::from_millis(500));
        for (id, position) in graph.positions() {
            println!("{id}: ({:+.3}, {:+.3}, {:+.3})", position.x, position.y, position.z);
        }
        println!();
    }

    graph.stop_layout();
}
