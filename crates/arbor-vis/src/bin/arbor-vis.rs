//! Arbor Vis binary
//!
//! Plays one algorithm over a sample structure and prints every delivery as
//! a JSON line.
//!
//! ```text
//! arbor-vis <algorithm> [interval-ms]
//! ```

use std::time::Duration;

use arbor_vis::{
    Algorithm, BinarySearchTree, Delivery, Graph, NodeId, Outcome, PlaybackConfig, Session,
    StructureKind, Visualize,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn sample_tree() -> BinarySearchTree<i64> {
    BinarySearchTree::from_values([5, 3, 8, 1, 4])
}

/// A, B, C, D with a cheap detour A-B-C around the direct A-C edge.
fn sample_graph() -> Result<(Graph, NodeId), arbor_vis::Error> {
    let mut graph = Graph::new();
    let a = graph.add_node("A");
    let b = graph.add_node("B");
    let c = graph.add_node("C");
    let d = graph.add_node("D");
    graph.add_edge(a, b, Some(1.0))?;
    graph.add_edge(b, c, Some(2.0))?;
    graph.add_edge(a, c, Some(4.0))?;
    graph.add_edge(c, d, Some(1.0))?;
    Ok((graph, d))
}

fn print_delivery(delivery: Delivery<'_>) {
    let line = match delivery {
        Delivery::Frame { index, frame } => json!({
            "event": "frame",
            "index": index,
            "visit": frame.visit,
            "highlight": frame.highlight,
        }),
        Delivery::Cleared(outcome) => json!({ "event": "cleared", "outcome": outcome }),
    };
    println!("{line}");
}

async fn play<S: Visualize>(
    session: Session<S>,
    algorithm: Algorithm,
    end: Option<NodeId>,
) -> Result<Outcome, arbor_vis::Error> {
    let run = session.run(algorithm, None, end, print_delivery)?;

    let sequencer = session.sequencer().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            sequencer.cancel();
        }
    });

    Ok(run.play().await)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbor_vis=info,arbor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let algorithm: Algorithm = args.next().as_deref().unwrap_or("inorder").parse()?;
    let mut config = PlaybackConfig::default();
    if let Some(ms) = args.next() {
        config = config.with_interval(Duration::from_millis(ms.parse()?));
    }

    tracing::info!(%algorithm, "Starting playback");

    let outcome = match algorithm.structure() {
        StructureKind::Tree => {
            play(Session::with_config(sample_tree(), config), algorithm, None).await?
        }
        StructureKind::Graph => {
            let (graph, end) = sample_graph()?;
            play(Session::with_config(graph, config), algorithm, Some(end)).await?
        }
    };

    tracing::info!(delivered = outcome.delivered(), "Playback finished");
    Ok(())
}
