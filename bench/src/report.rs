use std::io::Write;
use std::time::{Duration, Instant};

use influence_core::ScoreTable;

/// Run `action`, then write `"{description} Execution Time: {ms} ms"`.
///
/// The closure gets the same writer so anything it renders is included in
/// the timed section.
pub fn measure<W, T, F>(out: &mut W, description: &str, action: F) -> anyhow::Result<(T, Duration)>
where
    W: Write,
    F: FnOnce(&mut W) -> anyhow::Result<T>,
{
    let t = Instant::now();
    let value = action(out)?;
    let elapsed = t.elapsed();
    writeln!(
        out,
        "{} Execution Time: {} ms",
        description,
        elapsed.as_millis()
    )?;
    Ok((value, elapsed))
}

/// Write one line per node, five decimal places.
///
/// `top == 0` lists every node in ascending id order; otherwise the `top`
/// highest-scoring nodes are listed, best first.
pub fn render_scores<W: Write>(out: &mut W, scores: &ScoreTable, top: usize) -> std::io::Result<()> {
    if top == 0 {
        for (id, score) in scores.iter() {
            writeln!(out, "Node {}: Influence Score = {:.5}", id, score)?;
        }
    } else {
        for (id, score) in scores.ranked(top) {
            writeln!(out, "Node {}: Influence Score = {:.5}", id, score)?;
        }
    }
    Ok(())
}
