//! Shortest-path search over the distance matrix.
//!
//! Classic O(N²) Dijkstra: with at most 26 stations a linear scan for the
//! closest unsettled station is cheaper than a heap.

use tracing::trace;

use crate::domain::{DistanceMatrix, Path, Station};

/// Find the shortest path from `start` to `end`.
///
/// Returns `None` when `end` cannot be reached from `start`, or when either
/// station is not part of the network. When several unsettled stations are
/// equally close, the one with the lowest index is settled first, so results
/// are deterministic under ties.
///
/// `start == end` yields a single-station path.
pub fn find_shortest_path(matrix: &DistanceMatrix, start: Station, end: Station) -> Option<Path> {
    if !matrix.contains(start) || !matrix.contains(end) {
        return None;
    }

    let n = matrix.len();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut prev: Vec<Option<Station>> = vec![None; n];
    let mut settled = vec![false; n];
    dist[start.index()] = Some(0);

    for round in 0..n {
        let Some((u, du)) = closest_unsettled(&dist, &settled) else {
            trace!(round, "no reachable station left");
            break;
        };
        settled[u.index()] = true;
        trace!(round, station = %u, distance = du, "settled station");

        for (v, weight) in matrix.neighbours(u) {
            if settled[v.index()] {
                continue;
            }
            let candidate = du + u64::from(weight);
            if dist[v.index()].is_none_or(|d| candidate < d) {
                dist[v.index()] = Some(candidate);
                prev[v.index()] = Some(u);
            }
        }
    }

    // Walk back from the destination; an unreached station has no predecessor
    let mut stations = vec![end];
    let mut at = end;
    while at != start {
        at = prev[at.index()]?;
        stations.push(at);
    }
    stations.reverse();
    Path::new(stations)
}

/// The closest station not yet settled, lowest index first on ties.
fn closest_unsettled(dist: &[Option<u64>], settled: &[bool]) -> Option<(Station, u64)> {
    dist.iter()
        .zip(settled)
        .enumerate()
        .filter(|(_, (_, done))| !**done)
        .filter_map(|(i, (d, _))| Some((i, (*d)?)))
        // min_by_key keeps the first of equal minima
        .min_by_key(|&(_, d)| d)
        .and_then(|(i, d)| Some((Station::from_index(i).ok()?, d)))
}
