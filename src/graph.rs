// src/graph.rs
//
// Decision-vector encoding of undirected simple graphs.
//
// A construction on n labeled vertices is described by a binary decision
// vector with one entry per unordered vertex pair, enumerated in canonical
// order: for i in 0..n, for j in i+1..n. The decoded graph is always
// recomputed from the vector on demand, so the vector and the graph can
// never drift apart.

/// Number of unordered vertex pairs on `n` vertices, i.e. the length of the
/// decision vector.
pub fn decision_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Canonical index of the unordered pair `(i, j)`, `i < j`, on `n` vertices.
///
/// Bijection between unordered pairs and `[0, decision_count(n))`.
pub fn pair_index(i: usize, j: usize, n: usize) -> usize {
    debug_assert!(i < j && j < n);
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Undirected simple graph on vertices `{0, .., n-1}`.
///
/// Built from a decision vector via [`Graph::from_decisions`]; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Decode a (possibly partial) decision vector into a graph.
    ///
    /// An entry equal to 1 at the canonical index of `(i, j)` places an edge
    /// between `i` and `j`. Entries beyond the end of `decisions` count as
    /// absent edges, so a partial vector decodes as if every undecided slot
    /// were 0.
    pub fn from_decisions(n: usize, decisions: &[u8]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        let mut edge_count = 0;
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if decisions.get(k).copied().unwrap_or(0) == 1 {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                    edge_count += 1;
                }
                k += 1;
            }
        }
        Self {
            n,
            adjacency,
            edge_count,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency.get(i).is_some_and(|nbrs| nbrs.contains(&j))
    }

    /// Edge list in canonical pair order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (i, nbrs) in self.adjacency.iter().enumerate() {
            for &j in nbrs {
                if i < j {
                    out.push((i, j));
                }
            }
        }
        out
    }

    /// Whether every vertex is reachable from vertex 0.
    ///
    /// A graph with isolated vertices is never connected, so sparse partial
    /// constructions routinely fail this check.
    pub fn is_connected(&self) -> bool {
        if self.n == 0 {
            return true;
        }
        let mut seen = vec![false; self.n];
        let mut stack = vec![0usize];
        seen[0] = true;
        let mut count = 1;
        while let Some(v) = stack.pop() {
            for &w in &self.adjacency[v] {
                if !seen[w] {
                    seen[w] = true;
                    count += 1;
                    stack.push(w);
                }
            }
        }
        count == self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_count() {
        assert_eq!(decision_count(2), 1);
        assert_eq!(decision_count(3), 3);
        assert_eq!(decision_count(4), 6);
        assert_eq!(decision_count(10), 45);
    }

    #[test]
    fn test_pair_index_is_a_bijection() {
        for n in 2..=12 {
            let mut seen = vec![false; decision_count(n)];
            for i in 0..n {
                for j in (i + 1)..n {
                    let k = pair_index(i, j, n);
                    assert!(k < seen.len(), "index out of range for ({i},{j}) n={n}");
                    assert!(!seen[k], "duplicate index {k} for ({i},{j}) n={n}");
                    seen[k] = true;
                }
            }
            assert!(seen.iter().all(|&v| v), "not surjective for n={n}");
        }
    }

    #[test]
    fn test_pair_index_matches_enumeration_order() {
        // n=3 pairs in order: (0,1), (0,2), (1,2)
        assert_eq!(pair_index(0, 1, 3), 0);
        assert_eq!(pair_index(0, 2, 3), 1);
        assert_eq!(pair_index(1, 2, 3), 2);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let decisions = [1, 0, 1, 1, 0, 0];
        let g1 = Graph::from_decisions(4, &decisions);
        let g2 = Graph::from_decisions(4, &decisions);
        assert_eq!(g1, g2);
        assert_eq!(g1.edges(), vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_decode_treats_missing_entries_as_absent_edges() {
        let full = Graph::from_decisions(4, &[1, 0, 0, 0, 0, 0]);
        let partial = Graph::from_decisions(4, &[1]);
        assert_eq!(full, partial);
        assert_eq!(partial.edge_count(), 1);
    }

    #[test]
    fn test_has_edge_and_degree() {
        let g = Graph::from_decisions(3, &[1, 1, 0]);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert!(!g.has_edge(1, 2));
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.degree(2), 1);
    }

    #[test]
    fn test_empty_graph_is_disconnected() {
        let g = Graph::from_decisions(3, &[0, 0, 0]);
        assert!(!g.is_connected());
    }

    #[test]
    fn test_path_graph_is_connected() {
        // Edges (0,1) and (0,2): a path through vertex 0.
        let g = Graph::from_decisions(3, &[1, 1, 0]);
        assert!(g.is_connected());
    }

    #[test]
    fn test_isolated_vertex_breaks_connectivity() {
        // Edge (0,1) only; vertex 2 is isolated.
        let g = Graph::from_decisions(3, &[1, 0, 0]);
        assert!(!g.is_connected());
    }

    #[test]
    fn test_complete_graph_is_connected() {
        let n = 5;
        let decisions = vec![1u8; decision_count(n)];
        let g = Graph::from_decisions(n, &decisions);
        assert!(g.is_connected());
        assert_eq!(g.edge_count(), decision_count(n));
    }
}
