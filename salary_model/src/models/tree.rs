use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// A depth limited regression tree minimizing the squared error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

/// Everything a tree needs while growing.
struct Grower<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    max_depth: usize,
    nodes: Vec<Node>,
    goes_left: Vec<bool>,
}

impl RegressionTree {
    /// Grows a tree over a subset of the samples.
    ///
    /// # Arguments
    /// * `x` - The full feature matrix.
    /// * `y` - The full target.
    /// * `sorted` - For every feature, the sample rows to fit on, ordered by that
    ///   feature's value. Every list holds the same set of rows.
    /// * `rows` - That same set of rows, in any order.
    /// * `max_depth` - The maximum amount of splits from the root to any leaf.
    pub fn fit(
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        sorted: Vec<Vec<usize>>,
        rows: Vec<usize>,
        max_depth: usize,
    ) -> Self {
        let mut grower = Grower {
            x,
            y,
            max_depth,
            nodes: Vec::new(),
            goes_left: vec![false; x.nrows()],
        };

        grower.grow(rows, sorted, 0);
        Self {
            nodes: grower.nodes,
        }
    }

    /// Orders `rows` by every feature of `x`, one list per feature.
    pub fn sort_rows(x: ArrayView2<f64>, rows: &[usize]) -> Vec<Vec<usize>> {
        (0..x.ncols())
            .into_par_iter()
            .map(|f| {
                let mut order = rows.to_vec();
                order.sort_by(|&a, &b| x[(a, f)].total_cmp(&x[(b, f)]));
                order
            })
            .collect()
    }

    /// Predicts the value of a single feature row.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut at = 0;

        loop {
            match self.nodes.get(at) {
                Some(Node::Leaf { value }) => return *value,
                Some(&Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    at = if row[feature] <= threshold { left } else { right };
                }
                None => return 0.0,
            }
        }
    }
}

#[cfg(test)]
impl RegressionTree {
    fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], at: usize) -> usize {
            match nodes.get(at) {
                Some(&Node::Split { left, right, .. }) => {
                    1 + depth_of(nodes, left).max(depth_of(nodes, right))
                }
                _ => 0,
            }
        }

        depth_of(&self.nodes, 0)
    }
}

impl Grower<'_> {
    fn grow(&mut self, rows: Vec<usize>, sorted: Vec<Vec<usize>>, depth: usize) -> usize {
        let at = self.nodes.len();
        let value = self.mean(&rows);
        self.nodes.push(Node::Leaf { value });

        if depth >= self.max_depth || rows.len() < 2 {
            return at;
        }

        let Some(best) = self.best_split(&sorted) else {
            return at;
        };

        let Candidate {
            feature, threshold, ..
        } = best;

        for &r in &rows {
            self.goes_left[r] = self.x[(r, feature)] <= threshold;
        }

        let goes_left = &self.goes_left;
        let (left_rows, right_rows): (Vec<_>, Vec<_>) =
            rows.into_iter().partition(|&r| goes_left[r]);
        let (left_sorted, right_sorted): (Vec<_>, Vec<_>) = sorted
            .into_iter()
            .map(|order| order.into_iter().partition::<Vec<_>, _>(|&r| goes_left[r]))
            .unzip();

        let left = self.grow(left_rows, left_sorted, depth + 1);
        let right = self.grow(right_rows, right_sorted, depth + 1);

        self.nodes[at] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };

        at
    }

    fn mean(&self, rows: &[usize]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }

        rows.iter().map(|&r| self.y[r]).sum::<f64>() / rows.len() as f64
    }

    /// Finds the split with the largest reduction of squared error. Ties go to the
    /// lowest feature index and then to the lowest threshold.
    fn best_split(&self, sorted: &[Vec<usize>]) -> Option<Candidate> {
        let (x, y) = (self.x, self.y);

        let per_feature: Vec<Option<Candidate>> = sorted
            .par_iter()
            .enumerate()
            .map(|(feature, order)| best_threshold(x, y, feature, order))
            .collect();

        per_feature
            .into_iter()
            .flatten()
            .fold(None, |best: Option<Candidate>, c| match best {
                Some(b) if b.gain >= c.gain => Some(b),
                _ => Some(c),
            })
    }
}

fn best_threshold(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    feature: usize,
    order: &[usize],
) -> Option<Candidate> {
    let n = order.len();
    let total: f64 = order.iter().map(|&r| y[r]).sum();
    let parent = total * total / n as f64;

    let mut best: Option<Candidate> = None;
    let mut left_sum = 0.0;

    for (i, pair) in order.windows(2).enumerate() {
        let (r, next) = (pair[0], pair[1]);
        left_sum += y[r];

        let (v, next_v) = (x[(r, feature)], x[(next, feature)]);
        if v >= next_v {
            continue;
        }

        let n_left = (i + 1) as f64;
        let n_right = (n - i - 1) as f64;
        let right_sum = total - left_sum;
        let gain = left_sum * left_sum / n_left + right_sum * right_sum / n_right - parent;

        if gain > 0.0 && best.is_none_or(|b| gain > b.gain) {
            best = Some(Candidate {
                feature,
                threshold: v + (next_v - v) / 2.0,
                gain,
            });
        }
    }

    best
}
