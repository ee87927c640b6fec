use serde::Serialize;

/// A scored item waiting to be ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub id: String,
    pub label: String,
    pub score: f64,
}

impl Scored {
    pub fn new(id: &str, label: &str, score: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: String,
    pub label: String,
    pub score: f64,
    pub rank: usize, // 1-based position
}

/// Sort descending by score. Equal scores keep their input order.
pub fn rank(items: &[Scored]) -> Vec<RankedEntry> {
    let mut sorted: Vec<&Scored> = items.iter().collect();
    // slice::sort_by is stable. Adding +0 folds -0 into 0 so they tie.
    sorted.sort_by(|a, b| (b.score + 0.0).total_cmp(&(a.score + 0.0)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, item)| RankedEntry {
            id: item.id.clone(),
            label: item.label.clone(),
            score: item.score,
            rank: i + 1,
        })
        .collect()
}

/// Join the ids of the top `n` entries, e.g. the Holland code "ISE".
pub fn top_code(ranking: &[RankedEntry], n: usize) -> String {
    ranking.iter().take(n).map(|e| e.id.as_str()).collect()
}
