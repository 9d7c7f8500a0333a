use voca_rs::manipulate::latinise;

/// Maximum amount of single-character edits for a label to still match
pub const DEFAULT_MAX_DISTANCE: usize = 6;

/// Approximate matcher over a fixed list of labels.
///
/// Labels and queries are compared case and accent insensitively, using the
/// Levenshtein distance. Ties go to the label that comes first.
pub struct FuzzyMatcher {
    labels: Vec<String>,
    max_distance: usize,
}

impl FuzzyMatcher {
    pub fn new<S: AsRef<str>>(labels: &[S], max_distance: usize) -> Self {
        Self {
            labels: labels.iter().map(|label| normalize(label.as_ref())).collect(),
            max_distance,
        }
    }

    /// Position of the closest label, if any is within reach
    pub fn best_match(&self, query: &str) -> Option<usize> {
        let query = normalize(query);

        if query.is_empty() {
            return None;
        }

        let mut best: Option<(usize, usize)> = None;

        for (index, label) in self.labels.iter().enumerate() {
            let distance = strsim::levenshtein(&query, label);

            if distance > self.max_distance {
                continue;
            }

            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((index, distance)),
            }

            if distance == 0 {
                break;
            }
        }

        best.map(|(index, _)| index)
    }
}

fn normalize(text: &str) -> String {
    latinise(text.trim()).to_lowercase()
}
