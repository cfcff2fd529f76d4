use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    AffineTransform, Config, Point, TextualError, compute_affine_transform_with_config,
};

use super::Problem;

/// A solved textual problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The best-fit transform.
    pub transform: AffineTransform,
    /// How far each correspondence's mapped source lands from its target, by label.
    pub residuals: IndexMap<String, f64>,
    /// Each `# apply` point after transforming, by label.
    pub mapped: IndexMap<String, Point>,
}

impl Outcome {
    /// Largest correspondence residual.
    pub fn max_residual(&self) -> f64 {
        self.residuals.values().copied().fold(0.0, libm::fmax)
    }
}

impl Problem {
    /// Fit the transform with the default config.
    pub fn solve(&self) -> Result<Outcome, TextualError> {
        self.solve_with_config(Config::default())
    }

    /// Fit the transform, then map every `# apply` point through it.
    pub fn solve_with_config(&self, config: Config) -> Result<Outcome, TextualError> {
        let mut seen = HashSet::new();
        let all_labels = self
            .correspondences
            .iter()
            .map(|c| &c.label)
            .chain(self.queries.iter().map(|q| &q.label));
        for label in all_labels {
            if !seen.insert(label) {
                return Err(TextualError::DuplicateLabel {
                    label: label.as_str().to_owned(),
                });
            }
        }

        let [c0, c1, c2, c3] = self.correspondences.as_slice() else {
            return Err(TextualError::WrongNumberOfCorrespondences {
                found: self.correspondences.len(),
            });
        };
        let source = [c0.from, c1.from, c2.from, c3.from];
        let target = [c0.to, c1.to, c2.to, c3.to];
        let transform = compute_affine_transform_with_config(source, target, config)?;

        let residuals = self
            .correspondences
            .iter()
            .zip(transform.residuals(source, target))
            .map(|(c, r)| (c.label.as_str().to_owned(), r))
            .collect();
        let mapped = self
            .queries
            .iter()
            .map(|q| (q.label.as_str().to_owned(), transform.apply(q.point)))
            .collect();
        Ok(Outcome {
            transform,
            residuals,
            mapped,
        })
    }
}
