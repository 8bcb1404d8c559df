use crate::pso::Bound;
use serde::Serialize;
use std::fmt;

pub const METRIC_COUNT: usize = 5;

/// The repository-quality metrics every data record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    UniqueContributorsCount,
    MedianContributionsPerContributor,
    MeanContributionsPerContributor,
    AverageWeeklyCommits,
    CommitConsistency,
}

impl MetricField {
    /// Fixed dimension order of the search space.
    pub const ALL: [MetricField; METRIC_COUNT] = [
        MetricField::UniqueContributorsCount,
        MetricField::MedianContributionsPerContributor,
        MetricField::MeanContributionsPerContributor,
        MetricField::AverageWeeklyCommits,
        MetricField::CommitConsistency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricField::UniqueContributorsCount => "unique_contributors_count",
            MetricField::MedianContributionsPerContributor => {
                "median_contributions_per_contributor"
            }
            MetricField::MeanContributionsPerContributor => "mean_contributions_per_contributor",
            MetricField::AverageWeeklyCommits => "average_weekly_commits",
            MetricField::CommitConsistency => "commit_consistency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    pub unique_contributors_count: f64,
    pub median_contributions_per_contributor: f64,
    pub mean_contributions_per_contributor: f64,
    pub average_weekly_commits: f64,
    pub commit_consistency: f64,
}

impl MetricRecord {
    pub fn from_values(values: [f64; METRIC_COUNT]) -> Self {
        Self {
            unique_contributors_count: values[0],
            median_contributions_per_contributor: values[1],
            mean_contributions_per_contributor: values[2],
            average_weekly_commits: values[3],
            commit_consistency: values[4],
        }
    }

    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::UniqueContributorsCount => self.unique_contributors_count,
            MetricField::MedianContributionsPerContributor => {
                self.median_contributions_per_contributor
            }
            MetricField::MeanContributionsPerContributor => self.mean_contributions_per_contributor,
            MetricField::AverageWeeklyCommits => self.average_weekly_commits,
            MetricField::CommitConsistency => self.commit_consistency,
        }
    }

    #[cfg(test)]
    pub fn to_vec(&self) -> Vec<f64> {
        MetricField::ALL
            .iter()
            .map(|field| self.get(*field))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-field (min, max) across a dataset, indexed in [`MetricField::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRanges {
    ranges: [MetricRange; METRIC_COUNT],
}

impl MetricRanges {
    pub fn new(ranges: [MetricRange; METRIC_COUNT]) -> Self {
        Self { ranges }
    }

    pub fn get(&self, field: MetricField) -> MetricRange {
        self.ranges[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricField, MetricRange)> + '_ {
        MetricField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    pub fn to_bounds(&self) -> Vec<Bound> {
        self.ranges
            .iter()
            .map(|range| Bound::new(range.min, range.max))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_indices() {
        for (position, field) in MetricField::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
        }
    }

    #[test]
    fn from_name_round_trips_known_fields() {
        assert_eq!(
            MetricField::from_name("commit_consistency"),
            Some(MetricField::CommitConsistency)
        );
        assert_eq!(MetricField::from_name("stars"), None);
    }

    #[test]
    fn record_vector_follows_field_order() {
        let record = MetricRecord::from_values([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(record.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(record.get(MetricField::AverageWeeklyCommits), 4.0);
    }
}
