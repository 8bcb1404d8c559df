use crate::error::{Result, SwarmError};
use crate::types::metrics::{MetricField, MetricRecord, METRIC_COUNT};
use serde_json::Value;

/// Projects every raw record onto the five metric fields; extra keys are ignored.
pub fn get_metrics(records: &[Value]) -> Result<Vec<MetricRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| extract_record(index, record))
        .collect()
}

fn extract_record(index: usize, record: &Value) -> Result<MetricRecord> {
    let object = record.as_object().ok_or_else(|| SwarmError::InvalidRecord {
        index,
        field: "<record>".to_string(),
        reason: "is not a JSON object".to_string(),
    })?;

    let mut values = [0.0; METRIC_COUNT];
    for field in MetricField::ALL {
        let value = object
            .get(field.as_str())
            .ok_or_else(|| SwarmError::InvalidRecord {
                index,
                field: field.to_string(),
                reason: "is missing".to_string(),
            })?;
        values[field.index()] = value.as_f64().ok_or_else(|| SwarmError::InvalidRecord {
            index,
            field: field.to_string(),
            reason: format!("is not a number ({value})"),
        })?;
    }

    Ok(MetricRecord::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "name": "sample/repo",
            "unique_contributors_count": 12,
            "median_contributions_per_contributor": 3.5,
            "mean_contributions_per_contributor": 7.25,
            "average_weekly_commits": 4.0,
            "commit_consistency": 0.8
        })
    }

    #[test]
    fn single_record_maps_to_the_five_fields() {
        let metrics = get_metrics(&[full_record()]).expect("record should extract");
        assert_eq!(
            metrics,
            vec![MetricRecord {
                unique_contributors_count: 12.0,
                median_contributions_per_contributor: 3.5,
                mean_contributions_per_contributor: 7.25,
                average_weekly_commits: 4.0,
                commit_consistency: 0.8,
            }]
        );
    }

    #[test]
    fn empty_input_yields_empty_metrics() {
        assert!(get_metrics(&[]).expect("empty is fine").is_empty());
    }

    #[test]
    fn missing_field_names_record_and_field() {
        let mut record = full_record();
        record
            .as_object_mut()
            .expect("record is an object")
            .remove("commit_consistency");

        let err = get_metrics(&[full_record(), record]).expect_err("missing field should fail");
        assert_eq!(
            err.to_string(),
            "record 1: field `commit_consistency` is missing"
        );
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let mut record = full_record();
        record["average_weekly_commits"] = json!("often");

        let err = get_metrics(&[record]).expect_err("string metric should fail");
        assert!(err.to_string().contains("`average_weekly_commits` is not a number"));
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = get_metrics(&[json!(42)]).expect_err("number record should fail");
        assert!(matches!(err, SwarmError::InvalidRecord { index: 0, .. }));
    }
}
