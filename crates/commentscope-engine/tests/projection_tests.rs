use commentscope_engine::*;
use commentscope_types::{AnalysisReport, Category, TemporalPoint};

#[test]
fn test_series_projections_preserve_order() {
    let temporal = vec![
        TemporalPoint::new("Q1", 1250, 1250),
        TemporalPoint::new("Q2", 2890, 1640),
    ];

    assert_eq!(
        to_cumulative_series(&temporal),
        vec![SeriesPoint::new("Q1", 1250), SeriesPoint::new("Q2", 2890)]
    );
    assert_eq!(
        to_increment_series(&temporal),
        vec![SeriesPoint::new("Q1", 1250), SeriesPoint::new("Q2", 1640)]
    );
}

#[test]
fn test_category_distribution_is_not_resorted() {
    let categories = vec![Category::new("A", 60.0, 6), Category::new("B", 40.0, 4)];

    assert_eq!(
        to_category_distribution(&categories),
        vec![
            CategorySlice {
                label: "A".to_string(),
                value: 60.0,
                count: 6
            },
            CategorySlice {
                label: "B".to_string(),
                value: 40.0,
                count: 4
            },
        ]
    );

    let reversed = vec![Category::new("B", 40.0, 4), Category::new("A", 60.0, 6)];
    let labels: Vec<_> = to_category_distribution(&reversed)
        .into_iter()
        .map(|slice| slice.label)
        .collect();
    assert_eq!(labels, vec!["B", "A"]);
}

#[test]
fn test_sample_report_projections() {
    let report = AnalysisReport::sample();

    let cumulative = to_cumulative_series(&report.temporal_data);
    assert_eq!(cumulative.len(), report.temporal_data.len());
    assert_eq!(cumulative.first(), Some(&SeriesPoint::new("2022 Q2", 1250)));
    assert_eq!(cumulative.last(), Some(&SeriesPoint::new("2024 Q1", 8547)));

    let increments: u64 = to_increment_series(&report.temporal_data)
        .iter()
        .map(|point| point.y)
        .sum();
    assert_eq!(increments, report.total_comments());

    let slices = to_category_distribution(&report.categories);
    let percent: f64 = slices.iter().map(|slice| slice.value).sum();
    assert!((percent - 100.0).abs() < 1e-9);
}

#[test]
fn test_projections_do_not_mutate_report() {
    let report = AnalysisReport::sample();
    let before = report.clone();

    let _ = to_category_distribution(&report.categories);
    let _ = to_cumulative_series(&report.temporal_data);
    let _ = to_increment_series(&report.temporal_data);

    assert_eq!(report, before);
}
