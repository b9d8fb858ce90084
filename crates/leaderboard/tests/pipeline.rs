use leaderboard::services::{pagination, projection};
use leaderboard::{
    ColumnSet, LeaderboardConfig, MAX_DURATION, NormalizeContext, Paginator, SortMode,
    group_by_competitor, normalize_all, sort_groups,
};
use serde_json::{Value, json};

fn flat_records() -> Vec<Value> {
    vec![
        json!({ "Position": 1, "Name": "Alice", "CarClass": "GT3", "Car": "Audi R8 LMS",
                "LapTime": "1m 40.000s", "TotalEntries": 3 }),
        json!({ "Position": 2, "Name": "Bob", "CarClass": "GT3", "Car": "BMW M4 GT3",
                "LapTime": "1m 41.000s, +1.000s", "TotalEntries": 3 }),
        json!({ "Position": 3, "Name": "alice", "CarClass": "GT3", "Car": "Audi R8 LMS",
                "LapTime": "DNF", "TotalEntries": 3 }),
    ]
}

fn nested_records() -> Vec<Value> {
    vec![
        json!({ "position": 1, "driver": { "Name": "Carol" },
                "car_class": { "class": { "Name": "GT4" }, "car": { "Name": "Ginetta" } },
                "lap_time": "58.201s" }),
        json!({ "driver": { "name": "Dan" }, "car_class": { "car": { "name": "KTM X-Bow" } },
                "lap_time": "59.000s, +0.799s" }),
    ]
}

#[test]
fn test_every_shape_normalizes_to_valid_entries() {
    let wrapped = json!({ "track_info": { "Name": "Zandvoort - GP" }, "data": nested_records() });
    let shapes = [
        (Value::Null, flat_records()),
        (Value::Null, nested_records()),
        (wrapped.clone(), wrapped["data"].as_array().cloned().unwrap_or_default()),
    ];

    for (document, records) in shapes {
        let context = NormalizeContext::from_document(&document, &records);
        let entries = normalize_all(&records, &context);
        assert_eq!(entries.len(), records.len());
        for entry in entries {
            assert!(entry.position >= 1);
            assert!(!entry.name.is_empty());
        }
    }
}

#[test]
fn test_nested_rows_inherit_first_row_class() {
    let records = nested_records();
    let entries = normalize_all(&records, &NormalizeContext::for_records(&records));
    assert_eq!(entries[1].car_class, "GT4");
    assert_eq!(entries[1].car, "KTM X-Bow");
    assert_eq!(entries[1].position, 2);
    assert_eq!(entries[1].gap_millis, 799);
}

#[test]
fn test_group_sort_project_paginate() {
    let records = flat_records();
    let entries = normalize_all(&records, &NormalizeContext::for_records(&records));
    assert_eq!(entries[2].lap_time_millis, MAX_DURATION);

    let mut groups = group_by_competitor(entries);
    sort_groups(&mut groups, SortMode::Gap);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "alice");
    assert_eq!(groups[0].entries[0].lap_time_raw, "1m 40.000s");
    assert_eq!(groups[0].entries[1].lap_time_raw, "DNF");

    let config = LeaderboardConfig::default().with_page_size(1);
    let mut pager = Paginator::new(config.page_size).unwrap();
    pager.set_data(groups);
    assert_eq!(pager.total_pages(), 2);
    assert_eq!(pager.find_page_for(|g| g.key == "bob"), 2);

    let page = pager.get_page(2, config.page_size);
    let bob = &page.items[0].entries[0];

    let keys = bob.populated_keys();
    let columns = config.columns.project(&keys);
    let cells: Vec<_> = columns
        .iter()
        .map(|column| projection::format_cell(column, bob))
        .collect();
    let headers: Vec<_> = columns.iter().map(|c| c.display_name).collect();

    assert_eq!(headers, vec!["Car class", "Car", "Position", "Laptime", "Lap %"]);
    assert_eq!(cells, vec!["GT3", "BMW M4 GT3", "2 / 3", "1:41:000s +1:000s", "101.0%"]);
}

#[test]
fn test_empty_input_is_tolerated() {
    let entries = normalize_all(&[], &NormalizeContext::default());
    assert!(entries.is_empty());

    let page = pagination::paginate(&entries, 1, 100);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.index, 1);

    let columns = ColumnSet::standard();
    let projected = columns.project::<&str>(&[]);
    assert!(projected.iter().all(|c| c.synthetic));
}
