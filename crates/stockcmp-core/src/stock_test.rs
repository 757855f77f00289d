use super::*;

fn catalog(part: &str, size_description: &str) -> CatalogRecord {
    CatalogRecord {
        design_id: "1573".to_owned(),
        design_name: "DESIGNER WHITE".to_owned(),
        vend_part_number: part.to_owned(),
        grade: "HGS".to_owned(),
        product_type: "STANDARD".to_owned(),
        finish_id: "60".to_owned(),
        finish: "MATTE".to_owned(),
        size_description: size_description.to_owned(),
    }
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// -----------------------------------------------------------------------
// parse_stock_status
// -----------------------------------------------------------------------

#[test]
fn parses_four_field_response() {
    let rec = parse_stock_status("1573K6012", "12~4~0~2024-05-01,2024-06-15\n").unwrap();
    assert_eq!(rec.vend_part_number, "1573K6012");
    assert_eq!(rec.current_availability, Some(12.0));
    assert_eq!(rec.on_order, Some(4.0));
    assert_eq!(rec.backorder, Some(0.0));
    assert_eq!(rec.arrival_dates, vec![date(2024, 5, 1), date(2024, 6, 15)]);
}

#[test]
fn missing_arrival_field_is_single_null_slot() {
    let rec = parse_stock_status("1573K6012", "0~0~0").unwrap();
    assert_eq!(rec.arrival_dates, vec![None]);
}

#[test]
fn literal_none_arrival_field_is_single_null_slot() {
    let rec = parse_stock_status("1573K6012", "0~0~0~None").unwrap();
    assert_eq!(rec.arrival_dates, vec![None]);
    assert!(rec.arrival_dates.iter().all(Option::is_none));
}

#[test]
fn unparsable_date_keeps_its_position() {
    let rec = parse_stock_status("1573K6012", "0~0~0~soon,05/01/2024,TBD").unwrap();
    assert_eq!(rec.arrival_dates, vec![None, date(2024, 5, 1), None]);
}

#[test]
fn non_numeric_quantity_is_none() {
    let rec = parse_stock_status("1573K6012", "n/a~~3").unwrap();
    assert_eq!(rec.current_availability, None);
    assert_eq!(rec.on_order, None);
    assert_eq!(rec.backorder, Some(3.0));
}

#[test]
fn too_few_fields_is_malformed() {
    let err = parse_stock_status("1573K6012", "12~4").unwrap_err();
    assert!(matches!(
        err,
        CoreError::MalformedStockStatus { ref part_number, fields: 2 } if part_number == "1573K6012"
    ));
}

#[test]
fn quantity_rejects_nan() {
    assert_eq!(parse_quantity("NaN"), None);
    assert_eq!(parse_quantity(" 7.5 "), Some(7.5));
}

#[test]
fn arrival_dates_accept_datetime_suffix() {
    assert_eq!(
        parse_arrival_dates("2024-05-01 00:00:00"),
        vec![date(2024, 5, 1)]
    );
}

#[test]
fn arrival_dates_accept_time_on_every_date_form() {
    let cases = [
        "05/01/2024 10:00:00",
        "5/1/2024 12:00:00 AM",
        "2024-05-01T10:00:00.000",
        "2024-05-01T10:00",
        "2024/05/01 10:00:00",
        "05/01/24 4:30 PM",
    ];
    for case in cases {
        assert_eq!(parse_arrival_dates(case), vec![date(2024, 5, 1)], "{case}");
    }
}

#[test]
fn two_digit_year_is_this_century() {
    assert_eq!(parse_arrival_dates("05/01/24"), vec![date(2024, 5, 1)]);
    assert_eq!(parse_arrival_dates("05/01/2024"), vec![date(2024, 5, 1)]);
}

#[test]
fn short_iso_year_and_bad_time_are_null() {
    assert_eq!(parse_arrival_dates("24-05-01"), vec![None]);
    assert_eq!(parse_arrival_dates("2024-05-01 later"), vec![None]);
    assert_eq!(parse_arrival_dates("2024-05-01T"), vec![None]);
}

#[test]
fn arrival_with_time_counts_as_supply() {
    let stock = [parse_stock_status("1573K6012", "0~0~0~05/01/2024 10:00:00").unwrap()];
    let (table, both) = crate::compare::reconcile(
        vec![catalog("1573K6012", "48 X 96")],
        vec![catalog("1573K6012", "48 X 96")],
        &stock,
        &[],
    );
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert!(row.available_la);
    assert!(!row.available_sa);
    assert_eq!(row.status, crate::compare::AvailabilityStatus::LaOnly);
    assert!(both.rows.is_empty());
}

// -----------------------------------------------------------------------
// join_stock
// -----------------------------------------------------------------------

#[test]
fn join_attaches_stock_and_derives_keys() {
    let stock = vec![parse_stock_status("1573K6012", "5~0~0~None").unwrap()];
    let joined = join_stock(vec![catalog("1573K6012", "48X96")], &stock);
    assert_eq!(joined.len(), 1);
    let rec = &joined[0];
    assert_eq!(rec.catalog.size_description, "48 X 96");
    assert_eq!(rec.size.as_deref(), Some("C1"));
    assert_eq!(rec.part_number, "1573-HGS-60C1");
    assert_eq!(rec.current_availability, Some(5.0));
    assert_eq!(rec.availability(), 5.0);
}

#[test]
fn join_keeps_catalog_rows_without_stock() {
    let joined = join_stock(vec![catalog("1573K6012", "48 X 96")], &[]);
    assert_eq!(joined.len(), 1);
    let rec = &joined[0];
    assert_eq!(rec.current_availability, None);
    assert_eq!(rec.on_order, None);
    assert!(rec.arrival_dates.is_empty());
    assert_eq!(rec.availability(), 0.0);
}

#[test]
fn join_unknown_size_leaves_size_empty() {
    let joined = join_stock(vec![catalog("1573K6012", "99 X 99")], &[]);
    assert_eq!(joined[0].size, None);
    assert_eq!(joined[0].part_number, "1573-HGS-60");
}

#[test]
fn join_first_stock_answer_wins() {
    let stock = vec![
        parse_stock_status("1573K6012", "5~0~0").unwrap(),
        parse_stock_status("1573K6012", "9~0~0").unwrap(),
    ];
    let joined = join_stock(vec![catalog("1573K6012", "48 X 96")], &stock);
    assert_eq!(joined[0].current_availability, Some(5.0));
}

#[test]
fn merge_key_uses_five_fields() {
    let joined = join_stock(vec![catalog("1573K6012", "48 X 96")], &[]);
    let key = joined[0].merge_key();
    assert_eq!(key.vend_part_number, "1573K6012");
    assert_eq!(key.part_number, "1573-HGS-60C1");
    assert_eq!(key.design_id, "1573");
    assert_eq!(key.finish_id, "60");
    assert_eq!(key.grade, "HGS");
}

#[test]
fn reconciled_record_round_trips_through_json() {
    let stock = vec![parse_stock_status("1573K6012", "5~0~0~2024-05-01,bad").unwrap()];
    let joined = join_stock(vec![catalog("1573K6012", "48 X 96")], &stock);
    let json = serde_json::to_string(&joined[0]).unwrap();
    assert!(json.contains("\"DesignID\":\"1573\""));
    let back: ReconciledRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, joined[0]);
}
