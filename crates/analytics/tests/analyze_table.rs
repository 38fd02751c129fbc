use analytics::{InventorySummary, PerformanceAnalyzer, AnalyticsError, micos, stockout_risks};
use configuration::{ColumnMap, IngestSettings, RowOrder};
use core_types::{AbcClass, CoreError, StrategicStatus};
use dataset::{DatasetError, SheetLayout, load_table, write_enriched};
use rust_decimal_macros::dec;

const SNAPSHOT: &str = "\
reference,net_revenue,avg_net_quantity_sold,margin_percent,cogs_sold,stock_quantity,stock_cost_value,brand
TEN-001,6000,30,40,4000,90,1000,Rainha
SAN-002,2000,20,25,3000,100,1000,Havaianas
BOT-003,1000,0,45,500,12,1000,Democrata
CHI-004,500,5,10,200,50,0,Kenner
MEI-005,500,10,15,100,300,1000,Lupo
";

fn analyze_snapshot() -> Vec<core_types::EnrichedRecord> {
    let table = load_table(SNAPSHOT.as_bytes(), &IngestSettings::default()).unwrap();
    PerformanceAnalyzer::default()
        .analyze_table(&table, &ColumnMap::default(), false)
        .unwrap()
}

#[test]
fn snapshot_is_classified_end_to_end() {
    let out = analyze_snapshot();
    let refs: Vec<&str> = out.iter().map(|e| e.record.reference.as_str()).collect();
    assert_eq!(refs, vec!["TEN-001", "SAN-002", "BOT-003", "CHI-004", "MEI-005"]);

    // Total revenue 10000: shares 0.6, 0.8, 0.9, 0.95, 1.0.
    let classes: Vec<AbcClass> = out.iter().map(|e| e.abc_class).collect();
    assert_eq!(
        classes,
        vec![AbcClass::A, AbcClass::A, AbcClass::B, AbcClass::B, AbcClass::C]
    );

    // Turnovers 4, 3, 0.5, undefined, 0.1 -> median 1.75. Margins median 25.
    let statuses: Vec<StrategicStatus> = out.iter().map(|e| e.strategic_status).collect();
    assert_eq!(
        statuses,
        vec![
            StrategicStatus::Estrela,
            StrategicStatus::Estrela,
            StrategicStatus::Problema,
            StrategicStatus::Mico,
            StrategicStatus::Mico,
        ]
    );
    assert_eq!(out[3].turnover, None);
    assert_eq!(out[2].coverage_days, None);
    assert_eq!(out[0].record.extra, vec!["Rainha".to_string()]);
}

#[test]
fn summary_and_alerts_follow_the_report_formulas() {
    let out = analyze_snapshot();
    let summary = InventorySummary::from_records(&out, dec!(7));

    assert_eq!(summary.total_revenue, dec!(10000));
    assert_eq!(summary.total_stock_value, dec!(4000));
    assert_eq!(summary.total_stock_units, dec!(552));
    assert_eq!(summary.mean_turnover, Some(dec!(7.6) / dec!(4)));
    assert_eq!(summary.mean_margin, Some(dec!(27)));
    assert_eq!(summary.class_a_count, 2);
    // TEN-001 covers 3 days, SAN-002 covers 5.
    assert_eq!(summary.stockout_risk_count, 2);
    assert_eq!(summary.mico_count, 2);

    assert_eq!(stockout_risks(&out, dec!(4)).len(), 1);
    let idle: Vec<&str> = micos(&out).iter().map(|e| e.record.reference.as_str()).collect();
    assert_eq!(idle, vec!["CHI-004", "MEI-005"]);
}

#[test]
fn export_in_input_order_round_trips_through_the_loader() {
    let table = load_table(SNAPSHOT.as_bytes(), &IngestSettings::default()).unwrap();
    let columns = ColumnMap::default();
    let out = PerformanceAnalyzer::default()
        .analyze_table(&table, &columns, false)
        .unwrap();

    let mut bytes = Vec::new();
    let layout = SheetLayout::from_table(&table, &columns);
    write_enriched(&mut bytes, &layout, &out, RowOrder::Input, b',').unwrap();

    let exported = load_table(bytes.as_slice(), &IngestSettings::default()).unwrap();
    assert_eq!(exported.len(), 5);
    assert_eq!(exported.column_index("brand"), Some(7));
    assert_eq!(exported.column_index("abc_class"), Some(11));
    let first_refs: Vec<&str> = exported.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(first_refs, vec!["TEN-001", "SAN-002", "BOT-003", "CHI-004", "MEI-005"]);
    // Blank turnover for the row without stock value.
    assert_eq!(exported.rows[3][8], "");
}

#[test]
fn missing_columns_abort_the_analysis() {
    let table = load_table(
        "reference,net_revenue\nA,1\n".as_bytes(),
        &IngestSettings::default(),
    )
    .unwrap();
    let err = PerformanceAnalyzer::default()
        .analyze_table(&table, &ColumnMap::default(), false)
        .unwrap_err();
    match err {
        AnalyticsError::Dataset(DatasetError::MissingColumns(missing)) => assert_eq!(missing.len(), 5),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn blank_required_cell_is_a_missing_field() {
    let csv_data = "\
reference,net_revenue,avg_net_quantity_sold,margin_percent,cogs_sold,stock_quantity,stock_cost_value
A,100,1,10,,5,50
";
    let table = load_table(csv_data.as_bytes(), &IngestSettings::default()).unwrap();
    let err = PerformanceAnalyzer::default()
        .analyze_table(&table, &ColumnMap::default(), false)
        .unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::Dataset(DatasetError::Core(CoreError::MissingField { line: 2, ref column }))
            if column == "cogs_sold"
    ));
}

#[test]
fn header_only_sheet_gives_an_empty_analysis() {
    let csv_data = "reference,net_revenue,avg_net_quantity_sold,margin_percent,cogs_sold,stock_quantity,stock_cost_value\n";
    let table = load_table(csv_data.as_bytes(), &IngestSettings::default()).unwrap();
    let out = PerformanceAnalyzer::default()
        .analyze_table(&table, &ColumnMap::default(), false)
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(InventorySummary::from_records(&out, dec!(7)), InventorySummary::new());
}
