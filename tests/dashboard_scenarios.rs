//! End-to-end scenarios: ingest an export, aggregate, publish.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use saleskpi::{FileSource, KpiEngine, RecordSource, Refresher, SaleRecord, SnapshotStore};

const SUPERSTORE_CSV: &str = "\
Order_ID,Order_Date,Ship_Date,Ship_Mode,Customer_ID,Segment,Country,Region,Category,Sub_Category,Sales,Quantity,Discount,Profit
US-2023-1,2023-01-15,2023-01-20,Second Class,C-001,Consumer,United States,West,Furniture,Chairs,100.00,2,0.0,20.00
US-2023-2,2023-08-01,not-a-date,Standard Class,C-002,Consumer,United States,West,Technology,Phones,50.00,1,0.1,-10.00
";

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_export_to_snapshot() {
    let file = write_temp(SUPERSTORE_CSV, ".csv");
    let records = saleskpi::ingest::read_records(file.path()).unwrap();
    assert_eq!(records.len(), 2);

    let snapshot = KpiEngine::new().compute(&records);
    assert_eq!(snapshot.total_sales, 150.0);
    assert_eq!(snapshot.total_profit, 10.0);
    assert_eq!(snapshot.sales_by_region["West"], 150.0);
    assert_eq!(snapshot.profit_distribution["United States"], 10.0);

    // Ranked descending: Technology's 50 trails Furniture's 100.
    let ranked: Vec<&String> = snapshot.top_categories.keys().collect();
    assert_eq!(ranked, ["Furniture", "Technology"]);

    // One half-year bucket per distinct period, first-seen order.
    assert_eq!(snapshot.sales_trend.len(), 2);
    assert_eq!(snapshot.sales_trend[0].sales, 100.0);
    assert_eq!(snapshot.sales_trend[1].sales, 50.0);

    assert_eq!(snapshot.monthly_revenue["January 2023"]["Furniture"], 100.0);
    assert_eq!(snapshot.monthly_revenue["August 2023"]["Technology"], 50.0);

    // Only the first record has a parseable ship date.
    assert_eq!(snapshot.average_fulfillment_time, Some(5.0));
    assert!((snapshot.profit_margin - 6.666_666_666_666_667).abs() < 1e-9);
}

#[test]
fn json_document_dump_to_snapshot() {
    let dump = r#"{"docs": [
        {"Order_ID": "A", "Order_Date": "2023-03-01", "Region": "East",
         "Category": "Office Supplies", "Country": "Canada",
         "Sales": 30.0, "Profit": 3.0},
        {"Order_ID": "B", "Region": "East", "Sales": 20.0}
    ]}"#;
    let file = write_temp(dump, ".json");

    let source = FileSource::new(file.path());
    let records = source.fetch().unwrap();
    let snapshot = KpiEngine::new().compute(&records);

    assert_eq!(snapshot.total_sales, 50.0);
    assert_eq!(snapshot.sales_by_region["East"], 50.0);
    // Record B has no country or category: excluded from those groupings only.
    assert_eq!(snapshot.profit_distribution.len(), 1);
    assert_eq!(snapshot.top_categories.len(), 1);
    // Record B's missing order date lands in the epoch month.
    assert!(snapshot.monthly_revenue.contains_key("January 1970"));
}

#[test]
fn refresher_publishes_latest_snapshot_from_file() {
    let file = write_temp(SUPERSTORE_CSV, ".csv");
    let store = Arc::new(SnapshotStore::new());
    let refresher = Refresher::new(
        FileSource::new(file.path()),
        Arc::clone(&store),
        Duration::from_secs(60),
    );

    assert!(store.latest().is_none());
    assert!(refresher.refresh_once().unwrap());

    let snapshot = store.latest().unwrap();
    assert_eq!(snapshot.record_count, 2);
    assert_eq!(snapshot.total_sales, 150.0);
}

#[test]
fn empty_collection_degenerates_but_serializes() {
    let snapshot = KpiEngine::new().compute(&[]);
    assert_eq!(snapshot.total_sales, 0.0);
    assert_eq!(snapshot.average_fulfillment_time, None);
    assert_eq!(snapshot.profit_margin, 0.0);
    assert!(!snapshot.return_on_investment.is_finite());

    // Non-finite ROI maps to JSON null; everything else stays plain data.
    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json["returnOnInvestment"].is_null());
    assert!(json["averageFulfillmentTime"].is_null());
    assert_eq!(json["totalSales"], 0.0);
}

#[test]
fn snapshot_is_recomputed_from_scratch_each_call() {
    let engine = KpiEngine::new();
    let first = engine.compute(&[SaleRecord {
        sales: Some(10.0),
        ..Default::default()
    }]);
    let second = engine.compute(&[]);
    // No carry-over between calls.
    assert_eq!(first.total_sales, 10.0);
    assert_eq!(second.total_sales, 0.0);
}
