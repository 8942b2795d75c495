//! A scripted session against a real data directory.

use std::fs;
use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use tally_console::{App, AppConfig, Console};
use tally_store::storage::{ITEMS_FILE, RECEIPTS_FILE, RECEIPT_LINES_FILE};
use tally_store::{Storage, StoreConfig};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn run(config: &AppConfig, script: &str) -> String {
    let storage = Storage::open(StoreConfig::new(config.data_dir.clone())).unwrap();
    let app = App::new(storage, config.clone());

    let mut console =
        Console::new(app, Cursor::new(script.to_string()), Vec::new()).with_clock(fixed_now);
    console.run().unwrap();

    let (_, output) = console.into_parts();
    String::from_utf8(output).unwrap()
}

#[test]
fn sale_is_written_and_reported_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().join("data"),
        ..AppConfig::default()
    };

    let output = run(
        &config,
        concat!(
            "2\n4\n3\n5\n",                 // select Amit
            "1\n4\n103\n4\n4\n104\n2\n8\n", // 4 pencils, 2 erasers
            "3\n2\n4\n",
            "5\n",
        ),
    );
    assert!(output.contains("Receipt generated successfully! Receipt ID: R001"));

    // Sample data was seeded on first open.
    assert!(dir.path().join("data").join(ITEMS_FILE).exists());

    let headers = fs::read_to_string(dir.path().join("data").join(RECEIPTS_FILE)).unwrap();
    assert!(headers.ends_with("R001,3,2024-03-09,26.00\n"));
    let lines = fs::read_to_string(dir.path().join("data").join(RECEIPT_LINES_FILE)).unwrap();
    assert!(lines.contains("R001,103,Pencil,4,5.00,20.00\n"));
    assert!(lines.contains("R001,104,Eraser,2,3.00,6.00\n"));

    // A second run sees the sale and continues the numbering.
    let output = run(
        &config,
        concat!(
            "4\n1\n2024-03-09\n3\n4\n",
            "2\n4\n3\n5\n",
            "1\n4\n101\n1\n8\n",
            "3\n2\n4\n",
            "5\n",
        ),
    );
    assert!(output.contains("Total Sales: $26.00"));
    assert!(output.contains("Total Items Sold: 6"));
    assert!(output.contains("Receipt ID: R002"));
}
