use log::Log;

use super::*;

fn record<'a>(args: std::fmt::Arguments<'a>, level: log::Level) -> log::Record<'a> {
    log::Record::builder()
        .args(args)
        .level(level)
        .target("devcon::tests")
        .file(Some("tests.rs"))
        .line(Some(42))
        .module_path(Some("devcon::logger::tests"))
        .build()
}

#[test]
fn test_records_are_captured_in_order() {
    let logger = ConsoleLogger::new();
    let shared = logger.shared();

    logger.log(&record(format_args!("first"), log::Level::Info));
    logger.log(&record(format_args!("second"), log::Level::Warn));
    logger.log(&record(format_args!("third"), log::Level::Error));

    let records = shared.read().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].text, "first");
    assert_eq!(records[1].level, log::Level::Warn);
    assert_eq!(records[2].text, "third");
}

#[test]
fn test_record_indices_increase() {
    let logger = ConsoleLogger::new();
    let shared = logger.shared();

    for i in 0..5 {
        logger.log(&record(format_args!("message"), log::Level::Debug));
        let records = shared.read().unwrap();
        assert_eq!(records[i].idx, i);
    }
}

#[test]
fn test_record_metadata_captured() {
    let logger = ConsoleLogger::new();
    let shared = logger.shared();

    logger.log(&record(format_args!("meta"), log::Level::Trace));

    let records = shared.read().unwrap();
    assert_eq!(records[0].file, "tests.rs");
    assert_eq!(records[0].line, 42);
    assert_eq!(records[0].module, "devcon::logger::tests");
    assert_eq!(records[0].target, "devcon::tests");
}

#[test]
fn test_install_captures_through_log_macros() {
    let shared = install_test_capture();
    log::info!("install smoke message");

    let records = shared.read().unwrap();
    assert!(
        records.iter().any(|r| r.text == "install smoke message"),
        "record emitted via the global facade should be captured"
    );
}

#[test]
fn test_shared_handles_alias_one_buffer() {
    let logger = ConsoleLogger::new();
    let a = logger.shared();
    let b = logger.shared();

    logger.log(&record(format_args!("once"), log::Level::Info));

    assert_eq!(a.read().unwrap().len(), 1);
    assert_eq!(b.read().unwrap().len(), 1);
}
