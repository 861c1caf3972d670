use error_sdk::logging::{ErrorLogger, ExceptionLogger, LogLevel, TracingLogger};
use error_sdk::taxonomy::SystemCondition;
use error_sdk::Exception;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

type Record = (LogLevel, String, Option<String>, BTreeMap<String, String>);

#[derive(Default)]
struct Recording(Mutex<Vec<Record>>);

impl ErrorLogger for Recording {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
        fields: &BTreeMap<String, String>,
    ) {
        self.0.lock().push((level, message.to_string(), error.map(|e| e.to_string()), fields.clone()));
    }
}

fn recorder() -> (Arc<Recording>, ExceptionLogger) {
    let sink = Arc::new(Recording::default());
    let logger = ExceptionLogger::new(sink.clone());
    (sink, logger)
}

#[test]
fn fields_cover_identity_and_metadata() {
    let err = Exception::bad_gateway("erp");
    err.context().add_metadata("tenant", "acme").unwrap();
    let fields = ExceptionLogger::noop().fields(&err);

    assert_eq!(fields["exceptionClass"], "ServerErrorException");
    assert_eq!(fields["errorCode"], "HTTP_502_BAD_GATEWAY");
    assert_eq!(fields["errorCategory"], "HTTP");
    assert_eq!(fields["errorSeverity"], "HIGH");
    assert_eq!(fields["errorId"], err.error_id().to_string());
    assert_eq!(fields["ctx_tenant"], "acme");
    assert_eq!(fields["ctx_httpCategory"], "HTTP");
}

#[test]
fn level_helpers_map_to_levels() {
    let (sink, logger) = recorder();
    let err = Exception::checked("x");
    logger.trace("t", &err);
    logger.debug("d", &err);
    logger.info("i", &err);
    logger.warning("w", &err);
    logger.error("e", &err);

    let levels: Vec<LogLevel> = sink.0.lock().iter().map(|r| r.0).collect();
    assert_eq!(levels, [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
}

#[test]
fn extra_fields_override_standard_ones() {
    let (sink, logger) = recorder();
    let extra = BTreeMap::from([("errorCode".to_string(), "OVERRIDDEN".to_string())]);
    logger.log_with(LogLevel::Info, "m", &Exception::checked("x"), extra);

    let records = sink.0.lock();
    assert_eq!(records[0].3["errorCode"], "OVERRIDDEN");
    assert_eq!(records[0].2.as_deref(), Some("x"));
}

#[test]
fn message_records_carry_no_error() {
    let (sink, logger) = recorder();
    let fields = BTreeMap::from([("phase".to_string(), "startup".to_string())]);
    logger.message(LogLevel::Info, "ready", &fields);

    let records = sink.0.lock();
    assert_eq!(records[0].1, "ready");
    assert_eq!(records[0].2, None);
    assert_eq!(records[0].3, fields);
}

#[test]
fn tracing_logger_accepts_every_level() {
    let logger = ExceptionLogger::new(Arc::new(TracingLogger));
    let err = Exception::out_of_memory("cache", 10);
    assert_eq!(err.system_condition(), Some(SystemCondition::OutOfMemory));
    for level in [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
        logger.log(level, "memory pressure", &err);
    }
    logger.critical("memory pressure", &err);
}

#[test]
fn level_names_round_trip() {
    for level in [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
        assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(serde_json::from_str::<LogLevel>(&json).unwrap(), level);
    }
}
