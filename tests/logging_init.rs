//! Global subscriber installation, kept in its own test binary so the
//! subscriber never leaks into the unit tests.

use as_client::config::{LogFormat, LogLevel, LoggingConfig};
use as_client::ErrorKind;

#[test]
fn test_try_init_installs_once() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Json,
    };

    config.try_init().unwrap();

    let err = config.try_init().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
