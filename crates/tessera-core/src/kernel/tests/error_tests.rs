use std::error::Error as _;

use crate::config::error::ConfigError;
use crate::event::error::EventSystemError;
use crate::kernel::error::Error;

#[test]
fn test_subsystem_errors_convert() {
    let err: Error = EventSystemError::invalid_request("bad payload").into();
    assert!(matches!(err, Error::EventSystem(_)));
    assert_eq!(err.to_string(), "Event system error: Invalid event request: bad payload");
    assert!(err.source().is_some());

    let err: Error = ConfigError::UnsupportedFormat("x.ini".to_string()).into();
    assert_eq!(err.to_string(), "Configuration error: Unsupported configuration format: x.ini");
}

#[test]
fn test_string_errors_convert() {
    let err: Error = "plain".into();
    assert_eq!(err.to_string(), "Error: plain");

    let err: Error = format!("code {}", 7).into();
    assert!(matches!(err, Error::Other(ref msg) if msg == "code 7"));
}
