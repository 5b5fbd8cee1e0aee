//! Integration tests for the `logger` crate

use logger::{debug, error, info, verbose, warn};
use logger::{set_level, set_level_from_str, Level};

#[test]
fn set_level_from_str_accepts_known_names() {
    // Case-insensitive, with the common aliases
    for name in ["error", "ERR", "Warn", "warning", "INFO", "debug"] {
        assert!(set_level_from_str(name), "'{name}' should parse");
    }
}

#[test]
fn set_level_from_str_rejects_unknown_names() {
    for name in ["", "trace", "loud", "warn "] {
        assert!(!set_level_from_str(name), "'{name}' should be rejected");
    }
}

#[test]
fn macros_emit_without_panicking() {
    set_level(Level::Debug);
    error!("render failed: {}", "backend missing");
    warn!("schema '{}' has no relations", "empty");
    info!("diagram exported to {}", "/tmp/diagram.png");
    debug!("resolved {} foreign keys", 6);
    verbose!("wrote {} bytes", 1024);
}

#[cfg(feature = "log-debug")]
#[test]
fn debug_flag_gates_debug_output() {
    use logger::{disable_debug, enable_debug, is_debug_enabled};

    set_level(Level::Debug);
    disable_debug();
    assert!(!is_debug_enabled());
    debug!("suppressed while the flag is off");

    enable_debug();
    assert!(is_debug_enabled());
    debug!("emitted while the flag is on");
}

#[cfg(feature = "verbose")]
#[test]
fn verbose_flag_gates_verbose_output() {
    use logger::{disable_verbose, enable_verbose, is_verbose_enabled};

    disable_verbose();
    assert!(!is_verbose_enabled());
    verbose!("suppressed while the flag is off");

    enable_verbose();
    assert!(is_verbose_enabled());
    verbose!("emitted while the flag is on");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_captures_tagged_messages() {
    use logger::init_file_logging;
    use std::fs;

    let dir = std::env::temp_dir().join("schemagram_logger_test");
    let _ = fs::create_dir_all(&dir);
    let log_path = dir.join("capture.log");
    let _ = fs::remove_file(&log_path);

    assert!(init_file_logging(&log_path));

    set_level(Level::Info);
    info!("file info message");
    warn!("file warn message");
    error!("file error message");

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] file info message"));
    assert!(contents.contains("[WARN] file warn message"));
    assert!(contents.contains("[ERROR] file error message"));

    let _ = fs::remove_file(&log_path);
}
