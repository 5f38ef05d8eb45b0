//! Logger module
//!
//! Provides logging utilities for llms-routing including:
//! - Dev server lifecycle and route listing
//! - Access logging for the dev server
//! - Build summaries
//! - Error and warning logging
//! - File-based logging support

pub mod writer;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamped(message: &str) -> String {
    format!("{} {message}", Local::now().format("%H:%M:%S"))
}

fn write_info(message: &str) {
    let line = timestamped(message);
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

fn write_error(message: &str) {
    let line = timestamped(message);
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("llms dev server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("llms directory: {}", config.llms.dir));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

/// Log a heading followed by one indented route per line
pub fn log_routes(heading: &str, routes: &[String]) {
    write_info(heading);
    for route in routes {
        write_info(&format!("  {route}"));
    }
}

pub fn log_build_complete(out_dir: &Path, asset_count: usize) {
    write_info(&format!(
        "[BUILD] Wrote {asset_count} asset(s) to {}",
        out_dir.display()
    ));
}

pub fn log_request(method: &hyper::Method, path: &str, status: u16, body_bytes: u64) {
    write_info(&format!("[ACCESS] {method} {path} - {status} ({body_bytes} bytes)"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
