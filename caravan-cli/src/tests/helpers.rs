//! Test helpers for composing CLI inputs on disk.

use std::net::TcpListener;

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::test_support::{StubActivityGenerator, triangle_catalog};
use caravan_core::{GenerationError, TripRequest};
use caravan_data::CatalogFile;
use caravan_planner::TripPlanner;
use chrono::NaiveDate;
use tempfile::TempDir;

use super::*;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test input");
}

/// A temporary directory exposed as a UTF-8 root.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Write the A/B/C triangle catalog as JSON.
pub(super) fn write_triangle_catalog(path: &Utf8Path) {
    let file = CatalogFile::from(&triangle_catalog());
    let payload = serde_json::to_vec_pretty(&file).expect("serialise catalog");
    write_utf8(path, &payload);
}

/// A week-long seeded trip from A to B and C.
pub(super) fn triangle_request(budget: f64) -> TripRequest {
    let start = NaiveDate::from_ymd_opt(2025, 4, 10).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2025, 4, 17).expect("valid date");
    TripRequest::new("A", ["B", "C"], start, end, budget).with_seed(7)
}

pub(super) fn write_request(path: &Utf8Path, request: &TripRequest) {
    let payload = serde_json::to_vec_pretty(request).expect("serialise request");
    write_utf8(path, &payload);
}

/// Base URL of a port nothing listens on.
pub(super) fn closed_generator_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}/api")
}

/// Builds planners over the triangle catalog with an unreachable generator.
pub(super) struct OfflinePlannerBuilder;

impl PlannerBuilder for OfflinePlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn TripPlanning>, CliError> {
        let generator = StubActivityGenerator::failing(GenerationError::Network {
            url: "http://localhost:11434/api/generate".to_owned(),
            message: "connection refused".to_owned(),
        });
        Ok(Box::new(TripPlanner::new(triangle_catalog(), generator)))
    }
}
