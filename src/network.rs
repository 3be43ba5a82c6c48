//! Network URL constants.

/// Default dataset API base URL (the bundled backend's listen address).
pub const DEFAULT_API_URL: &str = "http://localhost:2137";

/// Path prefix of the dataset endpoint: `{base}/dataset/{exchange}/{pair}/{date}`.
pub const DATASET_PATH: &str = "/dataset";
