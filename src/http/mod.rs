//! HTTP layer: `DatasetHttp`, one request per dataset lookup.

pub mod client;

pub use client::DatasetHttp;
