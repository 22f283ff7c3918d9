//! Peer Wire Protocol
//!
//! `GET <base_path><escaped group>/<escaped key>`
//!
//! | Status | Meaning                                   |
//! |--------|-------------------------------------------|
//! | 200    | body is the raw value (`application/octet-stream`) |
//! | 400    | path is not exactly `<group>/<key>`       |
//! | 404    | group is not registered on this node      |
//! | 500    | the source loader failed on this node     |
//!
//! Every node in a deployment must use the same base path.

/// Default URL prefix for peer requests.
pub const DEFAULT_BASE_PATH: &str = "/_geecache/";
/// Default number of virtual nodes per peer on the hash ring.
pub const DEFAULT_REPLICAS: usize = 50;
/// Content type of a successful peer response.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
