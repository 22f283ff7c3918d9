use super::pool::HttpPool;
use super::protocol::CONTENT_TYPE_OCTET_STREAM;

use axum::{
    Extension,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Serves `GET <base_path><group>/<key>` from the local registry.
///
/// # Panics
/// If the request path does not start with the pool's base path. The pool's router only
/// mounts this handler under that prefix, so any other path is a wiring bug.
pub async fn handle_peer_get(
    Extension(pool): Extension<Arc<HttpPool>>,
    method: Method,
    uri: Uri,
) -> Response {
    let path = uri.path();
    let Some(rest) = path.strip_prefix(pool.base_path()) else {
        panic!("HttpPool serving unexpected path: {}", path);
    };
    tracing::info!(server = %pool.self_addr(), "{} {}", method, path);

    let Some((group_name, key)) = split_group_key(rest) else {
        tracing::warn!(server = %pool.self_addr(), "Bad peer request path: {}", path);
        return (StatusCode::BAD_REQUEST, "bad request").into_response();
    };

    let Some(group) = pool.registry().get(&group_name) else {
        return (
            StatusCode::NOT_FOUND,
            format!("no such group: {}", group_name),
        )
            .into_response();
    };

    match group.get(&key).await {
        Ok(view) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)],
            view.byte_slice(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(server = %pool.self_addr(), "Failed to get {:?} from group {}: {}", key, group_name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Splits `<escaped group>/<escaped key>` and unescapes both parts.
///
/// The key is everything after the first `/`. Empty parts and invalid escapes are rejected.
fn split_group_key(rest: &str) -> Option<(String, String)> {
    let (group, key) = rest.split_once('/')?;
    if group.is_empty() || key.is_empty() {
        return None;
    }

    let group = urlencoding::decode(group).ok()?.into_owned();
    let key = urlencoding::decode(key).ok()?.into_owned();
    Some((group, key))
}
