use axum::{
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::pool::HttpPool;
use super::protocol::CONTENT_TYPE_VALUE;
use crate::group::GroupRegistry;

/// Serves `GET <base>:group/:key` for another node.
pub async fn handle_peer_get(
    Extension(pool): Extension<Arc<HttpPool>>,
    Extension(registry): Extension<Arc<GroupRegistry>>,
    Path((group_name, key)): Path<(String, String)>,
) -> Response {
    tracing::debug!("[{}] GET {}/{}", pool.self_addr(), group_name, key);

    let Some(group) = registry.get_group(&group_name) else {
        tracing::warn!("Peer asked for unknown group {}", group_name);
        return (
            StatusCode::BAD_REQUEST,
            format!("no such group: {}", group_name),
        )
            .into_response();
    };

    match group.get(&key).await {
        Ok(view) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE_VALUE)],
            view.bytes(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to get {}/{}: {}", group_name, key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
