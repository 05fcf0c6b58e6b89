use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::jsonrpc::{
    error_codes, methods, CallToolResult, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    PROTOCOL_VERSION,
};
use crate::{metrics, tools::ToolRegistry, Error};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Error gathering metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn mcp(State(tools): State<Arc<ToolRegistry>>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(response) => return Json(response).into_response(),
    };

    let Some(id) = request.id.clone() else {
        debug!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    };

    Json(handle_request(&tools, id, request).await).into_response()
}

/// Decodes a request body, answering with the matching JSON-RPC error when it is not one.
fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected unparseable request body: {}", e);
        JsonRpcResponse::error(Value::Null, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
    })?;

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| {
        warn!("Rejected malformed request: {}", e);
        JsonRpcResponse::error(
            id,
            error_codes::INVALID_REQUEST,
            format!("Invalid request: {}", e),
        )
    })
}

async fn handle_request(
    tools: &ToolRegistry,
    id: Value,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    debug!("Dispatching method: {}", request.method);

    match request.method.as_str() {
        methods::INITIALIZE => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),
        methods::PING => JsonRpcResponse::success(id, json!({})),
        methods::TOOLS_LIST => match tools.definitions() {
            Ok(definitions) => JsonRpcResponse::success(id, json!({ "tools": definitions })),
            Err(e) => {
                error!("Failed to build tool definitions: {}", e);
                JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string())
            }
        },
        methods::TOOLS_CALL => call_tool(tools, id, request.params).await,
        other => JsonRpcResponse::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        ),
    }
}

async fn call_tool(tools: &ToolRegistry, id: Value, params: Option<Value>) -> JsonRpcResponse {
    let params: ToolCallParams = match params.map(serde_json::from_value) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid tools/call params: {}", e),
            )
        }
        None => {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing tools/call params",
            )
        }
    };

    let arguments = params.arguments.unwrap_or_default();
    match tools.call(&params.name, &arguments).await {
        Ok(text) => match serde_json::to_value(CallToolResult::text(text)) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        },
        Err(e @ Error::UnknownTool(_)) => {
            warn!("{}", e);
            JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, e.to_string())
        }
        Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
