use async_trait::async_trait;
use axum::http::StatusCode;
use configmap_mcp::{
    kubernetes::ClusterManager,
    operator::{OperatorFactory, ResourceOperator},
    params::ConfigMapParams,
    server::Server,
    tools::{messages::MISSING_NAME, ToolRegistry},
    Error, Result,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

struct FakeCluster;

impl ClusterManager for FakeCluster {
    fn current_namespace(&self) -> String {
        "default".to_string()
    }

    fn client(&self) -> kube::Client {
        unreachable!("fake operators never reach the API server")
    }
}

/// Answers like a cluster holding a single ConfigMap called "app-config".
struct FakeOperator {
    params: ConfigMapParams,
}

impl FakeOperator {
    fn lookup(&self) -> Result<()> {
        if self.params.name == "app-config" {
            Ok(())
        } else {
            Err(Error::Api(format!(
                "configmaps \"{}\" not found",
                self.params.name
            )))
        }
    }
}

#[async_trait]
impl ResourceOperator for FakeOperator {
    fn params(&self) -> &ConfigMapParams {
        &self.params
    }

    async fn create(&self, _cluster: Arc<dyn ClusterManager>) -> Result<String> {
        Ok(format!(
            "ConfigMap \"{}\" created successfully in namespace \"{}\"",
            self.params.name, self.params.namespace
        ))
    }

    async fn get(&self, _cluster: Arc<dyn ClusterManager>) -> Result<String> {
        self.lookup()?;
        Ok(format!(
            "ConfigMap \"{}\" in namespace \"{}\":",
            self.params.name, self.params.namespace
        ))
    }

    async fn list(
        &self,
        _cluster: Arc<dyn ClusterManager>,
        all_namespaces: bool,
        label_selector: String,
    ) -> Result<String> {
        Ok(format!("all={} selector={}", all_namespaces, label_selector))
    }

    async fn delete(&self, _cluster: Arc<dyn ClusterManager>) -> Result<String> {
        self.lookup()?;
        Ok("deleted".to_string())
    }

    async fn update(&self, _cluster: Arc<dyn ClusterManager>) -> Result<String> {
        self.lookup()?;
        Ok("updated".to_string())
    }
}

#[derive(Default)]
struct FakeFactory {
    built: Mutex<Vec<ConfigMapParams>>,
}

impl OperatorFactory for FakeFactory {
    fn build(&self, params: ConfigMapParams) -> Box<dyn ResourceOperator> {
        self.built.lock().unwrap().push(params.clone());
        Box::new(FakeOperator { params })
    }
}

fn test_server() -> (axum_test::TestServer, Arc<FakeFactory>) {
    let factory = Arc::new(FakeFactory::default());
    let tools = ToolRegistry::new(Arc::new(FakeCluster), factory.clone());
    let app = Server::new(tools).build_router();
    (axum_test::TestServer::new(app).unwrap(), factory)
}

async fn call_tool(client: &axum_test::TestServer, name: &str, arguments: Value) -> Value {
    let response = client
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

fn text_of(body: &Value) -> &str {
    body["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (client, _) = test_server();

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let (client, _) = test_server();

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["serverInfo"]["name"], "configmap-mcp");
    assert!(body["result"]["capabilities"]["tools"].is_object());

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await;
    let body: Value = response.json();
    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 5);
    assert!(tools
        .iter()
        .all(|tool| tool["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_call_tool_success() {
    let (client, factory) = test_server();

    let body = call_tool(&client, "get_configmap", json!({"name": "app-config"})).await;

    assert_eq!(body["id"], 7);
    assert_eq!(body["result"]["isError"], false);
    assert_eq!(
        text_of(&body),
        "ConfigMap \"app-config\" in namespace \"default\":"
    );
    assert_eq!(
        factory.built.lock().unwrap().as_slice(),
        &[ConfigMapParams::new("app-config", "default")]
    );
}

#[tokio::test]
async fn test_domain_failure_is_successful_text() {
    let (client, _) = test_server();

    let body = call_tool(
        &client,
        "delete_configmap",
        json!({"name": "missing", "namespace": "ops"}),
    )
    .await;

    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["isError"], false);
    assert_eq!(
        text_of(&body),
        "Failed to delete ConfigMap: configmaps \"missing\" not found"
    );
}

#[tokio::test]
async fn test_validation_failure_never_builds_operator() {
    let (client, factory) = test_server();

    let body = call_tool(&client, "update_configmap", json!({"data": {"k": "v"}})).await;

    assert_eq!(text_of(&body), MISSING_NAME);
    assert!(factory.built.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_arguments_reach_operator() {
    let (client, factory) = test_server();

    let body = call_tool(
        &client,
        "list_configmaps",
        json!({"all_namespaces": true, "label_selector": "app=web"}),
    )
    .await;

    assert_eq!(text_of(&body), "all=true selector=app=web");
    assert_eq!(factory.built.lock().unwrap()[0].namespace, "");
}

#[tokio::test]
async fn test_call_without_arguments() {
    let (client, _) = test_server();

    let response = client
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "list_configmaps" }
        }))
        .await;
    let body: Value = response.json();
    assert_eq!(text_of(&body), "all=false selector=");
}

#[tokio::test]
async fn test_protocol_errors() {
    let (client, _) = test_server();

    let body = call_tool(&client, "get_secret", json!({"name": "x"})).await;
    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"].as_str().unwrap().contains("get_secret"));

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], -32601);

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_unparseable_body_is_parse_error() {
    let (client, _) = test_server();

    let response = client.post("/mcp").text("{not json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_request_without_method_is_invalid() {
    let (client, factory) = test_server();

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 9, "params": {"name": "get_configmap"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], 9);
    assert!(factory.built.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_notifications_are_accepted() {
    let (client, _) = test_server();

    let response = client
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_metrics_endpoint_counts_calls() {
    let (client, _) = test_server();

    call_tool(&client, "create_configmap", json!({"name": "fresh"})).await;

    let response = client.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("configmap_tool_calls_total"));
    assert!(text.contains("tool=\"create_configmap\""));
}
