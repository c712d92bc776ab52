//! Typed wrappers around the host commands used by the studio.

use serde_json::Value;

use super::bridge::{CommandBridge, CommandError, CommandHost};
use crate::command_args;
use crate::models::{
    CreateProjectParams, FetchStatus, Project, ProxyConfig, ProxyResponse, QueryResponse, ServerUrlResponse,
    SldDiagram, Substation, ZmqUrlResponse,
};

impl<H: CommandHost> CommandBridge<H> {
    // ---------------- Projects ----------------

    /// Ask the host for the project it has open (or opens by default).
    pub async fn load_project(&self) -> Result<Project, CommandError> {
        self.invoke("load_project", None).await
    }

    pub async fn create_new_project(&self, params: &CreateProjectParams) -> Result<Project, CommandError> {
        self.invoke_with("create_new_project", params).await
    }

    /// Point the host's project database at `db_path` (the host default
    /// when `None`).  Answers with the path in use.
    pub async fn init_database_project(&self, db_path: Option<&str>) -> Result<String, CommandError> {
        self.invoke("init_database_project", Some(command_args! { "db_path" => db_path }))
            .await
    }

    /// Run `query` against the project database.
    pub async fn query_project(&self, query: &str) -> Result<QueryResponse, CommandError> {
        self.invoke("query_project", Some(command_args! { "query" => query }))
            .await
    }

    // ---------------- Network model ----------------

    /// Load a network-model file already present on disk.
    pub async fn load_network_file(&self, path: &str) -> Result<FetchStatus, CommandError> {
        self.invoke("load_network_file", Some(command_args! { "path" => path }))
            .await
    }

    /// Send a network-model file's content to the host.
    pub async fn upload_network_file(&self, file_name: &str, content: &str) -> Result<FetchStatus, CommandError> {
        self.invoke(
            "upload_network_file",
            Some(command_args! { "file_name" => file_name, "content" => content }),
        )
        .await
    }

    pub async fn load_substations(&self) -> Result<FetchStatus, CommandError> {
        self.invoke("load_substations", None).await
    }

    pub async fn get_substations(&self) -> Result<Vec<Substation>, CommandError> {
        self.invoke("get_substations", None).await
    }

    pub async fn get_single_line_diagram(&self, element_id: &str) -> Result<SldDiagram, CommandError> {
        self.invoke("get_single_line_diagram", Some(command_args! { "line_id" => element_id }))
            .await
    }

    /// Load the computed outputs of the current project into the host's
    /// local store.
    pub async fn load_outputs(&self) -> Result<FetchStatus, CommandError> {
        self.invoke("load_outputs", None).await
    }

    // ---------------- Server URL ----------------

    pub async fn get_server_url(&self) -> Result<ServerUrlResponse, CommandError> {
        self.invoke("get_server_url", None).await
    }

    pub async fn set_server_url(&self, url: &str) -> Result<ServerUrlResponse, CommandError> {
        self.invoke("set_server_url", Some(command_args! { "server_url" => url }))
            .await
    }

    pub async fn clear_server_url(&self) -> Result<ServerUrlResponse, CommandError> {
        self.invoke("clear_server_url", None).await
    }

    // ---------------- Proxy ----------------

    /// Configure the host's HTTP client behind `proxy`.
    pub async fn load_client(&self, proxy: &ProxyConfig) -> Result<ProxyResponse, CommandError> {
        self.invoke("plugin:settings|load_client", Some(command_args! { "proxy" => proxy }))
            .await
    }

    pub async fn clear_proxy(&self) -> Result<ProxyResponse, CommandError> {
        self.invoke("plugin:settings|clear_proxy", None).await
    }

    // ---------------- ZeroMQ feed ----------------

    pub async fn get_zmq_url(&self) -> Result<ZmqUrlResponse, CommandError> {
        self.invoke("plugin:settings|get_zmq_url", None).await
    }

    pub async fn set_zmq_url(&self, url: &str) -> Result<ZmqUrlResponse, CommandError> {
        self.invoke("plugin:settings|set_zmq_url", Some(command_args! { "zmq_url" => url }))
            .await
    }

    pub async fn set_zmq_subscription(&self, subscription: &str) -> Result<(), CommandError> {
        let _: Value = self
            .invoke(
                "plugin:settings|set_zmq_subscription",
                Some(command_args! { "subscription" => subscription }),
            )
            .await?;
        Ok(())
    }
}
