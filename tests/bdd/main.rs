mod steps;

use std::collections::HashMap;

use cucumber::World;

/// Tenant every scenario works under.
pub const TENANT: &str = "bdd";

/// Shared state carried through each scenario.
#[derive(Debug, Default, World)]
pub struct BoardWorld {
    /// Port of the in-process stand-in service, once started.
    pub server_port: Option<u16>,
    /// Handle of the server task, kept so it lives as long as the scenario.
    pub server_handle: Option<tokio::task::JoinHandle<()>>,
    /// Base URL override used instead of the running server.
    pub base_url_override: Option<String>,
    /// HTTP client for direct requests against the service.
    pub http_client: reqwest::Client,
    /// The raw stdout of the most recent `td` invocation.
    pub last_stdout: String,
    /// The raw stderr of the most recent `td` invocation.
    pub last_stderr: String,
    /// Exit code of the most recent `td` invocation.
    pub last_exit_code: i32,
    /// Alias to task id map, populated by create steps.
    pub task_ids: HashMap<String, u64>,
    /// Status code of the most recent direct HTTP request.
    pub last_response_status: Option<u16>,
    /// Body of the most recent direct HTTP request.
    pub last_response_body: Option<String>,
    /// Holds files written for upload steps.
    pub scratch_dir: Option<tempfile::TempDir>,
}

impl BoardWorld {
    /// Base URL `td` should be pointed at.
    pub fn base_url(&self) -> String {
        if let Some(ref url) = self.base_url_override {
            return url.clone();
        }
        let port = self
            .server_port
            .expect("server not started: add 'Given the to-do service is running'");
        format!("http://127.0.0.1:{port}")
    }

    pub fn task_id(&self, alias: &str) -> u64 {
        *self
            .task_ids
            .get(alias)
            .unwrap_or_else(|| panic!("no task with alias '{alias}'"))
    }
}

#[tokio::main]
async fn main() {
    BoardWorld::run("tests/features").await;
}
