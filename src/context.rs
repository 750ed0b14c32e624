/// Values the views receive from their host instead of reading global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    pub organization: String,
    pub project_id: String,
    pub replay_id: String,
    /// Absolute start of the recorded session, in milliseconds
    pub session_start_ms: f64,
    /// Whether request/response headers and bodies were captured
    pub network_details: bool,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            organization: "default".to_string(),
            project_id: "1".to_string(),
            replay_id: "local".to_string(),
            session_start_ms: 0.0,
            network_details: false,
        }
    }
}
