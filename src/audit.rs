use serde_json::Value;

/// Emit a structured audit event for a mutating operation. Events go to the
/// `audit` tracing target so deployments can route them separately from
/// application logs.
pub fn log_audit(user_id: Option<&str>, action: &str, resource: Option<&str>, metadata: Option<Value>) {
    tracing::info!(
        target: "audit",
        user_id = user_id.unwrap_or("-"),
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata.unwrap_or(serde_json::Value::Null),
        "audit event"
    );
}
