/// Workspace-wide result type. Every layer propagates `anyhow` errors.
pub type Result<T> = anyhow::Result<T>;
