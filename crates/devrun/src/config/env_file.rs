//! Env file loading into the process environment

/// Load environment variables before any service task starts, so every
/// spawned command inherits them.
///
/// With an explicit path the file must exist and parse. Without one, a
/// `.env` in the working directory is loaded when present and silently
/// skipped otherwise.
pub fn load_env(env_file: Option<&str>) -> Result<(), EnvFileError> {
    match env_file {
        Some(path) => {
            dotenvy::from_filename(path).map_err(|e| EnvFileError {
                path: path.to_string(),
                source: e,
            })?;
            Ok(())
        }
        None => {
            let _ = dotenvy::from_filename(".env");
            Ok(())
        }
    }
}

/// Failure to load an explicitly configured env file; fatal at startup
#[derive(Debug, thiserror::Error)]
#[error("Failed to load env file '{path}': {source}")]
pub struct EnvFileError {
    path: String,
    #[source]
    source: dotenvy::Error,
}
