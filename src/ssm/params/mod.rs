//! Parameter Store path operations
//!
//! Parameters live under a path prefix (`/env/app/KEY`). Reads strip the
//! prefix to recover bare names, writes and deletes put it back.

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use super::client::SsmApi;
use super::types::Param;


/// `DeleteParameters` accepts at most this many names per call
pub const MAX_DELETE_BATCH: usize = 10;

/// Reject paths that are empty or not absolute
pub fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() || !path.starts_with('/') {
        bail!("path must be present and start with /");
    }
    Ok(())
}

/// Strip the first occurrence of `path` from a full name, then leading slashes
pub fn relative_name(full_name: &str, path: &str) -> String {
    full_name
        .replacen(path, "", 1)
        .trim_start_matches('/')
        .to_string()
}

/// Join a path prefix and a bare name
pub fn full_name(path: &str, name: &str) -> String {
    format!("{}/{}", path.trim_end_matches('/'), name)
}

/// Fetch every parameter under `path`, following `NextToken` until exhausted
pub async fn get_parameters_from_path(
    api: &impl SsmApi,
    path: &str,
    recursive: bool,
) -> Result<Vec<Param>> {
    let mut params = Vec::new();
    let mut next_token = None;

    loop {
        let page = api
            .get_parameters_by_path(path, recursive, next_token)
            .await?;

        tracing::debug!(count = page.parameters.len(), "fetched parameter page");

        params.extend(
            page.parameters
                .into_iter()
                .map(|p| Param::new(relative_name(&p.name, path), p.value, p.secure)),
        );

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(params)
}

/// Write parameters under `path`, overwriting existing values
///
/// Parameters with an empty value are skipped.
pub async fn load_parameters_into_path(
    api: &impl SsmApi,
    path: &str,
    params: &[Param],
) -> Result<usize> {
    let mut written = 0;

    for param in params {
        if param.value.is_empty() {
            tracing::debug!(name = %param.name, "skipping empty value");
            continue;
        }

        let name = full_name(path, &param.name);
        api.put_parameter(&name, &param.value, param.secure)
            .await
            .with_context(|| format!("put parameter ({name})"))?;
        written += 1;
    }

    Ok(written)
}

/// Delete parameters by full name in a single call
pub async fn delete_parameters(api: &impl SsmApi, names: &[String]) -> Result<usize> {
    let outcome = api.delete_parameters(names).await?;

    if !outcome.invalid.is_empty() {
        bail!("invalid parameters: {:?}", outcome.invalid);
    }

    Ok(outcome.deleted.len())
}

/// Delete the given bare names under `path`, batched by `MAX_DELETE_BATCH`
pub async fn delete_parameters_in_path(
    api: &impl SsmApi,
    path: &str,
    params: &[Param],
) -> Result<usize> {
    let names: Vec<String> = params.iter().map(|p| full_name(path, &p.name)).collect();
    let mut deleted = 0;

    for batch in names.chunks(MAX_DELETE_BATCH) {
        deleted += delete_parameters(api, batch).await?;
        tracing::debug!(batch = batch.len(), "deleted parameter batch");
    }

    Ok(deleted)
}

/// Parse a `.env` document into parameters, preserving file order
pub fn parse_env<R: Read>(reader: R, secure: bool) -> Result<Vec<Param>> {
    dotenvy::from_read_iter(reader)
        .map(|item| {
            let (name, value) = item.context("dotenv: parse")?;
            Ok(Param::new(name, value, secure))
        })
        .collect()
}

/// Read a `.env` file into parameters
pub fn read_env_file(path: &Path, secure: bool) -> Result<Vec<Param>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    parse_env(file, secure).with_context(|| format!("Failed to parse {}", path.display()))
}
