//! AWS profile discovery and region resolution.
//!
//! Profiles come from the AWS CLI's own profile store (`aws configure
//! list-profiles`); a profile's default region is read through `aws-config`'s
//! environment and profile-file region providers.

use crate::error::{Error, Result};
use crate::selector::prompt_text;
use aws_config::environment::region::EnvironmentVariableRegionProvider;
use aws_config::meta::region::ProvideRegion;
use aws_config::profile::profile_file::ProfileFiles;
use aws_config::profile::ProfileFileRegionProvider;
use log::debug;
use std::future::Future;
use std::io::{BufRead, Write};
use std::process::Command;

/// Lists the profiles configured for the AWS CLI, in the order it prints them.
///
/// # Errors
/// Returns [`Error::ProfileListing`] if the `aws` executable cannot be run
/// or exits unsuccessfully.
pub fn list_profiles() -> Result<Vec<String>> {
    let mut command = Command::new("aws");
    command.args(["configure", "list-profiles"]);
    list_profiles_with(command)
}

/// Runs `command` and parses its standard output as a profile listing.
pub fn list_profiles_with(mut command: Command) -> Result<Vec<String>> {
    let output = command
        .output()
        .map_err(|e| Error::ProfileListing(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ProfileListing(format!(
            "{} ({})",
            output.status,
            stderr.trim()
        )));
    }

    Ok(parse_profiles(&String::from_utf8_lossy(&output.stdout)))
}

/// Splits a profile listing into names, trimming each line and dropping blank ones.
pub fn parse_profiles(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the default region for `profile`, if any.
///
/// Checks `AWS_REGION`/`AWS_DEFAULT_REGION` first, then the `region` key of
/// the profile in the shared config files. Instance metadata is never
/// consulted, so a profile without a region falls through to the prompt.
pub async fn profile_default_region(profile: Option<&str>) -> Option<String> {
    let env_provider = EnvironmentVariableRegionProvider::new();
    if let Some(region) = ProvideRegion::region(&env_provider).await {
        debug!("Region {region} taken from environment");
        return Some(region.to_string());
    }

    profile_file_region(profile, ProfileFiles::default()).await
}

/// Reads the `region` key of `profile` from `files`.
pub async fn profile_file_region(profile: Option<&str>, files: ProfileFiles) -> Option<String> {
    let mut builder = ProfileFileRegionProvider::builder().profile_files(files);

    if let Some(profile_name) = profile {
        builder = builder.profile_name(profile_name);
    }

    let provider = builder.build();
    ProvideRegion::region(&provider)
        .await
        .map(|region| region.to_string())
}

/// Determines the region for the run.
///
/// Precedence: the explicit value (flag or config file), then the profile's
/// default region, then a manual prompt. The value is not validated; an
/// invalid region surfaces as an API error later.
pub async fn resolve_region<R, W>(
    explicit: Option<String>,
    profile: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    resolve_region_with(explicit, profile_default_region(profile), input, output).await
}

/// Same as [`resolve_region`] with the profile lookup supplied by the caller.
///
/// `profile_region` is only awaited when no explicit region is given.
pub async fn resolve_region_with<F, R, W>(
    explicit: Option<String>,
    profile_region: F,
    input: &mut R,
    output: &mut W,
) -> Result<String>
where
    F: Future<Output = Option<String>>,
    R: BufRead,
    W: Write,
{
    if let Some(region) = explicit {
        return Ok(region);
    }

    if let Some(region) = profile_region.await {
        debug!("Region {region} taken from profile configuration");
        return Ok(region);
    }

    prompt_text("Enter AWS region: ", input, output)
}
