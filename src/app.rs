//! The cascading selection flow.
//!
//! A run narrows profile → region → cluster → service → task → container,
//! each step scoped by the previous choice, and finally hands the terminal
//! to `aws ecs execute-command`. There is no backtracking: an empty list or
//! a failed API call at any step ends the run with an [`Error`].

use crate::aws::{EcsCatalog, EcsClient};
use crate::cli::Settings;
use crate::error::{Error, Result};
use crate::exec::{build_execute_command, execute};
use crate::plugin::check_session_manager_plugin;
use crate::profile::{list_profiles, resolve_region};
use crate::selector::interactive_selection;
use log::{debug, info};
use std::io::{self, BufRead, Write};

/// The ECS resources chosen for the exec session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcsTarget {
    pub cluster: String,
    pub service: String,
    pub task: String,
    pub container: String,
}

/// Everything chosen during a run, in the order it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub profile: Option<String>,
    pub region: String,
    pub cluster: String,
    pub service: String,
    pub task: String,
    pub container: String,
}

impl Selection {
    pub fn new(profile: Option<String>, region: String, target: EcsTarget) -> Self {
        Self {
            profile,
            region,
            cluster: target.cluster,
            service: target.service,
            task: target.task,
            container: target.container,
        }
    }
}

/// Application state for a single run.
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs the whole flow against the real terminal and AWS account.
    ///
    /// # Errors
    /// Returns the first fatal condition encountered; see [`Error`].
    pub async fn run(self) -> Result<()> {
        let selection = {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            self.select(&mut input, &mut output).await?
        };

        info!(
            "Opening session in container {} of task {} (service {})",
            selection.container, selection.task, selection.service
        );
        let argv = build_execute_command(&selection, &self.settings.command);
        execute(&argv)
    }

    async fn select<R, W>(&self, input: &mut R, output: &mut W) -> Result<Selection>
    where
        R: BufRead,
        W: Write,
    {
        let profile = choose_profile(self.settings.profile.clone(), list_profiles, input, output)?;

        let region = resolve_region(
            self.settings.region.clone(),
            profile.as_deref(),
            input,
            output,
        )
        .await?;
        info!("Using region: {region}");

        if self.settings.ssm {
            check_session_manager_plugin()?;
        } else {
            info!("Using AWS credentials from aws configure (not enforcing session-manager-plugin).");
        }

        let client = EcsClient::new(Some(region.clone()), profile.clone())
            .await
            .map_err(|e| Error::api("creating AWS session", e))?;

        let target = select_target(&client, input, output).await?;
        Ok(Selection::new(profile, region, target))
    }
}

/// Returns the configured profile, or asks the operator to pick one of the
/// profiles reported by `list`.
///
/// # Errors
/// Propagates listing failures and returns [`Error::NoProfiles`] when the
/// listing is empty.
pub fn choose_profile<L, R, W>(
    configured: Option<String>,
    list: L,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>>
where
    L: FnOnce() -> Result<Vec<String>>,
    R: BufRead,
    W: Write,
{
    if configured.is_some() {
        return Ok(configured);
    }

    let profiles = list()?;
    let profile = interactive_selection(&profiles, "Choose an AWS profile:", input, output)?
        .ok_or(Error::NoProfiles)?;
    info!("Selected profile: {profile}");
    Ok(Some(profile))
}

/// Walks cluster → service → task → container, prompting at each level.
///
/// # Errors
/// Returns [`Error::Api`] if a lookup fails and the matching `No*` error if
/// a level has nothing to choose from.
pub async fn select_target<C, R, W>(catalog: &C, input: &mut R, output: &mut W) -> Result<EcsTarget>
where
    C: EcsCatalog,
    R: BufRead,
    W: Write,
{
    let clusters = catalog
        .list_clusters()
        .await
        .map_err(|e| Error::api("listing ECS clusters", e))?;
    let cluster = interactive_selection(&clusters, "Select an ECS cluster:", input, output)?
        .ok_or(Error::NoClusters)?;
    info!("Selected cluster: {cluster}");

    let services = catalog
        .list_services(&cluster)
        .await
        .map_err(|e| Error::api(format!("listing ECS services for cluster {cluster}"), e))?;
    let service = interactive_selection(&services, "Select an ECS service:", input, output)?
        .ok_or_else(|| Error::NoServices {
            cluster: cluster.clone(),
        })?;
    info!("Selected service: {service}");

    let tasks = catalog.list_tasks(&cluster, &service).await.map_err(|e| {
        Error::api(
            format!("listing ECS tasks for service {service} in cluster {cluster}"),
            e,
        )
    })?;
    let task = interactive_selection(&tasks, "Select an ECS task:", input, output)?.ok_or_else(
        || Error::NoRunningTasks {
            cluster: cluster.clone(),
            service: service.clone(),
        },
    )?;
    info!("Selected task: {task}");

    let containers = catalog
        .describe_containers(&cluster, &task)
        .await
        .map_err(|e| Error::api(format!("describing task {task} in cluster {cluster}"), e))?
        .ok_or_else(|| Error::NoTaskDetails { task: task.clone() })?;
    debug!("Task {task} has containers {containers:?}");
    let container = interactive_selection(&containers, "Select a container:", input, output)?
        .ok_or_else(|| Error::NoContainers { task: task.clone() })?;
    info!("Selected container: {container}");

    Ok(EcsTarget {
        cluster,
        service,
        task,
        container,
    })
}
