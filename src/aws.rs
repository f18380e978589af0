//! AWS ECS integration module.
//!
//! This module provides a client wrapper for the ECS control plane with the
//! four lookups needed to narrow down an exec target: clusters, services,
//! running tasks and the containers of a task.

use anyhow::{anyhow, Result};
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::{DesiredStatus, Task};
use aws_sdk_ecs::Client;
use log::debug;

/// Read-only view of the ECS resources an exec session can target.
///
/// Implemented by [`EcsClient`] against the real API; the selection flow only
/// depends on this trait.
#[allow(async_fn_in_trait)]
pub trait EcsCatalog {
    /// Cluster names in the configured account and region.
    async fn list_clusters(&self) -> Result<Vec<String>>;

    /// Service ARNs in `cluster`.
    async fn list_services(&self, cluster: &str) -> Result<Vec<String>>;

    /// ARNs of the tasks of `service` whose desired status is `RUNNING`.
    async fn list_tasks(&self, cluster: &str, service: &str) -> Result<Vec<String>>;

    /// Names of the containers of `task`, or `None` if the task could not be described.
    async fn describe_containers(&self, cluster: &str, task: &str) -> Result<Option<Vec<String>>>;
}

/// Client for interacting with AWS ECS.
pub struct EcsClient {
    /// AWS ECS SDK client
    client: Client,
}

impl EcsClient {
    /// Creates a new ECS client with optional region and profile configuration.
    ///
    /// # Arguments
    /// * `region` - Optional AWS region override (e.g., "us-east-1")
    /// * `profile` - Optional AWS profile name from the AWS CLI configuration
    ///
    /// # Errors
    /// Credentials are resolved lazily, so problems with the profile surface
    /// on the first API call rather than here.
    pub async fn new(region: Option<String>, profile: Option<String>) -> Result<Self> {
        let mut config_loader = aws_config::from_env();

        // Set region if provided
        if let Some(region_str) = region {
            config_loader = config_loader.region(aws_config::Region::new(region_str));
        }

        // Set profile if provided
        if let Some(profile_name) = profile {
            config_loader = config_loader.profile_name(profile_name);
        }

        let config = config_loader.load().await;
        let client = Client::new(&config);
        Ok(Self { client })
    }
}

impl EcsCatalog for EcsClient {
    /// Lists all ECS clusters in the configured region.
    ///
    /// Returns cluster names extracted from the full ARNs, following every
    /// page of results.
    async fn list_clusters(&self) -> Result<Vec<String>> {
        let mut pages = self.client.list_clusters().into_paginator().send();

        let mut clusters = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;
            clusters.extend(page.cluster_arns().iter().map(|arn| cluster_name(arn)));
        }

        debug!("Found {} clusters", clusters.len());
        Ok(clusters)
    }

    async fn list_services(&self, cluster: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_services()
            .cluster(cluster)
            .into_paginator()
            .send();

        let mut services = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;
            services.extend(page.service_arns().iter().cloned());
        }

        debug!("Found {} services in cluster {cluster}", services.len());
        Ok(services)
    }

    async fn list_tasks(&self, cluster: &str, service: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_tasks()
            .cluster(cluster)
            .service_name(service)
            .desired_status(DesiredStatus::Running)
            .into_paginator()
            .send();

        let mut tasks = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;
            tasks.extend(page.task_arns().iter().cloned());
        }

        debug!("Found {} running tasks for service {service}", tasks.len());
        Ok(tasks)
    }

    /// Describes a single task and returns the names of its containers.
    async fn describe_containers(&self, cluster: &str, task: &str) -> Result<Option<Vec<String>>> {
        let resp = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .tasks(task)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;

        Ok(resp.tasks().first().map(container_names))
    }
}

/// Names of the containers in `task`; containers that carry no name are skipped.
pub fn container_names(task: &Task) -> Vec<String> {
    task.containers()
        .iter()
        .filter_map(|c| c.name())
        .map(str::to_string)
        .collect()
}

/// Extracts the cluster name from a cluster ARN; plain names pass through.
pub fn cluster_name(arn: &str) -> String {
    arn.split('/').next_back().unwrap_or(arn).to_string()
}
