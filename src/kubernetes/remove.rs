use std::io::{self, Write};

use clap::{ArgAction, Args};
use kube::config::KubeConfigOptions;
use kube::{Client, Config, ResourceExt};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::kubernetes::cluster::{status_reason, Cluster, KubeCluster};

const DEFAULT_POD_STATUS_REASON: &str = "Terminated";

#[derive(Debug, Args)]
pub struct CommandArgs {
    /// Dry run mode
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub dry_run: bool,

    /// List of pod.Status.Reason
    #[arg(short = 's', long, default_values_t = [DEFAULT_POD_STATUS_REASON.to_string()])]
    pub pod_status_reason: Vec<String>,

    /// The kubeconfig context to use instead of the inferred configuration.
    #[arg(short, long)]
    pub context: Option<String>,

    /// Show more detailed logs (repeat to show more)
    #[arg(short, action = ArgAction::Count)]
    pub verbosity: u8,
}

/// Whether matching pods are deleted or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Live,
}

impl From<bool> for Mode {
    fn from(dry_run: bool) -> Self {
        if dry_run {
            Mode::DryRun
        } else {
            Mode::Live
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub namespaces: usize,
    pub pods: usize,
    pub matches: usize,
    pub deleted: usize,
}

#[tokio::main()]
pub async fn handle(args: CommandArgs) -> Result<Summary> {
    let mode = Mode::from(args.dry_run);
    info!(
        "Removing pods with status reason in {:?} ({}).",
        args.pod_status_reason,
        if mode == Mode::DryRun { "dry run" } else { "live" }
    );

    let config = match args.context {
        Some(context) => {
            Config::from_kubeconfig(&KubeConfigOptions {
                context: Some(context),
                cluster: None,
                user: None,
            })
            .await?
        }
        None => {
            debug!("No context specified, inferring the cluster configuration.");
            Config::infer().await?
        }
    };
    let client = Client::try_from(config).map_err(Error::Client)?;

    let summary = reap(
        &KubeCluster::new(client),
        &args.pod_status_reason,
        mode,
        &mut io::stdout().lock(),
    )
    .await?;
    info!(
        "Visited {} namespaces and {} pods, {} matched, {} deleted.",
        summary.namespaces, summary.pods, summary.matches, summary.deleted
    );
    Ok(summary)
}

/// Walks every pod of every namespace and removes those whose status reason
/// is one of `reasons`. The first API error aborts the walk.
///
/// A pod is handled once per matching entry of `reasons`, so duplicate
/// entries lead to repeated deletes of the same pod.
pub async fn reap<C: Cluster, W: Write>(
    cluster: &C,
    reasons: &[String],
    mode: Mode,
    out: &mut W,
) -> Result<Summary> {
    let mut summary = Summary::default();
    let namespaces = cluster
        .list_namespaces()
        .await
        .map_err(Error::ListNamespaces)?;

    for namespace in namespaces {
        writeln!(out, "Working in namespace: {namespace}")?;
        summary.namespaces += 1;
        let pods = cluster
            .list_pods(&namespace)
            .await
            .map_err(|source| Error::ListPods {
                namespace: namespace.clone(),
                source,
            })?;

        for pod in pods {
            summary.pods += 1;
            let name = pod.name_any();
            let reason = status_reason(&pod);
            let matching = reasons.iter().filter(|r| r.as_str() == reason);
            let mut matched = false;
            for _ in matching {
                matched = true;
                summary.matches += 1;
                match mode {
                    Mode::DryRun => writeln!(out, "Pod: {name} will be deleted.")?,
                    Mode::Live => {
                        cluster
                            .delete_pod(&namespace, &name)
                            .await
                            .map_err(|source| Error::DeletePod {
                                namespace: namespace.clone(),
                                pod: name.clone(),
                                source,
                            })?;
                        summary.deleted += 1;
                        writeln!(out, "Pod: {name} deleted.")?;
                    }
                }
            }
            if !matched {
                debug!("Skipping pod {name} in namespace {namespace} with status reason {reason:?}.");
            }
        }
    }
    Ok(summary)
}
