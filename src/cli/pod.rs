//! Build pod commands

use crate::infrastructure::constants::BUILD_ANNOTATION_KEY;
use crate::infrastructure::kubernetes::resources::pod::load_pod_from_file;
use crate::{
    AnnotationBuildCodec, BuildCodec, BuildOverrides, BuildOverridesConfig, BuildPodClient,
    BuildPodClientImpl, EnvBuildCodec,
};
use clap::{Parser, ValueEnum};
use k8s_openapi::api::core::v1::Pod;

/// Where the encoded build lives inside the pod
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    /// `BUILD` environment variable on the build containers
    Env,
    /// A pod annotation (see --annotation-key)
    Annotation,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CarrierArgs {
    /// Build carrier used by the pod
    #[arg(long, value_enum, default_value_t = CarrierKind::Env)]
    pub carrier: CarrierKind,

    /// Annotation holding the encoded build (only with --carrier annotation)
    #[arg(long, default_value = BUILD_ANNOTATION_KEY)]
    pub annotation_key: String,
}

impl CarrierArgs {
    pub fn codec(&self) -> Box<dyn BuildCodec> {
        match self.carrier {
            CarrierKind::Env => Box::new(EnvBuildCodec),
            CarrierKind::Annotation => Box::new(AnnotationBuildCodec::new(&self.annotation_key)),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyCommand {
    /// Build overrides configuration file (YAML, JSON or TOML)
    #[arg(long, value_name = "PATH")]
    pub config: String,

    /// Build pod manifest file (YAML or JSON)
    #[arg(long, value_name = "PATH", conflicts_with = "pod_name", required_unless_present = "pod_name")]
    pub pod: Option<String>,

    /// Name of a build pod to fetch from the cluster instead of a manifest file.
    /// The mutated pod is only printed, never written back.
    #[arg(long)]
    pub pod_name: Option<String>,

    /// Kubernetes namespace (with --pod-name)
    #[arg(long, short = 'n', default_value = "default")]
    pub namespace: String,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,

    #[command(flatten)]
    pub carrier: CarrierArgs,

    /// Output format of the mutated pod
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl ApplyCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let config = BuildOverridesConfig::from_file(&self.config)
            .map_err(|e| anyhow::anyhow!("Failed to load build overrides: {}", e))?;

        let mut pod = if let Some(ref path) = self.pod {
            load_pod_from_file(path)?
        } else {
            let name = self
                .pod_name
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("either --pod or --pod-name is required"))?;
            let client = BuildPodClientImpl::new_with_config(
                self.namespace.clone(),
                self.kubeconfig.clone(),
                self.context.clone(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;
            client.get_pod(name).await?
        };

        if config.is_empty() {
            eprintln!("ℹ️  Build overrides configuration is empty, pod is left unchanged");
        }

        let codec = self.carrier.codec();
        BuildOverrides::with_codec(Some(&config), codec.as_ref())
            .apply_overrides(&mut pod)
            .map_err(|e| anyhow::anyhow!("Failed to apply build overrides: {}", e))?;

        println!("{}", render_pod(&pod, self.output)?);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ShowBuildCommand {
    /// Build pod manifest file (YAML or JSON)
    #[arg(long, value_name = "PATH")]
    pub pod: String,

    #[command(flatten)]
    pub carrier: CarrierArgs,
}

impl ShowBuildCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        use crate::cli::display::TableRenderer;

        let pod = load_pod_from_file(&self.pod)?;
        let build = self
            .carrier
            .codec()
            .get_build_from_pod(&pod)
            .map_err(|e| anyhow::anyhow!("Failed to read build from pod: {}", e))?;

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_build_summary(&build, &pod));
        Ok(())
    }
}

pub fn render_pod(pod: &Pod, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(pod)?,
        OutputFormat::Json => serde_json::to_string_pretty(pod)?,
    };
    Ok(rendered)
}
