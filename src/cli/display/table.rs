//! Table rendering for CLI output

use super::StatusIcon;
use crate::Build;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use k8s_openapi::api::core::v1::{Container, Pod};

/// Table renderer for formatted output
#[derive(Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the build embedded in a pod together with the pod's container pull policies
    pub fn render_build_summary(&self, build: &Build, pod: &Pod) -> String {
        let strategy = &build.spec.strategy;
        let force_pull = strategy.force_pull();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("FIELD").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        table.add_row(vec![
            Cell::new("Strategy"),
            Cell::new(strategy.strategy_type()),
        ]);
        table.add_row(vec![
            Cell::new("ForcePull"),
            Cell::new(format!("{} {}", StatusIcon::for_flag(force_pull), force_pull)).fg(
                if force_pull {
                    Color::Green
                } else {
                    Color::DarkGrey
                },
            ),
        ]);

        if build.spec.output.image_labels.is_empty() {
            table.add_row(vec![Cell::new("Image labels"), Cell::new(StatusIcon::UNSET)]);
        }
        for label in &build.spec.output.image_labels {
            table.add_row(vec![
                Cell::new("Image label"),
                Cell::new(format!("{}={}", label.name, label.value)),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Build {}/{} {} ─╮\n",
            build.namespace(),
            build.name(),
            format!("[{}]", strategy.strategy_type()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&self.render_containers(pod));

        output
    }

    /// Render init and regular containers with their image pull policy
    pub fn render_containers(&self, pod: &Pod) -> String {
        let Some(spec) = pod.spec.as_ref() else {
            return "No containers".to_string();
        };

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("CONTAINER").set_alignment(CellAlignment::Left),
                Cell::new("TYPE").set_alignment(CellAlignment::Center),
                Cell::new("PULL POLICY").set_alignment(CellAlignment::Center),
            ]);

        let rows = spec
            .init_containers
            .iter()
            .flatten()
            .map(|c| (c, "init"))
            .chain(spec.containers.iter().map(|c| (c, "main")));
        for (container, kind) in rows {
            table.add_row(container_row(container, kind));
        }

        format!("{}\n", table)
    }
}

fn container_row(container: &Container, kind: &str) -> Vec<Cell> {
    vec![
        Cell::new(&container.name),
        Cell::new(kind).set_alignment(CellAlignment::Center),
        Cell::new(
            container
                .image_pull_policy
                .as_deref()
                .unwrap_or(StatusIcon::UNSET),
        )
        .set_alignment(CellAlignment::Center),
    ]
}
