//! Manufacturing artifact generation
//!
//! Drives the design-source collaborator to render Gerber plots for every
//! enabled layer of the configured plan, the Excellon drill file set, and
//! the bare-board netlist into a scratch directory. Two solder-mask design
//! parameters are overridden to zero first: the remote CAM applies its own
//! mask rules. Any rendering failure is fatal; there are no retries.

use crate::adapters::board::{BoardSource, DrillOptions, PlotOptions};
use crate::config::ExportConfig;
use crate::core::progress::ProgressReporter;
use crate::domain::Result;
use std::path::Path;

/// Renders all manufacturing artifacts for one export run
pub struct ArtifactGenerator<'a> {
    export: &'a ExportConfig,
    reporter: &'a ProgressReporter,
}

impl<'a> ArtifactGenerator<'a> {
    /// Creates a generator bound to the export settings and progress channel
    pub fn new(export: &'a ExportConfig, reporter: &'a ProgressReporter) -> Self {
        Self { export, reporter }
    }

    /// Populates `scratch_dir` with plots, drill files, and the netlist
    ///
    /// The solder-mask override persists only in the in-memory design
    /// object for this run.
    pub async fn generate(&self, board: &mut dyn BoardSource, scratch_dir: &Path) -> Result<()> {
        board.set_solder_mask(0, 0);

        let plot_options = PlotOptions::gerber_defaults();

        self.reporter.percent(15).await;
        for step in &self.export.layer_plan {
            if !board.is_layer_enabled(step.layer) {
                continue;
            }
            let path = board.plot_layer(step, &plot_options, scratch_dir)?;
            tracing::debug!(
                layer = ?step.layer,
                file = %path.display(),
                "Plotted layer"
            );
        }

        self.reporter.percent(20).await;
        let drill_options = DrillOptions::excellon_defaults(board.aux_origin());
        board.write_drill_files(&drill_options, scratch_dir)?;
        tracing::debug!("Drill files written");

        self.reporter.percent(25).await;
        let netlist_path = scratch_dir.join(&self.export.netlist_filename);
        board.write_netlist(&netlist_path)?;
        tracing::debug!(file = %netlist_path.display(), "Netlist written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::board::{BoardSnapshot, Layer};
    use tempfile::TempDir;

    fn board_with_layers(layers: &[Layer]) -> BoardSnapshot {
        let mut board = BoardSnapshot::new("/designs/widget.kicad_pcb");
        for layer in layers {
            board.enabled_layers.insert(*layer);
        }
        board
    }

    #[tokio::test]
    async fn test_generate_plots_only_enabled_layers() {
        let mut board = board_with_layers(&[Layer::FrontCopper, Layer::EdgeCuts]);
        let scratch = TempDir::new().unwrap();
        let (reporter, mut rx) = ProgressReporter::channel(16);
        let export = ExportConfig::default();

        ArtifactGenerator::new(&export, &reporter)
            .generate(&mut board, scratch.path())
            .await
            .unwrap();

        assert!(scratch.path().join("widget-CuTop.gbr").exists());
        assert!(scratch.path().join("widget-EdgeCuts.gbr").exists());
        assert!(!scratch.path().join("widget-CuBottom.gbr").exists());
        assert!(!scratch.path().join("widget-MaskTop.gbr").exists());

        drop(reporter);
        let mut percents = Vec::new();
        while let Some(event) = rx.recv().await {
            percents.push(event.as_status());
        }
        assert_eq!(percents, vec![15, 20, 25]);
    }

    #[tokio::test]
    async fn test_generate_writes_drills_and_netlist() {
        let mut board = board_with_layers(&[Layer::FrontCopper]);
        let scratch = TempDir::new().unwrap();
        let (reporter, _rx) = ProgressReporter::channel(16);
        let export = ExportConfig::default();

        ArtifactGenerator::new(&export, &reporter)
            .generate(&mut board, scratch.path())
            .await
            .unwrap();

        assert!(scratch.path().join("widget-PTH.drl").exists());
        assert!(scratch.path().join("widget-NPTH.drl").exists());
        assert!(scratch.path().join("netlist.d356").exists());
    }

    #[tokio::test]
    async fn test_generate_zeroes_solder_mask_parameters() {
        let mut board = board_with_layers(&[Layer::FrontCopper]);
        board.solder_mask_margin = 50_000;
        board.solder_mask_min_width = 25_000;
        let scratch = TempDir::new().unwrap();
        let (reporter, _rx) = ProgressReporter::channel(16);
        let export = ExportConfig::default();

        ArtifactGenerator::new(&export, &reporter)
            .generate(&mut board, scratch.path())
            .await
            .unwrap();

        assert_eq!(board.solder_mask_margin, 0);
        assert_eq!(board.solder_mask_min_width, 0);
    }

    #[tokio::test]
    async fn test_netlist_filename_follows_config() {
        let mut board = board_with_layers(&[Layer::FrontCopper]);
        let scratch = TempDir::new().unwrap();
        let (reporter, _rx) = ProgressReporter::channel(16);
        let export = ExportConfig {
            netlist_filename: "continuity.d356".to_string(),
            ..ExportConfig::default()
        };

        ArtifactGenerator::new(&export, &reporter)
            .generate(&mut board, scratch.path())
            .await
            .unwrap();

        assert!(scratch.path().join("continuity.d356").exists());
    }
}
