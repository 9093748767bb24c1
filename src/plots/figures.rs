//! Multi-panel figures saved as a PNG/PDF pair.
//!
//! Each figure is drawn twice from the same inputs and the same node layout:
//! once through the bitmap backend for the PNG and once through the SVG
//! backend, which is then converted to the PDF.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::config::AppConfig;
use crate::core::graph::Graph;
use crate::core::layout::{LayoutParams, Position, layout};
use crate::core::shape::{ShapeError, check_series, check_square};

use super::export::svg_to_pdf;
use super::{
    FONT, plot_corr_vals, plot_graph_with_layout, plot_heatmap_evolutions, plot_sum_corr_mat,
    plot_time_evolution, plot_time_to_sync,
};

pub const DEFAULT_OUTPUT_DIR: &str = "images";
pub const CORR_MAT_DCM_STEM: &str = "corrMat_dcm";
pub const TIME_CORR_STEM: &str = "time_corr";

/// A figure that can be drawn onto any backend.
pub trait Figure {
    /// File name shared by the PNG and PDF outputs, without extension.
    fn stem(&self) -> &'static str;

    fn size(&self) -> (u32, u32);

    /// Shape checks run before any file is created.
    fn validate(&self) -> Result<(), ShapeError>;

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static;
}

/// 1×3 grid: network, correlation matrix, time to synchronization.
pub struct CorrMatDcm<'a> {
    pub graph: &'a Graph,
    pub layout: &'a [Position],
    pub sum_rho_avg: &'a [Vec<f32>],
    pub d_average: &'a [Vec<f32>],
    pub no_runs: usize,
}

impl Figure for CorrMatDcm<'_> {
    fn stem(&self) -> &'static str {
        CORR_MAT_DCM_STEM
    }

    fn size(&self) -> (u32, u32) {
        (1500, 520)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_square("sum_rho_avg", self.sum_rho_avg)?;
        check_square("d_average", self.d_average)?;
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let body = root.titled(
            &format!("Average over {} runs", self.no_runs),
            (FONT, 22.0).into_font(),
        )?;
        let panels = body.split_evenly((1, 3));
        plot_graph_with_layout(self.graph, self.layout, &panels[0])?;
        plot_sum_corr_mat(self.sum_rho_avg, &panels[1])?;
        plot_time_to_sync(self.d_average, &panels[2])?;
        Ok(())
    }
}

/// 2×2 grid: network and phase trajectories on top, heat map and
/// correlation values below.
pub struct TimeCorr<'a> {
    pub graph: &'a Graph,
    pub layout: &'a [Position],
    pub sol: &'a [Vec<f32>],
    pub corr_vals: &'a [Vec<f32>],
    pub omega: f32,
    pub t: &'a [f32],
}

impl Figure for TimeCorr<'_> {
    fn stem(&self) -> &'static str {
        TIME_CORR_STEM
    }

    fn size(&self) -> (u32, u32) {
        (1280, 960)
    }

    fn validate(&self) -> Result<(), ShapeError> {
        check_series("sol", self.sol, self.t)?;
        check_series("corr_vals", self.corr_vals, self.t)?;
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let body = root.titled(
            &format!("Time evolution and correlation, Ω = {}", self.omega),
            (FONT, 22.0).into_font(),
        )?;
        let panels = body.split_evenly((2, 2));
        plot_graph_with_layout(self.graph, self.layout, &panels[0])?;
        plot_time_evolution(self.sol, self.t, self.omega, &panels[1])?;
        plot_heatmap_evolutions(self.sol, self.t, &panels[2])?;
        plot_corr_vals(self.corr_vals, self.t, &panels[3])?;
        Ok(())
    }
}

/// Paths written for one figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFigure {
    pub png: PathBuf,
    pub pdf: PathBuf,
}

/// Renders figures into a fixed output directory.
#[derive(Debug, Clone)]
pub struct FigureWriter {
    out_dir: PathBuf,
    create_dir: bool,
    layout: LayoutParams,
}

impl Default for FigureWriter {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            create_dir: false,
            layout: LayoutParams::default(),
        }
    }
}

impl FigureWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Default::default()
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            out_dir: PathBuf::from(&cfg.output.dir),
            create_dir: cfg.output.create_dir,
            layout: cfg.layout,
        }
    }

    /// Create the output directory when it is missing instead of failing.
    pub fn create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    pub fn layout_params(mut self, params: LayoutParams) -> Self {
        self.layout = params;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Network, averaged correlation matrix and time-to-sync matrix, titled
    /// with the number of runs. Writes `corrMat_dcm.png` and `corrMat_dcm.pdf`.
    pub fn corr_mat_dcm(
        &self,
        graph: &Graph,
        sum_rho_avg: &[Vec<f32>],
        d_average: &[Vec<f32>],
        no_runs: usize,
    ) -> Result<SavedFigure, Box<dyn Error>> {
        let positions = layout(graph, &self.layout);
        self.save(&CorrMatDcm {
            graph,
            layout: &positions,
            sum_rho_avg,
            d_average,
            no_runs,
        })
    }

    /// Network, phase trajectories with driver, heat map and correlation
    /// values. Writes `time_corr.png` and `time_corr.pdf`.
    pub fn time_corr(
        &self,
        graph: &Graph,
        sol: &[Vec<f32>],
        corr_vals: &[Vec<f32>],
        omega: f32,
        t: &[f32],
    ) -> Result<SavedFigure, Box<dyn Error>> {
        let positions = layout(graph, &self.layout);
        self.save(&TimeCorr {
            graph,
            layout: &positions,
            sol,
            corr_vals,
            omega,
            t,
        })
    }

    /// Writes both files or neither: the PDF is built in memory before
    /// anything touches the output directory.
    pub fn save<F: Figure>(&self, figure: &F) -> Result<SavedFigure, Box<dyn Error>> {
        figure.validate()?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, figure.size()).into_drawing_area();
            figure.draw(&root)?;
            root.present()?;
        }
        let pdf_bytes = svg_to_pdf(&svg)?;

        if self.create_dir {
            fs::create_dir_all(&self.out_dir)?;
        }
        let png = self.out_dir.join(format!("{}.png", figure.stem()));
        let pdf = self.out_dir.join(format!("{}.pdf", figure.stem()));

        fs::write(&pdf, pdf_bytes)?;
        if let Err(err) = render_png(figure, &png) {
            let _ = fs::remove_file(&png);
            let _ = fs::remove_file(&pdf);
            return Err(err);
        }
        info!(png = %png.display(), pdf = %pdf.display(), "saved figure");

        Ok(SavedFigure { png, pdf })
    }
}

fn render_png<F: Figure>(figure: &F, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
    figure.draw(&root)?;
    root.present()?;
    Ok(())
}

/// [`FigureWriter::corr_mat_dcm`] into `images/`.
pub fn plot_corr_mat_dcm(
    graph: &Graph,
    sum_rho_avg: &[Vec<f32>],
    d_average: &[Vec<f32>],
    no_runs: usize,
) -> Result<SavedFigure, Box<dyn Error>> {
    FigureWriter::default().corr_mat_dcm(graph, sum_rho_avg, d_average, no_runs)
}

/// [`FigureWriter::time_corr`] into `images/`.
pub fn plot_time_corr(
    graph: &Graph,
    sol: &[Vec<f32>],
    corr_vals: &[Vec<f32>],
    omega: f32,
    t: &[f32],
) -> Result<SavedFigure, Box<dyn Error>> {
    FigureWriter::default().time_corr(graph, sol, corr_vals, omega, t)
}
