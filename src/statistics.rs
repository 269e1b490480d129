//! # Statistics plotting
//!
//! Plots of per-row results of a stereo computation, only built with the `statistics` feature.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use plotters::prelude::*;

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Plot the total scanline cost of every row as a line chart.
pub fn plot_row_costs(path: &Path, row_costs: &[f64]) -> Result<()> {
    let max_cost = row_costs
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .fold(1.0f64, f64::max);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total scanline cost per row", ("sans-serif", 20).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_ranged(0..row_costs.len().max(1), 0.0..max_cost)
        .map_err(plot_error)?;

    chart.configure_mesh().draw().map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            row_costs.iter().enumerate().map(|(y, &c)| (y, c.min(max_cost))),
            &RED
        ))
        .map_err(plot_error)?
        .label("Total cost")
        .legend(|(x, y)|
            PathElement::new(vec![(x, y), (x + 20, y)], &RED
        ));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

fn plot_error<E: std::fmt::Debug>(err: E) -> Error {
    Error::Plot(format!("{:?}", err))
}
