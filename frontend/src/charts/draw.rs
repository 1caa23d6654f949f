use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_canvas::CanvasBackend;
use shared::chart::geometry::ring_segment;
use shared::chart::{Dataset, Legend};
use shared::Color as CssColor;
use shared::{nice_upper_bound, smooth_path, ChartConfig, ChartKind, HitMap, Theme};
use web_sys::HtmlCanvasElement;

type Area = DrawingArea<CanvasBackend, Shift>;

/// Bar thickness as a share of its category slot.
const BAR_FRACTION: f64 = 0.72;
const CURVE_SAMPLES: usize = 12;
const MIN_CANVAS_WIDTH: u32 = 120;

fn err<E: std::fmt::Display>(e: E) -> String {
    e.to_string()
}

fn plot_color(css: Option<&str>, fallback: &str) -> RGBAColor {
    let fallback = CssColor::parse_or(fallback, CssColor::rgb(0x64, 0x74, 0x8b));
    let c = css.map(|c| CssColor::parse_or(c, fallback)).unwrap_or(fallback);
    RGBAColor(c.r, c.g, c.b, c.a)
}

/// Paint `config` onto `canvas` and return where each data index landed.
pub fn draw_chart(
    canvas: &HtmlCanvasElement,
    config: &ChartConfig,
    theme: &Theme,
) -> Result<HitMap, String> {
    size_canvas(canvas, config);

    let backend = CanvasBackend::with_canvas_object(canvas.clone())
        .ok_or_else(|| "Canvas has no 2D drawing context".to_string())?;
    let root = backend.into_drawing_area();
    root.fill(&plot_color(Some(theme.background_color.as_str()), "#ffffff")).map_err(err)?;

    let hits = match config.kind {
        ChartKind::Doughnut => draw_doughnut(&root, config, theme)?,
        ChartKind::Line => draw_line(&root, config, theme)?,
        ChartKind::Bar => draw_bar(&root, config, theme)?,
    };

    root.present().map_err(err)?;
    Ok(hits)
}

/// Fit the canvas to its container the way a responsive chart does.
fn size_canvas(canvas: &HtmlCanvasElement, config: &ChartConfig) {
    if !config.options.responsive {
        return;
    }
    let container_width = canvas
        .parent_element()
        .map(|parent| parent.client_width())
        .filter(|width| *width > 0)
        .map(|width| width as u32)
        .unwrap_or_else(|| canvas.width());
    let width = container_width.max(MIN_CANVAS_WIDTH);
    canvas.set_width(width);
    if config.options.maintain_aspect_ratio {
        canvas.set_height((width as f64 / config.kind.aspect_ratio()).round() as u32);
    }
}

struct LegendEntry {
    label: String,
    color: RGBAColor,
    width: u32,
}

/// Entries wrapped into centered rows that fit `width`.
fn layout_legend(
    root: &Area,
    items: Vec<(String, RGBAColor)>,
    legend: &Legend,
    theme: &Theme,
    width: u32,
) -> Vec<Vec<LegendEntry>> {
    let font = (theme.font_family.as_str(), legend.font_size as f64).into_font().color(&BLACK);
    let marker = legend.font_size;
    let mut rows: Vec<Vec<LegendEntry>> = Vec::new();
    let mut row_width = 0;

    for (label, color) in items {
        let text_width = root
            .estimate_text_size(&label, &font)
            .map(|(w, _)| w)
            .unwrap_or((label.chars().count() as f64 * legend.font_size as f64 * 0.6) as u32);
        let entry_width = marker + 6 + text_width;
        let needs_new_row = rows.is_empty() || row_width + legend.padding + entry_width > width;
        if needs_new_row {
            rows.push(Vec::new());
            row_width = 0;
        } else {
            row_width += legend.padding;
        }
        row_width += entry_width;
        if let Some(row) = rows.last_mut() {
            row.push(LegendEntry { label, color, width: entry_width });
        }
    }
    rows
}

fn legend_row_height(legend: &Legend) -> u32 {
    legend.font_size + legend.padding / 2
}

/// Split off space at the bottom for the legend, if the chart shows one.
fn split_legend(
    root: &Area,
    items: Vec<(String, RGBAColor)>,
    legend: &Legend,
    theme: &Theme,
) -> (Area, Option<(Area, Vec<Vec<LegendEntry>>)>) {
    let (width, height) = root.dim_in_pixel();
    if !legend.display || items.is_empty() {
        return (root.clone(), None);
    }
    let rows = layout_legend(root, items, legend, theme, width);
    let legend_height =
        (rows.len() as u32 * legend_row_height(legend) + legend.padding).min(height / 2);
    let (plot, legend_area) = root.split_vertically(height - legend_height);
    (plot, Some((legend_area, rows)))
}

fn draw_legend(
    area: &Area,
    rows: &[Vec<LegendEntry>],
    legend: &Legend,
    theme: &Theme,
) -> Result<(), String> {
    let (width, _) = area.dim_in_pixel();
    let text_color = plot_color(Some(theme.text_color.as_str()), "#64748b");
    let style = (theme.font_family.as_str(), legend.font_size as f64)
        .into_font()
        .color(&text_color)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let radius = (legend.font_size / 2).max(2) as i32 - 1;
    let row_height = legend_row_height(legend) as i32;

    for (row_index, row) in rows.iter().enumerate() {
        let row_width: u32 =
            row.iter().map(|e| e.width).sum::<u32>() + legend.padding * (row.len() as u32 - 1);
        let mut x = (width.saturating_sub(row_width) / 2) as i32;
        let y = (legend.padding / 2) as i32 + row_index as i32 * row_height + row_height / 2;

        for entry in row {
            if legend.use_point_style {
                area.draw(&Circle::new((x + radius, y), radius, entry.color.filled()))
                    .map_err(err)?;
            } else {
                area.draw(&Rectangle::new(
                    [(x, y - radius), (x + 2 * radius, y + radius)],
                    entry.color.filled(),
                ))
                .map_err(err)?;
            }
            area.draw(&Text::new(entry.label.clone(), (x + 2 * radius + 6, y), style.clone()))
                .map_err(err)?;
            x += (entry.width + legend.padding) as i32;
        }
    }
    Ok(())
}

fn draw_doughnut(root: &Area, config: &ChartConfig, theme: &Theme) -> Result<HitMap, String> {
    let dataset = config
        .data
        .datasets
        .first()
        .ok_or_else(|| "Doughnut chart has no dataset".to_string())?;
    let items = config
        .data
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), plot_color(dataset.color_at(i), &theme.bar_color)))
        .collect();
    let (plot, legend) = split_legend(root, items, &config.options.legend, theme);

    let (width, height) = plot.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let outer = (width.min(height) as f64 / 2.0 - dataset.hover_offset as f64).max(1.0);
    let inner = outer * config.options.cutout_percent.unwrap_or(0) as f64 / 100.0;
    let hits = HitMap::radial(center, inner, outer, &dataset.data);

    if let HitMap::Radial { ends, .. } = &hits {
        let mut start = 0.0;
        for (index, end) in ends.iter().enumerate() {
            if *end > start {
                let points: Vec<(i32, i32)> = ring_segment(center, inner, outer, start, *end)
                    .into_iter()
                    .map(|(x, y)| (x.round() as i32, y.round() as i32))
                    .collect();
                let color = plot_color(dataset.color_at(index), &theme.bar_color);
                plot.draw(&Polygon::new(points.clone(), color.filled())).map_err(err)?;
                if dataset.border_width > 0 {
                    let edge = plot_color(Some(theme.background_color.as_str()), "#ffffff");
                    plot.draw(&PathElement::new(points, edge.stroke_width(dataset.border_width)))
                        .map_err(err)?;
                }
            }
            start = *end;
        }
    }

    if let Some((area, rows)) = legend {
        draw_legend(&area, &rows, &config.options.legend, theme)?;
    }
    Ok(hits)
}

fn legend_items(datasets: &[Dataset], theme: &Theme) -> Vec<(String, RGBAColor)> {
    datasets
        .iter()
        .map(|d| {
            let color = d.border_color.as_deref().or_else(|| d.color_at(0));
            (d.label.clone().unwrap_or_default(), plot_color(color, &theme.bar_color))
        })
        .collect()
}

/// Lowest value the value axis must show.
fn value_floor(config: &ChartConfig) -> f64 {
    let min = config
        .data
        .datasets
        .iter()
        .flat_map(|d| d.data.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::min);
    if min < 0.0 {
        -nice_upper_bound(-min)
    } else {
        0.0
    }
}

fn draw_line(root: &Area, config: &ChartConfig, theme: &Theme) -> Result<HitMap, String> {
    let items = legend_items(&config.data.datasets, theme);
    let (plot, legend) = split_legend(root, items, &config.options.legend, theme);

    let labels = &config.data.labels;
    let count = labels.len();
    let x_range = if count > 1 { 0.0..(count - 1) as f64 } else { -0.5..0.5 };
    let y_min = value_floor(config);
    let y_max = nice_upper_bound(config.max_value());

    let mut chart = ChartBuilder::on(&plot)
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_min..y_max)
        .map_err(err)?;

    configure_axes(&mut chart, config, theme, count)?;

    let (plot_width, plot_height) = chart.plotting_area().dim_in_pixel();
    let scale_x = plot_width as f64 / (x_range.end - x_range.start);
    let scale_y = plot_height as f64 / (y_max - y_min);

    for dataset in &config.data.datasets {
        let line_color = plot_color(dataset.border_color.as_deref(), &theme.bar_color);
        let points: Vec<(f64, f64)> = dataset
            .data
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (i as f64, *v))
            .collect();

        let scaled: Vec<(f64, f64)> =
            points.iter().map(|(x, y)| (x * scale_x, y * scale_y)).collect();
        let curve: Vec<(f64, f64)> = smooth_path(&scaled, dataset.tension, CURVE_SAMPLES)
            .into_iter()
            .map(|(x, y)| (x / scale_x, (y / scale_y).clamp(y_min, y_max)))
            .collect();

        if dataset.fill {
            let fill = plot_color(dataset.color_at(0), &theme.bar_color);
            chart
                .draw_series(AreaSeries::new(
                    curve.iter().copied(),
                    0.0_f64.max(y_min),
                    fill.filled(),
                ))
                .map_err(err)?;
        }
        chart
            .draw_series(LineSeries::new(
                curve.iter().copied(),
                line_color.stroke_width(dataset.border_width),
            ))
            .map_err(err)?;

        if dataset.point_radius > 0 {
            let fill = plot_color(dataset.point_background_color.as_deref(), &theme.bar_color);
            let border = plot_color(dataset.point_border_color.as_deref(), "#ffffff");
            let radius = dataset.point_radius as i32;
            chart
                .draw_series(points.iter().map(|p| Circle::new(*p, radius, fill.filled())))
                .map_err(err)?;
            if dataset.point_border_width > 0 {
                chart
                    .draw_series(points.iter().map(|p| {
                        Circle::new(*p, radius, border.stroke_width(dataset.point_border_width))
                    }))
                    .map_err(err)?;
            }
        }
    }

    let centers: Vec<f64> = (0..count)
        .map(|i| chart.backend_coord(&(i as f64, y_min)).0 as f64)
        .collect();
    let top = chart.backend_coord(&(x_range.start, y_max)).1 as f64;
    let bottom = chart.backend_coord(&(x_range.start, y_min)).1 as f64;

    if let Some((area, rows)) = legend {
        draw_legend(&area, &rows, &config.options.legend, theme)?;
    }
    Ok(HitMap::columns(&centers, top, bottom))
}

fn draw_bar(root: &Area, config: &ChartConfig, theme: &Theme) -> Result<HitMap, String> {
    let items = legend_items(&config.data.datasets, theme);
    let (plot, legend) = split_legend(root, items, &config.options.legend, theme);

    let count = config.data.labels.len();
    let x_range = -0.5..(count as f64 - 0.5);
    let y_min = value_floor(config);
    let y_max = nice_upper_bound(config.max_value());

    let mut chart = ChartBuilder::on(&plot)
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_min..y_max)
        .map_err(err)?;

    configure_axes(&mut chart, config, theme, count)?;

    let half = BAR_FRACTION / 2.0;
    for dataset in &config.data.datasets {
        chart
            .draw_series(
                dataset
                    .data
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, v)| {
                        let x = i as f64;
                        let color = plot_color(dataset.color_at(i), &theme.bar_color);
                        Rectangle::new([(x - half, 0.0), (x + half, *v)], color.filled())
                    }),
            )
            .map_err(err)?;
    }

    let centers: Vec<f64> = (0..count)
        .map(|i| chart.backend_coord(&(i as f64, 0.0)).0 as f64)
        .collect();
    let top = chart.backend_coord(&(x_range.start, y_max)).1 as f64;
    let bottom = chart.backend_coord(&(x_range.start, y_min)).1 as f64;

    if let Some((area, rows)) = legend {
        draw_legend(&area, &rows, &config.options.legend, theme)?;
    }
    Ok(HitMap::columns(&centers, top, bottom))
}

type Cartesian<'a> = ChartContext<'a, CanvasBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Category labels on x, formatted values on y, grid per the config's scales.
fn configure_axes(
    chart: &mut Cartesian<'_>,
    config: &ChartConfig,
    theme: &Theme,
    count: usize,
) -> Result<(), String> {
    let labels = &config.data.labels;
    let category = |v: &f64| {
        let index = v.round();
        if (v - index).abs() < 1e-6 && index >= 0.0 && (index as usize) < labels.len() {
            labels[index as usize].clone()
        } else {
            String::new()
        }
    };
    let scales = config.options.scales.as_ref();
    let value = |v: &f64| match scales {
        Some(scales) => scales.y.tick_label(*v),
        None => shared::axis_tick_label(*v),
    };

    let text_color = plot_color(Some(theme.text_color.as_str()), "#64748b");
    let axis_color = plot_color(Some(theme.border_color.as_str()), "#e2e8f0");
    let grid_color = plot_color(
        scales.and_then(|s| s.y.grid_color.as_deref()),
        &theme.grid_color,
    );
    let font = (theme.font_family.as_str(), 12.0).into_font().color(&text_color);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(count.max(1))
        .y_labels(6)
        .x_label_formatter(&category)
        .y_label_formatter(&value)
        .label_style(font)
        .axis_style(&axis_color)
        .bold_line_style(&grid_color)
        .light_line_style(&TRANSPARENT);
    if scales.map_or(true, |s| !s.x.grid_display) {
        mesh.disable_x_mesh();
    }
    if scales.map_or(false, |s| !s.y.grid_display) {
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(err)
}
