//! All drawing. The layout is a header bar, a body split into the P-Q
//! plane on the left and the waveform stack on the right, and a footer
//! with the activity log and key help.

use std::f64::consts::PI;

use chrono::Local;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap,
};
use ratatui::Frame;

use pqd_core::{Solution, VarMode, PRESETS};

use crate::app::{App, PLANE_BOUND};

const CIRCLE_SEGMENTS: usize = 120;

/// Columns taken by the y-axis labels inside a chart block.
const Y_LABEL_GUTTER: u16 = 5;

pub fn draw_ui<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(20),
                Constraint::Length(7),
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, app, chunks[0]);
    draw_body(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let clock = Local::now().format("%H:%M:%S");
    let convention = app.model.convention();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "pqd: four-quadrant power explorer",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   {convention} convention   {clock}")),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_body<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(16),
                Constraint::Length(11),
                Constraint::Length(PRESETS.len() as u16 + 3),
            ]
            .as_ref(),
        )
        .split(columns[0]);

    let solution = app.solution();
    draw_plane(f, app, left[0], &solution);
    draw_readout(f, left[1], &solution);
    draw_presets(f, app, left[2]);
    draw_waveforms(f, app, columns[1]);
}

fn draw_plane<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect, solution: &Solution) {
    // Remember where the plot lands so mouse drags can be mapped back.
    app.plane_area = Some(inner_plot_area(area));

    let rating = app.model.rating().value();
    let circle: Vec<(f64, f64)> = (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let t = i as f64 * (2.0 * PI / CIRCLE_SEGMENTS as f64);
            (rating * t.cos(), rating * t.sin())
        })
        .collect();
    let p = solution.power.p.value();
    let q = solution.power.q.value();
    let vector = [(0.0, 0.0), (p, q)];
    let tip = [(p, q)];
    let p_axis = [(-PLANE_BOUND, 0.0), (PLANE_BOUND, 0.0)];
    let q_axis = [(0.0, -PLANE_BOUND), (0.0, PLANE_BOUND)];

    let place = solution
        .quadrant
        .map_or_else(|| "at the origin".to_string(), |quad| format!("quadrant {quad}"));

    let axis_style = Style::default().fg(Color::DarkGray);
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(axis_style)
            .data(&p_axis),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(axis_style)
            .data(&q_axis),
        Dataset::default()
            .name("rating")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Gray))
            .data(&circle),
        Dataset::default()
            .name("S")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .data(&vector),
        Dataset::default()
            .marker(Marker::Block)
            .style(Style::default().fg(Color::LightRed))
            .data(&tip),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("P-Q plane ({place})")),
        )
        .x_axis(
            Axis::default()
                .title("P (+ export)")
                .style(Style::default().fg(Color::Gray))
                .bounds([-PLANE_BOUND, PLANE_BOUND])
                .labels(plane_labels()),
        )
        .y_axis(
            Axis::default()
                .title("Q (+ overexcited)")
                .style(Style::default().fg(Color::Gray))
                .bounds([-PLANE_BOUND, PLANE_BOUND])
                .labels(plane_labels()),
        );
    f.render_widget(chart, area);
}

fn plane_labels() -> Vec<Span<'static>> {
    vec![
        Span::from(format!("{:.1}", -PLANE_BOUND)),
        Span::from("0"),
        Span::from(format!("{:.1}", PLANE_BOUND)),
    ]
}

/// Approximate the braille cell region inside the chart block: a border all
/// around, a gutter for the y labels, and a row of x labels at the bottom.
fn inner_plot_area(area: Rect) -> Rect {
    let left = Y_LABEL_GUTTER + 1;
    Rect {
        x: area.x + left,
        y: area.y + 1,
        width: area.width.saturating_sub(left + 1),
        height: area.height.saturating_sub(3),
    }
}

fn draw_readout<B: Backend>(f: &mut Frame<B>, area: Rect, solution: &Solution) {
    let pf = &solution.power_factor;
    let circuit = &solution.circuit;
    let angle = solution.point.angle().normalized();
    let var_mode = VarMode::from_vars(solution.power.q);
    let mode = solution
        .quadrant
        .map_or("no power exchange", |quad| quad.describe());

    let rows = vec![
        Row::new(vec![
            Cell::from("angle phi"),
            Cell::from(format!(
                "{:+.1} deg ({:+.4} rad)",
                angle.to_degrees().value(),
                angle.value()
            )),
        ]),
        Row::new(vec![
            Cell::from("apparent S"),
            Cell::from(format!("{}", solution.apparent)),
        ]),
        Row::new(vec![
            Cell::from("active P"),
            Cell::from(format!("{} ({})", solution.power.p, pf.flow)),
        ]),
        Row::new(vec![
            Cell::from("reactive Q"),
            Cell::from(format!("{} ({})", solution.power.q, var_mode)),
        ]),
        Row::new(vec![
            Cell::from("power factor"),
            Cell::from(format!("{:+.3} {} [{}]", pf.value, pf.phase, pf.convention)),
        ]),
        Row::new(vec![
            Cell::from("cos phi"),
            Cell::from(format!("{:+.3}", pf.cos_phi)),
        ]),
        Row::new(vec![
            Cell::from("current"),
            Cell::from(format!(
                "{} at {:+.1} deg",
                circuit.current,
                circuit.current_angle.normalized().to_degrees().value()
            )),
        ]),
        Row::new(vec![
            Cell::from("impedance"),
            Cell::from(format!(
                "{} at {:+.1} deg",
                circuit.impedance,
                circuit.impedance_angle.normalized().to_degrees().value()
            )),
        ]),
        Row::new(vec![Cell::from("mode"), Cell::from(mode)]),
    ];

    let table = Table::new(rows)
        .block(Block::default().borders(Borders::ALL).title("readout"))
        .widths(&[Constraint::Length(14), Constraint::Min(24)]);
    f.render_widget(table, area);
}

fn draw_presets<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let rows: Vec<Row> = PRESETS
        .iter()
        .enumerate()
        .map(|(idx, preset)| {
            let style = if Some(idx) == app.preset_index {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(preset.id),
                Cell::from(format!("{:>6.1}", preset.angle_deg)),
                Cell::from(format!("{:>4.2}", preset.magnitude)),
                Cell::from(preset.description),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows)
        .header(
            Row::new(vec!["preset", "deg", "S", "story"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("presets (p / P to cycle)"),
        )
        .widths(&[
            Constraint::Length(24),
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(18),
        ]);
    f.render_widget(table, area);
}

fn draw_waveforms<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    let set = app.waveforms();
    let (t_min, t_max) = app.sampler.window();
    let x_bounds = [t_min, t_max];

    let voltage = points(&set.time, &set.voltage);
    let current = points(&set.time, &set.current);
    let bound = peak(&[&set.voltage, &set.current]);
    let chart = wave_chart(
        "v(t) and i(t)",
        vec![
            line_dataset("v", &voltage, Color::Green),
            line_dataset("i", &current, Color::Yellow),
        ],
        x_bounds,
        bound,
    );
    f.render_widget(chart, panes[0]);

    let active = points(&set.time, &set.active_current);
    let reactive = points(&set.time, &set.reactive_current);
    let summed = points(&set.time, &set.summed_current);
    let bound = peak(&[&set.active_current, &set.reactive_current, &set.summed_current]);
    let chart = wave_chart(
        "current split",
        vec![
            line_dataset("active", &active, Color::Cyan),
            line_dataset("reactive", &reactive, Color::Magenta),
            line_dataset("sum", &summed, Color::Yellow),
        ],
        x_bounds,
        bound,
    );
    f.render_widget(chart, panes[1]);

    let active_power = points(&set.time, &set.active_power);
    let reactive_power = points(&set.time, &set.reactive_power);
    let apparent_power = points(&set.time, &set.apparent_power);
    let bound = peak(&[&set.active_power, &set.reactive_power, &set.apparent_power]);
    let chart = wave_chart(
        "instantaneous power",
        vec![
            line_dataset("p", &active_power, Color::Green),
            line_dataset("q", &reactive_power, Color::Red),
            line_dataset("s", &apparent_power, Color::Gray),
        ],
        x_bounds,
        bound,
    );
    f.render_widget(chart, panes[2]);
}

fn points(time: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    time.iter().copied().zip(values.iter().copied()).collect()
}

/// Largest magnitude across the series, with headroom so peaks stay off
/// the frame.
fn peak(columns: &[&[f64]]) -> f64 {
    let mut max = 0.0f64;
    for column in columns {
        for value in *column {
            max = max.max(value.abs());
        }
    }
    (max * 1.1).max(0.5)
}

fn line_dataset<'a>(name: &'a str, data: &'a [(f64, f64)], color: Color) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn wave_chart<'a>(
    title: &'a str,
    datasets: Vec<Dataset<'a>>,
    x_bounds: [f64; 2],
    y_bound: f64,
) -> Chart<'a> {
    let mid = (x_bounds[0] + x_bounds[1]) / 2.0;
    Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("ms")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![
                    Span::from(format!("{:.0}", x_bounds[0])),
                    Span::from(format!("{mid:.0}")),
                    Span::from(format!("{:.0}", x_bounds[1])),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([-y_bound, y_bound])
                .labels(vec![
                    Span::from(format!("{:.1}", -y_bound)),
                    Span::from("0"),
                    Span::from(format!("{y_bound:.1}")),
                ]),
        )
}

fn draw_footer<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(area);

    let entries: Vec<Line> = app.logs.iter().map(|entry| Line::from(entry.clone())).collect();
    let logs = Paragraph::new(entries)
        .block(Block::default().borders(Borders::ALL).title("activity"))
        .wrap(Wrap { trim: true });
    f.render_widget(logs, halves[0]);

    let keys = Paragraph::new(vec![
        Line::from("left/right angle, h/l fine, up/down magnitude"),
        Line::from("c convention, p/P presets, r reset, mouse drags the tip"),
        Line::from("q or esc quits"),
    ])
    .block(Block::default().borders(Borders::ALL).title("keys"))
    .wrap(Wrap { trim: true });
    f.render_widget(keys, halves[1]);
}
