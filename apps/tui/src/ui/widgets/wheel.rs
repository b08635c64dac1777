use crate::domain::WheelOption;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;
use std::f64::consts::{FRAC_PI_2, TAU};

const SEGMENT_COLORS: [Color; 8] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::LightRed,
    Color::LightGreen,
];

const LABEL_WIDTH: usize = 14;

pub fn segment_color(index: usize) -> Color {
    SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
}

/// Canvas angle for a point `turns` clockwise from the top of the wheel.
fn canvas_angle(turns: f64) -> f64 {
    FRAC_PI_2 - TAU * turns
}

fn short_label(name: &str) -> String {
    if name.chars().count() <= LABEL_WIDTH {
        return name.to_string();
    }

    let mut label: String = name.chars().take(LABEL_WIDTH - 1).collect();
    label.push('…');
    label
}

/// Largest rect of roughly circular shape inside `area`; cells are about twice as tall as wide.
fn wheel_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draws the wheel with its pointer fixed at the top.
///
/// `rotation` is in turns; segment `i` sits under the pointer when the
/// fractional rotation falls in `[i / n, (i + 1) / n)`.
pub fn render_wheel(
    f: &mut Frame<'_>,
    area: Rect,
    options: &[WheelOption],
    rotation: f64,
    highlighted: Option<usize>,
) {
    if area.width < 8 || area.height < 4 {
        return;
    }

    let square = wheel_area(area);
    #[allow(clippy::cast_precision_loss)]
    let segments = options.len() as f64;

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                let radius = 0.9;

                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius,
                    color: Color::White,
                });

                if options.is_empty() {
                    return;
                }

                for (i, option) in options.iter().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let start = i as f64 / segments - rotation;
                    let boundary = canvas_angle(start);

                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: boundary.cos() * radius,
                        y2: boundary.sin() * radius,
                        color: Color::DarkGray,
                    });

                    let middle = canvas_angle(start + 0.5 / segments);
                    let label_radius = radius * 0.55;
                    let style = if highlighted == Some(i) {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(segment_color(i))
                    };

                    let label = short_label(&option.name);
                    #[allow(clippy::cast_precision_loss)]
                    let half_label = label.chars().count() as f64 / f64::from(square.width);

                    ctx.print(
                        middle.cos().mul_add(label_radius, -half_label),
                        middle.sin() * label_radius,
                        TextLine::from(Span::styled(label, style)),
                    );
                }

                // Pointer
                ctx.draw(&CanvasLine {
                    x1: -0.06,
                    y1: 1.0,
                    x2: 0.0,
                    y2: radius - 0.05,
                    color: Color::Yellow,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.06,
                    y1: 1.0,
                    x2: 0.0,
                    y2: radius - 0.05,
                    color: Color::Yellow,
                });
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.05,
                    color: Color::Yellow,
                });
            })
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0]),
        square,
    );
}
