use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{
    theme::Theme,
    widgets::{centered_rect, render_hints},
};
use crate::state::form::{Field, FormState};

const LABEL_WIDTH: u16 = 22;

/// Draws the whole prediction form.
pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(70, 96, area);
    let form_height = Field::ALL.len() as u16 - 1 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // title
            Constraint::Length(form_height), // fields
            Constraint::Length(1),           // spacer
            Constraint::Length(3),           // predict button
            Constraint::Length(1),           // spacer
            Constraint::Length(1),           // result
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled("AI Salary Prediction", Theme::title()))
            .alignment(Alignment::Center),
        chunks[0],
    );

    draw_fields(f, chunks[1], state);
    draw_button(f, chunks[3], state.focused() == Field::Predict);

    if let Some(prediction) = &state.result {
        let style = if prediction.is_positive() {
            Theme::good()
        } else {
            Theme::bad()
        };

        f.render_widget(
            Paragraph::new(Span::styled(prediction.to_string(), style))
                .alignment(Alignment::Center),
            chunks[5],
        );
    }

    render_hints(
        f,
        chunks[7],
        &[
            ("↑/↓", "move"),
            ("←/→", "change option"),
            ("enter", "predict"),
            ("esc", "quit"),
        ],
    );

    if let Some(err) = &state.error {
        draw_error_popup(f, area, err);
    }
}

fn draw_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::muted())
        .style(Theme::panel());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = Field::ALL
        .iter()
        .filter(|&&field| field != Field::Predict)
        .map(|&field| field_line(state, field))
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn field_line(state: &FormState, field: Field) -> Line<'_> {
    let focused = state.focused() == field;
    let label = format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH as usize);

    let value = if FormState::is_dropdown(field) {
        format!("< {} >", state.value(field))
    } else if focused {
        format!("{}█", state.value(field))
    } else {
        state.value(field).to_string()
    };

    let (label_style, value_style) = if focused {
        (Theme::focused(), Theme::focused())
    } else {
        (Theme::muted(), Theme::text())
    };

    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(value, value_style),
    ])
}

fn draw_button(f: &mut Frame, area: Rect, focused: bool) {
    let area = centered_rect(40, 100, area);

    f.render_widget(
        Paragraph::new(Field::Predict.label())
            .alignment(Alignment::Center)
            .style(Theme::button(focused))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::button(focused)),
            ),
        area,
    );
}

fn draw_error_popup(f: &mut Frame, area: Rect, msg: &str) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(popup);

    f.render_widget(
        Paragraph::new(msg)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::bad())
                    .title(" Error ")
                    .title_style(Theme::bad()),
            )
            .style(Theme::panel())
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    render_hints(f, chunks[1], &[("any key", "close")]);
}
