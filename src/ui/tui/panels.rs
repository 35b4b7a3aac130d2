use super::styles::{button_style, frame_style, text_style};
use super::utils::{cpu_temp_label, cpu_usage_label, input_tail, now_playing_label};
use crate::kiosk::{KioskLayout, KioskView};
use crate::now_playing::NowPlayingRecord;
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub(super) fn draw_input(f: &mut Frame, layout: &KioskLayout, view: &KioskView<'_>) {
    let inner = layout.input_line();
    let (tail, cursor_col) = input_tail(view.input, inner.width);
    let p = Paragraph::new(tail).style(text_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(frame_style())
            .title("Add Alarm (HH:MM)"),
    );
    f.render_widget(p, layout.input);

    if view.cursor_visible && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position(Position::new(inner.x + cursor_col, inner.y));
    }
}

pub(super) fn draw_alarms(f: &mut Frame, area: Rect, view: &KioskView<'_>) {
    let items: Vec<ListItem> = view
        .alarm_labels()
        .map(|a| ListItem::new(Line::from(a.as_str().to_owned())))
        .collect();
    let list = List::new(items).style(text_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(frame_style())
            .title("Alarms"),
    );
    f.render_widget(list, area);
}

pub(super) fn draw_button(f: &mut Frame, area: Rect, label: &str, active: bool) {
    let p = Paragraph::new(label.to_owned())
        .alignment(Alignment::Center)
        .style(button_style(active))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(button_style(active)),
        );
    f.render_widget(p, area);
}

pub(super) fn draw_metrics(f: &mut Frame, area: Rect, view: &KioskView<'_>) {
    let lines = vec![
        Line::from(cpu_usage_label(&view.metrics)),
        Line::from(cpu_temp_label(&view.metrics)),
    ];
    f.render_widget(Paragraph::new(lines).style(text_style()), area);
}

pub(super) fn draw_now_playing(f: &mut Frame, area: Rect, record: &NowPlayingRecord) {
    f.render_widget(
        Paragraph::new(now_playing_label(record)).style(text_style()),
        area,
    );
}
