use ratatui::style::{Color, Modifier, Style};

pub(super) fn frame_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub(super) fn button_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::White)
    }
}

pub(super) fn text_style() -> Style {
    Style::default().fg(Color::White)
}
