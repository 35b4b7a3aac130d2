use ratatui::layout::{Constraint, Direction, Layout, Rect};

const LEFT_WIDTH: u16 = 26;
const RIGHT_WIDTH: u16 = 40;
const INPUT_HEIGHT: u16 = 3;
const STOP_HEIGHT: u16 = 3;
const METRICS_HEIGHT: u16 = 2;
const TRANSPORT_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// 闹钟列表每行占一个字符格
pub const ROW_HEIGHT: u16 = 1;

/// 屏幕区域划分；绘制和点击判定共用同一份布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KioskLayout {
    pub input: Rect,
    pub alarms: Rect,
    pub stop: Rect,
    pub clock: Rect,
    pub metrics: Rect,
    pub prev: Rect,
    pub play_pause: Rect,
    pub next: Rect,
    pub now_playing: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Input,
    /// 闹钟列表内部，值为指针所在行（可能超过列表长度）
    AlarmRow(usize),
    Stop,
    Prev,
    PlayPause,
    Next,
}

impl KioskLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
            .split(area);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(LEFT_WIDTH),
                Constraint::Min(0),
                Constraint::Length(RIGHT_WIDTH),
            ])
            .split(rows[0]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(STOP_HEIGHT),
            ])
            .split(cols[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(METRICS_HEIGHT),
                Constraint::Length(TRANSPORT_HEIGHT),
            ])
            .split(cols[2]);
        let transport = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(right[2]);

        Self {
            input: left[0],
            alarms: left[1],
            stop: left[2],
            clock: cols[1],
            metrics: right[1],
            prev: transport[0],
            play_pause: transport[1],
            next: transport[2],
            now_playing: rows[1],
        }
    }

    /// 闹钟列表边框内的区域，第一行就是 list_top
    pub fn alarm_rows(&self) -> Rect {
        inner(self.alarms)
    }

    /// 输入框内第一行，光标显示在这里
    pub fn input_line(&self) -> Rect {
        inner(self.input)
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Region> {
        let rows = self.alarm_rows();
        if contains(rows, x, y) {
            return Some(Region::AlarmRow(usize::from((y - rows.y) / ROW_HEIGHT)));
        }
        [
            (self.input, Region::Input),
            (self.stop, Region::Stop),
            (self.prev, Region::Prev),
            (self.play_pause, Region::PlayPause),
            (self.next, Region::Next),
        ]
        .into_iter()
        .find(|(rect, _)| contains(*rect, x, y))
        .map(|(_, region)| region)
    }
}

fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && y >= r.y && x < r.x.saturating_add(r.width) && y < r.y.saturating_add(r.height)
}
