//! 模拟表盘：60 个刻度、整点数字、三根指针。

use chrono::{NaiveTime, Timelike};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine},
};

const MARGIN: f64 = 1.15;
const SECOND_LEN: f64 = 0.9;
const MINUTE_LEN: f64 = 0.7;
const HOUR_LEN: f64 = 0.5;
const NUMERAL_RADIUS: f64 = 0.75;

/// 各指针的角度（度，12 点方向为 0，顺时针）
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn at(t: NaiveTime) -> Self {
        let s = f64::from(t.second()) + f64::from(t.nanosecond() % 1_000_000_000) / 1e9;
        Self {
            second: s * 6.0,
            minute: f64::from(t.minute()) * 6.0 + f64::from(t.second()) * 0.1,
            hour: f64::from(t.hour() % 12) * 30.0 + f64::from(t.minute()) * 0.5,
        }
    }
}

/// 终端字符格约为 1:2，按区域宽高换算坐标范围让圆保持圆形
fn bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let w = f64::from(area.width.max(1));
    let h = f64::from(area.height.max(1)) * 2.0;
    if w >= h {
        let x = MARGIN * w / h;
        ([-x, x], [-MARGIN, MARGIN])
    } else {
        let y = MARGIN * h / w;
        ([-MARGIN, MARGIN], [-y, y])
    }
}

fn point(angle_deg: f64, len: f64) -> (f64, f64) {
    let r = angle_deg.to_radians();
    (r.sin() * len, r.cos() * len)
}

fn hand(angle_deg: f64, len: f64, color: Color) -> CanvasLine {
    let (x2, y2) = point(angle_deg, len);
    CanvasLine {
        x1: 0.0,
        y1: 0.0,
        x2,
        y2,
        color,
    }
}

fn numeral(tick: u32) -> u32 {
    if tick == 0 { 12 } else { tick / 5 }
}

pub(super) fn draw_clock_face(f: &mut Frame, area: Rect, time: NaiveTime) {
    let (x_bounds, y_bounds) = bounds(area);
    let angles = HandAngles::at(time);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::White,
            });
            for tick in 0..60u32 {
                let angle = f64::from(tick) * 6.0;
                let major = tick % 5 == 0;
                let inner = if major { 0.85 } else { 0.93 };
                let (x1, y1) = point(angle, inner);
                let (x2, y2) = point(angle, 1.0);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: if major { Color::White } else { Color::DarkGray },
                });
                if major {
                    let (x, y) = point(angle, NUMERAL_RADIUS);
                    ctx.print(x, y, numeral(tick).to_string());
                }
            }
            ctx.layer();
            ctx.draw(&hand(angles.hour, HOUR_LEN, Color::White));
            ctx.draw(&hand(angles.minute, MINUTE_LEN, Color::White));
            ctx.draw(&hand(angles.second, SECOND_LEN, Color::Red));
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_hand_angles() {
        let t = NaiveTime::from_hms_micro_opt(15, 30, 15, 500_000).expect("valid time");
        let a = HandAngles::at(t);
        assert!(approx(a.second, 93.0));
        assert!(approx(a.minute, 181.5));
        assert!(approx(a.hour, 105.0));

        let noon = HandAngles::at(NaiveTime::from_hms_opt(0, 0, 0).expect("valid time"));
        assert!(approx(noon.hour, 0.0) && approx(noon.minute, 0.0) && approx(noon.second, 0.0));
    }

    #[test]
    fn test_numerals() {
        assert_eq!(numeral(0), 12);
        assert_eq!(numeral(5), 1);
        assert_eq!(numeral(55), 11);
    }

    #[test]
    fn test_hand_points_clockwise_from_top() {
        let (x, y) = point(90.0, 1.0);
        assert!(approx(x, 1.0) && y.abs() < 1e-9);
        let (x, y) = point(0.0, 0.5);
        assert!(x.abs() < 1e-9 && approx(y, 0.5));
    }

    #[test]
    fn test_bounds_keep_aspect() {
        let (x, y) = bounds(Rect::new(0, 0, 80, 20));
        assert!(approx(x[1] / y[1], 2.0));
        let (x, y) = bounds(Rect::new(0, 0, 20, 40));
        assert!(approx(y[1] / x[1], 4.0));
    }
}
