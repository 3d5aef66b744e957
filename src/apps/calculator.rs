//! Four-function calculator with memory, driven by keyboard or mouse.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::{Component, EventCtx};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{WindowId, WindowManager, WindowOptions};

pub fn launch(wm: &mut WindowManager) -> WindowId {
    wm.create_window(
        "Calculator",
        28,
        14,
        WindowOptions {
            no_resize: true,
            ..Default::default()
        },
        |content, _| {
            content.set_component(Box::new(CalculatorComponent::new()));
        },
    )
}

const BUTTON_ROWS: [[&str; 5]; 5] = [
    ["MC", "MR", "M+", "M-", "C"],
    ["7", "8", "9", "/", "√"],
    ["4", "5", "6", "*", "%"],
    ["1", "2", "3", "-", "±"],
    ["0", ".", "=", "+", "⌫"],
];

/// Apply a binary operator. Division by zero yields 0 rather than an error
/// state, matching classic desk calculators.
pub fn calculate(a: f64, b: f64, op: char) -> f64 {
    match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => {
            if b == 0.0 {
                0.0
            } else {
                a / b
            }
        }
        _ => b,
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() || value.is_infinite() {
        "Error".to_string()
    } else {
        format!("{value}")
    }
}

pub struct CalculatorComponent {
    current: String,
    previous: Option<f64>,
    operator: Option<char>,
    waiting: bool,
    memory: f64,
    hits: Vec<(&'static str, Rect)>,
    pressed: Option<(&'static str, std::time::Instant)>,
}

impl Default for CalculatorComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorComponent {
    pub fn new() -> Self {
        Self {
            current: "0".to_string(),
            previous: None,
            operator: None,
            waiting: false,
            memory: 0.0,
            hits: Vec::new(),
            pressed: None,
        }
    }

    pub fn display(&self) -> &str {
        &self.current
    }

    fn current_value(&self) -> f64 {
        self.current.parse().unwrap_or(0.0)
    }

    fn digit(&mut self, d: char) {
        if self.waiting || self.current == "0" || self.current == "Error" {
            self.current = d.to_string();
            self.waiting = false;
        } else {
            self.current.push(d);
        }
    }

    fn decimal_point(&mut self) {
        if self.waiting || self.current == "Error" {
            self.current = "0.".to_string();
            self.waiting = false;
        } else if !self.current.contains('.') {
            self.current.push('.');
        }
    }

    fn operator(&mut self, op: char) {
        let value = self.current_value();
        let result = match (self.previous, self.operator) {
            // chained operations evaluate eagerly unless still waiting
            (Some(prev), Some(pending)) if !self.waiting => calculate(prev, value, pending),
            (Some(prev), _) => prev,
            (None, _) => value,
        };
        self.previous = Some(result);
        self.current = format_value(result);
        self.operator = Some(op);
        self.waiting = true;
    }

    fn equals(&mut self) {
        if let (Some(prev), Some(op)) = (self.previous, self.operator) {
            let result = calculate(prev, self.current_value(), op);
            self.current = format_value(result);
            self.previous = None;
            self.operator = None;
            self.waiting = true;
        }
    }

    fn clear(&mut self) {
        self.current = "0".to_string();
        self.previous = None;
        self.operator = None;
        self.waiting = false;
    }

    /// Apply one button label. The same table serves mouse and keyboard.
    pub fn press(&mut self, key: &str) {
        match key {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                self.digit(key.chars().next().unwrap());
            }
            "." => self.decimal_point(),
            "+" | "-" | "*" | "/" => self.operator(key.chars().next().unwrap()),
            "=" => self.equals(),
            "C" => self.clear(),
            "⌫" => {
                if !self.waiting && self.current != "Error" {
                    self.current.pop();
                    if self.current.is_empty() || self.current == "-" {
                        self.current = "0".to_string();
                    }
                }
            }
            "±" => {
                if self.current != "0" && self.current != "Error" {
                    if let Some(rest) = self.current.strip_prefix('-') {
                        self.current = rest.to_string();
                    } else {
                        self.current = format!("-{}", self.current);
                    }
                }
            }
            "%" => {
                self.current = format_value(self.current_value() / 100.0);
                self.waiting = true;
            }
            "√" => {
                let value = self.current_value();
                self.current = if value < 0.0 {
                    "Error".to_string()
                } else {
                    format_value(value.sqrt())
                };
                self.waiting = true;
            }
            "MC" => self.memory = 0.0,
            "MR" => {
                self.current = format_value(self.memory);
                self.waiting = true;
            }
            "M+" => {
                self.memory += self.current_value();
                self.waiting = true;
            }
            "M-" => {
                self.memory -= self.current_value();
                self.waiting = true;
            }
            _ => {}
        }
    }
}

impl Component for CalculatorComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.width < 15 || area.height < 7 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);

        // display row
        let display_style = Style::default().bg(theme::display_bg()).fg(theme::display_fg());
        let display_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width - 2,
            height: 1,
        };
        frame.fill(display_area, " ", display_style);
        let shown: String = self
            .current
            .chars()
            .rev()
            .take(display_area.width.saturating_sub(2) as usize)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let x = display_area.x + display_area.width - 1 - shown.chars().count() as u16;
        frame.set_string(x, display_area.y, &shown, display_style);
        if self.memory != 0.0 {
            frame.set_string(display_area.x, display_area.y, "M", display_style);
        }

        // button grid
        self.hits.clear();
        let grid_top = area.y + 2;
        let grid_height = area.height.saturating_sub(2);
        let cell_w = (area.width - 1) / 5;
        let cell_h = (grid_height / 5).max(1);
        let pressed = self
            .pressed
            .filter(|(_, at)| at.elapsed() < Duration::from_millis(150))
            .map(|(label, _)| label);
        for (r, row) in BUTTON_ROWS.iter().enumerate() {
            for (c, &label) in row.iter().enumerate() {
                let rect = Rect {
                    x: area.x + 1 + c as u16 * cell_w,
                    y: grid_top + r as u16 * cell_h,
                    width: cell_w.saturating_sub(1).max(1),
                    height: cell_h,
                };
                let style = if pressed == Some(label) || !focused {
                    base.add_modifier(Modifier::DIM)
                } else {
                    base.add_modifier(Modifier::BOLD)
                };
                frame.fill(rect, " ", style.bg(theme::status_bg()));
                let lx = rect.x + (rect.width.saturating_sub(label.chars().count() as u16)) / 2;
                frame.set_string(lx, rect.y + rect.height / 2, label, style.bg(theme::status_bg()));
                self.hits.push((label, rect));
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let label: Option<&'static str> = match key.code {
                    KeyCode::Char(c @ '0'..='9') => {
                        self.digit(c);
                        return true;
                    }
                    KeyCode::Char('.') => Some("."),
                    KeyCode::Char('+') => Some("+"),
                    KeyCode::Char('-') => Some("-"),
                    KeyCode::Char('*') => Some("*"),
                    KeyCode::Char('/') => Some("/"),
                    KeyCode::Char('=') | KeyCode::Enter => Some("="),
                    KeyCode::Char('%') => Some("%"),
                    KeyCode::Backspace => Some("⌫"),
                    KeyCode::Esc | KeyCode::Char('c') => Some("C"),
                    _ => None,
                };
                match label {
                    Some(label) => {
                        self.press(label);
                        true
                    }
                    None => false,
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .hits
                    .iter()
                    .find(|(_, rect)| rect_contains(*rect, mouse.column, mouse.row))
                    .map(|(label, _)| *label);
                if let Some(label) = hit {
                    self.pressed = Some((label, std::time::Instant::now()));
                    self.press(label);
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(calc: &mut CalculatorComponent, keys: &[&str]) {
        for key in keys {
            calc.press(key);
        }
    }

    #[test]
    fn digits_accumulate_and_clear_resets() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["1", "2", "3"]);
        assert_eq!(calc.display(), "123");
        calc.press("C");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn basic_arithmetic() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["7", "+", "5", "="]);
        assert_eq!(calc.display(), "12");
        calc.press("C");
        press_all(&mut calc, &["9", "-", "4", "="]);
        assert_eq!(calc.display(), "5");
        calc.press("C");
        press_all(&mut calc, &["6", "*", "7", "="]);
        assert_eq!(calc.display(), "42");
        calc.press("C");
        press_all(&mut calc, &["1", "5", "/", "4", "="]);
        assert_eq!(calc.display(), "3.75");
    }

    #[test]
    fn division_by_zero_yields_zero() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["8", "/", "0", "="]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn chained_operators_evaluate_eagerly() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["2", "+", "3", "+", "4", "="]);
        assert_eq!(calc.display(), "9");
        // swapping the operator before entering a number does not evaluate
        calc.press("C");
        press_all(&mut calc, &["2", "+", "-", "1", "="]);
        assert_eq!(calc.display(), "1");
    }

    #[test]
    fn result_feeds_the_next_entry() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["2", "+", "2", "=", "5"]);
        // typing after `=` starts a fresh number
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn decimal_point_is_idempotent() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["3", ".", "1", ".", "4"]);
        assert_eq!(calc.display(), "3.14");
    }

    #[test]
    fn square_root_of_a_negative_is_an_error() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["9", "±", "√"]);
        assert_eq!(calc.display(), "Error");
        // entering a digit recovers
        calc.press("7");
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn square_root_and_percent() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["8", "1", "√"]);
        assert_eq!(calc.display(), "9");
        calc.press("C");
        press_all(&mut calc, &["5", "0", "%"]);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn sign_toggle_and_backspace() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["4", "2", "±"]);
        assert_eq!(calc.display(), "-42");
        calc.press("±");
        assert_eq!(calc.display(), "42");
        calc.press("⌫");
        assert_eq!(calc.display(), "4");
        calc.press("⌫");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn memory_recall_add_subtract() {
        let mut calc = CalculatorComponent::new();
        press_all(&mut calc, &["1", "0", "M+"]);
        press_all(&mut calc, &["7", "M+"]);
        calc.press("MR");
        assert_eq!(calc.display(), "17");
        press_all(&mut calc, &["2", "M-"]);
        calc.press("MR");
        assert_eq!(calc.display(), "15");
        calc.press("MC");
        calc.press("MR");
        assert_eq!(calc.display(), "0");
    }
}
