//! Gamepad widget: one outlined shape per button, lit while pressed

use crate::config::ViewerConfig;
use crate::controller::buttons::BUTTON_COUNT;
use crate::controller::{Button, ButtonSet};
use eframe::egui::{self, pos2, vec2, Color32, Rect, Sense, Stroke, StrokeKind};

/// Outline of a pressed button (#fcba03)
pub const ACTIVE_COLOR: Color32 = Color32::from_rgb(0xfc, 0xba, 0x03);
pub const INACTIVE_COLOR: Color32 = Color32::GRAY;

/// Offset of the widget frame from the canvas origin
const FRAME_INSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

/// Placement of a button indicator, relative to the canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub position: (f32, f32),
    pub shape: Shape,
}

/// Where each button is drawn on the widget
pub fn indicator(button: Button) -> Indicator {
    let (position, shape) = match button {
        Button::A => ((0.8, 0.7), Shape::Circle),
        Button::B => ((0.85, 0.6), Shape::Circle),
        Button::X => ((0.75, 0.6), Shape::Circle),
        Button::Y => ((0.8, 0.5), Shape::Circle),
        Button::DpadUp => ((0.2, 0.5), Shape::Square),
        Button::DpadDown => ((0.2, 0.7), Shape::Square),
        Button::DpadLeft => ((0.15, 0.6), Shape::Square),
        Button::DpadRight => ((0.25, 0.6), Shape::Square),
        Button::Start => ((0.55, 0.5), Shape::Circle),
        Button::Back => ((0.45, 0.5), Shape::Circle),
        Button::LeftThumb => ((0.4, 0.7), Shape::Circle),
        Button::RightThumb => ((0.6, 0.7), Shape::Circle),
        Button::LeftShoulder => ((0.3, 0.35), Shape::Square),
        Button::RightShoulder => ((0.7, 0.35), Shape::Square),
        Button::LeftTrigger => ((0.2, 0.2), Shape::Square),
        Button::RightTrigger => ((0.8, 0.2), Shape::Square),
    };
    Indicator { position, shape }
}

/// On/off flag per button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorBoard {
    lit: [bool; BUTTON_COUNT],
}

impl IndicatorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.lit = [false; BUTTON_COUNT];
    }

    pub fn set(&mut self, button: Button, on: bool) {
        self.lit[button.index()] = on;
    }

    pub fn light(&mut self, pressed: &ButtonSet) {
        for button in pressed {
            self.set(button, true);
        }
    }

    pub fn is_lit(&self, button: Button) -> bool {
        self.lit[button.index()]
    }

    pub fn lit_buttons(&self) -> Vec<Button> {
        Button::ALL
            .into_iter()
            .filter(|button| self.is_lit(*button))
            .collect()
    }
}

pub struct GamepadWidget {
    canvas_width: f32,
    canvas_height: f32,
    indicator_size: f32,
    stroke_width: f32,
}

impl GamepadWidget {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            indicator_size: config.indicator_size,
            stroke_width: config.stroke_width,
        }
    }

    /// Top-left corner of `button`'s indicator, in canvas coordinates
    pub fn indicator_origin(&self, button: Button) -> (f32, f32) {
        let (x, y) = indicator(button).position;
        (x * self.canvas_width, y * self.canvas_height)
    }

    pub fn show(&self, ui: &mut egui::Ui, board: &IndicatorBoard) -> egui::Response {
        let (response, painter) = ui.allocate_painter(
            vec2(self.canvas_width + FRAME_INSET, self.canvas_height + FRAME_INSET),
            Sense::hover(),
        );
        let origin = response.rect.min;

        painter.rect_stroke(
            Rect::from_min_max(
                origin + vec2(FRAME_INSET, FRAME_INSET),
                origin + vec2(self.canvas_width, self.canvas_height),
            ),
            0.0,
            Stroke::new(self.stroke_width, ACTIVE_COLOR),
            StrokeKind::Middle,
        );

        for button in Button::ALL {
            let color = if board.is_lit(button) {
                ACTIVE_COLOR
            } else {
                INACTIVE_COLOR
            };
            let stroke = Stroke::new(self.stroke_width, color);
            let (x, y) = self.indicator_origin(button);
            let rect = Rect::from_min_size(
                pos2(origin.x + x, origin.y + y),
                vec2(self.indicator_size, self.indicator_size),
            );

            match indicator(button).shape {
                Shape::Square => {
                    painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Middle);
                }
                Shape::Circle => {
                    painter.circle_stroke(rect.center(), self.indicator_size / 2.0, stroke);
                }
            }
        }

        response
    }
}
