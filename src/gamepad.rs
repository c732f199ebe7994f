// ============================================================================
// GAMEPAD STATE
// ============================================================================

use gilrs::{Axis, Button, Event, EventType, Gilrs};

const STICK_DEADZONE: f32 = 0.15;
const TRIGGER_THRESHOLD: f32 = 0.5;

#[derive(Default)]
pub struct GamepadState {
    // Axes (-1.0 to 1.0)
    pub left_stick_x: f32,
    pub left_stick_y: f32,
    pub right_trigger: f32,
    // Buttons (currently pressed)
    pub rt_button: bool,
    // Button "just pressed" this frame
    pub a_just_pressed: bool,
    pub rt_just_pressed: bool,
    pub start_just_pressed: bool,
    pub select_just_pressed: bool,
}

impl GamepadState {
    fn clear_just_pressed(&mut self) {
        self.a_just_pressed = false;
        self.rt_just_pressed = false;
        self.start_just_pressed = false;
        self.select_just_pressed = false;
    }

    /// Left stick with the deadzone applied. Up is positive y.
    pub fn aim_axis(&self) -> (f32, f32) {
        let dead = |v: f32| if v.abs() < STICK_DEADZONE { 0.0 } else { v };
        (dead(self.left_stick_x), dead(self.left_stick_y))
    }

    pub fn fire_just_pressed(&self) -> bool {
        self.a_just_pressed || self.rt_just_pressed
    }

    fn press(&mut self, button: Button) {
        match button {
            Button::South => self.a_just_pressed = true,
            Button::RightTrigger2 => {
                if !self.rt_button {
                    self.rt_just_pressed = true;
                }
                self.rt_button = true;
            }
            Button::Start => self.start_just_pressed = true,
            Button::Select => self.select_just_pressed = true,
            _ => {}
        }
    }

    fn release(&mut self, button: Button) {
        if button == Button::RightTrigger2 {
            self.rt_button = false;
        }
    }

    fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.left_stick_x = value,
            Axis::LeftStickY => self.left_stick_y = value,
            Axis::RightZ => {
                // some pads only report the analog trigger as an axis
                if value > TRIGGER_THRESHOLD && self.right_trigger <= TRIGGER_THRESHOLD {
                    self.rt_just_pressed = true;
                }
                self.right_trigger = value;
            }
            _ => {}
        }
    }

    fn apply(&mut self, event: EventType) {
        match event {
            EventType::ButtonPressed(button, _) => self.press(button),
            EventType::ButtonReleased(button, _) => self.release(button),
            EventType::AxisChanged(axis, value, _) => self.set_axis(axis, value),
            EventType::Disconnected => {
                *self = Self::default();
                tracing::info!("gamepad disconnected");
            }
            EventType::Connected => tracing::info!("gamepad connected"),
            _ => {}
        }
    }
}

/// Gamepad support; keyboard and mouse still work when the backend is missing.
pub struct Gamepad {
    gilrs: Option<Gilrs>,
    pub state: GamepadState,
}

impl Gamepad {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (_id, pad) in gilrs.gamepads() {
                    tracing::info!(name = pad.name(), "gamepad found");
                }
                Some(gilrs)
            }
            Err(e) => {
                tracing::warn!(error = %e, "gamepad support unavailable");
                None
            }
        };
        Self { gilrs, state: GamepadState::default() }
    }

    /// Drain pending events into `state`. Call once per frame.
    pub fn poll(&mut self) {
        self.state.clear_just_pressed();
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        while let Some(Event { event, .. }) = gilrs.next_event() {
            self.state.apply(event);
        }
    }
}
