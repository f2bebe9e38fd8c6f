/// Gamepad input tracker using gilrs.
///
/// Quit buttons are loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick    →  Turn
///   Select                →  Quit
///
/// Without the `gamepad` feature this compiles to a tracker that never
/// reports anything.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::entity::Direction;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Per-input state: held (continuous) and just_pressed (edge).
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    just_pressed: bool,
}

impl BtnState {
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn set(&mut self, held: bool) {
        if held && !self.held { self.just_pressed = true; }
        self.held = held;
    }
}

/// One slot per direction, indexed in `DIRS` order.
const DIRS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    buttons: [BtnState; 8],
    dpad: [BtnState; 4],
    stick: [BtnState; 4],
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,

    quit: Vec<Btn>,
}

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

fn dir_index(dir: Direction) -> Option<usize> {
    DIRS.iter().position(|&d| d == dir)
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs_opt = match Gilrs::new() {
            Ok(g) => {
                if g.gamepads().next().is_some() {
                    tracing::info!("gamepad connected");
                }
                Some(g)
            }
            Err(e) => {
                tracing::debug!(error = %e, "gamepad support unavailable");
                None
            }
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); 8],
            dpad: [BtnState::default(); 4],
            stick: [BtnState::default(); 4],
            stick_x: 0.0,
            stick_y: 0.0,
            quit: vec![Btn::Select],
        }
    }

    /// Load the quit buttons from config. Unknown names are skipped; an
    /// empty result keeps the default.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        let quit: Vec<Btn> = cfg.quit.iter().filter_map(|s| Btn::from_name(s)).collect();
        if quit.is_empty() {
            tracing::warn!(names = ?cfg.quit, "no usable gamepad quit buttons; keeping Select");
        } else {
            self.quit = quit;
        }
    }

    pub fn update(&mut self) {
        self.clear_just_pressed();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => self.set_button(btn, true),
                EventType::ButtonReleased(btn, _) => self.set_button(btn, false),
                EventType::AxisChanged(axis, value, _) => match axis {
                    Axis::LeftStickX => self.stick_x = value,
                    Axis::LeftStickY => self.stick_y = value,
                    _ => {}
                },
                EventType::Connected => {
                    tracing::info!("gamepad connected");
                }
                EventType::Disconnected => {
                    self.release_all();
                    tracing::info!("gamepad disconnected");
                }
                _ => {}
            }
        }

        // Derive stick digital states (stick Y is up-positive)
        let (x, y) = (self.stick_x, self.stick_y);
        self.stick[0].set(y > STICK_DEADZONE);
        self.stick[1].set(y < -STICK_DEADZONE);
        self.stick[2].set(x < -STICK_DEADZONE);
        self.stick[3].set(x > STICK_DEADZONE);
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        let dpad_dir = match gilrs_btn {
            Button::DPadUp    => Some(Direction::Up),
            Button::DPadDown  => Some(Direction::Down),
            Button::DPadLeft  => Some(Direction::Left),
            Button::DPadRight => Some(Direction::Right),
            _ => None,
        };
        if let Some(i) = dpad_dir.and_then(dir_index) {
            self.dpad[i].set(held);
            return;
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.buttons[btn_index(btn)].set(held);
        }
    }

    // ── Queries ──

    /// Direction freshly pressed this frame on the d-pad or stick.
    pub fn direction_pressed(&self) -> Option<Direction> {
        DIRS.into_iter().find(|&d| {
            dir_index(d).is_some_and(|i| self.dpad[i].just_pressed || self.stick[i].just_pressed)
        })
    }

    pub fn quit_pressed(&self) -> bool {
        self.quit.iter().any(|&b| self.buttons[btn_index(b)].just_pressed)
    }

    /// Any button or direction freshly pressed this frame.
    pub fn any_pressed(&self) -> bool {
        self.buttons.iter().chain(&self.dpad).chain(&self.stick).any(|b| b.just_pressed)
    }

    // ── Internal ──

    fn clear_just_pressed(&mut self) {
        for b in self.buttons.iter_mut().chain(&mut self.dpad).chain(&mut self.stick) {
            b.just_pressed = false;
        }
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        for b in self.buttons.iter_mut().chain(&mut self.dpad).chain(&mut self.stick) {
            *b = BtnState::default();
        }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
