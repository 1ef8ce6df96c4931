//! Input controller
//!
//! Raw host events come in, engine commands come out. The controller also owns the
//! listener lifecycle: every `bind` is matched by at most one `unbind`, so pausing and
//! resuming never stacks duplicate handlers on the host.

use crate::settings::Settings;

/// Host events the controller understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Key pressed, by `KeyboardEvent.code`
    KeyDown(String),
    /// Key released, by `KeyboardEvent.code`
    KeyUp(String),
    /// Mouse button or touch pressed
    PointerDown,
    /// Mouse button or touch released
    PointerUp,
}

/// Engine operations input can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    BeginCharge,
    ReleaseJump,
    Pause,
}

/// Where listeners get installed (DOM window, test recorder, ...)
pub trait InputHost {
    fn attach(&mut self);

    fn detach(&mut self);
}

pub struct InputController {
    charge_key: String,
    pause_key: String,
    host: Box<dyn InputHost>,
    bound: bool,
}

impl InputController {
    pub fn new(settings: &Settings, host: Box<dyn InputHost>) -> Self {
        Self {
            charge_key: settings.charge_key.clone(),
            pause_key: settings.pause_key.clone(),
            host,
            bound: false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Install listeners unless they already are
    pub fn bind(&mut self) {
        if self.bound {
            return;
        }
        self.host.attach();
        self.bound = true;
        log::debug!("Input bound ({} / {})", self.charge_key, self.pause_key);
    }

    /// Remove listeners unless they already are
    pub fn unbind(&mut self) {
        if !self.bound {
            return;
        }
        self.host.detach();
        self.bound = false;
        log::debug!("Input unbound");
    }

    /// Pick up new key bindings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.charge_key = settings.charge_key.clone();
        self.pause_key = settings.pause_key.clone();
    }

    /// Map a raw event to a command. Nothing maps while unbound.
    pub fn translate(&self, raw: &RawInput) -> Option<Command> {
        if !self.bound {
            return None;
        }
        match raw {
            RawInput::KeyDown(code) if *code == self.charge_key => Some(Command::BeginCharge),
            RawInput::KeyUp(code) if *code == self.charge_key => Some(Command::ReleaseJump),
            RawInput::KeyUp(code) if *code == self.pause_key => Some(Command::Pause),
            RawInput::PointerDown => Some(Command::BeginCharge),
            RawInput::PointerUp => Some(Command::ReleaseJump),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Counts {
        attached: Rc<Cell<u32>>,
        detached: Rc<Cell<u32>>,
    }

    impl InputHost for Counts {
        fn attach(&mut self) {
            self.attached.set(self.attached.get() + 1);
        }

        fn detach(&mut self) {
            self.detached.set(self.detached.get() + 1);
        }
    }

    fn controller() -> (InputController, Counts) {
        let counts = Counts::default();
        let controller = InputController::new(&Settings::default(), Box::new(counts.clone()));
        (controller, counts)
    }

    #[test]
    fn bind_and_unbind_are_symmetric() {
        let (mut controller, counts) = controller();
        controller.bind();
        controller.bind();
        assert_eq!(counts.attached.get(), 1);

        controller.unbind();
        controller.unbind();
        assert_eq!(counts.detached.get(), 1);

        controller.bind();
        assert_eq!(counts.attached.get(), 2);
    }

    #[test]
    fn keys_and_pointer_map_to_commands() {
        let (mut controller, _) = controller();
        controller.bind();
        let key_down = |code: &str| RawInput::KeyDown(code.to_string());
        let key_up = |code: &str| RawInput::KeyUp(code.to_string());

        assert_eq!(controller.translate(&key_down("Space")), Some(Command::BeginCharge));
        assert_eq!(controller.translate(&key_up("Space")), Some(Command::ReleaseJump));
        assert_eq!(controller.translate(&key_up("Escape")), Some(Command::Pause));
        assert_eq!(controller.translate(&key_down("Escape")), None);
        assert_eq!(controller.translate(&key_down("KeyA")), None);
        assert_eq!(controller.translate(&RawInput::PointerDown), Some(Command::BeginCharge));
        assert_eq!(controller.translate(&RawInput::PointerUp), Some(Command::ReleaseJump));
    }

    #[test]
    fn unbound_controller_ignores_everything() {
        let (controller, _) = controller();
        assert_eq!(controller.translate(&RawInput::PointerDown), None);
    }

    #[test]
    fn rebinding_keys() {
        let (mut controller, _) = controller();
        controller.bind();
        let settings = Settings {
            charge_key: "KeyJ".into(),
            ..Settings::default()
        };
        controller.apply_settings(&settings);
        assert_eq!(
            controller.translate(&RawInput::KeyDown("KeyJ".into())),
            Some(Command::BeginCharge)
        );
        assert_eq!(controller.translate(&RawInput::KeyDown("Space".into())), None);
    }
}
