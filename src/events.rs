/// What the user asked for while a generation was on screen
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// Stop the simulation
    Quit,

    /// Freeze or resume the simulation
    TogglePause,

    /// Advance a single generation while paused
    Step,
}
