//! Modal viewer lifecycle.
//!
//! `Closed -> Opening -> Open -> Closing -> Closed`. The controller is a plain
//! state object: every change goes through `apply`, which validates the
//! transition and hands back the phase timer the event loop has to schedule.
//! Timers carry the generation they were issued for; a timer from a
//! superseded transition no longer matches and is ignored.

use std::time::Duration;

pub const OPEN_DELAY: Duration = Duration::from_millis(12);
pub const CLOSE_DELAY: Duration = Duration::from_millis(260);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseControl,
    Escape,
    Backdrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    Open { title: String, src: String },
    Close(CloseTrigger),
    PhaseElapsed(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    pub generation: u64,
    pub delay: Duration,
}

/// What a command did, beyond the phase change itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub timer: Option<PhaseTimer>,
    /// The content source was replaced or cleared.
    pub content_changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    phase: ModalPhase,
    title: String,
    src: String,
    generation: u64,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The embedded content source. Empty while closing or closed.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// The container is on screen in every phase but `Closed`.
    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Accepts input only while opening or open.
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn apply(&mut self, command: ModalCommand) -> Transition {
        match command {
            ModalCommand::Open { title, src } => self.open(title, src),
            ModalCommand::Close(_) => self.close(),
            ModalCommand::PhaseElapsed(generation) => self.elapsed(generation),
        }
    }

    fn open(&mut self, title: String, src: String) -> Transition {
        let content_changed = self.src != src;
        self.title = title;
        self.src = src;
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => Transition {
                timer: None,
                content_changed,
            },
            ModalPhase::Closed | ModalPhase::Closing => Transition {
                timer: Some(self.enter(ModalPhase::Opening, OPEN_DELAY)),
                content_changed,
            },
        }
    }

    fn close(&mut self) -> Transition {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                let content_changed = !self.src.is_empty();
                self.src.clear();
                Transition {
                    timer: Some(self.enter(ModalPhase::Closing, CLOSE_DELAY)),
                    content_changed,
                }
            }
            ModalPhase::Closed | ModalPhase::Closing => Transition::default(),
        }
    }

    fn elapsed(&mut self, generation: u64) -> Transition {
        if generation != self.generation {
            return Transition::default();
        }
        match self.phase {
            ModalPhase::Opening => self.phase = ModalPhase::Open,
            ModalPhase::Closing => self.phase = ModalPhase::Closed,
            ModalPhase::Open | ModalPhase::Closed => {}
        }
        Transition::default()
    }

    fn enter(&mut self, phase: ModalPhase, delay: Duration) -> PhaseTimer {
        self.phase = phase;
        self.generation += 1;
        PhaseTimer {
            generation: self.generation,
            delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(title: &str, src: &str) -> ModalCommand {
        ModalCommand::Open {
            title: title.to_string(),
            src: src.to_string(),
        }
    }

    fn assert_content_invariant(modal: &ModalController) {
        if matches!(modal.phase(), ModalPhase::Closed | ModalPhase::Closing) {
            assert!(modal.src().is_empty(), "src set while {}", modal.phase().label());
        }
    }

    #[test]
    fn test_open_then_close_cycle() {
        let mut modal = ModalController::new();
        assert_eq!(modal.phase(), ModalPhase::Closed);

        let t = modal.apply(open("A vs B", "https://x/embed"));
        assert_eq!(modal.phase(), ModalPhase::Opening);
        assert!(t.content_changed);
        let timer = t.timer.unwrap();
        assert_eq!(timer.delay, OPEN_DELAY);
        assert_content_invariant(&modal);

        modal.apply(ModalCommand::PhaseElapsed(timer.generation));
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(modal.title(), "A vs B");
        assert_eq!(modal.src(), "https://x/embed");

        let t = modal.apply(ModalCommand::Close(CloseTrigger::Escape));
        assert_eq!(modal.phase(), ModalPhase::Closing);
        assert_eq!(modal.src(), "");
        assert!(t.content_changed);
        let timer = t.timer.unwrap();
        assert_eq!(timer.delay, CLOSE_DELAY);
        assert_content_invariant(&modal);

        modal.apply(ModalCommand::PhaseElapsed(timer.generation));
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert!(!modal.is_visible());
        assert_content_invariant(&modal);
    }

    #[test]
    fn test_every_close_trigger_closes() {
        for trigger in [
            CloseTrigger::CloseControl,
            CloseTrigger::Escape,
            CloseTrigger::Backdrop,
        ] {
            let mut modal = ModalController::new();
            modal.apply(open("t", "s"));
            modal.apply(ModalCommand::Close(trigger));
            assert_eq!(modal.phase(), ModalPhase::Closing);
        }
    }

    #[test]
    fn test_open_while_open_reassigns_in_place() {
        let mut modal = ModalController::new();
        let timer = modal.apply(open("first", "a")).timer.unwrap();
        modal.apply(ModalCommand::PhaseElapsed(timer.generation));

        let t = modal.apply(open("second", "b"));
        assert!(t.timer.is_none());
        assert!(t.content_changed);
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(modal.title(), "second");
        assert_eq!(modal.src(), "b");
    }

    #[test]
    fn test_open_while_opening_keeps_pending_timer() {
        let mut modal = ModalController::new();
        let timer = modal.apply(open("first", "a")).timer.unwrap();
        let t = modal.apply(open("second", "b"));
        assert!(t.timer.is_none());
        modal.apply(ModalCommand::PhaseElapsed(timer.generation));
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(modal.src(), "b");
    }

    #[test]
    fn test_open_while_closing_supersedes_close() {
        let mut modal = ModalController::new();
        let opened = modal.apply(open("first", "a")).timer.unwrap();
        modal.apply(ModalCommand::PhaseElapsed(opened.generation));
        let closing = modal.apply(ModalCommand::Close(CloseTrigger::Backdrop)).timer.unwrap();

        let reopened = modal.apply(open("second", "b")).timer.unwrap();
        assert_eq!(modal.phase(), ModalPhase::Opening);

        // The stale close timer must not hide the re-opened modal.
        modal.apply(ModalCommand::PhaseElapsed(closing.generation));
        assert_eq!(modal.phase(), ModalPhase::Opening);
        modal.apply(ModalCommand::PhaseElapsed(reopened.generation));
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(modal.src(), "b");
    }

    #[test]
    fn test_close_during_opening_ignores_open_timer() {
        let mut modal = ModalController::new();
        let opening = modal.apply(open("t", "s")).timer.unwrap();
        let closing = modal.apply(ModalCommand::Close(CloseTrigger::Escape)).timer.unwrap();
        modal.apply(ModalCommand::PhaseElapsed(opening.generation));
        assert_eq!(modal.phase(), ModalPhase::Closing);
        modal.apply(ModalCommand::PhaseElapsed(closing.generation));
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut modal = ModalController::new();
        assert_eq!(
            modal.apply(ModalCommand::Close(CloseTrigger::Escape)),
            Transition::default()
        );
        assert_eq!(modal.phase(), ModalPhase::Closed);

        modal.apply(open("t", "s"));
        modal.apply(ModalCommand::Close(CloseTrigger::Escape));
        let again = modal.apply(ModalCommand::Close(CloseTrigger::Escape));
        assert!(again.timer.is_none());
        assert_eq!(modal.phase(), ModalPhase::Closing);
    }

    #[test]
    fn test_reopen_same_link_reports_no_content_change() {
        let mut modal = ModalController::new();
        modal.apply(open("t", "s"));
        let t = modal.apply(open("t", "s"));
        assert!(!t.content_changed);
    }
}
