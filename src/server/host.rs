//! The single hosted session and the commands that drive it.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::models::QuestionRecord;
use crate::protocol::{ClientMessage, ServerMessage, SessionView};
use crate::session::{Phase, SessionController, Shuffler};

/// Owns the question bank, the controller and the attached client.
pub struct Host<S> {
    bank: Vec<QuestionRecord>,
    controller: SessionController<S>,
    fallback: Option<String>,
    attached: Option<Uuid>,
}

impl<S: Shuffler> Host<S> {
    pub fn new(bank: Vec<QuestionRecord>, shuffler: S) -> Self {
        Self {
            bank,
            controller: SessionController::with_shuffler(shuffler),
            fallback: None,
            attached: None,
        }
    }

    /// Note that `bank` is the demo set standing in for unusable quiz data.
    pub fn with_fallback(mut self, reason: impl Into<String>) -> Self {
        self.fallback = Some(reason.into());
        self
    }

    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn attached(&self) -> Option<Uuid> {
        self.attached
    }

    /// Claim the session for `client`. Fails if another client holds it.
    pub fn attach(&mut self, client: Uuid) -> bool {
        match self.attached {
            Some(current) if current != client => false,
            _ => {
                self.attached = Some(client);
                true
            }
        }
    }

    pub fn detach(&mut self, client: Uuid) {
        if self.attached == Some(client) {
            self.attached = None;
        }
    }

    /// Apply one command and describe the resulting state.
    pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
        debug!(?msg, "handling command");
        let outcome = match msg {
            ClientMessage::Start => self.controller.start(self.bank.clone()).map(|_| ()),
            ClientMessage::Submit { label } => self.controller.submit_answer(label).map(|_| ()),
            ClientMessage::Navigate { direction } => self.controller.navigate(direction).map(|_| ()),
            ClientMessage::Jump { index } => self.controller.jump(index),
            ClientMessage::Finish => self.controller.finish(),
            ClientMessage::Reset => {
                self.controller.reset();
                Ok(())
            }
            ClientMessage::Status => Ok(()),
        };

        match outcome {
            Ok(()) => self.describe(),
            Err(err) => rejected(&err),
        }
    }

    /// The message that best describes the current phase.
    pub fn describe(&self) -> ServerMessage {
        match (self.controller.phase(), self.controller.session()) {
            (Phase::Completed, _) => match self.controller.results() {
                Ok(summary) => ServerMessage::Results { summary },
                Err(err) => rejected(&err),
            },
            (phase, Some(state)) => ServerMessage::Snapshot {
                view: SessionView::of(state, phase),
            },
            (_, None) => ServerMessage::Idle,
        }
    }
}

fn rejected(err: &SessionError) -> ServerMessage {
    warn!(error = %err, "command rejected");
    ServerMessage::Rejected {
        kind: err.kind(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Label, QuizOption};
    use crate::session::{Direction, FnShuffler, Mark};

    type Identity = FnShuffler<fn(&mut [QuestionRecord])>;

    fn host() -> Host<Identity> {
        fn keep_order(_: &mut [QuestionRecord]) {}
        let bank = [Label::B, Label::C, Label::A]
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let options = Label::ALL
                    .iter()
                    .map(|l| QuizOption::new(*l, l.to_string()))
                    .collect();
                QuestionRecord::new(i, format!("question {}", i), options, *label).unwrap()
            })
            .collect();
        Host::new(bank, FnShuffler(keep_order as fn(&mut [QuestionRecord])))
    }

    fn view(msg: ServerMessage) -> SessionView {
        match msg {
            ServerMessage::Snapshot { view } => view,
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_status_before_start_is_idle() {
        let mut host = host();
        assert_eq!(host.handle(ClientMessage::Status), ServerMessage::Idle);
    }

    #[test]
    fn test_start_and_answer() {
        let mut host = host();
        let started = view(host.handle(ClientMessage::Start));
        assert_eq!(started.index, 0);
        assert_eq!(started.total, 3);
        assert_eq!(started.text, "question 0");

        let answered = view(host.handle(ClientMessage::Submit { label: 'B' }));
        assert_eq!(answered.answer, Some(Label::B));
        assert_eq!(answered.marks[0], Mark::Correct);
        assert!(answered.feedback.unwrap().correct);
        assert_eq!(answered.session_id, started.session_id);
    }

    #[test]
    fn test_navigation_commands() {
        let mut host = host();
        host.handle(ClientMessage::Start);
        let moved = view(host.handle(ClientMessage::Navigate {
            direction: Direction::Next,
        }));
        assert_eq!(moved.index, 1);

        let jumped = view(host.handle(ClientMessage::Jump { index: 2 }));
        assert_eq!(jumped.index, 2);
        assert_eq!(jumped.text, "question 2");
    }

    #[test]
    fn test_rejections_leave_state_alone() {
        let mut host = host();
        assert!(matches!(
            host.handle(ClientMessage::Submit { label: 'A' }),
            ServerMessage::Rejected {
                kind: ErrorKind::InvalidState,
                ..
            }
        ));

        host.handle(ClientMessage::Start);
        assert!(matches!(
            host.handle(ClientMessage::Jump { index: 3 }),
            ServerMessage::Rejected {
                kind: ErrorKind::IndexOutOfRange,
                ..
            }
        ));
        assert!(matches!(
            host.handle(ClientMessage::Submit { label: 'Z' }),
            ServerMessage::Rejected {
                kind: ErrorKind::InvalidChoice,
                ..
            }
        ));
        assert_eq!(view(host.handle(ClientMessage::Status)).index, 0);
    }

    #[test]
    fn test_finish_reports_results_then_reset_goes_idle() {
        let mut host = host();
        host.handle(ClientMessage::Start);
        host.handle(ClientMessage::Submit { label: 'B' });

        match host.handle(ClientMessage::Finish) {
            ServerMessage::Results { summary } => {
                assert_eq!(summary.correct_count, 1);
                assert_eq!(summary.total, 3);
            }
            other => panic!("expected results, got {:?}", other),
        }
        assert!(matches!(
            host.handle(ClientMessage::Status),
            ServerMessage::Results { .. }
        ));
        assert_eq!(host.handle(ClientMessage::Reset), ServerMessage::Idle);
    }

    #[test]
    fn test_snapshot_hides_answer_key() {
        let mut host = host();
        let json = serde_json::to_string(&host.handle(ClientMessage::Start)).unwrap();
        assert!(!json.contains("correct\""));
    }

    #[test]
    fn test_single_client_attachment() {
        let mut host = host();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(host.attach(first));
        assert!(host.attach(first));
        assert!(!host.attach(second));

        host.detach(second);
        assert_eq!(host.attached(), Some(first));
        host.detach(first);
        assert!(host.attach(second));
    }
}
