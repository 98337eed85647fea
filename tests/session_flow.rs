use std::fs;

use quiz_session::{
    load_or_demo, BankSource, Direction, ErrorKind, FnShuffler, Label, LoadError, Mark, Phase,
    QuestionRecord, RandomShuffler, SessionController, Verdict,
};
use quiz_session::protocol::{ClientMessage, ServerMessage};
use quiz_session::server::Host;

const QUESTIONS: &str = "\
Which keyword declares an immutable binding?
A. let
B. mut
C. const fn

Which type is a growable string?
A. &str
B. String
C. char
D. [u8; 4]

What does `?` do on an Err?
A. Panics
B. Returns it early
";

const ANSWERS: &str = "A\nB\nB\n";

fn reversed() -> FnShuffler<fn(&mut [QuestionRecord])> {
    fn reverse(records: &mut [QuestionRecord]) {
        records.reverse();
    }
    FnShuffler(reverse as fn(&mut [QuestionRecord]))
}

fn text_bank() -> (tempfile::TempDir, BankSource) {
    let dir = tempfile::tempdir().unwrap();
    let questions = dir.path().join("questions.txt");
    let answers = dir.path().join("answers.txt");
    fs::write(&questions, QUESTIONS).unwrap();
    fs::write(&answers, ANSWERS).unwrap();
    (dir, BankSource::Text { questions, answers })
}

#[test]
fn test_full_session_from_files() {
    let (_dir, source) = text_bank();
    let bank = load_or_demo(&source);
    assert!(!bank.is_demo());
    assert_eq!(bank.records.len(), 3);

    let mut controller = SessionController::with_shuffler(reversed());
    assert_eq!(controller.phase(), Phase::NotStarted);

    let state = controller.start(bank.records).unwrap();
    assert_eq!(state.current_question().text(), "What does `?` do on an Err?");

    // two-option question: C is not one of its labels
    assert_eq!(
        controller.submit_answer('C').unwrap_err().kind(),
        ErrorKind::InvalidChoice
    );
    assert!(controller.submit_answer('b').unwrap().correct);

    controller.navigate(Direction::Next).unwrap();
    assert!(controller.feedback().is_none());
    let feedback = controller.submit_answer('D').unwrap();
    assert_eq!(feedback.message, "Wrong! The correct answer is B");

    // change of mind overwrites the earlier answer
    controller.submit_answer('B').unwrap();
    assert_eq!(controller.progress().unwrap().answered, 2);

    assert_eq!(controller.navigate(Direction::Next).unwrap(), 2);
    assert_eq!(controller.navigate(Direction::Next).unwrap(), 2);

    controller.finish().unwrap();
    assert_eq!(controller.phase(), Phase::Completed);
    let marks = controller.session().unwrap().marks();
    assert_eq!(marks, [Mark::Correct, Mark::Correct, Mark::Unanswered]);

    let summary = controller.results().unwrap();
    assert_eq!(summary.correct_count, 2);
    assert_eq!(summary.total, 3);
    assert!((summary.percentage - 66.666).abs() < 0.01);
    assert_eq!(summary.verdict(), Verdict::Good);
    assert_eq!(summary.per_question[2].user_choice, None);
    assert_eq!(summary.per_question[2].correct_choice, Label::A);

    assert_eq!(
        controller.submit_answer('A').unwrap_err().kind(),
        ErrorKind::InvalidState
    );

    controller.reset();
    assert_eq!(controller.phase(), Phase::NotStarted);
    assert!(controller.results().is_err());
}

#[test]
fn test_mismatched_files_fall_back_to_demo() {
    let (dir, _) = text_bank();
    let answers = dir.path().join("short_answers.txt");
    fs::write(&answers, "A\nB\n").unwrap();
    let source = BankSource::Text {
        questions: dir.path().join("questions.txt"),
        answers,
    };

    let bank = load_or_demo(&source);
    assert!(bank.is_demo());
    assert!(matches!(bank.fallback, Some(LoadError::Malformed(_))));
    assert_eq!(bank.records.len(), 3);
}

#[test]
fn test_missing_files_fall_back_to_demo() {
    let dir = tempfile::tempdir().unwrap();
    let bank = load_or_demo(&BankSource::Json(dir.path().join("nope.json")));
    assert!(matches!(bank.fallback, Some(LoadError::Missing { .. })));
    assert!(!bank.records.is_empty());
}

#[test]
fn test_restart_reshuffles_and_clears_answers() {
    let (_dir, source) = text_bank();
    let records = load_or_demo(&source).records;
    let mut controller = SessionController::with_shuffler(RandomShuffler::seeded(11));

    let first_id = controller.start(records.clone()).unwrap().id();
    controller.submit_answer('A').unwrap();
    controller.finish().unwrap();

    let state = controller.start(records).unwrap();
    assert_ne!(state.id(), first_id);
    assert_eq!(state.answered_count(), 0);
    assert_eq!(state.current_index(), 0);
    assert_eq!(controller.phase(), Phase::InProgress);
}

#[test]
fn test_host_round_trip_over_protocol() {
    let (_dir, source) = text_bank();
    let mut host = Host::new(load_or_demo(&source).records, reversed());

    assert!(matches!(host.handle(ClientMessage::Status), ServerMessage::Idle));
    let ServerMessage::Snapshot { view } = host.handle(ClientMessage::Start) else {
        panic!("start should reply with a snapshot");
    };
    assert_eq!(view.total, 3);

    let reply = host.handle(ClientMessage::Jump { index: 7 });
    assert!(matches!(
        reply,
        ServerMessage::Rejected {
            kind: ErrorKind::IndexOutOfRange,
            ..
        }
    ));

    host.handle(ClientMessage::Submit { label: 'B' });
    let ServerMessage::Results { summary } = host.handle(ClientMessage::Finish) else {
        panic!("finish should reply with results");
    };
    assert_eq!(summary.correct_count, 1);
}
