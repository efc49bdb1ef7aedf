use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use drag_quiz::core::{Question, QuestionRepository, QuizMachine, QuizSettings, SlotBoard};
use drag_quiz::term::{FrameBuffer, QuizView, Screen, Viewport};
use drag_quiz::types::{DropTarget, Point, QuizIntent, SAMPLE_SIZE};

fn bank(n: usize) -> QuestionRepository {
    QuestionRepository::from_questions(
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Arrange statement {i}"),
                    ["let", "x", "=", "1;"],
                    vec![0, 1, 2, 3],
                )
            })
            .collect(),
    )
}

fn bench_sample(c: &mut Criterion) {
    let repo = bank(200);
    let mut rng = StdRng::seed_from_u64(12345);

    c.bench_function("sample_20_of_200", |b| {
        b.iter(|| {
            let picked = repo.sample(black_box(SAMPLE_SIZE), &mut rng);
            black_box(picked)
        })
    });
}

fn bench_place_and_clear(c: &mut Criterion) {
    c.bench_function("fill_board_4_slots", |b| {
        b.iter(|| {
            let mut board = SlotBoard::new(4, 4);
            for slot in 0..4 {
                let _ = board.place_in_slot(slot, 3 - slot);
            }
            board.clear_to_pool();
            black_box(board)
        })
    });
}

fn bench_full_session(c: &mut Criterion) {
    let repo = bank(40);

    c.bench_function("full_session_20_questions", |b| {
        b.iter(|| {
            let mut quiz = QuizMachine::new(
                repo.clone(),
                QuizSettings {
                    sample_size: SAMPLE_SIZE,
                    seed: Some(7),
                },
            );
            quiz.apply_intent(QuizIntent::Start, 0);
            let mut t = 0;
            while quiz.session().is_some() {
                for slot in 0..4 {
                    quiz.pick_up(slot, Point::default(), Point::default());
                    quiz.release(Some(DropTarget::Slot(slot)), t);
                }
                quiz.advance(t + 300);
                quiz.advance(t + 900);
                t += 1_000;
            }
            black_box(quiz.drain_events())
        })
    });
}

fn bench_render_question(c: &mut Criterion) {
    let mut quiz = QuizMachine::new(
        bank(20),
        QuizSettings {
            sample_size: SAMPLE_SIZE,
            seed: Some(1),
        },
    );
    quiz.apply_intent(QuizIntent::Start, 0);
    let mut screen = Screen::new();
    screen.apply_all(&quiz.drain_events());

    let view = QuizView::default();
    let viewport = Viewport::new(100, 30);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("render_question_100x30", |b| {
        b.iter(|| {
            let layout = view.render_into(black_box(&screen), viewport, &mut fb);
            black_box(layout)
        })
    });
}

criterion_group!(
    benches,
    bench_sample,
    bench_place_and_clear,
    bench_full_session,
    bench_render_question
);
criterion_main!(benches);
