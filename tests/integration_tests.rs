//! Integration tests for the controller driving the engine

use blockfall::core::{Board, GameState, Phase};
use blockfall::engine::{
    Controller, HighScoreEntry, JsonFileStore, ManualClock, MemoryStore, ScoreStore,
};
use blockfall::term::Screen;
use blockfall::types::{Command, BOARD_HEIGHT, BOARD_WIDTH};

type App = Controller<Screen, MemoryStore, ManualClock>;

fn app(seed: u32) -> App {
    Controller::new(
        GameState::new(seed),
        Screen::new(),
        MemoryStore::new(),
        ManualClock::new(0).with_date("2024-06-01"),
    )
}

/// Fill the bottom row except where the active piece will land.
fn prepare_single_line(app: &mut App) {
    let mut landed = app.game().active().unwrap();
    let empty = Board::new();
    while landed.try_move(0, 1, &empty) {}
    let bottom = BOARD_HEIGHT as i8 - 1;
    let holes: Vec<i8> = landed
        .cells()
        .filter(|&(_, y)| y == bottom)
        .map(|(x, _)| x)
        .collect();
    for x in 0..BOARD_WIDTH as i8 {
        if !holes.contains(&x) {
            app.game_mut().board_mut().set(x, bottom, Some(landed.kind));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut app = app(12345);
    assert_eq!(app.game().phase(), Phase::Idle);
    assert_eq!(app.renderer().overlay().unwrap().title, "TETRIS");

    app.handle_command(Command::StartOrResume);
    assert_eq!(app.game().phase(), Phase::Running);
    assert!(app.renderer().overlay().is_none());

    app.handle_command(Command::TogglePause);
    assert_eq!(app.game().phase(), Phase::Paused);
    assert_eq!(app.renderer().overlay().unwrap().message, "Press P to resume");

    app.handle_command(Command::StartOrResume);
    assert_eq!(app.game().phase(), Phase::Running);

    for _ in 0..100 {
        if app.game().game_over() {
            break;
        }
        app.handle_command(Command::HardDrop);
    }
    assert_eq!(app.game().phase(), Phase::Over);
    let overlay = app.renderer().overlay().unwrap();
    assert_eq!(overlay.title, "GAME OVER");
    assert!(overlay.message.starts_with("Final Score: "));
    assert_eq!(app.renderer().high_scores().len(), 1);
}

#[test]
fn test_gravity_drives_piece_to_lock() {
    let mut app = app(42);
    app.handle_command(Command::StartOrResume);
    let first = app.game().active().unwrap();

    // Enough gravity ticks to cross the board and lock once.
    for _ in 0..25 {
        app.clock().advance(1001);
        app.frame();
    }

    assert!(app.game().board().cells().iter().any(|c| *c == Some(first.kind)));
    assert!(app.game().running());
}

#[test]
fn test_line_clear_end_to_end() {
    let mut app = app(7);
    app.handle_command(Command::StartOrResume);
    prepare_single_line(&mut app);

    app.handle_command(Command::HardDrop);
    assert_eq!(app.game().phase(), Phase::Clearing);
    assert_eq!(app.renderer().snapshot().clearing_rows.as_slice(), &[19]);

    app.clock().advance(1000);
    let clear = app.fire_due_timers().unwrap();
    assert_eq!(clear.lines, 1);
    assert_eq!(app.renderer().snapshot().score, 40);
    assert_eq!(app.renderer().snapshot().lines, 1);
    assert!(app.renderer().snapshot().clearing_rows.is_empty());
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = app(99);
    let mut b = app(99);
    a.handle_command(Command::StartOrResume);
    b.handle_command(Command::StartOrResume);
    for _ in 0..10 {
        assert_eq!(a.game().active(), b.game().active());
        assert_eq!(a.game().next(), b.game().next());
        a.handle_command(Command::HardDrop);
        b.handle_command(Command::HardDrop);
    }
}

#[test]
fn test_scores_persist_to_json_file() {
    let path = std::env::temp_dir().join(format!(
        "blockfall-integration-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut app = Controller::new(
            GameState::new(5),
            Screen::new(),
            JsonFileStore::new(&path),
            ManualClock::new(0).with_date("2024-06-02"),
        );
        app.handle_command(Command::StartOrResume);
        for _ in 0..100 {
            if app.game().game_over() {
                break;
            }
            app.handle_command(Command::HardDrop);
        }
        assert!(app.game().game_over());
    }

    let stored = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, "2024-06-02");

    // A second controller picks the list up at construction.
    let app = Controller::new(
        GameState::new(6),
        Screen::new(),
        JsonFileStore::new(&path),
        ManualClock::default(),
    );
    assert_eq!(app.renderer().high_scores(), stored.as_slice());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_preloaded_scores_are_capped() {
    let store = MemoryStore::with_entries(
        (1..=6).map(|s| HighScoreEntry::new(s * 100, "2024-01-01")).collect(),
    );
    let app = Controller::new(GameState::new(1), Screen::new(), store, ManualClock::default());
    let scores: Vec<u32> = app.high_scores().entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![600, 500, 400]);
}
