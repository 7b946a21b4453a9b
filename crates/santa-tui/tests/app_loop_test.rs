// Integration tests for the app loop.
//
// These drive `app::run` over real channels with the same command sequence a
// user produces on the keyboard, and check what reaches the TUI side.

use santa_core::{Group, PairingEngine, Screen, Session};
use santa_tui::app::{self, AppState};
use santa_tui::protocol::{UiUpdate, UserCommand, ViewSnapshot};

use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

async fn next_snapshot(ui_rx: &mut mpsc::Receiver<UiUpdate>) -> ViewSnapshot {
    loop {
        match ui_rx.recv().await {
            Some(UiUpdate::StateSnapshot(snap)) => return *snap,
            Some(UiUpdate::Rejected(_)) => continue,
            None => panic!("app loop closed the UI channel"),
        }
    }
}

async fn send(
    cmd_tx: &mpsc::Sender<UserCommand>,
    ui_rx: &mut mpsc::Receiver<UiUpdate>,
    cmd: UserCommand,
) -> ViewSnapshot {
    cmd_tx.send(cmd).await.unwrap();
    next_snapshot(ui_rx).await
}

fn add(name: &str, group: Group) -> UserCommand {
    UserCommand::AddParticipant {
        name: name.into(),
        group,
    }
}

fn spawn_app(
    clear_roster_on_start_over: bool,
) -> (
    mpsc::Sender<UserCommand>,
    mpsc::Receiver<UiUpdate>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, ui_rx) = mpsc::channel(16);
    let state = AppState::new(
        Session::new(PairingEngine::seeded(17)),
        clear_roster_on_start_over,
    );
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));
    (cmd_tx, ui_rx, handle)
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn whole_exchange_over_channels() {
    let (cmd_tx, mut ui_rx, handle) = spawn_app(true);

    let snap = next_snapshot(&mut ui_rx).await;
    assert_eq!(snap.screen, Screen::Setup);
    assert!(!snap.can_generate);

    send(&cmd_tx, &mut ui_rx, add("Alice", Group::Adult)).await;
    let snap = send(&cmd_tx, &mut ui_rx, add("Bob", Group::Adult)).await;
    assert!(snap.can_generate);

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Generate).await;
    assert_eq!(snap.screen, Screen::Reveal);
    assert!(snap.revealed.is_none());

    let alice = snap.reveal_list.iter().find(|p| p.name == "Alice").unwrap().id;
    let bob = snap.reveal_list.iter().find(|p| p.name == "Bob").unwrap().id;

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Reveal(alice)).await;
    assert_eq!(snap.revealed.unwrap().receiver_name, "Bob");

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Hide).await;
    assert!(snap.revealed.is_none());

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Reveal(bob)).await;
    assert_eq!(snap.revealed.unwrap().receiver_name, "Alice");

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::StartOver).await;
    assert_eq!(snap.screen, Screen::Setup);
    assert_eq!(snap.roster_len(), 0);
    assert!(snap.revealed.is_none());

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn premature_generate_is_rejected_with_hint() {
    let (cmd_tx, mut ui_rx, handle) = spawn_app(true);
    next_snapshot(&mut ui_rx).await;

    send(&cmd_tx, &mut ui_rx, add("Alice", Group::Adult)).await;
    cmd_tx.send(UserCommand::Generate).await.unwrap();

    match ui_rx.recv().await {
        Some(UiUpdate::Rejected(message)) => {
            assert!(message.contains("at least 2 people"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    let snap = next_snapshot(&mut ui_rx).await;
    assert_eq!(snap.screen, Screen::Setup);

    drop(cmd_tx);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn snapshots_never_carry_unrevealed_matches() {
    let (cmd_tx, mut ui_rx, handle) = spawn_app(false);
    next_snapshot(&mut ui_rx).await;

    for name in ["A", "B", "C", "D"] {
        send(&cmd_tx, &mut ui_rx, add(name, Group::Adult)).await;
    }
    for name in ["K1", "K2"] {
        send(&cmd_tx, &mut ui_rx, add(name, Group::Kid)).await;
    }

    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Generate).await;
    let everyone = snap.reveal_list.clone();
    assert_eq!(everyone.len(), 6);

    // Reveal without hiding in between: each snapshot shows only the latest.
    for person in &everyone {
        let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Reveal(person.id)).await;
        let shown = snap.revealed.expect("every participant has a match");
        assert_eq!(shown.giver.id, person.id);
        assert_ne!(shown.receiver_name, person.name);
    }

    // Regenerating drops the visible match.
    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::Generate).await;
    assert!(snap.revealed.is_none());

    // Start over keeps the roster when configured to.
    let snap = send(&cmd_tx, &mut ui_rx, UserCommand::StartOver).await;
    assert_eq!(snap.roster_len(), 6);

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
}
