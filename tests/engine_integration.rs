//! Integration tests for the async engine shell.
//!
//! Everything runs on a paused tokio clock, so the 2000ms dealing phase
//! and the bot reaction delays resolve deterministically and instantly.

use std::time::Duration;

use snap_engine::{EngineConfig, GameActor, GameHandle, GameStatus, Seat};

async fn started_engine(reaction_time: Duration) -> GameHandle {
    let handle = GameActor::spawn(EngineConfig::default());
    handle.set_reaction_time(reaction_time).await.unwrap();
    handle.start_new_game().await.unwrap();
    handle
        .reader()
        .watch_status()
        .wait_for(|s| *s == GameStatus::Started)
        .await
        .unwrap();
    handle
}

#[tokio::test(start_paused = true)]
async fn test_start_new_game_enters_dealing_with_even_hands() {
    let handle = GameActor::spawn(EngineConfig::default());
    handle.start_new_game().await.unwrap();

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.status, GameStatus::Dealing);
    assert_eq!(snapshot.player_hand.len(), 26);
    assert_eq!(snapshot.computer_hand.len(), 26);
    assert!(snapshot.center_pile.is_empty());
    assert_eq!(snapshot.round, 1);
}

#[tokio::test(start_paused = true)]
async fn test_dealing_phase_opens_play_after_its_delay() {
    let handle = GameActor::spawn(EngineConfig::default());
    handle.start_new_game().await.unwrap();

    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(handle.snapshot().status, GameStatus::Dealing);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.snapshot().status, GameStatus::Started);
}

#[tokio::test(start_paused = true)]
async fn test_restart_supersedes_the_pending_dealing_timer() {
    let handle = GameActor::spawn(EngineConfig::default());
    handle.start_new_game().await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    handle.start_new_game().await.unwrap();

    // Past the first deal's deadline: its timer must have been
    // superseded by the restart, not honored.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.round, 2);
    assert_eq!(snapshot.status, GameStatus::Dealing);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(handle.snapshot().status, GameStatus::Started);
}

#[tokio::test(start_paused = true)]
async fn test_out_of_turn_draw_changes_nothing() {
    // Reaction time far beyond the test horizon keeps the bot quiet.
    let handle = started_engine(Duration::from_secs(600)).await;
    let mut snaps = handle.reader().subscribe_snap_events();

    let before = handle.snapshot();
    let idle_seat = before.turn.opponent();

    let drawn = handle.draw_card(idle_seat).await.unwrap();
    assert_eq!(drawn, None);
    assert_eq!(handle.snapshot(), before);
    assert!(snaps.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_draw_appends_to_pile_and_flips_turn() {
    let handle = started_engine(Duration::from_secs(600)).await;

    let before = handle.snapshot();
    let acting = before.turn;
    let expected_top = match acting {
        Seat::Player => *before.player_hand.last().unwrap(),
        Seat::Computer => *before.computer_hand.last().unwrap(),
    };

    let drawn = handle.draw_card(acting).await.unwrap().unwrap();
    assert_eq!(drawn, expected_top);

    let after = handle.snapshot();
    assert_eq!(after.turn, acting.opponent());
    assert_eq!(after.center_pile.len(), 1);
    assert_eq!(after.card_count(), 52);
}

#[tokio::test(start_paused = true)]
async fn test_bot_draws_after_its_reaction_delay() {
    let handle = started_engine(Duration::from_millis(100)).await;

    // Whoever opens, hand the turn to the bot.
    if handle.snapshot().turn == Seat::Player {
        handle.draw_card(Seat::Player).await.unwrap();
    }
    let pile_before = handle.snapshot().center_pile.len();

    let mut turn = handle.reader().watch_turn();
    let back = turn.wait_for(|t| *t == Seat::Player).await;
    assert_eq!(back, Some(Seat::Player));

    let after = handle.snapshot();
    assert_eq!(after.center_pile.len(), pile_before + 1);
    assert_eq!(after.card_count(), 52);
}

#[tokio::test(start_paused = true)]
async fn test_faster_reaction_time_supersedes_a_pending_bot_delay() {
    let handle = started_engine(Duration::from_secs(600)).await;

    if handle.snapshot().turn == Seat::Player {
        handle.draw_card(Seat::Player).await.unwrap();
    }
    // The bot is now armed with a ten-minute delay. Dropping the
    // reaction time re-arms it with the new value.
    handle
        .set_reaction_time(Duration::from_millis(50))
        .await
        .unwrap();

    let mut turn = handle.reader().watch_turn();
    let back = tokio::time::timeout(
        Duration::from_secs(10),
        turn.wait_for(|t| *t == Seat::Player),
    )
    .await
    .expect("bot never acted on the shortened delay");
    assert_eq!(back, Some(Seat::Player));
}

#[tokio::test(start_paused = true)]
async fn test_reset_preserves_round_and_reaction_time() {
    let handle = started_engine(Duration::from_millis(250)).await;
    handle.reset().await.unwrap();

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.status, GameStatus::Ready);
    assert_eq!(snapshot.round, 1);
    assert_eq!(snapshot.card_count(), 0);
    assert_eq!(
        *handle.reader().watch_reaction_time().borrow(),
        Duration::from_millis(250)
    );

    // Restarting keeps counting rounds up.
    handle.start_new_game().await.unwrap();
    assert_eq!(handle.snapshot().round, 2);
}

#[tokio::test(start_paused = true)]
async fn test_cards_are_conserved_through_live_play() {
    let handle = started_engine(Duration::from_millis(50)).await;

    for _ in 0..200 {
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.card_count(), 52);
        if snapshot.status != GameStatus::Started {
            break;
        }
        if snapshot.turn == Seat::Player && !snapshot.player_hand.is_empty() {
            handle.draw_card(Seat::Player).await.unwrap();
        } else {
            // The bot's move, or a pending snap only it will take.
            tokio::time::sleep(Duration::from_millis(60)).await;
        }
    }
    assert_eq!(handle.snapshot().card_count(), 52);
}

#[tokio::test(start_paused = true)]
async fn test_player_snap_commands_flow_through_the_engine() {
    let handle = started_engine(Duration::from_secs(600)).await;
    let mut snaps = handle.reader().subscribe_snap_events();

    // Alternate draws until the pile holds at least two cards, then
    // snap as the player. Correctness depends on the shuffle; either
    // way the pile must empty and an event must be delivered.
    while handle.snapshot().center_pile.len() < 2 {
        let turn = handle.snapshot().turn;
        handle.draw_card(turn).await.unwrap();
    }

    let event = handle
        .attempt_snap(Seat::Player)
        .await
        .unwrap()
        .expect("snap with two pile cards must not be ignored");
    assert_eq!(event.seat, Seat::Player);
    assert!(handle.snapshot().center_pile.is_empty());
    assert_eq!(handle.snapshot().card_count(), 52);
    assert_eq!(snaps.try_recv(), Ok(event));
}

#[tokio::test(start_paused = true)]
async fn test_snap_flash_lights_up_and_expires() {
    let handle = started_engine(Duration::from_secs(600)).await;
    let mut flash = handle.snap_flash();

    while handle.snapshot().center_pile.len() < 2 {
        let turn = handle.snapshot().turn;
        handle.draw_card(turn).await.unwrap();
    }
    let event = handle.attempt_snap(Seat::Player).await.unwrap().unwrap();

    flash.changed().await.unwrap();
    assert_eq!(*flash.borrow(), Some(event));

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(*flash.borrow(), None);
    // The flash is a projection: expiry never touched the game state.
    assert_eq!(handle.snapshot().status, GameStatus::Started);
}
