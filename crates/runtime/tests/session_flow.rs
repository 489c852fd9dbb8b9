use std::sync::Arc;

use game_core::{Action, EquipSlot, GameConfig, Outcome, SaveCode, StatBlock, StatKey};
use runtime::{
    FileStateRepository, InMemoryStateRepo, InlineSink, PersistenceHandle, RuntimeError, Session,
    SnapshotSink, StateRepository,
};

const LEGACY_SAVE: &str = include_str!("fixtures/legacy_save.json");

fn code(raw: &str) -> SaveCode {
    SaveCode::parse(raw).unwrap()
}

fn inline_session() -> (Arc<InMemoryStateRepo>, Session) {
    let repo = Arc::new(InMemoryStateRepo::new());
    let sink = Arc::new(InlineSink::new(repo.clone()));
    (repo.clone(), Session::new(repo, sink))
}

#[tokio::test]
async fn autosave_follows_every_persisted_change() {
    let (repo, mut session) = inline_session();
    session.set_save_code("hero").unwrap();

    // Setting the code alone does not write anything.
    assert!(!repo.exists(&code("hero")));

    let update = session.dispatch(Action::equip("starter_sword"));
    assert!(update.autosaved);

    let stored = repo.load(&code("hero")).unwrap().unwrap();
    assert_eq!(stored, *session.state());
    assert_eq!(stored.stats, StatBlock::new(4, 3, 3, 3));
}

#[tokio::test]
async fn skipped_actions_do_not_autosave() {
    let (repo, mut session) = inline_session();
    session.set_save_code("hero").unwrap();

    let update = session.dispatch(Action::unequip(EquipSlot::Weapon));

    assert!(matches!(update.outcome, Outcome::Skipped(_)));
    assert!(!update.autosaved);
    assert!(!repo.exists(&code("hero")));
}

#[tokio::test]
async fn no_autosave_without_save_code() {
    let (repo, mut session) = inline_session();

    let update = session.dispatch(Action::narrate("hello"));

    assert!(!update.autosaved);
    assert!(repo.list_codes().unwrap().is_empty());
}

#[tokio::test]
async fn autosave_can_be_disabled() {
    let repo = Arc::new(InMemoryStateRepo::new());
    let sink = Arc::new(InlineSink::new(repo.clone()));
    let mut session = Session::new(repo.clone(), sink).with_autosave(false);
    session.set_save_code("quiet").unwrap();

    session.dispatch(Action::gain_experience(10));
    assert!(!repo.exists(&code("quiet")));

    session.save().await.unwrap();
    assert!(repo.exists(&code("quiet")));
}

#[tokio::test]
async fn save_and_load_round_trip() {
    let repo = Arc::new(InMemoryStateRepo::new());
    let sink = Arc::new(InlineSink::new(repo.clone()));
    let mut session = Session::new(repo, sink).with_autosave(false);
    session.set_save_code("roundtrip").unwrap();
    session.dispatch(Action::equip("starter_sword"));
    session.dispatch(Action::gain_experience(150));

    assert_eq!(session.save().await.unwrap(), code("roundtrip"));
    let saved = session.state().clone();

    session.new_game();
    assert_ne!(*session.state(), saved);
    assert_eq!(session.save_code(), Some(&code("roundtrip")));

    session.load().await.unwrap();
    assert_eq!(*session.state(), saved);
    assert_eq!(session.state().profile.level, 2);
    assert_eq!(session.state().profile.xp, 50);
}

#[tokio::test]
async fn save_and_load_need_a_save_code() {
    let (_repo, mut session) = inline_session();

    assert!(matches!(
        session.save().await,
        Err(RuntimeError::MissingSaveCode)
    ));
    assert!(matches!(
        session.load().await,
        Err(RuntimeError::MissingSaveCode)
    ));
}

#[tokio::test]
async fn missing_and_corrupted_saves_leave_state_alone() {
    let (repo, mut session) = inline_session();
    session.set_save_code("ghost").unwrap();
    session.dispatch(Action::narrate("still here"));
    let before = session.state().clone();

    repo.delete(&code("ghost")).unwrap();
    assert!(matches!(
        session.load().await,
        Err(RuntimeError::SaveNotFound { .. })
    ));
    assert_eq!(*session.state(), before);

    repo.insert_raw(code("ghost"), "{\"profile\": 12}").unwrap();
    assert!(matches!(
        session.load().await,
        Err(RuntimeError::CorruptedSave { .. })
    ));
    assert_eq!(*session.state(), before);
}

#[tokio::test]
async fn loaded_save_without_code_keeps_the_slot_code() {
    let (repo, mut session) = inline_session();
    let mut stored = game_core::GameState::new_game(None);
    stored.log.push("from an old save".into());
    repo.save(&code("legacy"), &stored).unwrap();

    session.set_save_code("legacy").unwrap();
    session.load().await.unwrap();

    assert_eq!(session.state().log, ["from an old save"]);
    assert_eq!(session.save_code(), Some(&code("legacy")));
}

#[tokio::test]
async fn invalid_event_text_is_rejected_before_the_engine() {
    let (repo, mut session) = inline_session();
    session.set_save_code("events").unwrap();
    let before = session.state().clone();

    assert!(matches!(
        session.apply_event_json("{ nope"),
        Err(RuntimeError::InvalidEvent(_))
    ));
    assert!(matches!(
        session.apply_event_json("[]"),
        Err(RuntimeError::InvalidEvent(_))
    ));
    assert_eq!(*session.state(), before);
    assert!(!repo.exists(&code("events")));
}

#[tokio::test]
async fn event_text_applies_as_one_transition() {
    let (repo, mut session) = inline_session();
    session.set_save_code("events").unwrap();

    let update = session
        .apply_event_json(
            r#"{"log": "A merchant gifts you a blade.",
                "gainItems": [{"id": "starter_sword", "name": "Dup Sword", "type": "weapon"}],
                "equip": {"slot": "weapon", "itemId": "starter_sword_2"}}"#,
        )
        .unwrap();

    assert!(update.autosaved);
    let state = session.state();
    assert!(state.inventory.contains("starter_sword"));
    assert_eq!(
        state.equipment.weapon.as_ref().map(|item| item.name.as_str()),
        Some("Dup Sword")
    );
    assert_eq!(
        state.log,
        ["A merchant gifts you a blade.", "Equipped Dup Sword (weapon)."]
    );
    assert_eq!(repo.load(&code("events")).unwrap().as_ref(), Some(state));
}

#[tokio::test]
async fn invalid_save_codes_are_rejected() {
    let (_repo, mut session) = inline_session();

    assert!(matches!(
        session.set_save_code("   "),
        Err(RuntimeError::InvalidSaveCode(_))
    ));
    assert!(matches!(
        session.set_save_code("../etc"),
        Err(RuntimeError::InvalidSaveCode(_))
    ));
    assert_eq!(session.save_code(), None);
}

#[tokio::test]
async fn configured_name_seeds_new_games() {
    let (_repo, session) = inline_session();
    let mut session = session.with_config(GameConfig {
        default_name: "Mira".into(),
    });

    assert_eq!(session.state().profile.name, "Mira");
    session.dispatch(Action::narrate("hi"));
    session.new_game();
    assert_eq!(session.state().profile.name, "Mira");
    assert!(session.state().log.is_empty());
}

#[tokio::test]
async fn worker_backed_session_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let repo: Arc<dyn StateRepository> = Arc::new(FileStateRepository::new(dir.path()).unwrap());
    let (handle, join) = PersistenceHandle::spawn(repo.clone());
    let sink: Arc<dyn SnapshotSink> = Arc::new(handle.clone());

    let mut session = Session::new(repo.clone(), sink);
    session.set_save_code("disk").unwrap();
    session.dispatch(Action::use_item("bandage"));
    session.dispatch(Action::gain_experience(250));
    session.flush().await.unwrap();

    assert!(dir.path().join("rpg_save_disk.json").exists());
    let stored = repo.load(&code("disk")).unwrap().unwrap();
    assert_eq!(stored, *session.state());
    assert_eq!(stored.stats.vit, 4);
    assert_eq!(stored.profile.level, 3);

    let mut other = Session::new(repo.clone(), Arc::new(handle.clone()));
    other.set_save_code("disk").unwrap();
    other.load().await.unwrap();
    assert_eq!(other.state(), session.state());

    handle.shutdown().unwrap();
    join.await.unwrap();
}

#[tokio::test]
async fn browser_app_saves_load_and_stay_playable() {
    let (repo, mut session) = inline_session();
    repo.insert_raw(code("old"), LEGACY_SAVE).unwrap();
    session.set_save_code("old").unwrap();
    session.load().await.unwrap();

    let state = session.state();
    assert_eq!((state.profile.level, state.profile.xp), (2, 40));
    let charm = state.inventory.find("lucky_charm").unwrap();
    assert_eq!(charm.modifiers.iter().collect::<Vec<_>>(), [(StatKey::Int, 2)]);
    assert_eq!(state.inventory.duplicate_id(), Some("starter_sword"));

    let update = session.dispatch(Action::narrate("I look around."));
    assert!(matches!(update.outcome, Outcome::Applied(_)));

    let update = session.dispatch(Action::use_item("bandage"));
    assert!(matches!(update.outcome, Outcome::Applied(_)));
    assert_eq!(session.state().stats.vit, 4);

    let update = session.dispatch(Action::drop_item("starter_sword"));
    assert!(matches!(update.outcome, Outcome::Applied(_)));

    let state = session.state();
    assert_eq!(state.log.last().map(String::as_str), Some("Dropped Rusty Sword."));
    assert_eq!(
        state.inventory.find("starter_sword").map(|item| item.name.as_str()),
        Some("Old Blade")
    );
    assert_eq!(state.inventory.duplicate_id(), None);
}
