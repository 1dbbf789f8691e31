use novel_flow::gallery::Gallery;
use novel_flow::narrative::NarrativeProgress;
use novel_flow::save::{SaveManager, SlotStorage};
use novel_flow::workflow::{ConfirmationKind, LoadingKind, WorkflowState};
use novel_flow::{AnswerOutcome, FlowConfig, FlowController, FlowError, Screen};
use std::time::{Duration, Instant};

fn config() -> FlowConfig {
    FlowConfig::default()
}

#[test]
fn test_every_screen_is_reachable() {
    let mut flow = FlowController::new(&config());

    for screen in Screen::all() {
        assert_eq!(flow.request_transition(screen), screen);
        assert_eq!(flow.current_screen(), screen);
    }
}

#[test]
fn test_fresh_start_new_game_scenario() {
    let mut flow = FlowController::new(&config());
    let start = Instant::now();
    assert_eq!(flow.current_screen(), Screen::Main);
    assert!(flow.list_slots().iter().all(|slot| slot.is_empty()));

    flow.request_transition(Screen::GameMenu);
    flow.request_confirmation(ConfirmationKind::NewGame, None).unwrap();
    assert_eq!(
        flow.answer_at(true, start).unwrap(),
        AnswerOutcome::Started(LoadingKind::NewGame)
    );

    let done = flow
        .update_at(start + Duration::from_millis(3000))
        .unwrap()
        .unwrap();

    assert_eq!(done.screen, Screen::Narrative);
    assert_eq!(flow.current_screen(), Screen::Narrative);
    assert_eq!(*flow.narrative_progress(), NarrativeProgress::default());
    assert_eq!(flow.narrative_progress().chapter_id, "chapter1");
    assert_eq!(flow.narrative_progress().dialogue_index, 0);
}

#[test]
fn test_save_into_empty_slot_scenario() {
    let mut flow = FlowController::new(&config());
    let start = Instant::now();
    assert!(matches!(flow.slots().load_slot(3), Err(FlowError::EmptySlot(3))));

    flow.request_confirmation(ConfirmationKind::SaveGame, Some(3)).unwrap();
    flow.answer_at(true, start).unwrap();
    flow.update_at(start + Duration::from_millis(2000)).unwrap();

    assert!(flow.slots().load_slot(3).is_ok());
    assert_eq!(flow.current_screen(), Screen::Narrative);
}

#[test]
fn test_declining_leaves_slots_and_gallery_unchanged() {
    let mut flow = FlowController::new(&config());
    let start = Instant::now();
    flow.request_save(1).unwrap();
    flow.answer_at(true, start).unwrap();
    flow.update_at(start + Duration::from_secs(3)).unwrap();
    flow.request_transition(Screen::Main);

    let live = NarrativeProgress::at("chapter4", "scene4_2", 8);
    flow.set_narrative_progress(live.clone());
    let slots_before = flow.list_slots().to_vec();
    let images_before = flow.list_images().to_vec();

    for kind in [
        ConfirmationKind::NewGame,
        ConfirmationKind::LoadGame,
        ConfirmationKind::SaveGame,
        ConfirmationKind::OverwriteSave,
        ConfirmationKind::Exit,
    ] {
        flow.request_confirmation(kind, Some(1)).unwrap();
        assert_eq!(flow.answer(false).unwrap(), AnswerOutcome::Declined);
        assert_eq!(*flow.workflow_state(), WorkflowState::Idle);
    }

    assert_eq!(flow.list_slots(), slots_before.as_slice());
    assert_eq!(flow.list_images(), images_before.as_slice());
    assert_eq!(*flow.narrative_progress(), live);
    assert_eq!(flow.current_screen(), Screen::Main);
}

#[test]
fn test_second_request_is_busy_in_both_phases() {
    let mut flow = FlowController::new(&config());
    let start = Instant::now();

    flow.request_confirmation(ConfirmationKind::SaveGame, Some(2)).unwrap();
    assert!(matches!(
        flow.request_confirmation(ConfirmationKind::NewGame, None),
        Err(FlowError::WorkflowBusy)
    ));
    let pending = flow.pending_confirmation().unwrap();
    assert_eq!(pending.kind, ConfirmationKind::SaveGame);
    assert_eq!(pending.target_slot, Some(2));

    flow.answer_at(true, start).unwrap();
    assert!(matches!(
        flow.request_confirmation(ConfirmationKind::Exit, None),
        Err(FlowError::WorkflowBusy)
    ));
    assert_eq!(flow.loading_task().unwrap().kind(), LoadingKind::SaveGame);
}

#[test]
fn test_gallery_view_requires_unlock() {
    let mut flow = FlowController::new(&config());

    assert!(matches!(flow.view_image(2), Err(FlowError::Locked(2))));
    flow.on_gallery_unlock(2).unwrap();
    flow.on_gallery_unlock(2).unwrap();

    let image = flow.view_image(2).unwrap();
    assert_eq!(image.id, 2);
    assert!(image.is_unlocked());
}

#[test]
fn test_saves_and_unlocks_survive_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = FlowConfig {
        save_directory: Some(dir.path().to_path_buf()),
        ..FlowConfig::default()
    };
    let start = Instant::now();
    let progress = NarrativeProgress::at("chapter2", "scene2_2", 11);

    {
        let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
        let mut flow = FlowController::with_storage(&config, manager).unwrap();
        flow.set_narrative_progress(progress.clone());
        flow.request_save(6).unwrap();
        flow.answer_at(true, start).unwrap();
        flow.update_at(start + Duration::from_secs(3)).unwrap();
        flow.on_gallery_unlock(4).unwrap();
    }

    let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
    assert!(manager.save_exists(6));
    assert_eq!(manager.load_unlocks().unwrap(), vec![1, 4]);

    let mut flow =
        FlowController::with_gallery(&config, manager, Gallery::create_default()).unwrap();
    assert!(flow.view_image(4).is_ok());

    flow.request_load(6).unwrap();
    flow.answer_at(true, start).unwrap();
    let done = flow
        .update_at(start + Duration::from_millis(2500))
        .unwrap()
        .unwrap();

    assert_eq!(done.kind, LoadingKind::LoadGame);
    assert_eq!(*flow.narrative_progress(), progress);
    assert_eq!(flow.narrative_session().unwrap().progress, progress);
}

#[test]
fn test_abandoned_save_is_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = FlowConfig {
        save_directory: Some(dir.path().to_path_buf()),
        ..FlowConfig::default()
    };
    let start = Instant::now();
    let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
    let mut flow = FlowController::with_storage(&config, manager).unwrap();

    flow.request_save(1).unwrap();
    flow.answer_at(true, start).unwrap();
    flow.abandon();
    drop(flow);

    let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
    assert!(!manager.save_exists(1));
}

#[test]
fn test_corrupt_slot_file_does_not_block_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = FlowConfig {
        save_directory: Some(dir.path().to_path_buf()),
        ..FlowConfig::default()
    };
    let start = Instant::now();
    let progress = NarrativeProgress::at("chapter5", "scene5_1", 2);

    {
        let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
        let mut flow = FlowController::with_storage(&config, manager).unwrap();
        flow.set_narrative_progress(progress.clone());
        flow.request_save(2).unwrap();
        flow.answer_at(true, start).unwrap();
        flow.update_at(start + Duration::from_secs(3)).unwrap();
    }
    std::fs::write(dir.path().join("slot_3.json"), "not json").unwrap();
    std::fs::write(dir.path().join("gallery.json"), "not json").unwrap();

    let manager = SaveManager::new(config.resolved_save_directory()).unwrap();
    let flow = FlowController::with_storage(&config, manager).unwrap();

    assert_eq!(flow.list_slots().len(), 6);
    assert_eq!(flow.slots().load_slot(2).unwrap(), progress);
    assert!(matches!(flow.slots().load_slot(3), Err(FlowError::EmptySlot(3))));
    assert!(flow.view_image(1).is_ok());
}
