use std::rc::Rc;

use skinbind::{AnimationMode, CacheConfig, DefinitionStatus, PLAYER_UNIQUE};
use skinbind_test_fixtures::{bare_manager, manager, profiles, Call, FrameBuffer, ModelHandle};

const BODY: ModelHandle = ModelHandle(2);

fn bound_definition(mgr: &skinbind_test_fixtures::FixtureManager) -> String {
    let player = mgr.bound_player().expect("bound player");
    let state = player.borrow();
    state
        .model_definition()
        .expect("renderable definition")
        .name()
        .to_string()
}

#[test]
fn changed_skin_texture_reloads_exactly_once() -> anyhow::Result<()> {
    let (mut mgr, journal) = manager();
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&profiles::entity("steve")?, &mut buffer, &BODY);
    let stale = mgr.bound_player().expect("bound player");

    mgr.bind_player(&profiles::entity("steve_reskinned")?, &mut buffer, &BODY);

    assert_eq!(mgr.loader().stats().reloads, 1);
    let fresh = mgr.bound_player().expect("bound player");
    assert!(!Rc::ptr_eq(&stale, &fresh));
    assert_eq!(bound_definition(&mgr), "Steve:player:tex-steve-v2");
    assert!(matches!(
        journal.borrow().last(),
        Some(Call::Prepare { definition, .. }) if definition == "Steve:player:tex-steve-v2"
    ));
    Ok(())
}

#[test]
fn unchanged_skin_texture_reuses_cached_resolution() -> anyhow::Result<()> {
    let (mut mgr, _journal) = manager();
    let steve = profiles::entity("steve")?;
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&steve, &mut buffer, &BODY);
    mgr.bind_hand(&steve, &mut buffer, &ModelHandle(1));

    let stats = mgr.loader().stats();
    assert_eq!(stats.reloads, 0);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    Ok(())
}

#[test]
fn texture_disappearing_counts_as_change() -> anyhow::Result<()> {
    let (mut mgr, _journal) = manager();
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&profiles::entity("steve")?, &mut buffer, &BODY);
    mgr.bind_hand(&profiles::entity("steve_unfetched")?, &mut buffer, &ModelHandle(1));

    assert_eq!(mgr.loader().stats().reloads, 1);
    assert_eq!(bound_definition(&mgr), "Steve:player:none");
    Ok(())
}

#[test]
fn failed_reload_unbinds_and_drops_stale_entry() -> anyhow::Result<()> {
    let (mut mgr, journal) = manager();
    let steve = profiles::entity("steve")?;
    let mut buffer = FrameBuffer::default();

    assert!(mgr.bind_player(&steve, &mut buffer, &BODY));
    assert!(!mgr.bind_player(&profiles::entity("steve_vanished")?, &mut buffer, &BODY));

    assert_eq!(journal.borrow().last(), Some(&Call::Unbind(BODY)));
    let stats = mgr.loader().stats();
    assert_eq!(stats.reloads, 1);
    assert_eq!(stats.failures, 1);
    assert!(mgr.loader().peek(&steve.profile, PLAYER_UNIQUE).is_none());
    assert!(mgr.bound_player().is_none());
    Ok(())
}

#[test]
fn explicit_models_are_not_checked_for_staleness() -> anyhow::Result<()> {
    let (mut mgr, _journal) = manager();
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&profiles::entity("alex")?, &mut buffer, &BODY);
    mgr.bind_player(&profiles::entity("alex_reskinned")?, &mut buffer, &BODY);

    assert_eq!(mgr.loader().stats().reloads, 0);
    assert_eq!(bound_definition(&mgr), "Alex:player:tex-alex");
    Ok(())
}

#[test]
fn no_texture_getter_disables_staleness_checks() -> anyhow::Result<()> {
    let mut mgr = bare_manager(CacheConfig::default());
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&profiles::entity("steve")?, &mut buffer, &BODY);
    mgr.bind_player(&profiles::entity("steve_reskinned")?, &mut buffer, &BODY);

    assert_eq!(mgr.loader().stats().reloads, 0);
    assert_eq!(bound_definition(&mgr), "Steve:player:tex-steve-v1");
    Ok(())
}

#[test]
fn skull_texture_change_resolves_under_new_key() -> anyhow::Result<()> {
    let (mut mgr, _journal) = manager();
    let mut buffer = FrameBuffer::default();
    let old = profiles::get("steve")?;
    let new = profiles::get("steve_reskinned")?;

    mgr.bind_skull(&old, &mut buffer, &ModelHandle(3));
    mgr.bind_skull(&new, &mut buffer, &ModelHandle(3));

    let stats = mgr.loader().stats();
    assert_eq!(stats.reloads, 0);
    assert_eq!(stats.misses, 2);
    assert!(mgr.loader().peek(&new, "skull_tex:tex-steve-v2").is_some());
    Ok(())
}

#[test]
fn status_never_reloads_or_touches_session() -> anyhow::Result<()> {
    let (mut mgr, journal) = manager();
    let mut buffer = FrameBuffer::default();

    mgr.bind_player(&profiles::entity("steve")?, &mut buffer, &BODY);
    let before = mgr.bound_player().expect("bound player");
    let calls_before = journal.borrow().len();

    let status = mgr.status(&profiles::get("steve_reskinned")?, PLAYER_UNIQUE);

    assert_eq!(status, Some(DefinitionStatus::Loaded));
    assert_eq!(mgr.loader().stats().reloads, 0);
    assert_eq!(journal.borrow().len(), calls_before);
    let after = mgr.bound_player().expect("bound player");
    assert!(Rc::ptr_eq(&before, &after));
    assert_eq!(after.borrow().anim_state.animation_mode, AnimationMode::Player);
    Ok(())
}

#[test]
fn status_reports_unrenderable_and_missing_definitions() -> anyhow::Result<()> {
    let (mut mgr, _journal) = manager();

    assert_eq!(
        mgr.status(&profiles::get("notch")?, PLAYER_UNIQUE),
        Some(DefinitionStatus::Loading)
    );
    assert_eq!(mgr.status(&profiles::get("herobrine")?, PLAYER_UNIQUE), None);
    assert!(mgr.bound_player().is_none());
    Ok(())
}
