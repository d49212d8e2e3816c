use burst_arena::Tuning;
use burst_arena::sim::{GameEvent, GamePhase, GameState, Side, TickInput, tick};
use glam::Vec2;

fn idle() -> TickInput {
    TickInput {
        idle_mode: true,
        ..Default::default()
    }
}

fn run(state: &mut GameState, input: &TickInput, ticks: usize) {
    for _ in 0..ticks {
        tick(state, input);
    }
}

// ── burst timing ─────────────────────────────────────────────────────────────

#[test]
fn burst_lasts_until_last_right_column_shot() {
    let mut tuning = Tuning::default();
    tuning.enemy.weapon.damage = 0;
    let mut state = GameState::new(1, tuning);

    // Aim away from the enemy, then release
    let aim = TickInput {
        aim_target: Some(Vec2::new(0.0, 300.0)),
        trigger_held: true,
        ..Default::default()
    };
    tick(&mut state, &aim);
    let release = TickInput {
        trigger_released: true,
        ..Default::default()
    };
    tick(&mut state, &release);
    assert!(state.player.is_shooting());
    assert!(state.player.ammo.is_suspended());

    // Right column, shot 11: delay 5 * 5 + 2 = 27 at bullet_delay 5
    let mut spawned = state.player_projectiles.len();
    let mut last_spawn_tick = state.time_ticks;
    while state.player.is_shooting() {
        let before = state.player.burst.pending();
        tick(&mut state, &TickInput::default());
        if state.player.burst.pending() < before {
            spawned += before - state.player.burst.pending();
            last_spawn_tick = state.time_ticks;
        }
    }
    assert_eq!(spawned, 12);
    assert_eq!(last_spawn_tick - 2, 27);
    assert!(!state.player.ammo.is_suspended());
}

#[test]
fn three_bursts_then_dry() {
    let mut tuning = Tuning::default();
    tuning.enemy.weapon.damage = 0;
    tuning.player.ammo.recharge_rate = 0.0;
    let mut state = GameState::new(2, tuning);

    let release = TickInput {
        trigger_released: true,
        ..Default::default()
    };
    let mut bursts = 0;
    for _ in 0..4 {
        tick(&mut state, &release);
        if state.events.contains(&GameEvent::BurstStarted { side: Side::Player }) {
            bursts += 1;
        }
        while state.player.is_shooting() {
            tick(&mut state, &TickInput::default());
        }
    }
    assert_eq!(bursts, 3);
    assert_eq!(state.player.ammo.total(), 0.0);
}

// ── round lifecycle ──────────────────────────────────────────────────────────

#[test]
fn player_death_and_restart() {
    let mut tuning = Tuning::default();
    tuning.player.max_health = 10;
    let mut state = GameState::new(9, tuning.clone());

    // Stand still and let the enemy close in
    let mut died = false;
    for _ in 0..1200 {
        tick(&mut state, &TickInput::default());
        if state.events.contains(&GameEvent::PlayerDefeated) {
            died = true;
            break;
        }
    }
    assert!(died);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.snapshot().game_over_menu.is_some());

    // Frozen until restart
    let frozen = state.snapshot();
    run(&mut state, &idle(), 10);
    assert_eq!(state.snapshot(), frozen);

    tick(
        &mut state,
        &TickInput {
            restart: true,
            ..Default::default()
        },
    );
    assert_eq!(state.snapshot(), GameState::new(9, tuning).snapshot());
}

#[test]
fn harmless_enemy_never_ends_round() {
    let tuning = Tuning::from_json(r#"{"enemy": {"weapon": {"damage": 0}}}"#).expect("tuning");
    assert_eq!(tuning.enemy.speed, 3.0);
    let mut state = GameState::new(3, tuning);

    let mut hits = 0;
    for _ in 0..1200 {
        tick(&mut state, &TickInput::default());
        hits += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { target: Side::Player, .. }))
            .count();
    }
    assert!(hits > 0);
    assert_eq!(state.player.health.current, 100);
    assert_eq!(state.phase, GamePhase::Playing);
}

// ── invariants over long demo runs ───────────────────────────────────────────

#[test]
fn idle_run_keeps_invariants() {
    let mut state = GameState::new(2024, Tuning::default());
    let arena = state.tuning.arena;
    for _ in 0..3000 {
        tick(&mut state, &idle());
        if state.is_game_over() {
            break;
        }
        for c in [&state.player, &state.enemy] {
            assert!(arena.contains_circle(c.pos, c.radius()));
            assert!(c.ammo.segments().iter().all(|s| (0.0..=1.0).contains(s)));
            assert!(c.health.current <= c.health.max);
        }
        for p in state.projectiles() {
            assert!(p.active);
            assert!(p.distance_traveled < p.max_distance);
        }
    }
}

#[test]
fn same_seed_same_frames() {
    let mut a = GameState::new(77, Tuning::default());
    let mut b = GameState::new(77, Tuning::default());
    for _ in 0..900 {
        tick(&mut a, &idle());
        tick(&mut b, &idle());
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
