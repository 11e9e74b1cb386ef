use std::rc::Rc;
use std::time::{Duration, Instant};

use alien_invasion::assets::ExplosionSheet;
use alien_invasion::entities::*;
use alien_invasion::group::*;
use alien_invasion::rect::Rect;
use alien_invasion::settings::Settings;

fn ctx(settings: &Settings, now: Instant) -> TickContext<'_> {
    TickContext { settings, now }
}

fn nine_frame_sheet() -> Rc<ExplosionSheet> {
    let frames = (1..=9).map(|i| vec![format!("{i}{i}{i}"), " * ".to_string()]).collect();
    Rc::new(ExplosionSheet::from_frames(frames).unwrap())
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(2, 3, 4, 5);
    assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (2, 6, 3, 8));
    assert_eq!((r.center_x(), r.center_y()), (4, 5));
}

#[test]
fn rect_overlap_excludes_touching_edges() {
    let a = Rect::new(0, 0, 3, 2);
    assert!(a.overlaps(&Rect::new(2, 1, 3, 2)));
    assert!(!a.overlaps(&Rect::new(3, 0, 3, 2))); // shares only the right edge
    assert!(!a.overlaps(&Rect::new(0, 2, 3, 2))); // shares only the bottom edge
    assert!(Rect::new(1, 0, 1, 1).overlaps(&a)); // fully inside
}

#[test]
fn rect_contains_point_is_half_open() {
    let r = Rect::new(10, 10, 12, 3);
    assert!(r.contains_point(10, 10));
    assert!(r.contains_point(21, 12));
    assert!(!r.contains_point(22, 10));
    assert!(!r.contains_point(10, 13));
    assert!(!r.contains_point(9, 11));
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_moves_right_while_flag_set() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_right = true;
    ship.update(&ctx(&settings, Instant::now()));
    assert!((ship.x - 39.5).abs() < 1e-6);
    assert_eq!(ship.rect.x, 39);
    ship.update(&ctx(&settings, Instant::now()));
    assert_eq!(ship.rect.x, 40);
}

#[test]
fn ship_clamped_at_right_edge() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_right = true;
    for _ in 0..1_000 {
        ship.update(&ctx(&settings, Instant::now()));
        assert!(ship.rect.x <= settings.screen_width - ship.rect.width);
    }
    assert_eq!(ship.rect.x, 77);
    assert_eq!(ship.rect.right(), settings.screen_width);
}

#[test]
fn ship_clamped_at_left_edge() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_left = true;
    for _ in 0..1_000 {
        ship.update(&ctx(&settings, Instant::now()));
        assert!(ship.rect.x >= 0);
    }
    assert_eq!(ship.rect.x, 0);
    assert_eq!(ship.x, 0.0);
}

#[test]
fn ship_holds_still_with_both_flags() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.moving_left = true;
    ship.moving_right = true;
    ship.update(&ctx(&settings, Instant::now()));
    assert_eq!(ship.rect.x, 39);
}

#[test]
fn center_ship_repositions_existing_ship() {
    let settings = Settings::default();
    let mut ship = Ship::new(&settings);
    ship.x = 3.7;
    ship.rect.x = 3;
    ship.center_ship(&settings);
    assert_eq!(ship.rect.x, 39);
    assert_eq!(ship.x, 39.0);
    assert_eq!(ship.rect.bottom(), settings.screen_height);
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_starts_at_ship_mid_top() {
    let settings = Settings::default();
    let ship = Ship::new(&settings);
    let b = Bullet::new(&settings, &ship);
    assert_eq!(b.rect, Rect::new(40, 22, 1, 1));
    assert_eq!(b.y, 22.0);
}

#[test]
fn bullet_rect_truncates_float_position() {
    let settings = Settings::default();
    let ship = Ship::new(&settings);
    let mut b = Bullet::new(&settings, &ship);
    b.update(&ctx(&settings, Instant::now()));
    assert_eq!(b.rect.y, 21); // 21.4
    b.update(&ctx(&settings, Instant::now()));
    assert_eq!(b.rect.y, 20); // 20.8
    assert_eq!(b.rect.x, 40);
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_edges() {
    let settings = Settings::default();
    assert!(Alien::at(&settings, 0, 5).check_edges(&settings));
    assert!(Alien::at(&settings, 77, 5).check_edges(&settings));
    assert!(!Alien::at(&settings, 1, 5).check_edges(&settings));
    assert!(!Alien::at(&settings, 76, 5).check_edges(&settings));
}

#[test]
fn alien_follows_fleet_direction() {
    let mut settings = Settings::default();
    let mut alien = Alien::at(&settings, 10, 5);
    for _ in 0..25 {
        alien.update(&ctx(&settings, Instant::now()));
    }
    assert!((alien.x - 12.5).abs() < 1e-4);
    assert_eq!(alien.rect.x, 12);

    settings.fleet_direction = -1;
    for _ in 0..25 {
        alien.update(&ctx(&settings, Instant::now()));
    }
    assert!((alien.x - 10.0).abs() < 1e-4);
    assert_eq!(alien.rect.y, 5);
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[test]
fn explosion_takes_size_of_first_frame() {
    let e = Explosion::new(nine_frame_sheet(), 4, 6, Instant::now());
    assert_eq!(e.rect, Rect::new(4, 6, 3, 2));
    assert_eq!(e.frame_count(), 9);
    assert_eq!(e.image().unwrap()[0], "111");
}

#[test]
fn explosion_waits_more_than_frame_rate() {
    let t0 = Instant::now();
    let settings = Settings::default();
    let mut e = Explosion::new(nine_frame_sheet(), 0, 0, t0);

    e.update(&ctx(&settings, t0 + Duration::from_millis(50)));
    assert_eq!(e.frame, 0);
    e.update(&ctx(&settings, t0 + Duration::from_millis(51)));
    assert_eq!(e.frame, 1);
    assert_eq!(e.image().unwrap()[0], "222");
    // Timer restarts from the last advance
    e.update(&ctx(&settings, t0 + Duration::from_millis(90)));
    assert_eq!(e.frame, 1);
}

#[test]
fn explosion_advances_one_frame_per_update() {
    let t0 = Instant::now();
    let settings = Settings::default();
    let mut e = Explosion::new(nine_frame_sheet(), 0, 0, t0);
    e.update(&ctx(&settings, t0 + Duration::from_secs(5)));
    assert_eq!(e.frame, 1);
}

#[test]
fn explosion_removed_exactly_after_last_frame() {
    let t0 = Instant::now();
    let settings = Settings::default();
    let mut group = Group::new();
    group.add(Explosion::new(nine_frame_sheet(), 0, 0, t0));

    let step = Duration::from_millis(60);
    let mut now = t0;
    for expected in 1..9 {
        now += step;
        group.update(&ctx(&settings, now));
        assert_eq!(group.len(), 1);
        let e = group.iter().next().unwrap();
        assert_eq!(e.frame, expected);
        assert!(e.image().is_some());
    }

    now += step;
    group.update(&ctx(&settings, now));
    assert!(group.is_empty());
}

// ── Group ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct Block(Rect);

impl Sprite for Block {
    fn rect(&self) -> Rect {
        self.0
    }
}

fn block(x: i32, y: i32) -> Block {
    Block(Rect::new(x, y, 2, 2))
}

#[test]
fn group_collide_removes_both_sides() {
    let mut shots = Group::new();
    shots.add(block(0, 0));
    shots.add(block(20, 20));
    let mut targets = Group::new();
    targets.add(block(1, 1));
    targets.add(block(10, 10));

    let hits = group_collide(&mut shots, &mut targets);
    assert_eq!(hits, vec![(block(0, 0), vec![block(1, 1)])]);
    assert_eq!(shots.iter().cloned().collect::<Vec<_>>(), vec![block(20, 20)]);
    assert_eq!(targets.iter().cloned().collect::<Vec<_>>(), vec![block(10, 10)]);
}

#[test]
fn group_collide_first_visitor_claims_target() {
    let mut shots = Group::new();
    shots.add(block(0, 0));
    shots.add(block(1, 0));
    let mut targets = Group::new();
    targets.add(block(1, 1));

    let hits = group_collide(&mut shots, &mut targets);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, block(0, 0));
    assert_eq!(shots.len(), 1);
    assert!(targets.is_empty());
}

#[test]
fn group_collide_without_overlap_leaves_groups_alone() {
    let mut shots = Group::new();
    shots.add(block(0, 0));
    let mut targets = Group::new();
    targets.add(block(2, 0)); // touching, not overlapping

    assert!(group_collide(&mut shots, &mut targets).is_empty());
    assert_eq!(shots.len(), 1);
    assert_eq!(targets.len(), 1);
}

#[test]
fn group_collide_any() {
    let mut group = Group::new();
    group.add(block(5, 5));
    assert!(group.collide_any(&Rect::new(6, 6, 1, 1)));
    assert!(!group.collide_any(&Rect::new(7, 7, 1, 1)));
    group.empty();
    assert!(!group.collide_any(&Rect::new(5, 5, 1, 1)));
}

// ── Button ────────────────────────────────────────────────────────────────────

#[test]
fn play_button_is_centred() {
    let settings = Settings::default();
    let button = Button::new(&settings, "Play");
    assert_eq!(button.rect, Rect::new(34, 11, 12, 3));
    assert_eq!(button.label, "Play");
}
