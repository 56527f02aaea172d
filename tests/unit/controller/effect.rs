use super::*;
use crate::foundation::core::{Rect, Vec2};
use crate::page::memory::MemoryPage;
use crate::surface::memory::MemorySurface;

fn controller(config: RevealConfig) -> EffectController<MemoryPage, MemorySurface> {
    EffectController::new(config, MemoryPage::new(), MemorySurface::new()).unwrap()
}

fn rect() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

#[test]
fn new_rejects_invalid_config() {
    let mut cfg = RevealConfig::default();
    cfg.grid.rows = 0;
    assert!(EffectController::new(cfg, MemoryPage::new(), MemorySurface::new()).is_err());
}

#[test]
fn start_builds_loaded_images_and_waits_for_others() {
    let mut c = controller(RevealConfig::default());
    let loaded = c.page_mut().insert_image(rect(), true);
    let pending = c.page_mut().insert_image(rect(), false);
    c.start();

    assert!(c.is_running());
    assert_eq!(c.choreographer().live_tiles(loaded), 48);
    assert_eq!(c.choreographer().live_tiles(pending), 0);
    assert!(c.subscriptions().any(|s| s == Subscription::ImageLoad(pending)));

    c.page_mut().set_loaded(pending);
    c.handle(PageEvent::ImageLoaded(pending));
    assert_eq!(c.choreographer().live_tiles(pending), 48);
    assert!(!c.subscriptions().any(|s| s == Subscription::ImageLoad(pending)));
    assert_eq!(c.surface().len(), 96);
}

#[test]
fn image_that_never_loads_never_gets_tiles() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), false);
    c.start();
    c.advance(60_000);
    assert_eq!(c.choreographer().live_tiles(img), 0);
    assert!(c.surface().is_empty());
    assert_eq!(c.surface().created_count(), 0);
}

#[test]
fn events_before_start_are_ignored() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), true);
    c.handle(PageEvent::ImageInserted(img));
    c.handle(PageEvent::ImageLoaded(img));
    c.handle(PageEvent::Resized);
    assert!(c.surface().is_empty());
    assert_eq!(c.subscriptions().count(), 0);
}

#[test]
fn inserted_image_is_picked_up_while_running() {
    let mut c = controller(RevealConfig::default());
    c.start();
    let img = c.page_mut().insert_image(rect(), true);
    c.handle(PageEvent::ImageInserted(img));
    assert_eq!(c.choreographer().live_tiles(img), 48);
}

#[test]
fn removed_pending_image_drops_its_load_subscription() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), false);
    c.start();
    c.page_mut().remove_image(img);
    c.handle(PageEvent::ImageRemoved(img));
    c.handle(PageEvent::ImageLoaded(img));
    assert!(c.surface().is_empty());
    assert_eq!(c.subscriptions().count(), 3);
}

#[test]
fn resize_rebuilds_by_default() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), true);
    c.start();
    c.advance(300);
    let g0 = c.choreographer().generation(img).unwrap();

    c.page_mut()
        .set_image_rect(img, Rect::new(0.0, 0.0, 400.0, 300.0));
    c.handle(PageEvent::Resized);
    assert!(c.choreographer().generation(img).unwrap() > g0);
    assert_eq!(c.surface().len(), 48);
    for (_, t) in c.surface().tiles() {
        assert_eq!(t.style.opacity, 1.0);
        assert_eq!(t.style.rect.width(), 50.0);
    }
}

#[test]
fn resize_resync_keeps_timers_and_opacity() {
    let mut cfg = RevealConfig::default();
    cfg.resize = ResizeMode::Resync;
    cfg.remove_when_done = false;
    let mut c = controller(cfg);
    let img = c.page_mut().insert_image(rect(), true);
    c.start();
    c.advance(300);
    let g0 = c.choreographer().generation(img);
    let pending = c.pending_timers();
    let hidden = c
        .surface()
        .tiles()
        .filter(|(_, t)| t.style.opacity == 0.0)
        .count();
    assert!(hidden > 0);

    c.page_mut()
        .set_image_rect(img, Rect::new(0.0, 0.0, 400.0, 300.0));
    c.handle(PageEvent::Resized);
    assert_eq!(c.choreographer().generation(img), g0);
    assert_eq!(c.pending_timers(), pending);
    assert_eq!(
        c.surface()
            .tiles()
            .filter(|(_, t)| t.style.opacity == 0.0)
            .count(),
        hidden
    );
    for (_, t) in c.surface().tiles() {
        assert_eq!(t.style.rect.width(), 50.0);
        assert_eq!(t.style.rect.height(), 50.0);
    }
}

#[test]
fn scroll_moves_tiles_only() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), true);
    c.start();
    let before: Vec<_> = c.surface().tiles().map(|(id, t)| (id, t.style)).collect();

    c.page_mut().set_scroll(Vec2::new(0.0, 120.0));
    c.handle(PageEvent::Scrolled);
    for (id, style) in before {
        let t = c.surface().tile(id).unwrap();
        assert_eq!(t.style.rect, style.rect + Vec2::new(0.0, 120.0));
        assert_eq!(t.style.opacity, style.opacity);
    }
    assert_eq!(c.choreographer().live_tiles(img), 48);
}

#[test]
fn run_until_idle_clears_every_tile() {
    let mut c = controller(RevealConfig::dual_pass_blink());
    c.page_mut().insert_image(rect(), true);
    c.start();
    let end = c.run_until_idle();
    assert_eq!(
        end,
        crate::choreography::timeline::settle_bound_ms(c.choreographer().config())
    );
    assert!(c.surface().is_empty());
    assert_eq!(c.pending_timers(), 0);
}

#[test]
fn stop_tears_everything_down() {
    let mut c = controller(RevealConfig::default());
    c.page_mut().insert_image(rect(), true);
    c.page_mut().insert_image(rect(), false);
    c.start();
    c.advance(250);
    c.stop();

    assert!(!c.is_running());
    assert!(c.surface().is_empty());
    assert_eq!(c.pending_timers(), 0);
    assert_eq!(c.subscriptions().count(), 0);
    assert!(c.choreographer().images().is_empty());

    c.handle(PageEvent::Scrolled);
    assert_eq!(c.advance(10_000), 0);

    c.start();
    assert_eq!(c.surface().len(), 48);
}

#[test]
fn resize_skips_images_that_left_the_page() {
    let mut c = controller(RevealConfig::default());
    let img = c.page_mut().insert_image(rect(), true);
    c.start();
    let g0 = c.choreographer().generation(img);
    c.page_mut().remove_image(img);
    c.handle(PageEvent::ImageRemoved(img));
    c.handle(PageEvent::Resized);
    assert_eq!(c.choreographer().generation(img), g0);
    assert_eq!(c.surface().created_count(), 48);
}
