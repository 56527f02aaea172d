use std::collections::BTreeSet;

use crate::{
    choreography::choreographer::{Choreographer, SyncMode, TileCommand},
    config::reveal::{ResizeMode, RevealConfig},
    foundation::core::ImageIndex,
    foundation::error::VeilResult,
    page::observer::{Page, PageEvent},
    runtime::timers::TimerQueue,
    surface::backend::Surface,
};

/// A listener the controller holds while running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subscription {
    /// Insertions of tagged images anywhere in the page.
    PageMutations,
    ViewportResize,
    ViewportScroll,
    /// Pending load of one image that was not ready when first seen.
    ImageLoad(ImageIndex),
}

/// Runs the reveal effect for every tagged image of a page.
///
/// Nothing is observed before [`start`](Self::start) or after [`stop`](Self::stop). Events
/// arrive through [`handle`](Self::handle) and time moves only through
/// [`advance`](Self::advance), which makes the whole effect deterministic under test.
pub struct EffectController<P, S>
where
    P: Page,
    S: Surface,
{
    page: P,
    surface: S,
    choreographer: Choreographer<S::Handle>,
    timers: TimerQueue<TileCommand>,
    subscriptions: BTreeSet<Subscription>,
}

impl<P, S> EffectController<P, S>
where
    P: Page,
    S: Surface,
{
    pub fn new(config: RevealConfig, page: P, surface: S) -> VeilResult<Self> {
        config.validate()?;
        Ok(Self {
            page,
            surface,
            choreographer: Choreographer::new(config),
            timers: TimerQueue::new(),
            subscriptions: BTreeSet::new(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.subscriptions.contains(&Subscription::PageMutations)
    }

    /// Subscribe to page and viewport signals and pick up every tagged image already on
    /// the page. Calling it while running does nothing.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.subscriptions.insert(Subscription::PageMutations);
        self.subscriptions.insert(Subscription::ViewportResize);
        self.subscriptions.insert(Subscription::ViewportScroll);

        let images = self.page.tagged_images();
        tracing::info!(
            images = images.len(),
            policy = self.choreographer.config().policy.name(),
            "reveal effect started"
        );
        for image in images {
            self.watch(image);
        }
    }

    /// Drop every subscription and pending timer and take all tiles off the surface.
    pub fn stop(&mut self) {
        let removed = self.choreographer.clear_all(&mut self.surface);
        let dropped = self.timers.len();
        self.timers.clear();
        self.subscriptions.clear();
        tracing::info!(removed, dropped, "reveal effect stopped");
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::ImageInserted(image) => {
                if self.subscriptions.contains(&Subscription::PageMutations) {
                    self.watch(image);
                }
            }
            PageEvent::ImageLoaded(image) => {
                if self.subscriptions.remove(&Subscription::ImageLoad(image)) {
                    self.build(image);
                }
            }
            PageEvent::ImageRemoved(image) => {
                self.subscriptions.remove(&Subscription::ImageLoad(image));
            }
            PageEvent::Resized => {
                if !self.subscriptions.contains(&Subscription::ViewportResize) {
                    return;
                }
                let mode = self.choreographer.config().resize;
                for image in self.choreographer.images() {
                    match mode {
                        ResizeMode::Rebuild => {
                            if self.page.image_rect(image).is_none() {
                                tracing::trace!(image = image.0, "rebuild skipped, image gone");
                                continue;
                            }
                            self.build(image);
                        }
                        ResizeMode::Resync => {
                            self.choreographer.reposition(
                                &self.page,
                                &mut self.surface,
                                image,
                                SyncMode::PositionAndSize,
                            );
                        }
                    }
                }
            }
            PageEvent::Scrolled => {
                if !self.subscriptions.contains(&Subscription::ViewportScroll) {
                    return;
                }
                for image in self.choreographer.images() {
                    self.choreographer.reposition(
                        &self.page,
                        &mut self.surface,
                        image,
                        SyncMode::Position,
                    );
                }
            }
        }
    }

    /// Build tiles for `image` now, superseding any previous set.
    pub fn build(&mut self, image: ImageIndex) -> u64 {
        self.choreographer
            .build(&self.page, &mut self.surface, &mut self.timers, image)
    }

    fn watch(&mut self, image: ImageIndex) {
        if self.page.is_loaded(image) {
            self.build(image);
        } else {
            tracing::debug!(image = image.0, "waiting for image load");
            self.subscriptions.insert(Subscription::ImageLoad(image));
        }
    }

    /// Fire every timer due within the next `delta_ms`. Returns the number of commands
    /// that changed a tile.
    pub fn advance(&mut self, delta_ms: u64) -> usize {
        self.advance_to(self.timers.now_ms().saturating_add(delta_ms))
    }

    pub fn advance_to(&mut self, t_ms: u64) -> usize {
        let mut applied = 0usize;
        while let Some((_, cmd)) = self.timers.pop_due(t_ms) {
            if self.choreographer.apply(&mut self.surface, cmd) {
                applied += 1;
            }
        }
        self.timers.advance_to(t_ms);
        applied
    }

    /// Fire timers until none are left. Returns the final clock value.
    pub fn run_until_idle(&mut self) -> u64 {
        while let Some(due) = self.timers.next_due() {
            self.advance_to(due);
        }
        self.timers.now_ms()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = Subscription> + '_ {
        self.subscriptions.iter().copied()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Mutable page access for collaborators that change the page; follow up with the
    /// matching [`PageEvent`].
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn choreographer(&self) -> &Choreographer<S::Handle> {
        &self.choreographer
    }

    pub fn into_parts(self) -> (P, S) {
        (self.page, self.surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/effect.rs"]
mod tests;
