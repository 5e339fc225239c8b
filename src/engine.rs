//! Underglow engine
//!
//! Owns the animation state, the active effect slot and the pixel buffer, and
//! exposes the control operations. Every control operation fails with
//! [`UnderglowError::NotReady`] until a pixel sink is bound.

use embassy_time::Instant;

use crate::color::{BLACK, Hsb, Rgb};
use crate::config::UnderglowConfig;
use crate::effect::{EffectId, EffectSlot, RenderContext};
use crate::error::{Result, UnderglowError};
use crate::key_event::KeyEvent;
use crate::layout::Layout;
use crate::router::route_key_event;
use crate::state::AnimationState;
use crate::{PixelSink, PowerRail, StateStore};

/// Underglow engine for a strip of `LEDS` pixels and up to `KEYS` key
/// positions.
pub struct Underglow<'a, S, H, const LEDS: usize, const KEYS: usize>
where
    S: PixelSink,
    H: PowerRail + StateStore,
{
    // External dependencies and configuration
    sink: Option<S>,
    hooks: H,
    layout: Layout<'a>,
    config: UnderglowConfig,

    // Internal state
    state: AnimationState,
    effect: EffectSlot<KEYS>,
    pixels: [Rgb; LEDS],

    // Persistence debounce
    save_requested: bool,
    save_deadline: Option<Instant>,
}

impl<'a, S, H, const LEDS: usize, const KEYS: usize> Underglow<'a, S, H, LEDS, KEYS>
where
    S: PixelSink,
    H: PowerRail + StateStore,
{
    /// Create an engine with no sink bound.
    ///
    /// Starts from `config.start` with the start effect initialized.
    pub fn new(layout: Layout<'a>, config: UnderglowConfig, hooks: H) -> Self {
        let mut state = config.start;
        let mut effect = state.effect.to_slot();
        effect.reset(&mut state);
        Self {
            sink: None,
            hooks,
            layout,
            config,
            state,
            effect,
            pixels: [BLACK; LEDS],
            save_requested: false,
            save_deadline: None,
        }
    }

    /// Bind the pixel sink and restore the persisted state.
    ///
    /// A missing or invalid record leaves the start state in place. If the
    /// restored state is on, the power rail is enabled.
    pub fn bind(&mut self, sink: S) {
        self.sink = Some(sink);

        match self.hooks.load() {
            Ok(Some(record)) => match AnimationState::from_record(&record) {
                Ok(state) => {
                    self.state = state;
                    self.effect = state.effect.to_slot();
                    log::debug!("restored underglow state: {state:?}");
                }
                Err(err) => log::warn!("ignoring persisted underglow state: {err}"),
            },
            Ok(None) => {}
            Err(err) => log::warn!("failed to load underglow state: {err:?}"),
        }

        if self.state.on {
            self.enable_power();
        }
    }

    /// Whether a sink is bound.
    pub const fn is_ready(&self) -> bool {
        self.sink.is_some()
    }

    const fn ensure_ready(&self) -> Result<()> {
        if self.sink.is_some() {
            Ok(())
        } else {
            Err(UnderglowError::NotReady)
        }
    }

    /// Switch on. The animation restarts from step 0 and ripples started
    /// while off are dropped.
    pub fn turn_on(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.enable_power();
        self.state.on = true;
        self.state.step = 0;
        self.effect.clear_ripples();
        log::debug!("underglow on");
        self.request_save();
        Ok(())
    }

    /// Switch off, pushing one blank frame to the strip.
    pub fn turn_off(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.disable_power();
        self.pixels = [BLACK; LEDS];
        if let Err(err) = self.deliver() {
            log::error!("failed to blank the LED strip: {err}");
        }
        self.state.on = false;
        log::debug!("underglow off");
        self.request_save();
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.state.on {
            self.turn_off()
        } else {
            self.turn_on()
        }
    }

    pub fn get_on_state(&self) -> Result<bool> {
        self.ensure_ready()?;
        Ok(self.state.on)
    }

    /// Switch to the effect with raw id `id`.
    ///
    /// Always restarts the effect, even if it is already selected.
    pub fn select_effect(&mut self, id: u8) -> Result<()> {
        self.ensure_ready()?;
        let effect =
            EffectId::from_raw(id).ok_or(UnderglowError::InvalidArgument("unknown effect id"))?;

        self.state.effect = effect;
        self.state.step = 0;
        self.effect = effect.to_slot();
        self.effect.reset(&mut self.state);
        log::debug!("selected effect {}", effect.as_str());
        self.request_save();
        Ok(())
    }

    /// Move `direction` places through the effect list, wrapping.
    pub fn cycle_effect(&mut self, direction: i8) -> Result<()> {
        self.ensure_ready()?;
        self.select_effect(self.state.effect.cycled(direction).raw())
    }

    /// Set the base color. Fails if any channel is out of range.
    pub fn set_color(&mut self, color: Hsb) -> Result<()> {
        self.ensure_ready()?;
        if !color.is_valid() {
            return Err(UnderglowError::InvalidArgument("color channel out of range"));
        }
        self.state.color = color;
        self.request_save();
        Ok(())
    }

    /// Rotate the hue by one configured step, wrapping.
    pub fn adjust_hue(&mut self, direction: i8) -> Result<()> {
        self.ensure_ready()?;
        self.state.color = self.state.hue_adjusted(direction, self.config.hue_step);
        self.request_save();
        Ok(())
    }

    /// Move saturation by one configured step, clamped to `[0, 100]`.
    pub fn adjust_saturation(&mut self, direction: i8) -> Result<()> {
        self.ensure_ready()?;
        self.state.color = self.state.saturation_adjusted(direction, self.config.sat_step);
        self.request_save();
        Ok(())
    }

    /// Move brightness by one configured step, clamped to `[0, 100]`.
    pub fn adjust_brightness(&mut self, direction: i8) -> Result<()> {
        self.ensure_ready()?;
        self.state.color = self.state.brightness_adjusted(direction, self.config.brt_step);
        self.request_save();
        Ok(())
    }

    /// Move speed by `direction`, clamped to `[1, 5]`.
    pub fn adjust_speed(&mut self, direction: i8) -> Result<()> {
        self.ensure_ready()?;
        self.state.speed = self.state.speed.adjusted(direction);
        self.request_save();
        Ok(())
    }

    /// Render one frame and hand it to the sink.
    ///
    /// Does nothing while off or unbound. Delivery failures are logged.
    pub fn tick(&mut self) {
        if !self.state.on || self.sink.is_none() || LEDS == 0 {
            return;
        }

        let mut ctx = RenderContext {
            state: &mut self.state,
            layout: &self.layout,
            config: &self.config,
        };
        self.effect.render(&mut ctx, &mut self.pixels);
        log::trace!(
            "rendered {} frame, step {}",
            self.state.effect.as_str(),
            self.state.step
        );

        if let Err(err) = self.deliver() {
            log::error!("failed to update the LED strip: {err}");
        }
    }

    /// Feed a key position transition to the active effect.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        route_key_event(&mut self.effect, &self.layout, event);
    }

    /// Save the state if the debounce delay since the last change is over.
    ///
    /// Returns `true` if a save was attempted.
    pub fn poll_save(&mut self, now: Instant) -> bool {
        if self.save_requested {
            self.save_requested = false;
            self.save_deadline = Some(now + self.config.save_debounce);
        }
        match self.save_deadline {
            Some(deadline) if now >= deadline => {
                self.flush_state();
                true
            }
            _ => false,
        }
    }

    /// Save the state right away and cancel any pending save.
    pub fn flush_state(&mut self) {
        self.save_requested = false;
        self.save_deadline = None;
        if let Err(err) = self.hooks.save(&self.state.to_record()) {
            log::warn!("failed to save underglow state: {err:?}");
        }
    }

    /// When the pending save is due, if one is scheduled.
    pub const fn save_deadline(&self) -> Option<Instant> {
        self.save_deadline
    }

    /// Whether a change is waiting to be saved.
    pub const fn save_pending(&self) -> bool {
        self.save_requested || self.save_deadline.is_some()
    }

    pub const fn is_on(&self) -> bool {
        self.state.on
    }

    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    pub const fn effect(&self) -> &EffectSlot<KEYS> {
        &self.effect
    }

    /// Pixels from the last rendered (or blanked) frame.
    pub const fn pixels(&self) -> &[Rgb; LEDS] {
        &self.pixels
    }

    pub const fn layout(&self) -> &Layout<'a> {
        &self.layout
    }

    pub const fn config(&self) -> &UnderglowConfig {
        &self.config
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    fn request_save(&mut self) {
        self.save_requested = true;
    }

    fn deliver(&mut self) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(UnderglowError::NotReady)?;
        sink.deliver(&self.pixels).map_err(|err| {
            log::trace!("sink error: {err:?}");
            UnderglowError::DeliveryFailed
        })
    }

    fn enable_power(&mut self) {
        if let Err(err) = self.hooks.enable() {
            log::error!("unable to enable the LED power rail: {err:?}");
        }
    }

    fn disable_power(&mut self) {
        if let Err(err) = self.hooks.disable() {
            log::error!("unable to disable the LED power rail: {err:?}");
        }
    }
}
