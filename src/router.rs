//! Key event routing
//!
//! Hands key transitions to whichever reactive effect is active. Time-driven
//! effects ignore keys.

use crate::effect::EffectSlot;
use crate::error::UnderglowError;
use crate::key_event::KeyEvent;
use crate::layout::Layout;

/// Route one key event to the active effect
///
/// - heatmap: presses are counted, releases ignored
/// - ripple: presses start a ripple, releases stop the ripples they hold
/// - responsive: presses and releases toggle the key highlight
///
/// Positions outside the layout are ignored. A press that finds no free
/// ripple tree is dropped.
pub fn route_key_event<const KEYS: usize>(
    slot: &mut EffectSlot<KEYS>,
    layout: &Layout<'_>,
    event: KeyEvent,
) {
    let Some(key) = event.key().filter(|&key| key < layout.key_count()) else {
        log::trace!("ignoring key position {}", event.position);
        return;
    };

    match slot {
        EffectSlot::Heatmap(heatmap) => {
            if event.pressed {
                heatmap.record_press(key);
            }
        }
        EffectSlot::Ripple(ripple) => {
            if event.pressed {
                match ripple.begin(layout, key) {
                    Ok(_) => {}
                    Err(UnderglowError::ResourceExhausted) => {
                        log::debug!("no free ripple tree, dropping press of key {key}");
                    }
                    Err(err) => {
                        log::warn!("cannot start ripple at key {key}: {err}");
                    }
                }
            } else {
                ripple.release(key);
            }
        }
        EffectSlot::Responsive(responsive) => {
            responsive.set_held(key, event.pressed);
        }
        EffectSlot::Solid(_)
        | EffectSlot::Breathe(_)
        | EffectSlot::Spectrum(_)
        | EffectSlot::Swirl(_)
        | EffectSlot::SwirlBidirectional(_)
        | EffectSlot::Wave(_) => {}
    }
}
