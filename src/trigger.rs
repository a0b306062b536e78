//! Hysteresis trigger state machine.
//!
//! Turns noisy per-frame classification results into a stable
//! `(active gesture, intensity)` pair. Intensity ramps by a fixed step per
//! frame; a differently-matched gesture never preempts the active one
//! mid-fade but has to wait until intensity decays to zero. This absorbs
//! single-frame misclassification noise without visible flicker.

use tracing::debug;

use crate::config::GestureId;

/// Per-frame intensity increment/decrement.
pub const FADE_STEP: i32 = 15;
/// Fully-engaged intensity; the compositor blends at `intensity / MAX`.
pub const INTENSITY_MAX: i32 = 255;

/// The single mutable trigger state of an engine run.
///
/// `active` is `None` exactly when the state has settled at intensity zero;
/// during a fade-out it still names the gesture being released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerState {
    active: Option<GestureId>,
    intensity: i32,
}

impl TriggerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<GestureId> {
        self.active
    }

    /// Current blend intensity in `0..=255`.
    pub fn intensity(&self) -> u8 {
        self.intensity as u8
    }

    /// Advance one frame given this frame's classification result.
    pub fn step(&mut self, result: Option<GestureId>) {
        match self.active {
            None => {
                if let Some(id) = result {
                    debug!(gesture = %id, "gesture engaging");
                    self.active = Some(id);
                    self.intensity += FADE_STEP;
                }
            }
            Some(current) if result == Some(current) => {
                self.intensity += FADE_STEP;
            }
            Some(_) => {
                // no result, or a different gesture: fade out; a pending
                // gesture only takes over once intensity reaches zero
                self.intensity -= FADE_STEP;
            }
        }

        self.intensity = self.intensity.clamp(0, INTENSITY_MAX);

        if self.intensity == 0 {
            if let Some(id) = self.active.take() {
                debug!(gesture = %id, "gesture released");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: GestureId = GestureId(1);
    const H: GestureId = GestureId(2);

    #[test]
    fn idle_stays_idle_on_no_gesture() {
        let mut state = TriggerState::new();
        for _ in 0..5 {
            state.step(None);
        }
        assert_eq!(state.active(), None);
        assert_eq!(state.intensity(), 0);
    }

    #[test]
    fn sustained_match_reaches_full_intensity() {
        let mut state = TriggerState::new();
        let frames = (INTENSITY_MAX + FADE_STEP - 1) / FADE_STEP;
        for _ in 0..frames {
            state.step(Some(G));
        }
        assert_eq!(state.active(), Some(G));
        assert_eq!(state.intensity(), INTENSITY_MAX as u8);

        // further confirmations clamp at the ceiling
        state.step(Some(G));
        assert_eq!(state.intensity(), INTENSITY_MAX as u8);
    }

    #[test]
    fn different_gesture_never_preempts_mid_fade() {
        let mut state = TriggerState::new();
        for _ in 0..20 {
            state.step(Some(G));
        }
        assert_eq!(state.intensity(), INTENSITY_MAX as u8);

        // a competing gesture only decays the active one
        state.step(Some(H));
        assert_eq!(state.active(), Some(G));
        assert_eq!(state.intensity(), (INTENSITY_MAX - FADE_STEP) as u8);

        // keep feeding the competitor until the fade completes
        while state.active() == Some(G) {
            state.step(Some(H));
        }
        assert_eq!(state.active(), None);
        assert_eq!(state.intensity(), 0);

        // the pending gesture engages on the very next frame
        state.step(Some(H));
        assert_eq!(state.active(), Some(H));
        assert_eq!(state.intensity(), FADE_STEP as u8);
    }

    #[test]
    fn single_frame_dropout_does_not_release() {
        let mut state = TriggerState::new();
        for _ in 0..20 {
            state.step(Some(G));
        }
        state.step(None);
        assert_eq!(state.active(), Some(G));
        state.step(Some(G));
        assert_eq!(state.intensity(), INTENSITY_MAX as u8);
    }

    #[test]
    fn fade_out_settles_back_to_idle() {
        let mut state = TriggerState::new();
        state.step(Some(G));
        state.step(Some(G));
        assert_eq!(state.intensity(), (2 * FADE_STEP) as u8);

        state.step(None);
        assert_eq!(state.active(), Some(G)); // still fading
        state.step(None);
        assert_eq!(state.active(), None);
        assert_eq!(state.intensity(), 0);
    }
}
