//! Keyboard and wheel input mapping. The browser layer extracts plain values
//! from DOM events and asks these functions what, if anything, to do.

use crate::config::{PlayerConfig, ZoomModifier};

/// What a handled input asks the transport to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    TogglePlayPause,
    SeekBy(f64),
    ZoomBy(f64),
}

/// Modifier key state at the time of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn holds(&self, modifier: ZoomModifier) -> bool {
        match modifier {
            ZoomModifier::Ctrl => self.ctrl,
            ZoomModifier::Alt => self.alt,
            ZoomModifier::Shift => self.shift,
            ZoomModifier::Meta => self.meta,
        }
    }
}

/// Whether the player owns this key, in which case the browser default
/// (page scroll, button activation) must be suppressed even when the key
/// produces no command.
pub fn is_transport_key(key: &str, mods: Modifiers) -> bool {
    if mods.ctrl || mods.alt || mods.meta {
        return false;
    }
    matches!(key, " " | "Spacebar" | "ArrowLeft" | "Left" | "ArrowRight" | "Right")
}

/// Map a `keydown` to a transport command.
///
/// `key` is the DOM `KeyboardEvent.key` value. Chords with Ctrl, Alt or
/// Meta belong to the browser and are never claimed. Auto-repeated Space is
/// swallowed without toggling so the playback state doesn't flutter.
pub fn key_command(
    key: &str,
    mods: Modifiers,
    repeat: bool,
    cfg: &PlayerConfig,
) -> Option<TransportCommand> {
    if !is_transport_key(key, mods) {
        return None;
    }
    let step = if mods.shift { cfg.seek_step_large_secs } else { cfg.seek_step_secs };
    match key {
        " " | "Spacebar" if !repeat => Some(TransportCommand::TogglePlayPause),
        "ArrowLeft" | "Left" => Some(TransportCommand::SeekBy(-step)),
        "ArrowRight" | "Right" => Some(TransportCommand::SeekBy(step)),
        _ => None,
    }
}

/// Outcome of a wheel event over the waveform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelGesture {
    /// Not ours: let the page or container scroll.
    PassThrough,
    /// Modifier held but no vertical motion: swallow the event only.
    Suppress,
    /// Zoom by this factor and swallow the event.
    Zoom(f64),
}

impl WheelGesture {
    pub fn prevents_default(self) -> bool {
        !matches!(self, WheelGesture::PassThrough)
    }
}

/// One zoom step per wheel event: scrolling forward (negative `delta_y`)
/// zooms in, backward zooms out by the reciprocal step.
pub fn wheel_gesture(delta_y: f64, mods: Modifiers, cfg: &PlayerConfig) -> WheelGesture {
    if !mods.holds(cfg.wheel_modifier) {
        return WheelGesture::PassThrough;
    }
    if delta_y < 0.0 {
        WheelGesture::Zoom(cfg.zoom_step)
    } else if delta_y > 0.0 {
        WheelGesture::Zoom(1.0 / cfg.zoom_step)
    } else {
        WheelGesture::Suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, meta: false };
    const CTRL: Modifiers = Modifiers { shift: false, ctrl: true, alt: false, meta: false };

    #[test]
    fn test_space_toggles() {
        let cfg = PlayerConfig::default();
        assert_eq!(key_command(" ", NONE, false, &cfg), Some(TransportCommand::TogglePlayPause));
        assert_eq!(key_command(" ", NONE, true, &cfg), None);
        assert_eq!(key_command(" ", CTRL, false, &cfg), None);
    }

    #[test]
    fn test_arrows_seek_with_large_step_on_shift() {
        let cfg = PlayerConfig::default();
        assert_eq!(key_command("ArrowLeft", NONE, false, &cfg), Some(TransportCommand::SeekBy(-1.0)));
        assert_eq!(key_command("ArrowRight", NONE, true, &cfg), Some(TransportCommand::SeekBy(1.0)));
        assert_eq!(key_command("ArrowLeft", SHIFT, false, &cfg), Some(TransportCommand::SeekBy(-5.0)));
        assert_eq!(key_command("ArrowRight", SHIFT, false, &cfg), Some(TransportCommand::SeekBy(5.0)));
        assert_eq!(key_command("ArrowRight", CTRL, false, &cfg), None);
        assert_eq!(key_command("a", NONE, false, &cfg), None);
    }

    #[test]
    fn test_transport_keys_claimed() {
        assert!(is_transport_key(" ", NONE));
        assert!(is_transport_key("ArrowLeft", SHIFT));
        assert!(!is_transport_key(" ", CTRL));
        assert!(!is_transport_key("Enter", NONE));
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let cfg = PlayerConfig::default();
        let g = wheel_gesture(-100.0, NONE, &cfg);
        assert_eq!(g, WheelGesture::PassThrough);
        assert!(!g.prevents_default());
        assert_eq!(wheel_gesture(-100.0, SHIFT, &cfg), WheelGesture::PassThrough);
    }

    #[test]
    fn test_wheel_direction() {
        let cfg = PlayerConfig::default();
        assert_eq!(wheel_gesture(-3.0, CTRL, &cfg), WheelGesture::Zoom(1.05));
        match wheel_gesture(120.0, CTRL, &cfg) {
            WheelGesture::Zoom(f) => assert!((f - 1.0 / 1.05).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
        let g = wheel_gesture(0.0, CTRL, &cfg);
        assert_eq!(g, WheelGesture::Suppress);
        assert!(g.prevents_default());
    }

    #[test]
    fn test_wheel_configured_modifier() {
        let cfg = PlayerConfig { wheel_modifier: ZoomModifier::Alt, ..PlayerConfig::default() };
        assert_eq!(wheel_gesture(-1.0, CTRL, &cfg), WheelGesture::PassThrough);
        let alt = Modifiers { alt: true, ..Modifiers::default() };
        assert_eq!(wheel_gesture(-1.0, alt, &cfg), WheelGesture::Zoom(1.05));
    }
}
