// input.rs - Decodes keyboard and pointer state into simulation commands

use conway::{Command, Palette};
use egui::{Key, Pos2};

/// What a key or pointer does. Pattern cycling needs the window's cursor into
/// the pattern catalogue, so it is resolved by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Sim(Command),
    NextPattern,
}

const BOUND_KEYS: [Key; 12] = [
    Key::Space,
    Key::S,
    Key::R,
    Key::C,
    Key::P,
    Key::Escape,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
];

pub fn key_action(key: Key) -> Option<Action> {
    let command = match key {
        Key::Space  => Command::TogglePause,
        Key::S      => Command::Step,
        Key::R      => Command::Reset,
        Key::C      => Command::Clear,
        Key::Escape => Command::Quit,
        Key::P      => return Some(Action::NextPattern),
        _ => Command::SelectPalette(Palette::from_digit(digit(key)?)?),
    };
    Some(Action::Sim(command))
}

fn digit(key: Key) -> Option<u8> {
    match key {
        Key::Num0 => Some(0),
        Key::Num1 => Some(1),
        Key::Num2 => Some(2),
        Key::Num3 => Some(3),
        Key::Num4 => Some(4),
        Key::Num5 => Some(5),
        Key::Num6 => Some(6),
        Key::Num7 => Some(7),
        Key::Num8 => Some(8),
        Key::Num9 => Some(9),
        _ => None,
    }
}

/// Primary wins when both buttons are held.
pub fn pointer_command(primary: bool, secondary: bool, pos: Option<Pos2>, origin: Pos2) -> Option<Command> {
    let pos = pos?;
    let x = (pos.x - origin.x).floor() as i32;
    let y = (pos.y - origin.y).floor() as i32;

    if primary {
        Some(Command::Revive { x, y })
    } else if secondary {
        Some(Command::Kill { x, y })
    } else {
        None
    }
}

/// Everything the user did since the last frame, keys first.
pub fn collect(ctx: &egui::Context, origin: Pos2) -> Vec<Action> {
    ctx.input(|i| {
        let mut actions: Vec<Action> = BOUND_KEYS
            .iter()
            .filter(|&&key| i.key_pressed(key))
            .filter_map(|&key| key_action(key))
            .collect();

        let pointer = pointer_command(
            i.pointer.primary_down(),
            i.pointer.secondary_down(),
            i.pointer.latest_pos(),
            origin,
        );
        actions.extend(pointer.map(Action::Sim));
        actions
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn digits_select_palettes() {
        let expected = [
            Palette::Red,
            Palette::Green,
            Palette::Blue,
            Palette::Orange,
            Palette::Yellow,
            Palette::Purple,
        ];
        let keys = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5, Key::Num6];
        for (n, (key, palette)) in keys.into_iter().zip(expected).enumerate() {
            assert_eq!(digit(key), Some(n as u8 + 1));
            assert_eq!(key_action(key), Some(Action::Sim(Command::SelectPalette(palette))));
        }
    }

    #[test]
    fn unbound_digits_do_nothing() {
        for key in [Key::Num0, Key::Num7, Key::Num8, Key::Num9] {
            assert!(digit(key).is_some());
            assert_eq!(key_action(key), None);
        }
    }

    #[test]
    fn control_keys() {
        assert_eq!(key_action(Key::Space), Some(Action::Sim(Command::TogglePause)));
        assert_eq!(key_action(Key::S), Some(Action::Sim(Command::Step)));
        assert_eq!(key_action(Key::R), Some(Action::Sim(Command::Reset)));
        assert_eq!(key_action(Key::C), Some(Action::Sim(Command::Clear)));
        assert_eq!(key_action(Key::Escape), Some(Action::Sim(Command::Quit)));
        assert_eq!(key_action(Key::P), Some(Action::NextPattern));
        assert_eq!(key_action(Key::Z), None);
        assert_eq!(key_action(Key::Num7), None);
    }

    #[test]
    fn every_bound_key_has_an_action() {
        for key in BOUND_KEYS {
            assert!(key_action(key).is_some(), "{key:?}");
        }
    }

    #[test]
    fn pointer_is_relative_to_origin() {
        let origin = pos2(10.0, 20.0);
        assert_eq!(
            pointer_command(true, false, Some(pos2(40.5, 35.9)), origin),
            Some(Command::Revive { x: 30, y: 15 })
        );
        assert_eq!(
            pointer_command(false, true, Some(pos2(9.5, 20.0)), origin),
            Some(Command::Kill { x: -1, y: 0 })
        );
    }

    #[test]
    fn primary_wins_and_idle_pointer_is_ignored() {
        let origin = Pos2::ZERO;
        assert!(matches!(
            pointer_command(true, true, Some(pos2(1.0, 1.0)), origin),
            Some(Command::Revive { .. })
        ));
        assert_eq!(pointer_command(false, false, Some(pos2(1.0, 1.0)), origin), None);
        assert_eq!(pointer_command(true, false, None, origin), None);
    }
}
