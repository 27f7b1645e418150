use common::games::puzzle2048::{Direction, classify_swipe};
use eframe::egui;

/// First arrow/WASD key pressed this frame. Key repeat is ignored.
pub fn key_direction(input: &egui::InputState) -> Option<Direction> {
    input.events.iter().find_map(|event| match event {
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } if modifiers.is_none() => direction_for_key(*key),
        _ => None,
    })
}

fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowUp | egui::Key::W => Some(Direction::Up),
        egui::Key::ArrowDown | egui::Key::S => Some(Direction::Down),
        egui::Key::ArrowLeft | egui::Key::A => Some(Direction::Left),
        egui::Key::ArrowRight | egui::Key::D => Some(Direction::Right),
        _ => None,
    }
}

/// Turns a primary-button drag into a direction when it is released.
pub struct SwipeTracker {
    start: Option<egui::Pos2>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn update(&mut self, input: &egui::InputState) -> Option<Direction> {
        if input.pointer.primary_pressed() {
            self.start = input.pointer.interact_pos();
        }
        if input.pointer.primary_released() {
            let start = self.start.take()?;
            let end = input.pointer.interact_pos()?;
            return self.finish(start, end);
        }
        None
    }

    pub fn finish(&self, start: egui::Pos2, end: egui::Pos2) -> Option<Direction> {
        let delta = end - start;
        classify_swipe(delta.x, delta.y, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn key_event(key: egui::Key, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn direction_after(events: Vec<egui::Event>) -> Option<Direction> {
        let mut input = egui::InputState::default();
        input.events = events;
        key_direction(&input)
    }

    #[test]
    fn test_swipe_directions() {
        let tracker = SwipeTracker::new(30.0);
        let origin = pos2(100.0, 100.0);
        assert_eq!(tracker.finish(origin, pos2(180.0, 110.0)), Some(Direction::Right));
        assert_eq!(tracker.finish(origin, pos2(20.0, 90.0)), Some(Direction::Left));
        assert_eq!(tracker.finish(origin, pos2(110.0, 40.0)), Some(Direction::Up));
        assert_eq!(tracker.finish(origin, pos2(90.0, 170.0)), Some(Direction::Down));
    }

    #[test]
    fn test_tap_is_not_a_swipe() {
        let tracker = SwipeTracker::new(30.0);
        assert_eq!(tracker.finish(pos2(0.0, 0.0), pos2(12.0, -8.0)), None);
    }

    #[test]
    fn test_arrow_keys_map_to_directions() {
        let cases = [
            (egui::Key::ArrowUp, Direction::Up),
            (egui::Key::ArrowDown, Direction::Down),
            (egui::Key::ArrowLeft, Direction::Left),
            (egui::Key::ArrowRight, Direction::Right),
        ];
        for (key, direction) in cases {
            assert_eq!(direction_after(vec![key_event(key, false)]), Some(direction), "{:?}", key);
        }
    }

    #[test]
    fn test_wasd_keys_map_to_directions() {
        assert_eq!(direction_after(vec![key_event(egui::Key::W, false)]), Some(Direction::Up));
        assert_eq!(direction_after(vec![key_event(egui::Key::A, false)]), Some(Direction::Left));
        assert_eq!(direction_after(vec![key_event(egui::Key::S, false)]), Some(Direction::Down));
        assert_eq!(direction_after(vec![key_event(egui::Key::D, false)]), Some(Direction::Right));
    }

    #[test]
    fn test_repeat_and_other_keys_are_ignored() {
        assert_eq!(direction_after(vec![key_event(egui::Key::ArrowDown, true)]), None);
        assert_eq!(direction_after(vec![key_event(egui::Key::Enter, false)]), None);
        assert_eq!(
            direction_after(vec![
                key_event(egui::Key::Enter, false),
                key_event(egui::Key::ArrowRight, false),
            ]),
            Some(Direction::Right)
        );
    }
}
