use pixpet_metrics::MetricSnapshot;

use crate::mood::Thresholds;
use crate::sprite::Cell;

/// Independent visual flags for the rich variant.
///
/// Each flag is a plain threshold test; several may be set at once. Which
/// ones actually reach the sprite is decided by
/// [`build_frame`](crate::build_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlays {
    pub green_eyes: bool,
    pub red_eyes: bool,
    pub yellow_eyes: bool,
    pub grey_body: bool,
    pub sleepy: bool,
}

impl Overlays {
    /// Compute every flag for a snapshot.
    ///
    /// An unknown battery sets neither `green_eyes` nor `sleepy`.
    pub fn derive(snapshot: &MetricSnapshot, t: &Thresholds) -> Self {
        let battery = snapshot.battery.percent();
        Self {
            green_eyes: battery.is_some_and(|b| b >= t.battery_full),
            red_eyes: snapshot.cpu_percent >= t.cpu_high,
            yellow_eyes: snapshot.ram_percent >= t.ram_high,
            grey_body: !snapshot.connected,
            sleepy: battery.is_some_and(|b| b < t.battery_low),
        }
    }

    /// The single eye colour to paint: green, then red, then yellow.
    pub fn eye_cell(&self) -> Option<Cell> {
        if self.green_eyes {
            Some(Cell::GreenEye)
        } else if self.red_eyes {
            Some(Cell::RedEye)
        } else if self.yellow_eyes {
            Some(Cell::YellowEye)
        } else {
            None
        }
    }

    /// Names of the set flags, for the HUD.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.green_eyes, "green-eyes"),
            (self.red_eyes, "red-eyes"),
            (self.yellow_eyes, "yellow-eyes"),
            (self.grey_body, "grey-body"),
            (self.sleepy, "sleepy"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpet_metrics::Battery;

    fn overlays(cpu: f64, ram: f64, battery: Battery, connected: bool) -> Overlays {
        let snap = MetricSnapshot {
            cpu_percent: cpu,
            ram_percent: ram,
            battery,
            connected,
        };
        Overlays::derive(&snap, &Thresholds::default())
    }

    #[test]
    fn thresholds_are_inclusive() {
        let o = overlays(80.0, 80.0, Battery::Percent(100), true);
        assert!(o.red_eyes && o.yellow_eyes && o.green_eyes);
        let o = overlays(79.9, 79.9, Battery::Percent(99), true);
        assert!(!o.red_eyes && !o.yellow_eyes && !o.green_eyes);
    }

    #[test]
    fn sleepy_below_twenty() {
        assert!(overlays(0.0, 0.0, Battery::Percent(19), true).sleepy);
        assert!(!overlays(0.0, 0.0, Battery::Percent(20), true).sleepy);
    }

    #[test]
    fn unknown_battery_is_neither_full_nor_low() {
        let o = overlays(0.0, 0.0, Battery::Unknown, true);
        assert!(!o.green_eyes);
        assert!(!o.sleepy);
    }

    #[test]
    fn offline_sets_grey_body_alongside_other_flags() {
        let o = overlays(90.0, 0.0, Battery::Percent(50), false);
        assert!(o.grey_body);
        assert!(o.red_eyes);
    }

    #[test]
    fn eye_priority_is_green_red_yellow() {
        let all = Overlays {
            green_eyes: true,
            red_eyes: true,
            yellow_eyes: true,
            ..Overlays::default()
        };
        assert_eq!(all.eye_cell(), Some(Cell::GreenEye));

        let red_and_yellow = Overlays {
            green_eyes: false,
            ..all
        };
        assert_eq!(red_and_yellow.eye_cell(), Some(Cell::RedEye));

        let yellow = Overlays {
            yellow_eyes: true,
            ..Overlays::default()
        };
        assert_eq!(yellow.eye_cell(), Some(Cell::YellowEye));
        assert_eq!(Overlays::default().eye_cell(), None);
    }

    #[test]
    fn cpu_and_ram_high_give_red_not_yellow() {
        let o = overlays(95.0, 95.0, Battery::Percent(60), true);
        assert_eq!(o.eye_cell(), Some(Cell::RedEye));
    }

    #[test]
    fn labels_list_set_flags_in_order() {
        let o = overlays(90.0, 0.0, Battery::Percent(10), false);
        assert_eq!(o.labels(), vec!["red-eyes", "grey-body", "sleepy"]);
        assert!(Overlays::default().labels().is_empty());
    }
}
