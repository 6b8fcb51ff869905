//! Scripted retarget scenarios and a virtual surface to run them against

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use scrollchase_core::{Error, Point, Result};
use scrollchase_engine::{OffsetProvider, ScrollSurface};

/// One change of the provider's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retarget {
    /// Animation time at which the answer changes
    pub at_ms: u64,
    /// Horizontal target; the start offset's when missing
    #[serde(default)]
    pub x: Option<f64>,
    /// Vertical target; the start offset's when missing
    #[serde(default)]
    pub y: Option<f64>,
    /// Report "no target" from this point on
    #[serde(default)]
    pub none: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Surface offset when the cycle starts
    #[serde(default)]
    pub from: Point,
    /// Largest reachable offset; writes beyond it are clamped
    #[serde(default)]
    pub max_offset: Option<Point>,
    /// Animation time at which a simulated drag begins
    #[serde(default)]
    pub interact_at_ms: Option<u64>,
    #[serde(default, rename = "retarget")]
    pub retargets: Vec<Retarget>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Self = toml::from_str(&content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Scenario with one retarget per target, `every_ms` apart
    pub fn from_targets(from: Point, targets: &[Point], every_ms: u64) -> Self {
        let retargets = targets
            .iter()
            .enumerate()
            .map(|(i, target)| Retarget {
                at_ms: i as u64 * every_ms,
                x: Some(target.x),
                y: Some(target.y),
                none: false,
            })
            .collect();

        Self {
            from,
            retargets,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retargets.is_empty() {
            return Err(Error::Scenario("scenario has no retargets".to_string()));
        }
        if self.retargets.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
            return Err(Error::Scenario(
                "retargets must be sorted by at_ms".to_string(),
            ));
        }
        if let Some(max) = self.max_offset {
            let valid = [max.x, max.y].iter().all(|v| v.is_finite() && *v >= 0.0);
            if !valid {
                return Err(Error::Scenario(format!(
                    "max_offset must be finite and non-negative, got {}",
                    max
                )));
            }
        }
        for retarget in &self.retargets {
            let finite = [retarget.x, retarget.y]
                .iter()
                .flatten()
                .all(|v| v.is_finite());
            if !finite {
                return Err(Error::Scenario(format!(
                    "retarget at {}ms has a non-finite offset",
                    retarget.at_ms
                )));
            }
        }
        Ok(())
    }
}

/// Shared simulated animation time
pub type SimClock = Rc<Cell<Duration>>;

/// Provider answering from a scenario at the current simulated time
pub struct ScriptedProvider {
    retargets: Vec<Retarget>,
    now: SimClock,
}

impl ScriptedProvider {
    pub fn new(scenario: &Scenario, now: SimClock) -> Self {
        Self {
            retargets: scenario.retargets.clone(),
            now,
        }
    }
}

impl OffsetProvider for ScriptedProvider {
    fn target_offset(&self, start: Point) -> Option<Point> {
        let now_ms = self.now.get().as_millis() as u64;
        let active = self.retargets.iter().rev().find(|r| r.at_ms <= now_ms)?;
        if active.none {
            return None;
        }
        Some(Point::new(
            active.x.unwrap_or(start.x),
            active.y.unwrap_or(start.y),
        ))
    }
}

/// In-memory scrollable viewport
#[derive(Debug, Clone, Default)]
pub struct VirtualSurface {
    offset: Point,
    max_offset: Option<Point>,
    pub interacting: bool,
    pub writes: u32,
}

impl VirtualSurface {
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            offset: scenario.from,
            max_offset: scenario.max_offset,
            ..Default::default()
        }
    }
}

impl ScrollSurface for VirtualSurface {
    fn current_offset(&self) -> Point {
        self.offset
    }

    fn set_offset(&mut self, offset: Point) {
        self.offset = match self.max_offset {
            Some(max) => Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y)),
            None => offset,
        };
        self.writes += 1;
    }

    fn is_user_interacting(&self) -> bool {
        self.interacting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        from = { x = 0.0, y = 10.0 }
        interact_at_ms = 500

        [[retarget]]
        at_ms = 0
        y = 100.0

        [[retarget]]
        at_ms = 120
        x = 5.0
        y = 300.0

        [[retarget]]
        at_ms = 400
        none = true
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        assert!(scenario.validate().is_ok());
        assert_eq!(scenario.from, Point::new(0.0, 10.0));
        assert_eq!(scenario.interact_at_ms, Some(500));
        assert_eq!(scenario.retargets.len(), 3);
        assert!(scenario.retargets[2].none);
    }

    #[test]
    fn test_provider_follows_script() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        let now: SimClock = Rc::new(Cell::new(Duration::ZERO));
        let provider = ScriptedProvider::new(&scenario, Rc::clone(&now));
        let start = scenario.from;

        assert_eq!(provider.target_offset(start), Some(Point::new(0.0, 100.0)));
        now.set(Duration::from_millis(119));
        assert_eq!(provider.target_offset(start), Some(Point::new(0.0, 100.0)));
        now.set(Duration::from_millis(120));
        assert_eq!(provider.target_offset(start), Some(Point::new(5.0, 300.0)));
        now.set(Duration::from_millis(450));
        assert_eq!(provider.target_offset(start), None);
    }

    #[test]
    fn test_provider_before_first_retarget() {
        let scenario = Scenario {
            retargets: vec![Retarget {
                at_ms: 50,
                x: None,
                y: Some(1.0),
                none: false,
            }],
            ..Default::default()
        };
        let now: SimClock = Rc::new(Cell::new(Duration::ZERO));
        let provider = ScriptedProvider::new(&scenario, now);
        assert_eq!(provider.target_offset(Point::ZERO), None);
    }

    #[test]
    fn test_validate_rejects_unsorted_and_empty() {
        assert!(Scenario::default().validate().is_err());

        let scenario = Scenario::from_targets(
            Point::ZERO,
            &[Point::new(0.0, 1.0), Point::new(0.0, 2.0)],
            100,
        );
        assert!(scenario.validate().is_ok());

        let mut unsorted = scenario.clone();
        unsorted.retargets.reverse();
        assert!(unsorted.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_max_offset() {
        let base = Scenario::from_targets(Point::ZERO, &[Point::new(0.0, 10.0)], 100);

        for max in [
            Point::new(-1.0, 50.0),
            Point::new(0.0, -0.5),
            Point::new(f64::NAN, 50.0),
            Point::new(0.0, f64::INFINITY),
        ] {
            let scenario = Scenario {
                max_offset: Some(max),
                ..base.clone()
            };
            assert!(
                matches!(scenario.validate(), Err(Error::Scenario(_))),
                "accepted {:?}",
                max
            );
        }

        let scenario = Scenario {
            max_offset: Some(Point::new(0.0, 50.0)),
            ..base
        };
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_surface_clamps_writes() {
        let scenario = Scenario {
            max_offset: Some(Point::new(0.0, 50.0)),
            ..Default::default()
        };
        let mut surface = VirtualSurface::new(&scenario);
        surface.set_offset(Point::new(10.0, 80.0));
        assert_eq!(surface.current_offset(), Point::new(0.0, 50.0));
        assert_eq!(surface.writes, 1);
    }
}
