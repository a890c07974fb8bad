//! Level session state machine
//!
//! Wraps the engine with the phase bookkeeping a driver needs: ticks are only
//! delegated while running, a hole or end hit parks the session until the
//! driver resets or advances, and the campaign position is explicit state.

use serde::{Deserialize, Serialize};

use super::collision::Outcome;
use super::engine::{LabyrinthEngine, TiltSample};
use super::motion::{ShakeMonitor, ShakeReading};
use crate::levels::{self, LevelSpec};
use crate::settings::{PhysicsTuning, Settings, ShakeConfig};
use crate::snapshot::{BallSnapshot, SnapshotCell};
use crate::{LevelError, SessionError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ball on the start tile, not accepting tilt
    Ready,
    /// Accepting tilt ticks
    Running,
    /// Driver stopped the sensor stream mid-level
    Paused,
    /// Ball fell in a hole
    Failed,
    /// Ball reached the end tile
    Succeeded,
    /// Last campaign level won
    Completed,
}

/// Per-session configuration, fixed once the session starts
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Ball radius in pixels; tiles are twice this
    pub radius: f32,
    pub physics: PhysicsTuning,
    pub shake: ShakeConfig,
}

impl SessionConfig {
    /// Derive the radius from the device screen height
    pub fn from_settings(settings: &Settings, screen_height: u32) -> Self {
        Self {
            radius: settings.display.radius_for_screen_height(screen_height),
            physics: settings.physics,
            shake: settings.shake,
        }
    }
}

/// What a single tick produced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// `None` if the session wasn't running and the tick was dropped
    pub outcome: Option<Outcome>,
    /// Set when a shake window completed on this tick
    pub shake: Option<ShakeReading>,
}

pub struct Session {
    engine: LabyrinthEngine,
    phase: SessionPhase,
    levels: Vec<LevelSpec>,
    /// Position in `levels`
    level_index: usize,
    shake: ShakeMonitor,
    snapshot: SnapshotCell,
}

impl Session {
    /// Start a session on the first of `levels`
    pub fn new(config: SessionConfig, levels: Vec<LevelSpec>) -> Result<Self, SessionError> {
        let first = levels.first().ok_or(SessionError::EmptyCampaign)?;
        for level in &levels {
            level.validate()?;
        }

        let mut engine = LabyrinthEngine::new(config.radius, config.physics);
        engine.load_level(first)?;
        let snapshot = SnapshotCell::new(BallSnapshot::from(engine.ball()));

        Ok(Self {
            engine,
            phase: SessionPhase::Ready,
            levels,
            level_index: 0,
            shake: ShakeMonitor::new(config.shake),
            snapshot,
        })
    }

    /// Session over the built-in campaign listed in the settings
    pub fn from_settings(settings: &Settings, screen_height: u32) -> Result<Self, SessionError> {
        let levels = settings
            .campaign
            .iter()
            .map(|&i| levels::builtin(i))
            .collect::<Result<Vec<_>, LevelError>>()?;
        Self::new(SessionConfig::from_settings(settings, screen_height), levels)
    }

    /// Surface geometry became known
    pub fn set_surface(&mut self, width: u32, height: u32) {
        self.engine.set_surface(width, height);
        self.publish();
    }

    /// Begin (or continue) accepting tilt ticks
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                Ok(())
            }
            phase => Err(SessionError::InvalidTransition {
                action: "start",
                phase,
            }),
        }
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.start()
    }

    /// Stop accepting ticks; only meaningful while running
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
        }
    }

    /// Put the ball back on the start tile and wait for `start`
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Completed {
            return Err(SessionError::InvalidTransition {
                action: "reset",
                phase: self.phase,
            });
        }
        self.engine.reset();
        self.shake.clear();
        self.phase = SessionPhase::Ready;
        self.publish();
        Ok(())
    }

    /// Move on from a finished level
    ///
    /// Loads the next level and resumes running, or completes the campaign if
    /// there is none.
    pub fn advance(&mut self) -> Result<SessionPhase, SessionError> {
        if !matches!(self.phase, SessionPhase::Failed | SessionPhase::Succeeded) {
            return Err(SessionError::InvalidTransition {
                action: "advance",
                phase: self.phase,
            });
        }

        let next = self.level_index + 1;
        let Some(spec) = self.levels.get(next) else {
            log::info!("Campaign complete after {} levels", self.levels.len());
            self.phase = SessionPhase::Completed;
            return Ok(self.phase);
        };

        self.engine.load_level(spec)?;
        self.engine.reset();
        self.shake.clear();
        self.level_index = next;
        self.phase = SessionPhase::Running;
        self.publish();
        Ok(self.phase)
    }

    /// Back to the first level, ready to start
    pub fn restart_campaign(&mut self) -> Result<(), SessionError> {
        let first = self.levels.first().ok_or(SessionError::EmptyCampaign)?;
        self.engine.load_level(first)?;
        self.engine.reset();
        self.shake.clear();
        self.level_index = 0;
        self.phase = SessionPhase::Ready;
        self.publish();
        Ok(())
    }

    /// Feed one sensor sample
    pub fn on_tilt(&mut self, sample: TiltSample) -> TickReport {
        if self.phase != SessionPhase::Running {
            return TickReport::default();
        }

        let outcome = self.engine.on_tilt(sample);
        let shake = if sample.is_finite() {
            self.shake.push(sample.x, sample.y, sample.z)
        } else {
            None
        };
        if let Some(reading) = shake.filter(|r| r.shaking) {
            log::info!("Device shaking (avg jerk {:.2})", reading.average);
        }

        match outcome {
            Outcome::Failed => self.phase = SessionPhase::Failed,
            Outcome::Succeeded => self.phase = SessionPhase::Succeeded,
            Outcome::Continue => {}
        }
        self.publish();

        TickReport {
            outcome: Some(outcome),
            shake,
        }
    }

    fn publish(&self) {
        self.snapshot.publish(BallSnapshot::from(self.engine.ball()));
    }

    /// Handle for a render loop
    pub fn snapshot(&self) -> SnapshotCell {
        self.snapshot.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Position in the campaign (0-based)
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn engine(&self) -> &LabyrinthEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::TileSpec;
    use crate::sim::TileKind;
    use glam::Vec2;

    fn config() -> SessionConfig {
        SessionConfig {
            radius: 10.0,
            physics: PhysicsTuning::default(),
            shake: ShakeConfig::default(),
        }
    }

    /// END listed before START on the same cell: first tick wins
    fn instant_win(name: &str) -> LevelSpec {
        LevelSpec::new(
            name,
            vec![
                TileSpec::new(TileKind::End, 2, 2),
                TileSpec::new(TileKind::Start, 2, 2),
            ],
        )
    }

    fn trap() -> LevelSpec {
        LevelSpec::new(
            "trap",
            vec![
                TileSpec::new(TileKind::Hole, 2, 2),
                TileSpec::new(TileKind::Start, 2, 2),
                TileSpec::new(TileKind::End, 9, 9),
            ],
        )
    }

    fn open(name: &str) -> LevelSpec {
        LevelSpec::new(
            name,
            vec![
                TileSpec::new(TileKind::Start, 2, 2),
                TileSpec::new(TileKind::End, 9, 9),
            ],
        )
    }

    fn session(levels: Vec<LevelSpec>) -> Session {
        let mut session = Session::new(config(), levels).unwrap();
        session.set_surface(400, 400);
        session
    }

    fn tilt() -> TiltSample {
        TiltSample::new(1.0, 1.0, 9.8)
    }

    #[test]
    fn test_empty_campaign_rejected() {
        assert!(matches!(
            Session::new(config(), Vec::new()),
            Err(SessionError::EmptyCampaign)
        ));
    }

    #[test]
    fn test_invalid_level_rejected_up_front() {
        let bad = LevelSpec::new("bad", vec![TileSpec::new(TileKind::Start, 1, 1)]);
        assert!(matches!(
            Session::new(config(), vec![open("a"), bad]),
            Err(SessionError::Level(LevelError::InvalidLevelSpec { .. }))
        ));
    }

    #[test]
    fn test_ticks_dropped_until_started() {
        let mut s = session(vec![open("a")]);
        assert_eq!(s.phase(), SessionPhase::Ready);

        let report = s.on_tilt(tilt());
        assert_eq!(report.outcome, None);
        assert_eq!(s.engine().velocity(), Vec2::ZERO);

        s.start().unwrap();
        assert_eq!(s.on_tilt(tilt()).outcome, Some(Outcome::Continue));
        assert_ne!(s.engine().velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_stop_and_resume() {
        let mut s = session(vec![open("a")]);
        s.start().unwrap();
        s.stop();
        assert_eq!(s.phase(), SessionPhase::Paused);
        assert_eq!(s.on_tilt(tilt()).outcome, None);

        s.resume().unwrap();
        assert_eq!(s.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_hole_fails_and_suppresses_ticks() {
        let mut s = session(vec![trap()]);
        s.start().unwrap();

        assert_eq!(s.on_tilt(tilt()).outcome, Some(Outcome::Failed));
        assert_eq!(s.phase(), SessionPhase::Failed);

        let pos = s.engine().position();
        assert_eq!(s.on_tilt(tilt()).outcome, None);
        assert_eq!(s.engine().position(), pos);
        assert!(s.start().is_err());
    }

    #[test]
    fn test_reset_after_failure() {
        let mut s = session(vec![trap()]);
        s.start().unwrap();
        s.on_tilt(tilt());

        s.reset().unwrap();
        assert_eq!(s.phase(), SessionPhase::Ready);
        assert_eq!(s.engine().position(), Vec2::new(50.0, 50.0));
        assert_eq!(s.engine().velocity(), Vec2::ZERO);
        s.start().unwrap();
    }

    #[test]
    fn test_advance_through_campaign() {
        let mut s = session(vec![instant_win("one"), instant_win("two")]);
        assert!(s.advance().is_err());

        s.start().unwrap();
        assert_eq!(s.on_tilt(tilt()).outcome, Some(Outcome::Succeeded));
        assert_eq!(s.phase(), SessionPhase::Succeeded);

        assert_eq!(s.advance().unwrap(), SessionPhase::Running);
        assert_eq!(s.level_index(), 1);
        assert_eq!(s.engine().level_name(), Some("two"));
        assert_eq!(s.engine().velocity(), Vec2::ZERO);

        assert_eq!(s.on_tilt(tilt()).outcome, Some(Outcome::Succeeded));
        assert_eq!(s.advance().unwrap(), SessionPhase::Completed);
        assert_eq!(s.on_tilt(tilt()).outcome, None);
        assert!(s.reset().is_err());

        s.restart_campaign().unwrap();
        assert_eq!(s.phase(), SessionPhase::Ready);
        assert_eq!(s.level_index(), 0);
        assert_eq!(s.engine().level_name(), Some("one"));
    }

    #[test]
    fn test_snapshot_follows_ticks() {
        let mut s = session(vec![open("a")]);
        let reader = s.snapshot();
        assert_eq!(reader.read().position, Vec2::new(50.0, 50.0));

        s.start().unwrap();
        s.on_tilt(TiltSample::new(8.0, 0.0, 9.8));
        assert_eq!(reader.read().position, s.engine().position());
        assert_eq!(reader.read().position, Vec2::new(50.0, 51.0));

        s.reset().unwrap();
        assert_eq!(reader.read().position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_shake_reading_reported() {
        let mut cfg = config();
        cfg.shake.window = 4;
        let mut s = Session::new(cfg, vec![open("a")]).unwrap();
        s.set_surface(400, 400);
        s.start().unwrap();

        let reports: Vec<_> = (0..4)
            .map(|i| {
                let z = if i % 2 == 0 { 25.0 } else { 1.0 };
                s.on_tilt(TiltSample::new(0.0, 0.0, z))
            })
            .collect();

        assert!(reports[..3].iter().all(|r| r.shake.is_none()));
        assert!(reports[3].shake.unwrap().shaking);
    }

    #[test]
    fn test_from_settings_builtin_campaign() {
        let settings = Settings::default();
        let s = Session::from_settings(&settings, 643).unwrap();
        assert_eq!(s.level_count(), 3);
        assert_eq!(s.engine().radius(), 20.0);
        assert_eq!(s.engine().level_name(), Some("Corridors"));
        // START (2,2) with 40px tiles
        assert_eq!(s.engine().position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_from_settings_unknown_level() {
        let mut settings = Settings::default();
        settings.campaign = vec![1, 42];
        assert!(matches!(
            Session::from_settings(&settings, 643),
            Err(SessionError::Level(LevelError::UnknownLevel(42)))
        ));
    }
}
