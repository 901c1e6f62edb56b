//! Menu and session lifecycle
//!
//! The app sits in the menu until a level is started, owns that level's
//! session while it runs, and settles the profile once the session ends.

use crate::error::{GameError, Result};
use crate::map::{load_map, map_path};
use crate::menu::{LevelEntry, level_entries, select_level};
use crate::profile::Profile;
use crate::settings::Settings;
use crate::sim::{GameSession, Outcome, SessionPhase};

pub struct App {
    settings: Settings,
    profile: Profile,
    session: Option<GameSession>,
}

impl App {
    /// Load the profile named by `settings`
    pub fn new(settings: Settings) -> Self {
        let profile = Profile::load(&settings.profile_path);
        Self::with_profile(settings, profile)
    }

    pub fn with_profile(settings: Settings, profile: Profile) -> Self {
        Self {
            settings,
            profile,
            session: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Menu entries for the current profile
    pub fn levels(&self) -> Vec<LevelEntry> {
        level_entries(&self.profile)
    }

    /// Start `level` if it is unlocked and its map loads
    ///
    /// Nothing is built when the map cannot be read. A finished session that
    /// was never handed to [`App::finish_session`] is settled first, so its
    /// unlock is saved before it is replaced.
    pub fn start_level(&mut self, level: u32, seed: Option<u64>) -> Result<&mut GameSession> {
        if self.session.as_ref().is_some_and(GameSession::is_playing) {
            return Err(GameError::SessionActive);
        }
        if let Some(outcome) = self.finish_session()? {
            log::debug!("Settled previous session: {}", outcome.message);
        }
        let level = select_level(&self.profile, level)?;
        let layout = load_map(&map_path(&self.settings.maps_dir, level))?;
        let config = self.settings.session_config(seed);

        let mut session = GameSession::new(level, layout, config);
        session.start();
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Return to the menu once the running session has ended
    ///
    /// A completed level unlocks the next one and the profile is saved right
    /// away. Returns `None` while there is no session or it is still running.
    pub fn finish_session(&mut self) -> Result<Option<Outcome>> {
        let Some(outcome) = self.session.as_ref().and_then(GameSession::outcome) else {
            return Ok(None);
        };
        let level = self.session.take().map_or(0, |s| s.level());

        if outcome.phase == SessionPhase::Completed && self.profile.unlock_next(level) {
            self.profile.save(&self.settings.profile_path)?;
        }
        Ok(Some(outcome))
    }

    /// Replace the profile with a fresh one and save it
    pub fn reset_profile(&mut self) -> Result<()> {
        self.profile = Profile::default();
        self.profile.save(&self.settings.profile_path)
    }
}
