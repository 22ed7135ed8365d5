use crate::client::HubClient;
use crate::error::{HubError, Result};
use crate::preset::{PresetInfo, PresetStore};
use crate::reconcile::{compare, ApplyOutcome, RouteDiff};
use crate::state::HubState;

/// One operator session against one hub.
///
/// Owns at most one live hub state and one loaded preset, plus the preset
/// store. All "has the hub been read" / "is a preset loaded" bookkeeping
/// lives here as explicit fields, and the preconditions surface as typed
/// errors instead of being checked ad hoc by callers.
pub struct Session {
    client: HubClient,
    store: PresetStore,
    live: Option<HubState>,
    preset: Option<HubState>,
    loaded_preset: Option<String>,
}

impl Session {
    /// Create a session over a hub client and a preset store
    pub fn new(client: HubClient, store: PresetStore) -> Self {
        Self {
            client,
            store,
            live: None,
            preset: None,
            loaded_preset: None,
        }
    }

    /// Fetch the hub configuration, replacing any previous live state.
    ///
    /// Returns the new live state; the raw preamble is discarded here, use
    /// [`read_hub_full`](Self::read_hub_full) to keep it.
    pub async fn read_hub(&mut self) -> Result<&HubState> {
        let (state, _) = self.client.read_state().await?;
        Ok(self.live.insert(state))
    }

    /// Fetch the hub configuration and also return the raw preamble text
    pub async fn read_hub_full(&mut self) -> Result<(&HubState, String)> {
        let (state, preamble) = self.client.read_state().await?;
        Ok((self.live.insert(state), preamble))
    }

    /// Live hub state from the last successful read, if any
    pub fn live(&self) -> Option<&HubState> {
        self.live.as_ref()
    }

    /// Currently loaded preset, if any
    pub fn preset(&self) -> Option<&HubState> {
        self.preset.as_ref()
    }

    /// Name of the currently loaded preset, if any
    pub fn loaded_preset(&self) -> Option<&str> {
        self.loaded_preset.as_deref()
    }

    /// Whether the hub has been read this session
    pub fn hub_read(&self) -> bool {
        self.live.is_some()
    }

    /// Load a named preset from the store, replacing any loaded preset
    pub fn load_preset(&mut self, name: &str) -> Result<&HubState> {
        let state = self.store.load(name)?;
        self.loaded_preset = Some(name.to_string());
        Ok(self.preset.insert(state))
    }

    /// Save the live hub state as a named preset with a description.
    ///
    /// Requires a prior [`read_hub`](Self::read_hub); saving an unread
    /// session would capture nothing.
    pub fn save_preset(&mut self, name: &str, description: &str) -> Result<()> {
        let live = self.live.as_mut().ok_or(HubError::HubNotRead)?;
        live.description = description.to_string();
        self.store.save(name, live)?;
        Ok(())
    }

    /// Delete a named preset from the store.
    ///
    /// The loaded preset stays in memory even if its file is deleted.
    pub fn delete_preset(&self, name: &str) -> Result<()> {
        self.store.delete(name)
    }

    /// List stored presets with their descriptions
    pub fn list_presets(&self) -> Result<Vec<PresetInfo>> {
        self.store.list()
    }

    /// Compare the loaded preset against the live hub state.
    ///
    /// Fails with [`HubError::NoPresetLoaded`] or [`HubError::HubNotRead`]
    /// when either side is missing; no partial comparison is produced.
    pub fn compare(&self) -> Result<Vec<RouteDiff>> {
        let preset = self.preset.as_ref().ok_or(HubError::NoPresetLoaded)?;
        let live = self.live.as_ref().ok_or(HubError::HubNotRead)?;
        compare(preset, live)
    }

    /// Push the loaded preset's routing onto the hub.
    ///
    /// The live state is not refreshed by this; follow with
    /// [`read_hub`](Self::read_hub) to observe the result.
    pub async fn apply_preset(&self) -> Result<Vec<ApplyOutcome>> {
        let preset = self.preset.as_ref().ok_or(HubError::NoPresetLoaded)?;
        self.client.apply_preset(preset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session(dir: &std::path::Path) -> Session {
        Session::new(
            HubClient::new("127.0.0.1", crate::DEFAULT_PORT),
            PresetStore::new(dir),
        )
    }

    fn routed_state() -> HubState {
        let mut state = HubState::default();
        state.routing.insert(0, 1);
        state
    }

    #[test]
    fn compare_without_preset_reports_no_preset_loaded() {
        let dir = tempdir().unwrap();
        let mut s = session(dir.path());
        s.live = Some(routed_state());

        assert!(matches!(s.compare().unwrap_err(), HubError::NoPresetLoaded));
    }

    #[test]
    fn compare_without_live_state_reports_hub_not_read() {
        let dir = tempdir().unwrap();
        let mut s = session(dir.path());
        s.preset = Some(routed_state());

        assert!(matches!(s.compare().unwrap_err(), HubError::HubNotRead));
    }

    #[test]
    fn save_before_read_reports_hub_not_read() {
        let dir = tempdir().unwrap();
        let mut s = session(dir.path());

        assert!(matches!(
            s.save_preset("x", "desc").unwrap_err(),
            HubError::HubNotRead
        ));
        assert!(s.list_presets().unwrap().is_empty());
    }

    #[test]
    fn save_load_compare_cycle() {
        let dir = tempdir().unwrap();
        let mut s = session(dir.path());
        s.live = Some(routed_state());

        s.save_preset("snap", "as captured").unwrap();
        s.load_preset("snap").unwrap();
        assert_eq!(s.loaded_preset(), Some("snap"));
        assert_eq!(s.preset().unwrap().description, "as captured");

        // preset matches the live state it was captured from
        let rows = s.compare().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].differs);

        // drift the live state, compare notices
        s.live.as_mut().unwrap().routing.insert(0, 3);
        let rows = s.compare().unwrap();
        assert!(rows[0].differs);
    }

    #[test]
    fn load_missing_preset_keeps_session_untouched() {
        let dir = tempdir().unwrap();
        let mut s = session(dir.path());

        assert!(matches!(
            s.load_preset("missing").unwrap_err(),
            HubError::PresetNotFound(_)
        ));
        assert!(s.preset().is_none());
        assert_eq!(s.loaded_preset(), None);
    }
}
