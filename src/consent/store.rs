use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SiteError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    Granted,
    Denied,
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentKind {
    Necessary,
    Analytics,
    Marketing,
}

/// The user's cookie decision. `necessary` is always granted; it is carried
/// in the record only so the stored cookie is self-describing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsentState {
    necessary: ConsentStatus,
    pub analytics: ConsentStatus,
    pub marketing: ConsentStatus,
}

impl Default for ConsentState {
    fn default() -> Self {
        Self {
            necessary: ConsentStatus::Granted,
            analytics: ConsentStatus::Pending,
            marketing: ConsentStatus::Pending,
        }
    }
}

impl ConsentState {
    pub fn status(&self, kind: ConsentKind) -> ConsentStatus {
        match kind {
            ConsentKind::Necessary => ConsentStatus::Granted,
            ConsentKind::Analytics => self.analytics,
            ConsentKind::Marketing => self.marketing,
        }
    }

    pub fn is_granted(&self, kind: ConsentKind) -> bool {
        self.status(kind) == ConsentStatus::Granted
    }

    fn is_decided(&self) -> bool {
        self.analytics != ConsentStatus::Pending && self.marketing != ConsentStatus::Pending
    }

    /// Parses a stored record. Anything unreadable is treated as no record.
    pub fn from_record(record: &str) -> Option<Self> {
        match serde_json::from_str::<ConsentState>(record) {
            Ok(mut state) => {
                state.necessary = ConsentStatus::Granted;
                Some(state)
            }
            Err(e) => {
                warn!("Ignoring unreadable consent record: {}", e);
                None
            }
        }
    }

    pub fn to_record(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// User actions coming from the consent prompt and the footer link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentAction {
    AcceptAll,
    RejectAll,
    Update(ConsentKind, ConsentStatus),
    Save,
    OpenPrompt,
}

/// Where the consent record lives between visits.
pub trait ConsentPersistence {
    fn read(&self) -> Option<String>;
    fn write(&self, record: &str) -> Result<(), SiteError>;
}

/// The analytics vendor behind the consent gate.
pub trait AnalyticsSink {
    fn initialize(&self) -> Result<(), SiteError>;
    fn report(&self, event: &str, params: &Value) -> Result<(), SiteError>;
}

/// Holds two copies of the decision: `committed` is what is on record and
/// gates analytics, `draft` is what the prompt is editing.
pub struct ConsentStore<P, A> {
    committed: ConsentState,
    draft: ConsentState,
    prompt_open: bool,
    analytics_ready: bool,
    persistence: P,
    analytics: A,
}

impl<P: ConsentPersistence, A: AnalyticsSink> ConsentStore<P, A> {
    pub fn new(persistence: P, analytics: A) -> Self {
        Self {
            committed: ConsentState::default(),
            draft: ConsentState::default(),
            prompt_open: false,
            analytics_ready: false,
            persistence,
            analytics,
        }
    }

    /// Restores the stored decision. Returns true when the consent prompt
    /// has to be shown because there is no usable decision on record.
    pub fn load(&mut self) -> bool {
        let stored = self
            .persistence
            .read()
            .and_then(|record| ConsentState::from_record(&record))
            .filter(ConsentState::is_decided);

        match stored {
            Some(state) => {
                self.committed = state;
                self.draft = state;
                self.prompt_open = false;
                self.sync_analytics();
            }
            None => {
                self.committed = ConsentState::default();
                self.draft = ConsentState::default();
                self.prompt_open = true;
            }
        }
        self.prompt_open
    }

    pub fn accept_all(&mut self) {
        self.draft.analytics = ConsentStatus::Granted;
        self.draft.marketing = ConsentStatus::Granted;
        self.commit();
    }

    pub fn reject_all(&mut self) {
        self.draft.analytics = ConsentStatus::Denied;
        self.draft.marketing = ConsentStatus::Denied;
        self.commit();
    }

    /// Changes one category of the draft only. Nothing is stored, and
    /// nothing is gated differently, until `save`.
    pub fn update_one(&mut self, kind: ConsentKind, status: ConsentStatus) {
        match kind {
            ConsentKind::Necessary => {}
            ConsentKind::Analytics => self.draft.analytics = status,
            ConsentKind::Marketing => self.draft.marketing = status,
        }
    }

    /// Stores the customized choice. Categories the user never touched are
    /// stored as denied.
    pub fn save(&mut self) {
        if self.draft.analytics == ConsentStatus::Pending {
            self.draft.analytics = ConsentStatus::Denied;
        }
        if self.draft.marketing == ConsentStatus::Pending {
            self.draft.marketing = ConsentStatus::Denied;
        }
        self.commit();
    }

    pub fn apply(&mut self, action: ConsentAction) {
        match action {
            ConsentAction::AcceptAll => self.accept_all(),
            ConsentAction::RejectAll => self.reject_all(),
            ConsentAction::Update(kind, status) => self.update_one(kind, status),
            ConsentAction::Save => self.save(),
            ConsentAction::OpenPrompt => self.open_prompt(),
        }
    }

    /// Reopens the prompt starting from the stored decision; edits that
    /// were never saved are dropped.
    pub fn open_prompt(&mut self) {
        self.draft = self.committed;
        self.prompt_open = true;
    }

    pub fn has_consent(&self, kind: ConsentKind) -> bool {
        self.committed.is_granted(kind)
    }

    pub fn committed(&self) -> ConsentState {
        self.committed
    }

    pub fn draft(&self) -> ConsentState {
        self.draft
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Forwards an analytics event, or does nothing without consent.
    pub fn track(&self, event: &str, params: &Value) {
        if !self.analytics_ready || !self.has_consent(ConsentKind::Analytics) {
            return;
        }
        if let Err(e) = self.analytics.report(event, params) {
            warn!("Analytics event {} dropped: {}", event, e);
        }
    }

    fn commit(&mut self) {
        self.committed = self.draft;
        self.prompt_open = false;
        match self.committed.to_record() {
            Ok(record) => {
                if let Err(e) = self.persistence.write(&record) {
                    warn!("Consent kept for this session only: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize consent: {}", e),
        }
        self.sync_analytics();
    }

    fn sync_analytics(&mut self) {
        if self.analytics_ready || !self.has_consent(ConsentKind::Analytics) {
            return;
        }
        // Marked ready even on failure: a blocked script is not retried.
        self.analytics_ready = true;
        match self.analytics.initialize() {
            Ok(()) => info!("Analytics initialized"),
            Err(e) => warn!("Analytics disabled: {}", e),
        }
    }
}
