use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::{
    AccountDescriptor, AccountProbe, AdminError, ApiResponse, CloudinaryAdminClient, Connector,
    OptionError, OptionStore,
};

/// Option store backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryOptionStore {
    options: Mutex<HashMap<String, String>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OptionStore for InMemoryOptionStore {
    fn get_option(&self, name: &str) -> Result<Option<String>, OptionError> {
        Ok(self.options.lock().unwrap().get(name).cloned())
    }

    fn set_option(&self, name: &str, value: &str) -> Result<(), OptionError> {
        self.options
            .lock()
            .unwrap()
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete_option(&self, name: &str) -> Result<(), OptionError> {
        self.options.lock().unwrap().remove(name);
        Ok(())
    }
}

/// A request observed by [`FakeCloud`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Create(String, String),
    Update(String, String),
    CheckCredentials,
    CheckPreset(String),
}

/// Scriptable stand-in for a Cloudinary account that records every call.
pub struct FakeCloud {
    existing: Mutex<HashSet<String>>,
    rejected: HashMap<String, ApiResponse>,
    unreachable: HashSet<String>,
    presets: HashSet<String>,
    credentials_status: u16,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeCloud {
    fn default() -> Self {
        Self {
            existing: Mutex::new(HashSet::new()),
            rejected: HashMap::new(),
            unreachable: HashSet::new(),
            presets: HashSet::new(),
            credentials_status: 200,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a transformation with this name already exists.
    pub fn with_transformation(self, name: &str) -> Self {
        self.existing.lock().unwrap().insert(name.to_owned());
        self
    }

    /// Answer create/update for `name` with a non-200 status.
    pub fn rejecting(mut self, name: &str, status: u16, message: &str) -> Self {
        self.rejected
            .insert(name.to_owned(), ApiResponse::new(status, message));
        self
    }

    /// Fail every call for `name` at the transport level.
    pub fn unreachable(mut self, name: &str) -> Self {
        self.unreachable.insert(name.to_owned());
        self
    }

    pub fn with_preset(mut self, name: &str) -> Self {
        self.presets.insert(name.to_owned());
        self
    }

    pub fn with_credentials_status(mut self, status: u16) -> Self {
        self.credentials_status = status;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Create and update calls only, in order.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(..) | Call::Update(..)))
            .collect()
    }

    pub fn exists_now(&self, name: &str) -> bool {
        self.existing.lock().unwrap().contains(name)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_reachable(&self, name: &str) -> Result<(), AdminError> {
        if self.unreachable.contains(name) {
            return Err(AdminError::Network(format!("connection refused for {name}")));
        }
        Ok(())
    }

    fn apply(&self, name: &str) -> ApiResponse {
        if let Some(response) = self.rejected.get(name) {
            return response.clone();
        }
        self.existing.lock().unwrap().insert(name.to_owned());
        ApiResponse::new(200, "OK")
    }
}

#[async_trait::async_trait]
impl CloudinaryAdminClient for FakeCloud {
    async fn exists(&self, name: &str) -> Result<bool, AdminError> {
        self.record(Call::Exists(name.to_owned()));
        self.check_reachable(name)?;
        Ok(self.exists_now(name))
    }

    async fn create(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        self.record(Call::Create(name.to_owned(), value.to_owned()));
        self.check_reachable(name)?;
        Ok(self.apply(name))
    }

    async fn update(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        self.record(Call::Update(name.to_owned(), value.to_owned()));
        self.check_reachable(name)?;
        Ok(self.apply(name))
    }
}

#[async_trait::async_trait]
impl AccountProbe for FakeCloud {
    async fn check_credentials(&self) -> Result<u16, AdminError> {
        self.record(Call::CheckCredentials);
        Ok(self.credentials_status)
    }

    async fn check_preset(&self, preset: &str) -> Result<u16, AdminError> {
        self.record(Call::CheckPreset(preset.to_owned()));
        Ok(if self.presets.contains(preset) { 200 } else { 404 })
    }
}

/// Connector that hands out the same [`FakeCloud`] for any account.
pub struct FakeConnector(pub Arc<FakeCloud>);

impl Connector for FakeConnector {
    fn admin(&self, _account: &AccountDescriptor) -> Arc<dyn CloudinaryAdminClient> {
        self.0.clone()
    }

    fn probe(&self, _account: &AccountDescriptor) -> Arc<dyn AccountProbe> {
        self.0.clone()
    }
}
